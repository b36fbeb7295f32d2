//! Command-line front-end for the assignment engine.

use castmatch::assignment::Assignment;
use castmatch::conflict::{analyze, AnalyzerConfig};
use castmatch::error::{AssignError, LoadError};
use castmatch::evaluate::StrategyEvaluator;
use castmatch::generate::{generate, GeneratorConfig};
use castmatch::loader::{load_preferences, write_assignment, PreferenceFormat};
use castmatch::model::{Character, PreferenceModel, RawPreference};
use castmatch::report;
use castmatch::strategy::{self, StrategyKind};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Assign(#[from] AssignError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Parser)]
#[command(name = "castmatch", version, about = "Assign characters to people from ranked preferences")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Input options shared by `assign` and `evaluate`.
#[derive(Args)]
struct InputArgs {
    /// CSV file with preference data.
    file: PathBuf,

    /// Input layout: wide (one row per person) or long (one row per pair).
    #[arg(long, default_value = "wide")]
    format: PreferenceFormat,

    /// CSV delimiter.
    #[arg(long, default_value = ",")]
    delimiter: char,
}

#[derive(Subcommand)]
enum Command {
    /// Run one strategy (or pick the best) and print the assignment.
    Assign {
        #[command(flatten)]
        input: InputArgs,

        /// Strategy to use; omitted = evaluate all and apply the best.
        #[arg(long)]
        strategy: Option<StrategyKind>,

        /// Write the assignment to this CSV file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Emit the assignment as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Compare all strategies on one dataset.
    Evaluate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Generate a synthetic preference dataset (wide CSV).
    Generate {
        #[arg(long, default_value_t = 12)]
        people: usize,

        #[arg(long, default_value_t = 8)]
        characters: usize,

        #[arg(long, default_value_t = 2)]
        min_choices: usize,

        #[arg(long, default_value_t = 5)]
        max_choices: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Assign {
            input,
            strategy,
            output,
            json,
        } => cmd_assign(input, strategy, output, json),
        Command::Evaluate { input } => cmd_evaluate(input),
        Command::Generate {
            people,
            characters,
            min_choices,
            max_choices,
            seed,
            output,
        } => cmd_generate(people, characters, min_choices, max_choices, seed, output),
    }
}

fn load_model(input: &InputArgs) -> Result<PreferenceModel, CliError> {
    let delimiter = parse_delimiter(input.delimiter)?;
    let prefs = load_preferences(&input.file, input.format, delimiter)?;
    build_model(prefs)
}

fn parse_delimiter(c: char) -> Result<u8, CliError> {
    u8::try_from(c)
        .map_err(|_| CliError::InvalidArgument("delimiter must be an ASCII character".into()))
}

/// Builds a model from loaded preferences, discovering the roster from the
/// data. When people outnumber characters, every character gets a uniform
/// multiplicity of `ceil(people / characters)` so a full assignment stays
/// possible; the engine itself never invents capacity.
fn build_model(prefs: Vec<RawPreference>) -> Result<PreferenceModel, CliError> {
    let mut ids: Vec<String> = prefs
        .iter()
        .flat_map(|p| p.choices.iter().cloned())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let copies = if ids.is_empty() {
        1
    } else {
        prefs.len().div_ceil(ids.len()).max(1)
    };
    if copies > 1 {
        tracing::info!(copies, "more people than characters; replicating slots");
    }
    let roster: Vec<Character> = ids
        .into_iter()
        .map(|id| Character::with_slots(id, copies))
        .collect();
    let model = PreferenceModel::build(prefs, roster).map_err(AssignError::from)?;
    Ok(model)
}

fn cmd_assign(
    input: InputArgs,
    strategy: Option<StrategyKind>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let delimiter = parse_delimiter(input.delimiter)?;
    let model = load_model(&input)?;

    let assignment: Assignment = match strategy {
        Some(kind) => {
            if !json {
                println!("{}", report::render_conflicts(&analyze(&model, &AnalyzerConfig::default())));
            }
            strategy::run(kind, &model)?
        }
        None => {
            let evaluator = StrategyEvaluator::new(&model);
            if !json {
                println!("{}", report::render_conflicts(evaluator.conflicts()));
            }
            let ranked = evaluator.run(&StrategyKind::COMPARABLE)?;
            if !json {
                println!("{}", report::render_comparison(&ranked));
            }
            let best = ranked.into_iter().next().expect("at least one strategy");
            tracing::info!(strategy = %best.strategy, "applying best strategy");
            best.assignment
        }
    };

    let rows = assignment.rows(&model);
    if json {
        let payload = serde_json::json!({
            "strategy": assignment.strategy(),
            "approximate": assignment.is_approximate(),
            "assignments": rows,
            "metrics": assignment.metrics(&model),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", report::render_assignment(&model, &assignment));
    }

    if let Some(path) = output {
        write_assignment(File::create(&path)?, &rows, delimiter)?;
        tracing::info!(path = %path.display(), "assignment written");
    }
    Ok(())
}

fn cmd_evaluate(input: InputArgs) -> Result<(), CliError> {
    let model = load_model(&input)?;
    let evaluator = StrategyEvaluator::new(&model);
    println!("{}", report::render_conflicts(evaluator.conflicts()));
    let ranked = evaluator.run(&StrategyKind::COMPARABLE)?;
    println!("{}", report::render_comparison(&ranked));
    if let Some(best) = ranked.first() {
        println!("best strategy: {}", best.strategy);
    }
    Ok(())
}

fn cmd_generate(
    people: usize,
    characters: usize,
    min_choices: usize,
    max_choices: usize,
    seed: u64,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = GeneratorConfig::default()
        .with_people(people)
        .with_characters(characters)
        .with_choices(min_choices, max_choices)
        .with_seed(seed);
    let prefs = generate(&config).map_err(CliError::InvalidArgument)?;

    let out: Box<dyn std::io::Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    write_wide_csv(out, &prefs)?;
    Ok(())
}

fn write_wide_csv<W: std::io::Write>(writer: W, prefs: &[RawPreference]) -> Result<(), CliError> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let width = prefs.iter().map(|p| p.choices.len()).max().unwrap_or(0);
    let mut header = vec!["person".to_string()];
    header.extend((1..=width).map(|i| format!("pref{i}")));
    csv.write_record(&header).map_err(LoadError::from)?;
    for p in prefs {
        let mut record = vec![p.person.clone()];
        record.extend(p.choices.iter().cloned());
        csv.write_record(&record).map_err(LoadError::from)?;
    }
    csv.flush()?;
    Ok(())
}
