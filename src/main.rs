use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audit_score::report::build_envelope;
use audit_score::scoring::{validation, ScoringEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable table
    Table,
    /// Report JSON (API contract)
    Json,
}

#[derive(Args, Debug, Default)]
struct ScoreArgs {
    /// Audit input JSON file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output format (defaults to table on a terminal, JSON otherwise)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Include the free teaser preview in JSON output
    #[arg(long)]
    teaser: bool,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an audit input document (default if no subcommand)
    Score(ScoreArgs),
    /// Print the effective component weights
    Weights,
    /// Write the default configuration file
    Init {
        /// Where to write (defaults to ~/.config/audit-score/config.yaml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "audit-score")]
#[command(about = "Website audit scoring engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/audit-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Score(ScoreArgs::default()));

    match command {
        Commands::Init { path, force } => {
            // Does not load the existing config, so a broken file can be replaced
            match audit_score::config::write_default_config(path, force) {
                Ok(path) => println!("Config written to {}", path.display()),
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Weights => {
            let engine = load_engine(cli.config);
            println!("{}", audit_score::output::format_weights(engine.weights()));
        }
        Commands::Score(args) => {
            let engine = load_engine(cli.config);
            run_score(&engine, args);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate the scoring setup, exiting with EXIT_CONFIG on any problem.
fn load_engine(config_path: Option<PathBuf>) -> ScoringEngine {
    let config = match audit_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.effective_scoring();
    if let Err(errors) = validation::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    for component in validation::unweighted_components(&effective_scoring) {
        tracing::warn!(%component, "component has no weight and will not affect the overall score");
    }

    match ScoringEngine::from_config(&effective_scoring) {
        Ok(engine) => {
            tracing::debug!(
                components = engine.weights().iter().count(),
                hard_caps = engine.rules().len(),
                "scoring engine ready"
            );
            engine
        }
        Err(e) => {
            eprintln!("Scoring config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn run_score(engine: &ScoringEngine, args: ScoreArgs) {
    let input = match audit_score::input::read_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Input error: {}", e);
            if let Some(source) = std::error::Error::source(&e) {
                eprintln!("  caused by: {}", source);
            }
            std::process::exit(EXIT_IO);
        }
    };

    let component_scores = input.component_scores();
    if component_scores.is_empty() {
        tracing::warn!("input has no checks and no legacy scores");
    }

    let result = engine.compute_overall_score(component_scores);
    tracing::info!(
        overall = result.overall_score,
        caps = result.hard_caps_applied.len(),
        "audit scored"
    );

    let envelope = build_envelope(&input, &result, args.teaser, chrono::Utc::now());
    let json = match serde_json::to_string_pretty(&envelope) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            std::process::exit(EXIT_IO);
        }
    };

    if let Some(ref path) = args.output {
        if let Err(e) = audit_score::config::write_atomic(path, json.as_bytes()) {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        tracing::info!(path = %path.display(), "report written");
    }

    let use_colors = audit_score::output::should_use_colors();
    let format = args.format.unwrap_or(if use_colors {
        OutputFormat::Table
    } else {
        OutputFormat::Json
    });

    match format {
        OutputFormat::Table => {
            println!("{}", audit_score::output::format_report(&result, use_colors));
        }
        OutputFormat::Json => println!("{}", json),
    }
}
