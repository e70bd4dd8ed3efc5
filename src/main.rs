use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mneme::Config;
use mneme::MemoryStore;
use mneme::commands::{self, Commands};
use mneme::errors::Error;
use mneme::output::{ErrorResponse, print_json};

/// mneme - A bounded conversational memory for AI agents
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Memory file to use instead of the configured one
    #[arg(long, global = true)]
    memory_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum number of turns to retain
    #[arg(long, global = true)]
    limit: Option<usize>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(path) = &cli.memory_file {
        config.memory_path = path.clone();
    }
    if let Some(limit) = cli.limit {
        config.memory_limit = limit;
    }
    config.validate()?;
    config.ensure_directories()?;

    let mut store = MemoryStore::from_config(&config)?;
    commands::execute(&cli.command, &mut store, &config, cli.json)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
