//! CLI Adapter.

mod assets;
mod collect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{AppError, DEFAULT_CONFIG_PATH, Record};

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "INTELSIEM_CONFIG";

#[derive(Parser)]
#[command(name = "intelsiem")]
#[command(version)]
#[command(
    about = "Collect and validate threat-intelligence records from external feeds",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch records from every configured source and print them as JSON
    #[clap(visible_alias = "c")]
    Collect {
        /// Path to the YAML config (defaults to $INTELSIEM_CONFIG, then config/config.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Read an asset inventory file and print its assets as JSON
    #[clap(visible_alias = "a")]
    Assets {
        /// YAML or JSON file holding a list of assets
        inventory: PathBuf,
        /// Config whose `logging` section picks the error log
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Collect { config, pretty } => collect::run_collect(config, pretty),
        Commands::Assets { inventory, config, pretty } => {
            assets::run_assets(&inventory, config, pretty)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Pick the config path: explicit flag, then environment, then the default.
pub fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn print_records(records: &[Record], pretty: bool) -> Result<(), AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
