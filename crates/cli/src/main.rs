//! Runledger CLI
//!
//! Issues ingest and query commands against a file-backed ledger and prints
//! the response body as pretty JSON on stdout. Logs go to stderr.
//!
//! ```text
//! runledger ingest --file body.json
//! runledger run weekly_2025-09-08_2025-09-14
//! runledger runs --since 2025-09-08 --until 2025-09-14
//! runledger kinds
//! ```
//!
//! On failure the error is printed to stderr as `{"code": ..., "error": ...}`
//! and the process exits with 1 for caller errors, 2 for everything else.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use runledger_engine::{LedgerConfig, CONFIG_FILE_NAME};
use runledger_executor::{Command, Error, IngestRequest, Ledger, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "runledger", version, about = "Store and query analytics runs")]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, global = true, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Snapshot file, overriding config and RUNLEDGER_DATA
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ingest one request body: {"kind": ..., "runId": ..., "payload": {...}}
    Ingest {
        /// Read the body from a file instead of stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Show every kind record stored for a run
    Run {
        /// Run id
        run_id: String,
    },
    /// List runs, or the runs whose id encodes exactly [since, until]
    Runs {
        /// Window start date
        #[arg(long)]
        since: Option<String>,
        /// Window end date
        #[arg(long)]
        until: Option<String>,
    },
    /// List the supported ingest kinds
    Kinds,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config, cli.data.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };
    init_logging(&config.log_filter);

    let result = Ledger::open(&config).and_then(|ledger| {
        let command = build_command(cli.command, &mut std::io::stdin())?;
        execute(&ledger, command)
    });
    match result {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

/// Config file, then environment, then `--data`.
fn load_config(path: &Path, data: Option<&Path>) -> Result<LedgerConfig> {
    let mut config = LedgerConfig::load(path)?.with_env_overrides();
    if let Some(data) = data {
        config.data_path = data.to_path_buf();
    }
    Ok(config)
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_command(command: Commands, stdin: &mut impl Read) -> Result<Command> {
    Ok(match command {
        Commands::Ingest { file } => {
            let body = match file {
                Some(path) => std::fs::read_to_string(&path).map_err(|e| Error::Validation {
                    reason: format!("failed to read '{}': {}", path.display(), e),
                })?,
                None => {
                    let mut body = String::new();
                    stdin.read_to_string(&mut body).map_err(|e| Error::Validation {
                        reason: format!("failed to read stdin: {}", e),
                    })?;
                    body
                }
            };
            Command::Ingest {
                request: IngestRequest::from_json(&body).map_err(Error::from)?,
            }
        }
        Commands::Run { run_id } => Command::GetRun { run_id },
        Commands::Runs { since, until } => Command::ListRuns { since, until },
        Commands::Kinds => Command::Kinds,
    })
}

fn execute(ledger: &Ledger, command: Command) -> Result<String> {
    tracing::debug!(target: "runledger::cli", command = command.name(), "Executing");
    let output = ledger.executor().execute(command)?;
    serde_json::to_string_pretty(&output).map_err(|e| Error::Internal {
        reason: format!("failed to render output: {}", e),
    })
}

fn report(err: &Error) -> ExitCode {
    let body = serde_json::json!({"code": err.code(), "error": err.to_string()});
    eprintln!("{}", body);
    if err.is_client_error() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}
