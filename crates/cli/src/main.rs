//! nestwrite command-line interface
//!
//! ```text
//! nestwrite transform payload.json --report
//! nestwrite --config nestwrite.toml request --schema rule.schema.json payload.json
//! nestwrite check-schema rule.schema.json
//! ```
//!
//! Payloads are read from a file or from stdin when no file is given.
//! Log verbosity follows `RUST_LOG` (default `nestwrite=info`); logs go to stderr.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::Settings;

#[derive(Parser, Debug)]
#[command(name = "nestwrite", version, about = "Shape form payloads into nested-write operations")]
struct Cli {
    /// TOML file with [conventions] and/or [client] tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a payload into a nested-write payload
    Transform {
        /// Payload file (stdin if omitted)
        input: Option<PathBuf>,
        /// Print the per-field report to stderr
        #[arg(long)]
        report: bool,
    },
    /// Build the mutation request for a payload
    Request {
        /// Entity schema file (JSON)
        #[arg(long)]
        schema: PathBuf,
        /// Payload file (stdin if omitted)
        input: Option<PathBuf>,
    },
    /// Validate a schema and print its form and table layout
    CheckSchema {
        /// Entity schema file (JSON)
        schema: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nestwrite=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> nestwrite_core::Result<()> {
    let settings = Settings::load(cli.config.as_deref(), cli.compact)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Transform { input, report } => {
            let text = commands::read_input(input.as_deref())?;
            let mut err = std::io::stderr();
            commands::transform(&settings, &text, report, &mut out, &mut err)
        }
        Command::Request { schema, input } => {
            let schema_text = std::fs::read_to_string(&schema)?;
            let text = commands::read_input(input.as_deref())?;
            commands::request(&settings, &schema_text, &text, &mut out)
        }
        Command::CheckSchema { schema } => {
            let schema_text = std::fs::read_to_string(&schema)?;
            commands::check_schema(&schema_text, &mut out)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "Starting nestwrite");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "nestwrite failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
