//! # Gambit - entry point
//!
//! ## Run Sequence
//!
//! 1. **Parse** - Read the command line
//! 2. **Trace** - Install the subscriber with `RUST_LOG` or the default filter
//! 3. **Configure** - Load the optional TOML file and fold in CLI overrides,
//!    then switch to the configured filter unless `RUST_LOG` is set
//! 4. **Execute** - Spawn the board, set up, act, tear down
//!
//! Any protocol violation reported by the actors ends the run with a
//! non-zero exit status.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gambit::cli::Cli;
use gambit::commands::{apply_overrides, execute_command};
use gambit::config::GameConfig;
use gambit::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let filter = logging::init();

    let config = match cli.command.config_path() {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::new(),
    };
    let config = apply_overrides(config, &cli.command)?;

    let rust_log = std::env::var("RUST_LOG").ok();
    logging::apply_configured(&filter, rust_log.as_deref(), &config.log_filter)?;
    info!(sides = ?config.sides, "Gambit starting");

    let outcome = execute_command(&cli.command, &config).await?;

    if let Some(diagram) = &outcome.diagram {
        println!("{diagram}");
    }
    if let Some(request) = outcome.played {
        println!("played {request}");
    }

    info!(
        cleared = outcome.cleared,
        remaining = outcome.remaining,
        "Gambit finished in {:?}",
        start_time.elapsed()
    );
    Ok(())
}
