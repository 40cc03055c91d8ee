//! # Lineage - Product Relation Inspector
//!
//! The main binary for the Lineage relation classifier.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │             apps/lineage (THE BINARY)          │
//! │                                               │
//! │  ┌─────────────┐  ┌──────────┐  ┌──────────┐  │
//! │  │    CLI      │  │  Config  │  │  Input   │  │
//! │  │   (clap)    │  │  (toml)  │  │  (json)  │  │
//! │  └──────┬──────┘  └────┬─────┘  └────┬─────┘  │
//! │         └──────────────┼─────────────┘        │
//! │                        ▼                      │
//! │                ┌───────────────┐              │
//! │                │ lineage-core  │              │
//! │                │  (THE LOGIC)  │              │
//! │                └───────────────┘              │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! lineage kinds
//! lineage inspect -f relations.json -p 3 --other 4
//! lineage check -f relation_test_cases.json
//! ```

use clap::Parser;
use lineage::cli;
use lineage::config::{LineageConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Configuration decides the log format, so it loads before tracing starts.
    let config = LineageConfig::load(cli.config.as_deref());
    let log_format = config
        .as_ref()
        .map(|c| c.log_format)
        .unwrap_or_default();
    init_tracing(log_format, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing: `json` format enables machine-parseable output.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose { "lineage=debug" } else { "lineage=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so JSON reports on stdout stay parseable.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the Lineage startup banner.
fn print_banner() {
    println!(
        r#"
  Lineage v{}

  Deterministic • Immutable • Lifecycle-aware
"#,
        env!("CARGO_PKG_VERSION")
    );
}
