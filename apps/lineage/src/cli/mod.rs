//! # Lineage CLI Module
//!
//! This module implements the CLI interface for Lineage.
//!
//! ## Available Commands
//!
//! - `inspect` - Classify one product's relations
//! - `check` - Run scenario fixtures against the classifier
//! - `kinds` - List the relation vocabulary

mod commands;

use crate::config::LineageConfig;
use clap::{Parser, Subcommand};
use lineage_core::LineageError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Lineage - product relation inspector
///
/// Answers which lifecycle transitions produced a product, which it
/// originated, and which inclusive relations link it to another product.
#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the relations of one product
    Inspect {
        /// Path to a JSON array of relation snapshots
        #[arg(short, long)]
        file: PathBuf,

        /// Product to classify
        #[arg(short, long)]
        product: u64,

        /// Counterpart for refinancing/absorption queries
        #[arg(short, long)]
        other: Option<u64>,

        /// Reject malformed relation sets
        #[arg(short, long)]
        strict: bool,
    },

    /// Run scenario fixtures and report pass/fail
    Check {
        /// Path to a JSON array of scenarios
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List relation kinds and their family
    Kinds,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, config: &LineageConfig) -> Result<(), LineageError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Inspect {
            file,
            product,
            other,
            strict,
        }) => cmd_inspect(config, json_mode, &file, product, other, strict),
        Some(Commands::Check { file }) => cmd_check(config, json_mode, &file),
        Some(Commands::Kinds) | None => {
            // No subcommand - list the vocabulary by default
            cmd_kinds(json_mode)
        }
    }
}
