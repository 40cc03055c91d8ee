//! # Lineage Application Library
//!
//! CLI, configuration and input loading around `lineage-core`.
//! Exposed as a library so integration tests can drive commands directly.

pub mod cli;
pub mod config;
pub mod input;
