//! # Configuration
//!
//! Application settings, resolved with the precedence
//! CLI flag > environment > TOML file > default.
//!
//! ## File
//!
//! ```toml
//! strict = true
//! log_format = "json"
//! max_input_bytes = 1048576
//! ```
//!
//! ## Environment Variables
//!
//! - `LINEAGE_CONFIG`: Path of the TOML file (default: `lineage.toml` if present)
//! - `LINEAGE_STRICT`: `true`/`1` enables strict validation
//! - `LINEAGE_LOG_FORMAT`: `text` or `json`

use lineage_core::LineageError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lineage.toml";

/// Default maximum size of an input file (10 MB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = LineageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(LineageError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineageConfig {
    /// Reject malformed relation sets instead of answering best-effort.
    pub strict: bool,
    /// Log output format.
    pub log_format: LogFormat,
    /// Maximum size of an input file in bytes.
    pub max_input_bytes: u64,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            strict: false,
            log_format: LogFormat::Text,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl LineageConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, LineageError> {
        toml::from_str(s).map_err(|e| LineageError::Config(e.to_string()))
    }

    /// Load from a file, then apply process environment overrides.
    ///
    /// An explicit path (argument or `LINEAGE_CONFIG`) must exist. Without
    /// one, `lineage.toml` is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, LineageError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("LINEAGE_CONFIG").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LineageError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LineageError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `LINEAGE_*` overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), LineageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(strict) = lookup("LINEAGE_STRICT") {
            self.strict = parse_flag(&strict)?;
        }
        if let Some(format) = lookup("LINEAGE_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool, LineageError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LineageError::Config(format!(
            "Invalid boolean for LINEAGE_STRICT: {}",
            other
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================
