//! # Input Loading
//!
//! Reads relation sets and scenario fixtures from JSON files.
//!
//! Files are path-validated and size-limited before they are read.

use lineage_core::{LineageError, RelationSet, Scenario};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Validate file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it is a
/// regular file.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, LineageError> {
    let canonical = path.canonicalize().map_err(|e| {
        LineageError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(LineageError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
pub fn validate_file_size(path: &Path, max_size: u64) -> Result<(), LineageError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| LineageError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(LineageError::Serialization(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path, max_size: u64) -> Result<T, LineageError> {
    let path = validate_file_path(path)?;
    validate_file_size(&path, max_size)?;

    let content = std::fs::read_to_string(&path)
        .map_err(|e| LineageError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    serde_json::from_str(&content).map_err(|e| {
        LineageError::Serialization(format!("Invalid JSON in '{}': {}", path.display(), e))
    })
}

/// Load a JSON array of relation snapshots. Duplicates collapse.
pub fn load_relations(path: &Path, max_size: u64) -> Result<RelationSet, LineageError> {
    let relations: RelationSet = read_json(path, max_size)?;
    tracing::debug!(count = relations.len(), path = %path.display(), "Loaded relations");
    Ok(relations)
}

/// Load a JSON array of scenarios.
pub fn load_scenarios(path: &Path, max_size: u64) -> Result<Vec<Scenario>, LineageError> {
    let scenarios: Vec<Scenario> = read_json(path, max_size)?;
    tracing::debug!(count = scenarios.len(), path = %path.display(), "Loaded scenarios");
    Ok(scenarios)
}
