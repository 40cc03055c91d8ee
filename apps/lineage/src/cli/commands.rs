//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command builds a serializable report, then prints it as text or JSON.

use crate::config::LineageConfig;
use crate::input::{load_relations, load_scenarios};
use lineage_core::{
    KindFamily, LifecycleSummary, LineageError, ProductId, RelationDetails, RelationKind,
    ScenarioOutcome, run_all, violations,
};
use serde::Serialize;
use std::path::Path;

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Inclusive relation flags between the inspected product and a counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InclusiveReport {
    pub other: ProductId,
    pub is_refinanced_by: bool,
    pub does_refinance: bool,
    pub is_absorbed_by: bool,
    pub does_absorb: bool,
}

impl InclusiveReport {
    #[must_use]
    pub fn new(details: &RelationDetails, other: ProductId) -> Self {
        Self {
            other,
            is_refinanced_by: details.is_refinanced_by(other),
            does_refinance: details.does_refinance(other),
            is_absorbed_by: details.is_absorbed_by(other),
            does_absorb: details.does_absorb(other),
        }
    }
}

/// Result of `lineage inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub strict: bool,
    pub summary: LifecycleSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<InclusiveReport>,
    /// Well-formedness problems tolerated in lenient mode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Classify one product's relations loaded from `file`.
///
/// Strict mode (flag or config) fails on malformed relation sets; lenient
/// mode answers best-effort and lists the problems as warnings.
pub fn inspect(
    config: &LineageConfig,
    file: &Path,
    product: u64,
    other: Option<u64>,
    strict: bool,
) -> Result<InspectReport, LineageError> {
    let strict = strict || config.strict;
    let product = ProductId(product);
    let relations = load_relations(file, config.max_input_bytes)?;

    let (details, warnings) = if strict {
        let details = RelationDetails::strict(product, relations).inspect_err(|e| {
            tracing::warn!(%product, error = %e, "Rejected relation set");
        })?;
        (details, Vec::new())
    } else {
        let warnings: Vec<String> = violations(product, &relations)
            .iter()
            .map(ToString::to_string)
            .collect();
        for warning in &warnings {
            tracing::warn!(%product, "{}", warning);
        }
        (RelationDetails::new(product, relations), warnings)
    };

    Ok(InspectReport {
        strict,
        summary: details.summary(),
        inclusive: other.map(|o| InclusiveReport::new(&details, ProductId(o))),
        warnings,
    })
}

/// Print the lifecycle summary for one product.
pub fn cmd_inspect(
    config: &LineageConfig,
    json_mode: bool,
    file: &Path,
    product: u64,
    other: Option<u64>,
    strict: bool,
) -> Result<(), LineageError> {
    let report = inspect(config, file, product, other, strict)?;

    if json_mode {
        return print_json(&report);
    }

    println!("Lineage Relation Details");
    println!("========================");
    println!("Product:   {}", report.summary.product_id);
    println!("Relations: {}", report.summary.relation_count);
    println!("Mode:      {}", if report.strict { "strict" } else { "lenient" });
    println!();
    println!("{:<14} {:<9} {:<10} Derived From", "Kind", "Produced", "Originated");
    for entry in &report.summary.entries {
        println!(
            "{:<14} {:<9} {:<10} {}",
            entry.kind.as_str(),
            yes_no(entry.produced),
            yes_no(entry.originated),
            entry
                .derived_from
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }

    if let Some(inclusive) = &report.inclusive {
        println!();
        println!("Against product {}:", inclusive.other);
        println!("  Is refinanced by: {}", yes_no(inclusive.is_refinanced_by));
        println!("  Does refinance:   {}", yes_no(inclusive.does_refinance));
        println!("  Is absorbed by:   {}", yes_no(inclusive.is_absorbed_by));
        println!("  Does absorb:      {}", yes_no(inclusive.does_absorb));
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Result of `lineage check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl CheckReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Run every scenario in `file`.
pub fn check(config: &LineageConfig, file: &Path) -> Result<CheckReport, LineageError> {
    let scenarios = load_scenarios(file, config.max_input_bytes)?;
    let outcomes = run_all(&scenarios);
    let passed = outcomes.iter().filter(|o| o.passed).count();

    Ok(CheckReport {
        total: outcomes.len(),
        passed,
        failed: outcomes.len() - passed,
        outcomes,
    })
}

/// Print scenario outcomes; fails if any scenario failed.
pub fn cmd_check(config: &LineageConfig, json_mode: bool, file: &Path) -> Result<(), LineageError> {
    let report = check(config, file)?;

    if json_mode {
        print_json(&report)?;
    } else {
        for outcome in &report.outcomes {
            match &outcome.failure {
                None => println!("[PASS] {}", outcome.name),
                Some(failure) => println!("[FAIL] {}: {}", outcome.name, failure),
            }
        }
        println!();
        println!(
            "{} scenarios: {} passed, {} failed",
            report.total, report.passed, report.failed
        );
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(LineageError::ScenariosFailed {
            path: file.display().to_string(),
            failed: report.failed,
            total: report.total,
        })
    }
}

// =============================================================================
// KINDS COMMAND
// =============================================================================

/// One entry of the relation vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    pub kind: RelationKind,
    pub family: KindFamily,
}

/// The relation vocabulary in declaration order.
#[must_use]
pub fn kinds() -> Vec<KindInfo> {
    RelationKind::ALL
        .iter()
        .map(|&kind| KindInfo {
            kind,
            family: kind.family(),
        })
        .collect()
}

/// Print the relation vocabulary.
pub fn cmd_kinds(json_mode: bool) -> Result<(), LineageError> {
    let kinds = kinds();

    if json_mode {
        return print_json(&kinds);
    }

    println!("{:<14} Family", "Kind");
    for info in &kinds {
        let family = match info.family {
            KindFamily::Lifecycle => "lifecycle",
            KindFamily::Inclusive => "inclusive",
        };
        println!("{:<14} {}", info.kind.as_str(), family);
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<(), LineageError> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| LineageError::Serialization(e.to_string()))?;
    println!("{}", output);
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
