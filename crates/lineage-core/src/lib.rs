//! # lineage-core
//!
//! The deterministic relation classifier for Lineage - THE LOGIC.
//!
//! Given one product's identifier and the complete set of directed, typed
//! relations touching it, this crate answers:
//! - which lifecycle transitions produced the product (it is the target)
//! - which lifecycle transitions it originated (it is the source)
//! - whether it refinances/absorbs, or is refinanced/absorbed by, a second
//!   caller-supplied product
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure: no I/O, no persistence, no mutation of its inputs
//! - Treats the relation set as a flat, unordered snapshot (no timestamps,
//!   no transitive closure)
//! - Trusts its input by default; strict validation is opt-in
//! - Has NO async, NO logging, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod details;
pub mod query;
pub mod relations;
pub mod scenario;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{KindFamily, LineageError, ProductId, RelationKind, RelationSnapshot, Role};

// =============================================================================
// RE-EXPORTS: Query Engine
// =============================================================================

pub use details::{LifecycleEntry, LifecycleSummary, RelationDetails};
pub use query::{RelationMatch, RelationQuery};
pub use relations::RelationSet;
pub use scenario::{Scenario, ScenarioOutcome, ScenarioType, run_all};
pub use validation::{validate, violations};
