//! # Query Module
//!
//! Structured query types for the relation classifier.
//!
//! - Every named query on `RelationDetails` maps to one `RelationQuery`
//! - A query names a kind, the role the product plays, and optionally the
//!   product at the opposite endpoint
//! - Results are structural (`RelationMatch`), never errors

use crate::{ProductId, RelationKind, Role};
use serde::{Deserialize, Serialize};

/// A single lookup over a relation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationQuery {
    /// The relation kind to match.
    pub kind: RelationKind,
    /// The role the queried product must play.
    pub role: Role,
    /// If set, the product required at the opposite endpoint.
    pub other: Option<ProductId>,
}

impl RelationQuery {
    /// Match any relation of `kind` with the product in `role`.
    #[must_use]
    pub const fn new(kind: RelationKind, role: Role) -> Self {
        Self {
            kind,
            role,
            other: None,
        }
    }

    /// Match a relation of `kind` with the product in `role` and `other` opposite.
    #[must_use]
    pub const fn with_other(kind: RelationKind, role: Role, other: ProductId) -> Self {
        Self {
            kind,
            role,
            other: Some(other),
        }
    }

    /// "The product was produced by a `kind` transition."
    #[must_use]
    pub const fn produced_by(kind: RelationKind) -> Self {
        Self::new(kind, Role::Target)
    }

    /// "The product originated a `kind` transition."
    #[must_use]
    pub const fn originated(kind: RelationKind) -> Self {
        Self::new(kind, Role::Source)
    }

    /// "The product is refinanced/absorbed by `other`": product is the source.
    #[must_use]
    pub const fn subsumed_by(kind: RelationKind, other: ProductId) -> Self {
        Self::with_other(kind, Role::Source, other)
    }

    /// "The product refinances/absorbs `other`": product is the target.
    #[must_use]
    pub const fn subsumes(kind: RelationKind, other: ProductId) -> Self {
        Self::with_other(kind, Role::Target, other)
    }
}

/// Result of a `RelationQuery`.
///
/// `counterpart` is only ever set for lifecycle kinds in the target role,
/// where it holds the source product the target was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationMatch {
    /// Whether a matching relation exists.
    pub present: bool,
    /// The derived-from product, if defined for this query.
    pub counterpart: Option<ProductId>,
}

impl RelationMatch {
    /// No matching relation.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            present: false,
            counterpart: None,
        }
    }

    /// A matching relation, with an optional counterpart.
    #[must_use]
    pub const fn found(counterpart: Option<ProductId>) -> Self {
        Self {
            present: true,
            counterpart,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
