//! # Core Type Definitions
//!
//! This module contains the core types for the Lineage relation classifier:
//! - Product identifiers (`ProductId`)
//! - Relation vocabulary (`RelationKind`, `KindFamily`)
//! - Endpoint roles (`Role`)
//! - The relation edge itself (`RelationSnapshot`)
//! - Error types (`LineageError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer identifiers only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeSet`
//! - Compare and hash structurally, so equal snapshots deduplicate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// PRODUCT IDENTIFIER
// =============================================================================

/// Unique identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// RELATION VOCABULARY
// =============================================================================

/// The two semantic families a relation kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KindFamily {
    /// "Target was derived from source". At most one relation per role.
    Lifecycle,
    /// "Target subsumes source". Queried by counterpart id.
    Inclusive,
}

/// Kind of a directed relation between two products.
///
/// New kinds may be added; downstream matches must carry a wildcard arm.
/// Serializes as the upper-case wire name and deserializes through
/// [`FromStr`], so both accept any letter case.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum RelationKind {
    Modification,
    Activation,
    Renewal,
    Resignation,
    Correction,
    Refinancing,
    Absorption,
}

impl RelationKind {
    /// Every known kind, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Modification,
        Self::Activation,
        Self::Renewal,
        Self::Resignation,
        Self::Correction,
        Self::Refinancing,
        Self::Absorption,
    ];

    /// Kinds of the lifecycle family.
    pub const LIFECYCLE: &'static [Self] = &[
        Self::Modification,
        Self::Activation,
        Self::Renewal,
        Self::Resignation,
        Self::Correction,
    ];

    /// Kinds of the inclusive family.
    pub const INCLUSIVE: &'static [Self] = &[Self::Refinancing, Self::Absorption];

    /// The family this kind belongs to.
    #[must_use]
    pub const fn family(self) -> KindFamily {
        match self {
            Self::Refinancing | Self::Absorption => KindFamily::Inclusive,
            Self::Modification
            | Self::Activation
            | Self::Renewal
            | Self::Resignation
            | Self::Correction => KindFamily::Lifecycle,
        }
    }

    /// True for lifecycle kinds.
    #[must_use]
    pub const fn is_lifecycle(self) -> bool {
        matches!(self.family(), KindFamily::Lifecycle)
    }

    /// The wire name of this kind (e.g. `"MODIFICATION"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modification => "MODIFICATION",
            Self::Activation => "ACTIVATION",
            Self::Renewal => "RENEWAL",
            Self::Resignation => "RESIGNATION",
            Self::Correction => "CORRECTION",
            Self::Refinancing => "REFINANCING",
            Self::Absorption => "ABSORPTION",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = LineageError;

    /// Parse a wire name. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LineageError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for RelationKind {
    type Error = LineageError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// =============================================================================
// ROLE
// =============================================================================

/// The endpoint a product occupies in a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Source,
    Target,
}

impl Role {
    /// The role `product` plays in `relation`, if any.
    ///
    /// A self-relation reports `Target`.
    #[must_use]
    pub fn of(relation: &RelationSnapshot, product: ProductId) -> Option<Self> {
        if relation.target_product_id == product {
            Some(Self::Target)
        } else if relation.source_product_id == product {
            Some(Self::Source)
        } else {
            None
        }
    }

    /// The other endpoint.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "SOURCE",
            Self::Target => "TARGET",
        })
    }
}

// =============================================================================
// RELATION SNAPSHOT
// =============================================================================

/// One directed, typed edge between two products.
///
/// Immutable once constructed. Equality, ordering and hashing cover all three
/// fields, so structurally equal snapshots collapse inside a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSnapshot {
    #[serde(rename = "relationType")]
    kind: RelationKind,
    source_product_id: ProductId,
    target_product_id: ProductId,
}

impl RelationSnapshot {
    /// Create a new snapshot. Self-relations are not rejected here.
    #[must_use]
    pub const fn new(kind: RelationKind, source: ProductId, target: ProductId) -> Self {
        Self {
            kind,
            source_product_id: source,
            target_product_id: target,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        self.kind
    }

    #[must_use]
    pub const fn source_product_id(&self) -> ProductId {
        self.source_product_id
    }

    #[must_use]
    pub const fn target_product_id(&self) -> ProductId {
        self.target_product_id
    }

    /// The product at the given endpoint.
    #[must_use]
    pub const fn endpoint(&self, role: Role) -> ProductId {
        match role {
            Role::Source => self.source_product_id,
            Role::Target => self.target_product_id,
        }
    }

    /// Check if the product is either endpoint.
    #[must_use]
    pub fn involves(&self, product: ProductId) -> bool {
        self.source_product_id == product || self.target_product_id == product
    }

    /// See [`Role::of`].
    #[must_use]
    pub fn role_of(&self, product: ProductId) -> Option<Role> {
        Role::of(self, product)
    }

    /// The endpoint opposite to `product`, if `product` is involved.
    #[must_use]
    pub fn counterpart_of(&self, product: ProductId) -> Option<ProductId> {
        self.role_of(product)
            .map(|role| self.endpoint(role.opposite()))
    }

    #[must_use]
    pub fn is_self_relation(&self) -> bool {
        self.source_product_id == self.target_product_id
    }
}

impl fmt::Display for RelationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.kind, self.source_product_id, self.target_product_id
        )
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Lineage system.
///
/// Queries never fail; these are raised by parsing, strict validation,
/// scenario checks and the application layer.
#[derive(Debug, Error)]
pub enum LineageError {
    /// A relation kind name is not part of the vocabulary.
    #[error("Unknown relation kind: {0}")]
    UnknownKind(String),

    /// A relation does not reference the queried product.
    #[error("Relation {relation} does not reference product {product}")]
    ForeignRelation {
        product: ProductId,
        relation: RelationSnapshot,
    },

    /// A relation links a product to itself.
    #[error("Self-relation: {0}")]
    SelfRelation(RelationSnapshot),

    /// More than one lifecycle relation of one kind with the product in one role.
    #[error("Product {product} is {role} of {count} {kind} relations (expected at most one)")]
    AmbiguousRole {
        product: ProductId,
        kind: RelationKind,
        role: Role,
        count: usize,
    },

    /// A scenario expectation did not hold.
    #[error("Scenario '{scenario}' failed: {detail}")]
    ScenarioMismatch { scenario: String, detail: String },

    /// Some scenarios of a batch file failed.
    #[error("{failed} of {total} scenarios in '{path}' failed")]
    ScenariosFailed {
        path: String,
        failed: usize,
        total: usize,
    },

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// TESTS
// =============================================================================
