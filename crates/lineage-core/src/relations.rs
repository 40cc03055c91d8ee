//! # Relation Set
//!
//! The flat, unordered snapshot of relations touching one product.
//!
//! - Backed by `BTreeSet` for deterministic iteration
//! - Structurally equal snapshots collapse on insertion
//! - No ordering or timestamp semantics: iteration order is structural only

use crate::{ProductId, RelationKind, RelationSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, btree_set};

/// A deduplicated set of relation snapshots.
///
/// Serializes as a plain array; duplicates in the input collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationSet {
    relations: BTreeSet<RelationSnapshot>,
}

impl RelationSet {
    /// Create a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a snapshot. Returns `false` if an equal snapshot was already present.
    pub fn insert(&mut self, relation: RelationSnapshot) -> bool {
        self.relations.insert(relation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    #[must_use]
    pub fn contains(&self, relation: &RelationSnapshot) -> bool {
        self.relations.contains(relation)
    }

    /// Iterate snapshots in deterministic order.
    pub fn iter(&self) -> btree_set::Iter<'_, RelationSnapshot> {
        self.relations.iter()
    }

    /// Iterate snapshots of one kind.
    pub fn of_kind(&self, kind: RelationKind) -> impl Iterator<Item = &RelationSnapshot> + '_ {
        self.relations.iter().filter(move |r| r.kind() == kind)
    }

    /// Iterate snapshots that do not reference `product`.
    pub fn foreign_to(&self, product: ProductId) -> impl Iterator<Item = &RelationSnapshot> + '_ {
        self.relations.iter().filter(move |r| !r.involves(product))
    }
}

impl FromIterator<RelationSnapshot> for RelationSet {
    fn from_iter<I: IntoIterator<Item = RelationSnapshot>>(iter: I) -> Self {
        Self {
            relations: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<RelationSnapshot>> for RelationSet {
    fn from(relations: Vec<RelationSnapshot>) -> Self {
        relations.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'a RelationSnapshot;
    type IntoIter = btree_set::Iter<'a, RelationSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
