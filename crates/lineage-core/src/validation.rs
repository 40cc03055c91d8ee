//! # Validation Module
//!
//! Well-formedness checks for a product's relation set.
//!
//! The default engine trusts its input. These checks back the opt-in
//! [`RelationDetails::strict`](crate::RelationDetails::strict) constructor
//! and the CLI's strict mode.
//!
//! A relation set is well-formed for a product if:
//! - No relation links a product to itself
//! - Every relation references the product as source or target
//! - For each lifecycle kind, the product is target of at most one relation
//!   and source of at most one relation

use crate::{LineageError, ProductId, RelationKind, RelationSet, Role};
use std::collections::BTreeMap;

/// Validate a relation set, returning the first violation found.
///
/// Checks run in a fixed order (self-relations, foreign relations, ambiguous
/// roles) so the reported error is deterministic.
pub fn validate(product: ProductId, relations: &RelationSet) -> Result<(), LineageError> {
    match violations(product, relations).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collect every violation in a relation set.
#[must_use]
pub fn violations(product: ProductId, relations: &RelationSet) -> Vec<LineageError> {
    let mut found = Vec::new();

    for relation in relations.iter().filter(|r| r.is_self_relation()) {
        found.push(LineageError::SelfRelation(*relation));
    }

    for relation in relations.foreign_to(product) {
        found.push(LineageError::ForeignRelation {
            product,
            relation: *relation,
        });
    }

    // Lifecycle roles only; inclusive kinds are many-to-many.
    let mut roles: BTreeMap<(RelationKind, Role), usize> = BTreeMap::new();
    for relation in relations {
        if !relation.kind().is_lifecycle() {
            continue;
        }
        if let Some(role) = relation.role_of(product) {
            *roles.entry((relation.kind(), role)).or_default() += 1;
        }
    }

    found.extend(
        roles
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|((kind, role), count)| LineageError::AmbiguousRole {
                product,
                kind,
                role,
                count,
            }),
    );

    found
}

// =============================================================================
// TESTS
// =============================================================================
