//! # Relation Details
//!
//! The query engine over one product's relation set.
//!
//! `RelationDetails` is built once per product and answers every question
//! with a bounded scan of the set it owns. It never mutates its input and
//! exposes no mutation.
//!
//! ## Directional Semantics
//!
//! | Family | Named query | Product role | Opposite endpoint |
//! |---|---|---|---|
//! | Lifecycle | `is_renewal()` | Target | any |
//! | Lifecycle | `is_renewal_source_product()` | Source | any |
//! | Inclusive | `is_refinanced_by(other)` | Source | `other` (target) |
//! | Inclusive | `does_refinance(other)` | Target | `other` (source) |
//!
//! The inclusive reading is inverted relative to the lifecycle one:
//! "X is refinanced by Y" holds for the stored edge `X -> Y`.

use crate::query::{RelationMatch, RelationQuery};
use crate::validation;
use crate::{
    KindFamily, LineageError, ProductId, RelationKind, RelationSet, RelationSnapshot, Role,
};
use serde::{Deserialize, Serialize};

/// Relation classifier for a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDetails {
    product_id: ProductId,
    relations: RelationSet,
}

/// Generates the target-role, source-role and derived-from queries of one
/// lifecycle kind.
macro_rules! lifecycle_queries {
    ($kind:ident, $produced:ident, $originated:ident, $derived:ident) => {
        #[doc = concat!("Check if this product is the target of a `", stringify!($kind), "` relation.")]
        #[must_use]
        pub fn $produced(&self) -> bool {
            self.query(RelationKind::$kind, Role::Target).present
        }

        #[doc = concat!("Check if this product is the source of a `", stringify!($kind), "` relation.")]
        #[must_use]
        pub fn $originated(&self) -> bool {
            self.query(RelationKind::$kind, Role::Source).present
        }

        #[doc = concat!(
            "The source of the `", stringify!($kind),
            "` relation targeting this product. `None` in the source role."
        )]
        #[must_use]
        pub fn $derived(&self) -> Option<ProductId> {
            self.query(RelationKind::$kind, Role::Target).counterpart
        }
    };
}

impl RelationDetails {
    /// Create the engine. Accepts the inputs as given; nothing is validated.
    #[must_use]
    pub fn new(product_id: ProductId, relations: RelationSet) -> Self {
        Self {
            product_id,
            relations,
        }
    }

    /// Alias of [`RelationDetails::new`].
    #[must_use]
    pub fn build(
        product_id: ProductId,
        relations: impl IntoIterator<Item = RelationSnapshot>,
    ) -> Self {
        Self::new(product_id, relations.into_iter().collect())
    }

    /// Create the engine, rejecting malformed relation sets.
    ///
    /// Unlike [`RelationDetails::new`], this fails on self-relations,
    /// relations that do not reference `product_id`, and more than one
    /// lifecycle relation of a kind with the product in the same role.
    pub fn strict(product_id: ProductId, relations: RelationSet) -> Result<Self, LineageError> {
        validation::validate(product_id, &relations)?;
        Ok(Self::new(product_id, relations))
    }

    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    // =========================================================================
    // GENERIC PRIMITIVES
    // =========================================================================

    /// Execute a structured query.
    ///
    /// With several matching relations (malformed data) the first in set
    /// order supplies the counterpart.
    #[must_use]
    pub fn execute(&self, query: &RelationQuery) -> RelationMatch {
        let product = self.product_id;
        let found = self.relations.of_kind(query.kind).find(|r| {
            r.endpoint(query.role) == product
                && query
                    .other
                    .is_none_or(|other| r.endpoint(query.role.opposite()) == other)
        });

        match found {
            None => RelationMatch::absent(),
            Some(r) => {
                let counterpart = match (query.kind.family(), query.role) {
                    (KindFamily::Lifecycle, Role::Target) => Some(r.source_product_id()),
                    _ => None,
                };
                RelationMatch::found(counterpart)
            }
        }
    }

    /// Look up a relation of `kind` with this product in `role`.
    #[must_use]
    pub fn query(&self, kind: RelationKind, role: Role) -> RelationMatch {
        self.execute(&RelationQuery::new(kind, role))
    }

    /// Check for a relation of `kind` with this product in `role` and
    /// `other` at the opposite endpoint.
    #[must_use]
    pub fn related(&self, kind: RelationKind, role: Role, other: ProductId) -> bool {
        self.execute(&RelationQuery::with_other(kind, role, other))
            .present
    }

    // =========================================================================
    // LIFECYCLE QUERIES
    // =========================================================================

    lifecycle_queries!(
        Modification,
        is_modification,
        is_modification_source_product,
        modified_product_id
    );
    lifecycle_queries!(
        Activation,
        is_activation,
        is_activation_source_product,
        activated_product_id
    );
    lifecycle_queries!(Renewal, is_renewal, is_renewal_source_product, renewed_product_id);
    lifecycle_queries!(
        Resignation,
        is_resignation,
        is_resignation_source_product,
        resigned_product_id
    );
    lifecycle_queries!(
        Correction,
        is_correction,
        is_correction_source_product,
        corrected_product_id
    );

    // =========================================================================
    // INCLUSIVE QUERIES
    // =========================================================================

    /// Check if this product is refinanced by `other`.
    ///
    /// Holds for a `REFINANCING` relation with this product as source and
    /// `other` as target.
    #[must_use]
    pub fn is_refinanced_by(&self, other: ProductId) -> bool {
        self.execute(&RelationQuery::subsumed_by(RelationKind::Refinancing, other))
            .present
    }

    /// Check if this product refinances `other`.
    ///
    /// Holds for a `REFINANCING` relation with `other` as source and this
    /// product as target.
    #[must_use]
    pub fn does_refinance(&self, other: ProductId) -> bool {
        self.execute(&RelationQuery::subsumes(RelationKind::Refinancing, other))
            .present
    }

    /// Check if this product is absorbed by `other` (this product is the source).
    #[must_use]
    pub fn is_absorbed_by(&self, other: ProductId) -> bool {
        self.execute(&RelationQuery::subsumed_by(RelationKind::Absorption, other))
            .present
    }

    /// Check if this product absorbs `other` (this product is the target).
    #[must_use]
    pub fn does_absorb(&self, other: ProductId) -> bool {
        self.execute(&RelationQuery::subsumes(RelationKind::Absorption, other))
            .present
    }

    // =========================================================================
    // SUMMARY
    // =========================================================================

    /// Lifecycle flags for every lifecycle kind, in vocabulary order.
    #[must_use]
    pub fn summary(&self) -> LifecycleSummary {
        let entries = RelationKind::LIFECYCLE
            .iter()
            .map(|&kind| {
                let produced = self.query(kind, Role::Target);
                LifecycleEntry {
                    kind,
                    produced: produced.present,
                    originated: self.query(kind, Role::Source).present,
                    derived_from: produced.counterpart,
                }
            })
            .collect();

        LifecycleSummary {
            product_id: self.product_id,
            relation_count: self.relations.len(),
            entries,
        }
    }
}

/// Lifecycle flags of one kind for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEntry {
    pub kind: RelationKind,
    /// The product is the target of a relation of this kind.
    pub produced: bool,
    /// The product is the source of a relation of this kind.
    pub originated: bool,
    /// Source of the relation that produced the product.
    pub derived_from: Option<ProductId>,
}

/// All lifecycle flags for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSummary {
    pub product_id: ProductId,
    pub relation_count: usize,
    pub entries: Vec<LifecycleEntry>,
}

impl LifecycleSummary {
    /// The entry for `kind`, if it is a lifecycle kind.
    #[must_use]
    pub fn entry(&self, kind: RelationKind) -> Option<&LifecycleEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(kind: RelationKind, source: u64, target: u64) -> RelationSnapshot {
        RelationSnapshot::new(kind, ProductId(source), ProductId(target))
    }

    fn details(product: u64, relations: Vec<RelationSnapshot>) -> RelationDetails {
        RelationDetails::new(ProductId(product), relations.into())
    }

    #[test]
    fn empty_set_yields_nothing() {
        let d = details(1, vec![]);
        for kind in RelationKind::ALL {
            assert_eq!(d.query(*kind, Role::Target), RelationMatch::absent());
            assert_eq!(d.query(*kind, Role::Source), RelationMatch::absent());
        }
    }

    #[test]
    fn target_role_reports_counterpart() {
        let d = details(3, vec![rel(RelationKind::Renewal, 1, 3)]);

        assert!(d.is_renewal());
        assert!(!d.is_renewal_source_product());
        assert_eq!(d.renewed_product_id(), Some(ProductId(1)));
    }

    #[test]
    fn source_role_has_no_counterpart() {
        let d = details(1, vec![rel(RelationKind::Renewal, 1, 3)]);

        assert!(!d.is_renewal());
        assert!(d.is_renewal_source_product());
        assert_eq!(d.renewed_product_id(), None);
    }

    #[test]
    fn inclusive_kinds_never_report_counterpart() {
        let d = details(1, vec![rel(RelationKind::Absorption, 5, 1)]);

        assert_eq!(
            d.query(RelationKind::Absorption, Role::Target),
            RelationMatch::found(None)
        );
    }

    #[test]
    fn related_checks_opposite_endpoint() {
        let d = details(1, vec![rel(RelationKind::Correction, 4, 1)]);

        assert!(d.related(RelationKind::Correction, Role::Target, ProductId(4)));
        assert!(!d.related(RelationKind::Correction, Role::Target, ProductId(5)));
        assert!(!d.related(RelationKind::Correction, Role::Source, ProductId(4)));
    }

    #[test]
    fn tie_break_is_first_in_set_order() {
        let d = details(
            9,
            vec![rel(RelationKind::Activation, 8, 9), rel(RelationKind::Activation, 2, 9)],
        );

        assert_eq!(d.activated_product_id(), Some(ProductId(2)));
    }

    #[test]
    fn summary_lists_lifecycle_kinds_only() {
        let d = details(
            2,
            vec![rel(RelationKind::Modification, 1, 2), rel(RelationKind::Resignation, 2, 6)],
        );
        let summary = d.summary();

        assert_eq!(summary.entries.len(), RelationKind::LIFECYCLE.len());
        assert_eq!(summary.relation_count, 2);
        assert!(summary.entry(RelationKind::Refinancing).is_none());

        let modification = summary.entry(RelationKind::Modification);
        assert_eq!(
            modification.map(|e| (e.produced, e.originated, e.derived_from)),
            Some((true, false, Some(ProductId(1))))
        );

        let resignation = summary.entry(RelationKind::Resignation);
        assert_eq!(
            resignation.map(|e| (e.produced, e.originated, e.derived_from)),
            Some((false, true, None))
        );
    }

    #[test]
    fn build_deduplicates() {
        let d = RelationDetails::build(
            ProductId(1),
            vec![rel(RelationKind::Renewal, 1, 2), rel(RelationKind::Renewal, 1, 2)],
        );
        assert_eq!(d.relations().len(), 1);
    }
}
