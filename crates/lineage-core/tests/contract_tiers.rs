//! # Contract Tier Tests (C0-C4)
//!
//! If ANY tier fails, the classifier is INVALID.
//!
//! ## Tiers
//! - C0: Baseline (no relations)
//! - C1: Lifecycle target role
//! - C2: Lifecycle source role
//! - C3: Inclusive directionality
//! - C4: Independence, purity and deduplication

use lineage_core::{ProductId, RelationDetails, RelationKind, RelationSet, RelationSnapshot};

fn rel(kind: RelationKind, source: u64, target: u64) -> RelationSnapshot {
    RelationSnapshot::new(kind, ProductId(source), ProductId(target))
}

fn details(product: u64, relations: Vec<RelationSnapshot>) -> RelationDetails {
    RelationDetails::new(ProductId(product), RelationSet::from(relations))
}

/// (produced, originated, derived_from) for one lifecycle kind via the named queries.
fn lifecycle(d: &RelationDetails, kind: RelationKind) -> (bool, bool, Option<ProductId>) {
    match kind {
        RelationKind::Modification => (
            d.is_modification(),
            d.is_modification_source_product(),
            d.modified_product_id(),
        ),
        RelationKind::Activation => (
            d.is_activation(),
            d.is_activation_source_product(),
            d.activated_product_id(),
        ),
        RelationKind::Renewal => (
            d.is_renewal(),
            d.is_renewal_source_product(),
            d.renewed_product_id(),
        ),
        RelationKind::Resignation => (
            d.is_resignation(),
            d.is_resignation_source_product(),
            d.resigned_product_id(),
        ),
        RelationKind::Correction => (
            d.is_correction(),
            d.is_correction_source_product(),
            d.corrected_product_id(),
        ),
        _ => (false, false, None),
    }
}

// =============================================================================
// TIER C0: BASELINE
// =============================================================================

mod c0_baseline {
    use super::*;

    /// C0.1: An empty set answers false/None everywhere.
    #[test]
    fn no_relations_yields_nothing() {
        let d = details(1, vec![]);

        assert!(!d.is_modification());
        assert!(!d.is_modification_source_product());
        assert!(!d.is_activation());
        assert!(!d.is_activation_source_product());
        assert!(!d.is_renewal());
        assert!(!d.is_renewal_source_product());
        assert!(!d.is_resignation());
        assert!(!d.is_resignation_source_product());
        assert!(!d.is_correction());
        assert!(!d.is_correction_source_product());

        assert_eq!(d.modified_product_id(), None);
        assert_eq!(d.activated_product_id(), None);
        assert_eq!(d.renewed_product_id(), None);
        assert_eq!(d.resigned_product_id(), None);
        assert_eq!(d.corrected_product_id(), None);

        assert!(!d.is_refinanced_by(ProductId(2)));
        assert!(!d.does_refinance(ProductId(2)));
        assert!(!d.is_absorbed_by(ProductId(2)));
        assert!(!d.does_absorb(ProductId(2)));
    }

    /// C0.2: Accessors return what was supplied.
    #[test]
    fn accessors_reflect_inputs() {
        let d = details(7, vec![rel(RelationKind::Renewal, 7, 8)]);

        assert_eq!(d.product_id(), ProductId(7));
        assert!(d.relations().contains(&rel(RelationKind::Renewal, 7, 8)));
    }
}

// =============================================================================
// TIER C1: LIFECYCLE TARGET ROLE
// =============================================================================

mod c1_lifecycle_target {
    use super::*;

    /// C1.1: Target of exactly one relation of kind K.
    #[test]
    fn target_role_for_every_lifecycle_kind() {
        for &kind in RelationKind::LIFECYCLE {
            let d = details(2, vec![rel(kind, 1, 2)]);
            assert_eq!(
                lifecycle(&d, kind),
                (true, false, Some(ProductId(1))),
                "{kind} in target role"
            );
        }
    }

    /// C1.2: A lifecycle relation answers only for its own kind.
    #[test]
    fn other_kinds_unaffected() {
        let d = details(2, vec![rel(RelationKind::Resignation, 1, 2)]);

        for &kind in RelationKind::LIFECYCLE {
            if kind != RelationKind::Resignation {
                assert_eq!(lifecycle(&d, kind), (false, false, None), "{kind}");
            }
        }
    }
}

// =============================================================================
// TIER C2: LIFECYCLE SOURCE ROLE
// =============================================================================

mod c2_lifecycle_source {
    use super::*;

    /// C2.1: Source of exactly one relation of kind K has no counterpart.
    #[test]
    fn source_role_for_every_lifecycle_kind() {
        for &kind in RelationKind::LIFECYCLE {
            let d = details(1, vec![rel(kind, 1, 2)]);
            assert_eq!(lifecycle(&d, kind), (false, true, None), "{kind} in source role");
        }
    }

    /// C2.2: Originating several relations still yields no counterpart.
    #[test]
    fn multiple_targets_no_counterpart() {
        let d = details(
            1,
            vec![rel(RelationKind::Renewal, 1, 2), rel(RelationKind::Renewal, 1, 3)],
        );

        assert!(d.is_renewal_source_product());
        assert!(!d.is_renewal());
        assert_eq!(d.renewed_product_id(), None);
    }

    /// C2.3: Both roles of the same kind are reported independently.
    #[test]
    fn chain_member_has_both_roles() {
        let d = details(
            2,
            vec![rel(RelationKind::Renewal, 1, 2), rel(RelationKind::Renewal, 2, 3)],
        );

        assert_eq!(
            lifecycle(&d, RelationKind::Renewal),
            (true, true, Some(ProductId(1)))
        );
    }
}

// =============================================================================
// TIER C3: INCLUSIVE DIRECTIONALITY
// =============================================================================

mod c3_inclusive {
    use super::*;

    /// C3.1: Stored edge p -> o means "p is refinanced by o".
    #[test]
    fn refinanced_by_reads_source_role() {
        let d = details(1, vec![rel(RelationKind::Refinancing, 1, 2)]);

        assert!(d.is_refinanced_by(ProductId(2)));
        assert!(!d.does_refinance(ProductId(2)));
        assert!(!d.is_refinanced_by(ProductId(3)));
    }

    /// C3.2: Stored edge o -> p means "p refinances o".
    #[test]
    fn does_refinance_reads_target_role() {
        let d = details(2, vec![rel(RelationKind::Refinancing, 1, 2)]);

        assert!(d.does_refinance(ProductId(1)));
        assert!(!d.is_refinanced_by(ProductId(1)));
        assert!(!d.does_refinance(ProductId(3)));
    }

    /// C3.3: Stored edge o -> p means "p absorbs o".
    #[test]
    fn does_absorb_reads_target_role() {
        let d = details(5, vec![rel(RelationKind::Absorption, 4, 5)]);

        assert!(d.does_absorb(ProductId(4)));
        assert!(!d.is_absorbed_by(ProductId(4)));
    }

    /// C3.4: Stored edge p -> o means "p is absorbed by o".
    #[test]
    fn absorbed_by_reads_source_role() {
        let d = details(4, vec![rel(RelationKind::Absorption, 4, 5)]);

        assert!(d.is_absorbed_by(ProductId(5)));
        assert!(!d.does_absorb(ProductId(5)));
        assert!(!d.is_absorbed_by(ProductId(6)));
    }

    /// C3.5: Refinancing and absorption do not answer for each other.
    #[test]
    fn inclusive_kinds_are_distinct() {
        let d = details(1, vec![rel(RelationKind::Refinancing, 1, 2)]);

        assert!(!d.is_absorbed_by(ProductId(2)));
        assert!(!d.does_absorb(ProductId(2)));
    }

    /// C3.6: Inclusive relations never leak into lifecycle queries.
    #[test]
    fn inclusive_not_lifecycle() {
        let d = details(
            2,
            vec![rel(RelationKind::Refinancing, 1, 2), rel(RelationKind::Absorption, 3, 2)],
        );

        for &kind in RelationKind::LIFECYCLE {
            assert_eq!(lifecycle(&d, kind), (false, false, None), "{kind}");
        }
    }

    /// C3.7: Many-to-many refinancing.
    #[test]
    fn refinanced_by_several_products() {
        let d = details(
            10,
            vec![
                rel(RelationKind::Refinancing, 10, 11),
                rel(RelationKind::Refinancing, 10, 12),
                rel(RelationKind::Refinancing, 13, 10),
            ],
        );

        assert!(d.is_refinanced_by(ProductId(11)));
        assert!(d.is_refinanced_by(ProductId(12)));
        assert!(d.does_refinance(ProductId(13)));
        assert!(!d.is_refinanced_by(ProductId(13)));
    }
}

// =============================================================================
// TIER C4: INDEPENDENCE, PURITY, DEDUPLICATION
// =============================================================================

mod c4_independence {
    use super::*;

    /// C4.1: Modification and activation targeting the same product.
    #[test]
    fn multiple_kinds_independent() {
        let d = details(
            3,
            vec![rel(RelationKind::Modification, 1, 3), rel(RelationKind::Activation, 2, 3)],
        );

        assert!(d.is_modification());
        assert!(d.is_activation());
        assert_eq!(d.modified_product_id(), Some(ProductId(1)));
        assert_eq!(d.activated_product_id(), Some(ProductId(2)));

        assert!(!d.is_renewal());
        assert!(!d.is_resignation());
    }

    /// C4.2: Repeated queries return identical results.
    #[test]
    fn queries_are_idempotent() {
        let d = details(
            3,
            vec![rel(RelationKind::Correction, 1, 3), rel(RelationKind::Absorption, 3, 4)],
        );

        let first = (d.summary(), d.is_absorbed_by(ProductId(4)));
        for _ in 0..10 {
            assert_eq!((d.summary(), d.is_absorbed_by(ProductId(4))), first);
        }
    }

    /// C4.3: A duplicated list answers like the deduplicated one.
    #[test]
    fn duplicates_do_not_change_results() {
        let once = details(3, vec![rel(RelationKind::Renewal, 1, 3)]);
        let twice = details(
            3,
            vec![rel(RelationKind::Renewal, 1, 3), rel(RelationKind::Renewal, 1, 3)],
        );

        assert_eq!(twice.relations().len(), 1);
        assert_eq!(once.summary(), twice.summary());
        assert_eq!(once, twice);
    }

    /// C4.4: Lenient construction accepts malformed data; strict rejects it.
    #[test]
    fn strict_mode_is_opt_in() {
        let relations = RelationSet::from(vec![
            rel(RelationKind::Activation, 1, 3),
            rel(RelationKind::Activation, 2, 3),
        ]);

        let lenient = RelationDetails::new(ProductId(3), relations.clone());
        assert!(lenient.is_activation());
        assert!(lenient.activated_product_id().is_some());

        assert!(RelationDetails::strict(ProductId(3), relations).is_err());
    }

    /// C4.5: The engine can be shared across threads.
    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RelationDetails>();

        let d = std::sync::Arc::new(details(2, vec![rel(RelationKind::Modification, 1, 2)]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let d = std::sync::Arc::clone(&d);
                std::thread::spawn(move || d.modified_product_id())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().ok().flatten(), Some(ProductId(1)));
        }
    }
}
