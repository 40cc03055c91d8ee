//! # Scenario Module
//!
//! Typed relation scenarios and their checker.
//!
//! A scenario names a product, its relations, and what the engine is
//! expected to report: a relation kind with the product's role and the
//! counterpart, or one of the `MULTIPLE` / `NONE` markers.
//!
//! Scenarios deserialize from the camelCase fixture format:
//!
//! ```json
//! {
//!   "name": "Product is renewed",
//!   "productId": 3,
//!   "relations": [
//!     { "relationType": "RENEWAL", "sourceProductId": 1, "targetProductId": 3 }
//!   ],
//!   "relationType": "RENEWAL",
//!   "role": "TARGET",
//!   "otherProductId": 1
//! }
//! ```

use crate::{
    KindFamily, LineageError, ProductId, RelationDetails, RelationKind, RelationSnapshot, Role,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counterpart used by the `NONE` scenario for inclusive probes.
pub const NONE_PROBE_PRODUCT: ProductId = ProductId(2);

/// What a scenario exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScenarioType {
    /// One relation kind, checked in the scenario's role.
    Kind(RelationKind),
    /// Several lifecycle kinds targeting the product at once.
    Multiple,
    /// No relations at all.
    None,
}

impl FromStr for ScenarioType {
    type Err = LineageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MULTIPLE" => Ok(Self::Multiple),
            "NONE" => Ok(Self::None),
            other => other.parse::<RelationKind>().map(Self::Kind),
        }
    }
}

impl TryFrom<String> for ScenarioType {
    type Error = LineageError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ScenarioType> for String {
    fn from(t: ScenarioType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Multiple => f.write_str("MULTIPLE"),
            Self::None => f.write_str("NONE"),
        }
    }
}

/// A named expectation over one product's relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub product_id: ProductId,
    #[serde(default)]
    pub relations: Vec<RelationSnapshot>,
    pub relation_type: ScenarioType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_product_id: Option<ProductId>,
}

impl Scenario {
    /// Build the engine this scenario describes.
    #[must_use]
    pub fn details(&self) -> RelationDetails {
        RelationDetails::build(self.product_id, self.relations.iter().copied())
    }

    /// Run the scenario against a freshly built engine.
    pub fn check(&self) -> Result<(), LineageError> {
        self.check_against(&self.details())
    }

    /// Run the scenario against an existing engine.
    pub fn check_against(&self, details: &RelationDetails) -> Result<(), LineageError> {
        match self.relation_type {
            ScenarioType::Kind(kind) => match kind.family() {
                KindFamily::Lifecycle => self.check_lifecycle(details, kind),
                KindFamily::Inclusive => self.check_inclusive(details, kind),
            },
            ScenarioType::Multiple => self.check_multiple(details),
            ScenarioType::None => self.check_none(details),
        }
    }

    fn check_lifecycle(
        &self,
        details: &RelationDetails,
        kind: RelationKind,
    ) -> Result<(), LineageError> {
        let produced = details.query(kind, Role::Target);
        let originated = details.query(kind, Role::Source);

        match self.role()? {
            Role::Target => {
                self.expect(produced.present, format!("expected product to be {kind} target"))?;
                self.expect(!originated.present, format!("unexpected {kind} source role"))?;
                let other = self.other()?;
                self.expect(
                    produced.counterpart == Some(other),
                    format!("expected {kind} counterpart {other}, got {:?}", produced.counterpart),
                )
            }
            Role::Source => {
                self.expect(!produced.present, format!("unexpected {kind} target role"))?;
                self.expect(originated.present, format!("expected product to be {kind} source"))?;
                self.expect(
                    produced.counterpart.is_none(),
                    format!("expected no {kind} counterpart, got {:?}", produced.counterpart),
                )
            }
        }
    }

    fn check_inclusive(
        &self,
        details: &RelationDetails,
        kind: RelationKind,
    ) -> Result<(), LineageError> {
        let other = self.other()?;
        let subsumes = details.related(kind, Role::Target, other);
        let subsumed = details.related(kind, Role::Source, other);

        match self.role()? {
            Role::Target => {
                self.expect(subsumes, format!("expected {kind} of {other} into product"))?;
                self.expect(!subsumed, format!("unexpected {kind} of product into {other}"))
            }
            Role::Source => {
                self.expect(!subsumes, format!("unexpected {kind} of {other} into product"))?;
                self.expect(subsumed, format!("expected {kind} of product into {other}"))
            }
        }
    }

    /// Every lifecycle kind reports exactly the relations targeting the product.
    fn check_multiple(&self, details: &RelationDetails) -> Result<(), LineageError> {
        for &kind in RelationKind::LIFECYCLE {
            let expected = self
                .relations
                .iter()
                .filter(|r| r.kind() == kind && r.target_product_id() == self.product_id)
                .map(|r| r.source_product_id())
                .min();
            let actual = details.query(kind, Role::Target);

            self.expect(
                actual.present == expected.is_some(),
                format!("{kind}: expected produced = {}", expected.is_some()),
            )?;
            self.expect(
                actual.counterpart == expected,
                format!("{kind}: expected counterpart {expected:?}, got {:?}", actual.counterpart),
            )?;
        }
        Ok(())
    }

    fn check_none(&self, details: &RelationDetails) -> Result<(), LineageError> {
        for &kind in RelationKind::LIFECYCLE {
            for role in [Role::Target, Role::Source] {
                let found = details.query(kind, role);
                self.expect(
                    !found.present && found.counterpart.is_none(),
                    format!("unexpected {kind} relation in {role} role"),
                )?;
            }
        }
        let probe = self.other_product_id.unwrap_or(NONE_PROBE_PRODUCT);
        for &kind in RelationKind::INCLUSIVE {
            for role in [Role::Target, Role::Source] {
                self.expect(
                    !details.related(kind, role, probe),
                    format!("unexpected {kind} relation with {probe}"),
                )?;
            }
        }
        Ok(())
    }

    fn role(&self) -> Result<Role, LineageError> {
        self.role.ok_or_else(|| self.mismatch("scenario has no role"))
    }

    fn other(&self) -> Result<ProductId, LineageError> {
        self.other_product_id
            .ok_or_else(|| self.mismatch("scenario has no otherProductId"))
    }

    fn expect(&self, condition: bool, detail: String) -> Result<(), LineageError> {
        if condition {
            Ok(())
        } else {
            Err(self.mismatch(detail))
        }
    }

    fn mismatch(&self, detail: impl Into<String>) -> LineageError {
        LineageError::ScenarioMismatch {
            scenario: self.name.clone(),
            detail: detail.into(),
        }
    }
}

/// Outcome of one scenario in a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Run every scenario, collecting outcomes in input order.
#[must_use]
pub fn run_all(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|s| {
            let failure = s.check().err().map(|e| e.to_string());
            ScenarioOutcome {
                name: s.name.clone(),
                passed: failure.is_none(),
                failure,
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
