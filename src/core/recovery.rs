use crate::core::id::MechanismId;
use crate::core::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The kind of post-liquidation remedy a mechanism describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryKind {
    PartialRecovery,
    DebtRestructuring,
    CollateralRelease,
    PaymentPlan,
    DebtForgiveness,
}

impl fmt::Display for RecoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecoveryKind::PartialRecovery => "partial-recovery",
            RecoveryKind::DebtRestructuring => "debt-restructuring",
            RecoveryKind::CollateralRelease => "collateral-release",
            RecoveryKind::PaymentPlan => "payment-plan",
            RecoveryKind::DebtForgiveness => "debt-forgiveness",
        };
        f.write_str(s)
    }
}

/// A named post-liquidation remedy definition.
///
/// Registry entries only: mechanisms are looked up by orchestrating callers
/// and are not invoked automatically by any liquidation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryMechanism {
    id: MechanismId,
    kind: RecoveryKind,
    description: String,
    /// Named numeric parameters, e.g. `haircut` or `installments`.
    parameters: BTreeMap<String, Decimal>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecoveryMechanism {
    pub fn new(
        id: MechanismId,
        kind: RecoveryKind,
        description: impl Into<String>,
        parameters: BTreeMap<String, Decimal>,
    ) -> Result<Self, ValidationError> {
        if id.is_empty() {
            return Err(ValidationError::Empty {
                field: "mechanism ID",
            });
        }
        let description = description.into();
        if description.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }

        let now = Utc::now();
        Ok(Self {
            id,
            kind,
            description,
            parameters,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Activate or deactivate this mechanism.
    pub fn set_active(&mut self, active: bool, now: DateTime<Utc>) {
        self.active = active;
        self.updated_at = now;
    }

    // --- Accessors ---

    pub fn id(&self) -> &MechanismId {
        &self.id
    }

    pub fn kind(&self) -> RecoveryKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &BTreeMap<String, Decimal> {
        &self.parameters
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mechanism_creation() {
        let mut params = BTreeMap::new();
        params.insert("haircut".to_string(), dec!(0.25));

        let mechanism = RecoveryMechanism::new(
            MechanismId::new("restructure-25"),
            RecoveryKind::DebtRestructuring,
            "Restructure remaining debt with a 25% haircut",
            params,
        )
        .unwrap();

        assert_eq!(mechanism.kind(), RecoveryKind::DebtRestructuring);
        assert_eq!(mechanism.parameters()["haircut"], dec!(0.25));
        assert!(mechanism.is_active());
    }

    #[test]
    fn test_mechanism_empty_id() {
        let result = RecoveryMechanism::new(
            MechanismId::new(""),
            RecoveryKind::PaymentPlan,
            "monthly installments",
            BTreeMap::new(),
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::Empty { field: "mechanism ID" }
        );
    }

    #[test]
    fn test_mechanism_empty_description() {
        let result = RecoveryMechanism::new(
            MechanismId::new("plan-a"),
            RecoveryKind::PaymentPlan,
            "",
            BTreeMap::new(),
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::Empty { field: "description" }
        );
    }
}
