use crate::core::id::{PositionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A statistical risk metric published by the external risk engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskMetricKind {
    ValueAtRisk,
    ConditionalValueAtRisk,
    Volatility,
}

/// Contract for the external statistical risk engine.
///
/// The engine holds this reference on behalf of orchestrating callers; the
/// liquidation/fee/auction pipeline itself consults only the static
/// trigger-kind multiplier table and never queries live risk metrics.
pub trait RiskMetricsProvider: Send + Sync {
    /// Latest value of a risk metric for a position, if one is known.
    fn risk_metric(&self, position: &PositionId, kind: RiskMetricKind) -> Option<Decimal>;
}

/// Contract for the external insurance pool manager. Premium lookups only.
pub trait InsurancePolicyProvider: Send + Sync {
    /// Premium rate of the user's active policy, if any.
    fn premium_rate(&self, user: &UserId) -> Option<Decimal>;
}

/// Risk provider returning the same value for every metric. For tests,
/// demos, and simulations.
#[derive(Debug, Clone)]
pub struct ConstantRiskMetrics {
    value: Decimal,
}

impl ConstantRiskMetrics {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }
}

impl RiskMetricsProvider for ConstantRiskMetrics {
    fn risk_metric(&self, _position: &PositionId, _kind: RiskMetricKind) -> Option<Decimal> {
        Some(self.value)
    }
}

/// Insurance provider quoting one flat premium rate for every user.
#[derive(Debug, Clone)]
pub struct FlatPremiumInsurance {
    rate: Decimal,
}

impl FlatPremiumInsurance {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

impl InsurancePolicyProvider for FlatPremiumInsurance {
    fn premium_rate(&self, _user: &UserId) -> Option<Decimal> {
        Some(self.rate)
    }
}
