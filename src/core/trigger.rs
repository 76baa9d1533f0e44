use crate::core::id::TriggerId;
use crate::core::{require_positive, ValidationError};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of risk breach that can trigger a liquidation.
///
/// Each kind carries a risk multiplier used when computing the liquidation
/// fee: riskier breach categories justify a steeper penalty to compensate
/// liquidators and the insurance pool for tail risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    MarginCall,
    HealthFactor,
    VolatilitySpike,
    CorrelationBreakdown,
    LiquidityCrisis,
    SmartContractRisk,
}

impl TriggerKind {
    /// All trigger kinds, in ascending risk order.
    pub const ALL: [TriggerKind; 6] = [
        TriggerKind::MarginCall,
        TriggerKind::HealthFactor,
        TriggerKind::VolatilitySpike,
        TriggerKind::CorrelationBreakdown,
        TriggerKind::LiquidityCrisis,
        TriggerKind::SmartContractRisk,
    ];

    /// Risk multiplier applied to the base liquidation fee for this kind.
    pub fn risk_multiplier(self) -> Decimal {
        match self {
            TriggerKind::MarginCall => dec!(1.0),
            TriggerKind::HealthFactor => dec!(1.2),
            TriggerKind::VolatilitySpike => dec!(1.5),
            TriggerKind::CorrelationBreakdown => dec!(1.8),
            TriggerKind::LiquidityCrisis => dec!(2.0),
            TriggerKind::SmartContractRisk => dec!(2.5),
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriggerKind::MarginCall => "margin-call",
            TriggerKind::HealthFactor => "health-factor",
            TriggerKind::VolatilitySpike => "volatility-spike",
            TriggerKind::CorrelationBreakdown => "correlation-breakdown",
            TriggerKind::LiquidityCrisis => "liquidity-crisis",
            TriggerKind::SmartContractRisk => "smart-contract-risk",
        };
        f.write_str(s)
    }
}

impl FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "margin-call" => Ok(TriggerKind::MarginCall),
            "health-factor" => Ok(TriggerKind::HealthFactor),
            "volatility-spike" => Ok(TriggerKind::VolatilitySpike),
            "correlation-breakdown" => Ok(TriggerKind::CorrelationBreakdown),
            "liquidity-crisis" => Ok(TriggerKind::LiquidityCrisis),
            "smart-contract-risk" => Ok(TriggerKind::SmartContractRisk),
            other => Err(format!("unknown trigger kind: {other}")),
        }
    }
}

/// A named liquidation trigger definition.
///
/// Registry entries pair a breach category with the threshold the risk
/// monitor compares against and the grace period a condition must persist
/// before liquidation proceeds. Entries are immutable once registered,
/// except for the `active` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidationTrigger {
    id: TriggerId,
    kind: TriggerKind,
    threshold: Decimal,
    grace_period: Duration,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LiquidationTrigger {
    /// Create a new trigger definition.
    ///
    /// The threshold must be positive and the grace period non-zero.
    pub fn new(
        id: TriggerId,
        kind: TriggerKind,
        threshold: Decimal,
        grace_period: Duration,
    ) -> Result<Self, ValidationError> {
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "trigger ID" });
        }
        require_positive("threshold", threshold)?;
        if grace_period <= Duration::zero() {
            return Err(ValidationError::NonPositiveDuration {
                field: "grace period",
            });
        }

        let now = Utc::now();
        Ok(Self {
            id,
            kind,
            threshold,
            grace_period,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Activate or deactivate this trigger.
    pub fn set_active(&mut self, active: bool, now: DateTime<Utc>) {
        self.active = active;
        self.updated_at = now;
    }

    // --- Accessors ---

    pub fn id(&self) -> &TriggerId {
        &self.id
    }

    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
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
