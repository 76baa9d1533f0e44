use crate::core::id::{PositionId, UserId};
use crate::core::trigger::TriggerKind;
use crate::core::{require_non_empty, ValidationError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a liquidation event.
///
/// Transitions are strictly forward: `Triggered → Processing → Auctioning →
/// {Completed | Failed}`. `Cancelled` is representable for events withdrawn
/// before processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiquidationStatus {
    Triggered,
    Processing,
    Auctioning,
    Completed,
    Failed,
    Cancelled,
}

impl fmt::Display for LiquidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LiquidationStatus::Triggered => "triggered",
            LiquidationStatus::Processing => "processing",
            LiquidationStatus::Auctioning => "auctioning",
            LiquidationStatus::Completed => "completed",
            LiquidationStatus::Failed => "failed",
            LiquidationStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One recorded risk breach and the liquidation that follows from it.
///
/// Created once per breach by the external risk monitor, then driven through
/// its lifecycle by the engine: fee calculation, auction creation, and
/// finally outcome propagation from the auction. Events are never deleted.
///
/// Invariant: `0 ≤ liquidation_fee ≤ 0.10 × position_value`. The fee starts
/// at zero and is set exactly once, during processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidationEvent {
    id: Uuid,
    position_id: PositionId,
    user_id: UserId,
    trigger_kind: TriggerKind,
    /// Observed value of the triggering metric at breach time.
    trigger_value: Decimal,
    /// Threshold the metric breached.
    threshold: Decimal,
    position_value: Decimal,
    debt_amount: Decimal,
    collateral_value: Decimal,
    liquidation_fee: Decimal,
    status: LiquidationStatus,
    triggered_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LiquidationEvent {
    /// Record a new risk breach.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position_id: PositionId,
        user_id: UserId,
        trigger_kind: TriggerKind,
        trigger_value: Decimal,
        threshold: Decimal,
        position_value: Decimal,
        debt_amount: Decimal,
        collateral_value: Decimal,
    ) -> Result<Self, ValidationError> {
        require_non_empty("position ID", position_id.as_str())?;
        require_non_empty("user ID", user_id.as_str())?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            position_id,
            user_id,
            trigger_kind,
            trigger_value,
            threshold,
            position_value,
            debt_amount,
            collateral_value,
            liquidation_fee: Decimal::ZERO,
            status: LiquidationStatus::Triggered,
            triggered_at: now,
            processed_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create an event with a specific ID (useful for testing / determinism).
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: Uuid,
        position_id: PositionId,
        user_id: UserId,
        trigger_kind: TriggerKind,
        trigger_value: Decimal,
        threshold: Decimal,
        position_value: Decimal,
        debt_amount: Decimal,
        collateral_value: Decimal,
    ) -> Result<Self, ValidationError> {
        let mut event = Self::new(
            position_id,
            user_id,
            trigger_kind,
            trigger_value,
            threshold,
            position_value,
            debt_amount,
            collateral_value,
        )?;
        event.id = id;
        Ok(event)
    }

    // --- Lifecycle transitions (engine-driven, strictly forward) ---

    pub(crate) fn mark_processing(&mut self, now: DateTime<Utc>) {
        self.status = LiquidationStatus::Processing;
        self.processed_at = Some(now);
        self.updated_at = now;
    }

    pub(crate) fn set_liquidation_fee(&mut self, fee: Decimal, now: DateTime<Utc>) {
        self.liquidation_fee = fee;
        self.updated_at = now;
    }

    pub(crate) fn mark_auctioning(&mut self, now: DateTime<Utc>) {
        self.status = LiquidationStatus::Auctioning;
        self.updated_at = now;
    }

    pub(crate) fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.status = LiquidationStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    pub(crate) fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.status = LiquidationStatus::Failed;
        self.updated_at = now;
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn position_id(&self) -> &PositionId {
        &self.position_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn trigger_kind(&self) -> TriggerKind {
        self.trigger_kind
    }

    pub fn trigger_value(&self) -> Decimal {
        self.trigger_value
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn position_value(&self) -> Decimal {
        self.position_value
    }

    pub fn debt_amount(&self) -> Decimal {
        self.debt_amount
    }

    pub fn collateral_value(&self) -> Decimal {
        self.collateral_value
    }

    pub fn liquidation_fee(&self) -> Decimal {
        self.liquidation_fee
    }

    pub fn status(&self) -> LiquidationStatus {
        self.status
    }

    pub fn triggered_at(&self) -> DateTime<Utc> {
        self.triggered_at
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
