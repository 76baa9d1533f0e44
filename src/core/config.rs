use crate::core::{require_non_negative, require_positive, ValidationError};
use chrono::Duration;
use rust_decimal::Decimal;

/// Configuration for the liquidation engine.
///
/// Immutable after validated construction. The default liquidation fee is a
/// ratio of position value (e.g. `0.05` for 5%), not an absolute amount.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidationConfig {
    default_grace_period: Duration,
    default_liquidation_fee: Decimal,
    minimum_auction_duration: Duration,
    maximum_auction_duration: Duration,
    bid_increment: Decimal,
    /// A bid landing within this window of the deadline extends the auction.
    auto_extend_threshold: Duration,
}

impl LiquidationConfig {
    /// Create a validated configuration.
    ///
    /// Rules: fee ratio must be non-negative, the minimum auction duration
    /// positive, the maximum strictly greater than the minimum, the bid
    /// increment positive, and the auto-extend threshold non-negative.
    pub fn new(
        default_grace_period: Duration,
        default_liquidation_fee: Decimal,
        minimum_auction_duration: Duration,
        maximum_auction_duration: Duration,
        bid_increment: Decimal,
        auto_extend_threshold: Duration,
    ) -> Result<Self, ValidationError> {
        require_non_negative("liquidation fee", default_liquidation_fee)?;
        if minimum_auction_duration <= Duration::zero() {
            return Err(ValidationError::NonPositiveDuration {
                field: "minimum auction duration",
            });
        }
        if maximum_auction_duration <= minimum_auction_duration {
            return Err(ValidationError::DurationOrdering);
        }
        require_positive("bid increment", bid_increment)?;
        if auto_extend_threshold < Duration::zero() {
            return Err(ValidationError::NegativeThreshold);
        }

        Ok(Self {
            default_grace_period,
            default_liquidation_fee,
            minimum_auction_duration,
            maximum_auction_duration,
            bid_increment,
            auto_extend_threshold,
        })
    }

    // --- Accessors ---

    pub fn default_grace_period(&self) -> Duration {
        self.default_grace_period
    }

    pub fn default_liquidation_fee(&self) -> Decimal {
        self.default_liquidation_fee
    }

    pub fn minimum_auction_duration(&self) -> Duration {
        self.minimum_auction_duration
    }

    pub fn maximum_auction_duration(&self) -> Duration {
        self.maximum_auction_duration
    }

    pub fn bid_increment(&self) -> Decimal {
        self.bid_increment
    }

    pub fn auto_extend_threshold(&self) -> Duration {
        self.auto_extend_threshold
    }
}
