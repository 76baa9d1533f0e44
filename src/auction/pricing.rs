use crate::core::config::LiquidationConfig;
use chrono::Duration;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Opening price as a fraction of collateral value.
pub const STARTING_PRICE_RATIO: Decimal = dec!(0.80);
/// Absolute price floor as a fraction of collateral value.
pub const MINIMUM_PRICE_RATIO: Decimal = dec!(0.50);
/// Reserve (minimum winning) price as a fraction of collateral value.
pub const RESERVE_PRICE_RATIO: Decimal = dec!(0.60);
/// One hour of auction time is granted per this much collateral value.
pub const COLLATERAL_PER_AUCTION_HOUR: Decimal = dec!(10_000);

/// Price levels derived from the collateral value of a liquidated position.
///
/// The auction descends from a starting price of 80% of collateral value;
/// bids below the 50% floor are rejected outright, and bids below the 60%
/// reserve can never win even when highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionPricing {
    pub starting_price: Decimal,
    pub minimum_price: Decimal,
    pub reserve_price: Decimal,
}

impl AuctionPricing {
    pub fn from_collateral(collateral_value: Decimal) -> Self {
        Self {
            starting_price: collateral_value * STARTING_PRICE_RATIO,
            minimum_price: collateral_value * MINIMUM_PRICE_RATIO,
            reserve_price: collateral_value * RESERVE_PRICE_RATIO,
        }
    }
}

/// Auction duration for a given collateral value: one whole hour per
/// $10,000 of collateral, clamped to the configured bounds.
pub fn auction_duration(collateral_value: Decimal, config: &LiquidationConfig) -> Duration {
    let min = config.minimum_auction_duration();
    let max = config.maximum_auction_duration();

    let hours = (collateral_value / COLLATERAL_PER_AUCTION_HOUR).floor();
    let hours = match hours.to_i64() {
        Some(h) if h > 0 => h,
        Some(_) => return min,
        // Out of i64 range, which dwarfs any sane maximum duration.
        None => return max,
    };

    match Duration::try_hours(hours) {
        Some(duration) => duration.clamp(min, max),
        None => max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LiquidationConfig {
        LiquidationConfig::new(
            Duration::minutes(15),
            dec!(0.05),
            Duration::hours(2),
            Duration::hours(48),
            dec!(100),
            Duration::minutes(5),
        )
        .unwrap()
    }

    #[test]
    fn test_pricing_ratios() {
        let pricing = AuctionPricing::from_collateral(dec!(12_000));
        assert_eq!(pricing.starting_price, dec!(9_600));
        assert_eq!(pricing.minimum_price, dec!(6_000));
        assert_eq!(pricing.reserve_price, dec!(7_200));
    }

    #[test]
    fn test_duration_proportional_to_collateral() {
        let config = config();
        assert_eq!(
            auction_duration(dec!(100_000), &config),
            Duration::hours(10)
        );
        assert_eq!(auction_duration(dec!(55_000), &config), Duration::hours(5));
    }

    #[test]
    fn test_duration_floor() {
        let config = config();
        // $12k would be 1 hour; the configured minimum of 2 hours wins.
        assert_eq!(auction_duration(dec!(12_000), &config), Duration::hours(2));
        assert_eq!(auction_duration(Decimal::ZERO, &config), Duration::hours(2));
    }

    #[test]
    fn test_duration_ceiling() {
        let config = config();
        assert_eq!(
            auction_duration(dec!(10_000_000), &config),
            Duration::hours(48)
        );
    }

    #[test]
    fn test_partial_hours_truncate() {
        let config = config();
        // $49,999 grants 4 whole hours, not 5.
        assert_eq!(auction_duration(dec!(49_999), &config), Duration::hours(4));
    }
}
