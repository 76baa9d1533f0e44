//! Random liquidation scenario generation.
//!
//! Produces synthetic risk breaches and drives them through the full
//! create → process → activate → bid → resolve pipeline, for stress
//! testing, demos, and benchmarks.

use crate::core::event::LiquidationEvent;
use crate::core::id::{BidderId, PositionId, UserId};
use crate::core::trigger::TriggerKind;
use crate::engine::liquidation::{EngineError, LiquidationEngine};
use chrono::Duration;
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random liquidation scenario.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of risk breaches to generate.
    pub event_count: usize,
    /// Size of the bidder pool competing in each auction.
    pub bidder_count: usize,
    /// Minimum collateral value per breached position, in whole dollars.
    pub min_collateral: u64,
    /// Maximum collateral value per breached position, in whole dollars.
    pub max_collateral: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            event_count: 10,
            bidder_count: 5,
            min_collateral: 5_000,
            max_collateral: 200_000,
        }
    }
}

/// Generate one random risk breach.
pub fn generate_breach(
    rng: &mut impl Rng,
    index: usize,
    config: &ScenarioConfig,
) -> LiquidationEvent {
    let kind = TriggerKind::ALL[rng.gen_range(0..TriggerKind::ALL.len())];
    let collateral = Decimal::from(rng.gen_range(config.min_collateral..=config.max_collateral));
    // Over-collateralized: position is a fraction of collateral, debt a
    // fraction of the position.
    let position = collateral * Decimal::from(rng.gen_range(70..95u32)) / dec!(100);
    let debt = position * Decimal::from(rng.gen_range(50..90u32)) / dec!(100);
    let threshold = dec!(1.0);
    let trigger_value = threshold * Decimal::from(rng.gen_range(80..100u32)) / dec!(100);

    LiquidationEvent::new(
        PositionId::new(format!("pos-{index:04}")),
        UserId::new(format!("user-{:03}", rng.gen_range(0..50u32))),
        kind,
        trigger_value,
        threshold,
        position,
        debt,
        collateral,
    )
    .expect("generated breach is well-formed")
}

/// Generate a batch of random risk breaches.
pub fn generate_breaches(rng: &mut impl Rng, config: &ScenarioConfig) -> Vec<LiquidationEvent> {
    (0..config.event_count)
        .map(|i| generate_breach(rng, i, config))
        .collect()
}

/// Drive a full random scenario through the engine.
///
/// Each breach is processed into an auction, the auction is activated at
/// its start time, a random subset of the bidder pool places ascending
/// bids, and the auction is resolved at its (possibly extended) deadline.
pub fn run_scenario(
    engine: &LiquidationEngine,
    config: &ScenarioConfig,
    rng: &mut impl Rng,
) -> Result<(), EngineError> {
    let now = Utc::now();

    for event in generate_breaches(rng, config) {
        let event_id = engine.add_event(event);
        let auction_id = engine.process_liquidation_event_at(event_id, now)?;

        let auction = engine.get_auction(auction_id)?;
        engine.start_auction_at(auction_id, auction.start_time())?;

        let mut t = auction.start_time();
        let mut price = auction.starting_price();
        for b in 0..config.bidder_count {
            if !rng.gen_bool(0.6) {
                continue;
            }
            price += engine.config().bid_increment() * Decimal::from(rng.gen_range(1..4u32));
            t += Duration::minutes(rng.gen_range(1..10));
            // Bids landing past the deadline are simply rejected; that is
            // part of the scenario, not a failure of it.
            let _ = engine.place_bid_at(
                auction_id,
                BidderId::new(format!("bidder-{b:02}")),
                auction.asset_amount(),
                price,
                t,
            );
        }

        let deadline = engine.get_auction(auction_id)?.end_time();
        engine.end_auction_at(auction_id, deadline)?;
    }

    Ok(())
}
