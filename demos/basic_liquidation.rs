//! Basic liquidation walkthrough.
//!
//! A single position breaches its health factor; the engine charges the
//! liquidation fee, spins up a collateral auction, takes two bids, and
//! resolves to the higher one.

use liquidation_engine::core::config::LiquidationConfig;
use liquidation_engine::core::event::LiquidationEvent;
use liquidation_engine::core::id::{BidderId, PositionId, UserId};
use liquidation_engine::core::trigger::TriggerKind;
use liquidation_engine::engine::liquidation::LiquidationEngine;
use liquidation_engine::engine::providers::{ConstantRiskMetrics, FlatPremiumInsurance};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  liquidation-engine: Basic Liquidation Demo  ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let config = LiquidationConfig::new(
        chrono::Duration::minutes(15),
        dec!(0.05),
        chrono::Duration::hours(1),
        chrono::Duration::hours(24),
        dec!(100),
        chrono::Duration::minutes(5),
    )
    .expect("valid configuration");

    let engine = LiquidationEngine::new(
        Arc::new(ConstantRiskMetrics::new(dec!(0.3))),
        Arc::new(FlatPremiumInsurance::new(dec!(0.02))),
        config,
    );

    // --- Step 1: a health factor breach arrives from the risk monitor ---
    println!("━━━ Step 1: Risk Breach ━━━\n");

    let breach = LiquidationEvent::new(
        PositionId::new("pos-eth-42"),
        UserId::new("user-7"),
        TriggerKind::HealthFactor,
        dec!(0.95),
        dec!(1.0),
        dec!(10_000),
        dec!(8_000),
        dec!(12_000),
    )
    .expect("well-formed breach");

    println!("Position:    {}", breach.position_id());
    println!("Trigger:     {} ({} < {})", breach.trigger_kind(), breach.trigger_value(), breach.threshold());
    println!("Position:    ${}", breach.position_value());
    println!("Debt:        ${}", breach.debt_amount());
    println!("Collateral:  ${}\n", breach.collateral_value());

    let event_id = engine.add_event(breach);

    // --- Step 2: process the event into an auction ---
    println!("━━━ Step 2: Liquidation Processing ━━━\n");

    let auction_id = engine
        .process_liquidation_event(event_id)
        .expect("processing succeeds");

    let event = engine.get_event(event_id).expect("event stored");
    let auction = engine.get_auction(auction_id).expect("auction stored");

    println!("Liquidation fee:  ${}  (5% × 1.2 risk multiplier)", event.liquidation_fee());
    println!("Starting price:   ${}  (80% of collateral)", auction.starting_price());
    println!("Price floor:      ${}  (50% of collateral)", auction.minimum_price());
    println!("Reserve price:    ${}  (60% of collateral)", auction.reserve_price());
    println!("Bidding opens:    {}", auction.start_time());
    println!("Bidding closes:   {}\n", auction.end_time());

    // --- Step 3: bidding ---
    println!("━━━ Step 3: Bidding ━━━\n");

    let start = auction.start_time();
    engine
        .start_auction_at(auction_id, start)
        .expect("auction activates at its start time");

    for (bidder, price, at) in [
        ("alice", dec!(7_000), start),
        ("bob", dec!(7_500), start + chrono::Duration::minutes(2)),
    ] {
        engine
            .place_bid_at(auction_id, BidderId::new(bidder), dec!(12_000), price, at)
            .expect("bid accepted");
        println!("{bidder:8} bids ${price}");
    }

    // --- Step 4: resolution ---
    println!("\n━━━ Step 4: Resolution ━━━\n");

    let deadline = engine.get_auction(auction_id).expect("auction stored").end_time();
    let winner = engine
        .end_auction_at(auction_id, deadline)
        .expect("auction resolves")
        .expect("reserve was met");

    println!("Winner:  {} at ${}", winner.bidder_id(), winner.price());
    println!(
        "Event:   {}\n",
        engine.get_event(event_id).expect("event stored").status()
    );

    println!("{}", engine.statistics());
}
