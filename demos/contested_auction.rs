//! Contested auction with anti-sniping extensions.
//!
//! Two bidders fight over a liquidated position in the final minutes of
//! the auction. Every bid landing within the auto-extend threshold pushes
//! the deadline out by 30 minutes, so the auction only closes once the
//! bidding actually stops.

use liquidation_engine::core::config::LiquidationConfig;
use liquidation_engine::core::event::LiquidationEvent;
use liquidation_engine::core::id::{BidderId, PositionId, UserId};
use liquidation_engine::core::trigger::TriggerKind;
use liquidation_engine::engine::liquidation::LiquidationEngine;
use liquidation_engine::engine::providers::{ConstantRiskMetrics, FlatPremiumInsurance};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  liquidation-engine: Contested Auction Demo   ║");
    println!("╚═══════════════════════════════════════════════╝\n");

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

    let breach = LiquidationEvent::new(
        PositionId::new("pos-btc-9"),
        UserId::new("user-31"),
        TriggerKind::VolatilitySpike,
        dec!(1.4),
        dec!(1.0),
        dec!(80_000),
        dec!(60_000),
        dec!(100_000),
    )
    .expect("well-formed breach");

    let event_id = engine.add_event(breach);
    let auction_id = engine
        .process_liquidation_event(event_id)
        .expect("processing succeeds");

    let auction = engine.get_auction(auction_id).expect("auction stored");
    println!("Collateral:       $100,000");
    println!("Starting price:   ${}", auction.starting_price());
    println!("Reserve price:    ${}", auction.reserve_price());
    println!("Scheduled close:  {}\n", auction.end_time());

    let start = auction.start_time();
    engine
        .start_auction_at(auction_id, start)
        .expect("auction activates");

    // Alice and Bob trade bids one minute before each deadline. Each bid
    // lands inside the 5-minute auto-extend window and buys 30 more minutes.
    println!("━━━ Bidding War ━━━\n");

    let bidders = [BidderId::new("alice"), BidderId::new("bob")];
    let mut price = auction.starting_price();

    for round in 0..5 {
        let deadline = engine.get_auction(auction_id).expect("auction stored").end_time();
        let at = deadline - chrono::Duration::minutes(1);
        price += dec!(1_000);

        let bidder = &bidders[round % 2];
        engine
            .place_bid_at(auction_id, bidder.clone(), dec!(100_000), price, at)
            .expect("bid accepted");

        let extended = engine.get_auction(auction_id).expect("auction stored").end_time();
        println!(
            "round {}: {bidder:6} bids ${price}  →  close pushed to {extended}",
            round + 1
        );
        assert_eq!(extended, deadline + chrono::Duration::minutes(30));
    }

    println!("\n━━━ Resolution ━━━\n");

    let deadline = engine.get_auction(auction_id).expect("auction stored").end_time();
    let winner = engine
        .end_auction_at(auction_id, deadline)
        .expect("auction resolves")
        .expect("reserve was met");

    println!(
        "After 5 bids and 150 minutes of extensions, {} wins at ${}",
        winner.bidder_id(),
        winner.price()
    );
    println!(
        "Event status: {}",
        engine.get_event(event_id).expect("event stored").status()
    );
}
