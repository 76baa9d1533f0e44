use chrono::{Duration, Utc};
use liquidation_engine::auction::auction::AuctionStatus;
use liquidation_engine::core::config::LiquidationConfig;
use liquidation_engine::core::event::{LiquidationEvent, LiquidationStatus};
use liquidation_engine::core::id::{BidderId, PositionId, UserId};
use liquidation_engine::core::trigger::TriggerKind;
use liquidation_engine::engine::liquidation::{EngineError, LiquidationEngine};
use liquidation_engine::engine::providers::{ConstantRiskMetrics, FlatPremiumInsurance};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn engine() -> LiquidationEngine {
    let config = LiquidationConfig::new(
        Duration::minutes(15),
        dec!(0.05),
        Duration::hours(1),
        Duration::hours(24),
        dec!(100),
        Duration::minutes(5),
    )
    .unwrap();
    LiquidationEngine::new(
        Arc::new(ConstantRiskMetrics::new(dec!(0.3))),
        Arc::new(FlatPremiumInsurance::new(dec!(0.02))),
        config,
    )
}

fn health_factor_breach() -> LiquidationEvent {
    LiquidationEvent::new(
        PositionId::new("pos-eth-42"),
        UserId::new("user-7"),
        TriggerKind::HealthFactor,
        dec!(0.95),
        dec!(1.0),
        dec!(10_000),
        dec!(8_000),
        dec!(12_000),
    )
    .unwrap()
}

/// The worked scenario: $10,000 position breaches its health factor with
/// $12,000 collateral under a 5% default fee. The fee must come out at $600
/// (1.2 multiplier, under the $1,000 cap) and the auction at
/// $9,600 / $6,000 / $7,200; bids of $7,000 and $7,500 must resolve to the
/// $7,500 bid and complete the event.
#[test]
fn full_pipeline_health_factor_scenario() {
    let engine = engine();
    let now = Utc::now();

    let event_id = engine.add_event(health_factor_breach());
    let auction_id = engine.process_liquidation_event_at(event_id, now).unwrap();

    let event = engine.get_event(event_id).unwrap();
    assert_eq!(event.liquidation_fee(), dec!(600));
    assert!(event.liquidation_fee() <= dec!(0.10) * event.position_value());

    let auction = engine.get_auction(auction_id).unwrap();
    assert_eq!(auction.starting_price(), dec!(9_600));
    assert_eq!(auction.minimum_price(), dec!(6_000));
    assert_eq!(auction.reserve_price(), dec!(7_200));
    assert_eq!(auction.current_price(), auction.starting_price());

    let start = auction.start_time();
    engine.start_auction_at(auction_id, start).unwrap();

    engine
        .place_bid_at(auction_id, BidderId::new("alice"), dec!(12_000), dec!(7_000), start)
        .unwrap();
    engine
        .place_bid_at(
            auction_id,
            BidderId::new("bob"),
            dec!(12_000),
            dec!(7_500),
            start + Duration::minutes(2),
        )
        .unwrap();

    let deadline = engine.get_auction(auction_id).unwrap().end_time();
    let winner = engine.end_auction_at(auction_id, deadline).unwrap().unwrap();

    // Only the $7,500 bid meets the $7,200 reserve.
    assert_eq!(winner.bidder_id().as_str(), "bob");
    assert_eq!(winner.price(), dec!(7_500));
    assert_eq!(
        engine.get_auction(auction_id).unwrap().status(),
        AuctionStatus::Sold
    );

    let event = engine.get_event(event_id).unwrap();
    assert_eq!(event.status(), LiquidationStatus::Completed);
    assert!(event.completed_at().is_some());
}

/// An auction whose best bid misses the reserve fails, and the failure
/// propagates to the parent event.
#[test]
fn reserve_shortfall_fails_auction_and_event() {
    let engine = engine();
    let now = Utc::now();

    let event_id = engine.add_event(health_factor_breach());
    let auction_id = engine.process_liquidation_event_at(event_id, now).unwrap();
    let start = engine.get_auction(auction_id).unwrap().start_time();
    engine.start_auction_at(auction_id, start).unwrap();

    engine
        .place_bid_at(auction_id, BidderId::new("alice"), dec!(12_000), dec!(7_000), start)
        .unwrap();

    let deadline = engine.get_auction(auction_id).unwrap().end_time();
    assert!(engine.end_auction_at(auction_id, deadline).unwrap().is_none());

    assert_eq!(
        engine.get_auction(auction_id).unwrap().status(),
        AuctionStatus::Failed
    );
    assert_eq!(
        engine.get_event(event_id).unwrap().status(),
        LiquidationStatus::Failed
    );
}

/// A bid within the auto-extend window pushes the deadline out by exactly
/// 30 minutes; ending at the original deadline is then rejected.
#[test]
fn late_bid_extends_deadline() {
    let engine = engine();
    let now = Utc::now();

    let event_id = engine.add_event(health_factor_breach());
    let auction_id = engine.process_liquidation_event_at(event_id, now).unwrap();
    let start = engine.get_auction(auction_id).unwrap().start_time();
    engine.start_auction_at(auction_id, start).unwrap();

    let original_deadline = engine.get_auction(auction_id).unwrap().end_time();
    engine
        .place_bid_at(
            auction_id,
            BidderId::new("sniper"),
            dec!(12_000),
            dec!(9_700),
            original_deadline - Duration::minutes(3),
        )
        .unwrap();

    let extended = engine.get_auction(auction_id).unwrap().end_time();
    assert_eq!(extended, original_deadline + Duration::minutes(30));

    let result = engine.end_auction_at(auction_id, original_deadline);
    assert!(matches!(result, Err(EngineError::Auction(_))));

    let winner = engine.end_auction_at(auction_id, extended).unwrap();
    assert_eq!(winner.unwrap().price(), dec!(9_700));
}

/// Bid rejection paths: wrong status, sub-floor price, non-increasing
/// price, expired deadline. None of the rejections may mutate the auction.
#[test]
fn bid_rejection_ladder() {
    let engine = engine();
    let now = Utc::now();

    let event_id = engine.add_event(health_factor_breach());
    let auction_id = engine.process_liquidation_event_at(event_id, now).unwrap();

    // Pending auction: not active.
    let result = engine.place_bid_at(
        auction_id,
        BidderId::new("alice"),
        dec!(12_000),
        dec!(9_700),
        now,
    );
    assert!(matches!(result, Err(EngineError::Auction(_))));

    let start = engine.get_auction(auction_id).unwrap().start_time();
    engine.start_auction_at(auction_id, start).unwrap();

    // Below the $6,000 floor: rejected.
    let result = engine.place_bid_at(
        auction_id,
        BidderId::new("alice"),
        dec!(12_000),
        dec!(5_000),
        start,
    );
    assert!(result.is_err());

    engine
        .place_bid_at(auction_id, BidderId::new("alice"), dec!(12_000), dec!(7_000), start)
        .unwrap();

    // Not above the best accepted bid: rejected.
    let result = engine.place_bid_at(
        auction_id,
        BidderId::new("bob"),
        dec!(12_000),
        dec!(7_000),
        start + Duration::minutes(1),
    );
    assert!(result.is_err());

    let auction = engine.get_auction(auction_id).unwrap();
    assert_eq!(auction.bids().len(), 1);
    assert_eq!(auction.current_price(), dec!(7_000));

    // Past the deadline: rejected.
    let result = engine.place_bid_at(
        auction_id,
        BidderId::new("bob"),
        dec!(12_000),
        dec!(8_000),
        auction.end_time() + Duration::seconds(1),
    );
    assert!(result.is_err());
    assert_eq!(engine.get_auction(auction_id).unwrap().bids().len(), 1);
}

/// Unknown IDs surface as NotFound across registries.
#[test]
fn unknown_ids_are_not_found() {
    let engine = engine();
    let missing = uuid::Uuid::new_v4();

    assert!(matches!(
        engine.get_event(missing),
        Err(EngineError::NotFound { entity: "event", .. })
    ));
    assert!(matches!(
        engine.get_auction(missing),
        Err(EngineError::NotFound { entity: "auction", .. })
    ));
    assert!(matches!(
        engine.place_bid(missing, BidderId::new("alice"), dec!(1), dec!(1)),
        Err(EngineError::NotFound { entity: "auction", .. })
    ));
    assert!(matches!(
        engine.end_auction(missing),
        Err(EngineError::NotFound { entity: "auction", .. })
    ));
}

/// Statistics reflect a mixed population of events and auctions.
#[test]
fn statistics_over_mixed_outcomes() {
    let engine = engine();
    let now = Utc::now();

    // Sold path.
    let sold_event = engine.add_event(health_factor_breach());
    let sold_auction = engine.process_liquidation_event_at(sold_event, now).unwrap();
    let start = engine.get_auction(sold_auction).unwrap().start_time();
    engine.start_auction_at(sold_auction, start).unwrap();
    engine
        .place_bid_at(sold_auction, BidderId::new("alice"), dec!(12_000), dec!(8_000), start)
        .unwrap();
    let deadline = engine.get_auction(sold_auction).unwrap().end_time();
    engine.end_auction_at(sold_auction, deadline).unwrap();

    // Unprocessed event.
    engine.add_event(health_factor_breach());

    let stats = engine.statistics();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.events_with_status(LiquidationStatus::Completed), 1);
    assert_eq!(stats.events_with_status(LiquidationStatus::Triggered), 1);
    assert_eq!(stats.total_auctions, 1);
    assert_eq!(stats.auctions_with_status(AuctionStatus::Sold), 1);
    // Only the processed event has accrued a fee.
    assert_eq!(stats.total_liquidation_fees, dec!(600));
}

/// Events and statistics serialize to JSON with stable field names.
#[test]
fn event_and_statistics_serialize() {
    let event = health_factor_breach();
    let json = serde_json::to_string(&event).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["position_id"], "pos-eth-42");
    assert_eq!(parsed["user_id"], "user-7");
    assert_eq!(parsed["trigger_kind"], "health-factor");
    assert_eq!(parsed["status"], "triggered");
    assert_eq!(parsed["position_value"], "10000");

    let engine = engine();
    engine.add_event(event);
    let stats_json = serde_json::to_string(&engine.statistics()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stats_json).unwrap();
    assert_eq!(parsed["total_events"], 1);
    assert_eq!(parsed["events_by_status"]["triggered"], 1);
}
