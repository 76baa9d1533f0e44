//! # liquidation-engine
//!
//! Collateral liquidation and descending-reserve auction clearing engine
//! for over-collateralized lending and derivatives platforms.
//!
//! When a position breaches a risk threshold (margin call, health-factor
//! breach, volatility spike, ...), the engine computes a risk-weighted
//! liquidation fee, opens a time-boxed auction for the seized collateral,
//! accepts strictly-increasing competitive bids with anti-sniping deadline
//! extension, and resolves the auction to a winner or failure, propagating
//! the outcome back to the originating liquidation record.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: triggers, events, recovery mechanisms, config
//! - **auction** — Auction state machine, bidding protocol, pricing rules
//! - **engine** — The coordinating liquidation engine, fees, statistics
//! - **simulation** — Random scenario generation for stress testing

pub mod auction;
pub mod core;
pub mod engine;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::auction::auction::{Auction, AuctionStatus, Bid};
    pub use crate::core::config::LiquidationConfig;
    pub use crate::core::event::{LiquidationEvent, LiquidationStatus};
    pub use crate::core::id::{AssetId, BidderId, PositionId, UserId};
    pub use crate::core::trigger::{LiquidationTrigger, TriggerKind};
    pub use crate::engine::liquidation::{EngineError, LiquidationEngine};
    pub use crate::engine::providers::{InsurancePolicyProvider, RiskMetricsProvider};
}
