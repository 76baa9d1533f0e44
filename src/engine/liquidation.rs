use crate::auction::auction::{Auction, AuctionError, AuctionStatus, Bid};
use crate::auction::pricing::{auction_duration, AuctionPricing};
use crate::core::config::LiquidationConfig;
use crate::core::event::{LiquidationEvent, LiquidationStatus};
use crate::core::id::{AssetId, BidderId, MechanismId, TriggerId, UserId};
use crate::core::recovery::RecoveryMechanism;
use crate::core::trigger::LiquidationTrigger;
use crate::core::ValidationError;
use crate::engine::fee::liquidation_fee;
use crate::engine::providers::{InsurancePolicyProvider, RiskMetricsProvider};
use crate::engine::statistics::LiquidationStatistics;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Asset identifier recorded on auctions for seized collateral.
///
/// Liquidation events do not carry a per-asset identifier, so every auction
/// currently sells under this generic label.
const COLLATERAL_ASSET: &str = "collateral";

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("event {id} is not in triggered status")]
    EventNotTriggered { id: Uuid },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auction(#[from] AuctionError),
}

/// The coordinating liquidation engine.
///
/// Owns every ID-keyed registry (triggers, events, auctions, recovery
/// mechanisms) and orchestrates breach → fee calculation → auction creation
/// → bidding → resolution → status propagation.
///
/// # Concurrency
///
/// Registries are concurrent maps; an entry guard serializes all
/// read-modify-write work on one auction (bid acceptance and current-price
/// update are atomic per auction) while operations on other auctions proceed
/// in parallel. No operation holds guards on two registries at once.
///
/// # Clocks
///
/// The engine runs no internal timer: callers invoke [`end_auction`]
/// (typically on a periodic sweep) once an auction's deadline has passed.
/// Every time-sensitive operation has a `*_at` variant taking an explicit
/// timestamp so tests and simulations never sleep.
///
/// [`end_auction`]: LiquidationEngine::end_auction
pub struct LiquidationEngine {
    triggers: DashMap<TriggerId, LiquidationTrigger>,
    events: DashMap<Uuid, LiquidationEvent>,
    auctions: DashMap<Uuid, Auction>,
    recovery_mechanisms: DashMap<MechanismId, RecoveryMechanism>,
    risk_metrics: Arc<dyn RiskMetricsProvider>,
    insurance: Arc<dyn InsurancePolicyProvider>,
    config: LiquidationConfig,
}

impl LiquidationEngine {
    /// Create an engine with its external collaborators and configuration.
    pub fn new(
        risk_metrics: Arc<dyn RiskMetricsProvider>,
        insurance: Arc<dyn InsurancePolicyProvider>,
        config: LiquidationConfig,
    ) -> Self {
        Self {
            triggers: DashMap::new(),
            events: DashMap::new(),
            auctions: DashMap::new(),
            recovery_mechanisms: DashMap::new(),
            risk_metrics,
            insurance,
            config,
        }
    }

    pub fn config(&self) -> &LiquidationConfig {
        &self.config
    }

    /// The external statistical risk engine, for orchestrating callers.
    pub fn risk_metrics(&self) -> &Arc<dyn RiskMetricsProvider> {
        &self.risk_metrics
    }

    /// The external insurance pool manager, for orchestrating callers.
    pub fn insurance(&self) -> &Arc<dyn InsurancePolicyProvider> {
        &self.insurance
    }

    // --- Trigger registry ---

    /// Register a trigger definition. Re-registering an ID replaces it.
    pub fn add_trigger(&self, trigger: LiquidationTrigger) {
        self.triggers.insert(trigger.id().clone(), trigger);
    }

    pub fn get_trigger(&self, id: &TriggerId) -> Result<LiquidationTrigger, EngineError> {
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "trigger ID" }.into());
        }
        self.triggers
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::NotFound {
                entity: "trigger",
                id: id.to_string(),
            })
    }

    /// Flip a registered trigger's active flag.
    pub fn set_trigger_active(&self, id: &TriggerId, active: bool) -> Result<(), EngineError> {
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "trigger ID" }.into());
        }
        let mut trigger = self.triggers.get_mut(id).ok_or_else(|| EngineError::NotFound {
            entity: "trigger",
            id: id.to_string(),
        })?;
        trigger.set_active(active, Utc::now());
        Ok(())
    }

    // --- Event registry ---

    /// Record a new liquidation event, returning its ID.
    pub fn add_event(&self, event: LiquidationEvent) -> Uuid {
        let id = event.id();
        self.events.insert(id, event);
        id
    }

    pub fn get_event(&self, id: Uuid) -> Result<LiquidationEvent, EngineError> {
        self.events
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::NotFound {
                entity: "event",
                id: id.to_string(),
            })
    }

    // --- Auction registry ---

    pub fn get_auction(&self, id: Uuid) -> Result<Auction, EngineError> {
        self.auctions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::NotFound {
                entity: "auction",
                id: id.to_string(),
            })
    }

    // --- Recovery mechanism registry ---

    /// Register a recovery mechanism. Re-registering an ID replaces it.
    pub fn add_recovery_mechanism(&self, mechanism: RecoveryMechanism) {
        self.recovery_mechanisms
            .insert(mechanism.id().clone(), mechanism);
    }

    pub fn get_recovery_mechanism(
        &self,
        id: &MechanismId,
    ) -> Result<RecoveryMechanism, EngineError> {
        if id.is_empty() {
            return Err(ValidationError::Empty {
                field: "mechanism ID",
            }
            .into());
        }
        self.recovery_mechanisms
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::NotFound {
                entity: "mechanism",
                id: id.to_string(),
            })
    }

    // --- Pipeline ---

    /// Process a triggered event: compute its fee and open an auction.
    pub fn process_liquidation_event(&self, event_id: Uuid) -> Result<Uuid, EngineError> {
        self.process_liquidation_event_at(event_id, Utc::now())
    }

    /// Clock-injected variant of [`process_liquidation_event`].
    ///
    /// Moves the event Triggered → Processing, stores the risk-weighted fee,
    /// derives auction pricing and duration from the collateral value, and
    /// stores the auction. On any downstream failure the event is marked
    /// Failed before the error is returned, so no event is left stuck in
    /// Processing.
    ///
    /// [`process_liquidation_event`]: LiquidationEngine::process_liquidation_event
    pub fn process_liquidation_event_at(
        &self,
        event_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Uuid, EngineError> {
        let (fee, collateral_value) = {
            let mut event =
                self.events
                    .get_mut(&event_id)
                    .ok_or_else(|| EngineError::NotFound {
                        entity: "event",
                        id: event_id.to_string(),
                    })?;
            if event.status() != LiquidationStatus::Triggered {
                return Err(EngineError::EventNotTriggered { id: event_id });
            }
            event.mark_processing(now);
            let fee = liquidation_fee(
                event.position_value(),
                event.trigger_kind(),
                self.config.default_liquidation_fee(),
            );
            event.set_liquidation_fee(fee, now);
            (fee, event.collateral_value())
        };
        // Event guard dropped: the auction registry is touched lock-free of it.

        let pricing = AuctionPricing::from_collateral(collateral_value);
        let duration = auction_duration(collateral_value, &self.config);
        let auction = Auction::new(
            event_id,
            AssetId::new(COLLATERAL_ASSET),
            collateral_value,
            pricing.starting_price,
            pricing.minimum_price,
            pricing.reserve_price,
            duration,
            now,
        );

        match auction {
            Ok(auction) => {
                let auction_id = auction.id();
                self.auctions.insert(auction_id, auction);
                if let Some(mut event) = self.events.get_mut(&event_id) {
                    event.mark_auctioning(now);
                }
                info!("event {event_id} processed: fee {fee}, auction {auction_id} opened");
                Ok(auction_id)
            }
            Err(err) => {
                // Self-healing: the event must not stay in Processing.
                if let Some(mut event) = self.events.get_mut(&event_id) {
                    event.mark_failed(now);
                }
                warn!("event {event_id} failed: could not create auction: {err}");
                Err(err.into())
            }
        }
    }

    /// Open a pending auction for bidding.
    pub fn start_auction(&self, auction_id: Uuid) -> Result<(), EngineError> {
        self.start_auction_at(auction_id, Utc::now())
    }

    pub fn start_auction_at(&self, auction_id: Uuid, now: DateTime<Utc>) -> Result<(), EngineError> {
        let mut auction =
            self.auctions
                .get_mut(&auction_id)
                .ok_or_else(|| EngineError::NotFound {
                    entity: "auction",
                    id: auction_id.to_string(),
                })?;
        auction.activate(now)?;
        debug!("auction {auction_id} active until {}", auction.end_time());
        Ok(())
    }

    /// Place a bid, returning the accepted bid's ID.
    pub fn place_bid(
        &self,
        auction_id: Uuid,
        bidder_id: BidderId,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Uuid, EngineError> {
        self.place_bid_at(auction_id, bidder_id, amount, price, Utc::now())
    }

    /// Clock-injected variant of [`place_bid`].
    ///
    /// [`place_bid`]: LiquidationEngine::place_bid
    pub fn place_bid_at(
        &self,
        auction_id: Uuid,
        bidder_id: BidderId,
        amount: Decimal,
        price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Uuid, EngineError> {
        let mut auction =
            self.auctions
                .get_mut(&auction_id)
                .ok_or_else(|| EngineError::NotFound {
                    entity: "auction",
                    id: auction_id.to_string(),
                })?;
        let end_before = auction.end_time();
        let bid_id = auction
            .place_bid(
                bidder_id,
                amount,
                price,
                self.config.auto_extend_threshold(),
                now,
            )?
            .id();
        debug!("auction {auction_id}: bid {bid_id} accepted at {price}");
        if auction.end_time() > end_before {
            debug!(
                "auction {auction_id} auto-extended to {}",
                auction.end_time()
            );
        }
        Ok(bid_id)
    }

    /// Resolve an expired auction and propagate the outcome to its event.
    pub fn end_auction(&self, auction_id: Uuid) -> Result<Option<Bid>, EngineError> {
        self.end_auction_at(auction_id, Utc::now())
    }

    /// Clock-injected variant of [`end_auction`]. Returns the winning bid,
    /// if any. A Sold auction completes the parent event; a Failed auction
    /// fails it. No other outcome touches event status.
    ///
    /// [`end_auction`]: LiquidationEngine::end_auction
    pub fn end_auction_at(
        &self,
        auction_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Bid>, EngineError> {
        let (liquidation_id, status, winner) = {
            let mut auction =
                self.auctions
                    .get_mut(&auction_id)
                    .ok_or_else(|| EngineError::NotFound {
                        entity: "auction",
                        id: auction_id.to_string(),
                    })?;
            let winner = auction.finish(now)?;
            (auction.liquidation_id(), auction.status(), winner)
        };
        // Auction guard dropped before the event registry is touched.

        match status {
            AuctionStatus::Sold => {
                if let Some(mut event) = self.events.get_mut(&liquidation_id) {
                    event.mark_completed(now);
                }
                info!("auction {auction_id} sold; event {liquidation_id} completed");
            }
            AuctionStatus::Failed => {
                if let Some(mut event) = self.events.get_mut(&liquidation_id) {
                    event.mark_failed(now);
                }
                info!("auction {auction_id} failed; event {liquidation_id} failed");
            }
            _ => {}
        }

        Ok(winner)
    }

    /// Cancel an unresolved auction. Does not touch the parent event.
    pub fn cancel_auction(&self, auction_id: Uuid) -> Result<(), EngineError> {
        self.cancel_auction_at(auction_id, Utc::now())
    }

    pub fn cancel_auction_at(
        &self,
        auction_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let mut auction =
            self.auctions
                .get_mut(&auction_id)
                .ok_or_else(|| EngineError::NotFound {
                    entity: "auction",
                    id: auction_id.to_string(),
                })?;
        auction.cancel(now)?;
        info!("auction {auction_id} cancelled");
        Ok(())
    }

    // --- Queries ---

    /// All liquidation events belonging to a user. Linear scan.
    pub fn user_liquidation_events(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<LiquidationEvent>, EngineError> {
        if user_id.is_empty() {
            return Err(ValidationError::Empty { field: "user ID" }.into());
        }
        Ok(self
            .events
            .iter()
            .filter(|entry| entry.user_id() == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    /// All auctions currently open for bidding. Linear scan.
    pub fn active_auctions(&self) -> Vec<Auction> {
        self.auctions
            .iter()
            .filter(|entry| entry.status() == AuctionStatus::Active)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Aggregate statistics over current state.
    ///
    /// Snapshots per-entity scalars first, then aggregates, so no registry
    /// guard is held for the duration of the scan.
    pub fn statistics(&self) -> LiquidationStatistics {
        let events: Vec<(LiquidationStatus, Decimal)> = self
            .events
            .iter()
            .map(|entry| (entry.status(), entry.liquidation_fee()))
            .collect();
        let auctions: Vec<AuctionStatus> =
            self.auctions.iter().map(|entry| entry.status()).collect();
        LiquidationStatistics::from_snapshots(&events, &auctions)
    }
}
