use crate::core::id::{AssetId, BidderId};
use crate::core::{require_non_empty, require_positive, ValidationError};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle status of a collateral auction.
///
/// `Pending → Active → {Sold | Failed}`; `Cancelled` is reachable from
/// `Pending` and `Active`. `Ended` marks an auction past its deadline but
/// not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuctionStatus {
    Pending,
    Active,
    Ended,
    Sold,
    Failed,
    Cancelled,
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuctionStatus::Pending => "pending",
            AuctionStatus::Active => "active",
            AuctionStatus::Ended => "ended",
            AuctionStatus::Sold => "sold",
            AuctionStatus::Failed => "failed",
            AuctionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Errors arising from auction state transitions and bid placement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuctionError {
    #[error("auction is not active")]
    NotActive,
    #[error("auction has ended")]
    Ended,
    #[error("bid price must be higher than current price")]
    BidNotAboveCurrent { price: Decimal, current: Decimal },
    #[error("bid price is below minimum price")]
    BidBelowMinimum { price: Decimal, minimum: Decimal },
    #[error("auction has not ended yet")]
    NotEndedYet { ends_at: DateTime<Utc> },
    #[error("auction is not pending")]
    NotPending,
    #[error("auction has not reached its start time")]
    NotStarted { starts_at: DateTime<Utc> },
    #[error("auction cannot be cancelled once resolved")]
    NotCancellable,
    #[error(transparent)]
    InvalidBid(#[from] ValidationError),
}

/// A single bid in a collateral auction. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    id: Uuid,
    auction_id: Uuid,
    bidder_id: BidderId,
    /// Quantity of the auctioned asset the bidder wants.
    amount: Decimal,
    /// Offered price. Strictly above the auction's current price when accepted.
    price: Decimal,
    timestamp: DateTime<Utc>,
    valid: bool,
}

impl Bid {
    pub fn new(
        auction_id: Uuid,
        bidder_id: BidderId,
        amount: Decimal,
        price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        require_non_empty("bidder ID", bidder_id.as_str())?;
        require_positive("bid amount", amount)?;
        require_positive("bid price", price)?;

        Ok(Self {
            id: Uuid::new_v4(),
            auction_id,
            bidder_id,
            amount,
            price,
            timestamp: now,
            valid: true,
        })
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn auction_id(&self) -> Uuid {
        self.auction_id
    }

    pub fn bidder_id(&self) -> &BidderId {
        &self.bidder_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this bid counts toward winner selection.
    ///
    /// Every bid is created valid and there is no setter yet; the flag is
    /// reserved for moderation flows that void a bid after acceptance.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// A time-boxed descending-reserve auction for seized collateral.
///
/// Exactly one auction exists per liquidation event; `liquidation_id` is the
/// back-reference to the parent event, never an embedding. Bidding opens one
/// minute after creation and runs until `end_time`, which late bids may push
/// out (see [`Auction::place_bid`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    id: Uuid,
    liquidation_id: Uuid,
    asset_id: AssetId,
    asset_amount: Decimal,
    starting_price: Decimal,
    minimum_price: Decimal,
    /// Starting price until the first bid lands, then the highest accepted
    /// bid price; strictly increasing across accepted bids.
    current_price: Decimal,
    reserve_price: Decimal,
    status: AuctionStatus,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    bids: Vec<Bid>,
    winner: Option<Bid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Auction {
    /// Create a new auction opening one minute from `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        liquidation_id: Uuid,
        asset_id: AssetId,
        asset_amount: Decimal,
        starting_price: Decimal,
        minimum_price: Decimal,
        reserve_price: Decimal,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        require_non_empty("asset ID", asset_id.as_str())?;
        require_positive("asset amount", asset_amount)?;
        require_positive("starting price", starting_price)?;
        require_positive("minimum price", minimum_price)?;
        require_positive("reserve price", reserve_price)?;
        if duration <= Duration::zero() {
            return Err(ValidationError::NonPositiveDuration { field: "duration" });
        }

        let start_time = now + Duration::minutes(1);
        Ok(Self {
            id: Uuid::new_v4(),
            liquidation_id,
            asset_id,
            asset_amount,
            starting_price,
            minimum_price,
            current_price: starting_price,
            reserve_price,
            status: AuctionStatus::Pending,
            start_time,
            end_time: start_time + duration,
            bids: Vec::new(),
            winner: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Open the auction for bidding.
    ///
    /// Only a `Pending` auction at or past its start time can activate.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<(), AuctionError> {
        if self.status != AuctionStatus::Pending {
            return Err(AuctionError::NotPending);
        }
        if now < self.start_time {
            return Err(AuctionError::NotStarted {
                starts_at: self.start_time,
            });
        }
        self.status = AuctionStatus::Active;
        self.updated_at = now;
        Ok(())
    }

    /// Accept or reject a bid.
    ///
    /// Preconditions are checked in order, each a distinct failure: the
    /// auction must be active, the deadline not passed, the price strictly
    /// above the best accepted bid so far, and the price at or above the
    /// floor. Until a first bid lands, the current price is the seller's
    /// ask and does not gate bids; only the floor does. A rejected bid
    /// leaves the auction untouched.
    ///
    /// Anti-sniping: a bid accepted within `auto_extend_threshold` of the
    /// deadline pushes `end_time` out by 30 minutes. There is no cap on the
    /// number of extensions a contested auction can accumulate.
    pub fn place_bid(
        &mut self,
        bidder_id: BidderId,
        amount: Decimal,
        price: Decimal,
        auto_extend_threshold: Duration,
        now: DateTime<Utc>,
    ) -> Result<&Bid, AuctionError> {
        if self.status != AuctionStatus::Active {
            return Err(AuctionError::NotActive);
        }
        if now > self.end_time {
            return Err(AuctionError::Ended);
        }
        if !self.bids.is_empty() && price <= self.current_price {
            return Err(AuctionError::BidNotAboveCurrent {
                price,
                current: self.current_price,
            });
        }
        if price < self.minimum_price {
            return Err(AuctionError::BidBelowMinimum {
                price,
                minimum: self.minimum_price,
            });
        }

        let bid = Bid::new(self.id, bidder_id, amount, price, now)?;
        self.bids.push(bid);
        self.current_price = price;

        if self.end_time - now <= auto_extend_threshold {
            self.end_time += Duration::minutes(30);
        }
        self.updated_at = now;

        Ok(self.bids.last().expect("bid just appended"))
    }

    /// Resolve an expired auction to `Sold` or `Failed`.
    ///
    /// The winner is the highest-priced valid bid meeting the reserve;
    /// equal prices resolve to the earliest submitted bid. Returns the
    /// winning bid, if any.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<Option<Bid>, AuctionError> {
        if self.status != AuctionStatus::Active {
            return Err(AuctionError::NotActive);
        }
        if now < self.end_time {
            return Err(AuctionError::NotEndedYet {
                ends_at: self.end_time,
            });
        }

        self.bids
            .sort_by(|a, b| b.price.cmp(&a.price).then(a.timestamp.cmp(&b.timestamp)));

        let winner = self
            .bids
            .iter()
            .find(|bid| bid.valid && bid.price >= self.reserve_price)
            .cloned();

        match &winner {
            Some(bid) => {
                self.status = AuctionStatus::Sold;
                self.winner = Some(bid.clone());
            }
            None => {
                self.status = AuctionStatus::Failed;
            }
        }
        self.updated_at = now;

        Ok(winner)
    }

    /// Cancel an unresolved auction.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), AuctionError> {
        match self.status {
            AuctionStatus::Pending | AuctionStatus::Active => {
                self.status = AuctionStatus::Cancelled;
                self.updated_at = now;
                Ok(())
            }
            _ => Err(AuctionError::NotCancellable),
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn liquidation_id(&self) -> Uuid {
        self.liquidation_id
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn asset_amount(&self) -> Decimal {
        self.asset_amount
    }

    pub fn starting_price(&self) -> Decimal {
        self.starting_price
    }

    pub fn minimum_price(&self) -> Decimal {
        self.minimum_price
    }

    pub fn current_price(&self) -> Decimal {
        self.current_price
    }

    pub fn reserve_price(&self) -> Decimal {
        self.reserve_price
    }

    pub fn status(&self) -> AuctionStatus {
        self.status
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn winner(&self) -> Option<&Bid> {
        self.winner.as_ref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
