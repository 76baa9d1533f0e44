use crate::auction::auction::AuctionStatus;
use crate::core::event::LiquidationStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time aggregate view of the engine's state.
///
/// Built in a single pass over snapshotted per-entity scalars; nothing here
/// is incrementally maintained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidationStatistics {
    pub total_events: usize,
    pub events_by_status: HashMap<LiquidationStatus, usize>,
    pub total_auctions: usize,
    pub auctions_by_status: HashMap<AuctionStatus, usize>,
    /// Running sum of every event's liquidation fee.
    pub total_liquidation_fees: Decimal,
}

impl LiquidationStatistics {
    pub(crate) fn from_snapshots(
        events: &[(LiquidationStatus, Decimal)],
        auctions: &[AuctionStatus],
    ) -> Self {
        let mut events_by_status: HashMap<LiquidationStatus, usize> = HashMap::new();
        let mut total_liquidation_fees = Decimal::ZERO;
        for (status, fee) in events {
            *events_by_status.entry(*status).or_insert(0) += 1;
            total_liquidation_fees += fee;
        }

        let mut auctions_by_status: HashMap<AuctionStatus, usize> = HashMap::new();
        for status in auctions {
            *auctions_by_status.entry(*status).or_insert(0) += 1;
        }

        Self {
            total_events: events.len(),
            events_by_status,
            total_auctions: auctions.len(),
            auctions_by_status,
            total_liquidation_fees,
        }
    }

    pub fn events_with_status(&self, status: LiquidationStatus) -> usize {
        self.events_by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn auctions_with_status(&self, status: AuctionStatus) -> usize {
        self.auctions_by_status.get(&status).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for LiquidationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Liquidation Statistics ===")?;
        writeln!(f, "Total Events:   {}", self.total_events)?;
        writeln!(f, "Total Auctions: {}", self.total_auctions)?;
        writeln!(f, "Total Fees:     {}", self.total_liquidation_fees)?;

        writeln!(f, "\nEvents by Status:")?;
        for status in [
            LiquidationStatus::Triggered,
            LiquidationStatus::Processing,
            LiquidationStatus::Auctioning,
            LiquidationStatus::Completed,
            LiquidationStatus::Failed,
            LiquidationStatus::Cancelled,
        ] {
            let count = self.events_with_status(status);
            if count > 0 {
                writeln!(f, "  {status}: {count}")?;
            }
        }

        writeln!(f, "\nAuctions by Status:")?;
        for status in [
            AuctionStatus::Pending,
            AuctionStatus::Active,
            AuctionStatus::Ended,
            AuctionStatus::Sold,
            AuctionStatus::Failed,
            AuctionStatus::Cancelled,
        ] {
            let count = self.auctions_with_status(status);
            if count > 0 {
                writeln!(f, "  {status}: {count}")?;
            }
        }
        Ok(())
    }
}
