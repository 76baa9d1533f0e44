//! Auction state machine, bidding protocol, and pricing rules for
//! seized collateral.

pub mod auction;
pub mod pricing;
