//! The coordinating liquidation engine: registries, fee calculation,
//! collaborator contracts, and aggregate statistics.

pub mod fee;
pub mod liquidation;
pub mod providers;
pub mod statistics;
