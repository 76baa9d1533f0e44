//! Random scenario generation for stress testing the liquidation pipeline.

pub mod scenario;
