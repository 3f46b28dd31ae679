//! RFP proposal scoring and recommendation engine.
//!
//! Buyers open requests for proposal, distribute them to registered vendors and collect
//! structured proposals. Each proposal is scored against the buyer's baseline on arrival and
//! the whole set is ranked relative to its best offers when a recommendation is requested.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
