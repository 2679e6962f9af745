//! Greedy hill climbing.
//!
//! Keeps a single best individual. Every iteration perturbs a copy with the
//! same per-gene rule as the GA's standard mutation and keeps the copy only
//! if it is strictly better. There is no probabilistic acceptance and no
//! cooling.

mod config;
mod runner;

pub use config::HcConfig;
pub use runner::{HcResult, HcRunner};
