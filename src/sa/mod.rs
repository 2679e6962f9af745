//! Simulated Annealing (SA).
//!
//! A single-trajectory optimizer over the chromosome. Neighbours are
//! produced by swapping two genes; worsening moves are accepted with a
//! probability that shrinks as the temperature cools geometrically.
//!
//! The acceptance criterion and cooling schedule in [`schedule`] are also
//! used by the GA's annealing mutation.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;
pub mod schedule;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
pub use schedule::{acceptance, Temperature};
