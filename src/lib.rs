//! Metaheuristic weight optimization for fixed-length real vectors.
//!
//! The vector is treated as the weights of a neural network, but the crate
//! only sees it through a black-box [`FitnessFunction`] whose calls are
//! counted against an evaluation budget. Lower fitness is better.
//!
//! - **Genetic Algorithm ([`ga`])**: Steady-state evolutionary loop with
//!   pluggable initialisation, selection, crossover, mutation, and
//!   replacement strategies.
//! - **Simulated Annealing ([`sa`])**: Swap-move trajectory search with a
//!   geometric cooling schedule.
//! - **Hill Climbing ([`hill`])**: Greedy trajectory search.
//! - **Alias sampler ([`alias`])**: O(1) draws from a discrete
//!   distribution, used by rank-based selection.
//!
//! [`trainer`] selects one optimizer and packages its result for a
//! [`persist::WeightStore`]; [`sweep`] repeats training over labelled
//! configurations and averages train/test scores into CSV rows.
//!
//! # Reproducibility
//!
//! Every run owns one seeded random stream inside a [`Context`]. All
//! strategies draw from it in a fixed order, so equal seeds give equal
//! runs.
//!
//! # Logging
//!
//! Progress is emitted through `tracing`; install a subscriber to see it.

pub mod alias;
pub mod context;
pub mod error;
pub mod ga;
pub mod hill;
pub mod persist;
pub mod random;
pub mod sa;
pub mod sweep;
pub mod trainer;
pub mod types;

pub use alias::AliasTable;
pub use context::Context;
pub use error::{Error, Result};
pub use persist::{MemoryStore, TrainedWeights, WeightStore};
pub use trainer::{Algorithm, Trainer};
pub use types::{FitnessFunction, GeneSpace, Individual, NullObserver, Observer};
