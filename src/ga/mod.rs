//! Steady-state genetic algorithm over real-valued chromosomes.
//!
//! Each generation selects two parents, recombines them into one or two
//! children, mutates and evaluates the children, and inserts them through
//! a replacement strategy. The population size never changes. The run
//! stops once the fitness evaluation budget is spent; the generation in
//! flight always completes, so the final count may overshoot the budget.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters and strategy choice
//! - [`GaEngine`]: State of one run, advanced one generation at a time
//! - [`GaRunner`]: Drives an engine until the budget is spent
//! - [`GaResult`]: Final population and statistics
//!
//! # Strategies
//!
//! - [`Initialisation`]: Random, Augmented, PositiveNegative
//! - [`Selection`]: Random, Tournament, Roulette, RankRoute
//! - [`Crossover`]: Arithmetic, OnePoint, TwoPoint, Uniform
//! - [`Mutation`]: Standard, Constrained, Annealing
//! - [`Replacement`]: Worst, Tournament
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1991), "A Study of Reproduction in Generational and
//!   Steady-State Genetic Algorithms"

mod config;
mod crossover;
mod initialisation;
mod mutation;
mod population;
mod replacement;
mod runner;
mod selection;

pub(crate) use config::canonical_name;
pub use config::GaConfig;
pub use crossover::Crossover;
pub use initialisation::{positive_negative, Initialisation};
pub use mutation::{perturb_genes, Mutation};
pub use population::Population;
pub use replacement::Replacement;
pub use runner::{GaEngine, GaResult, GaRunner, GenerationStats, Phase};
pub use selection::Selection;
