//! Algorithm selection and the training facade.
//!
//! A [`Trainer`] carries one configuration per optimizer and runs the one
//! named by its [`Algorithm`]. The result is packaged as
//! [`TrainedWeights`] and can be handed to a [`WeightStore`] once the run
//! has finished.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::error::{Error, Result};
use crate::ga::{canonical_name, GaConfig, GaRunner};
use crate::hill::{HcConfig, HcRunner};
use crate::persist::{TrainedWeights, WeightStore};
use crate::sa::{SaConfig, SaRunner};
use crate::types::{FitnessFunction, GeneSpace, NullObserver, Observer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optimizer used to train the weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Steady-state genetic algorithm.
    #[default]
    Evolutionary,
    /// Swap-move simulated annealing.
    SimulatedAnnealing,
    /// Greedy hill climbing.
    HillClimb,
}

impl Algorithm {
    /// All variants, in declaration order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Evolutionary,
        Algorithm::SimulatedAnnealing,
        Algorithm::HillClimb,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Evolutionary => "Evolutionary",
            Algorithm::SimulatedAnnealing => "SimulatedAnnealing",
            Algorithm::HillClimb => "HillClimb",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_name(s).as_str() {
            "evolutionary" | "ga" | "genetic" => Ok(Algorithm::Evolutionary),
            "simulatedannealing" | "sa" => Ok(Algorithm::SimulatedAnnealing),
            "hillclimb" | "hillclimbing" | "hc" => Ok(Algorithm::HillClimb),
            _ => Err(Error::UnknownStrategy {
                kind: "algorithm",
                value: s.to_string(),
            }),
        }
    }
}

/// Runs the selected optimizer and packages the best weights.
///
/// # Examples
///
/// ```
/// use u_neuroevo::trainer::{Algorithm, Trainer};
/// use u_neuroevo::persist::{MemoryStore, WeightStore};
///
/// let cost = |g: &[f64]| g.iter().map(|x| (x - 1.0).abs()).sum::<f64>();
/// let trainer = Trainer::new(Algorithm::HillClimb)
///     .with_chromosome_len(4)
///     .with_seed(5);
///
/// let mut store = MemoryStore::new();
/// let (weights, id) = trainer.train_and_save(&cost, &mut store).unwrap();
/// assert_eq!(store.load(&id).unwrap(), weights);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trainer {
    /// Optimizer to run.
    pub algorithm: Algorithm,
    /// Used when `algorithm` is [`Algorithm::Evolutionary`].
    pub ga: GaConfig,
    /// Used when `algorithm` is [`Algorithm::SimulatedAnnealing`].
    pub sa: SaConfig,
    /// Used when `algorithm` is [`Algorithm::HillClimb`].
    pub hc: HcConfig,
}

impl Trainer {
    /// Default configurations for every optimizer, running `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_ga(mut self, config: GaConfig) -> Self {
        self.ga = config;
        self
    }

    pub fn with_sa(mut self, config: SaConfig) -> Self {
        self.sa = config;
        self
    }

    pub fn with_hc(mut self, config: HcConfig) -> Self {
        self.hc = config;
        self
    }

    /// Sets the gene space of every optimizer.
    pub fn with_genes(mut self, genes: GeneSpace) -> Self {
        self.ga.genes = genes;
        self.sa.genes = genes;
        self.hc.genes = genes;
        self
    }

    /// Sets the chromosome length of every optimizer.
    pub fn with_chromosome_len(mut self, len: usize) -> Self {
        self.ga.genes.len = len;
        self.sa.genes.len = len;
        self.hc.genes.len = len;
        self
    }

    /// Sets the seed of every optimizer.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = Some(seed);
        self.sa.seed = Some(seed);
        self.hc.seed = Some(seed);
        self
    }

    /// Validates the configuration of the selected optimizer.
    pub fn validate(&self) -> Result<()> {
        match self.algorithm {
            Algorithm::Evolutionary => self.ga.validate(),
            Algorithm::SimulatedAnnealing => self.sa.validate(),
            Algorithm::HillClimb => self.hc.validate(),
        }
    }

    /// Trains without progress reporting.
    pub fn train<F: FitnessFunction + ?Sized>(&self, fitness: &F) -> Result<TrainedWeights> {
        self.train_with_observer(fitness, &mut NullObserver)
    }

    /// Trains, forwarding progress to `observer`.
    pub fn train_with_observer<F, O>(&self, fitness: &F, observer: &mut O) -> Result<TrainedWeights>
    where
        F: FitnessFunction + ?Sized,
        O: Observer + ?Sized,
    {
        let (best, evaluations) = match self.algorithm {
            Algorithm::Evolutionary => {
                let r = GaRunner::run_with_observer(fitness, &self.ga, observer)?;
                (r.best, r.evaluations)
            }
            Algorithm::SimulatedAnnealing => {
                let r = SaRunner::run_with_observer(fitness, &self.sa, observer)?;
                (r.best, r.evaluations)
            }
            Algorithm::HillClimb => {
                let r = HcRunner::run_with_observer(fitness, &self.hc, observer)?;
                (r.best, r.evaluations)
            }
        };
        info!(
            algorithm = %self.algorithm,
            evaluations,
            fitness = best.fitness,
            "training finished"
        );
        Ok(TrainedWeights::from_individual(best, self.algorithm))
    }

    /// Trains, then saves the result to `store` exactly once.
    ///
    /// Nothing is saved if training fails.
    pub fn train_and_save<F, S>(
        &self,
        fitness: &F,
        store: &mut S,
    ) -> Result<(TrainedWeights, String)>
    where
        F: FitnessFunction + ?Sized,
        S: WeightStore + ?Sized,
    {
        let weights = self.train(fitness)?;
        let id = store.save(&weights)?;
        info!(id = %id, "trained weights saved");
        Ok((weights, id))
    }
}
