//! SA configuration.

use crate::error::{Error, Result};
use crate::types::GeneSpace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Simulated Annealing optimizer.
///
/// # Examples
///
/// ```
/// use u_neuroevo::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_chromosome_len(12)
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.01)
///     .with_max_iterations(2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Chromosome length and bounds for the random starting point.
    pub genes: GeneSpace,

    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Fraction of the temperature lost after every iteration, in `[0, 1)`.
    pub cooling_rate: f64,

    /// Number of iterations; each iteration spends one evaluation.
    pub max_iterations: usize,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            genes: GeneSpace::default(),
            initial_temperature: 100_000.0,
            cooling_rate: 0.0011,
            max_iterations: 20_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_genes(mut self, genes: GeneSpace) -> Self {
        self.genes = genes;
        self
    }

    pub fn with_chromosome_len(mut self, len: usize) -> Self {
        self.genes.len = len;
        self
    }

    pub fn with_gene_bounds(mut self, min: f64, max: f64) -> Self {
        self.genes.min = min;
        self.genes.max = max;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.genes.validate()?;
        if !(self.initial_temperature > 0.0) {
            return Err(Error::InvalidConfig(
                "initial_temperature must be positive".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.cooling_rate) {
            return Err(Error::InvalidConfig(format!(
                "cooling_rate must be in [0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
