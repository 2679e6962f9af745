//! Hill-climb configuration.

use crate::error::{Error, Result};
use crate::types::GeneSpace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the hill climber.
///
/// # Examples
///
/// ```
/// use u_neuroevo::hill::HcConfig;
///
/// let config = HcConfig::default()
///     .with_chromosome_len(10)
///     .with_mutate_rate(0.2)
///     .with_max_iterations(1_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HcConfig {
    /// Chromosome length and bounds for the random starting point.
    pub genes: GeneSpace,

    /// Per-gene probability of a perturbation, in `[0, 1]`.
    pub mutate_rate: f64,

    /// Step added to or subtracted from a perturbed gene.
    pub mutate_change: f64,

    /// Number of candidate evaluations after the starting point.
    pub max_iterations: usize,

    /// Random seed (None draws one from entropy).
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            genes: GeneSpace::default(),
            mutate_rate: 0.04,
            mutate_change: 0.1,
            max_iterations: 20_000,
            seed: None,
        }
    }
}

impl HcConfig {
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

    /// Sets the per-gene perturbation probability (clamped to `[0, 1]`).
    pub fn with_mutate_rate(mut self, rate: f64) -> Self {
        self.mutate_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutate_change(mut self, change: f64) -> Self {
        self.mutate_change = change;
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
        if !(0.0..=1.0).contains(&self.mutate_rate) {
            return Err(Error::InvalidConfig(format!(
                "mutate_rate must be in [0, 1], got {}",
                self.mutate_rate
            )));
        }
        if !(self.mutate_change > 0.0 && self.mutate_change.is_finite()) {
            return Err(Error::InvalidConfig(
                "mutate_change must be positive and finite".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
