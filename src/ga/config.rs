//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the steady-state loop,
//! including the five strategy selectors.

use super::crossover::Crossover;
use super::initialisation::Initialisation;
use super::mutation::Mutation;
use super::replacement::Replacement;
use super::selection::Selection;
use crate::error::{Error, Result};
use crate::types::GeneSpace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lower-cases a strategy name and drops `_`, `-` and spaces.
pub(crate) fn canonical_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Configuration for the evolutionary engine.
///
/// # Defaults
///
/// ```
/// use u_neuroevo::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 40);
/// assert_eq!(config.max_evaluations, 20_000);
/// assert_eq!(config.selection, Selection::Random);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_neuroevo::ga::{Crossover, GaConfig, Replacement, Selection};
///
/// let config = GaConfig::default()
///     .with_chromosome_len(50)
///     .with_population_size(60)
///     .with_selection(Selection::Tournament)
///     .with_tournament_size(8)
///     .with_crossover(Crossover::Uniform)
///     .with_replacement(Replacement::Worst);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Chromosome length and bounds for random genes.
    pub genes: GeneSpace,

    /// Number of individuals in the population.
    pub population_size: usize,

    /// Evaluation budget. Checked before each generation, so the last
    /// generation may overshoot it.
    pub max_evaluations: usize,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutate_rate: f64,

    /// Amount added to or subtracted from a mutated gene.
    pub mutate_change: f64,

    /// Members sampled by tournament selection and replacement.
    ///
    /// Must be in `[1, population_size]`.
    pub tournament_size: usize,

    /// Extra individuals drawn by [`Initialisation::Augmented`].
    pub augment_extra: usize,

    /// Starting temperature of [`Mutation::Annealing`].
    pub mutation_temperature: f64,

    /// Fraction of the mutation temperature lost per generation, in `[0, 1)`.
    pub mutation_cooling_rate: f64,

    pub initialisation: Initialisation,
    pub selection: Selection,
    pub crossover: Crossover,
    pub mutation: Mutation,
    pub replacement: Replacement,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            genes: GeneSpace::default(),
            population_size: 40,
            max_evaluations: 20_000,
            mutate_rate: 0.04,
            mutate_change: 0.1,
            tournament_size: 5,
            augment_extra: 2500,
            mutation_temperature: 10_000.0,
            mutation_cooling_rate: 0.003,
            initialisation: Initialisation::default(),
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            replacement: Replacement::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the whole gene space.
    pub fn with_genes(mut self, genes: GeneSpace) -> Self {
        self.genes = genes;
        self
    }

    /// Sets the chromosome length.
    pub fn with_chromosome_len(mut self, len: usize) -> Self {
        self.genes.len = len;
        self
    }

    /// Sets the bounds used for random genes.
    pub fn with_gene_bounds(mut self, min: f64, max: f64) -> Self {
        self.genes.min = min;
        self.genes.max = max;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutate_rate(mut self, rate: f64) -> Self {
        self.mutate_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation step.
    pub fn with_mutate_change(mut self, change: f64) -> Self {
        self.mutate_change = change;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the oversampling used by augmented initialisation.
    pub fn with_augment_extra(mut self, n: usize) -> Self {
        self.augment_extra = n;
        self
    }

    /// Sets the annealing-mutation schedule.
    pub fn with_mutation_schedule(mut self, temperature: f64, cooling_rate: f64) -> Self {
        self.mutation_temperature = temperature;
        self.mutation_cooling_rate = cooling_rate;
        self
    }

    pub fn with_initialisation(mut self, init: Initialisation) -> Self {
        self.initialisation = init;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the five strategy selectors from their names.
    ///
    /// Fails on the first unknown name; nothing falls back to a default.
    ///
    /// ```
    /// use u_neuroevo::ga::{GaConfig, Selection};
    ///
    /// let config = GaConfig::default()
    ///     .with_strategy_names("random", "rank_route", "two_point", "standard", "worst")
    ///     .unwrap();
    /// assert_eq!(config.selection, Selection::RankRoute);
    ///
    /// assert!(GaConfig::default()
    ///     .with_strategy_names("random", "lottery", "two_point", "standard", "worst")
    ///     .is_err());
    /// ```
    pub fn with_strategy_names(
        mut self,
        initialisation: &str,
        selection: &str,
        crossover: &str,
        mutation: &str,
        replacement: &str,
    ) -> Result<Self> {
        self.initialisation = initialisation.parse()?;
        self.selection = selection.parse()?;
        self.crossover = crossover.parse()?;
        self.mutation = mutation.parse()?;
        self.replacement = replacement.parse()?;
        Ok(self)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.genes.validate()?;
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_evaluations == 0 {
            return Err(Error::InvalidConfig(
                "max_evaluations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutate_rate) {
            return Err(Error::InvalidConfig(format!(
                "mutate_rate must be in [0, 1], got {}",
                self.mutate_rate
            )));
        }
        if !(self.mutate_change > 0.0) || !self.mutate_change.is_finite() {
            return Err(Error::InvalidConfig(
                "mutate_change must be positive and finite".into(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "tournament_size must be in [1, {}], got {}",
                self.population_size, self.tournament_size
            )));
        }
        if !(self.mutation_temperature > 0.0) {
            return Err(Error::InvalidConfig(
                "mutation_temperature must be positive".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.mutation_cooling_rate) {
            return Err(Error::InvalidConfig(format!(
                "mutation_cooling_rate must be in [0, 1), got {}",
                self.mutation_cooling_rate
            )));
        }
        Ok(())
    }
}
