//! Core types shared by every optimizer.
//!
//! - [`Individual`]: a chromosome of real-valued genes plus its fitness
//! - [`GeneSpace`]: chromosome length and the bounds used for random genes
//! - [`FitnessFunction`]: the external cost function (lower is better)
//! - [`Observer`]: sink for per-generation / per-iteration progress

use rand::Rng;
use std::cmp::Ordering;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate weight vector and its fitness.
///
/// Fitness is `f64::INFINITY` until the individual has been evaluated, so an
/// unevaluated individual always compares as the worst. `Clone` is a deep
/// copy: the clone's chromosome is independent storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Individual {
    /// Gene values, one per network weight.
    pub chromosome: Vec<f64>,
    /// Cost of this chromosome. Lower is better.
    pub fitness: f64,
}

impl Individual {
    /// Fitness carried by an individual that has not been evaluated yet.
    pub const UNEVALUATED: f64 = f64::INFINITY;

    /// Wraps a chromosome with unevaluated fitness.
    pub fn new(chromosome: Vec<f64>) -> Self {
        Self {
            chromosome,
            fitness: Self::UNEVALUATED,
        }
    }

    /// Wraps a chromosome with a known fitness.
    pub fn with_fitness(chromosome: Vec<f64>, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }

    /// Draws every gene uniformly from `[space.min, space.max)`.
    pub fn random<R: Rng>(space: &GeneSpace, rng: &mut R) -> Self {
        let chromosome = (0..space.len)
            .map(|_| rng.random_range(space.min..space.max))
            .collect();
        Self::new(chromosome)
    }

    /// Returns the gene-wise negation, unevaluated.
    pub fn negated(&self) -> Self {
        Self::new(self.chromosome.iter().map(|g| -g).collect())
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }

    /// Whether a fitness has been assigned.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Orders two individuals by ascending fitness (best first).
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness
            .partial_cmp(&other.fitness)
            .unwrap_or(Ordering::Equal)
    }
}

/// Shape of the search space: chromosome length and initial gene bounds.
///
/// The bounds only apply to random initialisation; mutation is free to
/// move genes outside them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneSpace {
    /// Number of genes in every chromosome.
    pub len: usize,
    /// Lower bound for random genes.
    pub min: f64,
    /// Upper bound for random genes.
    pub max: f64,
}

impl Default for GeneSpace {
    fn default() -> Self {
        Self {
            len: 0,
            min: -3.0,
            max: 3.0,
        }
    }
}

impl GeneSpace {
    /// Creates a gene space.
    pub fn new(len: usize, min: f64, max: f64) -> Self {
        Self { len, min, max }
    }

    /// Gene count of a single-hidden-layer network with biases:
    /// `in*hidden + hidden*out + hidden + out`.
    pub fn network_genes(inputs: usize, hidden: usize, outputs: usize) -> usize {
        inputs * hidden + hidden * outputs + hidden + outputs
    }

    /// Validates the space.
    pub fn validate(&self) -> Result<()> {
        if self.len == 0 {
            return Err(Error::InvalidConfig(
                "chromosome length must be at least 1".into(),
            ));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidConfig("gene bounds must be finite".into()));
        }
        if self.min >= self.max {
            return Err(Error::InvalidConfig(format!(
                "min_gene ({}) must be less than max_gene ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// The black-box cost function being minimised.
///
/// Implementations must be deterministic for a given chromosome and
/// return a finite, non-negative value. The evaluation budget is counted
/// by [`Context`](crate::Context), not by the function itself.
///
/// Any `Fn(&[f64]) -> f64` is a fitness function:
///
/// ```
/// use u_neuroevo::FitnessFunction;
///
/// let sphere = |genes: &[f64]| genes.iter().map(|g| g * g).sum::<f64>();
/// assert_eq!(sphere.evaluate(&[1.0, 2.0]), 5.0);
/// ```
pub trait FitnessFunction {
    /// Returns the cost of `chromosome`. Lower is better.
    fn evaluate(&self, chromosome: &[f64]) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, chromosome: &[f64]) -> f64 {
        self(chromosome)
    }
}

/// Receives progress once per generation (GA) or iteration (SA, HC).
pub trait Observer {
    /// Reports the evaluations consumed so far and the current best fitness.
    fn report(&mut self, evaluations: usize, best_fitness: f64);
}

/// Observer that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn report(&mut self, _evaluations: usize, _best_fitness: f64) {}
}

impl<F> Observer for F
where
    F: FnMut(usize, f64),
{
    fn report(&mut self, evaluations: usize, best_fitness: f64) {
        self(evaluations, best_fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_clone_is_deep() {
        let original = Individual::with_fitness(vec![1.0, 2.0, 3.0], 0.5);
        let mut copy = original.clone();
        copy.chromosome[0] = 99.0;
        assert_eq!(original.chromosome[0], 1.0);
        assert_eq!(copy.len(), original.len());
    }

    #[test]
    fn test_new_is_unevaluated() {
        let ind = Individual::new(vec![0.0; 4]);
        assert!(!ind.is_evaluated());
        assert_eq!(ind.fitness, Individual::UNEVALUATED);
    }

    #[test]
    fn test_random_respects_bounds() {
        let space = GeneSpace::new(200, -0.5, 0.5);
        let mut rng = create_rng(3);
        let ind = Individual::random(&space, &mut rng);
        assert_eq!(ind.len(), 200);
        assert!(ind.chromosome.iter().all(|g| (-0.5..0.5).contains(g)));
    }

    #[test]
    fn test_negated() {
        let ind = Individual::with_fitness(vec![2.0, -1.0], 0.1);
        let neg = ind.negated();
        assert_eq!(neg.chromosome, vec![-2.0, 1.0]);
        assert!(!neg.is_evaluated());
    }

    #[test]
    fn test_cmp_fitness_ascending() {
        let mut pop = vec![
            Individual::with_fitness(vec![0.0], 0.7),
            Individual::with_fitness(vec![1.0], 0.1),
            Individual::new(vec![2.0]),
        ];
        pop.sort_by(Individual::cmp_fitness);
        assert_eq!(pop[0].fitness, 0.1);
        assert!(!pop[2].is_evaluated());
    }

    #[test]
    fn test_network_genes() {
        // 8 inputs, 5 hidden, 3 outputs
        assert_eq!(GeneSpace::network_genes(8, 5, 3), 40 + 15 + 5 + 3);
    }

    #[test]
    fn test_gene_space_validate() {
        assert!(GeneSpace::default().validate().is_err());
        assert!(GeneSpace::new(3, -3.0, 3.0).validate().is_ok());
        assert!(GeneSpace::new(3, 1.0, 1.0).validate().is_err());
        assert!(GeneSpace::new(3, f64::NEG_INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut obs = |e: usize, f: f64| seen.push((e, f));
            obs.report(3, 0.25);
        }
        assert_eq!(seen, vec![(3, 0.25)]);
    }
}
