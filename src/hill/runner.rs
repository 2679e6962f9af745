//! Hill-climb loop.

use tracing::{debug, info, trace};

use super::config::HcConfig;
use crate::context::Context;
use crate::error::Result;
use crate::ga::perturb_genes;
use crate::random::resolve_seed;
use crate::types::{FitnessFunction, Individual, NullObserver, Observer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a hill-climb run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HcResult {
    /// Best individual found.
    pub best: Individual,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Candidate iterations executed.
    pub iterations: usize,
    /// Evaluations spent, including the starting point.
    pub evaluations: usize,
    /// Iterations whose candidate replaced the best.
    pub improvements: usize,
}

/// Greedy single-trajectory optimizer.
///
/// # Examples
///
/// ```
/// use u_neuroevo::hill::{HcConfig, HcRunner};
///
/// let sphere = |g: &[f64]| g.iter().map(|x| x * x).sum::<f64>();
/// let config = HcConfig::default()
///     .with_chromosome_len(4)
///     .with_mutate_rate(0.5)
///     .with_max_iterations(300)
///     .with_seed(3);
///
/// let result = HcRunner::run(&sphere, &config).unwrap();
/// assert_eq!(result.evaluations, 301);
/// ```
pub struct HcRunner;

impl HcRunner {
    /// Runs the hill climber.
    pub fn run<F: FitnessFunction + ?Sized>(fitness: &F, config: &HcConfig) -> Result<HcResult> {
        Self::run_with_observer(fitness, config, &mut NullObserver)
    }

    /// Runs the hill climber, reporting `(evaluations, best_fitness)` after
    /// every iteration.
    pub fn run_with_observer<F, O>(
        fitness: &F,
        config: &HcConfig,
        observer: &mut O,
    ) -> Result<HcResult>
    where
        F: FitnessFunction + ?Sized,
        O: Observer + ?Sized,
    {
        config.validate()?;

        let seed = resolve_seed(config.seed);
        let mut ctx = Context::new(fitness, seed);
        info!(
            seed,
            iterations = config.max_iterations,
            mutate_rate = config.mutate_rate,
            "starting hill climb"
        );

        let mut best = Individual::random(&config.genes, ctx.rng());
        ctx.evaluate(&mut best)?;
        let mut improvements = 0usize;

        for iteration in 0..config.max_iterations {
            let mut candidate = best.clone();
            perturb_genes(
                &mut candidate.chromosome,
                config.mutate_rate,
                config.mutate_change,
                ctx.rng(),
            );
            ctx.evaluate(&mut candidate)?;

            if candidate.fitness < best.fitness {
                best = candidate;
                improvements += 1;
                trace!(iteration, best = best.fitness, "hill climb improved");
            }
            observer.report(ctx.evaluations(), best.fitness);
        }

        debug!(improvements, "hill climb finished");
        info!(
            best_fitness = best.fitness,
            evaluations = ctx.evaluations(),
            "hill climb complete"
        );

        Ok(HcResult {
            best_fitness: best.fitness,
            best,
            iterations: config.max_iterations,
            evaluations: ctx.evaluations(),
            improvements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sphere(genes: &[f64]) -> f64 {
        genes.iter().map(|g| g * g).sum()
    }

    fn config() -> HcConfig {
        HcConfig::default()
            .with_chromosome_len(5)
            .with_mutate_rate(0.5)
            .with_mutate_change(0.05)
            .with_max_iterations(2_000)
            .with_seed(11)
    }

    #[test]
    fn test_sphere_improves() {
        let mut rng = crate::random::create_rng(11);
        let start = sphere(&Individual::random(&config().genes, &mut rng).chromosome);

        let result = HcRunner::run(&sphere, &config()).unwrap();
        assert!(
            result.best_fitness < start * 0.5,
            "expected 2x improvement: {start} -> {}",
            result.best_fitness
        );
        assert!(result.improvements > 0);
    }

    #[test]
    fn test_reported_best_is_monotone() {
        let mut reports = Vec::new();
        let mut observer = |_: usize, f: f64| reports.push(f);
        HcRunner::run_with_observer(&sphere, &config(), &mut observer).unwrap();
        assert_eq!(reports.len(), 2_000);
        assert!(reports.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_rate_zero_never_moves() {
        let config = config().with_mutate_rate(0.0).with_max_iterations(50);
        let result = HcRunner::run(&sphere, &config).unwrap();
        assert_eq!(result.improvements, 0);
        assert_eq!(result.evaluations, 51);
    }

    #[test]
    fn test_equal_candidate_not_accepted() {
        // Flat landscape: no candidate is strictly better.
        let flat = |_: &[f64]| 1.0;
        let result = HcRunner::run(&flat, &config().with_max_iterations(100)).unwrap();
        assert_eq!(result.improvements, 0);

        let mut rng = crate::random::create_rng(11);
        let start = Individual::random(&config().genes, &mut rng);
        assert_eq!(result.best.chromosome, start.chromosome);
    }

    #[test]
    fn test_invalid_config() {
        let config = HcConfig::default();
        assert!(matches!(
            HcRunner::run(&sphere, &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
