//! SA execution loop.

use rand::Rng;
use tracing::{debug, info, trace};

use super::config::SaConfig;
use super::schedule::{acceptance, Temperature};
use crate::context::Context;
use crate::error::Result;
use crate::random::resolve_seed;
use crate::types::{FitnessFunction, Individual, NullObserver, Observer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaResult {
    /// Best individual seen along the trajectory.
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Iterations executed.
    pub iterations: usize,

    /// Evaluations spent, including the initial one.
    pub evaluations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Moves accepted (improving or not).
    pub accepted_moves: usize,

    /// Candidates strictly better than the current state.
    pub improving_moves: usize,
}

/// Executes the Simulated Annealing optimizer.
///
/// Each iteration swaps two randomly chosen genes of a copy of the current
/// state, evaluates it, and accepts it when the acceptance probability
/// exceeds a uniform draw. The temperature cools once per iteration
/// whether or not the move was accepted.
///
/// ```
/// use u_neuroevo::sa::{SaConfig, SaRunner};
///
/// let target = [0.5, -0.5, 1.0, -1.0];
/// let cost = |g: &[f64]| g.iter().zip(target).map(|(a, b)| (a - b).abs()).sum::<f64>();
///
/// let config = SaConfig::default()
///     .with_chromosome_len(4)
///     .with_max_iterations(200)
///     .with_seed(7);
/// let result = SaRunner::run(&cost, &config).unwrap();
/// assert_eq!(result.iterations, 200);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    pub fn run<F: FitnessFunction + ?Sized>(fitness: &F, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_observer(fitness, config, &mut NullObserver)
    }

    /// Runs SA, reporting `(evaluations, best_fitness)` after every iteration.
    pub fn run_with_observer<F, O>(
        fitness: &F,
        config: &SaConfig,
        observer: &mut O,
    ) -> Result<SaResult>
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
            temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
            "starting simulated annealing"
        );

        let mut current = Individual::random(&config.genes, ctx.rng());
        ctx.evaluate(&mut current)?;
        let mut best = current.clone();

        let mut temperature = Temperature::new(config.initial_temperature, config.cooling_rate);
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        for iteration in 0..config.max_iterations {
            let mut candidate = current.clone();
            let len = candidate.len();
            let i = ctx.rng().random_range(0..len);
            let j = ctx.rng().random_range(0..len);
            candidate.chromosome.swap(i, j);
            ctx.evaluate(&mut candidate)?;

            if candidate.fitness < current.fitness {
                improving_moves += 1;
            }

            let probability = acceptance(current.fitness, candidate.fitness, temperature.value());
            if probability > ctx.rng().random::<f64>() {
                current = candidate;
                accepted_moves += 1;
            }

            if current.fitness < best.fitness {
                best = current.clone();
            }

            temperature.cool();
            observer.report(ctx.evaluations(), best.fitness);
            trace!(
                iteration,
                current = current.fitness,
                best = best.fitness,
                temperature = temperature.value(),
                "sa iteration"
            );
        }

        debug!(accepted_moves, improving_moves, "annealing finished");
        info!(
            best_fitness = best.fitness,
            evaluations = ctx.evaluations(),
            "simulated annealing complete"
        );

        Ok(SaResult {
            best_fitness: best.fitness,
            best,
            iterations: config.max_iterations,
            evaluations: ctx.evaluations(),
            final_temperature: temperature.value(),
            accepted_moves,
            improving_moves,
        })
    }
}
