//! Run-scoped state shared by every strategy call.
//!
//! A [`Context`] owns the random stream and the evaluation counter of one
//! run. Strategies receive it explicitly, so the order in which they draw
//! random numbers and spend evaluations is visible at every call site.

use rand::rngs::StdRng;

use crate::error::{Error, Result};
use crate::random::create_rng;
use crate::types::{FitnessFunction, Individual};

/// Random stream, evaluation counter, and fitness function of one run.
pub struct Context<'f, F: ?Sized> {
    fitness: &'f F,
    rng: StdRng,
    evaluations: usize,
}

impl<'f, F: FitnessFunction + ?Sized> Context<'f, F> {
    /// Creates a context with a freshly seeded stream and a zero counter.
    pub fn new(fitness: &'f F, seed: u64) -> Self {
        Self {
            fitness,
            rng: create_rng(seed),
            evaluations: 0,
        }
    }

    /// The run's random stream.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Evaluations spent so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Evaluates `individual`, stores its fitness, and spends one evaluation.
    ///
    /// The counter is incremented even when the returned value is rejected,
    /// since the call itself was made.
    pub fn evaluate(&mut self, individual: &mut Individual) -> Result<f64> {
        let fitness = self.fitness.evaluate(&individual.chromosome);
        self.evaluations += 1;
        if !fitness.is_finite() || fitness < 0.0 {
            return Err(Error::InvalidFitness { value: fitness });
        }
        individual.fitness = fitness;
        Ok(fitness)
    }

    /// Evaluates every individual in order.
    pub fn evaluate_all(&mut self, individuals: &mut [Individual]) -> Result<()> {
        for individual in individuals.iter_mut() {
            self.evaluate(individual)?;
        }
        Ok(())
    }

    /// Evaluates `individual` only if it has no fitness yet.
    pub fn ensure_evaluated(&mut self, individual: &mut Individual) -> Result<f64> {
        if individual.is_evaluated() {
            Ok(individual.fitness)
        } else {
            self.evaluate(individual)
        }
    }
}
