//! Steady-state evolutionary loop.
//!
//! [`GaEngine`] holds the state of one run and advances it one generation
//! at a time; [`GaRunner`] drives it until the evaluation budget is spent:
//! initialisation → (selection → crossover → mutation → evaluation →
//! replacement) repeated.

use tracing::{debug, info};

use super::config::GaConfig;
use super::population::Population;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::random::resolve_seed;
use crate::sa::Temperature;
use crate::types::{FitnessFunction, Individual, NullObserver, Observer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Building the starting population. Transitional: it lasts only
    /// inside [`GaEngine::initialize`], so a constructed engine never
    /// reports it.
    Initializing,
    /// Running generations while budget remains.
    Evolving,
    /// Budget spent; no more generations.
    Terminated,
}

/// Statistics of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Evaluations spent so far in the run.
    pub evaluations: usize,
    /// Best fitness in the current population.
    pub best_fitness: f64,
    /// Mean fitness of the current population.
    pub mean_fitness: f64,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaResult {
    /// Best member of the final population.
    ///
    /// This is the best of the *current* population when the run stopped,
    /// not a best-of-run archive.
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Evaluations spent, including any overshoot from the last generation.
    pub evaluations: usize,

    /// Best fitness after initialisation and after each generation.
    pub fitness_history: Vec<f64>,

    /// Final population.
    pub population: Vec<Individual>,
}

/// State of one evolutionary run.
#[derive(Debug, Clone)]
pub struct GaEngine {
    config: GaConfig,
    population: Population,
    best: Individual,
    temperature: Temperature,
    generation: usize,
    phase: Phase,
    fitness_history: Vec<f64>,
}

impl GaEngine {
    /// Validates `config`, builds the starting population, and enters
    /// [`Phase::Evolving`].
    pub fn initialize<F: FitnessFunction + ?Sized>(
        config: GaConfig,
        ctx: &mut Context<'_, F>,
    ) -> Result<Self> {
        config.validate()?;
        let population = config.initialisation.initialise(&config, ctx)?;
        Self::from_population(config, population)
    }

    /// Starts from an already evaluated population.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPopulation`] if `population` is empty, and
    /// [`Error::InvalidInput`] if its size differs from
    /// `config.population_size`, a chromosome length differs from
    /// `config.genes.len`, or a member has no fitness.
    pub fn from_population(config: GaConfig, population: Population) -> Result<Self> {
        config.validate()?;
        if population.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        if population.len() != config.population_size {
            return Err(Error::InvalidInput(format!(
                "population has {} members, config expects {}",
                population.len(),
                config.population_size
            )));
        }
        if let Some(m) = population
            .members()
            .iter()
            .find(|m| m.chromosome.len() != config.genes.len)
        {
            return Err(Error::InvalidInput(format!(
                "chromosome length {} does not match gene space length {}",
                m.chromosome.len(),
                config.genes.len
            )));
        }
        if population.members().iter().any(|m| !m.is_evaluated()) {
            return Err(Error::InvalidInput(
                "every population member must be evaluated".into(),
            ));
        }
        let best = population.best().cloned().ok_or(Error::EmptyPopulation)?;
        let temperature =
            Temperature::new(config.mutation_temperature, config.mutation_cooling_rate);

        Ok(Self {
            fitness_history: vec![best.fitness],
            config,
            population,
            best,
            temperature,
            generation: 0,
            phase: Phase::Evolving,
        })
    }

    /// Runs one generation and returns its statistics.
    pub fn step<F: FitnessFunction + ?Sized>(
        &mut self,
        ctx: &mut Context<'_, F>,
    ) -> Result<GenerationStats> {
        let config = &self.config;
        let k = config.tournament_size;

        let parent1 = config.selection.select(&mut self.population, k, ctx.rng())?;
        let parent2 = config.selection.select(&mut self.population, k, ctx.rng())?;

        let mut children = config.crossover.apply(&parent1, &parent2, ctx.rng())?;

        config
            .mutation
            .apply(&mut children, config, self.temperature.value(), ctx)?;
        if config.mutation == super::Mutation::Annealing {
            self.temperature.cool();
        }

        ctx.evaluate_all(&mut children)?;

        config
            .replacement
            .apply(&mut self.population, children, k, ctx.rng())?;

        self.best = self
            .population
            .best()
            .cloned()
            .ok_or(Error::EmptyPopulation)?;
        self.generation += 1;
        self.fitness_history.push(self.best.fitness);

        let stats = GenerationStats {
            generation: self.generation,
            evaluations: ctx.evaluations(),
            best_fitness: self.best.fitness,
            mean_fitness: self.population.mean_fitness().unwrap_or(f64::NAN),
        };
        debug!(
            generation = stats.generation,
            evaluations = stats.evaluations,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            "generation complete"
        );
        Ok(stats)
    }

    /// Whether the budget allows another generation. Moves to
    /// [`Phase::Terminated`] once it does not.
    pub fn should_continue<F: FitnessFunction + ?Sized>(&mut self, ctx: &Context<'_, F>) -> bool {
        if self.phase == Phase::Evolving && ctx.evaluations() >= self.config.max_evaluations {
            self.phase = Phase::Terminated;
        }
        self.phase == Phase::Evolving
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best member of the current population.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    /// Current annealing-mutation temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature.value()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Consumes the engine into a result.
    pub fn into_result(self, evaluations: usize) -> GaResult {
        GaResult {
            best_fitness: self.best.fitness,
            best: self.best,
            generations: self.generation,
            evaluations,
            fitness_history: self.fitness_history,
            population: self.population.into_members(),
        }
    }
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_neuroevo::ga::{GaConfig, GaRunner, Initialisation};
///
/// let sphere = |g: &[f64]| g.iter().map(|x| x * x).sum::<f64>();
/// let config = GaConfig::default()
///     .with_chromosome_len(5)
///     .with_population_size(20)
///     .with_initialisation(Initialisation::Random)
///     .with_max_evaluations(500)
///     .with_seed(42);
///
/// let result = GaRunner::run(&sphere, &config).unwrap();
/// assert!(result.evaluations >= 500);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<F: FitnessFunction + ?Sized>(fitness: &F, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_observer(fitness, config, &mut NullObserver)
    }

    /// Runs the GA, reporting `(evaluations, best_fitness)` after every
    /// generation.
    pub fn run_with_observer<F, O>(
        fitness: &F,
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult>
    where
        F: FitnessFunction + ?Sized,
        O: Observer + ?Sized,
    {
        config.validate()?;

        let seed = resolve_seed(config.seed);
        let mut ctx = Context::new(fitness, seed);
        info!(
            seed,
            population = config.population_size,
            budget = config.max_evaluations,
            initialisation = %config.initialisation,
            selection = %config.selection,
            crossover = %config.crossover,
            mutation = %config.mutation,
            replacement = %config.replacement,
            "starting evolutionary run"
        );

        let mut engine = GaEngine::initialize(config.clone(), &mut ctx)?;
        debug!(
            evaluations = ctx.evaluations(),
            best = engine.best().fitness,
            "population initialised"
        );

        while engine.should_continue(&ctx) {
            let stats = engine.step(&mut ctx)?;
            observer.report(stats.evaluations, stats.best_fitness);
        }

        info!(
            generations = engine.generation(),
            evaluations = ctx.evaluations(),
            best_fitness = engine.best().fitness,
            "evolutionary run complete"
        );
        Ok(engine.into_result(ctx.evaluations()))
    }
}

// ============================================================================
// Tests
// ============================================================================
