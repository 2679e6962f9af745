//! Initialisation strategies: how the starting population is built.

use std::fmt;
use std::str::FromStr;

use super::config::{canonical_name, GaConfig};
use super::population::Population;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::types::{FitnessFunction, Individual};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Starting-population strategy.
///
/// Every variant returns exactly `population_size` evaluated members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Initialisation {
    /// `population_size` uniformly random individuals.
    ///
    /// Cost: `population_size` evaluations.
    Random,

    /// Oversample `population_size + augment_extra` random individuals and
    /// keep the best `population_size`.
    ///
    /// Cost: `population_size + augment_extra` evaluations.
    #[default]
    Augmented,

    /// For each slot, evaluate a random individual and its gene-wise
    /// negation and keep the better one.
    ///
    /// Cost: `2 * population_size` evaluations.
    PositiveNegative,
}

impl Initialisation {
    /// All variants, in declaration order.
    pub const ALL: [Initialisation; 3] = [
        Initialisation::Random,
        Initialisation::Augmented,
        Initialisation::PositiveNegative,
    ];

    /// Builds and evaluates the starting population.
    pub fn initialise<F: FitnessFunction + ?Sized>(
        &self,
        config: &GaConfig,
        ctx: &mut Context<'_, F>,
    ) -> Result<Population> {
        let n = config.population_size;
        let members = match self {
            Initialisation::Random => {
                let mut members = random_members(config, n, ctx);
                ctx.evaluate_all(&mut members)?;
                members
            }
            Initialisation::Augmented => {
                let mut members = random_members(config, n + config.augment_extra, ctx);
                ctx.evaluate_all(&mut members)?;
                // Stable sort: equal fitness keeps draw order.
                members.sort_by(Individual::cmp_fitness);
                members.truncate(n);
                members
            }
            Initialisation::PositiveNegative => {
                let mut members = Vec::with_capacity(n);
                for _ in 0..n {
                    let ind = Individual::random(&config.genes, ctx.rng());
                    members.push(positive_negative(ind, ctx)?);
                }
                members
            }
        };
        Ok(Population::new(members))
    }
}

/// Evaluates `individual` and its negation, returning the strictly better
/// one; ties keep `individual`.
pub fn positive_negative<F: FitnessFunction + ?Sized>(
    mut individual: Individual,
    ctx: &mut Context<'_, F>,
) -> Result<Individual> {
    let mut negated = individual.negated();
    ctx.evaluate(&mut individual)?;
    ctx.evaluate(&mut negated)?;
    if negated.fitness < individual.fitness {
        Ok(negated)
    } else {
        Ok(individual)
    }
}

fn random_members<F: FitnessFunction + ?Sized>(
    config: &GaConfig,
    count: usize,
    ctx: &mut Context<'_, F>,
) -> Vec<Individual> {
    (0..count)
        .map(|_| Individual::random(&config.genes, ctx.rng()))
        .collect()
}

impl fmt::Display for Initialisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Initialisation::Random => "Random",
            Initialisation::Augmented => "Augmented",
            Initialisation::PositiveNegative => "PositiveNegative",
        };
        f.write_str(name)
    }
}

impl FromStr for Initialisation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_name(s).as_str() {
            "random" => Ok(Initialisation::Random),
            "augmented" => Ok(Initialisation::Augmented),
            "positivenegative" => Ok(Initialisation::PositiveNegative),
            _ => Err(Error::UnknownStrategy {
                kind: "initialisation",
                value: s.to_string(),
            }),
        }
    }
}
