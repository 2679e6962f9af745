//! Mutation strategies, applied in place to the children of a generation.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::config::{canonical_name, GaConfig};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::sa::acceptance;
use crate::types::{FitnessFunction, Individual};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mutation {
    /// Per gene, with probability `mutate_rate`, add or subtract
    /// `mutate_change` (fair coin). No clamping to the gene bounds.
    ///
    /// Cost: no evaluations.
    Standard,

    /// As `Standard`, but every change is evaluated and reverted if the
    /// fitness got worse.
    ///
    /// Cost: one evaluation per gene that passes the rate trial, plus one
    /// baseline evaluation for a child that has no fitness yet.
    Constrained,

    /// Per child, swap two random genes in a copy and accept the copy with
    /// the annealing acceptance probability at the engine's current
    /// mutation temperature.
    ///
    /// Cost: one evaluation per child, plus one baseline evaluation for a
    /// child that has no fitness yet.
    #[default]
    Annealing,
}

impl Mutation {
    /// All variants, in declaration order.
    pub const ALL: [Mutation; 3] = [Mutation::Standard, Mutation::Constrained, Mutation::Annealing];

    /// Mutates `children` in place.
    ///
    /// `temperature` is only read by [`Mutation::Annealing`].
    pub fn apply<F: FitnessFunction + ?Sized>(
        &self,
        children: &mut [Individual],
        config: &GaConfig,
        temperature: f64,
        ctx: &mut Context<'_, F>,
    ) -> Result<()> {
        match self {
            Mutation::Standard => {
                for child in children.iter_mut() {
                    perturb_genes(
                        &mut child.chromosome,
                        config.mutate_rate,
                        config.mutate_change,
                        ctx.rng(),
                    );
                }
            }
            Mutation::Constrained => {
                for child in children.iter_mut() {
                    constrained(child, config.mutate_rate, config.mutate_change, ctx)?;
                }
            }
            Mutation::Annealing => {
                for child in children.iter_mut() {
                    annealing(child, temperature, ctx)?;
                }
            }
        }
        Ok(())
    }
}

/// Per gene, with probability `rate`, shifts the gene by `±change`.
pub fn perturb_genes<R: Rng>(genes: &mut [f64], rate: f64, change: f64, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            if rng.random_bool(0.5) {
                *gene += change;
            } else {
                *gene -= change;
            }
        }
    }
}

/// Greedy per-gene local search.
fn constrained<F: FitnessFunction + ?Sized>(
    child: &mut Individual,
    rate: f64,
    change: f64,
    ctx: &mut Context<'_, F>,
) -> Result<()> {
    for i in 0..child.len() {
        if ctx.rng().random::<f64>() >= rate {
            continue;
        }
        let prior = ctx.ensure_evaluated(child)?;
        let original = child.chromosome[i];
        if ctx.rng().random_bool(0.5) {
            child.chromosome[i] += change;
        } else {
            child.chromosome[i] -= change;
        }
        ctx.evaluate(child)?;
        if child.fitness > prior {
            child.chromosome[i] = original;
            child.fitness = prior;
        }
    }
    Ok(())
}

/// Transposition move accepted by the annealing criterion.
fn annealing<F: FitnessFunction + ?Sized>(
    child: &mut Individual,
    temperature: f64,
    ctx: &mut Context<'_, F>,
) -> Result<()> {
    if child.is_empty() {
        return Err(Error::Degenerate("zero-length chromosome".into()));
    }
    let current = ctx.ensure_evaluated(child)?;

    let mut candidate = child.clone();
    let len = candidate.len();
    let pos1 = ((len as f64 * ctx.rng().random::<f64>()) as usize).min(len - 1);
    let pos2 = ((len as f64 * ctx.rng().random::<f64>()) as usize).min(len - 1);
    candidate.chromosome.swap(pos1, pos2);
    ctx.evaluate(&mut candidate)?;

    if acceptance(current, candidate.fitness, temperature) >= ctx.rng().random::<f64>() {
        *child = candidate;
    }
    Ok(())
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mutation::Standard => "Standard",
            Mutation::Constrained => "Constrained",
            Mutation::Annealing => "Annealing",
        };
        f.write_str(name)
    }
}

impl FromStr for Mutation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_name(s).as_str() {
            "standard" => Ok(Mutation::Standard),
            "constrained" => Ok(Mutation::Constrained),
            "annealing" => Ok(Mutation::Annealing),
            _ => Err(Error::UnknownStrategy {
                kind: "mutation",
                value: s.to_string(),
            }),
        }
    }
}
