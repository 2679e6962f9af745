//! Replacement strategies: how evaluated children enter the population.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::trace;

use super::config::canonical_name;
use super::population::Population;
use crate::error::{Error, Result};
use crate::types::Individual;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Replacement strategy. Both variants keep the population size constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Replacement {
    /// Each child overwrites the slot of the current worst member.
    ///
    /// The worst is recomputed per child, so a child worse than everyone
    /// else can itself be overwritten by the next child.
    Worst,

    /// Each child replaces the worst of `tournament_size` members sampled
    /// after shuffling the population. The loser is removed and the child
    /// appended.
    #[default]
    Tournament,
}

impl Replacement {
    /// All variants, in declaration order.
    pub const ALL: [Replacement; 2] = [Replacement::Worst, Replacement::Tournament];

    /// Inserts `children` into `population`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPopulation`] if there is no member to replace, and
    /// [`Error::Degenerate`] for a tournament of size zero.
    pub fn apply<R: Rng>(
        &self,
        population: &mut Population,
        children: Vec<Individual>,
        tournament_size: usize,
        rng: &mut R,
    ) -> Result<()> {
        match self {
            Replacement::Worst => {
                for child in children {
                    let idx = population.worst_index().ok_or(Error::EmptyPopulation)?;
                    trace!(slot = idx, fitness = child.fitness, "replacing worst");
                    population.members_mut()[idx] = child;
                }
            }
            Replacement::Tournament => {
                if tournament_size == 0 {
                    return Err(Error::Degenerate("tournament size is zero".into()));
                }
                for child in children {
                    if population.is_empty() {
                        return Err(Error::EmptyPopulation);
                    }
                    population.shuffle(rng);
                    let idx = tournament_loser(population.members(), tournament_size);
                    trace!(slot = idx, fitness = child.fitness, "replacing tournament loser");
                    let members = population.members_mut();
                    members.remove(idx);
                    members.push(child);
                }
            }
        }
        Ok(())
    }
}

/// Index of the highest-fitness member among the first `k`; first wins ties.
fn tournament_loser(members: &[Individual], k: usize) -> usize {
    let mut worst = 0;
    for (i, ind) in members.iter().enumerate().take(k).skip(1) {
        if ind.fitness > members[worst].fitness {
            worst = i;
        }
    }
    worst
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Replacement::Worst => "Worst",
            Replacement::Tournament => "Tournament",
        };
        f.write_str(name)
    }
}

impl FromStr for Replacement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_name(s).as_str() {
            "worst" => Ok(Replacement::Worst),
            "tournament" => Ok(Replacement::Tournament),
            _ => Err(Error::UnknownStrategy {
                kind: "replacement",
                value: s.to_string(),
            }),
        }
    }
}
