//! Selection strategies for the GA.
//!
//! Selection picks one parent from the population. The engine calls it
//! twice per generation. Every strategy returns an owned copy, so later
//! mutation can never alias a live population slot.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::warn;

use super::config::canonical_name;
use super::population::Population;
use crate::alias::AliasTable;
use crate::error::{Error, Result};
use crate::types::Individual;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parent selection strategy.
///
/// All strategies assume **minimization** (lower fitness = better).
///
/// # Examples
///
/// ```
/// use u_neuroevo::ga::{Population, Selection};
/// use u_neuroevo::random::create_rng;
/// use u_neuroevo::Individual;
///
/// let mut pop = Population::new(vec![
///     Individual::with_fitness(vec![0.0], 0.9),
///     Individual::with_fitness(vec![1.0], 0.1),
/// ]);
/// let mut rng = create_rng(42);
/// // A tournament over the whole population always returns the best.
/// let parent = Selection::Tournament.select(&mut pop, 2, &mut rng).unwrap();
/// assert_eq!(parent.fitness, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    /// Uniformly random member.
    ///
    /// # Complexity
    /// O(1) per selection
    #[default]
    Random,

    /// Shuffle the population in place, take the first `tournament_size`
    /// members, return the lowest-fitness one.
    ///
    /// Sampling is without replacement, so a tournament as large as the
    /// population always returns the best member.
    ///
    /// # Complexity
    /// O(n) per selection (shuffle)
    Tournament,

    /// Fitness-proportionate selection with weight `1 - fitness`.
    ///
    /// A point `r` is drawn in `[0, Σw)` and the weights are subtracted in
    /// population order until `r` goes negative. If rounding leaves `r`
    /// non-negative after the last member, the last member is returned.
    ///
    /// Weights are only meaningful while fitness stays in `[0, 1]`.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Linear rank weights `1..=n` assigned by **position** in the current
    /// population order, sampled with an alias table.
    ///
    /// Positions are not sorted by fitness first, so the pressure follows
    /// whatever order the population is in. Later positions are favoured.
    ///
    /// # Complexity
    /// O(n) per selection (table build), O(1) per draw
    RankRoute,
}

impl Selection {
    /// All variants, in declaration order.
    pub const ALL: [Selection; 4] = [
        Selection::Random,
        Selection::Tournament,
        Selection::Roulette,
        Selection::RankRoute,
    ];

    /// Selects a parent and returns an owned copy.
    ///
    /// `Tournament` reorders the population.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPopulation`] for an empty population, and
    /// [`Error::Degenerate`] for a tournament of size zero.
    pub fn select<R: Rng>(
        &self,
        population: &mut Population,
        tournament_size: usize,
        rng: &mut R,
    ) -> Result<Individual> {
        if population.is_empty() {
            return Err(Error::EmptyPopulation);
        }

        let idx = match self {
            Selection::Random => rng.random_range(0..population.len()),
            Selection::Tournament => tournament(population, tournament_size, rng)?,
            Selection::Roulette => roulette(population.members(), rng),
            Selection::RankRoute => rank_route(population.len(), rng)?,
        };
        Ok(population.members()[idx].clone())
    }
}

/// Shuffles, then returns the index of the best among the first `k`.
fn tournament<R: Rng>(population: &mut Population, k: usize, rng: &mut R) -> Result<usize> {
    if k == 0 {
        return Err(Error::Degenerate("tournament size is zero".into()));
    }
    population.shuffle(rng);

    let members = population.members();
    let mut best_idx = 0;
    for (i, ind) in members.iter().enumerate().take(k).skip(1) {
        if ind.fitness < members[best_idx].fitness {
            best_idx = i;
        }
    }
    Ok(best_idx)
}

/// Roulette wheel over `1 - fitness`.
fn roulette<R: Rng>(members: &[Individual], rng: &mut R) -> usize {
    let total: f64 = members.iter().map(|ind| 1.0 - ind.fitness).sum();

    let mut r = total * rng.random::<f64>();
    for (i, ind) in members.iter().enumerate() {
        r -= 1.0 - ind.fitness;
        if r < 0.0 {
            return i;
        }
    }

    warn!(remaining = r, "roulette rounding underflow, using last member");
    members.len() - 1
}

/// Positional rank weights `1..=n` drawn through an alias table.
fn rank_route<R: Rng>(n: usize, rng: &mut R) -> Result<usize> {
    let weights: Vec<f64> = (1..=n).map(|rank| rank as f64).collect();
    let table = AliasTable::new(&weights)?;
    Ok(table.sample(rng))
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selection::Random => "Random",
            Selection::Tournament => "Tournament",
            Selection::Roulette => "Roulette",
            Selection::RankRoute => "RankRoute",
        };
        f.write_str(name)
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_name(s).as_str() {
            "random" => Ok(Selection::Random),
            "tournament" => Ok(Selection::Tournament),
            "roulette" => Ok(Selection::Roulette),
            "rankroute" | "routerank" => Ok(Selection::RankRoute),
            _ => Err(Error::UnknownStrategy {
                kind: "selection",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Population {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual::with_fitness(vec![i as f64], f))
            .collect::<Vec<_>>()
            .into()
    }

    fn id(ind: &Individual) -> usize {
        ind.chromosome[0] as usize
    }

    #[test]
    fn test_tournament_full_size_returns_best() {
        let mut pop = make_population(&[0.9, 0.5, 0.1, 0.8]);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let parent = Selection::Tournament.select(&mut pop, 4, &mut rng).unwrap();
            assert_eq!(id(&parent), 2);
        }
    }

    #[test]
    fn test_tournament_oversized_clamps_to_population() {
        let mut pop = make_population(&[0.9, 0.5, 0.1, 0.8]);
        let mut rng = create_rng(42);
        let parent = Selection::Tournament.select(&mut pop, 50, &mut rng).unwrap();
        assert_eq!(id(&parent), 2);
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let mut pop = make_population(&[0.9, 0.5, 0.1, 0.8]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let parent = Selection::Tournament.select(&mut pop, 1, &mut rng).unwrap();
            counts[id(&parent)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_zero_is_degenerate() {
        let mut pop = make_population(&[0.1, 0.2]);
        let mut rng = create_rng(42);
        assert!(matches!(
            Selection::Tournament.select(&mut pop, 0, &mut rng),
            Err(Error::Degenerate(_))
        ));
    }

    #[test]
    fn test_tournament_keeps_members() {
        let mut pop = make_population(&[0.9, 0.5, 0.1, 0.8]);
        let mut rng = create_rng(42);
        Selection::Tournament.select(&mut pop, 2, &mut rng).unwrap();
        let mut ids: Vec<usize> = pop.members().iter().map(id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_random_is_uniform() {
        let mut pop = make_population(&[0.9, 0.5, 0.1, 0.8]);
        let mut rng = create_rng(7);
        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            let parent = Selection::Random.select(&mut pop, 3, &mut rng).unwrap();
            counts[id(&parent)] += 1;
        }
        for &c in &counts {
            assert!(c > 2200, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_low_fitness() {
        let mut pop = make_population(&[0.95, 0.5, 0.05, 0.8]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            let parent = Selection::Roulette.select(&mut pop, 3, &mut rng).unwrap();
            counts[id(&parent)] += 1;
        }
        assert!(
            counts[2] > counts[0] * 5,
            "best should dominate worst: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_underflow_falls_back_to_last() {
        // All weights are zero, so r starts at 0 and never goes negative.
        let members: Vec<Individual> = (0..3)
            .map(|i| Individual::with_fitness(vec![i as f64], 1.0))
            .collect();
        let mut rng = create_rng(42);
        assert_eq!(roulette(&members, &mut rng), 2);
    }

    #[test]
    fn test_rank_route_is_positional() {
        // Fitness is ignored; the last position carries weight n.
        let mut pop = make_population(&[0.1, 0.2, 0.3, 0.4]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 100_000;
        for _ in 0..n {
            let parent = Selection::RankRoute.select(&mut pop, 3, &mut rng).unwrap();
            counts[id(&parent)] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            let expected = (i + 1) as f64 / 10.0;
            let freq = c as f64 / n as f64;
            assert!(
                (freq - expected).abs() < 0.01,
                "position {i}: expected {expected}, got {freq}"
            );
        }
    }

    #[test]
    fn test_single_individual() {
        let mut pop = make_population(&[0.5]);
        let mut rng = create_rng(42);
        for sel in Selection::ALL {
            assert_eq!(id(&sel.select(&mut pop, 1, &mut rng).unwrap()), 0);
        }
    }

    #[test]
    fn test_empty_population_is_error() {
        let mut pop = Population::default();
        let mut rng = create_rng(42);
        for sel in Selection::ALL {
            assert!(matches!(
                sel.select(&mut pop, 1, &mut rng),
                Err(Error::EmptyPopulation)
            ));
        }
    }

    #[test]
    fn test_selection_returns_copy() {
        let mut pop = make_population(&[0.1, 0.2]);
        let mut rng = create_rng(42);
        let mut parent = Selection::Random.select(&mut pop, 1, &mut rng).unwrap();
        parent.chromosome[0] = 99.0;
        assert!(pop.members().iter().all(|m| m.chromosome[0] < 2.0));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("rank_route".parse::<Selection>().unwrap(), Selection::RankRoute);
        assert_eq!("ROUTE_RANK".parse::<Selection>().unwrap(), Selection::RankRoute);
        for sel in Selection::ALL {
            assert_eq!(sel.to_string().parse::<Selection>().unwrap(), sel);
        }
        assert!("lottery".parse::<Selection>().is_err());
    }
}
