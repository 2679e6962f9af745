//! Crossover strategies for real-valued chromosomes.
//!
//! Every strategy takes two parents of equal, non-zero length and returns
//! one or two unevaluated children.
//!
//! # References
//!
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution
//!   Programs* (arithmetic crossover)
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::config::canonical_name;
use crate::error::{Error, Result};
use crate::types::Individual;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recombination strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// One child whose genes are the mean of the parents' genes.
    Arithmetic,

    /// Two children; one cut in `[0, len)`. Genes before the cut follow
    /// the parents, genes at or after it are swapped.
    #[default]
    OnePoint,

    /// Two children; `cut1` in `[0, len)`, `cut2` in `[cut1, len]`. The
    /// segment `[cut1, cut2)` is swapped.
    TwoPoint,

    /// Two children; a fair coin per position decides which parent child 1
    /// copies, and child 2 takes the other.
    Uniform,
}

impl Crossover {
    /// All variants, in declaration order.
    pub const ALL: [Crossover; 4] = [
        Crossover::Arithmetic,
        Crossover::OnePoint,
        Crossover::TwoPoint,
        Crossover::Uniform,
    ];

    /// Recombines two parents.
    ///
    /// # Errors
    ///
    /// [`Error::Degenerate`] if the parents differ in length or are empty.
    pub fn apply<R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut R,
    ) -> Result<Vec<Individual>> {
        let p1 = &parent1.chromosome;
        let p2 = &parent2.chromosome;
        let n = p1.len();
        if n != p2.len() {
            return Err(Error::Degenerate(format!(
                "parents differ in length: {n} vs {}",
                p2.len()
            )));
        }
        if n == 0 {
            return Err(Error::Degenerate("zero-length chromosome".into()));
        }

        let children = match self {
            Crossover::Arithmetic => {
                let genes = p1.iter().zip(p2).map(|(a, b)| (a + b) / 2.0).collect();
                vec![Individual::new(genes)]
            }
            Crossover::OnePoint => {
                let cut = rng.random_range(0..n);
                let (c1, c2) = swap_segment(p1, p2, cut, n);
                vec![Individual::new(c1), Individual::new(c2)]
            }
            Crossover::TwoPoint => {
                let cut1 = rng.random_range(0..n);
                let cut2 = cut1 + rng.random_range(0..=n - cut1);
                let (c1, c2) = swap_segment(p1, p2, cut1, cut2);
                vec![Individual::new(c1), Individual::new(c2)]
            }
            Crossover::Uniform => {
                let mut c1 = Vec::with_capacity(n);
                let mut c2 = Vec::with_capacity(n);
                for (&a, &b) in p1.iter().zip(p2) {
                    if rng.random_bool(0.5) {
                        c1.push(a);
                        c2.push(b);
                    } else {
                        c1.push(b);
                        c2.push(a);
                    }
                }
                vec![Individual::new(c1), Individual::new(c2)]
            }
        };
        Ok(children)
    }
}

/// Children that mirror the parents except on `[start, end)`, where they
/// are swapped.
fn swap_segment(p1: &[f64], p2: &[f64], start: usize, end: usize) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    c1[start..end].copy_from_slice(&p2[start..end]);
    c2[start..end].copy_from_slice(&p1[start..end]);
    (c1, c2)
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Crossover::Arithmetic => "Arithmetic",
            Crossover::OnePoint => "OnePoint",
            Crossover::TwoPoint => "TwoPoint",
            Crossover::Uniform => "Uniform",
        };
        f.write_str(name)
    }
}

impl FromStr for Crossover {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_name(s).as_str() {
            "arithmetic" => Ok(Crossover::Arithmetic),
            "onepoint" => Ok(Crossover::OnePoint),
            "twopoint" => Ok(Crossover::TwoPoint),
            "uniform" => Ok(Crossover::Uniform),
            _ => Err(Error::UnknownStrategy {
                kind: "crossover",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::Rng;

    fn parents(n: usize) -> (Individual, Individual) {
        let p1 = Individual::with_fitness((0..n).map(|i| i as f64).collect(), 0.1);
        let p2 = Individual::with_fitness((0..n).map(|i| -(i as f64) - 100.0).collect(), 0.2);
        (p1, p2)
    }

    #[test]
    fn test_arithmetic_single_child_mean() {
        let (p1, p2) = parents(6);
        let mut rng = create_rng(1);
        let children = Crossover::Arithmetic.apply(&p1, &p2, &mut rng).unwrap();
        assert_eq!(children.len(), 1);
        for i in 0..6 {
            assert_eq!(
                children[0].chromosome[i],
                (p1.chromosome[i] + p2.chromosome[i]) / 2.0
            );
        }
        assert!(!children[0].is_evaluated());
    }

    #[test]
    fn test_one_point_prefix_suffix() {
        let (p1, p2) = parents(10);
        let mut rng = create_rng(3);
        let children = Crossover::OnePoint.apply(&p1, &p2, &mut rng).unwrap();
        assert_eq!(children.len(), 2);

        let mut check = create_rng(3);
        let cut = check.random_range(0..10);
        for i in 0..10 {
            let (a, b) = if i < cut {
                (p1.chromosome[i], p2.chromosome[i])
            } else {
                (p2.chromosome[i], p1.chromosome[i])
            };
            assert_eq!(children[0].chromosome[i], a);
            assert_eq!(children[1].chromosome[i], b);
        }
    }

    #[test]
    fn test_two_point_segment_swapped() {
        let (p1, p2) = parents(12);
        for seed in 0..50 {
            let mut rng = create_rng(seed);
            let children = Crossover::TwoPoint.apply(&p1, &p2, &mut rng).unwrap();

            let mut check = create_rng(seed);
            let cut1 = check.random_range(0..12);
            let cut2 = cut1 + check.random_range(0..=12 - cut1);
            assert!(cut2 <= 12);
            for i in 0..12 {
                let swapped = i >= cut1 && i < cut2;
                let expect1 = if swapped { p2.chromosome[i] } else { p1.chromosome[i] };
                assert_eq!(children[0].chromosome[i], expect1);
            }
        }
    }

    #[test]
    fn test_uniform_children_complementary() {
        let (p1, p2) = parents(20);
        let mut rng = create_rng(9);
        let children = Crossover::Uniform.apply(&p1, &p2, &mut rng).unwrap();
        for i in 0..20 {
            let a = children[0].chromosome[i];
            let b = children[1].chromosome[i];
            assert!(
                (a == p1.chromosome[i] && b == p2.chromosome[i])
                    || (a == p2.chromosome[i] && b == p1.chromosome[i])
            );
        }
    }

    #[test]
    fn test_single_gene() {
        let (p1, p2) = parents(1);
        let mut rng = create_rng(0);
        for crossover in Crossover::ALL {
            let children = crossover.apply(&p1, &p2, &mut rng).unwrap();
            assert!(children.iter().all(|c| c.len() == 1));
        }
    }

    #[test]
    fn test_degenerate_parents() {
        let mut rng = create_rng(0);
        let empty = Individual::new(vec![]);
        let short = Individual::new(vec![1.0]);
        let long = Individual::new(vec![1.0, 2.0]);
        for crossover in Crossover::ALL {
            assert!(matches!(
                crossover.apply(&empty, &empty, &mut rng),
                Err(Error::Degenerate(_))
            ));
            assert!(crossover.apply(&short, &long, &mut rng).is_err());
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("one_point".parse::<Crossover>().unwrap(), Crossover::OnePoint);
        assert_eq!("Two-Point".parse::<Crossover>().unwrap(), Crossover::TwoPoint);
        for c in Crossover::ALL {
            assert_eq!(c.to_string().parse::<Crossover>().unwrap(), c);
        }
        assert!("blx".parse::<Crossover>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_exchange_crossovers_never_blend(
            genes in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..40),
            seed in any::<u64>(),
        ) {
            let p1 = Individual::new(genes.iter().map(|g| g.0).collect());
            let p2 = Individual::new(genes.iter().map(|g| g.1).collect());
            let mut rng = create_rng(seed);
            for crossover in [Crossover::OnePoint, Crossover::TwoPoint, Crossover::Uniform] {
                let children = crossover.apply(&p1, &p2, &mut rng).unwrap();
                prop_assert_eq!(children.len(), 2);
                for child in &children {
                    prop_assert_eq!(child.len(), p1.len());
                    for (i, g) in child.chromosome.iter().enumerate() {
                        prop_assert!(*g == p1.chromosome[i] || *g == p2.chromosome[i]);
                    }
                }
            }
        }

        #[test]
        fn prop_arithmetic_is_exact_mean(
            genes in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..40),
        ) {
            let p1 = Individual::new(genes.iter().map(|g| g.0).collect());
            let p2 = Individual::new(genes.iter().map(|g| g.1).collect());
            let mut rng = create_rng(0);
            let child = &Crossover::Arithmetic.apply(&p1, &p2, &mut rng).unwrap()[0];
            for (i, g) in child.chromosome.iter().enumerate() {
                prop_assert_eq!(*g, (p1.chromosome[i] + p2.chromosome[i]) / 2.0);
            }
        }
    }
}
