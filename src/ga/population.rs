//! Ordered, mutable population store.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Individual;

/// The GA's working population.
///
/// Order matters: tournament strategies shuffle it in place, and rank
/// selection weights members by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    /// Wraps existing members.
    pub fn new(members: Vec<Individual>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in their current order.
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Vec<Individual> {
        &mut self.members
    }

    /// Consumes the store.
    pub fn into_members(self) -> Vec<Individual> {
        self.members
    }

    /// Lowest-fitness member; the first one wins ties.
    pub fn best(&self) -> Option<&Individual> {
        let mut best: Option<&Individual> = None;
        for ind in &self.members {
            if best.is_none_or(|b| ind.fitness < b.fitness) {
                best = Some(ind);
            }
        }
        best
    }

    /// Index of the highest-fitness member; the first one wins ties.
    pub fn worst_index(&self) -> Option<usize> {
        let mut worst: Option<usize> = None;
        for (i, ind) in self.members.iter().enumerate() {
            if worst.is_none_or(|w| ind.fitness > self.members[w].fitness) {
                worst = Some(i);
            }
        }
        worst
    }

    /// Mean fitness, or `None` when empty.
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.members.is_empty() {
            return None;
        }
        let sum: f64 = self.members.iter().map(|i| i.fitness).sum();
        Some(sum / self.members.len() as f64)
    }

    /// Shuffles member order in place.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.members.shuffle(rng);
    }
}

impl From<Vec<Individual>> for Population {
    fn from(members: Vec<Individual>) -> Self {
        Self::new(members)
    }
}
