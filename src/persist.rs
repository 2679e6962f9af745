//! Storage of trained weight vectors.
//!
//! File formats are left to implementors of [`WeightStore`]; the crate
//! ships an in-memory store used by tests and sweeps.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::trainer::Algorithm;
use crate::types::Individual;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a training run, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainedWeights {
    /// Best chromosome found (the network weights).
    pub chromosome: Vec<f64>,
    /// Its training fitness.
    pub fitness: f64,
    /// Optimizer that produced it.
    pub algorithm: Algorithm,
}

impl TrainedWeights {
    /// Takes the chromosome and fitness of `best`.
    pub fn from_individual(best: Individual, algorithm: Algorithm) -> Self {
        Self {
            fitness: best.fitness,
            chromosome: best.chromosome,
            algorithm,
        }
    }

    /// The weights as an evaluated individual.
    pub fn to_individual(&self) -> Individual {
        Individual::with_fitness(self.chromosome.clone(), self.fitness)
    }
}

/// Persistence collaborator for trained weights.
pub trait WeightStore {
    /// Stores `weights` and returns the identifier to load them by.
    fn save(&mut self, weights: &TrainedWeights) -> Result<String>;

    /// Loads previously saved weights.
    ///
    /// Returns [`Error::NotFound`] for an unknown identifier.
    fn load(&self, id: &str) -> Result<TrainedWeights>;
}

/// Store that keeps weights in a map for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, TrainedWeights>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WeightStore for MemoryStore {
    fn save(&mut self, weights: &TrainedWeights) -> Result<String> {
        let id = format!("weights-{}", self.next_id);
        self.next_id += 1;
        self.entries.insert(id.clone(), weights.clone());
        Ok(id)
    }

    fn load(&self, id: &str) -> Result<TrainedWeights> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(fitness: f64) -> TrainedWeights {
        TrainedWeights {
            chromosome: vec![0.5, -1.25, 2.0],
            fitness,
            algorithm: Algorithm::HillClimb,
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let id = store.save(&weights(0.3)).unwrap();
        assert_eq!(store.load(&id).unwrap(), weights(0.3));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = MemoryStore::new();
        let a = store.save(&weights(0.3)).unwrap();
        let b = store.save(&weights(0.1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.load(&a).unwrap().fitness, 0.3);
        assert_eq!(store.load(&b).unwrap().fitness, 0.1);
    }

    #[test]
    fn test_unknown_id() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(matches!(store.load("missing"), Err(Error::NotFound(id)) if id == "missing"));
    }

    #[test]
    fn test_individual_conversion() {
        let ind = Individual::with_fitness(vec![1.0, 2.0], 0.7);
        let w = TrainedWeights::from_individual(ind.clone(), Algorithm::Evolutionary);
        assert_eq!(w.to_individual(), ind);
    }
}
