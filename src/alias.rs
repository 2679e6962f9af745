//! Walker's alias method for O(1) weighted sampling.
//!
//! Building the table is O(n); each draw costs one uniform variate and a
//! single comparison.
//!
//! # References
//!
//! - Walker (1977), "An Efficient Method for Generating Discrete Random
//!   Variables with General Distributions"
//! - Vose (1991), "A Linear Algorithm for Generating Random Numbers with a
//!   Given Distribution"

use rand::Rng;

use crate::error::{Error, Result};

/// Divides every entry by the L1 norm (sum of absolute values).
///
/// Leaves the slice untouched when the norm is zero.
pub fn l1_normalize(weights: &mut [f64]) {
    let norm: f64 = weights.iter().map(|w| w.abs()).sum();
    if norm == 0.0 {
        return;
    }
    for w in weights.iter_mut() {
        *w /= norm;
    }
}

/// Precomputed alias table over `n` outcomes.
///
/// # Examples
///
/// ```
/// use u_neuroevo::AliasTable;
/// use u_neuroevo::random::create_rng;
///
/// let table = AliasTable::new(&[0.1, 0.3, 0.6]).unwrap();
/// let mut rng = create_rng(42);
/// let idx = table.sample(&mut rng);
/// assert!(idx < 3);
/// ```
#[derive(Debug, Clone)]
pub struct AliasTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Builds a table from non-negative weights.
    ///
    /// Weights are L1-normalized first, so already-normalized input is
    /// used as-is.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `weights` is empty, contains a negative
    /// or non-finite entry, or sums to zero.
    pub fn new(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidInput(
                "alias table needs at least one weight".into(),
            ));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::InvalidInput(format!(
                "alias weights must be finite and non-negative, got {w}"
            )));
        }

        let mut p = weights.to_vec();
        if p.iter().all(|&w| w == 0.0) {
            return Err(Error::InvalidInput("alias weights sum to zero".into()));
        }
        l1_normalize(&mut p);

        let n = p.len();
        let mut prob: Vec<f64> = p.iter().map(|&w| w * n as f64).collect();
        let mut alias: Vec<usize> = (0..n).collect();

        let mut over: Vec<usize> = Vec::with_capacity(n);
        let mut under: Vec<usize> = Vec::with_capacity(n);
        for (i, &q) in prob.iter().enumerate() {
            if q >= 1.0 {
                over.push(i);
            } else {
                under.push(i);
            }
        }

        // Pair the last underfull slot with the last overfull donor.
        while !over.is_empty() && !under.is_empty() {
            let k = over[over.len() - 1];
            let j = under[under.len() - 1];
            under.pop();
            alias[j] = k;
            prob[k] += prob[j] - 1.0;
            if prob[k] < 1.0 {
                over.pop();
                under.push(k);
            }
        }

        Ok(Self { prob, alias })
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Draws an index with probability proportional to its weight.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.prob.len();
        let scaled = rng.random::<f64>() * n as f64;
        let k = (scaled as usize).min(n - 1);
        let r = scaled - k as f64;
        if r < self.prob[k] {
            k
        } else {
            self.alias[k]
        }
    }
}
