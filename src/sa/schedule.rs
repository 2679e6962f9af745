//! Acceptance criterion and geometric cooling.
//!
//! Shared by [`SaRunner`](super::SaRunner) and the GA's annealing mutation.

/// Probability of moving from a state with cost `current` to one with cost
/// `candidate` at the given temperature.
///
/// Returns `1.0` for a strict improvement, otherwise the Metropolis term
/// `exp((current - candidate) / temperature)`.
///
/// ```
/// use u_neuroevo::sa::acceptance;
///
/// assert_eq!(acceptance(2.0, 1.0, 10.0), 1.0);
/// assert!((acceptance(1.0, 2.0, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn acceptance(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate < current {
        1.0
    } else {
        ((current - candidate) / temperature).exp()
    }
}

/// Temperature that decays geometrically: `T_{k+1} = T_k * (1 - cooling_rate)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    value: f64,
    cooling_rate: f64,
}

impl Temperature {
    /// Starts at `initial` and loses `cooling_rate` of its value per step.
    pub fn new(initial: f64, cooling_rate: f64) -> Self {
        Self {
            value: initial,
            cooling_rate,
        }
    }

    /// Current temperature.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Applies one cooling step.
    pub fn cool(&mut self) {
        self.value *= 1.0 - self.cooling_rate;
    }

    /// Closed form of the temperature after `steps` cooling steps.
    pub fn after(initial: f64, cooling_rate: f64, steps: usize) -> f64 {
        initial * (1.0 - cooling_rate).powf(steps as f64)
    }
}
