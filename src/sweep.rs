//! Parameter sweeps.
//!
//! A [`Sweep`] trains every labelled [`Trainer`] several times, scores each
//! trained chromosome on a training and a test cost function, and averages
//! the scores into one [`SweepRow`] per label.
//!
//! Run `r` of a case is seeded with `base_seed + r`, so every run owns its
//! own random stream and evaluation counter. With the `parallel` feature
//! the runs of one case execute on the rayon thread pool.

use std::io::Write;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::trainer::Trainer;
use crate::types::FitnessFunction;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One labelled configuration of a sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepCase {
    /// First CSV column, e.g. the value of the swept parameter.
    pub label: String,
    pub trainer: Trainer,
}

/// Averaged scores of one case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepRow {
    pub label: String,
    /// Mean training cost of the trained chromosomes.
    pub mean_train: f64,
    /// Mean test cost of the trained chromosomes.
    pub mean_test: f64,
}

impl SweepRow {
    /// Renders `label,train,test` with five decimals.
    ///
    /// ```
    /// use u_neuroevo::sweep::SweepRow;
    ///
    /// let row = SweepRow { label: "40".into(), mean_train: 0.1234567, mean_test: 0.2 };
    /// assert_eq!(row.to_csv_line(), "40,0.12346,0.20000");
    /// ```
    pub fn to_csv_line(&self) -> String {
        format!("{},{:.5},{:.5}", self.label, self.mean_train, self.mean_test)
    }
}

/// Appends one CSV line per row to `out`.
pub fn write_csv<W: Write + ?Sized>(out: &mut W, rows: &[SweepRow]) -> Result<()> {
    for row in rows {
        writeln!(out, "{}", row.to_csv_line())?;
    }
    out.flush()?;
    Ok(())
}

/// A list of cases, each trained `runs` times.
///
/// # Examples
///
/// ```
/// use u_neuroevo::sweep::Sweep;
/// use u_neuroevo::trainer::{Algorithm, Trainer};
/// use u_neuroevo::hill::HcConfig;
///
/// let train = |g: &[f64]| g.iter().map(|x| x * x).sum::<f64>();
/// let test = |g: &[f64]| g.iter().map(|x| (x - 0.1).powi(2)).sum::<f64>();
///
/// let mut sweep = Sweep::new(3, 100);
/// for rate in [0.1, 0.5] {
///     let trainer = Trainer::new(Algorithm::HillClimb)
///         .with_hc(HcConfig::default().with_mutate_rate(rate).with_max_iterations(200))
///         .with_chromosome_len(3);
///     sweep = sweep.with_case(rate.to_string(), trainer);
/// }
///
/// let rows = sweep.run(&train, &test).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].label, "0.1");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sweep {
    pub cases: Vec<SweepCase>,
    /// Training runs per case.
    pub runs: usize,
    /// Seed of run 0; run `r` uses `base_seed + r`.
    pub base_seed: u64,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            cases: Vec::new(),
            runs: 10,
            base_seed: 0,
        }
    }
}

impl Sweep {
    pub fn new(runs: usize, base_seed: u64) -> Self {
        Self {
            cases: Vec::new(),
            runs,
            base_seed,
        }
    }

    /// Appends a case.
    pub fn with_case(mut self, label: impl Into<String>, trainer: Trainer) -> Self {
        self.cases.push(SweepCase {
            label: label.into(),
            trainer,
        });
        self
    }

    /// Validates the sweep and every case.
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(Error::InvalidConfig("runs must be at least 1".into()));
        }
        for case in &self.cases {
            case.trainer.validate()?;
        }
        Ok(())
    }

    /// Runs every case and returns one row per case, in order.
    ///
    /// The first failing run aborts the sweep.
    pub fn run<T, U>(&self, train: &T, test: &U) -> Result<Vec<SweepRow>>
    where
        T: FitnessFunction + Sync + ?Sized,
        U: FitnessFunction + Sync + ?Sized,
    {
        self.validate()?;
        info!(
            cases = self.cases.len(),
            runs = self.runs,
            base_seed = self.base_seed,
            "starting sweep"
        );

        let mut rows = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let scores = self.run_case(case, train, test)?;
            let n = scores.len() as f64;
            let (sum_train, sum_test) = scores
                .iter()
                .fold((0.0, 0.0), |(a, b), (tr, te)| (a + tr, b + te));
            let row = SweepRow {
                label: case.label.clone(),
                mean_train: sum_train / n,
                mean_test: sum_test / n,
            };
            debug!(
                label = %row.label,
                mean_train = row.mean_train,
                mean_test = row.mean_test,
                "sweep case complete"
            );
            rows.push(row);
        }
        Ok(rows)
    }

    /// Runs the sweep and appends its rows to `out`.
    pub fn run_to_csv<T, U, W>(&self, train: &T, test: &U, out: &mut W) -> Result<Vec<SweepRow>>
    where
        T: FitnessFunction + Sync + ?Sized,
        U: FitnessFunction + Sync + ?Sized,
        W: Write + ?Sized,
    {
        let rows = self.run(train, test)?;
        write_csv(out, &rows)?;
        Ok(rows)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_case<T, U>(&self, case: &SweepCase, train: &T, test: &U) -> Result<Vec<(f64, f64)>>
    where
        T: FitnessFunction + Sync + ?Sized,
        U: FitnessFunction + Sync + ?Sized,
    {
        (0..self.runs)
            .map(|r| score_run(case, self.base_seed.wrapping_add(r as u64), train, test))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_case<T, U>(&self, case: &SweepCase, train: &T, test: &U) -> Result<Vec<(f64, f64)>>
    where
        T: FitnessFunction + Sync + ?Sized,
        U: FitnessFunction + Sync + ?Sized,
    {
        (0..self.runs)
            .into_par_iter()
            .map(|r| score_run(case, self.base_seed.wrapping_add(r as u64), train, test))
            .collect()
    }
}

/// Trains once and re-scores the weights on both cost functions.
fn score_run<T, U>(case: &SweepCase, seed: u64, train: &T, test: &U) -> Result<(f64, f64)>
where
    T: FitnessFunction + ?Sized,
    U: FitnessFunction + ?Sized,
{
    let weights = case.trainer.clone().with_seed(seed).train(train)?;
    let train_score = checked(train.evaluate(&weights.chromosome))?;
    let test_score = checked(test.evaluate(&weights.chromosome))?;
    Ok((train_score, test_score))
}

fn checked(value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidFitness { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, Initialisation};
    use crate::hill::HcConfig;
    use crate::trainer::Algorithm;

    fn train_cost(genes: &[f64]) -> f64 {
        genes.iter().map(|g| g * g).sum()
    }

    fn test_cost(genes: &[f64]) -> f64 {
        genes.iter().map(|g| (g - 0.5).abs()).sum()
    }

    fn ga_trainer(population: usize) -> Trainer {
        Trainer::new(Algorithm::Evolutionary)
            .with_ga(
                GaConfig::default()
                    .with_population_size(population)
                    .with_tournament_size(2)
                    .with_initialisation(Initialisation::Random)
                    .with_max_evaluations(200),
            )
            .with_chromosome_len(3)
    }

    #[test]
    fn test_one_row_per_case() {
        let sweep = Sweep::new(2, 7)
            .with_case("10", ga_trainer(10))
            .with_case("20", ga_trainer(20));
        let rows = sweep.run(&train_cost, &test_cost).unwrap();
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["10", "20"]);
        assert!(rows.iter().all(|r| r.mean_train >= 0.0 && r.mean_test >= 0.0));
    }

    #[test]
    fn test_mean_matches_manual_runs() {
        let trainer = Trainer::new(Algorithm::HillClimb)
            .with_hc(HcConfig::default().with_max_iterations(500))
            .with_chromosome_len(3);
        let sweep = Sweep::new(3, 40).with_case("hc", trainer);
        let row = &sweep.run(&train_cost, &test_cost).unwrap()[0];

        let mut sum_train = 0.0;
        let mut sum_test = 0.0;
        for r in 0..3u64 {
            let w = sweep.cases[0]
                .trainer
                .clone()
                .with_seed(40 + r)
                .train(&train_cost)
                .unwrap();
            sum_train += train_cost(&w.chromosome);
            sum_test += test_cost(&w.chromosome);
        }
        assert!((row.mean_train - sum_train / 3.0).abs() < 1e-12);
        assert!((row.mean_test - sum_test / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reproducible() {
        let sweep = Sweep::new(2, 1).with_case("a", ga_trainer(8));
        let a = sweep.run(&train_cost, &test_cost).unwrap();
        let b = sweep.run(&train_cost, &test_cost).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_csv_output() {
        let rows = vec![
            SweepRow {
                label: "Tournament".into(),
                mean_train: 0.05,
                mean_test: 0.123456,
            },
            SweepRow {
                label: "Roulette".into(),
                mean_train: 1.0,
                mean_test: 2.0,
            },
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Tournament,0.05000,0.12346\nRoulette,1.00000,2.00000\n");
    }

    #[test]
    fn test_zero_runs_rejected() {
        let sweep = Sweep::new(0, 1).with_case("a", ga_trainer(8));
        assert!(matches!(
            sweep.run(&train_cost, &test_cost),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_case_rejected_before_running() {
        let sweep = Sweep::new(1, 1)
            .with_case("ok", ga_trainer(8))
            .with_case("bad", ga_trainer(8).with_chromosome_len(0));
        assert!(sweep.run(&train_cost, &test_cost).is_err());
    }
}
