//! Randomized Bad-scenario trials
//!
//! Each trial draws revenue and return multipliers around the Bad baseline
//! and delegates the resulting scenario to the deterministic simulator. The
//! draw is Normal, centered on the baseline, with standard deviation equal
//! to the operator's revenue volatility and clipped at zero; the expense
//! multiplier is held at the Bad baseline. Wider volatility therefore always
//! widens the outcome distribution, never tightens it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::ModelError;
use crate::model::{AllocationStrategy, ParameterSet};
use crate::scenario::ScenarioDefinition;
use crate::simulation::TrajectorySimulator;

/// Default number of trials per run
pub const DEFAULT_TRIALS: u32 = 500;

/// Sampler configuration
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Number of independent trials; must be positive
    pub trials: u32,

    /// Base seed for reproducible runs. None draws one from entropy, giving
    /// a statistically stable but non-repeatable result.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

/// Distribution of months-to-zero among failed trials
#[derive(Debug, Clone, Serialize)]
pub struct DepletionSummary {
    /// Number of trials that depleted within the horizon
    pub failures: u32,

    /// Mean month of depletion
    pub mean_months_to_zero: f64,

    pub p10_months_to_zero: u32,
    pub p50_months_to_zero: u32,
    pub p90_months_to_zero: u32,
}

/// Aggregate outcome of one Monte Carlo run
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloResult {
    pub trials: u32,
    pub survival_count: u32,

    /// Fraction of trials where the reserve stayed funded
    pub survival_probability: f64,

    /// Present only when at least one trial failed
    pub depletion: Option<DepletionSummary>,
}

/// Draws randomized Bad-variant scenarios and measures empirical survival.
///
/// Trials are independent and run in parallel; each derives its own RNG from
/// the base seed and its trial index, so a seeded run is bit-identical
/// regardless of thread count.
#[derive(Debug, Clone, Default)]
pub struct StochasticSampler {
    config: SamplerConfig,
}

impl StochasticSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Run the configured number of trials for one allocation
    pub fn run(
        &self,
        params: &ParameterSet,
        allocation: &AllocationStrategy,
    ) -> Result<MonteCarloResult, ModelError> {
        if self.config.trials == 0 {
            return Err(ModelError::InvalidTrialCount);
        }

        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let baseline = ScenarioDefinition::bad();
        let spread = params.revenue_volatility;
        let simulator = TrajectorySimulator::new();

        log::debug!(
            "monte carlo: {} trials, base seed {}, spread {:.4}",
            self.config.trials,
            base_seed,
            spread
        );

        let outcomes: Vec<Option<u32>> = (0..self.config.trials)
            .into_par_iter()
            .map(|trial| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
                let revenue_mult =
                    draw_multiplier(&mut rng, baseline.revenue_multiplier, spread);
                let return_mult = draw_multiplier(&mut rng, baseline.return_multiplier, spread);
                let scenario = ScenarioDefinition::bad_variant(
                    revenue_mult,
                    baseline.expense_multiplier,
                    return_mult,
                );
                simulator.simulate(params, &scenario, allocation).months_to_zero
            })
            .collect();

        Ok(aggregate(self.config.trials, &outcomes))
    }
}

/// Normal draw around a baseline multiplier, clipped at zero. Zero spread
/// degenerates to the baseline itself.
fn draw_multiplier(rng: &mut StdRng, baseline: f64, spread: f64) -> f64 {
    if spread <= 0.0 {
        return baseline;
    }
    match Normal::new(baseline, spread) {
        Ok(normal) => normal.sample(rng).max(0.0),
        Err(_) => baseline,
    }
}

fn aggregate(trials: u32, outcomes: &[Option<u32>]) -> MonteCarloResult {
    let mut depletion_months: Vec<u32> = outcomes.iter().filter_map(|o| *o).collect();
    let survival_count = trials - depletion_months.len() as u32;
    let survival_probability = survival_count as f64 / trials as f64;

    let depletion = if depletion_months.is_empty() {
        None
    } else {
        depletion_months.sort_unstable();
        let sum: u64 = depletion_months.iter().map(|&m| m as u64).sum();
        Some(DepletionSummary {
            failures: depletion_months.len() as u32,
            mean_months_to_zero: sum as f64 / depletion_months.len() as f64,
            p10_months_to_zero: percentile(&depletion_months, 0.10),
            p50_months_to_zero: percentile(&depletion_months, 0.50),
            p90_months_to_zero: percentile(&depletion_months, 0.90),
        })
    };

    MonteCarloResult {
        trials,
        survival_count,
        survival_probability,
        depletion,
    }
}

fn percentile(sorted: &[u32], p: f64) -> u32 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
