//! Allocation evaluation: three deterministic scenarios plus a stochastic run

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ModelError;
use crate::model::{AllocationStrategy, ParameterSet};
use crate::scenario::ScenarioDefinition;
use crate::simulation::{TrajectoryResult, TrajectorySimulator};
use crate::stochastic::{MonteCarloResult, SamplerConfig, StochasticSampler, DEFAULT_TRIALS};

/// Minimum Bad-scenario survival probability for a valid allocation
pub const SURVIVAL_PROBABILITY_THRESHOLD: f64 = 0.70;

/// Configuration for an evaluation run
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Estimate Bad-scenario survival with Monte Carlo trials. When off, the
    /// probability collapses to 1.0/0.0 from the deterministic Bad run (a
    /// cheap path for callers that trade precision for speed).
    pub monte_carlo_enabled: bool,

    /// Trial count for the stochastic run
    pub trials: u32,

    /// Seed for reproducible stochastic runs
    pub seed: Option<u64>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            monte_carlo_enabled: true,
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

/// Complete outcome of evaluating one allocation against one parameter set.
///
/// Built once per evaluate call, read-only afterwards; export and plotting
/// consumers get every field.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// The central business rule: Bad-scenario survival probability at or
    /// above threshold AND the deterministic Bad run never depletes
    pub is_valid: bool,

    /// Survival probability under the Bad scenario (stochastic when Monte
    /// Carlo is enabled, else binary from the deterministic run)
    pub survival_probability_bad: f64,

    /// Depletion month of the deterministic Bad run, if any
    pub months_to_zero_bad: Option<u32>,

    pub good: TrajectoryResult,
    pub neutral: TrajectoryResult,
    pub bad: TrajectoryResult,

    /// Present when Monte Carlo was enabled
    pub monte_carlo: Option<MonteCarloResult>,

    /// Absolute pool values at month zero
    pub reserve_value: f64,
    pub growth_value: f64,
    pub risk_value: f64,

    pub params: ParameterSet,
    pub allocation: AllocationStrategy,

    pub generated_at: DateTime<Utc>,
}

/// Orchestrates the deterministic scenario runs and the stochastic run, then
/// applies the validity rule.
#[derive(Debug, Clone, Default)]
pub struct AllocationEvaluator {
    config: EvaluatorConfig,
}

impl AllocationEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate one allocation.
    ///
    /// Input invariants are enforced when [`ParameterSet`] and
    /// [`AllocationStrategy`] are constructed, so the only failure left here
    /// is a non-positive trial count on the stochastic path.
    pub fn evaluate(
        &self,
        params: &ParameterSet,
        allocation: &AllocationStrategy,
    ) -> Result<EvaluationResult, ModelError> {
        let simulator = TrajectorySimulator::new();

        let good = simulator.simulate(params, &ScenarioDefinition::good(), allocation);
        let neutral = simulator.simulate(params, &ScenarioDefinition::neutral(), allocation);
        let bad = simulator.simulate(params, &ScenarioDefinition::bad(), allocation);

        let monte_carlo = if self.config.monte_carlo_enabled {
            let sampler = StochasticSampler::new(SamplerConfig {
                trials: self.config.trials,
                seed: self.config.seed,
            });
            Some(sampler.run(params, allocation)?)
        } else {
            None
        };

        let survival_probability_bad = match &monte_carlo {
            Some(mc) => mc.survival_probability,
            None => {
                if bad.survived {
                    1.0
                } else {
                    0.0
                }
            }
        };

        // Both conditions are required: a high stochastic probability does
        // not excuse a deterministic worst-case depletion, and vice versa.
        let is_valid = survival_probability_bad >= SURVIVAL_PROBABILITY_THRESHOLD
            && bad.months_to_zero.is_none();

        log::info!(
            "evaluated {:.1}/{:.1}/{:.1}: p_bad={:.3}, months_to_zero={:?}, valid={}",
            allocation.reserve_pct(),
            allocation.growth_pct(),
            allocation.risk_pct(),
            survival_probability_bad,
            bad.months_to_zero,
            is_valid
        );

        let (reserve_value, growth_value, risk_value) = allocation.split(params.capital_on_hand);

        Ok(EvaluationResult {
            is_valid,
            survival_probability_bad,
            months_to_zero_bad: bad.months_to_zero,
            good,
            neutral,
            bad,
            monte_carlo,
            reserve_value,
            growth_value,
            risk_value,
            params: params.clone(),
            allocation: *allocation,
            generated_at: Utc::now(),
        })
    }
}
