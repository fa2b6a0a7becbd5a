//! Pool balances tracked during a trajectory simulation

use crate::model::{AllocationStrategy, ParameterSet};
use crate::scenario::ScenarioDefinition;

/// Balances of the three capital pools at a point in the simulation
#[derive(Debug, Clone)]
pub struct PoolState {
    /// Current month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Liquid safety reserve; absorbs operating surpluses and shortfalls
    pub reserve: f64,

    /// Growth pool; compounds, never drawn down for operating needs
    pub growth: f64,

    /// High-risk pool; compounds, never drawn down for operating needs
    pub risk: f64,
}

impl PoolState {
    /// Split the capital once at month zero according to the allocation
    pub fn from_allocation(params: &ParameterSet, allocation: &AllocationStrategy) -> Self {
        let (reserve, growth, risk) = allocation.split(params.capital_on_hand);
        Self {
            month: 0,
            reserve,
            growth,
            risk,
        }
    }

    /// Total balance across all three pools
    pub fn total(&self) -> f64 {
        self.reserve + self.growth + self.risk
    }

    /// Compound each pool one month at its rate scaled by the scenario's
    /// return multiplier
    pub fn apply_returns(&mut self, params: &ParameterSet, scenario: &ScenarioDefinition) {
        let m = scenario.return_multiplier;
        self.reserve *= 1.0 + params.safe_return_rate * m;
        self.growth *= 1.0 + params.medium_return_rate * m;
        self.risk *= 1.0 + params.high_return_rate * m;
    }
}
