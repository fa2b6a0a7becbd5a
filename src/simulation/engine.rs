//! Deterministic cash trajectory simulator

use crate::model::{AllocationStrategy, ParameterSet};
use crate::scenario::ScenarioDefinition;

use super::state::PoolState;
use super::trajectory::{TrajectoryResult, TrajectoryRow};

/// Projects month-by-month pool balances for one (parameters, scenario,
/// allocation) triple.
///
/// The computation is finite and one-shot: capital is split once at month
/// zero, then each month the net operating cash flow lands in the reserve
/// pool and all pools compound at their scenario-scaled rates. Simulation
/// stops after `protected_months` months or at the month the reserve goes
/// negative, whichever comes first.
#[derive(Debug, Clone, Default)]
pub struct TrajectorySimulator;

impl TrajectorySimulator {
    pub fn new() -> Self {
        Self
    }

    /// Run one trajectory
    pub fn simulate(
        &self,
        params: &ParameterSet,
        scenario: &ScenarioDefinition,
        allocation: &AllocationStrategy,
    ) -> TrajectoryResult {
        let revenue = params.monthly_revenue_expected * scenario.revenue_multiplier;
        let expenses = params.monthly_expenses() * scenario.expense_multiplier;
        // Expenses never appear as a divisor here, so an all-zero expense
        // base is plain arithmetic: net flow = effective revenue.
        let net_cash_flow = revenue - expenses;

        let mut state = PoolState::from_allocation(params, allocation);
        let mut rows = Vec::with_capacity(params.protected_months as usize);
        let mut months_to_zero = None;

        for month in 1..=params.protected_months {
            state.month = month;
            state.reserve += net_cash_flow;
            state.apply_returns(params, scenario);

            rows.push(TrajectoryRow {
                month,
                net_cash_flow,
                reserve: state.reserve,
                growth: state.growth,
                risk: state.risk,
                total: state.total(),
            });

            if state.reserve < 0.0 {
                months_to_zero = Some(month);
                break;
            }
        }

        let survived = months_to_zero.is_none();
        TrajectoryResult {
            scenario: scenario.kind,
            rows,
            months_to_zero,
            survived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioKind;
    use approx::assert_relative_eq;

    fn params_no_returns(
        capital: f64,
        revenue: f64,
        fixed: f64,
        variable: f64,
        months: u32,
    ) -> ParameterSet {
        ParameterSet::new(capital, revenue, fixed, variable, 0.0, 0.5, months, 0.0, 0.0, 0.0)
            .unwrap()
    }

    #[test]
    fn test_surplus_grows_reserve() {
        let params = params_no_returns(10_000.0, 6_000.0, 5_000.0, 0.0, 6);
        let allocation = AllocationStrategy::new(100.0, 0.0, 0.0).unwrap();
        let result = TrajectorySimulator::new().simulate(
            &params,
            &ScenarioDefinition::neutral(),
            &allocation,
        );

        assert!(result.survived);
        assert_eq!(result.months_to_zero, None);
        assert_eq!(result.rows.len(), 6);
        // +1000/month with zero returns
        assert_relative_eq!(result.rows[0].total, 11_000.0);
        assert_relative_eq!(result.final_balance(), 16_000.0);
    }

    #[test]
    fn test_depletion_month_is_first_negative() {
        // 10k reserve, -5k/month: months run 5000, 0, -5000 -> dry at month 3
        let params = params_no_returns(10_000.0, 0.0, 5_000.0, 0.0, 6);
        let allocation = AllocationStrategy::new(100.0, 0.0, 0.0).unwrap();
        let result = TrajectorySimulator::new().simulate(
            &params,
            &ScenarioDefinition::neutral(),
            &allocation,
        );

        assert!(!result.survived);
        assert_eq!(result.months_to_zero, Some(3));
        assert_eq!(result.rows.len(), 3);
        assert_relative_eq!(result.rows[1].reserve, 0.0);
        assert!(result.rows[2].reserve < 0.0);
    }

    #[test]
    fn test_exact_cover_of_one_protected_month_survives() {
        // Bad scenario expenses = 5000 * 1.2 = 6000; reserve of exactly 6000
        // lands on zero, which is not depletion.
        let params = params_no_returns(6_000.0, 0.0, 5_000.0, 0.0, 1);
        let allocation = AllocationStrategy::new(100.0, 0.0, 0.0).unwrap();
        let result =
            TrajectorySimulator::new().simulate(&params, &ScenarioDefinition::bad(), &allocation);

        assert!(result.survived);
        assert_eq!(result.months_to_zero, None);
        assert_relative_eq!(result.rows[0].reserve, 0.0);
    }

    #[test]
    fn test_growth_and_risk_only_compound() {
        let params = ParameterSet::with_default_returns(
            100_000.0, 15_000.0, 8_000.0, 3_000.0, 0.15, 0.3, 6,
        )
        .unwrap();
        let allocation = AllocationStrategy::new(60.0, 30.0, 10.0).unwrap();
        let result = TrajectorySimulator::new().simulate(
            &params,
            &ScenarioDefinition::neutral(),
            &allocation,
        );

        // Operating flow never touches growth/risk; they compound at their own rates
        assert_relative_eq!(result.rows[0].growth, 30_000.0 * 1.01, epsilon = 1e-9);
        assert_relative_eq!(result.rows[0].risk, 10_000.0 * 1.05, epsilon = 1e-9);
        assert_relative_eq!(
            result.rows[5].risk,
            10_000.0 * 1.05f64.powi(6),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_bad_scenario_multipliers_applied() {
        let params = ParameterSet::with_default_returns(
            100_000.0, 15_000.0, 8_000.0, 3_000.0, 0.15, 0.3, 6,
        )
        .unwrap();
        let allocation = AllocationStrategy::new(60.0, 30.0, 10.0).unwrap();
        let result =
            TrajectorySimulator::new().simulate(&params, &ScenarioDefinition::bad(), &allocation);

        assert_eq!(result.scenario, ScenarioKind::Bad);
        // net = 15000*0.7 - 11000*1.2 = -2700
        assert_relative_eq!(result.rows[0].net_cash_flow, -2_700.0);
        // reserve m1 = (60000 - 2700) * (1 + 0.009*0.5)
        assert_relative_eq!(result.rows[0].reserve, 57_300.0 * 1.0045, epsilon = 1e-6);
        assert!(result.survived);
    }

    #[test]
    fn test_zero_expenses_is_defined_arithmetic() {
        let params = params_no_returns(1_000.0, 2_000.0, 0.0, 0.0, 3);
        let allocation = AllocationStrategy::new(50.0, 25.0, 25.0).unwrap();
        let result =
            TrajectorySimulator::new().simulate(&params, &ScenarioDefinition::bad(), &allocation);

        // Bad revenue multiplier still applies: +1400/month into the reserve
        assert_relative_eq!(result.rows[0].net_cash_flow, 1_400.0);
        assert!(result.survived);
    }
}
