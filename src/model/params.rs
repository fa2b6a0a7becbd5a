//! Operator financial parameters

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Default monthly return on the safety reserve (roughly an overnight rate)
pub const DEFAULT_SAFE_RETURN_RATE: f64 = 0.009;

/// Default monthly return on the growth pool (index-like)
pub const DEFAULT_MEDIUM_RETURN_RATE: f64 = 0.01;

/// Default monthly return on the risk pool (projects, bets)
pub const DEFAULT_HIGH_RETURN_RATE: f64 = 0.05;

/// Financial situation and market assumptions for one operator.
///
/// Validated once at construction and never mutated afterwards; every
/// evaluation request builds its own instance. Monetary values are plain
/// currency units, rates are monthly fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Capital available today
    pub capital_on_hand: f64,

    /// Expected monthly revenue
    pub monthly_revenue_expected: f64,

    /// Fixed monthly expenses
    pub fixed_expenses: f64,

    /// Variable monthly expenses (average)
    pub variable_expenses: f64,

    /// Standard deviation of monthly revenue as a fraction of itself (0-1)
    pub revenue_volatility: f64,

    /// Appetite for risk (0 = none, 1 = maximum)
    pub risk_tolerance: f64,

    /// Number of months that must stay funded
    pub protected_months: u32,

    /// Monthly return rate on the safety reserve
    pub safe_return_rate: f64,

    /// Monthly return rate on the growth pool
    pub medium_return_rate: f64,

    /// Monthly return rate on the risk pool
    pub high_return_rate: f64,
}

impl ParameterSet {
    /// Create a validated parameter set.
    ///
    /// Monetary fields must be non-negative, volatility and tolerance must
    /// lie in [0, 1], and the protection horizon must cover at least one
    /// month. Return rates are unconstrained; safe < medium < high is a
    /// convention left to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        capital_on_hand: f64,
        monthly_revenue_expected: f64,
        fixed_expenses: f64,
        variable_expenses: f64,
        revenue_volatility: f64,
        risk_tolerance: f64,
        protected_months: u32,
        safe_return_rate: f64,
        medium_return_rate: f64,
        high_return_rate: f64,
    ) -> Result<Self, ModelError> {
        check_non_negative("capital_on_hand", capital_on_hand)?;
        check_non_negative("monthly_revenue_expected", monthly_revenue_expected)?;
        check_non_negative("fixed_expenses", fixed_expenses)?;
        check_non_negative("variable_expenses", variable_expenses)?;
        check_unit_interval("revenue_volatility", revenue_volatility)?;
        check_unit_interval("risk_tolerance", risk_tolerance)?;

        if protected_months == 0 {
            return Err(ModelError::InvalidParameter {
                field: "protected_months",
                value: 0.0,
                constraint: "must be at least 1",
            });
        }

        Ok(Self {
            capital_on_hand,
            monthly_revenue_expected,
            fixed_expenses,
            variable_expenses,
            revenue_volatility,
            risk_tolerance,
            protected_months,
            safe_return_rate,
            medium_return_rate,
            high_return_rate,
        })
    }

    /// Convenience constructor using the default return rates
    pub fn with_default_returns(
        capital_on_hand: f64,
        monthly_revenue_expected: f64,
        fixed_expenses: f64,
        variable_expenses: f64,
        revenue_volatility: f64,
        risk_tolerance: f64,
        protected_months: u32,
    ) -> Result<Self, ModelError> {
        Self::new(
            capital_on_hand,
            monthly_revenue_expected,
            fixed_expenses,
            variable_expenses,
            revenue_volatility,
            risk_tolerance,
            protected_months,
            DEFAULT_SAFE_RETURN_RATE,
            DEFAULT_MEDIUM_RETURN_RATE,
            DEFAULT_HIGH_RETURN_RATE,
        )
    }

    /// Total expected monthly expenses
    pub fn monthly_expenses(&self) -> f64 {
        self.fixed_expenses + self.variable_expenses
    }

    /// Revenue over expenses. +Inf when there are no expenses.
    pub fn slack_index(&self) -> f64 {
        let expenses = self.monthly_expenses();
        if expenses <= 0.0 {
            f64::INFINITY
        } else {
            self.monthly_revenue_expected / expenses
        }
    }

    /// How many months the current capital covers with zero revenue.
    /// +Inf when there are no expenses.
    pub fn reserve_months(&self) -> f64 {
        let expenses = self.monthly_expenses();
        if expenses <= 0.0 {
            f64::INFINITY
        } else {
            self.capital_on_hand / expenses
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::InvalidParameter {
            field,
            value,
            constraint: "must be finite and non-negative",
        });
    }
    Ok(())
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ModelError::InvalidParameter {
            field,
            value,
            constraint: "must lie in [0, 1]",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_params() -> ParameterSet {
        ParameterSet::with_default_returns(100_000.0, 15_000.0, 8_000.0, 3_000.0, 0.15, 0.30, 6)
            .unwrap()
    }

    #[test]
    fn test_valid_params_construct() {
        let p = base_params();
        assert_relative_eq!(p.monthly_expenses(), 11_000.0);
        assert_relative_eq!(p.safe_return_rate, DEFAULT_SAFE_RETURN_RATE);
    }

    #[test]
    fn test_negative_capital_rejected() {
        let err = ParameterSet::with_default_returns(-1.0, 15_000.0, 8_000.0, 3_000.0, 0.15, 0.3, 6)
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter { field: "capital_on_hand", .. }
        ));
    }

    #[test]
    fn test_volatility_out_of_range_rejected() {
        let err = ParameterSet::with_default_returns(1.0, 1.0, 1.0, 1.0, 1.5, 0.3, 6).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter { field: "revenue_volatility", .. }
        ));
    }

    #[test]
    fn test_zero_protected_months_rejected() {
        let err = ParameterSet::with_default_returns(1.0, 1.0, 1.0, 1.0, 0.1, 0.3, 0).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter { field: "protected_months", .. }
        ));
    }

    #[test]
    fn test_derived_ratios() {
        let p = base_params();
        assert_relative_eq!(p.slack_index(), 15_000.0 / 11_000.0);
        assert_relative_eq!(p.reserve_months(), 100_000.0 / 11_000.0);
    }

    #[test]
    fn test_derived_ratios_with_zero_expenses() {
        let p = ParameterSet::with_default_returns(50_000.0, 10_000.0, 0.0, 0.0, 0.1, 0.5, 12)
            .unwrap();
        assert!(p.slack_index().is_infinite());
        assert!(p.reserve_months().is_infinite());
    }
}
