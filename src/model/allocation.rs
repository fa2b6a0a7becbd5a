//! Three-way capital split: safety reserve / growth / risk

use serde::Serialize;

use crate::error::ModelError;

/// Tolerance on the 100% sum invariant
pub const ALLOCATION_SUM_TOLERANCE: f64 = 1e-6;

/// A candidate split of capital into three non-negative percentages.
///
/// Fields are private so the sum-to-100 invariant established in [`new`]
/// holds for every live value. A violating split is a construction error,
/// not a silent normalization.
///
/// [`new`]: AllocationStrategy::new
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationStrategy {
    reserve_pct: f64,
    growth_pct: f64,
    risk_pct: f64,
}

impl AllocationStrategy {
    /// Build a strategy, enforcing non-negativity and the 100% sum invariant
    pub fn new(reserve_pct: f64, growth_pct: f64, risk_pct: f64) -> Result<Self, ModelError> {
        for (field, value) in [
            ("reserve_pct", reserve_pct),
            ("growth_pct", growth_pct),
            ("risk_pct", risk_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::NegativeAllocation { field, value });
            }
        }

        let total = reserve_pct + growth_pct + risk_pct;
        if (total - 100.0).abs() > ALLOCATION_SUM_TOLERANCE {
            return Err(ModelError::AllocationSum { total });
        }

        Ok(Self {
            reserve_pct,
            growth_pct,
            risk_pct,
        })
    }

    /// Percentage held as liquid safety reserve
    pub fn reserve_pct(&self) -> f64 {
        self.reserve_pct
    }

    /// Percentage in the growth pool
    pub fn growth_pct(&self) -> f64 {
        self.growth_pct
    }

    /// Percentage in the high-risk pool
    pub fn risk_pct(&self) -> f64 {
        self.risk_pct
    }

    /// Split a capital amount into (reserve, growth, risk) pool values
    pub fn split(&self, capital: f64) -> (f64, f64, f64) {
        (
            capital * self.reserve_pct / 100.0,
            capital * self.growth_pct / 100.0,
            capital * self.risk_pct / 100.0,
        )
    }
}
