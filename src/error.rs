//! Error types for the allocation engine

use thiserror::Error;

/// Errors raised by the allocation engine.
///
/// Parameter and allocation variants are configuration errors raised at
/// construction time; they are never corrected silently. `InvalidTrialCount`
/// is a usage error from the stochastic sampler. Nothing is retried
/// internally.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A ParameterSet field violates its constraint
    #[error("invalid parameter `{field}` = {value}: {constraint}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// Allocation percentages do not sum to 100
    #[error("allocation must sum to 100% (got {total:.6}%)")]
    AllocationSum { total: f64 },

    /// An allocation percentage is negative
    #[error("allocation `{field}` must be non-negative (got {value:.6}%)")]
    NegativeAllocation { field: &'static str, value: f64 },

    /// Monte Carlo trial count must be positive
    #[error("trial count must be positive")]
    InvalidTrialCount,
}
