//! Input data model: operator parameters and candidate allocations

mod allocation;
mod params;

pub use allocation::{AllocationStrategy, ALLOCATION_SUM_TOLERANCE};
pub use params::{
    ParameterSet, DEFAULT_HIGH_RETURN_RATE, DEFAULT_MEDIUM_RETURN_RATE, DEFAULT_SAFE_RETURN_RATE,
};
