//! Monte Carlo survival-probability estimation

mod sampler;

pub use sampler::{
    DepletionSummary, MonteCarloResult, SamplerConfig, StochasticSampler, DEFAULT_TRIALS,
};
