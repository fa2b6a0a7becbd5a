//! Cash allocation survival engine for small cash-constrained operators
//!
//! This library provides:
//! - Deterministic Good/Neutral/Bad cash-trajectory simulation
//! - Monte Carlo survival-probability estimation under the Bad scenario
//! - Allocation evaluation against the dual validity rule
//! - A search heuristic proposing the lowest-reserve valid allocation

pub mod error;
pub mod evaluator;
pub mod model;
pub mod scenario;
pub mod simulation;
pub mod stochastic;
pub mod suggest;

// Re-export commonly used types
pub use error::ModelError;
pub use evaluator::{
    AllocationEvaluator, EvaluationResult, EvaluatorConfig, SURVIVAL_PROBABILITY_THRESHOLD,
};
pub use model::{AllocationStrategy, ParameterSet};
pub use scenario::{ScenarioDefinition, ScenarioKind};
pub use simulation::{TrajectoryResult, TrajectoryRow, TrajectorySimulator};
pub use stochastic::{MonteCarloResult, SamplerConfig, StochasticSampler};
pub use suggest::{AllocationSuggester, Suggestion};
