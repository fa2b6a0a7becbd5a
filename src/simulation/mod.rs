//! Month-by-month cash trajectory simulation

mod engine;
mod state;
mod trajectory;

pub use engine::TrajectorySimulator;
pub use state::PoolState;
pub use trajectory::{TrajectoryResult, TrajectoryRow};
