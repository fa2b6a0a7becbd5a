//! Trajectory output structures

use serde::Serialize;

use crate::scenario::ScenarioKind;

/// One month of projected balances
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryRow {
    /// Month index (1-based)
    pub month: u32,

    /// Net operating cash flow applied this month (revenue - expenses)
    pub net_cash_flow: f64,

    /// Liquid reserve after flow and returns
    pub reserve: f64,

    /// Growth pool after returns
    pub growth: f64,

    /// Risk pool after returns
    pub risk: f64,

    /// Total balance across pools
    pub total: f64,
}

/// Result of projecting one (parameters, scenario, allocation) triple.
///
/// Rows run through the protection horizon, or stop early at the month the
/// liquid reserve runs dry. Growth and risk pools are never liquidated for
/// operating needs, so an exhausted reserve means the operator cannot meet
/// obligations even while locked pools still hold value.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryResult {
    /// Scenario this trajectory was run under
    pub scenario: ScenarioKind,

    /// Monthly rows, one per simulated month
    pub rows: Vec<TrajectoryRow>,

    /// First month the reserve went negative; None if it never did
    pub months_to_zero: Option<u32>,

    /// Whether the reserve stayed funded through the whole horizon
    pub survived: bool,
}

impl TrajectoryResult {
    /// Total balances month by month
    pub fn balances(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total).collect()
    }

    /// Total balance at the last simulated month (0 for an empty trajectory)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.total).unwrap_or(0.0)
    }
}
