//! Named deterministic market scenarios
//!
//! A scenario perturbs one parameter set with fixed multipliers on revenue,
//! expenses, and investment returns. Three scenarios are built in; the
//! stochastic sampler also builds Bad-variants from drawn multipliers.

use serde::{Deserialize, Serialize};

/// The built-in scenario names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Optimistic: more revenue, lower expenses, better returns
    Good,
    /// Baseline: parameters taken as given
    Neutral,
    /// Pessimistic: revenue shortfall, expense overrun, weak returns
    Bad,
}

impl ScenarioKind {
    /// All built-in kinds, in reporting order
    pub fn all() -> [ScenarioKind; 3] {
        [ScenarioKind::Good, ScenarioKind::Neutral, ScenarioKind::Bad]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Good => "good",
            ScenarioKind::Neutral => "neutral",
            ScenarioKind::Bad => "bad",
        }
    }
}

/// A deterministic perturbation applied to a parameter set
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioDefinition {
    pub kind: ScenarioKind,

    /// Multiplier on expected monthly revenue
    pub revenue_multiplier: f64,

    /// Multiplier on fixed + variable expenses
    pub expense_multiplier: f64,

    /// Multiplier on all three pool return rates
    pub return_multiplier: f64,
}

impl ScenarioDefinition {
    /// The fixed built-in multiplier table
    pub fn builtin(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Good => Self {
                kind,
                revenue_multiplier: 1.15,
                expense_multiplier: 0.90,
                return_multiplier: 1.20,
            },
            ScenarioKind::Neutral => Self {
                kind,
                revenue_multiplier: 1.0,
                expense_multiplier: 1.0,
                return_multiplier: 1.0,
            },
            ScenarioKind::Bad => Self {
                kind,
                revenue_multiplier: 0.70,
                expense_multiplier: 1.20,
                return_multiplier: 0.50,
            },
        }
    }

    pub fn good() -> Self {
        Self::builtin(ScenarioKind::Good)
    }

    pub fn neutral() -> Self {
        Self::builtin(ScenarioKind::Neutral)
    }

    pub fn bad() -> Self {
        Self::builtin(ScenarioKind::Bad)
    }

    /// A Bad-classified scenario with custom multipliers, used for
    /// stochastic draws around the Bad baseline
    pub fn bad_variant(
        revenue_multiplier: f64,
        expense_multiplier: f64,
        return_multiplier: f64,
    ) -> Self {
        Self {
            kind: ScenarioKind::Bad,
            revenue_multiplier,
            expense_multiplier,
            return_multiplier,
        }
    }
}
