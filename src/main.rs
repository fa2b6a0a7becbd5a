//! Cash Allocation CLI
//!
//! Evaluates a three-way capital split for one operator, or searches for one
//! when no split is given, and prints the scenario trajectories.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

use cash_allocation::{
    AllocationEvaluator, AllocationStrategy, AllocationSuggester, EvaluationResult,
    EvaluatorConfig, ParameterSet,
};

#[derive(Parser, Debug)]
#[command(name = "cash_allocation", about = "Cash allocation survival analysis")]
struct Args {
    /// Capital available today
    #[arg(long, default_value_t = 100_000.0)]
    capital: f64,

    /// Expected monthly revenue
    #[arg(long, default_value_t = 15_000.0)]
    revenue: f64,

    /// Fixed monthly expenses
    #[arg(long, default_value_t = 8_000.0)]
    fixed_expenses: f64,

    /// Variable monthly expenses
    #[arg(long, default_value_t = 3_000.0)]
    variable_expenses: f64,

    /// Revenue volatility (0-1)
    #[arg(long, default_value_t = 0.15)]
    volatility: f64,

    /// Risk tolerance (0-1)
    #[arg(long, default_value_t = 0.30)]
    risk_tolerance: f64,

    /// Months that must stay funded
    #[arg(long, default_value_t = 6)]
    protected_months: u32,

    /// Monthly return on the safety reserve
    #[arg(long, default_value_t = 0.009)]
    safe_rate: f64,

    /// Monthly return on the growth pool
    #[arg(long, default_value_t = 0.01)]
    medium_rate: f64,

    /// Monthly return on the risk pool
    #[arg(long, default_value_t = 0.05)]
    high_rate: f64,

    /// Reserve percentage (omit all three to search for a split)
    #[arg(long)]
    reserve: Option<f64>,

    /// Growth percentage
    #[arg(long)]
    growth: Option<f64>,

    /// Risk percentage
    #[arg(long)]
    risk: Option<f64>,

    /// Monte Carlo trial count
    #[arg(long, default_value_t = 500)]
    trials: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Skip Monte Carlo and use the deterministic fallback
    #[arg(long)]
    no_monte_carlo: bool,

    /// Write the full result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the scenario trajectories as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = ParameterSet::new(
        args.capital,
        args.revenue,
        args.fixed_expenses,
        args.variable_expenses,
        args.volatility,
        args.risk_tolerance,
        args.protected_months,
        args.safe_rate,
        args.medium_rate,
        args.high_rate,
    )?;

    let config = EvaluatorConfig {
        monte_carlo_enabled: !args.no_monte_carlo,
        trials: args.trials,
        seed: args.seed,
    };

    let allocation = match (args.reserve, args.growth, args.risk) {
        (Some(reserve), Some(growth), Some(risk)) => AllocationStrategy::new(reserve, growth, risk)?,
        (None, None, None) => {
            let suggester = AllocationSuggester::new(AllocationEvaluator::new(config.clone()));
            let suggestion = suggester.suggest(&params)?;
            println!(
                "Suggested split after {} candidates: {:.2}% / {:.2}% / {:.2}%{}",
                suggestion.candidates_evaluated,
                suggestion.allocation.reserve_pct(),
                suggestion.allocation.growth_pct(),
                suggestion.allocation.risk_pct(),
                if suggestion.is_valid {
                    ""
                } else {
                    " (search exhausted, no valid split)"
                }
            );
            suggestion.allocation
        }
        _ => bail!("--reserve, --growth, and --risk must be given together"),
    };

    let evaluator = AllocationEvaluator::new(config);
    let result = evaluator.evaluate(&params, &allocation)?;

    print_report(&result);

    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("\nFull result written to: {}", path.display());
    }

    if let Some(path) = &args.csv {
        write_trajectories_csv(path, &result)?;
        println!("Trajectories written to: {}", path.display());
    }

    Ok(())
}

fn print_report(result: &EvaluationResult) {
    println!("\nCash Allocation Survival Analysis");
    println!("=================================\n");

    println!(
        "Split: reserve {:.2}% (${:.2}) / growth {:.2}% (${:.2}) / risk {:.2}% (${:.2})",
        result.allocation.reserve_pct(),
        result.reserve_value,
        result.allocation.growth_pct(),
        result.growth_value,
        result.allocation.risk_pct(),
        result.risk_value,
    );
    println!(
        "Bad-scenario survival probability: {:.1}%",
        result.survival_probability_bad * 100.0
    );
    match result.months_to_zero_bad {
        Some(month) => println!("Bad-scenario reserve runs dry in month {month}"),
        None => println!("Bad-scenario reserve lasts the whole horizon"),
    }
    println!(
        "Verdict: {}\n",
        if result.is_valid { "VALID" } else { "NOT VALID" }
    );

    println!(
        "{:>5} {:>14} {:>14} {:>14}",
        "Month", "Good", "Neutral", "Bad"
    );
    println!("{}", "-".repeat(50));
    let months = result
        .good
        .rows
        .len()
        .max(result.neutral.rows.len())
        .max(result.bad.rows.len());
    for i in 0..months {
        let cell = |rows: &[cash_allocation::TrajectoryRow]| {
            rows.get(i)
                .map(|r| format!("{:>14.2}", r.total))
                .unwrap_or_else(|| format!("{:>14}", "-"))
        };
        println!(
            "{:>5} {} {} {}",
            i + 1,
            cell(&result.good.rows),
            cell(&result.neutral.rows),
            cell(&result.bad.rows),
        );
    }

    if let Some(mc) = &result.monte_carlo {
        println!(
            "\nMonte Carlo: {}/{} trials survived",
            mc.survival_count, mc.trials
        );
        if let Some(depletion) = &mc.depletion {
            println!(
                "Failed trials deplete at month p10={} p50={} p90={} (mean {:.1})",
                depletion.p10_months_to_zero,
                depletion.p50_months_to_zero,
                depletion.p90_months_to_zero,
                depletion.mean_months_to_zero,
            );
        }
    }
}

fn write_trajectories_csv(path: &PathBuf, result: &EvaluationResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    writer.write_record(["month", "good", "neutral", "bad"])?;

    let months = result
        .good
        .rows
        .len()
        .max(result.neutral.rows.len())
        .max(result.bad.rows.len());
    for i in 0..months {
        let cell = |rows: &[cash_allocation::TrajectoryRow]| {
            rows.get(i).map(|r| format!("{:.2}", r.total)).unwrap_or_default()
        };
        writer.write_record([
            (i + 1).to_string(),
            cell(&result.good.rows),
            cell(&result.neutral.rows),
            cell(&result.bad.rows),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
