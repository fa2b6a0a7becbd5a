//! Generate a synthetic training dataset for the offline allocation predictor
//!
//! Draws randomized parameter sets, runs the search heuristic on each, and
//! writes one CSV row of features and targets per sample. Monte Carlo is
//! disabled so the deterministic fallback keeps the run fast; the predictor
//! only needs the suggested split and its verdict.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use cash_allocation::{
    AllocationEvaluator, AllocationSuggester, EvaluatorConfig, ParameterSet,
};

#[derive(Parser, Debug)]
#[command(name = "generate_samples", about = "Synthetic allocation dataset generator")]
struct Args {
    /// Number of samples to generate
    #[arg(long, default_value_t = 10_000)]
    samples: u32,

    /// Base seed for the parameter draws
    #[arg(long, default_value_t = 2024)]
    seed: u64,

    /// Output CSV path
    #[arg(long, default_value = "allocation_samples.csv")]
    output: PathBuf,
}

/// One dataset row: raw parameters, derived ratios, and search targets
struct SampleRow {
    params: ParameterSet,
    reserve_pct: f64,
    growth_pct: f64,
    risk_pct: f64,
    is_valid: bool,
    survival_probability: f64,
}

fn draw_params(rng: &mut StdRng) -> ParameterSet {
    // Ranges spanning the books of a plausible small operator
    loop {
        let candidate = ParameterSet::with_default_returns(
            rng.gen_range(10_000.0..500_000.0),
            rng.gen_range(5_000.0..100_000.0),
            rng.gen_range(2_000.0..50_000.0),
            rng.gen_range(1_000.0..30_000.0),
            rng.gen_range(0.05..0.40),
            rng.gen_range(0.1..0.9),
            rng.gen_range(3..12),
        );
        if let Ok(params) = candidate {
            return params;
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Generating {} samples (seed {})...", args.samples, args.seed);
    let start = Instant::now();

    let rows: Vec<SampleRow> = (0..args.samples)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(i as u64));
            let params = draw_params(&mut rng);

            let evaluator = AllocationEvaluator::new(EvaluatorConfig {
                monte_carlo_enabled: false,
                trials: 1,
                seed: None,
            });
            let suggestion = AllocationSuggester::new(evaluator)
                .suggest(&params)
                .expect("search never fails on validated parameters");

            SampleRow {
                params,
                reserve_pct: suggestion.allocation.reserve_pct(),
                growth_pct: suggestion.allocation.growth_pct(),
                risk_pct: suggestion.allocation.risk_pct(),
                is_valid: suggestion.is_valid,
                survival_probability: suggestion.survival_probability_bad,
            }
        })
        .collect();

    println!("Search complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    writer.write_record([
        "capital_on_hand",
        "monthly_revenue_expected",
        "fixed_expenses",
        "variable_expenses",
        "revenue_volatility",
        "risk_tolerance",
        "protected_months",
        "slack_index",
        "reserve_months",
        "reserve_pct",
        "growth_pct",
        "risk_pct",
        "is_valid",
        "survival_probability",
    ])?;

    for row in &rows {
        let p = &row.params;
        writer.write_record([
            format!("{:.2}", p.capital_on_hand),
            format!("{:.2}", p.monthly_revenue_expected),
            format!("{:.2}", p.fixed_expenses),
            format!("{:.2}", p.variable_expenses),
            format!("{:.4}", p.revenue_volatility),
            format!("{:.4}", p.risk_tolerance),
            p.protected_months.to_string(),
            format!("{:.6}", p.slack_index()),
            format!("{:.6}", p.reserve_months()),
            format!("{:.4}", row.reserve_pct),
            format!("{:.4}", row.growth_pct),
            format!("{:.4}", row.risk_pct),
            (row.is_valid as u8).to_string(),
            format!("{:.4}", row.survival_probability),
        ])?;
    }
    writer.flush()?;

    let valid = rows.iter().filter(|r| r.is_valid).count();
    println!(
        "Wrote {} rows ({} valid suggestions) to {}",
        rows.len(),
        valid,
        args.output.display()
    );

    Ok(())
}
