//! Compute comprehensive costs for a block of stored loan records
//!
//! Reads loans and fees from CSV, fans the calculations out with rayon, and
//! writes one cost row per record plus a stdout summary.

use anyhow::{anyhow, Context};
use clap::Parser;
use financing_cost::loan::{fees_for, load_fees, load_loans};
use financing_cost::{CostBreakdown, CostEngine, CostError, PeriodMode};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "batch_costs",
    about = "Batch comprehensive financing cost calculation over CSV records"
)]
struct Args {
    /// Path to the loans CSV
    #[arg(long, default_value = "loans.csv")]
    loans: String,

    /// Path to the fees CSV
    #[arg(long, default_value = "fees.csv")]
    fees: String,

    /// Output CSV path
    #[arg(long, default_value = "costs.csv")]
    output: String,

    /// Period calculation mode: auto, integer, or precise
    #[arg(long, default_value = "auto")]
    mode: String,
}

struct CostRow {
    loan_id: u32,
    company: String,
    nominal_percent: f64,
    result: Result<CostBreakdown, CostError>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mode = PeriodMode::from_label(&args.mode)
        .ok_or_else(|| anyhow!("mode must be auto, integer, or precise, got '{}'", args.mode))?;

    let start = Instant::now();
    println!("Loading records from {} and {}...", args.loans, args.fees);

    let loans = load_loans(&args.loans)
        .map_err(|e| anyhow!("failed to load {}: {e}", args.loans))?;
    let fee_rows = load_fees(&args.fees)
        .map_err(|e| anyhow!("failed to load {}: {e}", args.fees))?;
    println!(
        "Loaded {} loans and {} fee rows in {:?}",
        loans.len(),
        fee_rows.len(),
        start.elapsed()
    );

    println!("Computing costs...");
    let calc_start = Instant::now();

    let rows: Vec<CostRow> = loans
        .par_iter()
        .map(|record| {
            let engine = CostEngine::new(mode);
            let fees = fees_for(&fee_rows, record.loan_id);
            CostRow {
                loan_id: record.loan_id,
                company: record.company.clone(),
                nominal_percent: record.terms.nominal_annual_rate * 100.0,
                result: engine.compute_cost(&record.terms, &fees),
            }
        })
        .collect();

    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut file =
        File::create(&args.output).with_context(|| format!("creating {}", args.output))?;
    writeln!(
        file,
        "LoanID,Company,NominalPct,FeePct,TotalCostPct,FeeCount,AllConverged"
    )?;

    let mut failures = 0usize;
    for row in &rows {
        match &row.result {
            Ok(breakdown) => {
                let all_converged = breakdown.details.iter().all(|d| d.converged);
                writeln!(
                    file,
                    "{},{},{:.4},{:.4},{:.4},{},{}",
                    row.loan_id,
                    row.company,
                    row.nominal_percent,
                    breakdown.fee_rate_sum() * 100.0,
                    breakdown.total_cost_percent,
                    breakdown.details.len(),
                    all_converged,
                )?;
            }
            Err(error) => {
                failures += 1;
                eprintln!("loan {} ({}) rejected: {}", row.loan_id, row.company, error);
            }
        }
    }

    println!("Output written to {}", args.output);

    // Summary
    let computed: Vec<&CostBreakdown> =
        rows.iter().filter_map(|r| r.result.as_ref().ok()).collect();
    if !computed.is_empty() {
        let mean = computed
            .iter()
            .map(|b| b.total_cost_percent)
            .sum::<f64>()
            / computed.len() as f64;
        let max = computed
            .iter()
            .map(|b| b.total_cost_percent)
            .fold(f64::MIN, f64::max);
        println!("\nBlock Summary:");
        println!("  Records computed: {}", computed.len());
        println!("  Records rejected: {}", failures);
        println!("  Mean total cost: {:.4}%", mean);
        println!("  Max total cost:  {:.4}%", max);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
