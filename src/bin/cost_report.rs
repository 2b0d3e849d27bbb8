//! Single-loan comprehensive cost report
//!
//! Supports JSON output for API integration via --json flag
//! Accepts config via environment variables:
//!   PRINCIPAL, REPAYMENT_METHOD, TERM_MONTHS, INTEREST_FREQUENCY,
//!   NOMINAL_ANNUAL_RATE, START_DATE, END_DATE, FIRST_PAYMENT_DATE,
//!   CALC_MODE, FEES (JSON array of fee items)

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use financing_cost::{
    CostEngine, FeeCostDetail, FeeItem, InterestFrequency, LoanTerms, PeriodMode, RepaymentMethod,
};
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct CostResponse {
    total_cost_percent: f64,
    nominal_percent: f64,
    fee_percent: f64,
    details: Vec<FeeCostDetail>,
    mode: PeriodMode,
    execution_time_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_date(key: &str, default: &str) -> anyhow::Result<NaiveDate> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("{key} must be a YYYY-MM-DD date, got '{raw}'"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    // Read loan terms from environment or use the sample defaults
    let principal: f64 = env_or("PRINCIPAL", 1_000_000.0);
    let term_months: u32 = env_or("TERM_MONTHS", 12);
    let nominal_annual_rate: f64 = env_or("NOMINAL_ANNUAL_RATE", 0.06);

    let repayment_method = RepaymentMethod::from_label(
        &env::var("REPAYMENT_METHOD").unwrap_or_else(|_| "equal_principal".to_string()),
    );
    let frequency_label =
        env::var("INTEREST_FREQUENCY").unwrap_or_else(|_| "monthly".to_string());
    let interest_frequency = InterestFrequency::from_label(&frequency_label)
        .ok_or_else(|| anyhow!("unknown INTEREST_FREQUENCY '{frequency_label}'"))?;

    let mode_label = env::var("CALC_MODE").unwrap_or_else(|_| "auto".to_string());
    let mode = PeriodMode::from_label(&mode_label)
        .ok_or_else(|| anyhow!("CALC_MODE must be auto, integer, or precise"))?;

    let loan = LoanTerms {
        principal,
        repayment_method,
        term_months,
        interest_frequency,
        nominal_annual_rate,
        start_date: env_date("START_DATE", "2024-01-10")?,
        end_date: env_date("END_DATE", "2025-01-10")?,
        first_payment_date: env_date("FIRST_PAYMENT_DATE", "2024-02-10")?,
    };

    let fees: Vec<FeeItem> = match env::var("FEES") {
        Ok(raw) => serde_json::from_str(&raw).context("FEES must be a JSON array of fee items")?,
        Err(_) => Vec::new(),
    };

    let engine = CostEngine::new(mode);
    let breakdown = engine
        .compute_cost(&loan, &fees)
        .map_err(|e| anyhow!("invalid loan terms: {e}"))?;

    let response = CostResponse {
        total_cost_percent: breakdown.total_cost_percent,
        nominal_percent: loan.nominal_annual_rate * 100.0,
        fee_percent: breakdown.fee_rate_sum() * 100.0,
        details: breakdown.details,
        mode,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Comprehensive Financing Cost Report");
    println!("===================================");
    println!("  Principal: {:.2}", loan.principal);
    println!("  Term: {} months, mode {:?}", loan.term_months, mode);
    println!("  Nominal rate: {:.4}%", response.nominal_percent);
    println!("  Fee contribution: {:.4}%", response.fee_percent);
    println!("  Total cost: {:.4}%", response.total_cost_percent);
    for detail in &response.details {
        println!(
            "    {:<24} amount {:>12.2}  annual {:>8.4}%{}",
            detail.name,
            detail.amount,
            detail.annual_rate * 100.0,
            if detail.bank_borne { "  [bank borne]" } else { "" },
        );
    }
    println!("\nDone in {} ms", response.execution_time_ms);
    Ok(())
}
