//! Financing Cost System CLI
//!
//! Command-line demo: computes the comprehensive financing cost of a sample
//! loan and writes its cash-flow ledger to CSV

use chrono::NaiveDate;
use financing_cost::{
    CashFlowModel, CostEngine, FeeFrequency, FeeItem, InterestFrequency, LoanTerms, PeriodMode,
    RepaymentMethod,
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Financing Cost System v0.1.0");
    println!("============================\n");

    // Sample loan: 1,000,000 over 12 months, equal principal, 6% nominal
    let loan = LoanTerms {
        principal: 1_000_000.0,
        repayment_method: RepaymentMethod::EqualPrincipal,
        term_months: 12,
        interest_frequency: InterestFrequency::Month,
        nominal_annual_rate: 0.06,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
        first_payment_date: NaiveDate::from_ymd_opt(2024, 2, 10).expect("valid date"),
    };

    let fees = vec![
        FeeItem::new("Arrangement fee", 10_000.0, FeeFrequency::Upfront, false),
        FeeItem::new("Account management", 1_200.0, FeeFrequency::Quarterly, false),
        FeeItem::new("Appraisal fee", 5_000.0, FeeFrequency::Upfront, true),
    ];

    println!("Loan terms:");
    println!("  Principal: {:.2}", loan.principal);
    println!("  Method: {:?}", loan.repayment_method);
    println!("  Term: {} months", loan.term_months);
    println!("  Nominal rate: {:.4}%", loan.nominal_annual_rate * 100.0);
    println!("  Start: {}  First payment: {}", loan.start_date, loan.first_payment_date);
    println!();

    let engine = CostEngine::new(PeriodMode::Auto);
    let breakdown = engine
        .compute_cost(&loan, &fees)
        .expect("sample loan is valid");

    // Fee detail table
    println!(
        "{:<24} {:>12} {:>10} {:>10} {:>10}",
        "Item", "Amount", "Annual%", "Monthly%", "Period%"
    );
    println!("{}", "-".repeat(70));
    println!(
        "{:<24} {:>12} {:>10.4} {:>10.4} {:>10}",
        "Base interest rate",
        "-",
        loan.nominal_annual_rate * 100.0,
        loan.nominal_annual_rate / 12.0 * 100.0,
        "-"
    );
    for detail in &breakdown.details {
        let name = if detail.bank_borne {
            format!("{} [bank borne]", detail.name)
        } else {
            detail.name.clone()
        };
        println!(
            "{:<24} {:>12.2} {:>10.4} {:>10.4} {:>10.4}",
            name,
            detail.amount,
            detail.annual_rate * 100.0,
            detail.monthly_rate() * 100.0,
            detail.period_rate * 100.0,
        );
    }
    println!("{}", "-".repeat(70));
    println!(
        "Comprehensive financing cost: {:.4}%\n",
        breakdown.total_cost_percent
    );

    // Build the merged display ledger and write it to CSV
    let mut ledger = CashFlowModel::loan_flows(&loan);
    for fee in &fees {
        ledger.merge(&CashFlowModel::fee_flows(fee, &loan));
    }

    let csv_path = "cashflow_ledger.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    writeln!(file, "Date,Amount").unwrap();
    for flow in ledger.entries() {
        writeln!(file, "{},{:.2}", flow.date, flow.amount).unwrap();
    }

    println!("Cash-flow ledger written to: {}", csv_path);
    println!("  {} dated flows, net {:.2}", ledger.len(), ledger.net());
}
