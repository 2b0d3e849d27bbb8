//! Principal repayment schedules for the fee-annualization path

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::{add_months, periods_between};
use crate::loan::{LoanTerms, RepaymentMethod};

/// Reference annual rate used to split equal-installment payments into
/// principal and interest when building the annualization schedule.
/// Deliberately independent of the loan's own nominal rate.
pub const REFERENCE_ANNUAL_RATE: f64 = 0.05;

/// One dated cash amount with its fractional period offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,

    /// Cash amount of the entry (principal component or fee payment)
    pub amount: f64,

    /// Fractional periods from the loan start, in the interest-frequency unit
    pub period_offset: f64,
}

/// Generate the loan's principal-repayment schedule.
///
/// Length equals the term in months, except Bullet which repays everything
/// in a single entry. Amounts sum to the principal; the equal-installment
/// method force-corrects its final entry to absorb rounding drift.
pub fn principal_schedule(loan: &LoanTerms, use_integer: bool) -> Vec<ScheduleEntry> {
    match &loan.repayment_method {
        RepaymentMethod::EqualInstallment => equal_installment_schedule(loan, use_integer),
        RepaymentMethod::Bullet => bullet_schedule(loan, use_integer),
        // Unrecognized methods repay as equal principal
        RepaymentMethod::EqualPrincipal | RepaymentMethod::Custom(_) => {
            equal_principal_schedule(loan, use_integer)
        }
    }
}

/// Period offset for the schedule entry at `index` (0-based)
fn offset_at(loan: &LoanTerms, index: u32, date: NaiveDate, use_integer: bool) -> f64 {
    if use_integer {
        (index + 1) as f64
    } else {
        periods_between(loan.start_date, date, loan.interest_frequency)
    }
}

fn equal_principal_schedule(loan: &LoanTerms, use_integer: bool) -> Vec<ScheduleEntry> {
    let per_period = loan.principal / loan.term_months as f64;
    (0..loan.term_months)
        .map(|i| {
            let date = add_months(loan.first_payment_date, i);
            ScheduleEntry {
                date,
                amount: per_period,
                period_offset: offset_at(loan, i, date, use_integer),
            }
        })
        .collect()
}

fn equal_installment_schedule(loan: &LoanTerms, use_integer: bool) -> Vec<ScheduleEntry> {
    let term = loan.term_months;
    let monthly_rate = REFERENCE_ANNUAL_RATE / 12.0;
    let growth = (1.0 + monthly_rate).powi(term as i32);
    let installment = loan.principal * monthly_rate * growth / (growth - 1.0);

    let mut remaining = loan.principal;
    let mut schedule = Vec::with_capacity(term as usize);
    for i in 0..term {
        let date = add_months(loan.first_payment_date, i);
        let interest = remaining * monthly_rate;
        // Final period takes the whole remaining balance so the schedule
        // sums exactly to the principal
        let principal = if i == term - 1 {
            remaining
        } else {
            installment - interest
        };
        schedule.push(ScheduleEntry {
            date,
            amount: principal,
            period_offset: offset_at(loan, i, date, use_integer),
        });
        remaining -= principal;
    }
    schedule
}

fn bullet_schedule(loan: &LoanTerms, use_integer: bool) -> Vec<ScheduleEntry> {
    let date = add_months(loan.first_payment_date, loan.term_months.saturating_sub(1));
    let period_offset = if use_integer {
        loan.term_months as f64
    } else {
        periods_between(loan.start_date, date, loan.interest_frequency)
    };
    vec![ScheduleEntry {
        date,
        amount: loan.principal,
        period_offset,
    }]
}
