//! Dated cash-flow ledger for display and reporting
//!
//! The annualization path works on period offsets; reports work on calendar
//! dates and real interest. Both the loan's principal-and-interest flows and
//! fee flows feed one `CashFlowModel`, so every consumer sees the same
//! merged, date-ordered ledger.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::period::add_months;
use crate::loan::{FeeItem, InterestFrequency, LoanTerms, RepaymentMethod};

/// One dated amount in the ledger. Inflows to the borrower are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Ordered ledger of dated cash amounts, merged by date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowModel {
    flows: BTreeMap<NaiveDate, f64>,
}

impl CashFlowModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount on a date, merging with any flow already there
    pub fn add(&mut self, date: NaiveDate, amount: f64) {
        *self.flows.entry(date).or_insert(0.0) += amount;
    }

    /// Fold another ledger into this one
    pub fn merge(&mut self, other: &CashFlowModel) {
        for (&date, &amount) in &other.flows {
            self.add(date, amount);
        }
    }

    /// Date-ordered view of the ledger
    pub fn entries(&self) -> Vec<CashFlow> {
        self.flows
            .iter()
            .map(|(&date, &amount)| CashFlow { date, amount })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Net of all flows (disbursement minus repayments, interest, and fees)
    pub fn net(&self) -> f64 {
        self.flows.values().sum()
    }

    /// The borrower's view of the loan itself: disbursement at start, then
    /// principal and interest at the loan's actual nominal rate.
    pub fn loan_flows(loan: &LoanTerms) -> Self {
        let mut model = CashFlowModel::new();
        model.add(loan.start_date, loan.principal);

        let dates = payment_dates(
            loan.first_payment_date,
            loan.term_months,
            loan.interest_frequency,
        );
        let monthly_rate = loan.nominal_annual_rate / 12.0;

        match &loan.repayment_method {
            RepaymentMethod::EqualInstallment => {
                let payment = if monthly_rate == 0.0 {
                    loan.principal / loan.term_months as f64
                } else {
                    let growth = (1.0 + monthly_rate).powi(loan.term_months as i32);
                    loan.principal * monthly_rate * growth / (growth - 1.0)
                };
                for date in dates {
                    model.add(date, -payment);
                }
            }
            RepaymentMethod::Bullet => {
                let interest = loan.principal * monthly_rate;
                for date in dates {
                    model.add(date, -interest);
                }
                // Principal comes back at maturity
                model.add(loan.end_date, -loan.principal);
            }
            RepaymentMethod::EqualPrincipal | RepaymentMethod::Custom(_) => {
                let per_period = loan.principal / loan.term_months as f64;
                let mut remaining = loan.principal;
                for date in dates {
                    let interest = remaining * monthly_rate;
                    model.add(date, -(per_period + interest));
                    remaining -= per_period;
                }
            }
        }
        model
    }

    /// The borrower's view of a fee: upfront at start, otherwise the amount
    /// spread evenly over the scheduled payment dates.
    pub fn fee_flows(fee: &FeeItem, loan: &LoanTerms) -> Self {
        let mut model = CashFlowModel::new();
        let Some(frequency) = fee.frequency else {
            return model;
        };

        let Some(months_apart) = frequency.months_apart() else {
            // Upfront
            model.add(loan.start_date, -fee.amount);
            return model;
        };

        let payments = loan.term_months / months_apart;
        if payments == 0 {
            return model;
        }
        let per_payment = fee.amount / payments as f64;
        for i in 0..payments {
            model.add(add_months(loan.start_date, i * months_apart), -per_payment);
        }
        model
    }
}

/// Repayment dates at the interest-settlement interval. Day frequency steps
/// by 30-day periods; everything else steps whole months.
pub fn payment_dates(
    first_payment: NaiveDate,
    term_months: u32,
    frequency: InterestFrequency,
) -> Vec<NaiveDate> {
    let unit = frequency.unit_months();
    let total = if unit >= 1.0 {
        (term_months as f64 / unit) as u32
    } else {
        term_months
    };

    let mut dates = Vec::with_capacity(total as usize);
    let mut current = first_payment;
    for _ in 0..total {
        dates.push(current);
        current = if unit >= 1.0 {
            add_months(current, unit as u32)
        } else {
            current + Duration::days((unit * 30.0) as i64)
        };
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::FeeFrequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(method: RepaymentMethod) -> LoanTerms {
        LoanTerms {
            principal: 120_000.0,
            repayment_method: method,
            term_months: 12,
            interest_frequency: InterestFrequency::Month,
            nominal_annual_rate: 0.06,
            start_date: date(2024, 1, 10),
            end_date: date(2025, 1, 10),
            first_payment_date: date(2024, 2, 10),
        }
    }

    #[test]
    fn test_payment_dates_by_frequency() {
        let first = date(2024, 2, 10);
        assert_eq!(payment_dates(first, 12, InterestFrequency::Month).len(), 12);

        let quarterly = payment_dates(first, 12, InterestFrequency::Quarter);
        assert_eq!(quarterly.len(), 4);
        assert_eq!(quarterly[1], date(2024, 5, 10));

        assert_eq!(payment_dates(first, 12, InterestFrequency::Year).len(), 1);
        // Day frequency: one date per month of term, one day apart
        let daily = payment_dates(first, 3, InterestFrequency::Day);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[1], date(2024, 2, 11));
    }

    #[test]
    fn test_equal_principal_ledger_balances_to_interest() {
        let loan = loan(RepaymentMethod::EqualPrincipal);
        let model = CashFlowModel::loan_flows(&loan);

        // Disbursement plus 12 repayment dates
        assert_eq!(model.len(), 13);
        let first = model.entries()[0];
        assert_eq!(first.date, loan.start_date);
        assert_eq!(first.amount, loan.principal);

        // Interest on a declining balance: 0.5% * (120k + 110k + ... + 10k)
        let expected_interest: f64 = (1..=12).map(|k| 10_000.0 * k as f64 * 0.005).sum();
        assert!((model.net() + expected_interest).abs() < 1e-6);
    }

    #[test]
    fn test_bullet_ledger_repays_at_maturity() {
        let loan = loan(RepaymentMethod::Bullet);
        let model = CashFlowModel::loan_flows(&loan);

        let entries = model.entries();
        let last = entries.last().unwrap();
        assert_eq!(last.date, loan.end_date);
        // Maturity carries the principal (plus that date's interest, if any)
        assert!(last.amount <= -loan.principal);

        let monthly_interest = loan.principal * 0.005;
        let expected_net = -(monthly_interest * 12.0);
        assert!((model.net() - expected_net).abs() < 1e-6);
    }

    #[test]
    fn test_equal_installment_ledger_uses_nominal_rate() {
        let loan = loan(RepaymentMethod::EqualInstallment);
        let model = CashFlowModel::loan_flows(&loan);

        let r = 0.06 / 12.0;
        let growth = (1.0_f64 + r).powi(12);
        let payment = 120_000.0 * r * growth / (growth - 1.0);
        let outflow: f64 = model
            .entries()
            .iter()
            .filter(|f| f.amount < 0.0)
            .map(|f| f.amount)
            .sum();
        assert!((outflow + payment * 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_fee_flows_divide_across_payments() {
        let loan = loan(RepaymentMethod::EqualPrincipal);

        let quarterly = FeeItem::new("management", 1_200.0, FeeFrequency::Quarterly, false);
        let model = CashFlowModel::fee_flows(&quarterly, &loan);
        assert_eq!(model.len(), 4);
        for flow in model.entries() {
            assert!((flow.amount + 300.0).abs() < 1e-9);
        }

        let upfront = FeeItem::new("arrangement", 5_000.0, FeeFrequency::Upfront, false);
        let model = CashFlowModel::fee_flows(&upfront, &loan);
        assert_eq!(model.len(), 1);
        assert_eq!(model.entries()[0].date, loan.start_date);
        assert_eq!(model.entries()[0].amount, -5_000.0);
    }

    #[test]
    fn test_merge_combines_same_day_flows() {
        let loan_model = CashFlowModel::loan_flows(&loan(RepaymentMethod::EqualPrincipal));
        let fee = FeeItem::new("arrangement", 5_000.0, FeeFrequency::Upfront, false);

        let mut merged = loan_model.clone();
        merged.merge(&CashFlowModel::fee_flows(&fee, &loan(RepaymentMethod::EqualPrincipal)));

        // Same date count: the upfront fee lands on the disbursement date
        assert_eq!(merged.len(), loan_model.len());
        let first = merged.entries()[0];
        assert_eq!(first.amount, 120_000.0 - 5_000.0);
    }
}
