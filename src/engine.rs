//! Comprehensive cost aggregation
//!
//! Orchestrates the schedule generators and the rate solver: one annualized
//! rate per customer-borne fee, summed with the nominal rate into the total
//! comprehensive financing cost.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CostError;
use crate::loan::{FeeFrequency, FeeItem, LoanTerms};
use crate::schedule::{fee_schedule, principal_schedule, PeriodMode};
use crate::solver::{solve_periodic_rate, NpvEquation, SolvedRate};

/// Annualized cost contribution of a single fee.
///
/// Created once per calculation call; long-term storage belongs to the
/// persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeCostDetail {
    pub name: String,
    pub amount: f64,

    /// Annualized equivalent rate as a decimal fraction (0 for bank-borne)
    pub annual_rate: f64,

    /// Rate over the whole term: annual_rate * term_months / 12
    pub period_rate: f64,

    pub bank_borne: bool,

    /// False when the root finder gave up and the linear approximation was
    /// used instead
    pub converged: bool,
}

impl FeeCostDetail {
    /// Per-month rate shown alongside the annual rate in reports
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }
}

/// Result of a comprehensive cost calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Nominal rate plus all fee rates, as a percentage
    pub total_cost_percent: f64,

    /// Per-fee breakdown, in input order
    pub details: Vec<FeeCostDetail>,
}

impl CostBreakdown {
    /// Combined annualized rate of the customer-borne fees (decimal)
    pub fn fee_rate_sum(&self) -> f64 {
        self.details.iter().map(|d| d.annual_rate).sum()
    }
}

/// Fee-annualization engine.
///
/// Holds the period-mode setting as an immutable parameter for its lifetime;
/// each calculation is otherwise a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEngine {
    mode: PeriodMode,
}

impl CostEngine {
    pub fn new(mode: PeriodMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    /// Compute the comprehensive financing cost of a loan with its fees.
    ///
    /// Bank-borne fees are reported with zero rates and excluded from the
    /// sum. Detail order matches the input order.
    pub fn compute_cost(
        &self,
        loan: &LoanTerms,
        fees: &[FeeItem],
    ) -> Result<CostBreakdown, CostError> {
        loan.validate()?;

        let mut fee_rate_total = 0.0;
        let mut details = Vec::with_capacity(fees.len());

        for fee in fees {
            if fee.bank_borne {
                details.push(FeeCostDetail {
                    name: fee.name.clone(),
                    amount: fee.amount,
                    annual_rate: 0.0,
                    period_rate: 0.0,
                    bank_borne: true,
                    converged: true,
                });
                continue;
            }

            let solved = self.solve_fee_rate(fee, loan);
            let annual_rate = solved.value();
            fee_rate_total += annual_rate;

            details.push(FeeCostDetail {
                name: fee.name.clone(),
                amount: fee.amount,
                annual_rate,
                period_rate: annual_rate * loan.term_years(),
                bank_borne: false,
                converged: solved.converged(),
            });
        }

        Ok(CostBreakdown {
            total_cost_percent: (loan.nominal_annual_rate + fee_rate_total) * 100.0,
            details,
        })
    }

    /// Annualized equivalent rate of a single fee, for callers that do not
    /// need a full cost run. Bank-borne fees rate as zero.
    pub fn annualized_fee_rate(&self, fee: &FeeItem, loan: &LoanTerms) -> Result<f64, CostError> {
        loan.validate()?;
        if fee.bank_borne {
            return Ok(0.0);
        }
        Ok(self.solve_fee_rate(fee, loan).value())
    }

    /// Solve the balance equation for one fee's annual rate.
    ///
    /// Never fails: when the root finder cannot balance the equation the
    /// closed-form linear approximation is returned, tagged as a fallback.
    pub fn solve_fee_rate(&self, fee: &FeeItem, loan: &LoanTerms) -> SolvedRate {
        let use_integer = self
            .mode
            .use_integer(loan.start_date, loan.first_payment_date);
        let repayments = principal_schedule(loan, use_integer);
        let fee_payments = fee_schedule(fee, loan);

        let equation = if fee.frequency == Some(FeeFrequency::Upfront) {
            NpvEquation::upfront(loan.principal, fee.amount, &repayments)
        } else {
            NpvEquation::periodic(loan.principal, &repayments, &fee_payments)
        };

        match solve_periodic_rate(&equation, self.initial_guess(fee, loan)) {
            Some(period_rate) => {
                let factor = loan.interest_frequency.annualization_factor();
                SolvedRate::Converged((period_rate * factor).max(0.0))
            }
            None => {
                let fallback = self.fallback_rate(fee, loan);
                debug!(
                    "root finder failed for fee '{}'; using linear approximation {:.6}",
                    fee.name, fallback
                );
                SolvedRate::FallbackUsed(fallback)
            }
        }
    }

    /// Heuristic starting point for the root finder
    fn initial_guess(&self, fee: &FeeItem, loan: &LoanTerms) -> f64 {
        match fee.frequency {
            Some(FeeFrequency::Upfront) => fee.amount / (loan.principal * loan.term_years()),
            Some(periodic) => {
                fee.amount * periodic.payments_per_year() / (loan.principal * 12.0)
            }
            // No recognized frequency: the equation has an empty fee side
            // and solves to zero from any sane start
            None => fee.amount / loan.principal,
        }
    }

    /// Closed-form annual-rate approximation used when the solver fails
    fn fallback_rate(&self, fee: &FeeItem, loan: &LoanTerms) -> f64 {
        let per_year = fee
            .frequency
            .map(|f| f.payments_per_year())
            .unwrap_or(0.0);
        if per_year > 0.0 {
            fee.amount * per_year / loan.principal
        } else {
            fee.amount / loan.principal / loan.term_years()
        }
    }
}
