//! The two NPV balance equations solved for the implied per-period rate

use super::discount::split_period_discount;
use crate::schedule::ScheduleEntry;

/// A cash-flow balance equation: disbursed funds on one side, discounted
/// outflows on the other. A root of [`residual`](Self::residual) is the
/// per-period rate at which the two sides balance.
#[derive(Debug, Clone)]
pub struct NpvEquation<'a> {
    /// Funds actually made available to the borrower at origination
    disbursed: f64,

    /// Principal repayments owed over the term
    principal_schedule: &'a [ScheduleEntry],

    /// Periodic fee payments; empty for the upfront variant
    fee_schedule: &'a [ScheduleEntry],
}

impl<'a> NpvEquation<'a> {
    /// Upfront variant: the fee is withheld from the disbursed principal,
    /// not discounted as a future flow
    pub fn upfront(
        principal: f64,
        fee_amount: f64,
        principal_schedule: &'a [ScheduleEntry],
    ) -> Self {
        Self {
            disbursed: principal - fee_amount,
            principal_schedule,
            fee_schedule: &[],
        }
    }

    /// Periodic variant: fee payments are discounted alongside repayments
    pub fn periodic(
        principal: f64,
        principal_schedule: &'a [ScheduleEntry],
        fee_schedule: &'a [ScheduleEntry],
    ) -> Self {
        Self {
            disbursed: principal,
            principal_schedule,
            fee_schedule,
        }
    }

    /// Disbursed funds minus the present value of every scheduled outflow
    pub fn residual(&self, rate: f64) -> f64 {
        let repayments: f64 = self
            .principal_schedule
            .iter()
            .map(|e| split_period_discount(e.amount, e.period_offset, rate))
            .sum();
        let fees: f64 = self
            .fee_schedule
            .iter()
            .map(|e| split_period_discount(e.amount, e.period_offset, rate))
            .sum();
        self.disbursed - repayments - fees
    }
}
