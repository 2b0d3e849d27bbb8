//! Error taxonomy for cost calculations
//!
//! Only entity-invariant violations surface to callers. Unrecognized labels
//! resolve at the record boundary, and solver non-convergence falls back to
//! a linear approximation inside the engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Input violations on loan terms, checked before any schedule is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// Principal must be a positive, finite currency amount
    #[error("loan principal must be positive, got {0}")]
    NonPositivePrincipal(f64),

    /// A zero-month term yields an empty repayment schedule
    #[error("loan term must cover at least one month")]
    EmptyTerm,

    /// The first payment cannot precede the loan start
    #[error("first payment date {first_payment} precedes loan start {start}")]
    FirstPaymentBeforeStart {
        first_payment: NaiveDate,
        start: NaiveDate,
    },
}
