//! Financing Cost System - Annualized comprehensive financing cost engine
//! for enterprise loan disclosure
//!
//! This library provides:
//! - Amortization schedules for equal-principal, equal-installment, and
//!   bullet repayment
//! - Calendar-aware fractional period arithmetic under a fixed
//!   30-day-month convention
//! - Split-period NPV discounting with a per-period rate solver for
//!   ancillary fees
//! - Comprehensive cost aggregation (nominal rate plus annualized fee rates)
//! - CSV record ingestion and batch runs over stored loan records

pub mod engine;
pub mod error;
pub mod loan;
pub mod runner;
pub mod schedule;
pub mod solver;

// Re-export commonly used types
pub use engine::{CostBreakdown, CostEngine, FeeCostDetail};
pub use error::CostError;
pub use loan::{FeeFrequency, FeeItem, InterestFrequency, LoanTerms, RepaymentMethod};
pub use runner::CostRunner;
pub use schedule::{CashFlowModel, PeriodMode, ScheduleEntry};
pub use solver::SolvedRate;
