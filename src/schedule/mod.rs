//! Schedule generation: period arithmetic, principal repayments, fee
//! payments, and the dated ledger used by reports

mod amortization;
mod cashflows;
mod fees;
mod period;

pub use amortization::{principal_schedule, ScheduleEntry, REFERENCE_ANNUAL_RATE};
pub use cashflows::{payment_dates, CashFlow, CashFlowModel};
pub use fees::fee_schedule;
pub use period::{add_months, periods_between, PeriodMode};
