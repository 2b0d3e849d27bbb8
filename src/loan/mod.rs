//! Loan and fee record structures with CSV ingestion

mod data;
pub mod loader;

pub use data::{FeeFrequency, FeeItem, InterestFrequency, LoanTerms, RepaymentMethod};
pub use loader::{
    fees_for, load_fees, load_fees_from_reader, load_loans, load_loans_from_reader, FeeRecord,
    LoanRecord,
};
