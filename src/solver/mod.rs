//! NPV equation construction and per-period rate solving

mod discount;
mod npv;
mod root;

pub use discount::{split_period_discount, RATE_EPSILON};
pub use npv::NpvEquation;
pub use root::{solve_periodic_rate, SolvedRate};
