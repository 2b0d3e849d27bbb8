//! Batch runner for repeated cost calculations
//!
//! Configures the engine once, then runs many stored records (or one loan
//! under several period modes) without rebuilding anything per call.

use crate::engine::{CostBreakdown, CostEngine};
use crate::error::CostError;
use crate::loan::{FeeItem, LoanTerms};
use crate::schedule::PeriodMode;

/// Pre-configured runner for batch cost calculations
///
/// # Example
/// ```ignore
/// let runner = CostRunner::new(PeriodMode::Auto);
/// for (loan, fees) in records {
///     let breakdown = runner.run(&loan, &fees)?;
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CostRunner {
    engine: CostEngine,
}

impl CostRunner {
    pub fn new(mode: PeriodMode) -> Self {
        Self {
            engine: CostEngine::new(mode),
        }
    }

    pub fn with_engine(engine: CostEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &CostEngine {
        &self.engine
    }

    /// Run a single calculation under the configured mode
    pub fn run(&self, loan: &LoanTerms, fees: &[FeeItem]) -> Result<CostBreakdown, CostError> {
        self.engine.compute_cost(loan, fees)
    }

    /// Run many stored records under the same engine configuration
    pub fn run_batch(
        &self,
        records: &[(LoanTerms, Vec<FeeItem>)],
    ) -> Vec<Result<CostBreakdown, CostError>> {
        records
            .iter()
            .map(|(loan, fees)| self.engine.compute_cost(loan, fees))
            .collect()
    }

    /// Run one loan under several period modes for comparison
    pub fn run_modes(
        &self,
        loan: &LoanTerms,
        fees: &[FeeItem],
        modes: &[PeriodMode],
    ) -> Vec<Result<CostBreakdown, CostError>> {
        modes
            .iter()
            .map(|&mode| CostEngine::new(mode).compute_cost(loan, fees))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{FeeFrequency, InterestFrequency, RepaymentMethod};
    use chrono::NaiveDate;

    fn test_loan() -> LoanTerms {
        LoanTerms {
            principal: 500_000.0,
            repayment_method: RepaymentMethod::EqualPrincipal,
            term_months: 24,
            interest_frequency: InterestFrequency::Month,
            nominal_annual_rate: 0.045,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            first_payment_date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_run_batch_keeps_record_order() {
        let runner = CostRunner::new(PeriodMode::Auto);
        let fee = FeeItem::new("arrangement", 2_500.0, FeeFrequency::Upfront, false);

        let mut bigger = test_loan();
        bigger.principal = 900_000.0;
        let records = vec![
            (test_loan(), vec![fee.clone()]),
            (bigger, vec![fee]),
            (test_loan(), vec![]),
        ];

        let results = runner.run_batch(&records);
        assert_eq!(results.len(), 3);

        let first = results[0].as_ref().unwrap();
        let second = results[1].as_ref().unwrap();
        let third = results[2].as_ref().unwrap();

        // Same fee against a larger principal costs less
        assert!(first.total_cost_percent > second.total_cost_percent);
        assert_eq!(third.total_cost_percent, 4.5);
    }

    #[test]
    fn test_run_modes_compares_settings() {
        let runner = CostRunner::new(PeriodMode::Auto);
        let fee = FeeItem::new("arrangement", 2_500.0, FeeFrequency::Upfront, false);
        let loan = test_loan();

        let results = runner.run_modes(
            &loan,
            &[fee],
            &[PeriodMode::Auto, PeriodMode::Integer, PeriodMode::Precise],
        );
        assert_eq!(results.len(), 3);
        for result in &results {
            assert!(result.is_ok());
        }
    }
}
