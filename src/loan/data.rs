//! Loan and fee record structures matching the stored record format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CostError;

/// How the loan principal is repaid over the term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// Level principal each period, interest on the declining balance
    EqualPrincipal,
    /// Level total payment each period (annuity)
    EqualInstallment,
    /// Entire principal repaid in the final period
    Bullet,
    /// Label not recognized at ingestion; schedules as EqualPrincipal
    Custom(String),
}

impl RepaymentMethod {
    /// Resolve a raw label from an external record. Unrecognized labels are
    /// preserved as `Custom` rather than rejected.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "equal_principal" | "equalprincipal" | "equal principal" => {
                RepaymentMethod::EqualPrincipal
            }
            "equal_installment" | "equalinstallment" | "equal installment" => {
                RepaymentMethod::EqualInstallment
            }
            "bullet" => RepaymentMethod::Bullet,
            _ => RepaymentMethod::Custom(label.to_string()),
        }
    }
}

/// How often interest is settled; also the time unit of period offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestFrequency {
    Day,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl InterestFrequency {
    /// Length of one interest period in months. Day uses the 30-day-month
    /// approximation carried throughout the system.
    pub fn unit_months(&self) -> f64 {
        match self {
            InterestFrequency::Day => 1.0 / 30.0,
            InterestFrequency::Month => 1.0,
            InterestFrequency::Quarter => 3.0,
            InterestFrequency::HalfYear => 6.0,
            InterestFrequency::Year => 12.0,
        }
    }

    /// Simple multiplier converting a per-period rate to an annual rate
    pub fn annualization_factor(&self) -> f64 {
        match self {
            InterestFrequency::Day => 360.0,
            InterestFrequency::Month => 12.0,
            InterestFrequency::Quarter => 4.0,
            InterestFrequency::HalfYear => 2.0,
            InterestFrequency::Year => 1.0,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Some(InterestFrequency::Day),
            "month" | "monthly" => Some(InterestFrequency::Month),
            "quarter" | "quarterly" => Some(InterestFrequency::Quarter),
            "half_year" | "halfyear" | "semiannual" => Some(InterestFrequency::HalfYear),
            "year" | "annual" => Some(InterestFrequency::Year),
            _ => None,
        }
    }
}

/// How often an ancillary fee is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeFrequency {
    Annual,
    Quarterly,
    Monthly,
    /// One-time payment at origination, withheld from the disbursed principal
    Upfront,
}

impl FeeFrequency {
    /// Scheduled payments per year (Upfront pays once, outside the schedule)
    pub fn payments_per_year(&self) -> f64 {
        match self {
            FeeFrequency::Annual => 1.0,
            FeeFrequency::Quarterly => 4.0,
            FeeFrequency::Monthly => 12.0,
            FeeFrequency::Upfront => 0.0,
        }
    }

    /// Months between scheduled payments (Upfront has no schedule)
    pub fn months_apart(&self) -> Option<u32> {
        match self {
            FeeFrequency::Annual => Some(12),
            FeeFrequency::Quarterly => Some(3),
            FeeFrequency::Monthly => Some(1),
            FeeFrequency::Upfront => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" | "year" => Some(FeeFrequency::Annual),
            "quarterly" | "quarter" => Some(FeeFrequency::Quarterly),
            "monthly" | "month" => Some(FeeFrequency::Monthly),
            "upfront" | "one_time" | "onetime" => Some(FeeFrequency::Upfront),
            _ => None,
        }
    }
}

/// A single loan's contractual terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal in currency units
    pub principal: f64,

    /// Repayment method for the principal
    pub repayment_method: RepaymentMethod,

    /// Loan term in months
    pub term_months: u32,

    /// Interest settlement frequency (the period unit for rate solving)
    pub interest_frequency: InterestFrequency,

    /// Nominal annual interest rate as a decimal fraction
    pub nominal_annual_rate: f64,

    /// Date the loan is disbursed
    pub start_date: NaiveDate,

    /// Date the loan matures
    pub end_date: NaiveDate,

    /// Date of the first scheduled repayment
    pub first_payment_date: NaiveDate,
}

impl LoanTerms {
    /// Check the entity invariants before any schedule is built
    pub fn validate(&self) -> Result<(), CostError> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CostError::NonPositivePrincipal(self.principal));
        }
        if self.term_months == 0 {
            return Err(CostError::EmptyTerm);
        }
        if self.first_payment_date < self.start_date {
            return Err(CostError::FirstPaymentBeforeStart {
                first_payment: self.first_payment_date,
                start: self.start_date,
            });
        }
        Ok(())
    }

    /// Loan term in years under the fixed 12-month convention
    pub fn term_years(&self) -> f64 {
        self.term_months as f64 / 12.0
    }
}

/// An ancillary fee attached to a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeItem {
    pub name: String,

    /// Amount of a single payment (periodic fees repeat this amount)
    pub amount: f64,

    /// `None` marks a fee whose frequency label was not recognized at
    /// ingestion; it schedules no payments and contributes a zero rate.
    pub frequency: Option<FeeFrequency>,

    /// Fees borne by the lender are excluded from the borrower's cost
    pub bank_borne: bool,
}

impl FeeItem {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        frequency: FeeFrequency,
        bank_borne: bool,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency: Some(frequency),
            bank_borne,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_loan() -> LoanTerms {
        LoanTerms {
            principal: 1_000_000.0,
            repayment_method: RepaymentMethod::EqualPrincipal,
            term_months: 12,
            interest_frequency: InterestFrequency::Month,
            nominal_annual_rate: 0.06,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            first_payment_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_loan().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let mut loan = sample_loan();
        loan.principal = 0.0;
        assert!(matches!(
            loan.validate(),
            Err(CostError::NonPositivePrincipal(_))
        ));

        let mut loan = sample_loan();
        loan.term_months = 0;
        assert_eq!(loan.validate(), Err(CostError::EmptyTerm));

        let mut loan = sample_loan();
        loan.first_payment_date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert!(matches!(
            loan.validate(),
            Err(CostError::FirstPaymentBeforeStart { .. })
        ));
    }

    #[test]
    fn test_repayment_method_labels() {
        assert_eq!(
            RepaymentMethod::from_label("equal_principal"),
            RepaymentMethod::EqualPrincipal
        );
        assert_eq!(RepaymentMethod::from_label("Bullet"), RepaymentMethod::Bullet);
        assert_eq!(
            RepaymentMethod::from_label("balloon"),
            RepaymentMethod::Custom("balloon".to_string())
        );
    }

    #[test]
    fn test_frequency_tables_are_exhaustive() {
        assert_eq!(InterestFrequency::Month.unit_months(), 1.0);
        assert_eq!(InterestFrequency::Quarter.unit_months(), 3.0);
        assert!((InterestFrequency::Day.unit_months() - 1.0 / 30.0).abs() < 1e-15);

        assert_eq!(FeeFrequency::Monthly.payments_per_year(), 12.0);
        assert_eq!(FeeFrequency::Upfront.payments_per_year(), 0.0);
        assert_eq!(FeeFrequency::Quarterly.months_apart(), Some(3));
        assert_eq!(FeeFrequency::Upfront.months_apart(), None);
    }

    #[test]
    fn test_annualization_factors_scale_consistently() {
        // The same per-period rate annualizes identically whichever unit it
        // is quoted in: month x12 == quarter x4 x3 == year x1 x12
        let month = InterestFrequency::Month.annualization_factor();
        let quarter = InterestFrequency::Quarter.annualization_factor();
        let half_year = InterestFrequency::HalfYear.annualization_factor();
        let year = InterestFrequency::Year.annualization_factor();

        assert_eq!(month, quarter * 3.0);
        assert_eq!(month, half_year * 6.0);
        assert_eq!(month, year * 12.0);
        assert_eq!(InterestFrequency::Day.annualization_factor(), 360.0);
    }
}
