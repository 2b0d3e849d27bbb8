//! Fee payment schedules for the fee-annualization path

use super::amortization::ScheduleEntry;
use super::period::add_months;
use crate::loan::{FeeItem, LoanTerms};

/// Generate a fee's own payment schedule.
///
/// Periodic fees repeat the full amount every interval, with whole-month
/// period offsets from the start date; intervals that do not fit the term
/// are dropped (integer division). Upfront fees produce no entries: they
/// reduce the disbursed principal in the equation instead. Fees with no
/// recognized frequency also schedule nothing.
pub fn fee_schedule(fee: &FeeItem, loan: &LoanTerms) -> Vec<ScheduleEntry> {
    let Some(months_apart) = fee.frequency.and_then(|f| f.months_apart()) else {
        return Vec::new();
    };

    let payments = loan.term_months / months_apart;
    (0..payments)
        .map(|i| {
            let offset_months = i * months_apart;
            ScheduleEntry {
                date: add_months(loan.start_date, offset_months),
                amount: fee.amount,
                period_offset: offset_months as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{FeeFrequency, InterestFrequency, RepaymentMethod};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(term_months: u32) -> LoanTerms {
        LoanTerms {
            principal: 1_000_000.0,
            repayment_method: RepaymentMethod::EqualPrincipal,
            term_months,
            interest_frequency: InterestFrequency::Month,
            nominal_annual_rate: 0.06,
            start_date: date(2024, 1, 10),
            end_date: date(2025, 1, 10),
            first_payment_date: date(2024, 2, 10),
        }
    }

    #[test]
    fn test_monthly_fee_repeats_full_amount() {
        let fee = FeeItem::new("service", 500.0, FeeFrequency::Monthly, false);
        let schedule = fee_schedule(&fee, &loan(12));

        assert_eq!(schedule.len(), 12);
        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.amount, 500.0);
            assert_eq!(entry.period_offset, i as f64);
            assert_eq!(entry.date, add_months(date(2024, 1, 10), i as u32));
        }
    }

    #[test]
    fn test_quarterly_fee_truncates_partial_interval() {
        let fee = FeeItem::new("management", 1_200.0, FeeFrequency::Quarterly, false);
        // 13 months fit only four whole quarters
        let schedule = fee_schedule(&fee, &loan(13));

        assert_eq!(schedule.len(), 4);
        let offsets: Vec<f64> = schedule.iter().map(|e| e.period_offset).collect();
        assert_eq!(offsets, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_annual_fee_counts_whole_years() {
        let fee = FeeItem::new("audit", 8_000.0, FeeFrequency::Annual, false);

        assert_eq!(fee_schedule(&fee, &loan(24)).len(), 2);
        assert_eq!(fee_schedule(&fee, &loan(18)).len(), 1);
        // Shorter than a year: nothing scheduled
        assert!(fee_schedule(&fee, &loan(11)).is_empty());
    }

    #[test]
    fn test_upfront_and_unrecognized_schedule_nothing() {
        let upfront = FeeItem::new("arrangement", 10_000.0, FeeFrequency::Upfront, false);
        assert!(fee_schedule(&upfront, &loan(12)).is_empty());

        let unrecognized = FeeItem {
            name: "mystery".to_string(),
            amount: 10_000.0,
            frequency: None,
            bank_borne: false,
        };
        assert!(fee_schedule(&unrecognized, &loan(12)).is_empty());
    }
}
