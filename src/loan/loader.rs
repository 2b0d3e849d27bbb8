//! Load loan and fee records from CSV files
//!
//! This is the system boundary where raw strings enter: labels resolve to
//! the closed enums here, leniently. Unrecognized repayment methods stay as
//! `Custom` and unrecognized fee frequencies load with no frequency, so a
//! bad label degrades a record instead of rejecting the whole file.

use chrono::NaiveDate;
use csv::Reader;
use log::warn;
use std::error::Error;
use std::path::Path;

use super::{FeeFrequency, FeeItem, InterestFrequency, LoanTerms, RepaymentMethod};

/// A stored loan record: contractual terms plus the identifier that
/// persistence and reporting collaborators key on
#[derive(Debug, Clone)]
pub struct LoanRecord {
    pub loan_id: u32,
    pub company: String,
    pub terms: LoanTerms,
}

/// A stored fee row, keyed to its loan record
#[derive(Debug, Clone)]
pub struct FeeRecord {
    pub loan_id: u32,
    pub item: FeeItem,
}

/// Raw CSV row matching the loans file columns
#[derive(Debug, serde::Deserialize)]
struct LoanCsvRow {
    #[serde(rename = "LoanID")]
    loan_id: u32,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "RepaymentMethod")]
    repayment_method: String,
    #[serde(rename = "TermMonths")]
    term_months: u32,
    #[serde(rename = "InterestFrequency")]
    interest_frequency: String,
    #[serde(rename = "NominalAnnualRate")]
    nominal_annual_rate: f64,
    #[serde(rename = "StartDate")]
    start_date: NaiveDate,
    #[serde(rename = "EndDate")]
    end_date: NaiveDate,
    #[serde(rename = "FirstPaymentDate")]
    first_payment_date: NaiveDate,
}

impl LoanCsvRow {
    fn into_record(self) -> Result<LoanRecord, Box<dyn Error>> {
        let interest_frequency = InterestFrequency::from_label(&self.interest_frequency)
            .ok_or_else(|| format!("Unknown InterestFrequency: {}", self.interest_frequency))?;

        let repayment_method = RepaymentMethod::from_label(&self.repayment_method);
        if matches!(repayment_method, RepaymentMethod::Custom(_)) {
            warn!(
                "repayment method '{}' on loan {} not recognized; scheduling as equal principal",
                self.repayment_method, self.loan_id
            );
        }

        Ok(LoanRecord {
            loan_id: self.loan_id,
            company: self.company,
            terms: LoanTerms {
                principal: self.principal,
                repayment_method,
                term_months: self.term_months,
                interest_frequency,
                nominal_annual_rate: self.nominal_annual_rate,
                start_date: self.start_date,
                end_date: self.end_date,
                first_payment_date: self.first_payment_date,
            },
        })
    }
}

/// Raw CSV row matching the fees file columns
#[derive(Debug, serde::Deserialize)]
struct FeeCsvRow {
    #[serde(rename = "LoanID")]
    loan_id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Frequency")]
    frequency: String,
    #[serde(rename = "BankBorne")]
    bank_borne: u8,
}

impl FeeCsvRow {
    fn into_record(self) -> FeeRecord {
        let frequency = FeeFrequency::from_label(&self.frequency);
        if frequency.is_none() {
            warn!(
                "fee frequency '{}' on loan {} not recognized; '{}' will schedule no payments",
                self.frequency, self.loan_id, self.name
            );
        }
        FeeRecord {
            loan_id: self.loan_id,
            item: FeeItem {
                name: self.name,
                amount: self.amount,
                frequency,
                bank_borne: self.bank_borne != 0,
            },
        }
    }
}

/// Load all loan records from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: LoanCsvRow = result?;
        records.push(row.into_record()?);
    }

    Ok(records)
}

/// Load loan records from any reader (e.g., string buffer, network stream)
pub fn load_loans_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LoanCsvRow = result?;
        records.push(row.into_record()?);
    }

    Ok(records)
}

/// Load all fee rows from a CSV file
pub fn load_fees<P: AsRef<Path>>(path: P) -> Result<Vec<FeeRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: FeeCsvRow = result?;
        records.push(row.into_record());
    }

    Ok(records)
}

/// Load fee rows from any reader
pub fn load_fees_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<FeeRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: FeeCsvRow = result?;
        records.push(row.into_record());
    }

    Ok(records)
}

/// Collect the fee items attached to one loan record
pub fn fees_for(records: &[FeeRecord], loan_id: u32) -> Vec<FeeItem> {
    records
        .iter()
        .filter(|record| record.loan_id == loan_id)
        .map(|record| record.item.clone())
        .collect()
}
