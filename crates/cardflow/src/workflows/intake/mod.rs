//! Batch intake of credit-card applications from CSV exports.
//!
//! Expected columns: `Age`, `Gross Annual Income`, `Frequent Flyer Number`.
//! A blank flyer-number cell means the applicant has none.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::screening::CreditCardApplication;

/// Error raised while importing a batch of applications.
#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read applications export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse applications export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{value}' is not a valid {field}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Importer turning CSV exports into application values ready for screening.
pub struct ApplicationCsvImporter;

impl ApplicationCsvImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
    ) -> Result<Vec<CreditCardApplication>, BatchImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<CreditCardApplication>, BatchImportError> {
        parser::parse_applications(reader)
    }
}
