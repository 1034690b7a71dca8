use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::BatchImportError;
use crate::workflows::screening::CreditCardApplication;

pub(crate) fn parse_applications<R: Read>(
    reader: R,
) -> Result<Vec<CreditCardApplication>, BatchImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut applications = Vec::new();
    for (index, record) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
        let row = record?;
        applications.push(row.into_application(index + 1)?);
    }

    Ok(applications)
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Gross Annual Income")]
    gross_annual_income: String,
    #[serde(
        rename = "Frequent Flyer Number",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    frequent_flyer_number: Option<String>,
}

impl ApplicationRow {
    fn into_application(self, row: usize) -> Result<CreditCardApplication, BatchImportError> {
        let age = self
            .age
            .parse::<u8>()
            .map_err(|_| BatchImportError::InvalidField {
                row,
                field: "age",
                value: self.age.clone(),
            })?;

        // Exports commonly carry thousands separators in money columns.
        let income_raw = self.gross_annual_income.replace(',', "");
        let gross_annual_income =
            income_raw
                .parse::<u32>()
                .map_err(|_| BatchImportError::InvalidField {
                    row,
                    field: "gross annual income",
                    value: self.gross_annual_income.clone(),
                })?;

        Ok(CreditCardApplication {
            age,
            gross_annual_income,
            frequent_flyer_number: self.frequent_flyer_number,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
