use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Applicant-provided snapshot captured at intake.
///
/// Defaults (age 0, income 0, no flyer number) are legitimate inputs; the
/// screening engine reaches a decision for every field combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardApplication {
    pub age: u8,
    pub gross_annual_income: u32,
    pub frequent_flyer_number: Option<String>,
}

/// High level status tracked throughout the card application workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardApplicationStatus {
    Submitted,
    Accepted,
    Declined,
    Referred,
}

impl CardApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CardApplicationStatus::Submitted => "submitted",
            CardApplicationStatus::Accepted => "accepted",
            CardApplicationStatus::Declined => "declined",
            CardApplicationStatus::Referred => "referred",
        }
    }
}
