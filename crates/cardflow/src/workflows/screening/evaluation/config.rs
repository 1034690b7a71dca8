use serde::{Deserialize, Serialize};

/// Policy thresholds applied while screening an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Gross annual income at or above which an application is accepted
    /// without consulting the validator.
    pub auto_accept_income: u32,
    /// Gross annual income below which a verified adult application is
    /// declined.
    pub auto_decline_income: u32,
    /// Applicants younger than this are referred to a human underwriter.
    pub minimum_age: u8,
    /// Applicants at or above this age get the detailed validation mode.
    pub detailed_review_age: u8,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            auto_accept_income: 100_000,
            auto_decline_income: 20_000,
            minimum_age: 20,
            detailed_review_age: 30,
        }
    }
}
