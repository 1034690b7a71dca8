use serde::{Deserialize, Serialize};

/// Adjudication outcome for a screened application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardApplicationDecision {
    AutoAccepted,
    AutoDeclined,
    ReferredToHuman,
}

impl CardApplicationDecision {
    pub const fn label(self) -> &'static str {
        match self {
            CardApplicationDecision::AutoAccepted => "auto_accepted",
            CardApplicationDecision::AutoDeclined => "auto_declined",
            CardApplicationDecision::ReferredToHuman => "referred_to_human",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            CardApplicationDecision::AutoAccepted => {
                "application accepted automatically".to_string()
            }
            CardApplicationDecision::AutoDeclined => {
                "application declined automatically".to_string()
            }
            CardApplicationDecision::ReferredToHuman => {
                "referred to a human underwriter".to_string()
            }
        }
    }
}
