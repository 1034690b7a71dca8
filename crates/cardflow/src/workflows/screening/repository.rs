use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, CardApplicationStatus, CreditCardApplication};
use super::evaluation::ScreeningOutcome;

/// Repository record containing the application, outcome, and status metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub application: CreditCardApplication,
    pub status: CardApplicationStatus,
    pub outcome: Option<ScreeningOutcome>,
    pub received_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn decision_rationale(&self) -> String {
        match &self.outcome {
            Some(outcome) => outcome.decision.summary(),
            None => "pending screening".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            status: self.status.label(),
            decision_rationale: self.decision_rationale(),
            decision: self
                .outcome
                .as_ref()
                .map(|outcome| outcome.decision.label()),
            received_at: self.received_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound decision hooks (e.g., issuance or e-mail adapters).
pub trait DecisionNotifier: Send + Sync {
    fn publish(&self, alert: DecisionAlert) -> Result<(), NotifyError>;
}

/// Alert payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionAlert {
    pub template: String,
    pub application_id: ApplicationId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<&'static str>,
    pub received_at: DateTime<Utc>,
}
