use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{ApplicationId, CardApplicationStatus, CreditCardApplication};
use super::evaluation::{
    CardApplicationDecision, ScreeningConfig, ScreeningEngine, ScreeningOutcome,
};
use super::repository::{
    ApplicationRecord, ApplicationRepository, DecisionAlert, DecisionNotifier, NotifyError,
    RepositoryError,
};
use super::validator::FrequentFlyerValidator;

/// Service composing the repository, decision notifier, and screening engine.
pub struct CardApplicationService<R, N, V> {
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: Arc<ScreeningEngine<V>>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("card-{id:06}"))
}

impl<R, N, V> CardApplicationService<R, N, V>
where
    R: ApplicationRepository + 'static,
    N: DecisionNotifier + 'static,
    V: FrequentFlyerValidator + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        validator: Arc<V>,
        config: ScreeningConfig,
    ) -> Self {
        let engine = Arc::new(ScreeningEngine::new(validator, config));
        Self {
            repository,
            notifier,
            engine,
        }
    }

    /// Submit a new application, returning the repository-backed record.
    pub fn submit(
        &self,
        application: CreditCardApplication,
    ) -> Result<ApplicationRecord, CardServiceError> {
        let record = ApplicationRecord {
            application_id: next_application_id(),
            application,
            status: CardApplicationStatus::Submitted,
            outcome: None,
            received_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Screen a submitted application and persist the outcome.
    pub fn evaluate(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ScreeningOutcome, CardServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let decision = self.engine.evaluate(&record.application);
        let outcome = ScreeningOutcome {
            application_id: record.application_id.clone(),
            decision,
        };

        record.status = match decision {
            CardApplicationDecision::AutoAccepted => CardApplicationStatus::Accepted,
            CardApplicationDecision::AutoDeclined => CardApplicationStatus::Declined,
            CardApplicationDecision::ReferredToHuman => CardApplicationStatus::Referred,
        };
        record.outcome = Some(outcome.clone());

        self.repository.update(record)?;

        if decision == CardApplicationDecision::AutoAccepted {
            let mut details = BTreeMap::new();
            details.insert("decision".to_string(), decision.label().to_string());
            self.notifier.publish(DecisionAlert {
                template: "card_auto_accepted".to_string(),
                application_id: outcome.application_id.clone(),
                details,
            })?;
        }

        Ok(outcome)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, CardServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum CardServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
