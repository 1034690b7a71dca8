use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use cardflow::workflows::screening::{
    ApplicationId, ApplicationRecord, ApplicationRepository, CardApplicationStatus, DecisionAlert,
    DecisionNotifier, FrequentFlyerValidator, NotifyError, RepositoryError, ScreeningConfig,
    ValidationMode,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) screening: ScreeningConfig,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            guard.insert(record.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == CardApplicationStatus::Submitted)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDecisionNotifier {
    events: Arc<Mutex<Vec<DecisionAlert>>>,
}

impl DecisionNotifier for InMemoryDecisionNotifier {
    fn publish(&self, alert: DecisionAlert) -> Result<(), NotifyError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryDecisionNotifier {
    pub(crate) fn events(&self) -> Vec<DecisionAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

/// Adapter standing in for the external frequent-flyer service: any non-blank
/// number counts as valid, and the license key comes from
/// `CARDFLOW_VALIDATOR_LICENSE` (defaults to `ACTIVE`).
pub(crate) struct EnvLicenseValidator {
    license_key: String,
    mode: Mutex<ValidationMode>,
}

impl EnvLicenseValidator {
    pub(crate) fn from_env() -> Self {
        let license_key =
            std::env::var("CARDFLOW_VALIDATOR_LICENSE").unwrap_or_else(|_| "ACTIVE".to_string());
        Self {
            license_key,
            mode: Mutex::new(ValidationMode::Quick),
        }
    }
}

impl FrequentFlyerValidator for EnvLicenseValidator {
    fn is_valid(&self, number: Option<&str>) -> bool {
        number.map(|value| !value.trim().is_empty()).unwrap_or(false)
    }

    fn validation_mode(&self) -> ValidationMode {
        *self.mode.lock().expect("validator mutex poisoned")
    }

    fn set_validation_mode(&self, mode: ValidationMode) {
        *self.mode.lock().expect("validator mutex poisoned") = mode;
    }

    fn license_key(&self) -> String {
        self.license_key.clone()
    }
}
