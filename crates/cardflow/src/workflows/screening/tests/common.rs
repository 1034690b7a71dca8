use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::screening::domain::{ApplicationId, CreditCardApplication};
use crate::workflows::screening::evaluation::{ScreeningConfig, ScreeningEngine};
use crate::workflows::screening::repository::{
    ApplicationRecord, ApplicationRepository, DecisionAlert, DecisionNotifier, NotifyError,
    RepositoryError,
};
use crate::workflows::screening::validator::{
    FrequentFlyerValidator, ValidationMode, EXPIRED_LICENSE_KEY,
};
use crate::workflows::screening::{screening_router, CardApplicationService};

pub(super) fn screening_config() -> ScreeningConfig {
    ScreeningConfig::default()
}

pub(super) fn high_income_application() -> CreditCardApplication {
    CreditCardApplication {
        age: 35,
        gross_annual_income: 100_000,
        frequent_flyer_number: Some("ff-42".to_string()),
    }
}

pub(super) fn low_income_application() -> CreditCardApplication {
    CreditCardApplication {
        age: 42,
        gross_annual_income: 19_999,
        frequent_flyer_number: Some("x".to_string()),
    }
}

pub(super) fn mid_income_application(age: u8) -> CreditCardApplication {
    CreditCardApplication {
        age,
        gross_annual_income: 45_000,
        frequent_flyer_number: Some("ff-42".to_string()),
    }
}

/// Recording validator double. Every interaction is counted so tests can
/// assert the engine's side-effect contract, not just its return value.
pub(super) struct RecordingValidator {
    valid: bool,
    license_key: String,
    mode: Mutex<ValidationMode>,
    pub(super) validity_calls: AtomicUsize,
    pub(super) mode_writes: AtomicUsize,
    pub(super) license_reads: AtomicUsize,
    last_number: Mutex<Option<Option<String>>>,
}

impl RecordingValidator {
    pub(super) fn accepting() -> Self {
        Self::new(true, "ACTIVE")
    }

    pub(super) fn rejecting() -> Self {
        Self::new(false, "ACTIVE")
    }

    pub(super) fn expired() -> Self {
        Self::new(true, EXPIRED_LICENSE_KEY)
    }

    fn new(valid: bool, license_key: &str) -> Self {
        Self {
            valid,
            license_key: license_key.to_string(),
            mode: Mutex::new(ValidationMode::Quick),
            validity_calls: AtomicUsize::new(0),
            mode_writes: AtomicUsize::new(0),
            license_reads: AtomicUsize::new(0),
            last_number: Mutex::new(None),
        }
    }

    pub(super) fn total_interactions(&self) -> usize {
        self.validity_calls.load(Ordering::SeqCst)
            + self.mode_writes.load(Ordering::SeqCst)
            + self.license_reads.load(Ordering::SeqCst)
    }

    /// The argument of the most recent validity check, if one happened.
    pub(super) fn last_number(&self) -> Option<Option<String>> {
        self.last_number
            .lock()
            .expect("validator mutex poisoned")
            .clone()
    }
}

impl FrequentFlyerValidator for RecordingValidator {
    fn is_valid(&self, number: Option<&str>) -> bool {
        self.validity_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_number.lock().expect("validator mutex poisoned") =
            Some(number.map(str::to_string));
        self.valid
    }

    fn validation_mode(&self) -> ValidationMode {
        *self.mode.lock().expect("validator mutex poisoned")
    }

    fn set_validation_mode(&self, mode: ValidationMode) {
        self.mode_writes.fetch_add(1, Ordering::SeqCst);
        *self.mode.lock().expect("validator mutex poisoned") = mode;
    }

    fn license_key(&self) -> String {
        self.license_reads.fetch_add(1, Ordering::SeqCst);
        self.license_key.clone()
    }
}

pub(super) fn engine_with(validator: Arc<RecordingValidator>) -> ScreeningEngine<RecordingValidator> {
    ScreeningEngine::new(validator, screening_config())
}

pub(super) fn build_service() -> (
    CardApplicationService<MemoryRepository, MemoryNotifier, RecordingValidator>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
    Arc<RecordingValidator>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let validator = Arc::new(RecordingValidator::accepting());
    let service = CardApplicationService::new(
        repository.clone(),
        notifier.clone(),
        validator.clone(),
        screening_config(),
    );
    (service, repository, notifier, validator)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
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
        guard.insert(record.application_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<DecisionAlert>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<DecisionAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl DecisionNotifier for MemoryNotifier {
    fn publish(&self, alert: DecisionAlert) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn screening_router_with_service(
    service: CardApplicationService<MemoryRepository, MemoryNotifier, RecordingValidator>,
) -> axum::Router {
    screening_router(Arc::new(service))
}
