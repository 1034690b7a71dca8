//! Credit-card application intake, screening, and decision plumbing.
//!
//! The screening engine applies ordered policy checks to one application and
//! consults an injected frequent-flyer validator for the cases the rules
//! alone cannot settle. The surrounding service, repository, and router wire
//! that core into a host program.

pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, CardApplicationStatus, CreditCardApplication};
pub use evaluation::{
    CardApplicationDecision, ScreeningConfig, ScreeningEngine, ScreeningOutcome,
};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, DecisionAlert,
    DecisionNotifier, NotifyError, RepositoryError,
};
pub use router::screening_router;
pub use service::{CardApplicationService, CardServiceError};
pub use validator::{FrequentFlyerValidator, ValidationMode, EXPIRED_LICENSE_KEY};
