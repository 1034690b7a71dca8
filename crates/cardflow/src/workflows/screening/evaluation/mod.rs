mod config;
mod policy;

pub use config::ScreeningConfig;
pub use policy::CardApplicationDecision;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, CreditCardApplication};
use super::validator::{FrequentFlyerValidator, ValidationMode, EXPIRED_LICENSE_KEY};

/// Stateless evaluator mapping one application to a decision, delegating
/// frequent-flyer checks to the injected validator.
pub struct ScreeningEngine<V> {
    validator: Arc<V>,
    config: ScreeningConfig,
}

impl<V: FrequentFlyerValidator> ScreeningEngine<V> {
    pub fn new(validator: Arc<V>, config: ScreeningConfig) -> Self {
        Self { validator, config }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Decide an application using the validator's return-channel check.
    pub fn evaluate(&self, application: &CreditCardApplication) -> CardApplicationDecision {
        self.decide(application, |validator, number| validator.is_valid(number))
    }

    /// Decide an application using the validator's out-parameter check.
    ///
    /// Same decision table as [`evaluate`](Self::evaluate); only the channel
    /// carrying validity differs.
    pub fn evaluate_using_out(
        &self,
        application: &CreditCardApplication,
    ) -> CardApplicationDecision {
        self.decide(application, |validator, number| {
            let mut is_valid = false;
            validator.validate(number, &mut is_valid);
            is_valid
        })
    }

    // Checks run in a fixed order and the first match wins. The validator
    // stays untouched on the fast-accept path, and is never asked for
    // validity while its license is expired.
    fn decide(
        &self,
        application: &CreditCardApplication,
        check: impl FnOnce(&V, Option<&str>) -> bool,
    ) -> CardApplicationDecision {
        if application.gross_annual_income >= self.config.auto_accept_income {
            return CardApplicationDecision::AutoAccepted;
        }

        if self.validator.license_key() == EXPIRED_LICENSE_KEY {
            return CardApplicationDecision::ReferredToHuman;
        }

        let mode = if application.age >= self.config.detailed_review_age {
            ValidationMode::Detailed
        } else {
            ValidationMode::Quick
        };
        self.validator.set_validation_mode(mode);

        if !check(
            self.validator.as_ref(),
            application.frequent_flyer_number.as_deref(),
        ) {
            return CardApplicationDecision::ReferredToHuman;
        }

        if application.age < self.config.minimum_age {
            return CardApplicationDecision::ReferredToHuman;
        }

        if application.gross_annual_income < self.config.auto_decline_income {
            return CardApplicationDecision::AutoDeclined;
        }

        CardApplicationDecision::ReferredToHuman
    }
}

/// Persisted result of one screening pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub application_id: ApplicationId,
    pub decision: CardApplicationDecision,
}
