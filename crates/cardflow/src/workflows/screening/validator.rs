use serde::{Deserialize, Serialize};

/// License key value marking the validator's backing service as unusable.
pub const EXPIRED_LICENSE_KEY: &str = "EXPIRED";

/// Depth hint recorded on the validator before a validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    Quick,
    Detailed,
}

impl ValidationMode {
    pub const fn label(self) -> &'static str {
        match self {
            ValidationMode::Quick => "quick",
            ValidationMode::Detailed => "detailed",
        }
    }
}

/// Externally owned frequent-flyer validation capability.
///
/// A validator instance outlives individual evaluations, so the mode hint is
/// interior-mutable behind `&self`. The mode write is not isolated across
/// concurrent evaluations sharing one instance; hosts that screen
/// concurrently supply one validator per call or serialize access.
pub trait FrequentFlyerValidator: Send + Sync {
    /// Validity of the supplied number. The number is handed over verbatim,
    /// absent values included.
    fn is_valid(&self, number: Option<&str>) -> bool;

    /// Out-parameter variant reporting validity through a caller-owned flag.
    fn validate(&self, number: Option<&str>, is_valid: &mut bool) {
        *is_valid = self.is_valid(number);
    }

    /// Mode hint last recorded by an evaluation.
    fn validation_mode(&self) -> ValidationMode;

    fn set_validation_mode(&self, mode: ValidationMode);

    /// License key of the validator's backing service. [`EXPIRED_LICENSE_KEY`]
    /// means its answers cannot be trusted.
    fn license_key(&self) -> String;
}
