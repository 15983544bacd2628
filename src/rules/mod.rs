//! Password policy rules
//!
//! Each rule checks a single constraint on the candidate password.

mod breach;
mod case;
mod digit;
mod length;
mod special;

pub use breach::{BreachLookupRule, breach_suffix_listed, hash_password};
pub use case::{HasLowerCaseRule, HasUpperCaseRule};
pub use digit::HasDigitRule;
pub use length::{DEFAULT_MIN_LENGTH, LengthRule};
pub use special::{HasSpecialCharRule, SPECIAL_CHARS};

use secrecy::SecretString;
use thiserror::Error;

use crate::pwned::{LookupError, PwnedClient};

/// Result type for rule checks.
/// - `Ok(Some(violation))` - Rule failed with violation
/// - `Ok(None)` - Rule passed
/// - `Err(LookupError)` - Fatal error while checking (breach lookup only)
pub type RuleResult = Result<Option<PolicyViolation>, LookupError>;

/// A policy constraint that a password failed to meet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Password is too short! Must contain {min_length} or more characters")]
    TooShort { min_length: usize },
    #[error("Password must contain number")]
    NoDigit,
    #[error("Password must contain special character")]
    NoSpecialChar,
    #[error("Password must contain at least one upper letter")]
    NoUpperCase,
    #[error("Password must contain at least one lower letter")]
    NoLowerCase,
    #[error("This password is leaked! Choose another one")]
    Breached,
}

impl PolicyViolation {
    /// Name of the rule that reports this violation.
    pub fn rule(&self) -> &'static str {
        match self {
            PolicyViolation::TooShort { .. } => LengthRule::NAME,
            PolicyViolation::NoDigit => HasDigitRule::NAME,
            PolicyViolation::NoSpecialChar => HasSpecialCharRule::NAME,
            PolicyViolation::NoUpperCase => HasUpperCaseRule::NAME,
            PolicyViolation::NoLowerCase => HasLowerCaseRule::NAME,
            PolicyViolation::Breached => BreachLookupRule::<PwnedClient>::NAME,
        }
    }
}

/// A single password policy check.
pub trait Rule: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Checks the password against this rule.
    fn check(&self, password: &SecretString) -> RuleResult;
}
