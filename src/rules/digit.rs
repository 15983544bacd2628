//! Digit rule - requires at least one ASCII digit.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyViolation, Rule, RuleResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasDigitRule;

impl HasDigitRule {
    pub const NAME: &'static str = "digit";
}

impl Rule for HasDigitRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(|c| c.is_ascii_digit()) {
            return Ok(None);
        }
        Ok(Some(PolicyViolation::NoDigit))
    }
}
