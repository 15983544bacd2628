//! Letter case rules - uppercase and lowercase presence.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyViolation, Rule, RuleResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasUpperCaseRule;

impl HasUpperCaseRule {
    pub const NAME: &'static str = "uppercase";
}

impl Rule for HasUpperCaseRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(char::is_uppercase) {
            return Ok(None);
        }
        Ok(Some(PolicyViolation::NoUpperCase))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasLowerCaseRule;

impl HasLowerCaseRule {
    pub const NAME: &'static str = "lowercase";
}

impl Rule for HasLowerCaseRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(char::is_lowercase) {
            return Ok(None);
        }
        Ok(Some(PolicyViolation::NoLowerCase))
    }
}
