//! Special character rule.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyViolation, Rule, RuleResult};

/// The only characters accepted as "special". Other punctuation does not count.
pub const SPECIAL_CHARS: [char; 8] = ['@', '!', '#', '$', '%', '^', '&', '*'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasSpecialCharRule;

impl HasSpecialCharRule {
    pub const NAME: &'static str = "special";
}

impl Rule for HasSpecialCharRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password
            .expose_secret()
            .chars()
            .any(|c| SPECIAL_CHARS.contains(&c))
        {
            return Ok(None);
        }
        Ok(Some(PolicyViolation::NoSpecialChar))
    }
}
