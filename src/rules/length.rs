//! Length rule - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyViolation, Rule, RuleResult};

pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Requires at least `min_length` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRule {
    min_length: usize,
}

impl LengthRule {
    pub const NAME: &'static str = "length";

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for LengthRule {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl Rule for LengthRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Counts characters, not bytes.
    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().count() < self.min_length {
            return Ok(Some(PolicyViolation::TooShort {
                min_length: self.min_length,
            }));
        }
        Ok(None)
    }
}
