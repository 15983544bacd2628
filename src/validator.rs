//! Password validator - runs the rule chain.

use secrecy::SecretString;
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::pwned::{ConfigError, LookupError, PwnedClient, RangeLookup};
use crate::rules::{
    BreachLookupRule, HasDigitRule, HasLowerCaseRule, HasSpecialCharRule, HasUpperCaseRule,
    LengthRule, PolicyViolation, Rule,
};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    Rejected(#[from] PolicyViolation),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Validation cancelled")]
    Cancelled,
}

impl ValidationError {
    /// The policy violation, if this is a rejection.
    pub fn violation(&self) -> Option<&PolicyViolation> {
        match self {
            ValidationError::Rejected(v) => Some(v),
            _ => None,
        }
    }
}

/// Ordered chain of rules. Stops at the first failing rule.
pub struct PasswordValidator {
    rules: Vec<Box<dyn Rule>>,
}

impl PasswordValidator {
    /// Default chain with a breach client configured from the environment.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_lookup(PwnedClient::from_env()?))
    }

    /// Default chain: length, digit, special, uppercase, lowercase, breach.
    ///
    /// The breach rule is last so the network is only hit once every local
    /// rule has passed.
    pub fn with_lookup<L: RangeLookup + 'static>(lookup: L) -> Self {
        Self::from_rules(vec![
            Box::new(LengthRule::default()),
            Box::new(HasDigitRule),
            Box::new(HasSpecialCharRule),
            Box::new(HasUpperCaseRule),
            Box::new(HasLowerCaseRule),
            Box::new(BreachLookupRule::new(lookup)),
        ])
    }

    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validates the password against every rule in order.
    ///
    /// # Returns
    /// - `Ok(())` if all rules pass
    /// - `Err(ValidationError::Rejected)` for the first failing rule
    /// - `Err(ValidationError::Lookup)` if the breach lookup could not complete
    pub fn validate(&self, password: &SecretString) -> Result<(), ValidationError> {
        self.run(password, || false)
    }

    /// Like [`validate`](Self::validate), but checks the token before each rule.
    #[cfg(feature = "async")]
    pub fn validate_cancellable(
        &self,
        password: &SecretString,
        token: &CancellationToken,
    ) -> Result<(), ValidationError> {
        self.run(password, || token.is_cancelled())
    }

    fn run(
        &self,
        password: &SecretString,
        is_cancelled: impl Fn() -> bool,
    ) -> Result<(), ValidationError> {
        for rule in &self.rules {
            if is_cancelled() {
                return Err(ValidationError::Cancelled);
            }

            match rule.check(password) {
                Ok(None) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Rule passed: {}", rule.name());
                }
                Ok(Some(violation)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Password rejected by rule: {}", rule.name());
                    return Err(violation.into());
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Fatal error in password rule {}: {}", rule.name(), e);
                    return Err(e.into());
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Password accepted by all {} rules", self.rules.len());

        Ok(())
    }
}

/// Async version that validates on the blocking pool and sends the result via channel.
#[cfg(feature = "async")]
pub async fn validate_password_tx(
    validator: PasswordValidator,
    password: SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Result<(), ValidationError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("validation is about to start...");

    let handle = tokio::task::spawn_blocking(move || {
        validator.validate_cancellable(&password, &token)
    });

    let outcome = match handle.await {
        Ok(outcome) => outcome,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Password validation task failed: {}", _e);
            return;
        }
    };

    if let Err(_e) = tx.send(outcome).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password validation result: {}", _e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ADMIN_SUFFIX: &str = "22AE348AEB5660FC2140AEC35850C4DA997";

    /// Returns a fixed body and counts calls.
    struct CountingLookup {
        body: String,
        calls: Arc<AtomicUsize>,
    }

    impl RangeLookup for CountingLookup {
        fn fetch_range(&self, _prefix: &str) -> Result<String, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    struct DownLookup;

    impl RangeLookup for DownLookup {
        fn fetch_range(&self, _prefix: &str) -> Result<String, LookupError> {
            Err(LookupError::Transport("network unreachable".to_string()))
        }
    }

    fn validator_with_body(body: &str) -> (PasswordValidator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let lookup = CountingLookup {
            body: body.to_string(),
            calls: Arc::clone(&calls),
        };
        (PasswordValidator::with_lookup(lookup), calls)
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_default_rule_order() {
        let (validator, _) = validator_with_body("");
        assert_eq!(
            validator.rule_names(),
            vec!["length", "digit", "special", "uppercase", "lowercase", "breach"]
        );
    }

    #[test]
    fn test_validate_accepts_strong_unbreached() {
        let (validator, calls) = validator_with_body("0018A45C4D1DEF81644B54AB7F969B88D65:1");
        assert!(validator.validate(&secret("Admin123*q@Q")).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validate_rejects_breached() {
        // Local rules pass, so only the lookup decides
        let digest = crate::rules::hash_password(&secret("Admin123*q@Q"));
        let body = format!("{}:42", &digest[5..]);
        let (validator, _) = validator_with_body(&body);

        let result = validator.validate(&secret("Admin123*q@Q"));
        assert!(matches!(
            result,
            Err(ValidationError::Rejected(PolicyViolation::Breached))
        ));
    }

    #[test]
    fn test_validate_missing_uppercase_skips_lookup() {
        let (validator, calls) = validator_with_body(&format!("{}:8", ADMIN_SUFFIX));
        let result = validator.validate(&secret("admin123*q@q"));

        assert!(matches!(
            result,
            Err(ValidationError::Rejected(PolicyViolation::NoUpperCase))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validate_too_short_reported_first() {
        // Also lacks upper and lower case letters
        let (validator, calls) = validator_with_body("");
        let result = validator.validate(&secret("@241"));

        assert!(matches!(
            result,
            Err(ValidationError::Rejected(PolicyViolation::TooShort { min_length: 8 }))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validate_first_failure_only() {
        let (validator, _) = validator_with_body("");
        let cases = [
            ("abcdefgh", PolicyViolation::NoDigit),
            ("abcdefg1", PolicyViolation::NoSpecialChar),
            ("abcdef1!", PolicyViolation::NoUpperCase),
            ("ABCDEF1!", PolicyViolation::NoLowerCase),
        ];

        for (pwd, expected) in cases {
            let err = validator.validate(&secret(pwd)).unwrap_err();
            assert_eq!(err.violation(), Some(&expected), "password {:?}", pwd);
        }
    }

    #[test]
    fn test_validate_lookup_failure_surfaces_separately() {
        let validator = PasswordValidator::with_lookup(DownLookup);
        let result = validator.validate(&secret("Admin123*q@Q"));

        let err = result.unwrap_err();
        assert!(matches!(err, ValidationError::Lookup(LookupError::Transport(_))));
        assert!(err.violation().is_none());
    }

    #[test]
    fn test_from_rules_custom_chain() {
        let validator = PasswordValidator::from_rules(vec![
            Box::new(LengthRule::new(4)),
            Box::new(HasDigitRule),
        ]);
        assert!(validator.validate(&secret("abc1")).is_ok());
        assert!(matches!(
            validator.validate(&secret("abcd")),
            Err(ValidationError::Rejected(PolicyViolation::NoDigit))
        ));
    }

    #[test]
    fn test_error_display_uses_rule_message() {
        let err = ValidationError::from(PolicyViolation::NoSpecialChar);
        assert_eq!(err.to_string(), "Password must contain special character");
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    struct EmptyLookup;

    impl RangeLookup for EmptyLookup {
        fn fetch_range(&self, _prefix: &str) -> Result<String, LookupError> {
            Ok(String::new())
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test]
    async fn test_validate_with_cancellation() {
        let validator = PasswordValidator::with_lookup(EmptyLookup);
        let token = CancellationToken::new();
        token.cancel();

        let result = validator.validate_cancellable(&secret("Admin123*q@Q"), &token);
        assert!(matches!(result, Err(ValidationError::Cancelled)));
    }

    #[tokio::test]
    async fn test_validate_without_cancellation() {
        let validator = PasswordValidator::with_lookup(EmptyLookup);
        let token = CancellationToken::new();

        let result = validator.validate_cancellable(&secret("Admin123*q@Q"), &token);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_validate_password_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let validator = PasswordValidator::with_lookup(EmptyLookup);

        validate_password_tx(validator, secret("admin123*q@q"), token, tx).await;

        let outcome = rx.recv().await.expect("Should receive outcome");
        assert!(matches!(
            outcome,
            Err(ValidationError::Rejected(PolicyViolation::NoUpperCase))
        ));
    }
}
