//! Password policy validation library
//!
//! This library checks candidate passwords against a fixed chain of policy
//! rules, ending with a k-anonymity lookup in the Pwned Passwords corpus.
//!
//! Rules run in order and stop at the first failure:
//!
//! 1. at least 8 characters
//! 2. at least one digit `0-9`
//! 3. at least one of `@ ! # $ % ^ & *`
//! 4. at least one upper-case letter
//! 5. at least one lower-case letter
//! 6. not present in the breach corpus
//!
//! # Features
//!
//! - `async` (default): Enables cancellable validation and a channel-based async entry point
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_PWNED_API_URL`: Range API base URL
//!   (default: `https://api.pwnedpasswords.com/range`)
//! - `PWD_PWNED_TIMEOUT_SECS`: HTTP timeout in seconds (default: `10`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_policy::{PasswordValidator, ValidationError};
//! use secrecy::SecretString;
//!
//! let validator = PasswordValidator::new().expect("Invalid breach lookup config");
//! let password = SecretString::new("Admin123*q@Q".to_string().into());
//!
//! match validator.validate(&password) {
//!     Ok(()) => println!("accepted"),
//!     Err(ValidationError::Rejected(violation)) => println!("rejected: {}", violation),
//!     Err(e) => eprintln!("lookup failed: {}", e),
//! }
//! ```

// Internal modules
mod driver;
mod pwned;
mod rules;
mod validator;

// Public API
pub use driver::{CheckReport, DriverError, Rejection, check_password_file, get_io_paths};
pub use pwned::{ConfigError, LookupError, PwnedClient, PwnedConfig, RangeLookup};
pub use rules::{
    BreachLookupRule, DEFAULT_MIN_LENGTH, HasDigitRule, HasLowerCaseRule, HasSpecialCharRule,
    HasUpperCaseRule, LengthRule, PolicyViolation, Rule, RuleResult, SPECIAL_CHARS,
    breach_suffix_listed, hash_password,
};
pub use validator::{PasswordValidator, ValidationError};

#[cfg(feature = "async")]
pub use validator::validate_password_tx;
