//! Breach lookup rule - checks the password against the Pwned Passwords corpus.
//!
//! Only the first 5 hex characters of the SHA-1 digest leave the process
//! (k-anonymity range query). The rest of the digest is matched locally.

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

use super::{PolicyViolation, Rule, RuleResult};
use crate::pwned::{LookupError, PwnedClient, RangeLookup};

/// Length of the hash prefix sent to the range API.
pub const PREFIX_LEN: usize = 5;

/// Fails when the password appears in the breach corpus.
#[derive(Debug, Clone)]
pub struct BreachLookupRule<L = PwnedClient> {
    lookup: L,
}

impl<L: RangeLookup> BreachLookupRule<L> {
    pub const NAME: &'static str = "breach";

    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }
}

impl<L: RangeLookup> Rule for BreachLookupRule<L> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        let digest = hash_password(password);
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);

        let body = self.lookup.fetch_range(prefix)?;

        if breach_suffix_listed(&body, suffix)? {
            return Ok(Some(PolicyViolation::Breached));
        }
        Ok(None)
    }
}

/// SHA-1 digest of the password as 40 uppercase hex characters.
pub fn hash_password(password: &SecretString) -> String {
    let hash = Sha1::digest(password.expose_secret().as_bytes());
    hex::encode_upper(hash)
}

/// Scans a range response (`SUFFIX:COUNT` per line) for `suffix`.
///
/// Blank lines are skipped; any other line without a `:` makes the whole
/// response malformed. Both sides are compared upper-cased.
pub fn breach_suffix_listed(body: &str, suffix: &str) -> Result<bool, LookupError> {
    let suffix = suffix.to_ascii_uppercase();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((found, _count)) = line.split_once(':') else {
            return Err(LookupError::MalformedResponse(line.to_string()));
        };

        if found.trim().to_ascii_uppercase() == suffix {
            return Ok(true);
        }
    }

    Ok(false)
}
