//! Line-oriented password file checker.
//!
//! Reads one candidate per line, writes the accepted ones to the output file
//! and collects the rejected ones for reporting.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;

use crate::pwned::{ConfigError, LookupError};
use crate::rules::PolicyViolation;
use crate::validator::{PasswordValidator, ValidationError};

pub const DEFAULT_INPUT: &str = "check_passwords.txt";
pub const DEFAULT_OUTPUT: &str = "safe_passwords.txt";

pub const INPUT_ENV: &str = "PWD_POLICY_INPUT";
pub const OUTPUT_ENV: &str = "PWD_POLICY_OUTPUT";

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Password check cancelled")]
    Cancelled,
}

/// A candidate that failed a policy rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub password: String,
    pub violation: PolicyViolation,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

/// Returns the input and output paths.
///
/// Priority:
/// 1. Environment variables `PWD_POLICY_INPUT` / `PWD_POLICY_OUTPUT`
/// 2. `check_passwords.txt` / `safe_passwords.txt` in the working directory
pub fn get_io_paths() -> (PathBuf, PathBuf) {
    let input = std::env::var(INPUT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT));
    let output = std::env::var(OUTPUT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT));
    (input, output)
}

/// Validates every line of `input` and writes accepted passwords to `output`.
///
/// Lines are trimmed before validation. The output file is truncated first.
///
/// # Errors
///
/// Returns error if:
/// - Either file cannot be opened, read or written
/// - A breach lookup fails (the run stops there, nothing is retried)
pub fn check_password_file<P, Q>(
    input: P,
    output: Q,
    validator: &PasswordValidator,
) -> Result<CheckReport, DriverError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| DriverError::Io { path, source }
    };

    let reader = BufReader::new(File::open(input).map_err(io_err(input))?);
    let mut writer = BufWriter::new(File::create(output).map_err(io_err(output))?);
    let mut report = CheckReport::default();

    for line in reader.lines() {
        let line = line.map_err(io_err(input))?;
        let candidate = line.trim();
        let password = SecretString::new(candidate.to_string().into());

        match validator.validate(&password) {
            Ok(()) => {
                writeln!(writer, "{}", candidate).map_err(io_err(output))?;
                report.accepted += 1;
            }
            Err(ValidationError::Rejected(violation)) => {
                report.rejected.push(Rejection {
                    password: candidate.to_string(),
                    violation,
                });
            }
            Err(ValidationError::Lookup(e)) => return Err(e.into()),
            Err(ValidationError::Cancelled) => return Err(DriverError::Cancelled),
        }
    }

    writer.flush().map_err(io_err(output))?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Checked {:?}: {} accepted, {} rejected",
        input,
        report.accepted,
        report.rejected.len()
    );

    Ok(report)
}
