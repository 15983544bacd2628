//! Checks `check_passwords.txt` and writes the passwords that pass every
//! rule to `safe_passwords.txt`.

use std::process::ExitCode;

use pwd_policy::{PasswordValidator, check_password_file, get_io_paths};

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let validator = match PasswordValidator::new() {
        Ok(validator) => validator,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (input, output) = get_io_paths();

    match check_password_file(&input, &output, &validator) {
        Ok(report) => {
            for rejection in &report.rejected {
                println!("{} {}", rejection.password, rejection.violation);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
