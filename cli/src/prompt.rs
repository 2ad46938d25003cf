//! Secret input and local password checks.

#[cfg(test)]
#[path = "prompt_test.rs"]
mod prompt_test;

use std::io;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Use the flag value when given, otherwise read it from the terminal without echo.
pub fn secret(value: Option<String>, prompt: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => rpassword::prompt_password(prompt),
    }
}

/// Checked before any request is made. Mismatch wins over length.
pub fn validate_new_password(new: &str, confirm: &str) -> Result<(), String> {
    if new != confirm {
        return Err("Passwords do not match".to_owned());
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters long"));
    }
    Ok(())
}
