use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::rules::AccountRules;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid regex"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("email is required")]
    EmailMissing,
    #[error("email must be at most {0} characters")]
    EmailTooLong(usize),
    #[error("email is not a valid address")]
    EmailMalformed,
    #[error("username is required")]
    UsernameMissing,
    #[error("username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },
    #[error("username may only contain letters, numbers, '_', '-' and '.'")]
    UsernameCharacters,
    #[error("password is required")]
    PasswordMissing,
    #[error("password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },
}

/// Returns the normalized (trimmed, lower-cased) address.
pub fn validate_email(rules: &AccountRules, raw: &str) -> Result<String, FieldError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(FieldError::EmailMissing);
    }
    if email.chars().count() > rules.max_email_length {
        return Err(FieldError::EmailTooLong(rules.max_email_length));
    }
    if !EMAIL_RE.is_match(&email) {
        return Err(FieldError::EmailMalformed);
    }
    Ok(email)
}

/// Returns the trimmed username. Case is preserved for display; uniqueness is
/// checked case-insensitively by the store.
pub fn validate_username(rules: &AccountRules, raw: &str) -> Result<String, FieldError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(FieldError::UsernameMissing);
    }
    let len = username.chars().count();
    if len < rules.min_username_length || len > rules.max_username_length {
        return Err(FieldError::UsernameLength {
            min: rules.min_username_length,
            max: rules.max_username_length,
        });
    }
    if !USERNAME_RE.is_match(username) {
        return Err(FieldError::UsernameCharacters);
    }
    Ok(username.to_string())
}

/// Passwords are never trimmed or rewritten; only their shape is checked.
pub fn validate_password(rules: &AccountRules, raw: &str) -> Result<(), FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::PasswordMissing);
    }
    let len = raw.chars().count();
    if len < rules.min_password_length || len > rules.max_password_length {
        return Err(FieldError::PasswordLength {
            min: rules.min_password_length,
            max: rules.max_password_length,
        });
    }
    Ok(())
}
