use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::EmployeeRequest;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("empty name field")]
    EmptyName,
    #[error("invalid name format")]
    InvalidName,
    #[error("invalid email format")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn is_alpha_and_space(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `"re  za"` -> `"Re Za"`
pub fn sanitize_name(name: &str) -> String {
    name.split(' ')
        .filter(|token| !token.chars().all(char::is_whitespace))
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Checks run in a fixed order (empty name, name format, email) so the
/// reported error is deterministic. Names are rewritten only on success.
pub fn validate_and_sanitize(request: &mut EmployeeRequest) -> Result<(), ValidationError> {
    let first_name = request.first_name.trim();
    let last_name = request.last_name.trim();

    if first_name.is_empty() || last_name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if !is_alpha_and_space(first_name) || !is_alpha_and_space(last_name) {
        return Err(ValidationError::InvalidName);
    }

    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }

    let first_name = sanitize_name(first_name);
    let last_name = sanitize_name(last_name);
    request.first_name = first_name;
    request.last_name = last_name;

    Ok(())
}
