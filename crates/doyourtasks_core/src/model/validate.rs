//! Client-side validation rules.
//!
//! # Responsibility
//! - Express the form-level checks the views apply before calling the API:
//!   blank required fields, email shape, password length.
//!
//! # Invariants
//! - These rules are advisory for the server: apart from the category
//!   closed-set check, nothing here is enforced server-side.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_CHARS: usize = 5;

/// Form-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was blank or whitespace-only.
    BlankField(&'static str),
    /// The email value does not look like an address.
    MalformedEmail(String),
    /// The password is shorter than [`PASSWORD_MIN_CHARS`].
    PasswordTooShort,
    /// The category value is not in the recognized closed set.
    UnknownCategory(String),
    /// The due date is neither an RFC 3339 instant nor a plain date.
    InvalidDueDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "required field is blank: {field}"),
            Self::MalformedEmail(value) => write!(f, "invalid email format: `{value}`"),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {PASSWORD_MIN_CHARS} characters long"
            ),
            Self::UnknownCategory(value) => write!(f, "unrecognized category: `{value}`"),
            Self::InvalidDueDate(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ValidationError {}

/// Validates the sign-in form: both fields filled.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationError> {
    require_filled("email", email)?;
    require_filled("password", password)?;
    Ok(())
}

/// Validates the sign-up form: all fields filled, email shaped like an
/// address, password long enough.
pub fn validate_sign_up(
    email: &str,
    password: &str,
    username: &str,
) -> Result<(), ValidationError> {
    require_filled("email", email)?;
    require_filled("password", password)?;
    require_filled("username", username)?;
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::MalformedEmail(email.to_string()));
    }
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validates a new note draft: non-blank text.
pub fn validate_note_text(text: &str) -> Result<(), ValidationError> {
    require_filled("text", text)
}

fn require_filled(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
