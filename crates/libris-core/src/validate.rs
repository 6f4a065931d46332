//! Field validation
//!
//! The editor surface's contract with the store: records must pass these
//! checks before `add` or `update` is called, because the store itself
//! performs no validation. Kept in the core so every surface shares one
//! set of rules.

use chrono::{Datelike, Local};
use thiserror::Error;

use crate::models::{Book, Reader};

/// A field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is required but empty
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field is shorter than the minimum length
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Publication year outside the accepted range
    #[error("year must be between 1000 and {max}")]
    YearOutOfRange { max: i32 },

    /// ISBN is not 10 or 13 digits (separators allowed)
    #[error("isbn must contain exactly 10 or 13 digits")]
    InvalidIsbn,

    /// Email address is not well-formed
    #[error("email is not a valid address")]
    InvalidEmail,

    /// Phone number is too short or contains invalid characters
    #[error("phone must be at least 10 characters of digits and separators")]
    InvalidPhone,
}

/// Check a book against the catalog's form rules
pub fn validate_book(book: &Book) -> Result<(), ValidationError> {
    require_min_len("title", &book.title, 2)?;
    require_min_len("author", &book.author, 2)?;

    let max_year = Local::now().year();
    if book.year < 1000 || book.year > max_year {
        return Err(ValidationError::YearOutOfRange { max: max_year });
    }

    if book.genre.trim().is_empty() {
        return Err(ValidationError::Required { field: "genre" });
    }

    validate_isbn(&book.isbn)
}

/// Check a reader against the catalog's form rules
///
/// The registration date is required by the form but is enforced here by
/// the type itself, so it needs no runtime check.
pub fn validate_reader(reader: &Reader) -> Result<(), ValidationError> {
    require_min_len("firstName", &reader.first_name, 2)?;
    require_min_len("lastName", &reader.last_name, 2)?;
    validate_email(&reader.email)?;
    validate_phone(&reader.phone)
}

fn require_min_len(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 {
        Err(ValidationError::Required { field })
    } else if len < min {
        Err(ValidationError::TooShort { field, min })
    } else {
        Ok(())
    }
}

/// 10 or 13 digits with optional `-` separators, nothing else
fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    if isbn.is_empty() || !isbn.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(ValidationError::InvalidIsbn);
    }
    let digits = isbn.chars().filter(char::is_ascii_digit).count();
    if digits == 10 || digits == 13 {
        Ok(())
    } else {
        Err(ValidationError::InvalidIsbn)
    }
}

/// A single `@` with a non-empty local part and a dotted domain
fn validate_email(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(ValidationError::InvalidEmail),
    };

    if local.is_empty() || domain.len() < 3 {
        return Err(ValidationError::InvalidEmail);
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Optional leading `+`, then at least 10 characters of digits and
/// separators (spaces, `-`, parentheses)
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let rest = phone.strip_prefix('+').unwrap_or(phone);

    let valid_chars = rest
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));

    if valid_chars && rest.chars().count() >= 10 {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}
