//! Construction-time field validation.
//!
//! Aggregate constructors call these before anything is stored. Nothing in
//! the domain validates on assignment, so an aggregate that exists is valid.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::shared::errors::{DomainError, DomainResult};

lazy_static! {
    static ref NATIONAL_ID: Regex = Regex::new(r"^\d{7,8}$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^\d{7,15}$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap();
    static ref PLATE: Regex = Regex::new(r"^[A-Z0-9]{6,7}$").unwrap();
    static ref USERNAME: Regex = Regex::new(r"^[A-Za-z0-9_.-]{4,20}$").unwrap();
}

fn invalid(field: &str, message: &str) -> DomainError {
    DomainError::Validation(format!("{field} {message}"))
}

/// National identity number: exactly 7 or 8 digits.
pub fn national_id(value: &str) -> DomainResult<()> {
    if NATIONAL_ID.is_match(value) {
        Ok(())
    } else {
        Err(invalid("national_id", "must be exactly 7 or 8 digits"))
    }
}

/// Email: exactly one `@`, non-empty local and domain parts, and at least
/// one `.` in the domain.
pub fn email(value: &str) -> DomainResult<()> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(invalid("email", "is not a valid address"))
    }
}

/// Phone: 7 to 15 digits.
pub fn phone(value: &str) -> DomainResult<()> {
    if PHONE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("phone", "must be 7 to 15 digits"))
    }
}

/// License plate: trimmed, uppercased, then 6 or 7 alphanumerics.
/// Returns the normalized plate, which is what gets stored and compared.
pub fn plate(value: &str) -> DomainResult<String> {
    let normalized = value.trim().to_uppercase();
    if PLATE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(invalid("plate", "must be 6 or 7 letters or digits"))
    }
}

/// Username: 4 to 20 characters from `[A-Za-z0-9_.-]`.
pub fn username(value: &str) -> DomainResult<()> {
    if USERNAME.is_match(value) {
        Ok(())
    } else {
        Err(invalid(
            "username",
            "must be 4 to 20 letters, digits, or '_.-'",
        ))
    }
}

/// Raw password, checked before hashing: at least 6 characters.
pub fn password(value: &str) -> DomainResult<()> {
    if value.chars().count() >= 6 {
        Ok(())
    } else {
        Err(invalid("password", "must be at least 6 characters"))
    }
}

/// Trimmed, non-empty text. Returns the trimmed value.
pub fn required_text(field: &'static str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(invalid(field, "cannot be empty"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Monetary amount that may be zero.
pub fn non_negative(field: &'static str, amount: Decimal) -> DomainResult<()> {
    if amount < Decimal::ZERO {
        Err(invalid(field, "cannot be negative"))
    } else {
        Ok(())
    }
}

/// Monetary amount that must be strictly positive.
pub fn positive(field: &'static str, amount: Decimal) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        Err(invalid(field, "must be greater than zero"))
    } else {
        Ok(())
    }
}

/// Date ordering: `end` may equal but never precede `start`.
pub fn ordered_dates(
    start_field: &'static str,
    end_field: &'static str,
    start: NaiveDate,
    end: NaiveDate,
) -> DomainResult<()> {
    if end < start {
        Err(invalid(end_field, &format!("cannot precede {start_field}")))
    } else {
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
