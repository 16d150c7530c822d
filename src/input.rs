//! Explicit, fallible coercion of raw form input.
//!
//! Every value typed by a user arrives as a string. Handlers run it through
//! these functions before any request is built; an `Err` short-circuits the
//! command and is shown through the notifier.

use std::ops::RangeInclusive;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("Choose a {field}")]
    NotSelected { field: &'static str },

    #[error("{field} must be a whole number")]
    NotANumber { field: &'static str },

    #[error("{field} must be a valid amount")]
    NotAnAmount { field: &'static str },

    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: i64 },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Enter at least one tag")]
    NoTags,
}

/// Trimmed, non-empty text.
pub fn required_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(text.to_owned())
}

pub fn parse_int(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    raw.parse().map_err(|_| ValidationError::NotANumber { field })
}

pub fn parse_int_at_least(field: &'static str, raw: &str, min: i64) -> Result<i64, ValidationError> {
    let value = parse_int(field, raw)?;
    if value < min {
        return Err(ValidationError::TooSmall { field, min });
    }
    Ok(value)
}

pub fn parse_int_in(
    field: &'static str,
    raw: &str,
    range: RangeInclusive<i64>,
) -> Result<i64, ValidationError> {
    let value = parse_int(field, raw)?;
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(value)
}

/// The id picked in a select; the empty placeholder option means "nothing".
pub fn parse_id(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    match raw.trim() {
        "" => Err(ValidationError::NotSelected { field }),
        raw => match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(ValidationError::NotSelected { field }),
        },
    }
}

/// A finite, non-negative decimal amount.
pub fn parse_price(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::NotAnAmount { field }),
    }
}

/// Split a comma separated tag list, trimming tokens and dropping empty ones.
///
/// ```rust
/// use rest_mvu::input::{split_tags, ValidationError};
///
/// assert_eq!(split_tags(" rust, ,web,").unwrap(), vec!["rust", "web"]);
/// assert_eq!(split_tags(" , "), Err(ValidationError::NoTags));
/// ```
pub fn split_tags(raw: &str) -> Result<Vec<String>, ValidationError> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if tags.is_empty() {
        return Err(ValidationError::NoTags);
    }
    Ok(tags)
}
