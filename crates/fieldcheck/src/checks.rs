//! Predicate checks
//!
//! Stateless checks over a single value. Messages are returned without a
//! field prefix; the rule table decides whether to prefix them.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::rule::Bound;
use crate::value::FieldValue;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@(?:[A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,24}$")
        .expect("email pattern is valid")
});

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("username pattern is valid"));

/// Symbols accepted by the `password` rule.
pub const PASSWORD_SYMBOLS: [char; 14] = [
    '!', '@', '#', '~', '$', '%', '^', '&', '*', '(', ')', '+', '|', '_',
];

// ============================================================================
// REQUIRED
// ============================================================================

/// Fails for integer zero and for blank strings. Other values pass.
pub fn required(value: FieldValue<'_>) -> Result<(), ValidationError> {
    let missing = match value {
        FieldValue::Int(v) => v == 0,
        FieldValue::Str(s) => s.trim().is_empty(),
        FieldValue::Other => false,
    };

    if missing {
        Err(ValidationError::new("required", "is required"))
    } else {
        Ok(())
    }
}

// ============================================================================
// PASSWORD
// ============================================================================

/// Requires a digit, a lowercase letter, an uppercase letter and a symbol,
/// checked in that order. Only the first missing category is reported.
pub fn password(input: &str) -> Result<(), ValidationError> {
    let requirements: [(fn(&char) -> bool, &'static str, &'static str); 4] = [
        (char::is_ascii_digit, "digit", "must contain at least one number"),
        (
            char::is_ascii_lowercase,
            "lowercase",
            "must contain at least one lowercase letter",
        ),
        (
            char::is_ascii_uppercase,
            "uppercase",
            "must contain at least one uppercase letter",
        ),
        (
            |c| PASSWORD_SYMBOLS.contains(c),
            "symbol",
            "must contain at least one symbol\n(!, @, #, ~, $, %, ^, &, *, (, ), +, |, _, )",
        ),
    ];

    for (matches, missing, message) in requirements {
        if !input.chars().any(|c| matches(&c)) {
            return Err(ValidationError::new("password", message).with_param("missing", missing));
        }
    }
    Ok(())
}

// ============================================================================
// EMAIL / USERNAME
// ============================================================================

/// Checks `local@label.label.tld` with an ASCII word-character alphabet and
/// a 2 to 24 character top-level segment.
pub fn email(input: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::new("email", "e-mail is invalid"))
    }
}

/// Letters, digits, `.`, `_` and `-`; at least one character.
pub fn username(input: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::new("username", "username is invalid"))
    }
}

// ============================================================================
// MIN / MAX
// ============================================================================

/// Integer value or string length (in chars) must not be below the bound.
pub fn min(value: FieldValue<'_>, bound: &Bound) -> Result<(), ValidationError> {
    let min = bound.value()?;

    match value {
        FieldValue::Int(v) if v < i128::from(min) => Err(ValidationError::new(
            "min",
            format!("value ({v}) is lower than minimum value ({min})"),
        )
        .with_param("min", min.to_string())
        .with_param("actual", v.to_string())),
        FieldValue::Str(s) => {
            let len = s.chars().count();
            if (len as i128) < i128::from(min) {
                Err(ValidationError::new(
                    "min",
                    format!("length ({len}) is lower than minimum length ({min})"),
                )
                .with_param("min", min.to_string())
                .with_param("actual", len.to_string()))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

/// Integer value or string length (in chars) must not exceed the bound.
pub fn max(value: FieldValue<'_>, bound: &Bound) -> Result<(), ValidationError> {
    let max = bound.value()?;

    match value {
        FieldValue::Int(v) if v > i128::from(max) => Err(ValidationError::new(
            "max",
            format!("value ({v}) is higher than maximum value ({max})"),
        )
        .with_param("max", max.to_string())
        .with_param("actual", v.to_string())),
        FieldValue::Str(s) => {
            let len = s.chars().count();
            if (len as i128) > i128::from(max) {
                // Wording is matched verbatim by existing consumers.
                Err(ValidationError::new(
                    "max",
                    format!("length ({len}) length is higher than maximim length ({max})"),
                )
                .with_param("max", max.to_string())
                .with_param("actual", len.to_string()))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}
