//! Rule set and dispatch
//!
//! | rule       | argument | applies to     |
//! |------------|----------|----------------|
//! | `required` | -        | integer, string |
//! | `password` | -        | string         |
//! | `email`    | -        | string         |
//! | `username` | -        | string         |
//! | `min`      | integer  | integer, string |
//! | `max`      | integer  | integer, string |

use std::fmt;

use crate::annotation::RuleToken;
use crate::checks;
use crate::error::ValidationError;
use crate::value::{FieldKind, FieldValue};

// ============================================================================
// BOUND
// ============================================================================

/// Argument of `min` / `max`.
///
/// An argument that is not an integer is kept as written and reported when
/// the rule is evaluated, not when the table is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Parsed decimal integer.
    Int(i64),
    /// Raw argument that failed to parse.
    Invalid(String),
}

impl Bound {
    /// Parses a decimal integer with an optional sign.
    pub fn parse(argument: &str) -> Self {
        argument
            .parse::<i64>()
            .map_or_else(|_| Self::Invalid(argument.to_owned()), Self::Int)
    }

    /// Returns the bound or the `invalid_bound` failure.
    pub fn value(&self) -> Result<i64, ValidationError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Invalid(raw) => Err(ValidationError::new(
                "invalid_bound",
                format!("{raw} is not integer"),
            )
            .with_param("argument", raw.clone())),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A resolved rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Non-zero integer / non-blank string.
    Required,
    /// Digit, lowercase, uppercase and symbol.
    Password,
    /// E-mail address.
    Email,
    /// Letters, digits, `.`, `_`, `-`.
    Username,
    /// Lower bound on value or length.
    Min(Bound),
    /// Upper bound on value or length.
    Max(Bound),
    /// Parameterized rule with an unknown name, kept by lenient tables and
    /// reported when evaluated.
    Unknown(String),
}

impl Rule {
    /// Resolves a token against the supported rule set.
    ///
    /// Returns `None` for names that are not supported in the token's form:
    /// `min` without an argument is as unknown as `foo`.
    pub fn from_token(token: &RuleToken) -> Option<Self> {
        match token {
            RuleToken::Flag(name) => match name.as_str() {
                "required" => Some(Self::Required),
                "password" => Some(Self::Password),
                "email" => Some(Self::Email),
                "username" => Some(Self::Username),
                _ => None,
            },
            RuleToken::Param { name, argument } => match name.as_str() {
                "min" => Some(Self::Min(Bound::parse(argument))),
                "max" => Some(Self::Max(Bound::parse(argument))),
                _ => None,
            },
        }
    }

    /// Rule name as written in annotations.
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Password => "password",
            Self::Email => "email",
            Self::Username => "username",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Unknown(name) => name,
        }
    }

    /// Whether the rule inspects values of this kind.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Self::Required | Self::Min(_) | Self::Max(_) => {
                matches!(kind, FieldKind::Int | FieldKind::Str)
            }
            Self::Password | Self::Email | Self::Username => kind == FieldKind::Str,
            Self::Unknown(_) => true,
        }
    }

    /// Whether failure messages start with the field name.
    pub fn prefixes_field(&self) -> bool {
        !matches!(self, Self::Email | Self::Username | Self::Unknown(_))
    }

    /// Evaluates the rule against a value.
    ///
    /// Values of a kind the rule does not inspect pass. The returned error
    /// carries no field information yet.
    pub fn check(&self, value: FieldValue<'_>) -> Result<(), ValidationError> {
        match (self, value) {
            (Self::Required, value) => checks::required(value),
            (Self::Password, FieldValue::Str(s)) => checks::password(s),
            (Self::Email, FieldValue::Str(s)) => checks::email(s),
            (Self::Username, FieldValue::Str(s)) => checks::username(s),
            (Self::Password | Self::Email | Self::Username, _) => Ok(()),
            (Self::Min(bound), value) => checks::min(value, bound),
            (Self::Max(bound), value) => checks::max(value, bound),
            (Self::Unknown(name), _) => Err(ValidationError::new(
                "unknown_rule",
                format!("{name} invalid key"),
            )
            .with_param("rule", name.clone())),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min(bound) | Self::Max(bound) => write!(f, "{}={bound}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
