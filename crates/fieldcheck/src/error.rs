//! Error types
//!
//! Two separate channels:
//!
//! - [`DeclarationError`] — a rule annotation itself is broken (malformed
//!   token, unknown rule, rule that cannot apply to the field's type). It is
//!   produced once, when the [`RuleTable`](crate::RuleTable) is built.
//! - [`ValidationError`] — a record's data violated a rule. It is produced
//!   per validation call and describes the first failure only.
//!
//! [`Error`] unifies both for the [`validate`](crate::validate) entry point.

use std::borrow::Cow;
use std::fmt;

use crate::annotation::AnnotationError;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The first rule violation found in a record.
///
/// `message` is the complete human-readable text. For `required`,
/// `password`, `min` and `max` it starts with the field name
/// (`"Age is required"`); `email` and `username` messages stand alone
/// (`"e-mail is invalid"`). Existing consumers match on this text, so the
/// wording is stable.
///
/// # Examples
///
/// ```
/// use fieldcheck::ValidationError;
///
/// let error = ValidationError::new("min", "value (2) is lower than minimum value (3)")
///     .with_param("min", "3")
///     .with_param("actual", "2");
///
/// assert_eq!(error.param("min"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Machine-readable code: the rule name, or `invalid_bound` /
    /// `unknown_rule` for problems found while evaluating a rule argument.
    pub code: Cow<'static, str>,

    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Name of the field that failed.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key/value details, e.g. `[("min", "3"), ("actual", "2")]`.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field name without touching the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Sets the field name and prefixes the message with it.
    #[must_use = "builder methods must be chained or built"]
    pub(crate) fn qualified_by(mut self, field: Cow<'static, str>) -> Self {
        self.message = format!("{field} {}", self.message).into();
        self.field = Some(field);
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns the field name, if one is attached.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// DECLARATION ERROR
// ============================================================================

/// A rule annotation that cannot be turned into a rule table.
///
/// These are bugs in the record declaration, not in the data, and are
/// reported once when the table is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// A token contains more than one `=`.
    #[error("'{token}' invalid format at {record}.{field}")]
    MalformedRule {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// The offending token after whitespace removal.
        token: String,
    },

    /// The annotation is empty or contains an empty token (`"required,"`).
    #[error("empty rule at {record}.{field}")]
    EmptyRule {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
    },

    /// The rule name is not part of the supported rule set.
    #[error("'{name}' invalid key at {record}.{field}")]
    UnknownRule {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// The unknown rule name.
        name: String,
    },

    /// The rule exists but cannot apply to the field's type.
    #[error("rule '{rule}' is not applicable to {record}.{field} of type {type_name}")]
    InapplicableRule {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// The rule name.
        rule: String,
        /// Rust type name of the field.
        type_name: String,
    },
}

impl DeclarationError {
    pub(crate) fn from_annotation(record: &str, field: &str, error: AnnotationError) -> Self {
        match error {
            AnnotationError::Malformed(token) => Self::MalformedRule {
                record: record.to_owned(),
                field: field.to_owned(),
                token,
            },
            AnnotationError::Empty => Self::EmptyRule {
                record: record.to_owned(),
                field: field.to_owned(),
            },
        }
    }

    /// Returns the field whose annotation is broken.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MalformedRule { field, .. }
            | Self::EmptyRule { field, .. }
            | Self::UnknownRule { field, .. }
            | Self::InapplicableRule { field, .. } => field,
        }
    }
}

// ============================================================================
// UNIFIED ERROR
// ============================================================================

/// Error returned by [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The record type's rule declarations are broken.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// The record's data failed a rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns the validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            Self::Declaration(_) => None,
        }
    }

    /// Returns true if the record's declarations are at fault.
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Declaration(_))
    }
}
