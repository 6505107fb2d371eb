//! Rule annotation parser
//!
//! An annotation is a comma-separated list of rule tokens attached to a
//! field: `"required,min=3,max=20"`. Each token is either a flag (`required`)
//! or a parameterized rule with exactly one argument (`min=3`).
//!
//! Whitespace is removed from the whole annotation before splitting, so
//! `"required, min = 3"` and `"required,min=3"` are the same annotation and
//! arguments can never contain whitespace.

use std::borrow::Cow;

/// Characters stripped from an annotation before it is split.
pub const STRIPPED_WHITESPACE: [char; 4] = [' ', '\t', '\x0B', '\n'];

/// A single rule token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleToken {
    /// `name`
    Flag(String),
    /// `name=argument`. The argument may be empty (`min=`).
    Param {
        /// Rule name.
        name: String,
        /// Raw argument.
        argument: String,
    },
}

impl RuleToken {
    /// Returns the rule name.
    pub fn name(&self) -> &str {
        match self {
            Self::Flag(name) | Self::Param { name, .. } => name,
        }
    }
}

/// Syntax error in an annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    /// A token has more than one `=`.
    #[error("'{0}' invalid format")]
    Malformed(String),
    /// A token is empty.
    #[error("empty rule")]
    Empty,
}

/// Removes the stripped whitespace characters from an annotation.
///
/// Borrows when there is nothing to remove.
pub fn normalize(annotation: &str) -> Cow<'_, str> {
    if annotation.contains(STRIPPED_WHITESPACE) {
        Cow::Owned(
            annotation
                .chars()
                .filter(|c| !STRIPPED_WHITESPACE.contains(c))
                .collect(),
        )
    } else {
        Cow::Borrowed(annotation)
    }
}

/// Parses an annotation into rule tokens, preserving their order.
///
/// # Examples
///
/// ```
/// use fieldcheck::annotation::{RuleToken, parse};
///
/// let tokens = parse("required, min = 3").unwrap();
/// assert_eq!(tokens, vec![
///     RuleToken::Flag("required".into()),
///     RuleToken::Param { name: "min".into(), argument: "3".into() },
/// ]);
/// ```
pub fn parse(annotation: &str) -> Result<Vec<RuleToken>, AnnotationError> {
    normalize(annotation).split(',').map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<RuleToken, AnnotationError> {
    let mut parts = token.split('=');
    let name = parts.next().unwrap_or_default();

    match (parts.next(), parts.next()) {
        (None, _) if name.is_empty() => Err(AnnotationError::Empty),
        (None, _) => Ok(RuleToken::Flag(name.to_owned())),
        (Some(argument), None) => Ok(RuleToken::Param {
            name: name.to_owned(),
            argument: argument.to_owned(),
        }),
        (Some(_), Some(_)) => Err(AnnotationError::Malformed(token.to_owned())),
    }
}
