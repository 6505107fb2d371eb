//! Rule table configuration

use serde::{Deserialize, Serialize};

/// How a rule table treats declarations that cannot be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Unknown rules and rules that do not apply to a field's type are
    /// declaration errors.
    #[default]
    Strict,
    /// Unknown parameterized rules fail at validation time with
    /// `"<name> invalid key"`, and rules that do not apply to a field's
    /// type pass silently. Unknown flag rules and malformed tokens are
    /// still declaration errors.
    Lenient,
}

/// Options for building a [`RuleTable`](crate::RuleTable).
///
/// # Examples
///
/// ```
/// use fieldcheck::{Mode, TableConfig};
///
/// let config = TableConfig::from_json(r#"{ "mode": "lenient" }"#).unwrap();
/// assert_eq!(config.mode, Mode::Lenient);
/// assert_eq!(TableConfig::from_json("{}").unwrap(), TableConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Declaration policy.
    pub mode: Mode,
}

impl TableConfig {
    /// Strict configuration (the default).
    #[must_use]
    pub const fn strict() -> Self {
        Self { mode: Mode::Strict }
    }

    /// Lenient configuration.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            mode: Mode::Lenient,
        }
    }

    /// Reads a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
