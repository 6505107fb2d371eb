//! # fieldcheck
//!
//! Declarative per-field validation: attach a rule annotation to each field
//! of a struct, and get back the first rule the record's data violates.
//!
//! ## Quick Start
//!
//! ```
//! use fieldcheck::Record;
//!
//! #[derive(Record)]
//! struct Account {
//!     #[validator(rules = "required,min=3", name = "Name")]
//!     name: String,
//!     #[validator(rules = "email", name = "Email")]
//!     email: String,
//!     #[validator(rules = "password", name = "Pwd")]
//!     password: String,
//! }
//!
//! let account = Account {
//!     name: "ab".into(),
//!     email: "ab@example.com".into(),
//!     password: "Abcdef1!".into(),
//! };
//!
//! let error = account.validate().unwrap_err();
//! assert_eq!(error.to_string(), "Name length (2) is lower than minimum length (3)");
//! ```
//!
//! ## Annotation Syntax
//!
//! `key1,key2=value2,key3` — comma-separated tokens, each a bare rule name
//! or `name=value`. Spaces, tabs, vertical tabs and newlines are ignored
//! anywhere in the annotation.
//!
//! | rule       | applies to      | fails when |
//! |------------|-----------------|------------|
//! | `required` | integer, string | value is `0`, or the string is blank |
//! | `password` | string          | no digit, lowercase, uppercase or symbol |
//! | `email`    | string          | not `local@domain.tld` |
//! | `username` | string          | anything but letters, digits, `.`, `_`, `-` |
//! | `min=N`    | integer, string | value or char count below `N` |
//! | `max=N`    | integer, string | value or char count above `N` |
//!
//! ## Two Error Channels
//!
//! A broken annotation (`min=1=2`, `requried`, `email` on an integer) is a
//! [`DeclarationError`], produced once when the type's [`RuleTable`] is
//! built. Bad data is a [`ValidationError`], produced per call. Both reach
//! the caller through [`Error`] so they can be told apart. See [`Mode`] for
//! the lenient policy.

// Derive output refers to `::fieldcheck`, including in this crate's own tests.
extern crate self as fieldcheck;

pub mod annotation;
pub mod checks;
pub mod config;
pub mod error;
pub mod prelude;
mod record;
pub mod rule;
pub mod table;
pub mod value;

pub use config::{Mode, TableConfig};
pub use error::{DeclarationError, Error, ValidationError};
pub use record::Record;
pub use rule::{Bound, Rule};
pub use table::{FieldRules, RuleTable, RuleTableBuilder};
pub use value::{AsFieldValue, FieldKind, FieldValue};

#[cfg(feature = "derive")]
pub use fieldcheck_macros::Record;

/// Validates a record against its type's rule table.
///
/// Fields are checked in declaration order and each field's rules left to
/// right; the first failure is returned. A type whose annotations could not
/// be built into a table yields [`Error::Declaration`] on every call.
pub fn validate<R: Record>(record: &R) -> Result<(), Error> {
    let table = R::rule_table().map_err(|error| Error::Declaration(error.clone()))?;
    table.validate(record)?;
    Ok(())
}
