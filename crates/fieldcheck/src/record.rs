//! The `Record` trait

use crate::error::{DeclarationError, Error};
use crate::value::FieldValue;

/// A type whose fields carry rule annotations.
///
/// Usually derived:
///
/// ```
/// use fieldcheck::Record;
///
/// #[derive(Record)]
/// struct Signup {
///     #[validator("required, username")]
///     login: String,
///     #[validator("min=18")]
///     age: u8,
///     nickname: String,
/// }
///
/// let signup = Signup { login: "jo hn".into(), age: 30, nickname: String::new() };
/// assert_eq!(signup.validate().unwrap_err().to_string(), "username is invalid");
/// ```
///
/// A manual implementation keeps its table in a static so it is built once:
///
/// ```
/// use std::sync::OnceLock;
/// use fieldcheck::{DeclarationError, FieldValue, Record, RuleTable};
///
/// struct Point { x: i32 }
///
/// impl Record for Point {
///     fn rule_table() -> Result<&'static RuleTable, &'static DeclarationError> {
///         static TABLE: OnceLock<Result<RuleTable, DeclarationError>> = OnceLock::new();
///         TABLE
///             .get_or_init(|| RuleTable::builder("Point").field::<i32>("X", "min=0").build())
///             .as_ref()
///     }
///
///     fn field_value(&self, index: usize) -> FieldValue<'_> {
///         match index {
///             0 => FieldValue::Int(self.x.into()),
///             _ => FieldValue::Other,
///         }
///     }
/// }
///
/// assert!(Point { x: 1 }.validate().is_ok());
/// assert!(Point { x: -1 }.validate().is_err());
/// ```
pub trait Record {
    /// Returns the rule table of this type, or the declaration error that
    /// prevented building it.
    fn rule_table() -> Result<&'static crate::RuleTable, &'static DeclarationError>;

    /// Returns the value of the `index`-th annotated field.
    fn field_value(&self, index: usize) -> FieldValue<'_>;

    /// Validates this record. See [`validate`](crate::validate).
    fn validate(&self) -> Result<(), Error>
    where
        Self: Sized,
    {
        crate::validate(self)
    }
}
