//! Field kinds and borrowed field values
//!
//! The engine only distinguishes integers, strings and everything else.
//! [`AsFieldValue`] maps a Rust field type onto that model: its associated
//! [`KIND`](AsFieldValue::KIND) is used when the rule table is built, and
//! [`as_field_value`](AsFieldValue::as_field_value) when a record is checked.

use std::borrow::Cow;
use std::fmt;

/// The static kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Any primitive integer.
    Int,
    /// Text.
    Str,
    /// Anything the rules do not inspect.
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Int => f.write_str("integer"),
            FieldKind::Str => f.write_str("string"),
            FieldKind::Other => f.write_str("other"),
        }
    }
}

/// A field's runtime value as seen by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Integer value, widened so every primitive integer fits.
    Int(i128),
    /// Borrowed text.
    Str(&'a str),
    /// Value of a type the rules do not inspect.
    Other,
}

impl FieldValue<'_> {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Other => FieldKind::Other,
        }
    }
}

/// Conversion of a field into a [`FieldValue`].
///
/// Implemented for primitive integers, text types, and a few scalar types
/// that report [`FieldKind::Other`]. Implement it for your own field types
/// with `KIND = FieldKind::Other` to allow them in a record; rules that
/// need an integer or a string are then rejected when the table is built.
///
/// # Examples
///
/// ```
/// use fieldcheck::{AsFieldValue, FieldKind, FieldValue};
///
/// struct Color(u8, u8, u8);
///
/// impl AsFieldValue for Color {
///     const KIND: FieldKind = FieldKind::Other;
///
///     fn as_field_value(&self) -> FieldValue<'_> {
///         FieldValue::Other
///     }
/// }
///
/// assert_eq!(42u8.as_field_value(), FieldValue::Int(42));
/// assert_eq!("hi".as_field_value(), FieldValue::Str("hi"));
/// ```
pub trait AsFieldValue {
    /// Kind reported for every value of this type.
    const KIND: FieldKind;

    /// Borrows the value for rule evaluation.
    fn as_field_value(&self) -> FieldValue<'_>;
}

macro_rules! int_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsFieldValue for $ty {
                const KIND: FieldKind = FieldKind::Int;

                #[inline]
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(i128::from(*self))
                }
            }
        )*
    };
}

int_field!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl AsFieldValue for isize {
    const KIND: FieldKind = FieldKind::Int;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Int(*self as i128)
    }
}

impl AsFieldValue for usize {
    const KIND: FieldKind = FieldKind::Int;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Int(*self as i128)
    }
}

impl AsFieldValue for str {
    const KIND: FieldKind = FieldKind::Str;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl AsFieldValue for String {
    const KIND: FieldKind = FieldKind::Str;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl AsFieldValue for Cow<'_, str> {
    const KIND: FieldKind = FieldKind::Str;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

macro_rules! other_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsFieldValue for $ty {
                const KIND: FieldKind = FieldKind::Other;

                #[inline]
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Other
                }
            }
        )*
    };
}

other_field!(bool, char, f32, f64);

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    const KIND: FieldKind = T::KIND;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    const KIND: FieldKind = T::KIND;

    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}
