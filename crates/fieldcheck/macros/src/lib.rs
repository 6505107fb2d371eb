//! # fieldcheck-macros
//!
//! `#[derive(Record)]` for the `fieldcheck` crate. Use it through the
//! `fieldcheck` re-export rather than depending on this crate directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod record;
mod support;

/// Derive macro for the `Record` trait.
///
/// Builds the type's rule table once, on first use, from `#[validator]`
/// attributes. Fields without the attribute are not checked.
///
/// # Attributes
///
/// ## Field attributes
///
/// - `#[validator("required,min=3")]` — the rule annotation
/// - `#[validator(rules = "required,min=3")]` — same, as a key
/// - `name = "..."` — field name used in messages (default: the field's
///   identifier)
///
/// ## Container attributes (`#[validator(...)]` on the struct)
///
/// - `lenient` / `strict`, or `mode = "lenient"` — declaration policy
///   (default: strict)
/// - `name = "..."` — record name used in declaration errors (default: the
///   struct's identifier)
///
/// # Example
///
/// ```ignore
/// #[derive(Record)]
/// struct Signup {
///     #[validator(rules = "required, username", name = "Login")]
///     login: String,
///
///     #[validator("email")]
///     email: String,
///
///     #[validator("min=18,max=130")]
///     age: u8,
/// }
/// ```
///
/// Only structs with named fields and no type or const parameters are
/// supported. Lifetime parameters are fine.
#[proc_macro_derive(Record, attributes(validator))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
