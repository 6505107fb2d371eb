//! Prelude module for convenient imports.
//!
//! ```
//! use fieldcheck::prelude::*;
//!
//! let table = RuleTable::builder("Order").field::<u32>("Qty", "min=1,max=10").build();
//! assert!(table.is_ok());
//! ```

pub use crate::{
    AsFieldValue, DeclarationError, Error, FieldKind, FieldValue, Mode, Record, RuleTable,
    TableConfig, ValidationError, validate,
};
