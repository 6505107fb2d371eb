//! Internal support utilities for the derive.

pub mod attrs;
pub mod diag;
