//! CSV tokenizing
//!
//! Turns the raw export text into rows of untyped fields. Only as much of CSV
//! as the asset export needs is understood: quoted fields may hold commas and
//! newlines, nothing else is special.

pub mod assemble;
pub mod split;

pub use assemble::{AssembleStats, Rows};
pub use split::split_fields;

/// Fields of one logical row, in source column order.
pub type RawRow = Vec<String>;
