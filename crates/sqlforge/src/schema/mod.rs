//! Schema model: tables, typed columns and their SQL types.
//!
//! Schema objects are defined once and shared read-only by every query that
//! references them.

mod column;
mod table;
mod types;

pub use column::{Column, ColumnDef, ColumnDefault, ColumnFlags, ColumnRef};
pub use table::{Index, Table, TableBuilder};
pub use types::{ColumnType, ColumnValue, NumericValue, SqlType, TextValue};
