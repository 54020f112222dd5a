//! SQL dialect abstraction.
//!
//! [`SqlDialect`] is the only place per-database syntax lives. Builders and
//! expression nodes consult capability flags and delegate rendering calls to
//! the dialect; they never ask which database they are talking to.
//!
//! Trait methods carry the base (ANSI-leaning) behavior. Concrete dialects
//! override only what differs.
//!
//! Features come in two kinds:
//! - **soft**: RETURNING, ILIKE, FOR UPDATE. When unsupported they degrade
//!   (omitted or rewritten) and a DEBUG event is logged.
//! - **hard**: ON CONFLICT, WITH. When unsupported the build fails with
//!   [`SqlError::Unsupported`].

mod capabilities;
pub(crate) mod ddl;
mod generic;
mod mysql;
mod postgres;
mod sqlite;

pub use capabilities::DialectCapabilities;
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::error::{SqlError, SqlResult};
use crate::qb::ReturningColumns;
use crate::schema::{ColumnDef, Index, SqlType, Table};
use crate::trace;
use crate::value::Value;
use std::fmt;

/// Per-database SQL syntax and capabilities.
pub trait SqlDialect: Send + Sync + fmt::Debug {
    /// Short dialect name, used in errors and logs.
    fn name(&self) -> &str;

    fn capabilities(&self) -> &DialectCapabilities;

    fn supports_returning(&self) -> bool {
        self.capabilities().supports_returning
    }

    fn supports_on_conflict(&self) -> bool {
        self.capabilities().supports_on_conflict
    }

    fn supports_ilike(&self) -> bool {
        self.capabilities().supports_ilike
    }

    fn supports_cte(&self) -> bool {
        self.capabilities().supports_cte
    }

    fn supports_window_functions(&self) -> bool {
        self.capabilities().supports_window_functions
    }

    fn supports_limit_offset(&self) -> bool {
        self.capabilities().supports_limit_offset
    }

    fn supports_boolean_type(&self) -> bool {
        self.capabilities().supports_boolean_type
    }

    fn supports_multi_row_insert(&self) -> bool {
        self.capabilities().supports_multi_row_insert
    }

    fn supports_for_update(&self) -> bool {
        self.capabilities().supports_for_update
    }

    fn max_insert_batch_size(&self) -> Option<usize> {
        self.capabilities().max_insert_batch_size
    }

    /// Quote an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Quote a string literal.
    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// Render a value inline. Only DDL defaults use this; statements bind.
    fn literal(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.string_literal(s),
            Value::Json(v) => self.string_literal(&v.to_string()),
            Value::Bool(b) if !self.supports_boolean_type() => {
                if *b { "1".to_string() } else { "0".to_string() }
            }
            Value::Bytes(bytes) => self.bytes_literal(bytes),
            other => other.to_sql_literal(),
        }
    }

    /// Binary literal for DDL defaults: `X'DEAD'`.
    fn bytes_literal(&self, bytes: &[u8]) -> String {
        Value::Bytes(bytes.to_vec()).to_sql_literal()
    }

    /// Dialect name for a column type.
    fn sql_type_name(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Boolean if !self.supports_boolean_type() => "SMALLINT".to_string(),
            other => other.base_name(),
        }
    }

    /// Type (plus attributes) of an auto-increment column.
    fn auto_increment_type(&self, base: &SqlType) -> String {
        format!("{} GENERATED BY DEFAULT AS IDENTITY", self.sql_type_name(base))
    }

    /// LIMIT/OFFSET clause without leading space; empty when both are `None`.
    fn limit_offset_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        if self.supports_limit_offset() {
            match (limit, offset) {
                (Some(l), Some(o)) => format!("LIMIT {l} OFFSET {o}"),
                (Some(l), None) => format!("LIMIT {l}"),
                (None, Some(o)) => format!("OFFSET {o}"),
                (None, None) => String::new(),
            }
        } else {
            match (limit, offset) {
                (Some(l), Some(o)) => format!("OFFSET {o} ROWS FETCH NEXT {l} ROWS ONLY"),
                (Some(l), None) => format!("FETCH FIRST {l} ROWS ONLY"),
                (None, Some(o)) => format!("OFFSET {o} ROWS"),
                (None, None) => String::new(),
            }
        }
    }

    /// RETURNING clause; empty when the dialect has no RETURNING support.
    fn returning_clause(&self, columns: &ReturningColumns) -> String {
        if !self.supports_returning() {
            trace::degraded(self.name(), "RETURNING", "omitted");
            return String::new();
        }
        match columns {
            ReturningColumns::All => "RETURNING *".to_string(),
            ReturningColumns::Columns(cols) if cols.is_empty() => String::new(),
            ReturningColumns::Columns(cols) => {
                format!("RETURNING {}", ddl::quoted_list(self, cols))
            }
        }
    }

    /// Upsert clause updating `update` columns from the proposed row.
    fn on_conflict_clause(&self, conflict: &[String], update: &[String]) -> SqlResult<String> {
        ddl::require_on_conflict(self)?;
        let sets: Vec<String> = update
            .iter()
            .map(|c| {
                let q = self.quote_identifier(c);
                format!("{q} = EXCLUDED.{q}")
            })
            .collect();
        Ok(format!(
            "ON CONFLICT ({}) DO UPDATE SET {}",
            ddl::quoted_list(self, conflict),
            sets.join(", ")
        ))
    }

    /// Upsert clause that skips conflicting rows.
    fn on_conflict_do_nothing(&self, conflict: &[String]) -> SqlResult<String> {
        ddl::require_on_conflict(self)?;
        Ok(format!(
            "ON CONFLICT ({}) DO NOTHING",
            ddl::quoted_list(self, conflict)
        ))
    }

    /// Row locking suffix, or `None` when unsupported.
    fn for_update_clause(&self) -> Option<&'static str> {
        self.supports_for_update().then_some("FOR UPDATE")
    }

    /// `ESCAPE '<c>'` suffix for LIKE patterns.
    fn like_escape_clause(&self, escape: char) -> String {
        format!("ESCAPE {}", self.string_literal(&escape.to_string()))
    }

    fn column_definition(&self, column: &ColumnDef, table: &Table) -> String {
        ddl::column_definition(self, column, table)
    }

    /// Table-level PRIMARY KEY constraint, `None` when the key is inline or absent.
    fn primary_key_clause(&self, table: &Table) -> Option<String> {
        ddl::primary_key_clause(self, table)
    }

    fn create_table_statement(&self, table: &Table, if_not_exists: bool) -> String {
        ddl::create_table(self, table, if_not_exists)
    }

    fn drop_table_statement(&self, table: &str, if_exists: bool) -> String {
        format!(
            "DROP TABLE {}{}",
            if if_exists { "IF EXISTS " } else { "" },
            self.quote_identifier(table)
        )
    }

    fn create_index_statement(&self, index: &Index, if_not_exists: bool) -> String {
        ddl::create_index(self, index, if_not_exists)
    }

    fn drop_index_statement(&self, index: &Index, if_exists: bool) -> String {
        format!(
            "DROP INDEX {}{}",
            if if_exists { "IF EXISTS " } else { "" },
            self.quote_identifier(&index.name)
        )
    }
}

impl SqlError {
    pub(crate) fn unsupported_by(dialect: &(impl SqlDialect + ?Sized), feature: &str) -> Self {
        SqlError::unsupported(dialect.name(), feature)
    }
}

#[cfg(test)]
mod tests;
