use super::{DialectCapabilities, SqlDialect, ddl};
use crate::schema::{ColumnDef, SqlType, Table};

/// SQLite 3.35+ (RETURNING and upsert available).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteDialect {
    capabilities: DialectCapabilities,
}

impl SqliteDialect {
    pub fn new() -> Self {
        Self {
            capabilities: DialectCapabilities::sqlite(),
        }
    }

    pub fn with_capabilities(capabilities: DialectCapabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

/// An AUTOINCREMENT key must be declared inline as the sole primary key.
fn inline_rowid_key(column: &ColumnDef, table: &Table) -> bool {
    column.flags.auto_increment && matches!(table.primary_key(), [only] if *only == column.name)
}

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn sql_type_name(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Boolean => "INTEGER".to_string(),
            SqlType::Uuid | SqlType::Json => "TEXT".to_string(),
            SqlType::TimestampTz => "TIMESTAMP".to_string(),
            other => other.base_name(),
        }
    }

    fn auto_increment_type(&self, _base: &SqlType) -> String {
        "INTEGER".to_string()
    }

    fn limit_offset_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (Some(l), Some(o)) => format!("LIMIT {l} OFFSET {o}"),
            (Some(l), None) => format!("LIMIT {l}"),
            (None, Some(o)) => format!("LIMIT -1 OFFSET {o}"),
            (None, None) => String::new(),
        }
    }

    fn column_definition(&self, column: &ColumnDef, table: &Table) -> String {
        if inline_rowid_key(column, table) {
            return format!(
                "{} INTEGER PRIMARY KEY AUTOINCREMENT",
                self.quote_identifier(&column.name)
            );
        }
        ddl::column_definition(self, column, table)
    }

    fn primary_key_clause(&self, table: &Table) -> Option<String> {
        let inline = table
            .columns()
            .iter()
            .any(|c| inline_rowid_key(c, table));
        if inline {
            None
        } else {
            ddl::primary_key_clause(self, table)
        }
    }
}
