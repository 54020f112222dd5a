use super::{DialectCapabilities, SqlDialect, ddl};
use crate::error::{SqlError, SqlResult};
use crate::qb::StatementKind;
use crate::schema::{Index, SqlType};

/// MySQL / MariaDB.
///
/// Upserts render as `ON DUPLICATE KEY UPDATE`, which matches on any unique
/// key; the conflict columns only pick the no-op assignment for DO NOTHING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlDialect {
    capabilities: DialectCapabilities,
}

impl MySqlDialect {
    pub fn new() -> Self {
        Self {
            capabilities: DialectCapabilities::mysql(),
        }
    }

    pub fn with_capabilities(capabilities: DialectCapabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest row count MySQL accepts, used for offset-only pagination.
const MYSQL_MAX_ROWS: u64 = u64::MAX;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn sql_type_name(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Boolean => "TINYINT(1)".to_string(),
            SqlType::Double => "DOUBLE".to_string(),
            SqlType::Timestamp => "DATETIME".to_string(),
            SqlType::TimestampTz => "TIMESTAMP".to_string(),
            SqlType::Uuid => "CHAR(36)".to_string(),
            other => other.base_name(),
        }
    }

    fn auto_increment_type(&self, base: &SqlType) -> String {
        format!("{} AUTO_INCREMENT", self.sql_type_name(base))
    }

    fn limit_offset_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (Some(l), Some(o)) => format!("LIMIT {l} OFFSET {o}"),
            (Some(l), None) => format!("LIMIT {l}"),
            (None, Some(o)) => format!("LIMIT {MYSQL_MAX_ROWS} OFFSET {o}"),
            (None, None) => String::new(),
        }
    }

    fn on_conflict_clause(&self, _conflict: &[String], update: &[String]) -> SqlResult<String> {
        ddl::require_on_conflict(self)?;
        let sets: Vec<String> = update
            .iter()
            .map(|c| {
                let q = self.quote_identifier(c);
                format!("{q} = VALUES({q})")
            })
            .collect();
        Ok(format!("ON DUPLICATE KEY UPDATE {}", sets.join(", ")))
    }

    fn on_conflict_do_nothing(&self, conflict: &[String]) -> SqlResult<String> {
        ddl::require_on_conflict(self)?;
        let noop = match conflict.first() {
            Some(c) => {
                let q = self.quote_identifier(c);
                format!("{q} = {q}")
            }
            None => {
                return Err(SqlError::invalid(
                    StatementKind::Insert,
                    "ON CONFLICT requires at least one target column",
                ));
            }
        };
        Ok(format!("ON DUPLICATE KEY UPDATE {noop}"))
    }

    fn create_index_statement(&self, index: &Index, _if_not_exists: bool) -> String {
        // MySQL has no IF NOT EXISTS for indexes.
        ddl::create_index(self, index, false)
    }

    fn drop_index_statement(&self, index: &Index, _if_exists: bool) -> String {
        format!(
            "DROP INDEX {} ON {}",
            self.quote_identifier(&index.name),
            self.quote_identifier(&index.table)
        )
    }
}
