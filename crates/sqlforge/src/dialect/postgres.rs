use super::{DialectCapabilities, SqlDialect};
use crate::schema::SqlType;

/// PostgreSQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresDialect {
    capabilities: DialectCapabilities,
}

impl PostgresDialect {
    pub fn new() -> Self {
        Self {
            capabilities: DialectCapabilities::postgres(),
        }
    }

    /// Override individual flags, e.g. to target a server version without ILIKE.
    pub fn with_capabilities(capabilities: DialectCapabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn sql_type_name(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Decimal { precision, scale } => format!("NUMERIC({precision}, {scale})"),
            SqlType::TimestampTz => "TIMESTAMPTZ".to_string(),
            SqlType::Binary => "BYTEA".to_string(),
            SqlType::Json => "JSONB".to_string(),
            other => other.base_name(),
        }
    }

    /// `X'..'` is a bit string in PostgreSQL; BYTEA takes hex-escaped text.
    fn bytes_literal(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("'\\x{hex}'::bytea")
    }

    fn auto_increment_type(&self, base: &SqlType) -> String {
        match base {
            SqlType::SmallInt => "SMALLSERIAL".to_string(),
            SqlType::Integer => "SERIAL".to_string(),
            SqlType::BigInt => "BIGSERIAL".to_string(),
            other => format!("{} GENERATED BY DEFAULT AS IDENTITY", self.sql_type_name(other)),
        }
    }
}
