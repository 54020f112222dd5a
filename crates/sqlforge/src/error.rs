//! Error types for sqlforge

use crate::qb::StatementKind;
use thiserror::Error;

/// Result type alias for sqlforge operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while defining schemas or building statements.
///
/// Every error is reported synchronously by the call that detected it; nothing
/// is retried or downgraded inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// Required builder state is missing or inconsistent.
    #[error("Invalid {statement} statement: {message}")]
    InvalidStatement {
        statement: StatementKind,
        message: String,
    },

    /// A hard-gated dialect feature was requested from a dialect without it.
    #[error("Dialect '{dialect}' does not support {feature}")]
    Unsupported { dialect: String, feature: String },

    /// Invalid table or column definition
    #[error("Schema error: {0}")]
    Schema(String),

    /// Database value could not be converted to the requested type
    #[error("Conversion error: expected {expected}, got {actual}")]
    Conversion { expected: String, actual: String },
}

impl SqlError {
    /// Create an invalid statement error
    pub fn invalid(statement: StatementKind, message: impl Into<String>) -> Self {
        Self::InvalidStatement {
            statement,
            message: message.into(),
        }
    }

    /// Create an unsupported feature error
    pub fn unsupported(dialect: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::Unsupported {
            dialect: dialect.into(),
            feature: feature.into(),
        }
    }

    /// Create a schema definition error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a value conversion error
    pub fn conversion(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Conversion {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this is a missing-capability error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this is an invalid builder state error
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidStatement { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_statement_names_the_clause() {
        let err = SqlError::invalid(StatementKind::Update, "no columns assigned");
        assert!(err.is_invalid());
        assert_eq!(err.to_string(), "Invalid UPDATE statement: no columns assigned");
    }

    #[test]
    fn unsupported_names_dialect_and_feature() {
        let err = SqlError::unsupported("mysql", "ON CONFLICT");
        assert!(err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "Dialect 'mysql' does not support ON CONFLICT"
        );
    }

    #[test]
    fn conversion_message() {
        let err = SqlError::conversion("BIGINT", "TEXT");
        assert_eq!(err.to_string(), "Conversion error: expected BIGINT, got TEXT");
    }
}
