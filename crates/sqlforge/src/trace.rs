//! Structured logging of built statements and dialect fallbacks.
//!
//! Enabled by the `tracing` feature (on by default). Statements are reported on
//! target `sqlforge.sql`; soft dialect degradations on `sqlforge.dialect`. Both
//! log at DEBUG: a degradation is documented behavior, not a fault.

use crate::qb::StatementKind;

/// Longest SQL text (in bytes) included in a log event.
pub const MAX_LOGGED_SQL_BYTES: usize = 200;

/// Truncate to at most `max_bytes`, backing off to a char boundary.
pub fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn display_sql(sql: &str) -> String {
    if sql.len() > MAX_LOGGED_SQL_BYTES {
        format!("{}...", truncate_sql_bytes(sql, MAX_LOGGED_SQL_BYTES))
    } else {
        sql.to_string()
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn statement_built(statement: StatementKind, dialect: &str, sql: &str, params: usize) {
    tracing::debug!(
        target: "sqlforge.sql",
        statement = %statement,
        dialect,
        params,
        sql = %display_sql(sql),
        "statement built"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_built(_statement: StatementKind, _dialect: &str, _sql: &str, _params: usize) {}

#[cfg(feature = "tracing")]
pub(crate) fn degraded(dialect: &str, feature: &str, fallback: &str) {
    tracing::debug!(target: "sqlforge.dialect", dialect, feature, fallback, "dialect fallback");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn degraded(_dialect: &str, _feature: &str, _fallback: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT * FROM users", 10), "SELECT * F");
        // 'é' is two bytes; cutting inside it backs off.
        assert_eq!(truncate_sql_bytes("aé", 2), "a");
    }

    #[test]
    fn long_sql_gets_ellipsis() {
        let sql = "x".repeat(MAX_LOGGED_SQL_BYTES + 10);
        let shown = display_sql(&sql);
        assert_eq!(shown.len(), MAX_LOGGED_SQL_BYTES + 3);
        assert!(shown.ends_with("..."));
    }
}
