//! Trait definitions for statement builders.

use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::param::ParamList;
use crate::prepared::{PreparedSql, placeholder_count};
use crate::trace;
use std::fmt;

/// Kind of statement being built, reported in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        })
    }
}

/// A statement that renders to a single [`PreparedSql`].
///
/// Implementors write their clauses in canonical order into one string while
/// threading a single [`ParamList`] through every expression they render.
pub trait Statement {
    fn kind(&self) -> StatementKind;

    /// Render into `params`, which may already hold values from an enclosing
    /// statement (e.g. preceding CTEs).
    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> SqlResult<String>;

    /// Render against `dialect` and package the result.
    fn build(&self, dialect: &dyn SqlDialect) -> SqlResult<PreparedSql> {
        let mut params = ParamList::new();
        let sql = self.render(dialect, &mut params)?;
        finish(self.kind(), dialect, sql, params)
    }

    /// Debug helper: the SQL text alone, or the error message.
    fn to_sql(&self, dialect: &dyn SqlDialect) -> String {
        match self.build(dialect) {
            Ok(prepared) => prepared.sql,
            Err(e) => format!("<{e}>"),
        }
    }
}

/// Check the placeholder invariant, log, and package.
pub(crate) fn finish(
    kind: StatementKind,
    dialect: &dyn SqlDialect,
    sql: String,
    params: ParamList,
) -> SqlResult<PreparedSql> {
    let placeholders = placeholder_count(&sql);
    if placeholders != params.len() {
        return Err(SqlError::invalid(
            kind,
            format!(
                "{placeholders} placeholders but {} bound parameters",
                params.len()
            ),
        ));
    }
    trace::statement_built(kind, dialect.name(), &sql, params.len());
    Ok(PreparedSql::new(sql, params.into_vec()))
}
