use super::clause::{ReturningClause, WhereClause, returning_methods, where_methods};
use super::traits::{Statement, StatementKind};
use crate::dialect::SqlDialect;
use crate::error::SqlResult;
use crate::param::ParamList;
use crate::schema::Table;

/// DELETE query builder.
///
/// Without a WHERE clause the statement deletes every row, exactly like the
/// equivalent raw SQL.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: String,
    filter: WhereClause,
    returning: ReturningClause,
}

impl DeleteBuilder {
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.name().to_string(),
            filter: WhereClause::default(),
            returning: ReturningClause::default(),
        }
    }

    where_methods!(filter);

    returning_methods!(returning);
}

impl Statement for DeleteBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> SqlResult<String> {
        let mut sql = format!("DELETE FROM {}", dialect.quote_identifier(&self.table));

        if let Some(cond) = self.filter.render(dialect, params) {
            sql.push_str(" WHERE ");
            sql.push_str(&cond);
        }

        if let Some(returning) = self.returning.render(dialect) {
            sql.push(' ');
            sql.push_str(&returning);
        }

        Ok(sql)
    }
}
