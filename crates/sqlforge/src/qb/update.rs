use super::clause::{Assignments, ReturningClause, WhereClause, returning_methods, where_methods};
use super::traits::{Statement, StatementKind};
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, IntoExpression};
use crate::param::ParamList;
use crate::schema::{Column, Table};

/// UPDATE query builder.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: String,
    assignments: Assignments,
    filter: WhereClause,
    returning: ReturningClause,
}

impl UpdateBuilder {
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.name().to_string(),
            assignments: Assignments::default(),
            filter: WhereClause::default(),
            returning: ReturningClause::default(),
        }
    }

    /// Assign a value or expression, e.g. `set(&c.balance, &c.balance - 10)`.
    pub fn set<T>(mut self, column: &Column<T>, value: impl IntoExpression<T>) -> Self {
        self.assignments
            .set(column.name(), value.into_expression().into_expr());
        self
    }

    /// Assign the `NULL` keyword (no bound parameter).
    pub fn set_null<T>(mut self, column: &Column<Option<T>>) -> Self {
        self.assignments.set(column.name(), Expr::Null);
        self
    }

    where_methods!(filter);

    returning_methods!(returning);
}

impl Statement for UpdateBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> SqlResult<String> {
        if self.assignments.is_empty() {
            return Err(SqlError::invalid(StatementKind::Update, "no columns assigned"));
        }

        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|(col, value)| {
                format!(
                    "{} = {}",
                    dialect.quote_identifier(col),
                    value.render(dialect, params)
                )
            })
            .collect();
        let mut sql = format!(
            "UPDATE {} SET {}",
            dialect.quote_identifier(&self.table),
            sets.join(", ")
        );

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
