use super::clause::{Assignments, ReturningClause, returning_methods};
use super::traits::{Statement, StatementKind};
use crate::dialect::{SqlDialect, ddl};
use crate::error::{SqlError, SqlResult};
use crate::expr::IntoExpression;
use crate::param::ParamList;
use crate::schema::{Column, ColumnRef, Table};

/// What to do when an inserted row conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictAction {
    DoNothing,
    /// Update the listed columns from the proposed row. `None` means every
    /// column set on the insert except the conflict target.
    DoUpdate(Option<Vec<String>>),
}

#[derive(Debug, Clone)]
struct OnConflict {
    target: Vec<String>,
    action: ConflictAction,
}

/// INSERT query builder.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    values: Assignments,
    on_conflict: Option<OnConflict>,
    returning: ReturningClause,
}

impl InsertBuilder {
    pub fn new(table: &Table) -> Self {
        Self::for_table(table.name())
    }

    pub(crate) fn for_table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            values: Assignments::default(),
            on_conflict: None,
            returning: ReturningClause::default(),
        }
    }

    pub(crate) fn with_values(mut self, values: Assignments) -> Self {
        self.values = values;
        self
    }

    pub(crate) fn with_returning(mut self, returning: ReturningClause) -> Self {
        self.returning = returning;
        self
    }

    /// Set a column value. Setting the same column again replaces the value
    /// but keeps its original position.
    pub fn set<T>(mut self, column: &Column<T>, value: impl IntoExpression<T>) -> Self {
        self.values
            .set(column.name(), value.into_expression().into_expr());
        self
    }

    /// Start an ON CONFLICT clause for the given target columns.
    pub fn on_conflict<I, C>(self, columns: I) -> OnConflictBuilder
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnRef>,
    {
        OnConflictBuilder {
            insert: self,
            target: columns.into_iter().map(|c| c.into().name).collect(),
        }
    }

    returning_methods!(returning);

    fn conflict_clause(&self, dialect: &dyn SqlDialect, conflict: &OnConflict) -> SqlResult<String> {
        if conflict.target.is_empty() {
            return Err(SqlError::invalid(
                StatementKind::Insert,
                "ON CONFLICT requires at least one target column",
            ));
        }
        ddl::require_on_conflict(dialect)?;

        match &conflict.action {
            ConflictAction::DoNothing => dialect.on_conflict_do_nothing(&conflict.target),
            ConflictAction::DoUpdate(columns) => {
                let update: Vec<String> = match columns {
                    Some(cols) => cols.clone(),
                    None => self
                        .values
                        .columns()
                        .filter(|c| !conflict.target.iter().any(|t| t.as_str() == *c))
                        .map(str::to_string)
                        .collect(),
                };
                if update.is_empty() {
                    return Err(SqlError::invalid(
                        StatementKind::Insert,
                        "ON CONFLICT DO UPDATE has no columns to update",
                    ));
                }
                dialect.on_conflict_clause(&conflict.target, &update)
            }
        }
    }
}

/// Pending ON CONFLICT clause; pick an action to return to the insert.
#[derive(Debug, Clone)]
pub struct OnConflictBuilder {
    insert: InsertBuilder,
    target: Vec<String>,
}

impl OnConflictBuilder {
    /// `ON CONFLICT (...) DO NOTHING`
    pub fn do_nothing(self) -> InsertBuilder {
        self.finish(ConflictAction::DoNothing)
    }

    /// `ON CONFLICT (...) DO UPDATE` of every set column except the target.
    pub fn do_update(self) -> InsertBuilder {
        self.finish(ConflictAction::DoUpdate(None))
    }

    /// `ON CONFLICT (...) DO UPDATE` of the listed columns only.
    pub fn do_update_columns<I, C>(self, columns: I) -> InsertBuilder
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnRef>,
    {
        let cols = columns.into_iter().map(|c| c.into().name).collect();
        self.finish(ConflictAction::DoUpdate(Some(cols)))
    }

    fn finish(self, action: ConflictAction) -> InsertBuilder {
        let mut insert = self.insert;
        insert.on_conflict = Some(OnConflict {
            target: self.target,
            action,
        });
        insert
    }
}

/// `("a","b")` column list shared with batch inserts.
pub(crate) fn column_list<'a>(dialect: &dyn SqlDialect, columns: impl Iterator<Item = &'a str>) -> String {
    let cols: Vec<String> = columns.map(|c| dialect.quote_identifier(c)).collect();
    format!("({})", cols.join(","))
}

/// `(?, ?)` values tuple shared with batch inserts.
pub(crate) fn values_tuple(dialect: &dyn SqlDialect, values: &Assignments, params: &mut ParamList) -> String {
    let vals: Vec<String> = values
        .iter()
        .map(|(_, v)| v.render(dialect, params))
        .collect();
    format!("({})", vals.join(", "))
}

impl Statement for InsertBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> SqlResult<String> {
        if self.values.is_empty() {
            return Err(SqlError::invalid(StatementKind::Insert, "no values set"));
        }

        let mut sql = format!(
            "INSERT INTO {} {} VALUES {}",
            dialect.quote_identifier(&self.table),
            column_list(dialect, self.values.columns()),
            values_tuple(dialect, &self.values, params)
        );

        if let Some(conflict) = &self.on_conflict {
            let clause = self.conflict_clause(dialect, conflict)?;
            sql.push(' ');
            sql.push_str(&clause);
        }

        if let Some(returning) = self.returning.render(dialect) {
            sql.push(' ');
            sql.push_str(&returning);
        }

        Ok(sql)
    }
}
