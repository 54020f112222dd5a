use super::clause::{Assignments, ReturningClause, returning_methods};
use super::insert::{InsertBuilder, column_list, values_tuple};
use super::traits::{Statement, StatementKind, finish};
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::expr::IntoExpression;
use crate::param::ParamList;
use crate::prepared::PreparedSql;
use crate::schema::{Column, Table};
use crate::trace;

/// Values of one row in a batch insert.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    values: Assignments,
}

impl RowBuilder {
    pub fn set<T>(mut self, column: &Column<T>, value: impl IntoExpression<T>) -> Self {
        self.values
            .set(column.name(), value.into_expression().into_expr());
        self
    }
}

/// Multi-row INSERT.
///
/// On dialects with multi-row VALUES support this builds one statement per
/// chunk of at most `max_insert_batch_size` rows (one statement when the
/// dialect sets no limit). Otherwise it falls back to one single-row INSERT per
/// row. Both forms insert the same rows with the same values.
#[derive(Debug, Clone)]
pub struct BatchInsertBuilder {
    table: String,
    rows: Vec<Assignments>,
    returning: ReturningClause,
}

impl BatchInsertBuilder {
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.name().to_string(),
            rows: Vec::new(),
            returning: ReturningClause::default(),
        }
    }

    /// Append a row.
    ///
    /// ```ignore
    /// batch_insert(&users.table)
    ///     .row(|r| r.set(&users.name, "a").set(&users.email, "a@x.com"))
    ///     .row(|r| r.set(&users.name, "b").set(&users.email, "b@x.com"));
    /// ```
    pub fn row(mut self, f: impl FnOnce(RowBuilder) -> RowBuilder) -> Self {
        self.rows.push(f(RowBuilder::default()).values);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    returning_methods!(returning);

    /// Rows reordered to the first row's column order, rejecting rows that
    /// set a different column set.
    fn aligned_rows(&self) -> SqlResult<(Vec<String>, Vec<Assignments>)> {
        let first = self
            .rows
            .first()
            .ok_or_else(|| SqlError::invalid(StatementKind::Insert, "batch insert has no rows"))?;
        if first.is_empty() {
            return Err(SqlError::invalid(StatementKind::Insert, "no values set"));
        }
        let columns: Vec<String> = first.columns().map(str::to_string).collect();

        let mut aligned = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ragged(i, &columns));
            }
            let mut ordered = Assignments::default();
            for col in &columns {
                let value = row.get(col).ok_or_else(|| ragged(i, &columns))?;
                ordered.set(col.as_str(), value.clone());
            }
            aligned.push(ordered);
        }
        Ok((columns, aligned))
    }

    /// Build one or more statements covering every row.
    pub fn build(&self, dialect: &dyn SqlDialect) -> SqlResult<Vec<PreparedSql>> {
        let (columns, rows) = self.aligned_rows()?;

        if !dialect.supports_multi_row_insert() {
            trace::degraded(dialect.name(), "multi-row INSERT", "one statement per row");
            return rows
                .into_iter()
                .map(|row| {
                    InsertBuilder::for_table(&self.table)
                        .with_values(row)
                        .with_returning(self.returning.clone())
                        .build(dialect)
                })
                .collect();
        }

        let chunk_size = dialect
            .max_insert_batch_size()
            .unwrap_or(rows.len())
            .max(1);
        let head = format!(
            "INSERT INTO {} {} VALUES ",
            dialect.quote_identifier(&self.table),
            column_list(dialect, columns.iter().map(String::as_str))
        );
        let returning = self.returning.render(dialect);

        rows.chunks(chunk_size)
            .map(|chunk| {
                let mut params = ParamList::new();
                let tuples: Vec<String> = chunk
                    .iter()
                    .map(|row| values_tuple(dialect, row, &mut params))
                    .collect();
                let mut sql = format!("{head}{}", tuples.join(", "));
                if let Some(returning) = &returning {
                    sql.push(' ');
                    sql.push_str(returning);
                }
                finish(StatementKind::Insert, dialect, sql, params)
            })
            .collect()
    }
}

fn ragged(row: usize, columns: &[String]) -> SqlError {
    SqlError::invalid(
        StatementKind::Insert,
        format!(
            "batch row {row} does not set exactly the columns ({})",
            columns.join(", ")
        ),
    )
}
