//! Common table expressions.
//!
//! ```ignore
//! let recent = Cte::new("recent", select(&orders).where_(orders.created_at.gt(since)));
//! let r = recent.reference();
//! let q = with(recent)
//!     .select(SelectBuilder::from_cte(&r).column(r.column::<i64>("id")))
//!     .build(&PostgresDialect::new())?;
//! ```
//!
//! Parameters are bound strictly in emission order: every CTE in declaration
//! order, then the main statement.

use super::delete::DeleteBuilder;
use super::insert::InsertBuilder;
use super::select::SelectBuilder;
use super::traits::{Statement, StatementKind};
use super::update::UpdateBuilder;
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, Expression};
use crate::param::ParamList;

/// A named subquery.
#[derive(Debug, Clone)]
pub struct Cte {
    name: String,
    columns: Vec<String>,
    query: SelectBuilder,
    recursive: bool,
}

impl Cte {
    pub fn new(name: impl Into<String>, query: SelectBuilder) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            query,
            recursive: false,
        }
    }

    /// Column aliases: `"name" ("a", "b") AS (...)`.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as recursive; the WITH clause becomes `WITH RECURSIVE`.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> CteRef {
        CteRef::new(self.name.clone())
    }

    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> String {
        let mut sql = dialect.quote_identifier(&self.name);
        if !self.columns.is_empty() {
            let cols: Vec<String> = self
                .columns
                .iter()
                .map(|c| dialect.quote_identifier(c))
                .collect();
            sql.push_str(&format!(" ({})", cols.join(", ")));
        }
        sql.push_str(&format!(" AS ({})", self.query.render_query(dialect, params)));
        sql
    }
}

/// Handle for referring to a CTE by name in FROM, JOIN and column positions.
///
/// Recursive CTEs reference themselves, so a handle can be made before the
/// definition exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CteRef {
    name: String,
}

impl CteRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `"cte"."column"` typed as `T`.
    pub fn column<T>(&self, column: impl Into<String>) -> Expression<T> {
        Expression::from_expr(Expr::CteColumn {
            cte: self.name.clone(),
            column: column.into(),
        })
    }

    /// `"cte".*`
    pub fn all(&self) -> Expr {
        Expr::table_wildcard(self.name.clone())
    }
}

/// Accumulates CTE definitions ahead of the main statement.
#[derive(Debug, Clone, Default)]
pub struct WithBuilder {
    ctes: Vec<Cte>,
}

impl WithBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Order of calls is emission and binding order.
    pub fn cte(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }

    /// Attach any statement as the main query.
    pub fn query<S: Statement>(self, main: S) -> WithQuery<S> {
        WithQuery {
            ctes: self.ctes,
            main,
        }
    }

    pub fn select(self, main: SelectBuilder) -> WithQuery<SelectBuilder> {
        self.query(main)
    }

    pub fn insert(self, main: InsertBuilder) -> WithQuery<InsertBuilder> {
        self.query(main)
    }

    pub fn update(self, main: UpdateBuilder) -> WithQuery<UpdateBuilder> {
        self.query(main)
    }

    pub fn delete(self, main: DeleteBuilder) -> WithQuery<DeleteBuilder> {
        self.query(main)
    }
}

/// `WITH [RECURSIVE] a AS (...), b AS (...) <main>`
#[derive(Debug, Clone)]
pub struct WithQuery<S> {
    ctes: Vec<Cte>,
    main: S,
}

impl<S: Statement> Statement for WithQuery<S> {
    fn kind(&self) -> StatementKind {
        self.main.kind()
    }

    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> SqlResult<String> {
        if self.ctes.is_empty() {
            return self.main.render(dialect, params);
        }
        if !dialect.supports_cte() {
            return Err(SqlError::unsupported_by(dialect, "WITH"));
        }

        let recursive = self.ctes.iter().any(|c| c.recursive);
        let defs: Vec<String> = self
            .ctes
            .iter()
            .map(|c| c.render(dialect, params))
            .collect();
        let main = self.main.render(dialect, params)?;

        Ok(format!(
            "WITH {}{} {}",
            if recursive { "RECURSIVE " } else { "" },
            defs.join(", "),
            main
        ))
    }
}
