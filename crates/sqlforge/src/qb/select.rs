use super::clause::{WhereClause, where_methods};
use super::cte::CteRef;
use super::traits::{Statement, StatementKind};
use crate::dialect::SqlDialect;
use crate::error::SqlResult;
use crate::expr::{Expr, OrderBy, Predicate};
use crate::param::ParamList;
use crate::schema::Table;
use crate::trace;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    target: String,
    alias: Option<String>,
    on: Predicate,
}

#[derive(Debug, Clone)]
enum FromSource {
    Table { name: String, alias: Option<String> },
    Subquery { query: Box<SelectBuilder>, alias: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetOp {
    Union,
    UnionAll,
}

/// SELECT query builder.
///
/// Clauses render in canonical order:
/// `SELECT [DISTINCT] cols FROM source [JOIN ...] [WHERE] [GROUP BY] [HAVING]
/// [UNION ...] [ORDER BY] [LIMIT/OFFSET] [FOR UPDATE]`. A UNION branch with
/// its own ORDER BY, paging or locking is wrapped in parentheses.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    distinct: bool,
    columns: Vec<Expr>,
    from: FromSource,
    joins: Vec<Join>,
    filter: WhereClause,
    group_by: Vec<Expr>,
    having: WhereClause,
    compounds: Vec<(SetOp, SelectBuilder)>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
    for_update: bool,
}

impl SelectBuilder {
    fn with_source(from: FromSource) -> Self {
        Self {
            distinct: false,
            columns: Vec::new(),
            from,
            joins: Vec::new(),
            filter: WhereClause::default(),
            group_by: Vec::new(),
            having: WhereClause::default(),
            compounds: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            for_update: false,
        }
    }

    /// Select from a table.
    pub fn from_table(table: &Table) -> Self {
        Self::with_source(FromSource::Table {
            name: table.name().to_string(),
            alias: None,
        })
    }

    /// Select from a derived table: `FROM (subquery) AS "alias"`.
    pub fn from_subquery(query: SelectBuilder, alias: impl Into<String>) -> Self {
        Self::with_source(FromSource::Subquery {
            query: Box::new(query),
            alias: alias.into(),
        })
    }

    /// Select from a common table expression.
    pub fn from_cte(cte: &CteRef) -> Self {
        Self::with_source(FromSource::Table {
            name: cte.name().to_string(),
            alias: None,
        })
    }

    /// Alias the FROM table: `FROM "users" AS "u"`. No effect on subqueries,
    /// which always carry their own alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        if let FromSource::Table { alias: slot, .. } = &mut self.from {
            *slot = Some(alias.into());
        }
        self
    }

    /// Add one select-list item.
    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Add several select-list items of the same kind.
    pub fn columns<I, E>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn join(self, table: &Table, on: impl Into<Predicate>) -> Self {
        self.join_with(JoinKind::Inner, table.name(), None, on.into())
    }

    pub fn left_join(self, table: &Table, on: impl Into<Predicate>) -> Self {
        self.join_with(JoinKind::Left, table.name(), None, on.into())
    }

    pub fn right_join(self, table: &Table, on: impl Into<Predicate>) -> Self {
        self.join_with(JoinKind::Right, table.name(), None, on.into())
    }

    pub fn full_join(self, table: &Table, on: impl Into<Predicate>) -> Self {
        self.join_with(JoinKind::Full, table.name(), None, on.into())
    }

    /// Join an aliased table. Reference its columns with
    /// [`Column::qualified`](crate::schema::Column::qualified).
    pub fn join_as(
        self,
        kind: JoinKind,
        table: &Table,
        alias: impl Into<String>,
        on: impl Into<Predicate>,
    ) -> Self {
        self.join_with(kind, table.name(), Some(alias.into()), on.into())
    }

    /// Join a common table expression.
    pub fn join_cte(self, kind: JoinKind, cte: &CteRef, on: impl Into<Predicate>) -> Self {
        self.join_with(kind, cte.name(), None, on.into())
    }

    fn join_with(mut self, kind: JoinKind, target: &str, alias: Option<String>, on: Predicate) -> Self {
        self.joins.push(Join {
            kind,
            target: target.to_string(),
            alias,
            on,
        });
        self
    }

    where_methods!(filter);

    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    /// Set the HAVING predicate, replacing any existing one.
    pub fn having(mut self, predicate: impl Into<Predicate>) -> Self {
        self.having.set(predicate.into());
        self
    }

    pub fn and_having(mut self, predicate: impl Into<Predicate>) -> Self {
        self.having.and(predicate.into());
        self
    }

    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Self {
        self.order_by.push(order.into());
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Lock selected rows. Omitted on dialects without row locking.
    pub fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    /// `self UNION other`
    pub fn union(mut self, other: SelectBuilder) -> Self {
        self.compounds.push((SetOp::Union, other));
        self
    }

    /// `self UNION ALL other`
    pub fn union_all(mut self, other: SelectBuilder) -> Self {
        self.compounds.push((SetOp::UnionAll, other));
        self
    }

    /// True when the query carries its own ORDER BY, paging or locking.
    fn has_trailing_clauses(&self) -> bool {
        !self.order_by.is_empty() || self.limit.is_some() || self.offset.is_some() || self.for_update
    }

    /// Render as a query body. Used directly for subqueries, which have no
    /// failure modes of their own.
    pub(crate) fn render_query(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }

        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let cols: Vec<String> = self
                .columns
                .iter()
                .map(|c| c.render(dialect, params))
                .collect();
            sql.push_str(&cols.join(", "));
        }

        sql.push_str(" FROM ");
        match &self.from {
            FromSource::Table { name, alias } => {
                sql.push_str(&dialect.quote_identifier(name));
                if let Some(alias) = alias {
                    sql.push_str(" AS ");
                    sql.push_str(&dialect.quote_identifier(alias));
                }
            }
            FromSource::Subquery { query, alias } => {
                let sub = query.render_query(dialect, params);
                sql.push_str(&format!("({sub}) AS {}", dialect.quote_identifier(alias)));
            }
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join.kind.as_str());
            sql.push(' ');
            sql.push_str(&dialect.quote_identifier(&join.target));
            if let Some(alias) = &join.alias {
                sql.push_str(" AS ");
                sql.push_str(&dialect.quote_identifier(alias));
            }
            sql.push_str(" ON ");
            sql.push_str(&join.on.as_expr().render(dialect, params));
        }

        if let Some(cond) = self.filter.render(dialect, params) {
            sql.push_str(" WHERE ");
            sql.push_str(&cond);
        }

        if !self.group_by.is_empty() {
            let groups: Vec<String> = self
                .group_by
                .iter()
                .map(|g| g.render(dialect, params))
                .collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&groups.join(", "));
        }

        if let Some(cond) = self.having.render(dialect, params) {
            sql.push_str(" HAVING ");
            sql.push_str(&cond);
        }

        for (op, other) in &self.compounds {
            sql.push_str(match op {
                SetOp::Union => " UNION ",
                SetOp::UnionAll => " UNION ALL ",
            });
            let branch = other.render_query(dialect, params);
            if other.has_trailing_clauses() {
                sql.push_str(&format!("({branch})"));
            } else {
                sql.push_str(&branch);
            }
        }

        if !self.order_by.is_empty() {
            let items: Vec<String> = self
                .order_by
                .iter()
                .map(|o| format!("{} {}", o.expr.render(dialect, params), o.direction.as_str()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&items.join(", "));
        }

        let paging = dialect.limit_offset_clause(self.limit, self.offset);
        if !paging.is_empty() {
            sql.push(' ');
            sql.push_str(&paging);
        }

        if self.for_update {
            match dialect.for_update_clause() {
                Some(clause) => {
                    sql.push(' ');
                    sql.push_str(clause);
                }
                None => trace::degraded(dialect.name(), "FOR UPDATE", "omitted"),
            }
        }

        sql
    }
}

impl Statement for SelectBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> SqlResult<String> {
        Ok(self.render_query(dialect, params))
    }
}
