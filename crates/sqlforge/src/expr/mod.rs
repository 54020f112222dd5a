//! Expression and predicate AST.
//!
//! [`Expr`] is a closed sum type covering every scalar and boolean node the
//! builders can emit. Rendering is a single depth-first walk: each node writes
//! its fragment and, in the same left-to-right order, pushes any bound values
//! into the shared [`ParamList`]. Nothing is rendered twice or reordered after
//! the fact, so placeholder order always equals parameter order.
//!
//! The typed surface ([`Expression<T>`], [`Predicate`], column operators) lives
//! in the submodules and only ever produces `Expr` values.

mod like;
mod ops;
mod typed;

pub use like::escape_like;
pub use ops::{avg, coalesce, count, count_all, count_distinct, exists, lower, max, min, not_exists, scalar, sum, upper};
pub use typed::{Expression, IntoExpression, OrderBy, Predicate, SortDirection};

use crate::dialect::SqlDialect;
use crate::param::ParamList;
use crate::qb::SelectBuilder;
use crate::trace;
use crate::value::Value;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }
}

/// Aggregate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunc {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
        }
    }
}

/// Untyped expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column reference, qualified by table (or alias) when known.
    Column { table: Option<String>, name: String },

    /// Column of a common table expression.
    CteColumn { cte: String, column: String },

    /// Bound value: renders `?`.
    Literal(Value),

    /// The `NULL` keyword, inlined.
    Null,

    /// `*` or `table.*`.
    Wildcard { table: Option<String> },

    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },

    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// `x IN (...)`. An empty list renders a constant predicate.
    InList {
        expr: Box<Expr>,
        values: Vec<Expr>,
        negated: bool,
    },

    InSubquery {
        expr: Box<Expr>,
        query: Box<SelectBuilder>,
        negated: bool,
    },

    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
        case_insensitive: bool,
        escape: Option<char>,
    },

    IsNull { expr: Box<Expr>, negated: bool },

    /// `(l) AND (r)`; both sides always parenthesized.
    And(Box<Expr>, Box<Expr>),

    /// `(l) OR (r)`; both sides always parenthesized.
    Or(Box<Expr>, Box<Expr>),

    Not(Box<Expr>),

    Exists {
        query: Box<SelectBuilder>,
        negated: bool,
    },

    /// Scalar subquery.
    Subquery(Box<SelectBuilder>),

    Arithmetic {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
    },

    Function { name: String, args: Vec<Expr> },

    /// `func(arg)`, `func(DISTINCT arg)`, or `COUNT(*)` when `arg` is `None`.
    Aggregate {
        func: AggregateFunc,
        arg: Option<Box<Expr>>,
        distinct: bool,
    },

    Alias { expr: Box<Expr>, alias: String },

    /// Verbatim SQL without parameters.
    Raw(String),

    /// SQL with `?` placeholders bound to `params` in order.
    Template { sql: String, params: Vec<Value> },
}

impl Expr {
    pub fn column(table: Option<&str>, name: impl Into<String>) -> Self {
        Expr::Column {
            table: table.map(str::to_string),
            name: name.into(),
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// `*`
    pub fn wildcard() -> Self {
        Expr::Wildcard { table: None }
    }

    /// `"table".*`
    pub fn table_wildcard(table: impl Into<String>) -> Self {
        Expr::Wildcard {
            table: Some(table.into()),
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Create a template expression with `?` placeholders.
    ///
    /// # Example
    /// ```ignore
    /// Expr::template("a = ? OR b = ?", [Value::I32(1), Value::I32(2)])
    /// ```
    pub fn template(sql: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        Expr::Template {
            sql: sql.into(),
            params: params.into_iter().collect(),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn alias(self, alias: impl Into<String>) -> Self {
        Expr::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    pub(crate) fn and(self, other: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub(crate) fn or(self, other: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    fn is_null_value(&self) -> bool {
        matches!(self, Expr::Null | Expr::Literal(Value::Null))
    }

    /// Nodes that must be parenthesized when used as an operand.
    fn is_predicate(&self) -> bool {
        matches!(
            self,
            Expr::Compare { .. }
                | Expr::Between { .. }
                | Expr::InList { .. }
                | Expr::InSubquery { .. }
                | Expr::Like { .. }
                | Expr::IsNull { .. }
                | Expr::And(..)
                | Expr::Or(..)
                | Expr::Not(..)
                | Expr::Exists { .. }
        )
    }

    fn render_operand(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> String {
        let sql = self.render(dialect, params);
        if self.is_predicate() {
            format!("({sql})")
        } else {
            sql
        }
    }

    fn render_arith_operand(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> String {
        let sql = self.render(dialect, params);
        if self.is_predicate() || matches!(self, Expr::Arithmetic { .. }) {
            format!("({sql})")
        } else {
            sql
        }
    }

    /// Render this node, appending its bound values to `params` in the order
    /// their placeholders appear in the returned fragment.
    pub fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> String {
        match self {
            Expr::Column { table, name } => match table {
                Some(t) => format!(
                    "{}.{}",
                    dialect.quote_identifier(t),
                    dialect.quote_identifier(name)
                ),
                None => dialect.quote_identifier(name),
            },
            Expr::CteColumn { cte, column } => format!(
                "{}.{}",
                dialect.quote_identifier(cte),
                dialect.quote_identifier(column)
            ),
            Expr::Literal(value) => params.bind(value.clone()).to_string(),
            Expr::Null => "NULL".to_string(),
            Expr::Wildcard { table } => match table {
                Some(t) => format!("{}.*", dialect.quote_identifier(t)),
                None => "*".to_string(),
            },
            Expr::Compare { left, op, right } => {
                if matches!(op, CompareOp::Eq | CompareOp::Ne)
                    && (left.is_null_value() || right.is_null_value())
                {
                    let subject = if right.is_null_value() { left } else { right };
                    let l = subject.render_operand(dialect, params);
                    return match op {
                        CompareOp::Eq => format!("{l} IS NULL"),
                        _ => format!("{l} IS NOT NULL"),
                    };
                }
                let l = left.render_operand(dialect, params);
                let r = right.render_operand(dialect, params);
                format!("{l} {} {r}", op.as_str())
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let e = expr.render_operand(dialect, params);
                let lo = low.render_operand(dialect, params);
                let hi = high.render_operand(dialect, params);
                let op = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                format!("{e} {op} {lo} AND {hi}")
            }
            Expr::InList {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return if *negated { "1=1".to_string() } else { "1=0".to_string() };
                }
                let e = expr.render_operand(dialect, params);
                let items: Vec<String> = values
                    .iter()
                    .map(|v| v.render_operand(dialect, params))
                    .collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{e} {op} ({})", items.join(", "))
            }
            Expr::InSubquery {
                expr,
                query,
                negated,
            } => {
                let e = expr.render_operand(dialect, params);
                let sub = query.render_query(dialect, params);
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{e} {op} ({sub})")
            }
            Expr::Like {
                expr,
                pattern,
                negated,
                case_insensitive,
                escape,
            } => {
                let not = if *negated { "NOT " } else { "" };
                let mut sql = if *case_insensitive && !dialect.supports_ilike() {
                    trace::degraded(dialect.name(), "ILIKE", "LOWER() LIKE LOWER()");
                    let e = expr.render(dialect, params);
                    let p = pattern.render(dialect, params);
                    format!("LOWER({e}) {not}LIKE LOWER({p})")
                } else {
                    let e = expr.render_operand(dialect, params);
                    let p = pattern.render_operand(dialect, params);
                    let op = if *case_insensitive { "ILIKE" } else { "LIKE" };
                    format!("{e} {not}{op} {p}")
                };
                if let Some(c) = escape {
                    sql.push(' ');
                    sql.push_str(&dialect.like_escape_clause(*c));
                }
                sql
            }
            Expr::IsNull { expr, negated } => {
                let e = expr.render_operand(dialect, params);
                if *negated {
                    format!("{e} IS NOT NULL")
                } else {
                    format!("{e} IS NULL")
                }
            }
            Expr::And(l, r) => {
                let l = l.render(dialect, params);
                let r = r.render(dialect, params);
                format!("({l}) AND ({r})")
            }
            Expr::Or(l, r) => {
                let l = l.render(dialect, params);
                let r = r.render(dialect, params);
                format!("({l}) OR ({r})")
            }
            Expr::Not(inner) => format!("NOT ({})", inner.render(dialect, params)),
            Expr::Exists { query, negated } => {
                let sub = query.render_query(dialect, params);
                if *negated {
                    format!("NOT EXISTS ({sub})")
                } else {
                    format!("EXISTS ({sub})")
                }
            }
            Expr::Subquery(query) => format!("({})", query.render_query(dialect, params)),
            Expr::Arithmetic { left, op, right } => {
                let l = left.render_arith_operand(dialect, params);
                let r = right.render_arith_operand(dialect, params);
                format!("{l} {} {r}", op.as_str())
            }
            Expr::Function { name, args } => {
                let args: Vec<String> = args.iter().map(|a| a.render(dialect, params)).collect();
                format!("{name}({})", args.join(", "))
            }
            Expr::Aggregate {
                func,
                arg,
                distinct,
            } => match arg {
                None => format!("{}(*)", func.as_str()),
                Some(arg) => {
                    let a = arg.render(dialect, params);
                    if *distinct {
                        format!("{}(DISTINCT {a})", func.as_str())
                    } else {
                        format!("{}({a})", func.as_str())
                    }
                }
            },
            Expr::Alias { expr, alias } => format!(
                "{} AS {}",
                expr.render_operand(dialect, params),
                dialect.quote_identifier(alias)
            ),
            Expr::Raw(sql) => sql.clone(),
            Expr::Template {
                sql,
                params: values,
            } => render_template(sql, values, params),
        }
    }
}

/// Bind template values to `?` placeholders outside quoted regions.
///
/// Surplus values are still pushed so a mismatch is caught when the statement
/// is built.
fn render_template(sql: &str, values: &[Value], params: &mut ParamList) -> String {
    let mut values = values.iter();
    let mut quote: Option<char> = None;
    for ch in sql.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if matches!(ch, '\'' | '"' | '`') => quote = Some(ch),
            None if ch == '?' => {
                if let Some(v) = values.next() {
                    params.push(v.clone());
                }
            }
            None => {}
        }
    }
    params.extend(values.cloned());
    sql.to_string()
}
