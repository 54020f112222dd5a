//! Typed wrappers over [`Expr`].

use super::Expr;
use crate::schema::{Column, ColumnValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// An expression producing values of type `T`.
pub struct Expression<T> {
    expr: Expr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self::from_expr(self.expr.clone())
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.expr).finish()
    }
}

impl<T> Expression<T> {
    /// Wrap an untyped node. The caller vouches for its type.
    pub fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _marker: PhantomData,
        }
    }

    pub fn as_expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Raw SQL typed as `T`.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::from_expr(Expr::Raw(sql.into()))
    }

    /// `<expr> AS "alias"`
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self::from_expr(self.expr.alias(alias))
    }

    pub fn asc(self) -> OrderBy {
        OrderBy::new(self.expr, SortDirection::Asc)
    }

    pub fn desc(self) -> OrderBy {
        OrderBy::new(self.expr, SortDirection::Desc)
    }
}

impl<T: ColumnValue> Expression<T> {
    /// A bound value.
    pub fn value(value: T) -> Self {
        Self::from_expr(Expr::Literal(value.to_value()))
    }
}

impl<T: ColumnValue> Expression<Option<T>> {
    /// The `NULL` keyword, inlined rather than bound.
    pub fn null() -> Self {
        Self::from_expr(Expr::Null)
    }
}

/// A boolean condition.
///
/// `and`/`or` always parenthesize both operands, so nesting never depends on
/// SQL operator precedence.
#[derive(Debug, Clone)]
pub struct Predicate {
    expr: Expr,
}

impl Predicate {
    pub fn from_expr(expr: Expr) -> Self {
        Self { expr }
    }

    pub fn as_expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// `(self) AND (other)`
    pub fn and(self, other: impl Into<Predicate>) -> Self {
        Self::from_expr(self.expr.and(other.into().expr))
    }

    /// `(self) OR (other)`
    pub fn or(self, other: impl Into<Predicate>) -> Self {
        Self::from_expr(self.expr.or(other.into().expr))
    }

    /// `NOT (self)`
    pub fn not(self) -> Self {
        Self::from_expr(Expr::Not(Box::new(self.expr)))
    }

    /// Raw SQL condition without parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::from_expr(Expr::Raw(sql.into()))
    }

    /// Condition with `?` placeholders bound in order.
    ///
    /// ```ignore
    /// Predicate::template("age BETWEEN ? AND ?", [Value::I32(18), Value::I32(65)])
    /// ```
    pub fn template(
        sql: impl Into<String>,
        params: impl IntoIterator<Item = crate::value::Value>,
    ) -> Self {
        Self::from_expr(Expr::template(sql, params))
    }
}

impl std::ops::BitAnd for Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Predicate) -> Predicate {
        self.and(rhs)
    }
}

impl std::ops::BitOr for Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Predicate) -> Predicate {
        self.or(rhs)
    }
}

impl From<Expression<bool>> for Predicate {
    fn from(e: Expression<bool>) -> Self {
        Predicate::from_expr(e.expr)
    }
}

impl From<&Column<bool>> for Predicate {
    fn from(c: &Column<bool>) -> Self {
        Predicate::from_expr(c.to_expr())
    }
}

/// Values convertible into an expression of type `T`.
///
/// Implemented for columns and expressions of `T`, and for plain values, which
/// become bound parameters. A non-null value also converts into a nullable
/// expression.
pub trait IntoExpression<T> {
    fn into_expression(self) -> Expression<T>;
}

impl<T> IntoExpression<T> for Expression<T> {
    fn into_expression(self) -> Expression<T> {
        self
    }
}

impl<T> IntoExpression<T> for &Column<T> {
    fn into_expression(self) -> Expression<T> {
        Expression::from_expr(self.to_expr())
    }
}

impl<T> IntoExpression<T> for Column<T> {
    fn into_expression(self) -> Expression<T> {
        Expression::from_expr(self.to_expr())
    }
}

macro_rules! impl_into_expression {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoExpression<$ty> for $ty {
                fn into_expression(self) -> Expression<$ty> {
                    Expression::value(self)
                }
            }

            impl IntoExpression<Option<$ty>> for $ty {
                fn into_expression(self) -> Expression<Option<$ty>> {
                    Expression::value(Some(self))
                }
            }

            impl IntoExpression<Option<$ty>> for Option<$ty> {
                fn into_expression(self) -> Expression<Option<$ty>> {
                    Expression::value(self)
                }
            }
        )*
    };
}

impl_into_expression!(
    bool,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    Vec<u8>,
    Uuid,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<Utc>,
    serde_json::Value,
);

#[cfg(feature = "rust_decimal")]
impl_into_expression!(rust_decimal::Decimal);

impl IntoExpression<String> for &str {
    fn into_expression(self) -> Expression<String> {
        Expression::value(self.to_string())
    }
}

impl IntoExpression<Option<String>> for &str {
    fn into_expression(self) -> Expression<Option<String>> {
        Expression::value(Some(self.to_string()))
    }
}

impl IntoExpression<String> for &String {
    fn into_expression(self) -> Expression<String> {
        Expression::value(self.clone())
    }
}

impl<T> Column<T> {
    /// This column as an untyped node, qualified by its table.
    pub fn to_expr(&self) -> Expr {
        Expr::Column {
            table: self.table().map(str::to_string),
            name: self.name().to_string(),
        }
    }

    /// This column as a typed expression.
    pub fn expr(&self) -> Expression<T> {
        Expression::from_expr(self.to_expr())
    }

    pub fn asc(&self) -> OrderBy {
        OrderBy::new(self.to_expr(), SortDirection::Asc)
    }

    pub fn desc(&self) -> OrderBy {
        OrderBy::new(self.to_expr(), SortDirection::Desc)
    }

    /// `<col> AS "alias"`
    pub fn alias(&self, alias: impl Into<String>) -> Expression<T> {
        self.expr().alias(alias)
    }
}

impl<T> From<&Column<T>> for Expr {
    fn from(c: &Column<T>) -> Self {
        c.to_expr()
    }
}

impl<T> From<Column<T>> for Expr {
    fn from(c: Column<T>) -> Self {
        c.to_expr()
    }
}

impl<T> From<Expression<T>> for Expr {
    fn from(e: Expression<T>) -> Self {
        e.expr
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        p.expr
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One ORDER BY item.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub expr: Expr,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(expr: Expr, direction: SortDirection) -> Self {
        Self { expr, direction }
    }
}

impl<T> From<&Column<T>> for OrderBy {
    fn from(c: &Column<T>) -> Self {
        c.asc()
    }
}

impl<T> From<Expression<T>> for OrderBy {
    fn from(e: Expression<T>) -> Self {
        e.asc()
    }
}
