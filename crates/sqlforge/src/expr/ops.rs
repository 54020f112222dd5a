//! Operators on columns and typed expressions, plus aggregate and scalar
//! functions.

use super::like::escape_like;
use super::{AggregateFunc, ArithOp, CompareOp, Expr, Expression, IntoExpression, Predicate};
use crate::qb::SelectBuilder;
use crate::schema::{Column, NumericValue, TextValue};
use crate::value::Value;

const LIKE_ESCAPE: char = '\\';

fn compare<T>(left: Expr, op: CompareOp, right: impl IntoExpression<T>) -> Predicate {
    Predicate::from_expr(Expr::Compare {
        left: Box::new(left),
        op,
        right: Box::new(right.into_expression().into_expr()),
    })
}

fn arith<T>(left: Expr, op: ArithOp, right: impl IntoExpression<T>) -> Expression<T> {
    Expression::from_expr(Expr::Arithmetic {
        left: Box::new(left),
        op,
        right: Box::new(right.into_expression().into_expr()),
    })
}

fn like(expr: Expr, pattern: Expr, negated: bool, case_insensitive: bool, escape: Option<char>) -> Predicate {
    Predicate::from_expr(Expr::Like {
        expr: Box::new(expr),
        pattern: Box::new(pattern),
        negated,
        case_insensitive,
        escape,
    })
}

fn in_list<T, V: IntoExpression<T>>(
    expr: Expr,
    values: impl IntoIterator<Item = V>,
    negated: bool,
) -> Predicate {
    Predicate::from_expr(Expr::InList {
        expr: Box::new(expr),
        values: values
            .into_iter()
            .map(|v| v.into_expression().into_expr())
            .collect(),
        negated,
    })
}

impl<T> Expression<T> {
    /// `= value`; against NULL renders `IS NULL` with no parameter.
    pub fn eq(self, value: impl IntoExpression<T>) -> Predicate {
        compare(self.into_expr(), CompareOp::Eq, value)
    }

    /// `<> value`; against NULL renders `IS NOT NULL` with no parameter.
    pub fn neq(self, value: impl IntoExpression<T>) -> Predicate {
        compare(self.into_expr(), CompareOp::Ne, value)
    }

    pub fn gt(self, value: impl IntoExpression<T>) -> Predicate {
        compare(self.into_expr(), CompareOp::Gt, value)
    }

    pub fn gte(self, value: impl IntoExpression<T>) -> Predicate {
        compare(self.into_expr(), CompareOp::Gte, value)
    }

    pub fn lt(self, value: impl IntoExpression<T>) -> Predicate {
        compare(self.into_expr(), CompareOp::Lt, value)
    }

    pub fn lte(self, value: impl IntoExpression<T>) -> Predicate {
        compare(self.into_expr(), CompareOp::Lte, value)
    }

    pub fn between(self, low: impl IntoExpression<T>, high: impl IntoExpression<T>) -> Predicate {
        self.between_impl(low, high, false)
    }

    pub fn not_between(self, low: impl IntoExpression<T>, high: impl IntoExpression<T>) -> Predicate {
        self.between_impl(low, high, true)
    }

    fn between_impl(
        self,
        low: impl IntoExpression<T>,
        high: impl IntoExpression<T>,
        negated: bool,
    ) -> Predicate {
        Predicate::from_expr(Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into_expression().into_expr()),
            high: Box::new(high.into_expression().into_expr()),
            negated,
        })
    }

    /// `IN (...)`; an empty list renders `1=0`.
    pub fn in_list<V: IntoExpression<T>>(self, values: impl IntoIterator<Item = V>) -> Predicate {
        in_list(self.into_expr(), values, false)
    }

    /// `NOT IN (...)`; an empty list renders `1=1`.
    pub fn not_in<V: IntoExpression<T>>(self, values: impl IntoIterator<Item = V>) -> Predicate {
        in_list(self.into_expr(), values, true)
    }

    pub fn in_subquery(self, query: SelectBuilder) -> Predicate {
        Predicate::from_expr(Expr::InSubquery {
            expr: Box::new(self.into_expr()),
            query: Box::new(query),
            negated: false,
        })
    }

    pub fn not_in_subquery(self, query: SelectBuilder) -> Predicate {
        Predicate::from_expr(Expr::InSubquery {
            expr: Box::new(self.into_expr()),
            query: Box::new(query),
            negated: true,
        })
    }

    pub fn is_null(self) -> Predicate {
        Predicate::from_expr(Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: false,
        })
    }

    pub fn is_not_null(self) -> Predicate {
        Predicate::from_expr(Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: true,
        })
    }
}

impl<T: NumericValue> Expression<T> {
    pub fn plus(self, value: impl IntoExpression<T>) -> Expression<T> {
        arith(self.into_expr(), ArithOp::Add, value)
    }

    pub fn minus(self, value: impl IntoExpression<T>) -> Expression<T> {
        arith(self.into_expr(), ArithOp::Sub, value)
    }

    pub fn times(self, value: impl IntoExpression<T>) -> Expression<T> {
        arith(self.into_expr(), ArithOp::Mul, value)
    }

    pub fn divided_by(self, value: impl IntoExpression<T>) -> Expression<T> {
        arith(self.into_expr(), ArithOp::Div, value)
    }

    pub fn modulo(self, value: impl IntoExpression<T>) -> Expression<T> {
        arith(self.into_expr(), ArithOp::Mod, value)
    }
}

impl<T: TextValue> Expression<T> {
    /// `LIKE pattern`. The pattern is used verbatim; see [`escape_like`].
    pub fn like(self, pattern: impl IntoExpression<T>) -> Predicate {
        like(self.into_expr(), pattern.into_expression().into_expr(), false, false, None)
    }

    pub fn not_like(self, pattern: impl IntoExpression<T>) -> Predicate {
        like(self.into_expr(), pattern.into_expression().into_expr(), true, false, None)
    }

    /// Case-insensitive LIKE; lowered to `LOWER(x) LIKE LOWER(?)` on dialects
    /// without ILIKE.
    pub fn ilike(self, pattern: impl IntoExpression<T>) -> Predicate {
        like(self.into_expr(), pattern.into_expression().into_expr(), false, true, None)
    }

    pub fn not_ilike(self, pattern: impl IntoExpression<T>) -> Predicate {
        like(self.into_expr(), pattern.into_expression().into_expr(), true, true, None)
    }

    /// Literal substring match: wildcards in `needle` are escaped.
    pub fn contains(self, needle: &str) -> Predicate {
        self.escaped_like(format!("%{}%", escape_like(needle)))
    }

    pub fn starts_with(self, prefix: &str) -> Predicate {
        self.escaped_like(format!("{}%", escape_like(prefix)))
    }

    pub fn ends_with(self, suffix: &str) -> Predicate {
        self.escaped_like(format!("%{}", escape_like(suffix)))
    }

    fn escaped_like(self, pattern: String) -> Predicate {
        like(
            self.into_expr(),
            Expr::Literal(Value::String(pattern)),
            false,
            false,
            Some(LIKE_ESCAPE),
        )
    }
}

impl<T> Column<T> {
    pub fn eq(&self, value: impl IntoExpression<T>) -> Predicate {
        self.expr().eq(value)
    }

    pub fn neq(&self, value: impl IntoExpression<T>) -> Predicate {
        self.expr().neq(value)
    }

    pub fn gt(&self, value: impl IntoExpression<T>) -> Predicate {
        self.expr().gt(value)
    }

    pub fn gte(&self, value: impl IntoExpression<T>) -> Predicate {
        self.expr().gte(value)
    }

    pub fn lt(&self, value: impl IntoExpression<T>) -> Predicate {
        self.expr().lt(value)
    }

    pub fn lte(&self, value: impl IntoExpression<T>) -> Predicate {
        self.expr().lte(value)
    }

    pub fn between(&self, low: impl IntoExpression<T>, high: impl IntoExpression<T>) -> Predicate {
        self.expr().between(low, high)
    }

    pub fn not_between(&self, low: impl IntoExpression<T>, high: impl IntoExpression<T>) -> Predicate {
        self.expr().not_between(low, high)
    }

    pub fn in_list<V: IntoExpression<T>>(&self, values: impl IntoIterator<Item = V>) -> Predicate {
        self.expr().in_list(values)
    }

    pub fn not_in<V: IntoExpression<T>>(&self, values: impl IntoIterator<Item = V>) -> Predicate {
        self.expr().not_in(values)
    }

    pub fn in_subquery(&self, query: SelectBuilder) -> Predicate {
        self.expr().in_subquery(query)
    }

    pub fn not_in_subquery(&self, query: SelectBuilder) -> Predicate {
        self.expr().not_in_subquery(query)
    }

    pub fn is_null(&self) -> Predicate {
        self.expr().is_null()
    }

    pub fn is_not_null(&self) -> Predicate {
        self.expr().is_not_null()
    }
}

impl<T: NumericValue> Column<T> {
    pub fn plus(&self, value: impl IntoExpression<T>) -> Expression<T> {
        self.expr().plus(value)
    }

    pub fn minus(&self, value: impl IntoExpression<T>) -> Expression<T> {
        self.expr().minus(value)
    }

    pub fn times(&self, value: impl IntoExpression<T>) -> Expression<T> {
        self.expr().times(value)
    }

    pub fn divided_by(&self, value: impl IntoExpression<T>) -> Expression<T> {
        self.expr().divided_by(value)
    }

    pub fn modulo(&self, value: impl IntoExpression<T>) -> Expression<T> {
        self.expr().modulo(value)
    }
}

impl<T: TextValue> Column<T> {
    pub fn like(&self, pattern: impl IntoExpression<T>) -> Predicate {
        self.expr().like(pattern)
    }

    pub fn not_like(&self, pattern: impl IntoExpression<T>) -> Predicate {
        self.expr().not_like(pattern)
    }

    pub fn ilike(&self, pattern: impl IntoExpression<T>) -> Predicate {
        self.expr().ilike(pattern)
    }

    pub fn not_ilike(&self, pattern: impl IntoExpression<T>) -> Predicate {
        self.expr().not_ilike(pattern)
    }

    pub fn contains(&self, needle: &str) -> Predicate {
        self.expr().contains(needle)
    }

    pub fn starts_with(&self, prefix: &str) -> Predicate {
        self.expr().starts_with(prefix)
    }

    pub fn ends_with(&self, suffix: &str) -> Predicate {
        self.expr().ends_with(suffix)
    }
}

macro_rules! impl_arith_ops {
    ($($trait:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl<T: NumericValue, R: IntoExpression<T>> std::ops::$trait<R> for Expression<T> {
                type Output = Expression<T>;

                fn $method(self, rhs: R) -> Expression<T> {
                    arith(self.into_expr(), ArithOp::$op, rhs)
                }
            }

            impl<T: NumericValue, R: IntoExpression<T>> std::ops::$trait<R> for &Column<T> {
                type Output = Expression<T>;

                fn $method(self, rhs: R) -> Expression<T> {
                    arith(self.to_expr(), ArithOp::$op, rhs)
                }
            }
        )*
    };
}

impl_arith_ops! {
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Mod,
}

/// `COUNT(*)`
pub fn count_all() -> Expression<i64> {
    Expression::from_expr(Expr::Aggregate {
        func: AggregateFunc::Count,
        arg: None,
        distinct: false,
    })
}

fn aggregate<T, R>(func: AggregateFunc, arg: impl IntoExpression<T>, distinct: bool) -> Expression<R> {
    Expression::from_expr(Expr::Aggregate {
        func,
        arg: Some(Box::new(arg.into_expression().into_expr())),
        distinct,
    })
}

pub fn count<T>(arg: impl IntoExpression<T>) -> Expression<i64> {
    aggregate(AggregateFunc::Count, arg, false)
}

pub fn count_distinct<T>(arg: impl IntoExpression<T>) -> Expression<i64> {
    aggregate(AggregateFunc::Count, arg, true)
}

pub fn sum<T: NumericValue>(arg: impl IntoExpression<T>) -> Expression<T> {
    aggregate(AggregateFunc::Sum, arg, false)
}

pub fn avg<T: NumericValue>(arg: impl IntoExpression<T>) -> Expression<f64> {
    aggregate(AggregateFunc::Avg, arg, false)
}

pub fn min<T>(arg: impl IntoExpression<T>) -> Expression<T> {
    aggregate(AggregateFunc::Min, arg, false)
}

pub fn max<T>(arg: impl IntoExpression<T>) -> Expression<T> {
    aggregate(AggregateFunc::Max, arg, false)
}

pub fn lower<T: TextValue>(arg: impl IntoExpression<T>) -> Expression<T> {
    Expression::from_expr(Expr::function("LOWER", vec![arg.into_expression().into_expr()]))
}

pub fn upper<T: TextValue>(arg: impl IntoExpression<T>) -> Expression<T> {
    Expression::from_expr(Expr::function("UPPER", vec![arg.into_expression().into_expr()]))
}

/// `COALESCE(value, fallback)`
pub fn coalesce<T>(value: impl IntoExpression<Option<T>>, fallback: impl IntoExpression<T>) -> Expression<T> {
    Expression::from_expr(Expr::function(
        "COALESCE",
        vec![
            value.into_expression().into_expr(),
            fallback.into_expression().into_expr(),
        ],
    ))
}

/// `(subquery)` used as a value. The query must yield one column and at most
/// one row; the caller vouches for its type.
pub fn scalar<T>(query: SelectBuilder) -> Expression<T> {
    Expression::from_expr(Expr::Subquery(Box::new(query)))
}

/// `EXISTS (subquery)`
pub fn exists(query: SelectBuilder) -> Predicate {
    Predicate::from_expr(Expr::Exists {
        query: Box::new(query),
        negated: false,
    })
}

/// `NOT EXISTS (subquery)`
pub fn not_exists(query: SelectBuilder) -> Predicate {
    Predicate::from_expr(Expr::Exists {
        query: Box::new(query),
        negated: true,
    })
}
