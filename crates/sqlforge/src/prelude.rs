//! Convenient imports for typical `sqlforge` usage.
//!
//! ```ignore
//! use sqlforge::prelude::*;
//! ```

pub use crate::dialect::{
    DialectCapabilities, GenericDialect, MySqlDialect, PostgresDialect, SqlDialect, SqliteDialect,
};
pub use crate::expr::{
    Expr, Expression, IntoExpression, OrderBy, Predicate, avg, coalesce, count, count_all,
    count_distinct, escape_like, exists, lower, max, min, not_exists, scalar, sum, upper,
};
pub use crate::qb::{
    Cte, CteRef, JoinKind, SelectBuilder, Statement, batch_insert, delete, insert, select, update,
    with,
};
pub use crate::schema::{Column, ColumnType, Table};
pub use crate::{PreparedSql, SqlError, SqlResult, Value};
