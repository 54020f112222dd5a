//! # sqlforge
//!
//! A type-checked SQL query builder that renders dialect-correct,
//! parameterized SQL.
//!
//! ## Features
//!
//! - **Typed columns**: `Column<T>` only compares against values and expressions of `T`
//! - **One render pass**: placeholder order always equals parameter order
//! - **Dialects as data**: capability flags plus overridable rendering (`SqlDialect`)
//! - **Soft vs hard features**: RETURNING degrades silently, ON CONFLICT fails loudly
//! - **DDL**: CREATE/DROP TABLE and INDEX from the same schema model
//!
//! ## Example
//!
//! ```ignore
//! use sqlforge::prelude::*;
//!
//! let mut t = Table::builder("users");
//! let id = t.add(Column::new("id", ColumnType::big_int()).primary_key());
//! let age = t.add(Column::new("age", ColumnType::integer()));
//! let users = t.build()?;
//!
//! let q = select(&users).where_(age.gt(18)).build(&PostgresDialect::new())?;
//! assert_eq!(q.sql, r#"SELECT * FROM "users" WHERE "users"."age" > ?"#);
//! assert_eq!(q.params, vec![Value::I32(18)]);
//! ```
//!
//! Statements are plain values: build them on one thread, ship the resulting
//! `PreparedSql` anywhere. Schema objects and dialects are immutable and safe
//! to share.

pub mod dialect;
pub mod error;
pub mod expr;
pub mod param;
pub mod prelude;
pub mod prepared;
pub mod qb;
pub mod schema;
pub mod trace;
pub mod value;

pub use dialect::{
    DialectCapabilities, GenericDialect, MySqlDialect, PostgresDialect, SqlDialect, SqliteDialect,
};
pub use error::{SqlError, SqlResult};
pub use expr::{Expr, Expression, IntoExpression, Predicate, escape_like};
pub use param::ParamList;
pub use prepared::{PreparedSql, placeholder_count};
pub use schema::{Column, ColumnType, Table};
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{Cte, Statement, StatementKind, batch_insert, delete, insert, select, update, with};
