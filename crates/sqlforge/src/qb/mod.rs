//! Statement builders.
//!
//! Builders accumulate clause state through chained calls and render once, on
//! `build(dialect)`, into a [`PreparedSql`](crate::PreparedSql).
//!
//! # Usage
//!
//! ```ignore
//! use sqlforge::prelude::*;
//!
//! let pg = PostgresDialect::new();
//!
//! // SELECT
//! let q = select(&users.table)
//!     .where_(users.age.gt(18))
//!     .order_by(users.name.asc())
//!     .limit(20)
//!     .build(&pg)?;
//!
//! // INSERT ... ON CONFLICT
//! let q = insert(&users.table)
//!     .set(&users.email, "alice@example.com")
//!     .set(&users.name, "Alice")
//!     .on_conflict([&users.email])
//!     .do_update()
//!     .build(&pg)?;
//!
//! // UPDATE
//! let q = update(&users.table)
//!     .set(&users.balance, &users.balance - 10i64)
//!     .where_(users.id.eq(1i64))
//!     .build(&pg)?;
//!
//! // DELETE
//! let q = delete(&users.table).where_(users.id.eq(1i64)).build(&pg)?;
//! ```

mod batch;
mod clause;
mod cte;
mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use batch::{BatchInsertBuilder, RowBuilder};
pub use clause::{Assignments, ReturningClause, ReturningColumns, WhereClause};
pub use cte::{Cte, CteRef, WithBuilder, WithQuery};
pub use delete::DeleteBuilder;
pub use insert::{ConflictAction, InsertBuilder, OnConflictBuilder};
pub use select::{JoinKind, SelectBuilder};
pub use traits::{Statement, StatementKind};
pub use update::UpdateBuilder;

use crate::schema::Table;

/// Create a SELECT query builder for the given table.
pub fn select(table: &Table) -> SelectBuilder {
    SelectBuilder::from_table(table)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &Table) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create a multi-row INSERT builder for the given table.
pub fn batch_insert(table: &Table) -> BatchInsertBuilder {
    BatchInsertBuilder::new(table)
}

/// Create an UPDATE query builder for the given table.
pub fn update(table: &Table) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE query builder for the given table.
///
/// No WHERE clause means every row is deleted; there is no implicit guard.
pub fn delete(table: &Table) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

/// Start a WITH clause with its first CTE.
pub fn with(cte: Cte) -> WithBuilder {
    WithBuilder::new().cte(cte)
}
