use super::types::{ColumnType, ColumnValue, SqlType};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column constraint flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFlags {
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub auto_increment: bool,
}

/// Default value of a column in DDL.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    /// Rendered as a literal through the dialect.
    Literal(Value),
    /// Raw SQL, e.g. `CURRENT_TIMESTAMP`.
    Expression(String),
}

/// A typed column.
///
/// The owning table is recorded by name only, for qualification when the
/// column is rendered. Columns never own their table.
pub struct Column<T> {
    table: Option<String>,
    name: String,
    ty: ColumnType<T>,
    flags: ColumnFlags,
    default: Option<ColumnDefault>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            name: self.name.clone(),
            ty: self.ty.clone(),
            flags: self.flags,
            default: self.default.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("table", &self.table)
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("flags", &self.flags)
            .finish()
    }
}

impl<T: ColumnValue> Column<T> {
    /// Create an unbound column. It gets its table when added to a
    /// [`TableBuilder`](super::TableBuilder).
    pub fn new(name: impl Into<String>, ty: ColumnType<T>) -> Self {
        Self {
            table: None,
            name: name.into(),
            ty,
            flags: ColumnFlags {
                nullable: T::NULLABLE,
                ..ColumnFlags::default()
            },
            default: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.flags.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.flags.unique = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.flags.auto_increment = true;
        self
    }

    /// Literal default used by CREATE TABLE.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(ColumnDefault::Literal(value.to_value()));
        self
    }

    /// Raw SQL default used by CREATE TABLE.
    pub fn default_expr(mut self, sql: impl Into<String>) -> Self {
        self.default = Some(ColumnDefault::Expression(sql.into()));
        self
    }

    /// The same column admitting NULL.
    pub fn nullable(self) -> Column<Option<T>> {
        Column {
            table: self.table,
            name: self.name,
            ty: self.ty.nullable(),
            flags: ColumnFlags {
                nullable: true,
                ..self.flags
            },
            default: self.default,
        }
    }

    pub fn column_type(&self) -> &ColumnType<T> {
        &self.ty
    }

    pub(crate) fn definition(&self) -> ColumnDef {
        ColumnDef {
            name: self.name.clone(),
            sql_type: self.ty.sql_type(),
            flags: self.flags,
            default: self.default.clone(),
        }
    }
}

impl<T> Column<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }

    /// The same column qualified by another name, e.g. a join alias.
    pub fn qualified(&self, qualifier: impl Into<String>) -> Self {
        Self {
            table: Some(qualifier.into()),
            ..self.clone()
        }
    }

    /// Type-erased reference to this column.
    pub fn to_ref(&self) -> ColumnRef {
        ColumnRef {
            table: self.table.clone(),
            name: self.name.clone(),
        }
    }

    pub(crate) fn bind(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }
}

/// Type-erased column reference, used where columns of different types are
/// listed together (conflict targets, RETURNING lists).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }
}

impl<T> From<&Column<T>> for ColumnRef {
    fn from(column: &Column<T>) -> Self {
        column.to_ref()
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::new(name)
    }
}

/// Type-erased column definition kept by a [`Table`](super::Table) for DDL.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
    pub flags: ColumnFlags,
    pub default: Option<ColumnDefault>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullability_follows_the_type() {
        let name = Column::new("name", ColumnType::text());
        assert!(!name.flags().nullable);
        let bio = Column::new("bio", ColumnType::text().nullable());
        assert!(bio.flags().nullable);
        assert!(name.nullable().flags().nullable);
    }

    #[test]
    fn qualified_keeps_name() {
        let id = Column::new("id", ColumnType::big_int()).bind("users");
        assert_eq!(id.table(), Some("users"));
        let aliased = id.qualified("u");
        assert_eq!(aliased.table(), Some("u"));
        assert_eq!(aliased.name(), "id");
    }

    #[test]
    fn definition_carries_flags_and_default() {
        let active = Column::new("active", ColumnType::boolean())
            .unique()
            .default_value(true);
        let def = active.definition();
        assert_eq!(def.sql_type, SqlType::Boolean);
        assert!(def.flags.unique);
        assert_eq!(def.default, Some(ColumnDefault::Literal(Value::Bool(true))));
    }
}
