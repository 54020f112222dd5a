use super::column::{Column, ColumnDef};
use super::types::ColumnValue;
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use std::collections::HashSet;

/// Table metadata: name, ordered columns, primary key and indexes.
///
/// Immutable once built; query builders only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<ColumnDef>,
    primary_key: Vec<String>,
    indexes: Vec<Index>,
}

impl Table {
    /// Start defining a table.
    ///
    /// ```ignore
    /// let mut t = Table::builder("users");
    /// let id = t.add(Column::new("id", ColumnType::big_int()).primary_key());
    /// let name = t.add(Column::new("name", ColumnType::varchar(100)));
    /// let users = t.build()?;
    /// ```
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            name: name.into(),
            columns: Vec::new(),
            composite_key: None,
            indexes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in definition order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key column names; empty when the table has none.
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn has_composite_key(&self) -> bool {
        self.primary_key.len() > 1
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// `CREATE TABLE` for this table in the given dialect.
    pub fn create_sql(&self, dialect: &dyn SqlDialect, if_not_exists: bool) -> String {
        dialect.create_table_statement(self, if_not_exists)
    }

    /// `DROP TABLE` for this table in the given dialect.
    pub fn drop_sql(&self, dialect: &dyn SqlDialect, if_exists: bool) -> String {
        dialect.drop_table_statement(&self.name, if_exists)
    }
}

/// Accumulates column definitions for a [`Table`].
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    columns: Vec<ColumnDef>,
    composite_key: Option<Vec<String>>,
    indexes: Vec<Index>,
}

impl TableBuilder {
    /// Add a column and return it bound to this table.
    pub fn add<T: ColumnValue>(&mut self, column: Column<T>) -> Column<T> {
        let column = column.bind(&self.name);
        self.columns.push(column.definition());
        column
    }

    /// Declare a (possibly composite) primary key by column name.
    pub fn primary_key<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composite_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Declare an index over the named columns.
    pub fn index<I, S>(&mut self, name: impl Into<String>, columns: I, unique: bool) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexes.push(Index {
            name: name.into(),
            table: self.name.clone(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique,
        });
        self
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> SqlResult<Table> {
        if self.name.trim().is_empty() {
            return Err(SqlError::schema("table name must not be empty"));
        }

        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(SqlError::schema(format!(
                    "duplicate column '{}' in table '{}'",
                    col.name, self.name
                )));
            }
        }

        let flagged: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.flags.primary_key)
            .map(|c| c.name.clone())
            .collect();

        let primary_key = match self.composite_key {
            Some(_) if !flagged.is_empty() => {
                return Err(SqlError::schema(format!(
                    "table '{}' declares its primary key both on columns and at table level",
                    self.name
                )));
            }
            Some(key) => {
                if key.is_empty() {
                    return Err(SqlError::schema("primary key must name at least one column"));
                }
                key
            }
            None => flagged,
        };

        for name in &primary_key {
            if !seen.contains(name.as_str()) {
                return Err(SqlError::schema(format!(
                    "primary key column '{}' not found in table '{}'",
                    name, self.name
                )));
            }
        }

        for index in &self.indexes {
            if index.columns.is_empty() {
                return Err(SqlError::schema(format!(
                    "index '{}' has no columns",
                    index.name
                )));
            }
            if let Some(missing) = index.columns.iter().find(|c| !seen.contains(c.as_str())) {
                return Err(SqlError::schema(format!(
                    "index '{}' references unknown column '{}'",
                    index.name, missing
                )));
            }
        }

        Ok(Table {
            name: self.name,
            columns: self.columns,
            primary_key,
            indexes: self.indexes,
        })
    }
}

/// A secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    #[test]
    fn builder_binds_columns_to_table() {
        let mut t = Table::builder("users");
        let id = t.add(Column::new("id", ColumnType::big_int()).primary_key());
        let email = t.add(Column::new("email", ColumnType::varchar(255)).unique());
        let users = t.build().unwrap();

        assert_eq!(id.table(), Some("users"));
        assert_eq!(email.name(), "email");
        assert_eq!(users.primary_key(), &["id".to_string()]);
        assert_eq!(users.columns().len(), 2);
        assert!(users.column("email").is_some_and(|c| c.flags.unique));
    }

    #[test]
    fn composite_primary_key() {
        let mut t = Table::builder("memberships");
        t.add(Column::new("user_id", ColumnType::big_int()));
        t.add(Column::new("group_id", ColumnType::big_int()));
        t.primary_key(["user_id", "group_id"]);
        let table = t.build().unwrap();
        assert!(table.has_composite_key());
    }

    #[test]
    fn duplicate_column_rejected() {
        let mut t = Table::builder("t");
        t.add(Column::new("a", ColumnType::integer()));
        t.add(Column::new("a", ColumnType::text()));
        let err = t.build().unwrap_err();
        assert!(matches!(err, SqlError::Schema(msg) if msg.contains("duplicate column 'a'")));
    }

    #[test]
    fn unknown_key_and_index_columns_rejected() {
        let mut t = Table::builder("t");
        t.add(Column::new("a", ColumnType::integer()));
        t.primary_key(["b"]);
        assert!(t.build().is_err());

        let mut t = Table::builder("t");
        t.add(Column::new("a", ColumnType::integer()));
        t.index("idx_t_c", ["c"], false);
        assert!(t.build().is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(Table::builder(" ").build().is_err());
    }
}
