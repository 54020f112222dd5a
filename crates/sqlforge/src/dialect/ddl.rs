//! Base rendering shared by the trait defaults and dialect overrides.

use super::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::schema::{ColumnDef, ColumnDefault, Index, Table};

pub(crate) fn quoted_list<D, I>(dialect: &D, names: I) -> String
where
    D: SqlDialect + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| dialect.quote_identifier(n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn require_on_conflict<D: SqlDialect + ?Sized>(dialect: &D) -> SqlResult<()> {
    if dialect.supports_on_conflict() {
        Ok(())
    } else {
        Err(SqlError::unsupported_by(dialect, "ON CONFLICT"))
    }
}

pub(crate) fn column_definition<D: SqlDialect + ?Sized>(
    dialect: &D,
    column: &ColumnDef,
    table: &Table,
) -> String {
    let mut parts = vec![dialect.quote_identifier(&column.name)];
    if column.flags.auto_increment {
        parts.push(dialect.auto_increment_type(&column.sql_type));
    } else {
        parts.push(dialect.sql_type_name(&column.sql_type));
    }
    if !column.flags.nullable {
        parts.push("NOT NULL".to_string());
    }
    let in_key = table.primary_key().iter().any(|k| k == &column.name);
    if column.flags.unique && !in_key {
        parts.push("UNIQUE".to_string());
    }
    match &column.default {
        Some(ColumnDefault::Literal(v)) => parts.push(format!("DEFAULT {}", dialect.literal(v))),
        Some(ColumnDefault::Expression(sql)) => parts.push(format!("DEFAULT {sql}")),
        None => {}
    }
    parts.join(" ")
}

pub(crate) fn primary_key_clause<D: SqlDialect + ?Sized>(dialect: &D, table: &Table) -> Option<String> {
    if table.primary_key().is_empty() {
        return None;
    }
    Some(format!(
        "PRIMARY KEY ({})",
        quoted_list(dialect, table.primary_key())
    ))
}

pub(crate) fn create_table<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    if_not_exists: bool,
) -> String {
    let mut defs: Vec<String> = table
        .columns()
        .iter()
        .map(|c| dialect.column_definition(c, table))
        .collect();
    if let Some(pk) = dialect.primary_key_clause(table) {
        defs.push(pk);
    }
    format!(
        "CREATE TABLE {}{} ({})",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        dialect.quote_identifier(table.name()),
        defs.join(", ")
    )
}

pub(crate) fn create_index<D: SqlDialect + ?Sized>(
    dialect: &D,
    index: &Index,
    if_not_exists: bool,
) -> String {
    format!(
        "CREATE {}INDEX {}{} ON {} ({})",
        if index.unique { "UNIQUE " } else { "" },
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        dialect.quote_identifier(&index.name),
        dialect.quote_identifier(&index.table),
        quoted_list(dialect, &index.columns)
    )
}
