//! Clause state shared by several builders.
//!
//! Each builder embeds these by value and exposes fluent methods that delegate
//! here (see the `where_methods!` / `returning_methods!` macros).

use crate::dialect::SqlDialect;
use crate::expr::{Expr, Predicate};
use crate::param::ParamList;
use crate::schema::ColumnRef;

/// Optional WHERE predicate.
#[derive(Debug, Clone, Default)]
pub struct WhereClause {
    predicate: Option<Predicate>,
}

impl WhereClause {
    /// Replace the predicate.
    pub fn set(&mut self, predicate: Predicate) {
        self.predicate = Some(predicate);
    }

    /// `(existing) AND (predicate)`, or assign when empty.
    pub fn and(&mut self, predicate: Predicate) {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
    }

    /// `(existing) OR (predicate)`, or assign when empty.
    pub fn or(&mut self, predicate: Predicate) {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.or(predicate),
            None => predicate,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.predicate.is_none()
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// The condition without its keyword, if any.
    pub(crate) fn render(&self, dialect: &dyn SqlDialect, params: &mut ParamList) -> Option<String> {
        self.predicate
            .as_ref()
            .map(|p| p.as_expr().render(dialect, params))
    }
}

/// Columns requested back from a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturningColumns {
    All,
    Columns(Vec<String>),
}

/// Optional RETURNING request. Rendered only when the dialect supports it.
#[derive(Debug, Clone, Default)]
pub struct ReturningClause {
    columns: Option<ReturningColumns>,
}

impl ReturningClause {
    pub fn all(&mut self) {
        self.columns = Some(ReturningColumns::All);
    }

    pub fn add(&mut self, columns: impl IntoIterator<Item = ColumnRef>) {
        let names = columns.into_iter().map(|c| c.name);
        match &mut self.columns {
            Some(ReturningColumns::Columns(existing)) => existing.extend(names),
            _ => self.columns = Some(ReturningColumns::Columns(names.collect())),
        }
    }

    pub(crate) fn render(&self, dialect: &dyn SqlDialect) -> Option<String> {
        let clause = dialect.returning_clause(self.columns.as_ref()?);
        (!clause.is_empty()).then_some(clause)
    }
}

/// Ordered column assignments. Setting a column twice replaces its value in
/// place, keeping the first position.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    items: Vec<(String, Expr)>,
}

impl Assignments {
    pub fn set(&mut self, column: impl Into<String>, value: Expr) {
        let column = column.into();
        match self.items.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.items.push((column, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(c, _)| c.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&Expr> {
        self.items.iter().find(|(c, _)| c == column).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.items.iter().map(|(c, e)| (c.as_str(), e))
    }
}

/// Fluent WHERE methods delegating to a `WhereClause` field.
macro_rules! where_methods {
    ($field:ident) => {
        /// Set the WHERE predicate, replacing any existing one.
        pub fn where_(mut self, predicate: impl Into<$crate::expr::Predicate>) -> Self {
            self.$field.set(predicate.into());
            self
        }

        /// AND a predicate onto the WHERE clause.
        pub fn and_where(mut self, predicate: impl Into<$crate::expr::Predicate>) -> Self {
            self.$field.and(predicate.into());
            self
        }

        /// OR a predicate onto the WHERE clause.
        pub fn or_where(mut self, predicate: impl Into<$crate::expr::Predicate>) -> Self {
            self.$field.or(predicate.into());
            self
        }

        /// AND a predicate built from `value`, only when it is `Some`.
        pub fn where_if_some<V>(
            mut self,
            value: Option<V>,
            predicate: impl FnOnce(V) -> $crate::expr::Predicate,
        ) -> Self {
            if let Some(v) = value {
                self.$field.and(predicate(v));
            }
            self
        }
    };
}

/// Fluent RETURNING methods delegating to a `ReturningClause` field.
macro_rules! returning_methods {
    ($field:ident) => {
        /// Request columns back. Ignored by dialects without RETURNING.
        pub fn returning<I, C>(mut self, columns: I) -> Self
        where
            I: IntoIterator<Item = C>,
            C: Into<$crate::schema::ColumnRef>,
        {
            self.$field.add(columns.into_iter().map(Into::into));
            self
        }

        /// `RETURNING *`. Ignored by dialects without RETURNING.
        pub fn returning_all(mut self) -> Self {
            self.$field.all();
            self
        }
    };
}

pub(crate) use returning_methods;
pub(crate) use where_methods;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, PostgresDialect};

    #[test]
    fn and_or_assign_when_empty() {
        let mut w = WhereClause::default();
        w.or(Predicate::raw("a"));
        let mut params = ParamList::new();
        assert_eq!(
            w.render(&PostgresDialect::new(), &mut params).as_deref(),
            Some("a")
        );
        w.and(Predicate::raw("b"));
        w.or(Predicate::raw("c"));
        assert_eq!(
            w.render(&PostgresDialect::new(), &mut params).as_deref(),
            Some("((a) AND (b)) OR (c)")
        );
    }

    #[test]
    fn assignments_replace_in_place() {
        let mut a = Assignments::default();
        a.set("x", Expr::Null);
        a.set("y", Expr::Null);
        a.set("x", Expr::raw("1"));
        assert_eq!(a.columns().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(matches!(a.get("x"), Some(Expr::Raw(s)) if s == "1"));
    }

    #[test]
    fn returning_renders_only_when_supported() {
        let mut r = ReturningClause::default();
        assert_eq!(r.render(&PostgresDialect::new()), None);
        r.add([ColumnRef::new("id")]);
        r.add([ColumnRef::new("email")]);
        assert_eq!(
            r.render(&PostgresDialect::new()).as_deref(),
            Some("RETURNING \"id\", \"email\"")
        );
        assert_eq!(r.render(&MySqlDialect::new()), None);
    }
}
