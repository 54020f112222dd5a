//! Built statements.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A SQL string with positional `?` placeholders plus its bound values.
///
/// The number of placeholders in `sql` always equals `params.len()`, and the
/// i-th placeholder (left to right) binds `params[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSql {
    pub sql: String,
    pub params: Vec<Value>,
}

impl PreparedSql {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Number of bound parameters.
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// Substitute every placeholder with its literal-formatted value.
    ///
    /// For logging only. The result must never be executed: literal formatting
    /// here is ANSI-generic and not a substitute for parameter binding.
    pub fn to_debug_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + self.params.len() * 8);
        let mut params = self.params.iter();
        scan(&self.sql, |ch, outside| {
            if ch == '?' && outside {
                match params.next() {
                    Some(v) => out.push_str(&v.to_sql_literal()),
                    None => out.push(ch),
                }
            } else {
                out.push(ch);
            }
        });
        out
    }
}

impl std::fmt::Display for PreparedSql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Count `?` placeholders outside quoted literals and identifiers.
pub fn placeholder_count(sql: &str) -> usize {
    let mut n = 0;
    scan(sql, |ch, outside| {
        if ch == '?' && outside {
            n += 1;
        }
    });
    n
}

/// Walk `sql`, reporting each char and whether it sits outside any quoted
/// region (`'...'`, `"..."`, or `` `...` ``). Doubled quotes stay inside.
fn scan(sql: &str, mut f: impl FnMut(char, bool)) {
    let mut quote: Option<char> = None;
    for ch in sql.chars() {
        match quote {
            Some(q) => {
                f(ch, false);
                if ch == q {
                    quote = None;
                }
            }
            None => {
                if matches!(ch, '\'' | '"' | '`') {
                    quote = Some(ch);
                    f(ch, false);
                } else {
                    f(ch, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_unquoted_placeholders() {
        assert_eq!(placeholder_count("a = ? AND b = '?' AND \"c?\" = ?"), 2);
        assert_eq!(placeholder_count("x = 'it''s ?' OR y = ?"), 1);
        assert_eq!(placeholder_count("SELECT 1"), 0);
    }

    #[test]
    fn debug_sql_substitutes_in_order() {
        let prepared = PreparedSql::new(
            "SELECT * FROM \"t\" WHERE a = ? AND b = ? AND c = ? AND d IS ?",
            vec![
                Value::from("O'Brien"),
                Value::I32(3),
                Value::Bool(false),
                Value::Null,
            ],
        );
        assert_eq!(
            prepared.to_debug_sql(),
            "SELECT * FROM \"t\" WHERE a = 'O''Brien' AND b = 3 AND c = FALSE AND d IS NULL"
        );
    }

    #[test]
    fn debug_sql_skips_quoted_question_marks() {
        let prepared = PreparedSql::new("SELECT '?' , ?", vec![Value::I64(1)]);
        assert_eq!(prepared.to_debug_sql(), "SELECT '?' , 1");
        assert_eq!(prepared.parameter_count(), 1);
    }
}
