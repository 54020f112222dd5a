use serde::{Deserialize, Serialize};

/// Feature flags of a dialect.
///
/// Plain data: presets cover the bundled dialects, and a set deserialized from
/// configuration can drive a [`GenericDialect`](super::GenericDialect).
///
/// ```ignore
/// let caps = DialectCapabilities::ansi()
///     .with_returning(true)
///     .with_max_insert_batch_size(Some(1000));
/// let dialect = GenericDialect::new("warehouse", caps);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectCapabilities {
    pub supports_returning: bool,
    pub supports_on_conflict: bool,
    pub supports_ilike: bool,
    pub supports_cte: bool,
    pub supports_window_functions: bool,
    pub supports_limit_offset: bool,
    pub supports_boolean_type: bool,
    pub supports_multi_row_insert: bool,
    pub supports_for_update: bool,
    /// Upper bound on rows per multi-row INSERT; `None` means unbounded.
    pub max_insert_batch_size: Option<usize>,
}

impl Default for DialectCapabilities {
    fn default() -> Self {
        Self::ansi()
    }
}

impl DialectCapabilities {
    /// Conservative baseline: no RETURNING, no upsert, no ILIKE.
    pub const fn ansi() -> Self {
        Self {
            supports_returning: false,
            supports_on_conflict: false,
            supports_ilike: false,
            supports_cte: true,
            supports_window_functions: true,
            supports_limit_offset: true,
            supports_boolean_type: true,
            supports_multi_row_insert: true,
            supports_for_update: true,
            max_insert_batch_size: None,
        }
    }

    pub const fn postgres() -> Self {
        Self {
            supports_returning: true,
            supports_on_conflict: true,
            supports_ilike: true,
            ..Self::ansi()
        }
    }

    pub const fn mysql() -> Self {
        Self {
            supports_on_conflict: true,
            supports_boolean_type: false,
            ..Self::ansi()
        }
    }

    pub const fn sqlite() -> Self {
        Self {
            supports_returning: true,
            supports_on_conflict: true,
            supports_boolean_type: false,
            supports_for_update: false,
            max_insert_batch_size: Some(500),
            ..Self::ansi()
        }
    }

    pub fn with_returning(mut self, on: bool) -> Self {
        self.supports_returning = on;
        self
    }

    pub fn with_on_conflict(mut self, on: bool) -> Self {
        self.supports_on_conflict = on;
        self
    }

    pub fn with_ilike(mut self, on: bool) -> Self {
        self.supports_ilike = on;
        self
    }

    pub fn with_cte(mut self, on: bool) -> Self {
        self.supports_cte = on;
        self
    }

    pub fn with_window_functions(mut self, on: bool) -> Self {
        self.supports_window_functions = on;
        self
    }

    pub fn with_limit_offset(mut self, on: bool) -> Self {
        self.supports_limit_offset = on;
        self
    }

    pub fn with_boolean_type(mut self, on: bool) -> Self {
        self.supports_boolean_type = on;
        self
    }

    pub fn with_multi_row_insert(mut self, on: bool) -> Self {
        self.supports_multi_row_insert = on;
        self
    }

    pub fn with_for_update(mut self, on: bool) -> Self {
        self.supports_for_update = on;
        self
    }

    pub fn with_max_insert_batch_size(mut self, max: Option<usize>) -> Self {
        self.max_insert_batch_size = max;
        self
    }
}
