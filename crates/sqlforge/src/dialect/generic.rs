use super::{DialectCapabilities, SqlDialect};

/// A dialect driven entirely by its capability flags, using base rendering
/// for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericDialect {
    name: String,
    capabilities: DialectCapabilities,
}

impl GenericDialect {
    pub fn new(name: impl Into<String>, capabilities: DialectCapabilities) -> Self {
        Self {
            name: name.into(),
            capabilities,
        }
    }

    /// The ANSI baseline under the name `"ansi"`.
    pub fn ansi() -> Self {
        Self::new("ansi", DialectCapabilities::ansi())
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::ansi()
    }
}

impl SqlDialect for GenericDialect {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }
}
