//! The shared, ordered parameter sink.

use crate::value::Value;

/// Ordered collection of bound values collected during a render pass.
///
/// One list is threaded mutably through the whole walk of a statement. A node
/// that writes a `?` into its fragment pushes the matching value at the same
/// moment, which keeps placeholder order and parameter order identical.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    values: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Add a parameter and return its 1-based position.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.values.push(value.into());
        self.values.len()
    }

    /// Push a value and return the placeholder that binds it.
    pub fn bind(&mut self, value: impl Into<Value>) -> &'static str {
        self.push(value);
        "?"
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the collected values.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Extend this list with values from an iterator.
    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.values.extend(values);
    }

    /// Consume the list, yielding the values in bind order.
    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}
