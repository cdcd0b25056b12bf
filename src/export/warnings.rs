//! Warnings accumulated while resolving the genes of an export.

/// An ordered list of warning messages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    /// Records a warning.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Gets an iterator over the warnings, in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Gets the number of warnings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no warnings were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes self and returns the warnings.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
