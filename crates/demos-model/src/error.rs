//! Parse errors for the closed vocabularies

/// A string did not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    /// Enumeration that rejected the value
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseEnumError {
    /// Create new parse error
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
