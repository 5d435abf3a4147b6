use std::fmt;

/// Convenience result type used across the crate.
pub type StyleResult<T> = Result<T, StyleError>;

/// Top-level error taxonomy used by the public APIs.
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    /// The expression failed to parse or type-check.
    #[error("parse error: {0}")]
    Parse(ParseErrors),

    /// A compiled expression failed while being evaluated.
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvalError),

    /// A style function is structurally unusable (for example, ambiguous zoom curves).
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors when deserializing property specs or definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StyleError {
    /// Build a [`StyleError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StyleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<ParseErrors> for StyleError {
    fn from(errors: ParseErrors) -> Self {
        Self::Parse(errors)
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

/// One parse-time diagnostic, located by the dotted key of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParseError {
    /// Dotted path of argument indices from the root expression (empty for the root).
    pub key: String,
    /// Human readable description.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// All diagnostics collected by one compile attempt.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ParseErrors {
    /// Diagnostics in the order they were reported.
    pub errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Iterate the individual diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// True when any diagnostic message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.message.contains(needle))
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// Runtime failure raised while evaluating a compiled expression.
///
/// Serializes to its bare message, which is the form reported next to fixture outputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EvalError {
    /// Description of what went wrong.
    pub message: String,
}

impl EvalError {
    /// Build an evaluation error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// JSON form of the error, `{"error": message}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message })
    }
}

impl serde::Serialize for EvalError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.message)
    }
}

/// Result of evaluating an expression.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
