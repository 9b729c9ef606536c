use thiserror::Error;

/// Errors that can occur while canonicalizing external data into [`Node`](crate::Node).
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The input was empty or contained only whitespace.
    #[error("empty document")]
    Empty,
    /// Encountered a number that cannot be represented as an IEEE-754 f64.
    #[error("number {value} cannot be represented as f64")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// YAML maps may only contain string keys.
    #[error("unsupported YAML key type: {found}")]
    NonStringYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// Tagged YAML values have no JSON counterpart.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
}

/// Errors emitted when constructing [`DiffOptions`](crate::DiffOptions).
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    /// Epsilon must be zero or positive.
    #[error("epsilon must not be negative, got {0}")]
    NegativeEpsilon(f64),
    /// Epsilon must be a finite number.
    #[error("epsilon must be finite, got {0}")]
    NonFiniteEpsilon(f64),
}

/// Errors emitted when parsing a slash-delimited pointer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointerError {
    /// Non-root pointers must start with `/`.
    #[error("pointer must start with '/': {0:?}")]
    MissingLeadingSlash(String),
    /// A `~` was not followed by `0` or `1`.
    #[error("invalid escape sequence in pointer token {0:?}")]
    InvalidEscape(String),
}

/// Errors that can occur while rendering a diff tree or patch.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Serialization to JSON failed.
    #[error("failed to serialize: {0}")]
    Json(#[from] serde_json::Error),
}
