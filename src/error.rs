//! Error types for sigil.

use thiserror::Error;

/// The main error type for key parsing and join classification.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The annotated key does not follow the `name[suffix]@` grammar.
    #[error("{join_type}/.../{table}/{key}: malformed key syntax, {reason}")]
    MalformedKeySyntax {
        join_type: String,
        table: String,
        key: String,
        reason: String,
    },

    /// The canonical key is not a valid field name.
    #[error(
        "{join_type}/.../{table}/{key}: '{name}' is not a valid field name, expected [A-Za-z_][A-Za-z0-9_]*"
    )]
    InvalidIdentifier {
        join_type: String,
        table: String,
        key: String,
        name: String,
    },

    /// Join sigil outside `@ < > * & | ! ^ ( ) ~`.
    #[error("unsupported join type '{sigil}'{}, expected one of @ < > * & | ! ^ ( ) ~", location(.table, .path))]
    UnsupportedJoinType {
        sigil: String,
        table: String,
        path: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn location(table: &str, path: &str) -> String {
    match (table.is_empty(), path.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!(" for table '{}'", table),
        (true, false) => format!(" in '{}'", path),
        (false, false) => format!(" for table '{}' in '{}'", table, path),
    }
}

impl KeyError {
    /// Create a malformed key error.
    pub fn malformed(
        join_type: impl Into<String>,
        table: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedKeySyntax {
            join_type: join_type.into(),
            table: table.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported join type error with no table context yet.
    pub fn unsupported(sigil: impl Into<String>) -> Self {
        Self::UnsupportedJoinType {
            sigil: sigil.into(),
            table: String::new(),
            path: String::new(),
        }
    }

    /// Attach the table and path an [`KeyError::UnsupportedJoinType`] was raised for.
    /// Other variants are returned as is.
    pub fn at(self, table: &str, path: &str) -> Self {
        match self {
            Self::UnsupportedJoinType { sigil, .. } => Self::UnsupportedJoinType {
                sigil,
                table: table.to_string(),
                path: path.to_string(),
            },
            other => other,
        }
    }
}

/// Result type alias for sigil operations.
pub type KeyResult<T> = Result<T, KeyError>;
