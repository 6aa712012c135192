//! Template error types

use std::fmt;

/// Template rendering errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Variable referenced by a predicate or placeholder is missing from the context
    UndefinedVariable {
        /// The dotted key that was not found
        key: String,
        /// Line number of the first reference
        line: usize,
    },

    /// Unbalanced markers, unknown tags or unparsable predicates
    MalformedTemplate {
        /// Error message
        message: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// Array or table used where a scalar is required
    NonScalarValue {
        /// The key that resolved to a non-scalar value
        key: String,
        /// Line number of the reference
        line: usize,
    },
}

impl TemplateError {
    pub(crate) fn malformed(message: impl Into<String>, line: usize) -> Self {
        TemplateError::MalformedTemplate {
            message: message.into(),
            line,
        }
    }

    /// Line number the error points at
    pub fn line(&self) -> usize {
        match self {
            TemplateError::UndefinedVariable { line, .. }
            | TemplateError::MalformedTemplate { line, .. }
            | TemplateError::NonScalarValue { line, .. } => *line,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { key, line } => {
                write!(f, "Undefined variable '{}' at line {}", key, line)
            }
            TemplateError::MalformedTemplate { message, line } => {
                write!(f, "Malformed template at line {}: {}", line, message)
            }
            TemplateError::NonScalarValue { key, line } => {
                write!(
                    f,
                    "Variable '{}' at line {} is an array or table. Use nested keys like {}.field",
                    key, line, key
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}
