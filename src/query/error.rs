// Compilation Errors
//
// This module defines the errors produced while lowering a statement AST into
// a command tree, plus an aggregate for passes that report several problems.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while compiling a statement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A syntactically valid construct that has no lowering yet.
    /// `context` names the clause that triggered it.
    #[error("{context}: unsupported")]
    Unsupported { context: &'static str },

    /// The statement is well-formed but semantically inconsistent
    #[error("{context}: {message}")]
    Invalid {
        context: &'static str,
        message: String,
    },
}

impl CompileError {
    pub fn unsupported(context: &'static str) -> Self {
        CompileError::Unsupported { context }
    }

    pub fn invalid(context: &'static str, message: impl Into<String>) -> Self {
        CompileError::Invalid {
            context,
            message: message.into(),
        }
    }

    /// Whether this error reports a feature that is intentionally not implemented
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CompileError::Unsupported { .. })
    }

    /// The clause tag this error was raised for
    pub fn context(&self) -> &'static str {
        match self {
            CompileError::Unsupported { context } | CompileError::Invalid { context, .. } => *context,
        }
    }
}

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Accumulates zero or more compile errors so a pass can keep going
/// past a local failure and report everything at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiError {
    errors: Vec<CompileError>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: CompileError) {
        self.errors.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompileError> {
        self.errors.iter()
    }

    /// `Ok(())` if nothing was collected, otherwise the aggregate itself
    pub fn into_result(self) -> Result<(), MultiError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [single] => write!(f, "{}", single),
            errors => {
                write!(f, "multiple errors:")?;
                for err in errors {
                    write!(f, "\n\t{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for MultiError {}

impl From<CompileError> for MultiError {
    fn from(err: CompileError) -> Self {
        MultiError { errors: vec![err] }
    }
}

impl FromIterator<CompileError> for MultiError {
    fn from_iter<I: IntoIterator<Item = CompileError>>(iter: I) -> Self {
        MultiError {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MultiError {
    type Item = CompileError;
    type IntoIter = std::vec::IntoIter<CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
