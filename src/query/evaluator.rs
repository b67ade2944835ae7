// Evaluator Boundary
//
// The compiler's output is consumed by an evaluator that executes command
// trees. This module only defines the seam; no evaluator ships with the crate.

use thiserror::Error;

use crate::query::command::Command;
use crate::query::error::CompileError;

/// Executes compiled command trees
pub trait Evaluator {
    type Output;
    type Error;

    fn evaluate(&self, command: Command) -> Result<Self::Output, Self::Error>;
}

/// Failure of a compile-then-evaluate round trip
#[derive(Error, Debug)]
pub enum ExecuteError<E> {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("evaluation error: {0}")]
    Evaluate(E),
}

impl<E> ExecuteError<E> {
    /// Whether the statement never reached the evaluator
    pub fn is_compile_error(&self) -> bool {
        matches!(self, ExecuteError::Compile(_))
    }
}
