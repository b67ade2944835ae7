// BayunDB Query Compilation Module
//
// This module contains the statement AST, the command tree it lowers to,
// the compiler and the optimizations that rewrite compiled trees.

pub mod ast;
pub mod command;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod optimizer;

// Export key public interfaces
pub use command::{Command, List};
pub use compiler::{Compiler, CompilerBuilder, CompilerOptions, compile};
pub use error::{CompileError, CompileResult, MultiError};
pub use evaluator::{Evaluator, ExecuteError};
pub use optimizer::{HALF_JOIN_ELIMINATION, Optimization, OptimizationKind};
