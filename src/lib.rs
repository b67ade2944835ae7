// Bayun Database Query Compiler
//
// Lowers parsed SQL statements into relational command trees and rewrites
// them with pluggable optimizations before evaluation.

pub mod query;

// Re-export key items for convenient access
pub use query::ast::Statement;
pub use query::command::{Command, Expr, List};
pub use query::compiler::{Compiler, CompilerOptions, compile};
pub use query::error::{CompileError, CompileResult, MultiError};
pub use query::evaluator::{Evaluator, ExecuteError};
pub use query::optimizer::{HALF_JOIN_ELIMINATION, Optimization, OptimizationKind};
