// Statement Compiler Module
//
// This module lowers statement ASTs into command trees and runs the
// registered optimizations over the result. Lowering fails fast: the first
// unsupported or invalid construct aborts the statement.

pub mod expression;
pub mod select;
pub mod statement;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::query::ast::Statement;
use crate::query::command::Command;
use crate::query::error::{CompileResult, MultiError};
use crate::query::evaluator::{Evaluator, ExecuteError};
use crate::query::optimizer::{Optimization, OptimizationKind, apply_optimizations};

pub use self::expression::compile_expr;
pub use self::select::{compile_from, compile_select};
pub use self::statement::compile_statement;

/// Compiler configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Optimizations to run, in order
    pub optimizations: Vec<OptimizationKind>,
}

impl CompilerOptions {
    pub fn with_optimization(mut self, kind: OptimizationKind) -> Self {
        self.optimizations.push(kind);
        self
    }
}

/// Compiles statements into command trees.
///
/// A compiler holds no mutable state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    optimizations: Vec<Optimization>,
}

impl Compiler {
    pub fn new(options: &CompilerOptions) -> Self {
        Compiler {
            optimizations: options.optimizations.iter().map(|kind| kind.optimization()).collect(),
        }
    }

    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::default()
    }

    pub fn optimizations(&self) -> &[Optimization] {
        &self.optimizations
    }

    /// Compile a single statement.
    ///
    /// The EXPLAIN wrapper is added after optimizations run, so it is never
    /// itself rewritten.
    pub fn compile(&self, stmt: &Statement) -> CompileResult<Command> {
        let lowered = compile_statement(&stmt.kind)?;
        let optimized = apply_optimizations(&self.optimizations, lowered);

        let command = match stmt.explain {
            Some(_) => Command::Explain(Box::new(optimized)),
            None => optimized,
        };
        debug!("Compiled statement: {}", command);
        Ok(command)
    }

    /// Compile every statement of a script, reporting all failures together
    pub fn compile_batch(&self, stmts: &[Statement]) -> Result<Vec<Command>, MultiError> {
        let mut commands = Vec::with_capacity(stmts.len());
        let mut errors = MultiError::new();

        for stmt in stmts {
            match self.compile(stmt) {
                Ok(command) => commands.push(command),
                Err(e) => errors.push(e),
            }
        }

        errors.into_result().map(|_| commands)
    }

    /// Compile a statement and hand the tree to an evaluator
    pub fn execute<E: Evaluator>(
        &self,
        stmt: &Statement,
        evaluator: &E,
    ) -> Result<E::Output, ExecuteError<E::Error>> {
        let command = self.compile(stmt)?;
        evaluator.evaluate(command).map_err(ExecuteError::Evaluate)
    }
}

impl From<&CompilerOptions> for Compiler {
    fn from(options: &CompilerOptions) -> Self {
        Compiler::new(options)
    }
}

/// Registers optimizations, in order, for a new compiler
#[derive(Debug, Default)]
pub struct CompilerBuilder {
    optimizations: Vec<Optimization>,
}

impl CompilerBuilder {
    pub fn optimization(mut self, optimization: Optimization) -> Self {
        self.optimizations.push(optimization);
        self
    }

    /// Append the optimizations named by `options`
    pub fn options(mut self, options: &CompilerOptions) -> Self {
        self.optimizations
            .extend(options.optimizations.iter().map(|kind| kind.optimization()));
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            optimizations: self.optimizations,
        }
    }
}

/// Compile one statement with a throwaway compiler
pub fn compile(stmt: &Statement, options: &CompilerOptions) -> CompileResult<Command> {
    Compiler::new(options).compile(stmt)
}
