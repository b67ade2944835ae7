// Query Optimizer Implementation
//
// Optimizations are pure rewrites of a command tree. Each one is applied once,
// in registration order, to the root of a freshly compiled tree. A rule that
// wants a transitive effect recurses on its own.

pub mod half_join;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::command::Command;

pub use self::half_join::eliminate_half_joins;

/// Signature shared by every optimization: a replacement tree and `true`,
/// or `(None, false)` when the rule does not apply.
pub type OptimizationFn = dyn Fn(&Command) -> (Option<Command>, bool) + Send + Sync;

/// A named optimization rule
#[derive(Clone)]
pub struct Optimization {
    name: Cow<'static, str>,
    rule: Arc<OptimizationFn>,
}

impl Optimization {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, rule: F) -> Self
    where
        F: Fn(&Command) -> (Option<Command>, bool) + Send + Sync + 'static,
    {
        Optimization {
            name: name.into(),
            rule: Arc::new(rule),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the rule against `command`; the input is never modified
    pub fn apply(&self, command: &Command) -> (Option<Command>, bool) {
        (self.rule)(command)
    }
}

impl fmt::Debug for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimization").field("name", &self.name).finish()
    }
}

/// The built-in half-join elimination rule
pub static HALF_JOIN_ELIMINATION: Lazy<Optimization> = Lazy::new(|| {
    Optimization::new(OptimizationKind::HalfJoinElimination.name(), eliminate_half_joins)
});

/// Optimizations that can be enabled by name in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationKind {
    HalfJoinElimination,
}

impl OptimizationKind {
    pub const ALL: &'static [OptimizationKind] = &[OptimizationKind::HalfJoinElimination];

    pub fn name(&self) -> &'static str {
        match self {
            OptimizationKind::HalfJoinElimination => "half-join-elimination",
        }
    }

    pub fn optimization(&self) -> Optimization {
        match self {
            OptimizationKind::HalfJoinElimination => HALF_JOIN_ELIMINATION.clone(),
        }
    }
}

impl fmt::Display for OptimizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown optimization: {0}")]
pub struct UnknownOptimization(pub String);

impl FromStr for OptimizationKind {
    type Err = UnknownOptimization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptimizationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownOptimization(s.to_string()))
    }
}

/// Apply each optimization once, in order, substituting a rewrite only when
/// the rule reports it applied.
pub fn apply_optimizations(optimizations: &[Optimization], command: Command) -> Command {
    let mut current = command;

    for optimization in optimizations {
        match optimization.apply(&current) {
            (Some(rewritten), true) => {
                debug!("Optimization '{}' applied", optimization.name());
                trace!("before: {}", current);
                trace!("after: {}", rewritten);
                current = rewritten;
            }
            (None, true) => {
                // the root of a command tree cannot vanish
                warn!(
                    "Optimization '{}' removed the whole tree, keeping the previous one",
                    optimization.name()
                );
            }
            (_, false) => {
                trace!("Optimization '{}' not applicable", optimization.name());
            }
        }
    }

    current
}
