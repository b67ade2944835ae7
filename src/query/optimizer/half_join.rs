// Half-Join Elimination
//
// Removes joins that lost one or both operands, replacing a join with its
// surviving side or dropping it when nothing survives. Recurses through
// Select, Project and Limit.
//
// A join whose operands both survive is rebuilt from `left` and `right` only:
// its kind, NATURAL flag and ON filter are not carried over.

use log::trace;

use crate::query::command::{Command, Join, Limit, List, Project, Select};

/// Optimization entry point; only row-producing commands are candidates
pub fn eliminate_half_joins(command: &Command) -> (Option<Command>, bool) {
    match command {
        Command::List(list) => {
            let (optimized, applied) = optimize(list);
            (optimized.map(Command::List), applied)
        }
        _ => (None, false),
    }
}

/// Rewrite `list`, returning `(None, false)` when nothing changed.
/// `(None, true)` means the whole subtree vanished.
pub fn optimize(list: &List) -> (Option<List>, bool) {
    match list {
        List::Select(select) => rebuild(&select.input, |input| {
            List::Select(Select {
                filter: select.filter.clone(),
                input,
            })
        }),
        List::Project(project) => rebuild(&project.input, |input| {
            List::Project(Project {
                cols: project.cols.clone(),
                input,
            })
        }),
        List::Limit(limit) => rebuild(&limit.input, |input| {
            List::Limit(Limit {
                limit: limit.limit.clone(),
                input,
            })
        }),
        List::Join(join) => optimize_join(join),
        _ => (None, false),
    }
}

/// Optimize a wrapper's input and rebuild the same wrapper around the result.
/// An input that vanished entirely is replaced by an empty row source.
fn rebuild<F>(input: &List, wrap: F) -> (Option<List>, bool)
where
    F: FnOnce(Box<List>) -> List,
{
    match optimize(input) {
        (optimized, true) => {
            let input = optimized.unwrap_or_else(List::empty);
            (Some(wrap(Box::new(input))), true)
        }
        (_, false) => (None, false),
    }
}

fn optimize_join(join: &Join) -> (Option<List>, bool) {
    if join.is_empty() {
        return (None, false);
    }

    let (left, left_applied) = optimize_operand(join.left.as_deref());
    let (right, right_applied) = optimize_operand(join.right.as_deref());

    match (left, right) {
        (None, None) => {
            trace!("join lost both operands");
            (None, true)
        }
        (Some(survivor), None) | (None, Some(survivor)) => {
            trace!("replacing half join with {}", survivor);
            (Some(survivor), true)
        }
        (Some(left), Some(right)) => {
            let rebuilt = Join {
                left: Some(Box::new(left)),
                right: Some(Box::new(right)),
                ..Join::default()
            };
            (Some(List::Join(rebuilt)), left_applied || right_applied)
        }
    }
}

/// The operand that remains after optimizing one side of a join.
/// A join with no operands of its own contributes nothing.
fn optimize_operand(operand: Option<&List>) -> (Option<List>, bool) {
    match operand {
        None => (None, false),
        Some(List::Join(join)) if join.is_empty() => (None, false),
        Some(list) => match optimize(list) {
            (optimized, true) => (optimized, true),
            (_, false) => (Some(list.clone()), false),
        },
    }
}
