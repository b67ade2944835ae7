use anyhow::{Result, anyhow};
use bayundb_compiler::query::ast::{Expr, JoinKind};
use bayundb_compiler::query::command::{Command, Join, List, Project, Select, SimpleTable, Table};
use bayundb_compiler::query::optimizer::{apply_optimizations, eliminate_half_joins};
use bayundb_compiler::{Compiler, CompilerOptions, HALF_JOIN_ELIMINATION, Optimization, OptimizationKind};

#[path = "../common/mod.rs"]
mod common;

use common::*;

// Drops every join operand that scans `table`, leaving half joins behind
fn prune_table(table: &'static str) -> Optimization {
    fn prune(list: &List, table: &str) -> Option<List> {
        match list {
            List::Scan(scan) if scan.table == Table::Simple(SimpleTable::new(table)) => None,
            List::Join(join) => Some(List::Join(Join {
                left: join.left.as_deref().and_then(|l| prune(l, table)).map(Box::new),
                right: join.right.as_deref().and_then(|r| prune(r, table)).map(Box::new),
                ..join.clone()
            })),
            List::Select(select) => Some(List::Select(Select {
                filter: select.filter.clone(),
                input: Box::new(prune(&select.input, table).unwrap_or_else(List::empty)),
            })),
            List::Project(project) => Some(List::Project(Project {
                cols: project.cols.clone(),
                input: Box::new(prune(&project.input, table).unwrap_or_else(List::empty)),
            })),
            other => Some(other.clone()),
        }
    }

    Optimization::new(format!("prune-{}", table), move |cmd: &Command| match cmd {
        Command::List(list) => (prune(list, table).map(Command::List), true),
        _ => (None, false),
    })
}

#[test]
fn test_compiled_trees_have_no_half_joins() -> Result<()> {
    let stmt = statement(select_star(join_clause(
        "a",
        vec![comma("b"), join(Some(JoinKind::Left), "c", None)],
    )));
    let plain = Compiler::default().compile(&stmt)?;
    let optimized = Compiler::new(&CompilerOptions::default().with_optimization(OptimizationKind::HalfJoinElimination))
        .compile(&stmt)?;

    assert_eq!(plain, optimized);
    assert_eq!(eliminate_half_joins(&plain), (None, false));
    Ok(())
}

#[test]
fn test_pruned_operand_is_cleaned_up() -> Result<()> {
    let on = eq(Expr::qualified_column("a", "id"), Expr::qualified_column("b", "id"));
    let stmt = statement(select_star(join_clause("a", vec![join(None, "b", Some(on))])).filter(Expr::column("x")));

    let compiler = Compiler::builder()
        .optimization(prune_table("b"))
        .optimization(HALF_JOIN_ELIMINATION.clone())
        .build();
    let command = compiler.compile(&stmt)?;
    assert_eq!(
        command.to_string(),
        "Project[cols=*](Select[filter=x](Scan[table=a]()))"
    );
    Ok(())
}

#[test]
fn test_rule_order_matters() -> Result<()> {
    let stmt = statement(select_star(join_clause("a", vec![join(None, "b", None)])));

    // elimination runs before anything is pruned, so the half join survives
    let compiler = Compiler::builder()
        .optimization(HALF_JOIN_ELIMINATION.clone())
        .optimization(prune_table("b"))
        .build();
    assert_eq!(
        compiler.compile(&stmt)?.to_string(),
        "Project[cols=*](Join[](Scan[table=a](),<absent>))"
    );
    Ok(())
}

#[test]
fn test_both_sides_pruned() -> Result<()> {
    let stmt = statement(select_star(join_clause("a", vec![join(None, "a", None)])));
    let compiler = Compiler::builder()
        .optimization(prune_table("a"))
        .optimization(HALF_JOIN_ELIMINATION.clone())
        .build();

    // a join emptied before the rule runs is not a target
    assert_eq!(
        compiler.compile(&stmt)?.to_string(),
        "Project[cols=*](Join[](<absent>,<absent>))"
    );
    Ok(())
}

#[test]
fn test_nested_empty_joins_collapse_to_no_rows() -> Result<()> {
    // (a, a) JOIN (a, a) with every scan pruned
    let inner = Join {
        left: None,
        right: None,
        ..Join::default()
    };
    let tree = Command::List(List::Project(Project {
        cols: vec![],
        input: Box::new(List::Join(Join {
            left: Some(Box::new(List::Join(inner.clone()))),
            right: Some(Box::new(List::Join(inner))),
            ..Join::default()
        })),
    }));

    let optimized = apply_optimizations(&[HALF_JOIN_ELIMINATION.clone()], tree);
    assert_eq!(optimized.to_string(), "Project[cols=](Values[values=]())");
    Ok(())
}

#[test]
fn test_explain_is_never_optimized() -> Result<()> {
    let stmt = statement(select_star(join_clause("a", vec![join(None, "b", None)]))).explained();
    let compiler = Compiler::builder()
        .optimization(prune_table("b"))
        .optimization(HALF_JOIN_ELIMINATION.clone())
        .build();

    let Command::Explain(inner) = compiler.compile(&stmt)? else {
        return Err(anyhow!("Expected Explain"));
    };
    // the rules saw the bare list, not the Explain wrapper
    assert_eq!(inner.to_string(), "Project[cols=*](Scan[table=a]())");
    Ok(())
}
