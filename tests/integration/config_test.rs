use anyhow::Result;
use bayundb_compiler::query::command::Command;
use bayundb_compiler::query::optimizer::UnknownOptimization;
use bayundb_compiler::{Compiler, CompilerOptions, OptimizationKind};
use serde_json::json;

#[path = "../common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_options_from_json() -> Result<()> {
    let options: CompilerOptions = serde_json::from_value(json!({
        "optimizations": ["half-join-elimination"]
    }))?;
    assert_eq!(options.optimizations, vec![OptimizationKind::HalfJoinElimination]);

    let compiler = Compiler::new(&options);
    assert_eq!(compiler.optimizations()[0].name(), "half-join-elimination");
    Ok(())
}

#[test]
fn test_missing_fields_use_defaults() -> Result<()> {
    let options: CompilerOptions = serde_json::from_str("{}")?;
    assert_eq!(options, CompilerOptions::default());
    assert!(Compiler::new(&options).optimizations().is_empty());
    Ok(())
}

#[test]
fn test_unknown_optimization_rejected() -> Result<()> {
    let parsed = serde_json::from_value::<CompilerOptions>(json!({
        "optimizations": ["predicate-pushdown"]
    }));
    assert!(parsed.is_err());

    let err = "predicate-pushdown".parse::<OptimizationKind>().unwrap_err();
    assert_eq!(err, UnknownOptimization("predicate-pushdown".to_string()));
    assert_eq!(err.to_string(), "unknown optimization: predicate-pushdown");
    Ok(())
}

#[test]
fn test_options_serialize_by_name() -> Result<()> {
    let options = CompilerOptions::default().with_optimization(OptimizationKind::HalfJoinElimination);
    assert_eq!(
        serde_json::to_value(&options)?,
        json!({ "optimizations": ["half-join-elimination"] })
    );
    Ok(())
}

#[test]
fn test_compiled_plan_survives_json() -> Result<()> {
    let stmt = statement(select_star(join_clause("a", vec![comma("b")])).distinct());
    let command = Compiler::default().compile(&stmt)?;

    let encoded = serde_json::to_string(&command)?;
    let decoded: Command = serde_json::from_str(&encoded)?;
    assert_eq!(decoded, command);
    assert_eq!(decoded.to_string(), command.to_string());
    Ok(())
}
