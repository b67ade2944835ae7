// Statement Lowering
//
// Dispatches on the statement kind and lowers DML and DROP statements.
// DELETE and UPDATE always carry a concrete filter.

use super::expression::compile_expr;
use super::select::{compile_select, compile_table_name, compile_values};
use crate::query::ast::{self, StatementKind};
use crate::query::command::{
    Command, ConflictAction, Delete, DropObject, Expr, Insert, List, SimpleTable, Table, Update, UpdateSetter,
};
use crate::query::error::{CompileError, CompileResult};

/// Lower one statement, without EXPLAIN handling or optimizations
pub fn compile_statement(kind: &StatementKind) -> CompileResult<Command> {
    match kind {
        StatementKind::Select(select) => compile_select(select).map(Command::List),
        StatementKind::Insert(insert) => compile_insert(insert).map(Command::Insert),
        StatementKind::Update(update) => compile_update(update).map(Command::Update),
        StatementKind::Delete(delete) => compile_delete(delete).map(Command::Delete),
        StatementKind::DropTable(drop) => Ok(Command::DropTable(compile_drop(drop))),
        StatementKind::DropIndex(drop) => Ok(Command::DropIndex(compile_drop(drop))),
        StatementKind::DropTrigger(drop) => Ok(Command::DropTrigger(compile_drop(drop))),
        StatementKind::DropView(drop) => Ok(Command::DropView(compile_drop(drop))),
        StatementKind::Create(create) => Err(CompileError::unsupported(create_tag(create.kind))),
        StatementKind::AlterTable(_) => Err(CompileError::unsupported("alter table")),
        StatementKind::Transaction(_) => Err(CompileError::unsupported("transaction")),
        StatementKind::Vacuum { .. } => Err(CompileError::unsupported("vacuum")),
        StatementKind::Analyze { .. } => Err(CompileError::unsupported("analyze")),
        StatementKind::Pragma { .. } => Err(CompileError::unsupported("pragma")),
    }
}

fn create_tag(kind: ast::CreateKind) -> &'static str {
    match kind {
        ast::CreateKind::Table => "create table",
        ast::CreateKind::VirtualTable => "create virtual table",
        ast::CreateKind::Index => "create index",
        ast::CreateKind::Trigger => "create trigger",
        ast::CreateKind::View => "create view",
    }
}

fn conflict_action(or: Option<ast::ConflictResolution>) -> ConflictAction {
    match or {
        None | Some(ast::ConflictResolution::Abort) => ConflictAction::Abort,
        Some(ast::ConflictResolution::Replace) => ConflictAction::Replace,
        Some(ast::ConflictResolution::Rollback) => ConflictAction::Rollback,
        Some(ast::ConflictResolution::Fail) => ConflictAction::Fail,
        Some(ast::ConflictResolution::Ignore) => ConflictAction::Ignore,
    }
}

/// A missing WHERE means every row
fn filter_or_all(predicate: Option<&ast::Expr>) -> CompileResult<Expr> {
    match predicate {
        Some(predicate) => compile_expr(predicate),
        None => Ok(Expr::boolean(true)),
    }
}

fn compile_insert(stmt: &ast::InsertStatement) -> CompileResult<Insert> {
    if stmt.with.is_some() {
        return Err(CompileError::unsupported("with"));
    }
    if stmt.upsert.is_some() {
        return Err(CompileError::unsupported("upsert"));
    }

    let input = match &stmt.source {
        ast::InsertSource::DefaultValues => None,
        ast::InsertSource::Values(rows) => {
            let values = compile_values(rows)?;
            if let Some(row) = values.rows.first() {
                if !stmt.columns.is_empty() && row.len() != stmt.columns.len() {
                    return Err(CompileError::invalid(
                        "insert",
                        format!("{} values for {} columns", row.len(), stmt.columns.len()),
                    ));
                }
            }
            Some(Box::new(List::Values(values)))
        }
        ast::InsertSource::Select(select) => Some(Box::new(compile_select(select)?)),
    };

    Ok(Insert {
        insert_or: conflict_action(stmt.or),
        table: Table::Simple(SimpleTable {
            schema: stmt.table.schema.clone(),
            alias: stmt.alias.clone(),
            ..SimpleTable::new(stmt.table.name.clone())
        }),
        cols: stmt.columns.clone(),
        input,
    })
}

fn compile_update(stmt: &ast::UpdateStatement) -> CompileResult<Update> {
    if stmt.with.is_some() {
        return Err(CompileError::unsupported("with"));
    }

    let updates = stmt
        .set
        .iter()
        .map(|setter| -> CompileResult<UpdateSetter> {
            Ok(UpdateSetter {
                cols: setter.columns.clone(),
                value: compile_expr(&setter.value)?,
            })
        })
        .collect::<CompileResult<Vec<_>>>()?;

    Ok(Update {
        update_or: conflict_action(stmt.or),
        table: compile_table_name(&stmt.table),
        updates,
        filter: filter_or_all(stmt.where_clause.as_ref())?,
    })
}

fn compile_delete(stmt: &ast::DeleteStatement) -> CompileResult<Delete> {
    if stmt.with.is_some() {
        return Err(CompileError::unsupported("with"));
    }

    Ok(Delete {
        table: compile_table_name(&stmt.table),
        filter: filter_or_all(stmt.where_clause.as_ref())?,
    })
}

fn compile_drop(stmt: &ast::DropStatement) -> DropObject {
    DropObject {
        if_exists: stmt.if_exists,
        schema: stmt.name.schema.clone(),
        name: stmt.name.name.clone(),
    }
}
