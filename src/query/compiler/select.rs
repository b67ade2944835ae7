// SELECT Lowering
//
// Lowers SELECT statements, their FROM clauses and joins into `List`
// operators. Wrappers are added only for clauses that are present:
//
//   Limit(Offset(Distinct(Project(Select(<from>)))))

use log::trace;

use super::expression::{compile_expr, compile_exprs};
use crate::query::ast;
use crate::query::command::{
    Column, Distinct, Expr, Join, JoinType, Limit, List, Offset, Project, Select, SimpleTable, Table, Values,
};
use crate::query::error::{CompileError, CompileResult};

/// Build the row source for a SELECT statement
pub fn compile_select(stmt: &ast::SelectStatement) -> CompileResult<List> {
    if stmt.with.is_some() {
        return Err(CompileError::unsupported("with"));
    }
    if !stmt.compound.is_empty() {
        return Err(CompileError::unsupported("compound select"));
    }

    let mut list = compile_select_core(&stmt.core)?;

    if stmt.order_by.is_some() {
        return Err(CompileError::unsupported("order"));
    }

    if let Some(limit) = &stmt.limit {
        let bound = compile_expr(&limit.limit)?;
        // skip first, then bound what is left
        if let Some(offset) = &limit.offset {
            list = List::Offset(Offset {
                offset: compile_expr(offset)?,
                input: Box::new(list),
            });
        }
        list = List::Limit(Limit {
            limit: bound,
            input: Box::new(list),
        });
    }

    Ok(list)
}

fn compile_select_core(core: &ast::SelectCore) -> CompileResult<List> {
    match core {
        ast::SelectCore::Values(rows) => compile_values(rows).map(List::Values),
        ast::SelectCore::Select(clause) => compile_select_clause(clause),
    }
}

/// Lower VALUES rows; every row must have the same width
pub(crate) fn compile_values(rows: &[Vec<ast::Expr>]) -> CompileResult<Values> {
    if let Some(first) = rows.first() {
        if rows.iter().any(|row| row.len() != first.len()) {
            return Err(CompileError::invalid(
                "values",
                "all VALUES must have the same number of terms",
            ));
        }
    }

    let rows = rows
        .iter()
        .map(|row| compile_exprs(row))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(Values { rows })
}

fn compile_select_clause(clause: &ast::SelectClause) -> CompileResult<List> {
    if clause.window.is_some() {
        return Err(CompileError::unsupported("window"));
    }

    let cols = clause
        .columns
        .iter()
        .map(compile_result_column)
        .collect::<CompileResult<Vec<_>>>()?;

    let mut input = match &clause.from {
        Some(from) => compile_from(from)?,
        None => List::single_row(),
    };

    if let Some(predicate) = &clause.where_clause {
        input = List::Select(Select {
            filter: Some(compile_expr(predicate)?),
            input: Box::new(input),
        });
    }

    if clause.group_by.is_some() {
        return Err(CompileError::unsupported("group"));
    }

    let mut list = List::Project(Project {
        cols,
        input: Box::new(input),
    });

    if clause.quantifier == Some(ast::SelectQuantifier::Distinct) {
        list = List::Distinct(Distinct {
            input: Box::new(list),
        });
    }

    Ok(list)
}

fn compile_result_column(column: &ast::ResultColumn) -> CompileResult<Column> {
    match column {
        ast::ResultColumn::Star => Ok(Column::new(Expr::literal("*"))),
        ast::ResultColumn::TableStar(table) => Ok(Column {
            table: Some(table.clone()),
            column: Expr::literal("*"),
            alias: None,
        }),
        ast::ResultColumn::Expr { expr, alias } => Ok(Column {
            table: None,
            column: compile_expr(expr)?,
            alias: alias.clone(),
        }),
    }
}

/// Lower a FROM clause into a scan or a left-deep chain of joins
pub fn compile_from(from: &ast::FromClause) -> CompileResult<List> {
    match from {
        ast::FromClause::Tables(tables) => {
            let (first, rest) = tables
                .split_first()
                .ok_or_else(|| CompileError::invalid("from", "no tables to select from"))?;

            // a, b, c is an implicit chain of cross joins
            let mut list = compile_table_or_subquery(first)?;
            for table in rest {
                let right = compile_table_or_subquery(table)?;
                list = List::Join(Join::new(JoinType::Cross, list, right));
            }
            Ok(list)
        }
        ast::FromClause::Join(clause) => compile_join(clause),
    }
}

fn compile_join(clause: &ast::JoinClause) -> CompileResult<List> {
    let mut list = compile_table_or_subquery(&clause.table)?;

    for part in &clause.parts {
        let (kind, natural) = join_type(part.operator)?;
        let filter = match &part.constraint {
            None => None,
            Some(ast::JoinConstraint::On(expr)) => Some(compile_expr(expr)?),
            Some(ast::JoinConstraint::Using(_)) => return Err(CompileError::unsupported("join")),
        };
        let right = compile_table_or_subquery(&part.table)?;

        trace!("joining {:?} (natural={}) onto accumulated input", kind, natural);
        list = List::Join(Join {
            kind,
            natural,
            filter,
            left: Some(Box::new(list)),
            right: Some(Box::new(right)),
        });
    }

    Ok(list)
}

fn join_type(operator: ast::JoinOperator) -> CompileResult<(JoinType, bool)> {
    match operator {
        ast::JoinOperator::Comma => Ok((JoinType::Cross, false)),
        ast::JoinOperator::Join { natural, kind } => {
            let kind = match kind {
                None | Some(ast::JoinKind::Inner) => JoinType::Inner,
                Some(ast::JoinKind::Left) => JoinType::Left,
                Some(ast::JoinKind::LeftOuter) => JoinType::LeftOuter,
                Some(ast::JoinKind::Cross) => JoinType::Cross,
                Some(ast::JoinKind::Right) => return Err(CompileError::unsupported("right join")),
                Some(ast::JoinKind::Full) => return Err(CompileError::unsupported("full join")),
            };
            Ok((kind, natural))
        }
    }
}

fn compile_table_or_subquery(table: &ast::TableOrSubquery) -> CompileResult<List> {
    match table {
        ast::TableOrSubquery::Table(name) => Ok(List::scan(compile_table_name(name))),
        ast::TableOrSubquery::Nested(from) => compile_from(from),
        ast::TableOrSubquery::Subquery { .. } => Err(CompileError::unsupported("subquery")),
        ast::TableOrSubquery::TableFunction { .. } => Err(CompileError::unsupported("table function")),
    }
}

/// Carry schema, alias and index hint over into a table reference
pub(crate) fn compile_table_name(name: &ast::TableName) -> Table {
    let (indexed, index) = match &name.index_hint {
        None => (true, None),
        Some(ast::IndexHint::IndexedBy(index)) => (true, Some(index.clone())),
        Some(ast::IndexHint::NotIndexed) => (false, None),
    };

    Table::Simple(SimpleTable {
        schema: name.schema.clone(),
        table: name.name.clone(),
        alias: name.alias.clone(),
        indexed,
        index,
    })
}
