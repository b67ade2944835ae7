#![allow(dead_code)]

use bayundb_compiler::query::ast::{
    BinaryOperator, Expr, FromClause, JoinClause, JoinClausePart, JoinConstraint, JoinKind, JoinOperator,
    ResultColumn, SelectClause, SelectStatement, Statement, TableOrSubquery,
};
use bayundb_compiler::query::command::{List, SimpleTable, Table};

// FROM a, b, ...
pub fn tables(names: &[&str]) -> FromClause {
    FromClause::Tables(names.iter().map(|name| TableOrSubquery::table(*name)).collect())
}

// `, <table>` as a join clause part
pub fn comma(table: &str) -> JoinClausePart {
    JoinClausePart {
        operator: JoinOperator::Comma,
        table: TableOrSubquery::table(table),
        constraint: None,
    }
}

// `[kind] JOIN <table> [ON <on>]`
pub fn join(kind: Option<JoinKind>, table: &str, on: Option<Expr>) -> JoinClausePart {
    JoinClausePart {
        operator: JoinOperator::Join { natural: false, kind },
        table: TableOrSubquery::table(table),
        constraint: on.map(JoinConstraint::On),
    }
}

pub fn join_clause(first: &str, parts: Vec<JoinClausePart>) -> FromClause {
    FromClause::Join(JoinClause {
        table: TableOrSubquery::table(first),
        parts,
    })
}

pub fn column(name: &str) -> ResultColumn {
    ResultColumn::Expr {
        expr: Expr::column(name),
        alias: None,
    }
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    Expr::binary(left, BinaryOperator::Equals, right)
}

// SELECT * FROM <from>
pub fn select_star(from: FromClause) -> SelectClause {
    SelectClause::new(vec![ResultColumn::Star]).from_clause(from)
}

pub fn statement(clause: SelectClause) -> Statement {
    SelectStatement::from(clause).into()
}

pub fn scan(name: &str) -> List {
    List::scan(Table::Simple(SimpleTable::new(name)))
}
