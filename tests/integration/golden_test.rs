use anyhow::Result;
use bayundb_compiler::query::ast::{
    self, ConflictResolution, DropStatement, Expr, FunctionCall, IndexHint, InsertSource, JoinKind, QualifiedName,
    ResultColumn, SelectClause, SelectCore, SelectStatement, Statement, StatementKind, TableName, TableOrSubquery,
    UnaryOperator,
};
use bayundb_compiler::{Compiler, CompilerOptions, OptimizationKind};

#[path = "../common/mod.rs"]
mod common;

use common::*;

fn render(stmt: Statement) -> Result<String> {
    let options = CompilerOptions::default().with_optimization(OptimizationKind::HalfJoinElimination);
    Ok(Compiler::new(&options).compile(&stmt)?.to_string())
}

#[test]
fn test_select_renderings() -> Result<()> {
    let cases: Vec<(Statement, &str)> = vec![
        (
            statement(select_star(tables(&["users"]))),
            "Project[cols=*](Scan[table=users]())",
        ),
        (
            statement(
                SelectClause::new(vec![
                    column("id"),
                    ResultColumn::Expr {
                        expr: Expr::Function(FunctionCall::new("upper", vec![Expr::column("name")])),
                        alias: Some("n".to_string()),
                    },
                ])
                .from_clause(tables(&["users"]))
                .filter(Expr::binary(
                    Expr::column("age"),
                    ast::BinaryOperator::GreaterEquals,
                    Expr::literal("18"),
                )),
            ),
            "Project[cols=id,upper(name) AS n](Select[filter=age >= 18](Scan[table=users]()))",
        ),
        (
            statement(
                SelectClause::new(vec![ResultColumn::TableStar("u".to_string())]).from_clause(join_clause(
                    "users",
                    vec![join(
                        Some(JoinKind::LeftOuter),
                        "orders",
                        Some(eq(Expr::column("id"), Expr::column("user_id"))),
                    )],
                )),
            ),
            "Project[cols=u.*](Join[filter=id==user_id](Scan[table=users](),Scan[table=orders]()))",
        ),
        (
            statement(
                SelectClause::new(vec![column("a")])
                    .from_clause(tables(&["t"]))
                    .filter(Expr::Between {
                        expr: Box::new(Expr::column("a")),
                        negated: false,
                        low: Box::new(Expr::literal("1")),
                        high: Box::new(Expr::literal("9")),
                    })
                    .distinct(),
            ),
            "Distinct(Project[cols=a](Select[filter=[1;9]](Scan[table=t]())))",
        ),
        (
            statement(SelectClause::new(vec![ResultColumn::Expr {
                expr: Expr::unary(UnaryOperator::Not, Expr::literal("0")),
                alias: None,
            }])),
            "Project[cols=NOT 0](Values[values=()]())",
        ),
        (
            SelectStatement::new(SelectCore::Values(vec![
                vec![Expr::literal("1"), Expr::literal("'a'")],
                vec![Expr::literal("2"), Expr::literal("'b'")],
            ]))
            .into(),
            "Values[values=(1,'a'),(2,'b')]()",
        ),
    ];

    for (stmt, expected) in cases {
        assert_eq!(render(stmt)?, expected);
    }
    Ok(())
}

#[test]
fn test_table_renderings() -> Result<()> {
    let mut name = TableName::new("users");
    name.schema = Some("main".to_string());
    name.alias = Some("u".to_string());
    name.index_hint = Some(IndexHint::NotIndexed);
    let from = ast::FromClause::Tables(vec![TableOrSubquery::Table(name)]);

    assert_eq!(
        render(statement(select_star(from)))?,
        "Project[cols=*](Scan[table=main.users AS u NOT INDEXED]())"
    );
    Ok(())
}

#[test]
fn test_dml_renderings() -> Result<()> {
    let mut insert = ast::InsertStatement::new(
        "t",
        vec!["a".to_string(), "b".to_string()],
        InsertSource::Values(vec![vec![Expr::literal("1"), Expr::literal("2")]]),
    );
    insert.or = Some(ConflictResolution::Replace);
    assert_eq!(
        render(insert.into())?,
        "Insert[table=t,cols=a,b,or=REPLACE](Values[values=(1,2)]())"
    );

    let defaults = ast::InsertStatement::new("t", vec![], InsertSource::DefaultValues);
    assert_eq!(render(defaults.into())?, "Insert[table=t,cols=,or=ABORT](DEFAULT VALUES)");

    let mut update = ast::UpdateStatement::new(
        "t",
        vec![
            ast::UpdateSetter {
                columns: vec!["a".to_string()],
                value: Expr::literal("1"),
            },
            ast::UpdateSetter {
                columns: vec!["b".to_string(), "c".to_string()],
                value: Expr::column("x"),
            },
        ],
    );
    update.where_clause = Some(Expr::binary(
        Expr::column("id"),
        ast::BinaryOperator::NotEquals,
        Expr::literal("3"),
    ));
    assert_eq!(
        render(update.into())?,
        "Update[table=t,updates=a=1;(b,c)=x,filter=id!=3,or=ABORT]"
    );

    assert_eq!(
        render(ast::DeleteStatement::new("t").into())?,
        "Delete[table=t,filter=true]"
    );
    Ok(())
}

#[test]
fn test_drop_renderings() -> Result<()> {
    let drop = DropStatement {
        if_exists: true,
        name: QualifiedName::with_schema("main", "v"),
    };
    assert_eq!(
        render(Statement::new(StatementKind::DropView(drop)))?,
        "DropView[name=main.v,ifexists=true]"
    );

    let drop = DropStatement {
        if_exists: false,
        name: QualifiedName::new("t"),
    };
    assert_eq!(
        render(Statement::new(StatementKind::DropTable(drop)).explained())?,
        "explanation: DropTable[name=t,ifexists=false]"
    );
    Ok(())
}

#[test]
fn test_limit_offset_rendering() -> Result<()> {
    let stmt: Statement = SelectStatement::from(select_star(tables(&["t"])))
        .with_limit(Expr::literal("5"), Some(Expr::literal("10")))
        .into();
    assert_eq!(
        render(stmt)?,
        "Limit[limit=5](Offset[offset=10](Project[cols=*](Scan[table=t]())))"
    );
    Ok(())
}
