// Expression Lowering
//
// Converts AST expressions into command expressions. Column references become
// literals carrying their dotted name; (in)equality and BETWEEN get their own
// nodes.

use crate::query::ast;
use crate::query::command::{BinaryOperator, Expr, UnaryOperator};
use crate::query::error::{CompileError, CompileResult};

/// Lower an AST expression
pub fn compile_expr(expr: &ast::Expr) -> CompileResult<Expr> {
    match expr {
        ast::Expr::Literal(value) => Ok(Expr::Literal(value.clone())),
        ast::Expr::Column(column) => Ok(Expr::Literal(column_name(column))),
        ast::Expr::Unary { op, expr } => Ok(Expr::Unary {
            op: unary_operator(*op),
            value: Box::new(compile_expr(expr)?),
        }),
        ast::Expr::Binary { left, op, right } => compile_binary(left, *op, right),
        ast::Expr::Between {
            expr,
            negated,
            low,
            high,
        } => Ok(Expr::Range {
            needle: Box::new(compile_expr(expr)?),
            lo: Box::new(compile_expr(low)?),
            hi: Box::new(compile_expr(high)?),
            invert: *negated,
        }),
        ast::Expr::Function(call) => compile_function(call),
        ast::Expr::Parenthesized(exprs) => match exprs.as_slice() {
            [single] => compile_expr(single),
            _ => Err(CompileError::unsupported("row value")),
        },
        ast::Expr::BindParameter(_) => Err(CompileError::unsupported("bind parameter")),
        ast::Expr::Cast { .. } => Err(CompileError::unsupported("cast")),
        ast::Expr::Case { .. } => Err(CompileError::unsupported("case")),
        ast::Expr::In { .. } => Err(CompileError::unsupported("in")),
        ast::Expr::Exists(_) => Err(CompileError::unsupported("exists")),
        ast::Expr::Subquery(_) => Err(CompileError::unsupported("subquery")),
    }
}

/// Lower every expression of a list, stopping at the first failure
pub fn compile_exprs(exprs: &[ast::Expr]) -> CompileResult<Vec<Expr>> {
    exprs.iter().map(compile_expr).collect()
}

fn column_name(column: &ast::ColumnRef) -> String {
    let mut name = String::new();
    if let Some(schema) = &column.schema {
        name.push_str(schema);
        name.push('.');
    }
    if let Some(table) = &column.table {
        name.push_str(table);
        name.push('.');
    }
    name.push_str(&column.column);
    name
}

fn compile_binary(left: &ast::Expr, op: ast::BinaryOperator, right: &ast::Expr) -> CompileResult<Expr> {
    let left = compile_expr(left)?;
    let right = compile_expr(right)?;

    let op = match op {
        ast::BinaryOperator::Equals | ast::BinaryOperator::DoubleEquals => {
            return Ok(Expr::equality(left, right, false));
        }
        ast::BinaryOperator::NotEquals | ast::BinaryOperator::LessGreater => {
            return Ok(Expr::equality(left, right, true));
        }
        ast::BinaryOperator::Concat => BinaryOperator::Concat,
        ast::BinaryOperator::Multiply => BinaryOperator::Multiply,
        ast::BinaryOperator::Divide => BinaryOperator::Divide,
        ast::BinaryOperator::Modulo => BinaryOperator::Modulo,
        ast::BinaryOperator::Add => BinaryOperator::Add,
        ast::BinaryOperator::Subtract => BinaryOperator::Subtract,
        ast::BinaryOperator::ShiftLeft => BinaryOperator::ShiftLeft,
        ast::BinaryOperator::ShiftRight => BinaryOperator::ShiftRight,
        ast::BinaryOperator::BitAnd => BinaryOperator::BitAnd,
        ast::BinaryOperator::BitOr => BinaryOperator::BitOr,
        ast::BinaryOperator::Less => BinaryOperator::Less,
        ast::BinaryOperator::LessEquals => BinaryOperator::LessEquals,
        ast::BinaryOperator::Greater => BinaryOperator::Greater,
        ast::BinaryOperator::GreaterEquals => BinaryOperator::GreaterEquals,
        ast::BinaryOperator::Is => BinaryOperator::Is,
        ast::BinaryOperator::IsNot => BinaryOperator::IsNot,
        ast::BinaryOperator::Like => BinaryOperator::Like,
        ast::BinaryOperator::Glob => BinaryOperator::Glob,
        ast::BinaryOperator::And => BinaryOperator::And,
        ast::BinaryOperator::Or => BinaryOperator::Or,
    };

    Ok(Expr::binary(left, op, right))
}

fn unary_operator(op: ast::UnaryOperator) -> UnaryOperator {
    match op {
        ast::UnaryOperator::Minus => UnaryOperator::Negate,
        ast::UnaryOperator::Plus => UnaryOperator::Plus,
        ast::UnaryOperator::Not => UnaryOperator::Not,
        ast::UnaryOperator::BitNot => UnaryOperator::BitNot,
    }
}

// FILTER, OVER and f(*) need aggregation/window operators the command tree
// does not have.
fn compile_function(call: &ast::FunctionCall) -> CompileResult<Expr> {
    if call.filter.is_some() {
        return Err(CompileError::unsupported("filter"));
    }
    if call.over.is_some() {
        return Err(CompileError::unsupported("over"));
    }
    let args = match &call.args {
        ast::FunctionArgs::Star => return Err(CompileError::unsupported("function star")),
        ast::FunctionArgs::List(args) => args,
    };
    if call.distinct && args.len() != 1 {
        return Err(CompileError::unsupported("distinct on function"));
    }

    Ok(Expr::Function {
        name: call.name.clone(),
        distinct: call.distinct,
        args: compile_exprs(args)?,
    })
}
