// Command Expressions
//
// Expression nodes carried by the command tree. They are immutable values
// compared structurally; `Display` gives the canonical text used by golden
// tests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An expression inside a compiled command
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// Literal token text; also carries column references and `*`
    Literal(String),
    Numeric(i64),
    ConstantBoolean(bool),
    Unary {
        op: UnaryOperator,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Function {
        name: String,
        distinct: bool,
        args: Vec<Expr>,
    },
    /// `left == right`, or `left != right` when inverted
    Equality {
        left: Box<Expr>,
        right: Box<Expr>,
        invert: bool,
    },
    /// `needle BETWEEN lo AND hi`, or NOT BETWEEN when inverted
    Range {
        needle: Box<Expr>,
        lo: Box<Expr>,
        hi: Box<Expr>,
        invert: bool,
    },
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn numeric(value: i64) -> Self {
        Expr::Numeric(value)
    }

    pub fn boolean(value: bool) -> Self {
        Expr::ConstantBoolean(value)
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn equality(left: Expr, right: Expr, invert: bool) -> Self {
        Expr::Equality {
            left: Box::new(left),
            right: Box::new(right),
            invert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Negate,
    Plus,
    Not,
    BitNot,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "NOT",
            UnaryOperator::BitNot => "~",
        };
        f.write_str(op)
    }
}

/// Binary operators other than (in)equality, which has its own node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Concat,
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Is,
    IsNot,
    Like,
    Glob,
    And,
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Concat => "||",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Is => "IS",
            BinaryOperator::IsNot => "IS NOT",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::Glob => "GLOB",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        };
        f.write_str(op)
    }
}

/// Writes `items` separated by commas
pub(crate) fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => f.write_str(value),
            Expr::Numeric(value) => write!(f, "{}", value),
            Expr::ConstantBoolean(value) => write!(f, "{}", value),
            Expr::Unary { op, value } => write!(f, "{} {}", op, value),
            Expr::Binary { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Function { name, distinct, args } => {
                write!(f, "{}(", name)?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_joined(f, args)?;
                f.write_str(")")
            }
            Expr::Equality { left, right, invert } => {
                let op = if *invert { "!=" } else { "==" };
                write!(f, "{}{}{}", left, op, right)
            }
            Expr::Range { lo, hi, invert, .. } => {
                if *invert {
                    f.write_str("!")?;
                }
                write!(f, "[{};{}]", lo, hi)
            }
        }
    }
}
