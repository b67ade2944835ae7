// Row-Producing Commands
//
// `List` is the closed family of commands that yield a row stream. Only a
// `List` may appear as another operator's input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::expr::{write_joined, Expr};
use super::{Column, Table};

/// A command that produces rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum List {
    Scan(Scan),
    Select(Select),
    Project(Project),
    Join(Join),
    Limit(Limit),
    Offset(Offset),
    Distinct(Distinct),
    Values(Values),
}

impl List {
    /// A row source with no rows at all
    pub fn empty() -> Self {
        List::Values(Values { rows: Vec::new() })
    }

    /// A row source with one row and no columns, the input of `SELECT 1`
    pub fn single_row() -> Self {
        List::Values(Values { rows: vec![Vec::new()] })
    }

    pub fn scan(table: Table) -> Self {
        List::Scan(Scan { table })
    }
}

/// Read every row of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    pub table: Table,
}

/// Keep the rows of `input` matching `filter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub filter: Option<Expr>,
    pub input: Box<List>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub cols: Vec<Column>,
    pub input: Box<List>,
}

/// Combine two row sources.
///
/// Compiled joins always carry both operands. A missing operand only shows up
/// transiently, as the target of half-join elimination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinType,
    pub natural: bool,
    pub filter: Option<Expr>,
    pub left: Option<Box<List>>,
    pub right: Option<Box<List>>,
}

impl Join {
    pub fn new(kind: JoinType, left: List, right: List) -> Self {
        Join {
            kind,
            natural: false,
            filter: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Whether both operands are missing
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    #[default]
    Unspecified,
    Left,
    LeftOuter,
    Inner,
    Cross,
}

/// Emit at most `limit` rows of `input`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub limit: Expr,
    pub input: Box<List>,
}

/// Skip the first `offset` rows of `input`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub offset: Expr,
    pub input: Box<List>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distinct {
    pub input: Box<List>,
}

/// Literal rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Values {
    pub rows: Vec<Vec<Expr>>,
}

struct Operand<'a>(&'a Option<Box<List>>);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(list) => write!(f, "{}", list),
            None => f.write_str("<absent>"),
        }
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            List::Scan(scan) => write!(f, "Scan[table={}]()", scan.table),
            List::Select(select) => match &select.filter {
                Some(filter) => write!(f, "Select[filter={}]({})", filter, select.input),
                None => write!(f, "Select[]({})", select.input),
            },
            List::Project(project) => {
                f.write_str("Project[cols=")?;
                write_joined(f, &project.cols)?;
                write!(f, "]({})", project.input)
            }
            List::Join(join) => {
                match &join.filter {
                    Some(filter) => write!(f, "Join[filter={}]", filter)?,
                    None => f.write_str("Join[]")?,
                }
                write!(f, "({},{})", Operand(&join.left), Operand(&join.right))
            }
            List::Limit(limit) => write!(f, "Limit[limit={}]({})", limit.limit, limit.input),
            List::Offset(offset) => write!(f, "Offset[offset={}]({})", offset.offset, offset.input),
            List::Distinct(distinct) => write!(f, "Distinct({})", distinct.input),
            List::Values(values) => {
                f.write_str("Values[values=")?;
                for (i, row) in values.rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("(")?;
                    write_joined(f, row)?;
                    f.write_str(")")?;
                }
                f.write_str("]()")
            }
        }
    }
}
