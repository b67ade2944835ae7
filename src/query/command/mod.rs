// Command Tree
//
// This module defines the intermediate representation a statement compiles
// to: a relational-algebra tree of row-producing `List` operators, wrapped by
// top-level DML/DDL commands. Every node renders to a stable text form.

pub mod expr;
pub mod list;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::expr::{BinaryOperator, Expr, UnaryOperator};
pub use self::list::{Distinct, Join, JoinType, Limit, List, Offset, Project, Scan, Select, Values};

/// A compiled statement, ready for the evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Describe the inner command instead of running it
    Explain(Box<Command>),
    List(List),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    DropTable(DropObject),
    DropIndex(DropObject),
    DropTrigger(DropObject),
    DropView(DropObject),
}

impl From<List> for Command {
    fn from(list: List) -> Self {
        Command::List(list)
    }
}

/// A table reference. Only plain tables exist so far; derived tables would
/// become further variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Simple(SimpleTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleTable {
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
    /// False for `NOT INDEXED`
    pub indexed: bool,
    /// Set by `INDEXED BY <index>`
    pub index: Option<String>,
}

impl SimpleTable {
    pub fn new(table: impl Into<String>) -> Self {
        SimpleTable {
            schema: None,
            table: table.into(),
            alias: None,
            indexed: true,
            index: None,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Simple(simple) => write!(f, "{}", simple),
        }
    }
}

impl fmt::Display for SimpleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        f.write_str(&self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        // both hints print when both are set
        if !self.indexed {
            f.write_str(" NOT INDEXED")?;
        }
        if let Some(index) = &self.index {
            write!(f, " INDEXED BY {}", index)?;
        }
        Ok(())
    }
}

/// One projected output column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Set for `t.*`
    pub table: Option<String>,
    pub column: Expr,
    pub alias: Option<String>,
}

impl Column {
    pub fn new(column: Expr) -> Self {
        Column {
            table: None,
            column,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{}.", table)?;
        }
        write!(f, "{}", self.column)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

/// Conflict resolution of INSERT OR ... / UPDATE OR ...
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictAction {
    #[default]
    Abort,
    Replace,
    Rollback,
    Fail,
    Ignore,
}

impl fmt::Display for ConflictAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            ConflictAction::Abort => "ABORT",
            ConflictAction::Replace => "REPLACE",
            ConflictAction::Rollback => "ROLLBACK",
            ConflictAction::Fail => "FAIL",
            ConflictAction::Ignore => "IGNORE",
        };
        f.write_str(action)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub insert_or: ConflictAction,
    pub table: Table,
    pub cols: Vec<String>,
    /// `None` for DEFAULT VALUES
    pub input: Option<Box<List>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_or: ConflictAction,
    pub table: Table,
    pub updates: Vec<UpdateSetter>,
    /// Always present; `true` when the statement had no WHERE
    pub filter: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateSetter {
    pub cols: Vec<String>,
    pub value: Expr,
}

impl fmt::Display for UpdateSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cols.as_slice() {
            [single] => write!(f, "{}={}", single, self.value),
            cols => write!(f, "({})={}", cols.join(","), self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub table: Table,
    /// Always present; `true` when the statement had no WHERE
    pub filter: Expr,
}

/// Target of a DROP TABLE / INDEX / TRIGGER / VIEW
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropObject {
    pub if_exists: bool,
    pub schema: Option<String>,
    pub name: String,
}

impl fmt::Display for DropObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[name=")?;
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        write!(f, "{},ifexists={}]", self.name, self.if_exists)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Explain(inner) => write!(f, "explanation: {}", inner),
            Command::List(list) => write!(f, "{}", list),
            Command::Insert(insert) => {
                write!(f, "Insert[table={},cols=", insert.table)?;
                f.write_str(&insert.cols.join(","))?;
                write!(f, ",or={}]", insert.insert_or)?;
                match &insert.input {
                    Some(input) => write!(f, "({})", input),
                    None => f.write_str("(DEFAULT VALUES)"),
                }
            }
            Command::Update(update) => {
                write!(f, "Update[table={},updates=", update.table)?;
                for (i, setter) in update.updates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{}", setter)?;
                }
                write!(f, ",filter={},or={}]", update.filter, update.update_or)
            }
            Command::Delete(delete) => {
                write!(f, "Delete[table={},filter={}]", delete.table, delete.filter)
            }
            Command::DropTable(target) => write!(f, "DropTable{}", target),
            Command::DropIndex(target) => write!(f, "DropIndex{}", target),
            Command::DropTrigger(target) => write!(f, "DropTrigger{}", target),
            Command::DropView(target) => write!(f, "DropView{}", target),
        }
    }
}
