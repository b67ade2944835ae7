// SQL Abstract Syntax Tree (AST) Implementation
//
// This module defines the statement tree handed over by the parser. Every
// optional clause is an `Option`, so an absent clause is never confused with
// an empty one. The compiler only reads these types.

/// A complete SQL statement, optionally prefixed with EXPLAIN
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// EXPLAIN marker (if any)
    pub explain: Option<Explain>,
    /// The statement itself
    pub kind: StatementKind,
}

/// EXPLAIN or EXPLAIN QUERY PLAN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explain {
    pub query_plan: bool,
}

/// Represents a SQL statement kind
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    DropTable(DropStatement),
    DropIndex(DropStatement),
    DropTrigger(DropStatement),
    DropView(DropStatement),
    Create(CreateStatement),
    AlterTable(QualifiedName),
    Transaction(TransactionStatement),
    Vacuum { schema: Option<String> },
    Analyze { target: Option<QualifiedName> },
    Pragma { name: QualifiedName },
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Statement { explain: None, kind }
    }

    /// Mark the statement with EXPLAIN
    pub fn explained(mut self) -> Self {
        self.explain = Some(Explain { query_plan: false });
        self
    }
}

impl From<StatementKind> for Statement {
    fn from(kind: StatementKind) -> Self {
        Statement::new(kind)
    }
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Statement::new(StatementKind::Select(select))
    }
}

impl From<SelectClause> for Statement {
    fn from(clause: SelectClause) -> Self {
        Statement::from(SelectStatement::from(clause))
    }
}

impl From<InsertStatement> for Statement {
    fn from(insert: InsertStatement) -> Self {
        Statement::new(StatementKind::Insert(insert))
    }
}

impl From<UpdateStatement> for Statement {
    fn from(update: UpdateStatement) -> Self {
        Statement::new(StatementKind::Update(update))
    }
}

impl From<DeleteStatement> for Statement {
    fn from(delete: DeleteStatement) -> Self {
        Statement::new(StatementKind::Delete(delete))
    }
}

/// Optionally schema-qualified object name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub schema: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        QualifiedName {
            schema: None,
            name: name.into(),
        }
    }

    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedName {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

/// WITH clause
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub name: String,
    pub columns: Vec<String>,
    pub select: Box<SelectStatement>,
}

/// SELECT statement representation
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// WITH clause (optional)
    pub with: Option<WithClause>,
    /// The first select core
    pub core: SelectCore,
    /// Further cores joined by UNION / INTERSECT / EXCEPT
    pub compound: Vec<CompoundSelect>,
    /// ORDER BY clause (optional)
    pub order_by: Option<Vec<OrderingTerm>>,
    /// LIMIT clause (optional)
    pub limit: Option<LimitClause>,
}

impl SelectStatement {
    pub fn new(core: SelectCore) -> Self {
        SelectStatement {
            with: None,
            core,
            compound: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Expr, offset: Option<Expr>) -> Self {
        self.limit = Some(LimitClause { limit, offset });
        self
    }
}

impl From<SelectClause> for SelectStatement {
    fn from(clause: SelectClause) -> Self {
        SelectStatement::new(SelectCore::Select(clause))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelect {
    pub operator: CompoundOperator,
    pub core: SelectCore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTerm {
    pub expr: Expr,
    pub descending: bool,
}

/// LIMIT <expr> [OFFSET <expr>]
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    pub limit: Expr,
    pub offset: Option<Expr>,
}

/// Either a SELECT ... FROM ... core or a VALUES list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectCore {
    Select(SelectClause),
    Values(Vec<Vec<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    /// DISTINCT / ALL (optional)
    pub quantifier: Option<SelectQuantifier>,
    /// Columns in SELECT clause
    pub columns: Vec<ResultColumn>,
    /// FROM clause (optional)
    pub from: Option<FromClause>,
    /// WHERE clause (optional)
    pub where_clause: Option<Expr>,
    /// GROUP BY clause (optional)
    pub group_by: Option<GroupByClause>,
    /// WINDOW clause (optional)
    pub window: Option<Vec<NamedWindow>>,
}

impl SelectClause {
    pub fn new(columns: Vec<ResultColumn>) -> Self {
        SelectClause {
            quantifier: None,
            columns,
            from: None,
            where_clause: None,
            group_by: None,
            window: None,
        }
    }

    pub fn from_clause(mut self, from: FromClause) -> Self {
        self.from = Some(from);
        self
    }

    pub fn filter(mut self, predicate: Expr) -> Self {
        self.where_clause = Some(predicate);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.quantifier = Some(SelectQuantifier::Distinct);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectQuantifier {
    Distinct,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    pub exprs: Vec<Expr>,
    pub having: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedWindow {
    pub name: String,
    pub definition: WindowDefinition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefinition {
    pub base: Option<String>,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderingTerm>,
}

/// Column in a SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub enum ResultColumn {
    /// All columns (*)
    Star,
    /// All columns of one table (t.*)
    TableStar(String),
    /// Expression with optional alias
    Expr { expr: Expr, alias: Option<String> },
}

/// FROM clause: a plain table list or a join clause
#[derive(Debug, Clone, PartialEq)]
pub enum FromClause {
    Tables(Vec<TableOrSubquery>),
    Join(JoinClause),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableOrSubquery {
    Table(TableName),
    Subquery {
        select: Box<SelectStatement>,
        alias: Option<String>,
    },
    TableFunction {
        name: QualifiedName,
        args: Vec<Expr>,
        alias: Option<String>,
    },
    /// Parenthesized FROM clause, e.g. `a JOIN (b JOIN c)`
    Nested(Box<FromClause>),
}

impl TableOrSubquery {
    pub fn table(name: impl Into<String>) -> Self {
        TableOrSubquery::Table(TableName::new(name))
    }
}

/// Table reference with its optional schema, alias and index hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
    pub index_hint: Option<IndexHint>,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        TableName {
            schema: None,
            name: name.into(),
            alias: None,
            index_hint: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexHint {
    IndexedBy(String),
    NotIndexed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub table: TableOrSubquery,
    pub parts: Vec<JoinClausePart>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClausePart {
    pub operator: JoinOperator,
    pub table: TableOrSubquery,
    pub constraint: Option<JoinConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOperator {
    /// `a, b`
    Comma,
    /// `a [NATURAL] [kind] JOIN b`
    Join {
        natural: bool,
        kind: Option<JoinKind>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    LeftOuter,
    Right,
    Full,
    Inner,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<String>),
}

/// Expression in SQL
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal token text (numbers, strings, NULL, TRUE, ...)
    Literal(String),
    /// Column reference
    Column(ColumnRef),
    /// `?`, `?1`, `:name`, ...
    BindParameter(String),
    Unary {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    Function(FunctionCall),
    /// `(a)` or a row value `(a, b)`
    Parenthesized(Vec<Expr>),
    Cast {
        expr: Box<Expr>,
        type_name: String,
    },
    Case {
        operand: Option<Box<Expr>>,
        when_then: Vec<(Expr, Expr)>,
        else_expr: Option<Box<Expr>>,
    },
    In {
        expr: Box<Expr>,
        negated: bool,
        list: Vec<Expr>,
    },
    Exists(Box<SelectStatement>),
    Subquery(Box<SelectStatement>),
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef {
            schema: None,
            table: None,
            column: name.into(),
        })
    }

    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef {
            schema: None,
            table: Some(table.into()),
            column: name.into(),
        })
    }

    pub fn unary(op: UnaryOperator, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Column reference (could be qualified with schema and table name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub schema: Option<String>,
    pub table: Option<String>,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub distinct: bool,
    pub args: FunctionArgs,
    pub filter: Option<Box<Expr>>,
    pub over: Option<OverClause>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        FunctionCall {
            name: name.into(),
            distinct: false,
            args: FunctionArgs::List(args),
            filter: None,
            over: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `f(*)`
    Star,
    List(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverClause {
    Window(String),
    Definition(WindowDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
    BitNot,
}

/// SQL binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    /// `=`
    Equals,
    /// `==`
    DoubleEquals,
    /// `!=`
    NotEquals,
    /// `<>`
    LessGreater,
    Is,
    IsNot,
    Like,
    Glob,
    And,
    Or,
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub with: Option<WithClause>,
    /// `INSERT OR <action>` / `REPLACE INTO`
    pub or: Option<ConflictResolution>,
    pub table: QualifiedName,
    pub alias: Option<String>,
    pub columns: Vec<String>,
    pub source: InsertSource,
    pub upsert: Option<UpsertClause>,
}

impl InsertStatement {
    pub fn new(table: impl Into<String>, columns: Vec<String>, source: InsertSource) -> Self {
        InsertStatement {
            with: None,
            or: None,
            table: QualifiedName::new(table),
            alias: None,
            columns,
            source,
            upsert: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Select(Box<SelectStatement>),
    DefaultValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    Replace,
    Rollback,
    Abort,
    Fail,
    Ignore,
}

/// `ON CONFLICT (...) DO NOTHING | DO UPDATE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertClause {
    pub target: Vec<String>,
    pub do_update: Option<Vec<UpdateSetter>>,
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub with: Option<WithClause>,
    pub or: Option<ConflictResolution>,
    pub table: TableName,
    pub set: Vec<UpdateSetter>,
    pub where_clause: Option<Expr>,
}

impl UpdateStatement {
    pub fn new(table: impl Into<String>, set: Vec<UpdateSetter>) -> Self {
        UpdateStatement {
            with: None,
            or: None,
            table: TableName::new(table),
            set,
            where_clause: None,
        }
    }
}

/// `col = expr` or `(a, b) = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSetter {
    pub columns: Vec<String>,
    pub value: Expr,
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub with: Option<WithClause>,
    pub table: TableName,
    pub where_clause: Option<Expr>,
}

impl DeleteStatement {
    pub fn new(table: impl Into<String>) -> Self {
        DeleteStatement {
            with: None,
            table: TableName::new(table),
            where_clause: None,
        }
    }
}

/// DROP TABLE / INDEX / TRIGGER / VIEW
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

/// CREATE statements have no lowering; only what is needed to name them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStatement {
    pub kind: CreateKind,
    pub if_not_exists: bool,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    Table,
    VirtualTable,
    Index,
    Trigger,
    View,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatement {
    Begin,
    Commit,
    Rollback,
    Savepoint(String),
    Release(String),
}
