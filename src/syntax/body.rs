//! Statement and expression trees for method, closure and script bodies.
//!
//! Node kinds are plain enums matched exhaustively by every walker.

use smol_str::SmolStr;

use super::model::{ParameterInfo, TypeRef};
use crate::base::SourceSpan;

/// A `{ ... }` statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `def x = 1`, `String s`, `int a = 1, b = 2` yields one per variable.
    VarDecl(VarDecl),
    Expr(Expr),
    Return(Option<Expr>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    /// `for (x in xs)` and `for (T x : xs)`.
    ForIn {
        variable: VarDecl,
        iterable: Expr,
        body: Box<Stmt>,
    },
    /// Classic `for (init; condition; update)`.
    For {
        init: Vec<Stmt>,
        condition: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    Block(Block),
    Throw(Expr),
    TryCatch {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Break,
    Continue,
    /// Anything the parser skipped over while recovering.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: SmolStr,
    pub type_ref: TypeRef,
    pub initializer: Option<Expr>,
    pub name_span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub parameter: ParameterInfo,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// A bare name: local, parameter, field, or class reference.
    Variable(SmolStr),
    This,
    Super,
    New {
        type_ref: TypeRef,
        /// Span of the type name after `new`.
        type_span: SourceSpan,
        args: Vec<Expr>,
    },
    MethodCall {
        /// `None` for an implicit-this call such as `println x`.
        receiver: Option<Box<Expr>>,
        name: SmolStr,
        name_span: SourceSpan,
        args: Vec<Expr>,
        safe: bool,
    },
    Property {
        receiver: Box<Expr>,
        name: SmolStr,
        name_span: SourceSpan,
        safe: bool,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Elvis {
        value: Box<Expr>,
        fallback: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        op: AssignOp,
        value: Box<Expr>,
    },
    Cast {
        expr: Box<Expr>,
        type_ref: TypeRef,
    },
    Range {
        from: Box<Expr>,
        to: Box<Expr>,
        exclusive: bool,
    },
    List(Vec<Expr>),
    Map(Vec<MapEntry>),
    Closure(Closure),
    /// Placeholder for an expression that failed to parse.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub parameters: Vec<ParameterInfo>,
    /// No explicit parameter list, so `it` is in scope.
    pub implicit_it: bool,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    /// Double-quoted string, possibly with `${}` interpolation.
    GString(String),
    Integer(i64),
    Long(i64),
    BigInteger(String),
    /// Groovy decimals default to `BigDecimal`.
    Decimal(String),
    Double(String),
    Float(String),
    Boolean(bool),
    Null,
}

impl Literal {
    /// Runtime type of the literal.
    pub fn type_ref(&self) -> TypeRef {
        let name = match self {
            Literal::String(_) => "String",
            Literal::GString(_) => "GString",
            Literal::Integer(_) => "int",
            Literal::Long(_) => "long",
            Literal::BigInteger(_) => "BigInteger",
            Literal::Decimal(_) => "BigDecimal",
            Literal::Double(_) => "double",
            Literal::Float(_) => "float",
            Literal::Boolean(_) => "boolean",
            Literal::Null => return TypeRef::dynamic(),
        };
        TypeRef::named(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Identical,
    NotIdentical,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Compare,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    InstanceOf,
    In,
    Match,
    Find,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Elvis,
}

impl Expr {
    pub fn new(kind: ExprKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// Name of a bare variable reference.
    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl Stmt {
    pub fn new(kind: StmtKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}
