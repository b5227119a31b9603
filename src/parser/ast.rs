//! AST node types.
//!
//! The shapes follow the ESTree naming (Program, ExpressionStatement,
//! MemberExpression, ...) trimmed to the subset this engine executes. Every
//! node carries a [`Meta`] with its source span so later stages can point at
//! the offending code.

use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Source span of a node, as byte offsets into the parsed string.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub start_index: usize,
    pub end_index: usize,
}

pub trait HasMeta {
    fn get_meta(&self) -> &Meta;
}

// ── Program ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramData {
    pub meta: Meta,
    pub body: Vec<StatementType>,
    /// Set when the program opens with a `"use strict"` directive.
    pub is_strict: bool,
}

impl HasMeta for ProgramData {
    fn get_meta(&self) -> &Meta {
        &self.meta
    }
}

// ── Statements ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum StatementType {
    ExpressionStatement {
        meta: Meta,
        expression: ExpressionType,
    },
    BlockStatement(BlockStatementData),
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(Rc<FunctionData>),
    ReturnStatement {
        meta: Meta,
        argument: Option<ExpressionType>,
    },
    IfStatement {
        meta: Meta,
        test: ExpressionType,
        consequent: Box<StatementType>,
        alternate: Option<Box<StatementType>>,
    },
    WhileStatement {
        meta: Meta,
        test: ExpressionType,
        body: Box<StatementType>,
    },
    EmptyStatement {
        meta: Meta,
    },
}

impl HasMeta for StatementType {
    fn get_meta(&self) -> &Meta {
        match self {
            StatementType::ExpressionStatement { meta, .. } => meta,
            StatementType::BlockStatement(d) => &d.meta,
            StatementType::VariableDeclaration(d) => &d.meta,
            StatementType::FunctionDeclaration(d) => &d.meta,
            StatementType::ReturnStatement { meta, .. } => meta,
            StatementType::IfStatement { meta, .. } => meta,
            StatementType::WhileStatement { meta, .. } => meta,
            StatementType::EmptyStatement { meta } => meta,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatementData {
    pub meta: Meta,
    pub body: Vec<StatementType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationData {
    pub meta: Meta,
    pub kind: VariableDeclarationKind,
    pub declarations: Vec<VariableDeclaratorData>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

impl Display for VariableDeclarationKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            VariableDeclarationKind::Var => write!(f, "var"),
            VariableDeclarationKind::Let => write!(f, "let"),
            VariableDeclarationKind::Const => write!(f, "const"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaratorData {
    pub meta: Meta,
    pub id: IdentifierData,
    pub init: Option<ExpressionType>,
}

// ── Expressions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierData {
    pub meta: Meta,
    pub name: String,
}

impl HasMeta for IdentifierData {
    fn get_meta(&self) -> &Meta {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionType {
    Literal(LiteralData),
    Identifier(IdentifierData),
    ThisExpression {
        meta: Meta,
    },
    ArrayExpression {
        meta: Meta,
        elements: Vec<ExpressionType>,
    },
    ObjectExpression {
        meta: Meta,
        properties: Vec<PropertyData>,
    },
    FunctionExpression(Rc<FunctionData>),
    ArrowFunctionExpression(Rc<FunctionData>),
    UnaryExpression {
        meta: Meta,
        operator: UnaryOperator,
        argument: Box<ExpressionType>,
    },
    BinaryExpression {
        meta: Meta,
        operator: BinaryOperator,
        left: Box<ExpressionType>,
        right: Box<ExpressionType>,
    },
    LogicalExpression {
        meta: Meta,
        operator: LogicalOperator,
        left: Box<ExpressionType>,
        right: Box<ExpressionType>,
    },
    ConditionalExpression {
        meta: Meta,
        test: Box<ExpressionType>,
        consequent: Box<ExpressionType>,
        alternate: Box<ExpressionType>,
    },
    AssignmentExpression {
        meta: Meta,
        operator: AssignmentOperator,
        target: Box<AssignmentTarget>,
        value: Box<ExpressionType>,
    },
    MemberExpression(MemberExpressionData),
    CallExpression {
        meta: Meta,
        callee: Box<ExpressionType>,
        arguments: Vec<ExpressionType>,
    },
    NewExpression {
        meta: Meta,
        callee: Box<ExpressionType>,
        arguments: Vec<ExpressionType>,
    },
}

impl HasMeta for ExpressionType {
    fn get_meta(&self) -> &Meta {
        match self {
            ExpressionType::Literal(d) => &d.meta,
            ExpressionType::Identifier(d) => &d.meta,
            ExpressionType::ThisExpression { meta } => meta,
            ExpressionType::ArrayExpression { meta, .. } => meta,
            ExpressionType::ObjectExpression { meta, .. } => meta,
            ExpressionType::FunctionExpression(d) => &d.meta,
            ExpressionType::ArrowFunctionExpression(d) => &d.meta,
            ExpressionType::UnaryExpression { meta, .. } => meta,
            ExpressionType::BinaryExpression { meta, .. } => meta,
            ExpressionType::LogicalExpression { meta, .. } => meta,
            ExpressionType::ConditionalExpression { meta, .. } => meta,
            ExpressionType::AssignmentExpression { meta, .. } => meta,
            ExpressionType::MemberExpression(d) => &d.meta,
            ExpressionType::CallExpression { meta, .. } => meta,
            ExpressionType::NewExpression { meta, .. } => meta,
        }
    }
}

/// Member access, `obj.prop` or `obj[expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpressionData {
    pub meta: Meta,
    pub object: Box<ExpressionType>,
    pub property: MemberProperty,
}

impl HasMeta for MemberExpressionData {
    fn get_meta(&self) -> &Meta {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    Simple(IdentifierData),
    Computed(Box<ExpressionType>),
}

/// The left-hand side of an assignment. Only identifiers and member
/// expressions are writable locations in this subset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentTarget {
    Identifier(IdentifierData),
    Member(MemberExpressionData),
}

impl HasMeta for AssignmentTarget {
    fn get_meta(&self) -> &Meta {
        match self {
            AssignmentTarget::Identifier(d) => &d.meta,
            AssignmentTarget::Member(d) => &d.meta,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyData {
    pub meta: Meta,
    pub key: PropertyKeyData,
    pub value: ExpressionType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKeyData {
    Identifier(IdentifierData),
    String(Meta, String),
    Numeric(Meta, NumberLiteralType),
}

impl PropertyKeyData {
    /// The property name as written, for diagnostics.
    pub fn name(&self) -> String {
        match self {
            PropertyKeyData::Identifier(id) => id.name.clone(),
            PropertyKeyData::String(_, s) => s.clone(),
            PropertyKeyData::Numeric(_, n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralData {
    pub meta: Meta,
    pub value: LiteralType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    NullLiteral,
    BooleanLiteral(bool),
    NumberLiteral(NumberLiteralType),
    StringLiteral(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberLiteralType {
    IntegerLiteral(i64),
    FloatLiteral(f64),
}

impl Display for NumberLiteralType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            NumberLiteralType::IntegerLiteral(i) => write!(f, "{}", i),
            NumberLiteralType::FloatLiteral(v) => write!(f, "{}", v),
        }
    }
}

// ── Functions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionData {
    pub meta: Meta,
    pub name: Option<IdentifierData>,
    pub params: Vec<IdentifierData>,
    pub body: Rc<FunctionBodyData>,
    /// Arrow functions never get a `this` binding of their own.
    pub is_arrow: bool,
}

impl HasMeta for FunctionData {
    fn get_meta(&self) -> &Meta {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBodyData {
    pub meta: Meta,
    pub statements: Vec<StatementType>,
    /// Set when the body opens with a `"use strict"` directive. Functions
    /// defined inside strict code are strict regardless of this flag.
    pub is_strict: bool,
}

// ── Operators ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
    Typeof,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            UnaryOperator::Minus => write!(f, "-"),
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Not => write!(f, "!"),
            UnaryOperator::Typeof => write!(f, "typeof"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    StrictEqual,
    StrictNotEqual,
    LooseEqual,
    LooseNotEqual,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let s = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::StrictEqual => "===",
            BinaryOperator::StrictNotEqual => "!==",
            BinaryOperator::LooseEqual => "==",
            BinaryOperator::LooseNotEqual => "!=",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl Display for LogicalOperator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "&&"),
            LogicalOperator::Or => write!(f, "||"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    RemainderAssign,
}

impl AssignmentOperator {
    /// The compound operators map onto a plain binary operation applied to
    /// the target's old value.
    pub fn binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            AssignmentOperator::Assign => None,
            AssignmentOperator::AddAssign => Some(BinaryOperator::Add),
            AssignmentOperator::SubtractAssign => Some(BinaryOperator::Subtract),
            AssignmentOperator::MultiplyAssign => Some(BinaryOperator::Multiply),
            AssignmentOperator::DivideAssign => Some(BinaryOperator::Divide),
            AssignmentOperator::RemainderAssign => Some(BinaryOperator::Remainder),
        }
    }
}

impl Display for AssignmentOperator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let s = match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::RemainderAssign => "%=",
        };
        write!(f, "{}", s)
    }
}
