//! # Expression Model
//!
//! The tree the checker consumes. It is built elsewhere (a parser, a
//! symbolic evaluator, a test) and handed over fully formed; the checker
//! only reads it.
//!
//! ## Structure
//!
//! ```text
//! pub enum Expr {
//!     Literal(Literal),                   // 5, -3, 2.5, 1+2i
//!     Variable(Variable),                 // φ
//!     BinaryOp(BinaryOp),                 // a + b, a ≤ b, a ^ b
//!     UnaryOp(UnaryOp),                   // -a, √a, sin a
//!     Application(Application),           // F(x)
//!     Lambda(Lambda),                     // λx: ℕ. body
//!     Let(Let),                           // let x = v in body
//!     Conditional(Conditional),           // if c then a else b
//!     Tuple(TupleLiteral),                // (a, b, c)
//!     Vector(VectorLiteral),              // [a, b, c]
//!     Matrix(MatrixLiteral),              // [[a, b], [c, d]]
//!     Set(SetLiteral),                    // {a, b, c}
//!     SetComprehension(SetComprehension), // {body | x ∈ S, cond}
//! }
//! ```
//!
//! ## Positions and annotations
//!
//! Every node carries a `position: Span`. A default (empty-source) span means
//! the node has no source location. Every node also carries an `info` slot
//! that the checker fills with the node's inferred type; the slot can be
//! written once and is never overwritten.

use std::cell::OnceCell;

use lachs::Span;

use crate::types::MathType;

mod build;
mod display;

pub use build::*;

/// Write-once slot holding the type inferred for a node.
///
/// The type is stored as it stood when the node was inferred. Variables that
/// later siblings or parents pin down are not substituted back, so an inner
/// slot may still mention `τN` after the enclosing expression resolved it:
/// in `λx. F(x)` with `F : ℕ → ℤ` the `x` node keeps `τ0` while the lambda
/// records `ℕ → ℤ`. Run the stored type through [`Infer::resolve`] on the
/// same checker to get the final form.
///
/// [`Infer::resolve`]: crate::types::Infer::resolve
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeSlot(OnceCell<MathType>);

impl TypeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&MathType> {
        self.0.get()
    }

    /// Store `ty` unless a type was already recorded. Returns whether the
    /// slot was written.
    pub fn set(&self, ty: MathType) -> bool {
        self.0.set(ty).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(Variable),
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
    Application(Application),
    Lambda(Lambda),
    Let(Let),
    Conditional(Conditional),
    Tuple(TupleLiteral),
    Vector(VectorLiteral),
    Matrix(MatrixLiteral),
    Set(SetLiteral),
    SetComprehension(SetComprehension),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    Complex { re: f64, im: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub position: Span,
    pub info: TypeSlot,
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Eq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Pow => "^",
            BinOpKind::Eq => "=",
            BinOpKind::Lt => "<",
            BinOpKind::Gt => ">",
            BinOpKind::LtEq => "≤",
            BinOpKind::GtEq => "≥",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOpKind::Eq | BinOpKind::Lt | BinOpKind::Gt | BinOpKind::LtEq | BinOpKind::GtEq
        )
    }
}

/// Unary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Abs,
}

impl UnaryOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOpKind::Neg => "-",
            UnaryOpKind::Sqrt => "√",
            UnaryOpKind::Sin => "sin",
            UnaryOpKind::Cos => "cos",
            UnaryOpKind::Tan => "tan",
            UnaryOpKind::Exp => "exp",
            UnaryOpKind::Ln => "ln",
            UnaryOpKind::Abs => "abs",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinOpKind,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOpKind,
    pub operand: Box<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

/// Application of a function to a single argument
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub func: Box<Expr>,
    pub arg: Box<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

/// Single-parameter lambda, optionally annotated with the parameter type
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub param: String,
    pub annotation: Option<MathType>,
    pub body: Box<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: String,
    pub annotation: Option<MathType>,
    pub value: Box<Expr>,
    pub body: Box<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Box<Expr>,
    pub then_branch: Box<Expr>,
    pub else_branch: Box<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleLiteral {
    pub elements: Vec<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorLiteral {
    pub elements: Vec<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixLiteral {
    pub rows: Vec<Vec<Expr>>,
    pub position: Span,
    pub info: TypeSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetLiteral {
    pub elements: Vec<Expr>,
    pub position: Span,
    pub info: TypeSlot,
}

/// `{body | var ∈ domain, condition}`
#[derive(Debug, Clone, PartialEq)]
pub struct SetComprehension {
    pub body: Box<Expr>,
    pub var: String,
    pub domain: Box<Expr>,
    pub condition: Option<Box<Expr>>,
    pub position: Span,
    pub info: TypeSlot,
}

impl Expr {
    pub fn position(&self) -> &Span {
        match self {
            Expr::Literal(e) => &e.position,
            Expr::Variable(e) => &e.position,
            Expr::BinaryOp(e) => &e.position,
            Expr::UnaryOp(e) => &e.position,
            Expr::Application(e) => &e.position,
            Expr::Lambda(e) => &e.position,
            Expr::Let(e) => &e.position,
            Expr::Conditional(e) => &e.position,
            Expr::Tuple(e) => &e.position,
            Expr::Vector(e) => &e.position,
            Expr::Matrix(e) => &e.position,
            Expr::Set(e) => &e.position,
            Expr::SetComprehension(e) => &e.position,
        }
    }

    fn position_mut(&mut self) -> &mut Span {
        match self {
            Expr::Literal(e) => &mut e.position,
            Expr::Variable(e) => &mut e.position,
            Expr::BinaryOp(e) => &mut e.position,
            Expr::UnaryOp(e) => &mut e.position,
            Expr::Application(e) => &mut e.position,
            Expr::Lambda(e) => &mut e.position,
            Expr::Let(e) => &mut e.position,
            Expr::Conditional(e) => &mut e.position,
            Expr::Tuple(e) => &mut e.position,
            Expr::Vector(e) => &mut e.position,
            Expr::Matrix(e) => &mut e.position,
            Expr::Set(e) => &mut e.position,
            Expr::SetComprehension(e) => &mut e.position,
        }
    }

    pub fn info(&self) -> &TypeSlot {
        match self {
            Expr::Literal(e) => &e.info,
            Expr::Variable(e) => &e.info,
            Expr::BinaryOp(e) => &e.info,
            Expr::UnaryOp(e) => &e.info,
            Expr::Application(e) => &e.info,
            Expr::Lambda(e) => &e.info,
            Expr::Let(e) => &e.info,
            Expr::Conditional(e) => &e.info,
            Expr::Tuple(e) => &e.info,
            Expr::Vector(e) => &e.info,
            Expr::Matrix(e) => &e.info,
            Expr::Set(e) => &e.info,
            Expr::SetComprehension(e) => &e.info,
        }
    }

    /// The type recorded for this node by a previous checking pass.
    pub fn inferred_type(&self) -> Option<&MathType> {
        self.info().get()
    }

    /// Attach a source location, for use while building a tree.
    pub fn at(mut self, position: Span) -> Self {
        *self.position_mut() = position;
        self
    }
}
