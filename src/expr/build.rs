//! Shorthand constructors for assembling expression trees by hand.
//!
//! Nodes come out without a source location; chain [`Expr::at`] to attach
//! one.

use lachs::Span;

use super::*;

pub fn num(value: f64) -> Expr {
    Expr::Literal(Literal {
        value: LiteralValue::Number(value),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn complex(re: f64, im: f64) -> Expr {
    Expr::Literal(Literal {
        value: LiteralValue::Complex { re, im },
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn var(name: &str) -> Expr {
    Expr::Variable(Variable {
        name: name.to_string(),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn binop(op: BinOpKind, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp(BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn unary(op: UnaryOpKind, operand: Expr) -> Expr {
    Expr::UnaryOp(UnaryOp {
        op,
        operand: Box::new(operand),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn apply(func: Expr, arg: Expr) -> Expr {
    Expr::Application(Application {
        func: Box::new(func),
        arg: Box::new(arg),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn lambda(param: &str, annotation: Option<MathType>, body: Expr) -> Expr {
    Expr::Lambda(Lambda {
        param: param.to_string(),
        annotation,
        body: Box::new(body),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn let_in(name: &str, annotation: Option<MathType>, value: Expr, body: Expr) -> Expr {
    Expr::Let(Let {
        name: name.to_string(),
        annotation,
        value: Box::new(value),
        body: Box::new(body),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn cond(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::Conditional(Conditional {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn tuple(elements: Vec<Expr>) -> Expr {
    Expr::Tuple(TupleLiteral {
        elements,
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn vector(elements: Vec<Expr>) -> Expr {
    Expr::Vector(VectorLiteral {
        elements,
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn matrix(rows: Vec<Vec<Expr>>) -> Expr {
    Expr::Matrix(MatrixLiteral {
        rows,
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn set(elements: Vec<Expr>) -> Expr {
    Expr::Set(SetLiteral {
        elements,
        position: Span::default(),
        info: TypeSlot::new(),
    })
}

pub fn set_comprehension(body: Expr, var: &str, domain: Expr, condition: Option<Expr>) -> Expr {
    Expr::SetComprehension(SetComprehension {
        body: Box::new(body),
        var: var.to_string(),
        domain: Box::new(domain),
        condition: condition.map(Box::new),
        position: Span::default(),
        info: TypeSlot::new(),
    })
}
