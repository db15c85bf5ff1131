use std::fmt;

use super::*;

fn join(f: &mut fmt::Formatter, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Complex { re, im } if *im < 0.0 => write!(f, "{}-{}i", re, -im),
            LiteralValue::Complex { re, im } => write!(f, "{}+{}i", re, im),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit.value),
            Expr::Variable(v) => write!(f, "{}", v.name),
            Expr::BinaryOp(b) => write!(f, "({} {} {})", b.left, b.op.symbol(), b.right),
            Expr::UnaryOp(u) => match u.op {
                UnaryOpKind::Neg | UnaryOpKind::Sqrt => write!(f, "{}{}", u.op.symbol(), u.operand),
                _ => write!(f, "{}({})", u.op.symbol(), u.operand),
            },
            Expr::Application(a) => write!(f, "{}({})", a.func, a.arg),
            Expr::Lambda(l) => match &l.annotation {
                Some(ty) => write!(f, "λ{}: {}. {}", l.param, ty, l.body),
                None => write!(f, "λ{}. {}", l.param, l.body),
            },
            Expr::Let(l) => match &l.annotation {
                Some(ty) => write!(f, "let {}: {} = {} in {}", l.name, ty, l.value, l.body),
                None => write!(f, "let {} = {} in {}", l.name, l.value, l.body),
            },
            Expr::Conditional(c) => write!(
                f,
                "if {} then {} else {}",
                c.condition, c.then_branch, c.else_branch
            ),
            Expr::Tuple(t) => {
                write!(f, "(")?;
                join(f, &t.elements)?;
                write!(f, ")")
            }
            Expr::Vector(v) => {
                write!(f, "[")?;
                join(f, &v.elements)?;
                write!(f, "]")
            }
            Expr::Matrix(m) => {
                write!(f, "[")?;
                for (i, row) in m.rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[")?;
                    join(f, row)?;
                    write!(f, "]")?;
                }
                write!(f, "]")
            }
            Expr::Set(s) => {
                write!(f, "{{")?;
                join(f, &s.elements)?;
                write!(f, "}}")
            }
            Expr::SetComprehension(c) => {
                write!(f, "{{{} | {} ∈ {}", c.body, c.var, c.domain)?;
                if let Some(condition) = &c.condition {
                    write!(f, ", {}", condition)?;
                }
                write!(f, "}}")
            }
        }
    }
}
