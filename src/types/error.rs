//! # Type Error Definitions
//!
//! The failure kinds inference can raise. Each is a plain data record; the
//! [`crate::types::report`] module attaches the offending expression and its
//! location when the error is recorded.
//!
//! ## Example Messages
//!
//! ```text
//! type mismatch: expected ℕ, found ℝ
//! cannot unify ℕ with Set(ℕ)
//! cannot construct infinite type: τ0 = τ0 → ℕ
//! undefined variable: x
//! invalid operation: cannot apply + to ℕ and Set(ℕ)
//! dimension mismatch in matrix row 2: expected 2, found 1
//! annotation mismatch for x: declared ℕ, inferred ℝ
//! ```

use thiserror::Error;

use super::ty::MathType;
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An expression's type does not fit where it is used.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: MathType, found: MathType },

    /// Two types have no common form (different constructors or shapes).
    #[error("cannot unify {left} with {right}")]
    UnificationFailure { left: MathType, right: MathType },

    /// Binding a variable would produce a self-referential type.
    #[error("cannot construct infinite type: {var} = {ty}")]
    OccursCheck { var: String, ty: MathType },

    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    /// No typing rule covers the operand types.
    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },

    /// A tuple, vector or matrix has the wrong shape.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A declared type conflicts with the inferred one.
    #[error("annotation mismatch for {name}: declared {declared}, inferred {inferred}")]
    AnnotationMismatch {
        name: String,
        declared: MathType,
        inferred: MathType,
    },
}

impl TypeError {
    pub fn type_mismatch(expected: MathType, found: MathType) -> Self {
        TypeError::TypeMismatch { expected, found }
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        TypeError::UndefinedVariable { name: name.into() }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        TypeError::InvalidOperation {
            message: message.into(),
        }
    }
}

impl From<UnifyError> for TypeError {
    fn from(err: UnifyError) -> Self {
        match err {
            UnifyError::Mismatch { left, right } => TypeError::UnificationFailure { left, right },
            UnifyError::OccursCheck { var, ty } => TypeError::OccursCheck { var, ty },
            UnifyError::BoundViolation { bound, ty, .. } => TypeError::TypeMismatch {
                expected: bound,
                found: ty,
            },
        }
    }
}
