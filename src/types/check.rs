use thiserror::Error;

use super::env::TypeEnv;
use super::infer::Infer;
use super::report::{Diagnostic, format_diagnostics};
use super::ty::MathType;
use crate::expr::Expr;

/// Every diagnostic raised while checking one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_diagnostics(.diagnostics))]
pub struct CheckError {
    pub diagnostics: Vec<Diagnostic>,
}

/// Type check an expression
///
/// This performs one full inference pass over `expr` with a fresh checker,
/// either in the given environment or in [`TypeEnv::standard`]. All
/// diagnostics of the pass are returned together; on success the type is
/// returned with every resolved variable substituted.
///
/// # Arguments
///
/// * `expr` - The expression to check; its type slots are filled in
/// * `env` - The symbol table, or `None` for the standard vocabulary
///
/// # Returns
///
/// * `Ok(MathType)` - The type of `expr`
/// * `Err(CheckError)` - Every diagnostic of the pass, in traversal order
pub fn type_check(expr: &Expr, env: Option<TypeEnv>) -> Result<MathType, CheckError> {
    let mut infer = Infer::with_env(env.unwrap_or_else(TypeEnv::standard));
    let ty = infer.infer(expr);
    let ty = infer.resolve(&ty);

    let reporter = infer.finish();
    if reporter.has_errors() {
        Err(CheckError {
            diagnostics: reporter.into_errors(),
        })
    } else {
        Ok(ty)
    }
}

pub fn is_well_typed(expr: &Expr, env: Option<TypeEnv>) -> bool {
    type_check(expr, env).is_ok()
}
