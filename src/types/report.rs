use std::fmt;

use lachs::Span;
use log::debug;

use super::error::TypeError;
use crate::expr::Expr;

/// A recorded failure: what went wrong, where, and on which expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: TypeError,
    /// Rendering of the offending expression.
    pub expr: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(error: TypeError, expr: &Expr) -> Self {
        Diagnostic {
            error,
            expr: expr.to_string(),
            span: expr.position().clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = format!("{}\n  in `{}`", self.error, self.expr);
        if self.span.source.is_empty() {
            write!(f, "Type error: {}", msg)
        } else {
            write!(f, "{}", self.span.to_string(&msg))
        }
    }
}

/// Collects the diagnostics of one checking pass, in the order they were
/// raised. Nothing recorded is ever dropped.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic for `error`, raised on `expr`.
    ///
    /// The expression is rendered and its position copied at this point, so
    /// the diagnostic does not borrow the tree.
    pub fn record(&mut self, error: TypeError, expr: &Expr) {
        debug!("recording diagnostic on `{}`: {}", expr, error);
        self.diagnostics.push(Diagnostic::new(error, expr));
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Multi-line rendering of every diagnostic, numbered.
    pub fn format(&self) -> String {
        format_diagnostics(&self.diagnostics)
    }
}

pub(crate) fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = match diagnostics.len() {
        0 => return "no type errors".to_string(),
        1 => "1 type error found:".to_string(),
        n => format!("{} type errors found:", n),
    };
    for (i, diagnostic) in diagnostics.iter().enumerate() {
        out.push_str(&format!("\n[{}] {}", i + 1, diagnostic));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{apply, num, var};
    use crate::types::MathType;

    #[test]
    fn test_empty_reporter() {
        let reporter = Reporter::new();
        assert!(!reporter.has_errors());
        assert!(reporter.errors().is_empty());
        assert_eq!(reporter.format(), "no type errors");
    }

    #[test]
    fn test_records_in_order() {
        let mut reporter = Reporter::new();
        reporter.record(TypeError::undefined_variable("x"), &var("x"));
        reporter.record(
            TypeError::type_mismatch(MathType::Nat, MathType::Real),
            &apply(var("F"), num(2.5)),
        );

        assert!(reporter.has_errors());
        assert_eq!(reporter.len(), 2);
        assert_eq!(reporter.errors()[0].error, TypeError::undefined_variable("x"));
        assert_eq!(reporter.errors()[1].expr, "F(2.5)");
    }

    #[test]
    fn test_format_without_location() {
        let mut reporter = Reporter::new();
        reporter.record(
            TypeError::type_mismatch(MathType::Nat, MathType::Real),
            &var("φ"),
        );

        assert_eq!(
            reporter.format(),
            "1 type error found:\n[1] Type error: type mismatch: expected ℕ, found ℝ\n  in `φ`"
        );
    }
}
