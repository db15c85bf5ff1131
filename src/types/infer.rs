//! # Inference Engine
//!
//! Bottom-up type inference over [`Expr`] trees against the subtype lattice.
//!
//! ## Rules
//!
//! ```text
//! n ≥ 0 integral      : ℕ            √e    : ℂ if e : ℂ, else ℝ
//! n < 0 integral      : ℤ            -e    : ℤ if e : ℕ, else type of e
//! non-integral        : ℝ            sin e : ℝ   (cos tan exp ln abs alike)
//! a + bi              : ℂ
//!
//! a ∘ b   (∘ ∈ + - * /) : a ⊔ b
//! a ^ b                 : a ⊔ b, both operands numeric or variable
//! a ~ b   (~ ∈ = < > ≤ ≥): BOOLEAN (ℕ)
//!
//! F(x)    F : A → B, x ⊑ A          : B
//!         F : τ → B                 : S(B) where S = unify(τ, type of x)
//! λx: A. e                          : A → type of e      (A fresh if absent)
//! let x: A = v in e                 : type of e, v ⊑ A
//! if c then a else b                : a ⊔ b              (c unconstrained)
//! (e₁, …, eₙ)                       : (T₁ × … × Tₙ)
//! [e₁, …, eₙ]                       : Vector(T₁ ⊔ … ⊔ Tₙ, n)
//! [[…], …] (r rows of c)            : Matrix(⊔ cells, r×c)
//! {e₁, …, eₙ}                       : Set(T₁ ⊔ … ⊔ Tₙ)
//! {e | x ∈ S, c}  S : Set(A)        : Set(type of e with x : A)
//! ```
//!
//! ## Error recovery
//!
//! Each rule fails fast with a [`TypeError`]. The per-node driver records
//! the error in the [`Reporter`] and hands the parent a placeholder type
//! variable instead, so sibling subtrees are still checked. Placeholders
//! conform to any expected type, which keeps one root cause from producing
//! a cascade of follow-up diagnostics.

use std::collections::HashSet;
use std::rc::Rc;

use log::debug;

use super::env::TypeEnv;
use super::error::TypeError;
use super::lattice::{BOOLEAN, is_subtype, promote};
use super::report::Reporter;
use super::subst::Substitution;
use super::ty::MathType;
use super::unify::Unifier;
use crate::expr::*;

/// One checking run: its scope chain, substitution, fresh-variable counter
/// and diagnostics. Independent runs must use independent instances.
pub struct Infer {
    env: Rc<TypeEnv>,
    unifier: Unifier,
    reporter: Reporter,
    next_var: usize,
    placeholders: HashSet<String>,
}

impl Infer {
    /// A run against the standard vocabulary.
    pub fn new() -> Self {
        Self::with_env(TypeEnv::standard())
    }

    /// A run against a caller-supplied environment.
    ///
    /// Fresh variables are numbered past every `τN` already mentioned by
    /// `env`, so inference never aliases a variable the caller introduced.
    pub fn with_env(env: TypeEnv) -> Self {
        let next_var = env
            .free_type_vars()
            .iter()
            .filter_map(|name| name.strip_prefix('τ')?.parse::<usize>().ok())
            .map(|n| n + 1)
            .max()
            .unwrap_or(0);

        Infer {
            env: Rc::new(env),
            unifier: Unifier::new(),
            reporter: Reporter::new(),
            next_var,
            placeholders: HashSet::new(),
        }
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn substitution(&self) -> &Substitution {
        self.unifier.substitution()
    }

    pub fn resolve(&self, ty: &MathType) -> MathType {
        self.unifier.resolve(ty)
    }

    /// End the run, handing over everything it recorded.
    pub fn finish(self) -> Reporter {
        self.reporter
    }

    /// Infer the type of `expr` in the root scope.
    pub fn infer(&mut self, expr: &Expr) -> MathType {
        let env = Rc::clone(&self.env);
        self.infer_in(&env, expr)
    }

    /// Infer the type of `expr` and require it to fit `expected`.
    ///
    /// Returns the inferred type when it does, so a narrower type is never
    /// widened. On a mismatch the error is recorded and `expected` is
    /// returned so the caller can carry on.
    pub fn check(&mut self, expr: &Expr, expected: &MathType) -> MathType {
        let env = Rc::clone(&self.env);
        self.check_in(&env, expr, expected)
    }

    fn fresh_var(&mut self) -> MathType {
        let id = self.next_var;
        self.next_var += 1;
        MathType::var(format!("τ{}", id))
    }

    fn placeholder(&mut self) -> MathType {
        let ty = self.fresh_var();
        if let MathType::Var(v) = &ty {
            self.placeholders.insert(v.name.clone());
        }
        ty
    }

    fn is_placeholder(&self, ty: &MathType) -> bool {
        ty.as_var().is_some_and(|v| self.placeholders.contains(&v.name))
    }

    fn infer_in(&mut self, env: &Rc<TypeEnv>, expr: &Expr) -> MathType {
        let ty = match self.infer_expr(env, expr) {
            Ok(ty) => self.unifier.resolve(&ty),
            Err(err) => {
                self.reporter.record(err, expr);
                self.placeholder()
            }
        };
        debug!("inferred `{}` : {}", expr, ty);
        expr.info().set(ty.clone());
        ty
    }

    fn check_in(&mut self, env: &Rc<TypeEnv>, expr: &Expr, expected: &MathType) -> MathType {
        let found = self.infer_in(env, expr);
        let expected = self.unifier.resolve(expected);
        if self.conform(&found, &expected) {
            return self.unifier.resolve(&found);
        }
        self.reporter
            .record(TypeError::type_mismatch(expected.clone(), found), expr);
        expected
    }

    /// Whether `found` may stand where `expected` is required. When the
    /// subtype test fails and either side still mentions type variables,
    /// the two are unified instead.
    fn conform(&mut self, found: &MathType, expected: &MathType) -> bool {
        if self.is_placeholder(found) || is_subtype(found, expected) {
            return true;
        }
        if found.free_type_vars().is_empty() && expected.free_type_vars().is_empty() {
            return false;
        }
        self.unifier.unify(found, expected).is_ok()
    }

    /// Least upper bound for combining operands, elements or branches.
    fn join(&mut self, a: &MathType, b: &MathType) -> Option<MathType> {
        if self.is_placeholder(a) {
            return Some(b.clone());
        }
        if self.is_placeholder(b) {
            return Some(a.clone());
        }
        if let Some(ty) = promote(a, b) {
            return Some(ty);
        }
        if a.is_var() && b.is_var() {
            self.unifier.unify(a, b).ok()?;
            return Some(self.unifier.resolve(a));
        }
        None
    }

    fn join_all(&mut self, types: &[MathType]) -> Result<MathType, TypeError> {
        let Some((first, rest)) = types.split_first() else {
            return Ok(self.fresh_var());
        };
        let mut acc = first.clone();
        for ty in rest {
            acc = self.join(&acc, ty).ok_or_else(|| {
                TypeError::invalid_operation(format!("no common type for {} and {}", acc, ty))
            })?;
        }
        Ok(acc)
    }

    fn infer_expr(&mut self, env: &Rc<TypeEnv>, expr: &Expr) -> Result<MathType, TypeError> {
        match expr {
            Expr::Literal(lit) => infer_literal(lit),

            Expr::Variable(v) => env
                .lookup(&v.name)
                .map(|ty| self.unifier.resolve(ty))
                .ok_or_else(|| TypeError::undefined_variable(&v.name)),

            Expr::BinaryOp(binop) => self.infer_binop(env, binop),

            Expr::UnaryOp(unop) => self.infer_unop(env, unop),

            Expr::Application(app) => self.infer_application(env, app),

            Expr::Lambda(lambda) => self.infer_lambda(env, lambda),

            Expr::Let(binding) => self.infer_let(env, binding, expr),

            Expr::Conditional(c) => {
                self.infer_in(env, &c.condition);
                let then_ty = self.infer_in(env, &c.then_branch);
                let else_ty = self.infer_in(env, &c.else_branch);
                self.join(&then_ty, &else_ty)
                    .ok_or(TypeError::UnificationFailure {
                        left: then_ty,
                        right: else_ty,
                    })
            }

            Expr::Tuple(t) => Ok(MathType::Tuple(
                t.elements.iter().map(|e| self.infer_in(env, e)).collect(),
            )),

            Expr::Vector(v) => {
                let types: Vec<_> = v.elements.iter().map(|e| self.infer_in(env, e)).collect();
                let base = self.join_all(&types)?;
                Ok(MathType::vector(base, types.len()))
            }

            Expr::Matrix(m) => self.infer_matrix(env, m),

            Expr::Set(s) => {
                let types: Vec<_> = s.elements.iter().map(|e| self.infer_in(env, e)).collect();
                Ok(MathType::set(self.join_all(&types)?))
            }

            Expr::SetComprehension(c) => self.infer_comprehension(env, c),
        }
    }

    fn infer_binop(&mut self, env: &Rc<TypeEnv>, binop: &BinaryOp) -> Result<MathType, TypeError> {
        let left = self.infer_in(env, &binop.left);
        let right = self.infer_in(env, &binop.right);

        let invalid = || {
            TypeError::invalid_operation(format!(
                "cannot apply {} to {} and {}",
                binop.op.symbol(),
                left,
                right
            ))
        };

        let numeric_or_var = |ty: &MathType| ty.is_numeric() || ty.is_var();

        match binop.op {
            op if op.is_comparison() => {
                if numeric_or_var(&left) && numeric_or_var(&right) {
                    Ok(BOOLEAN)
                } else {
                    Err(invalid())
                }
            }
            BinOpKind::Pow => {
                if !(numeric_or_var(&left) && numeric_or_var(&right)) {
                    return Err(invalid());
                }
                self.join(&left, &right).ok_or_else(invalid)
            }
            _ => self.join(&left, &right).ok_or_else(invalid),
        }
    }

    fn infer_unop(&mut self, env: &Rc<TypeEnv>, unop: &UnaryOp) -> Result<MathType, TypeError> {
        let operand = self.infer_in(env, &unop.operand);

        if !(operand.is_numeric() || operand.is_var()) {
            return Err(TypeError::invalid_operation(format!(
                "cannot apply {} to {}",
                unop.op.symbol(),
                operand
            )));
        }

        Ok(match unop.op {
            UnaryOpKind::Neg if operand == MathType::Nat => MathType::Int,
            UnaryOpKind::Neg => operand,
            UnaryOpKind::Sqrt if operand == MathType::Complex => MathType::Complex,
            UnaryOpKind::Sqrt
            | UnaryOpKind::Sin
            | UnaryOpKind::Cos
            | UnaryOpKind::Tan
            | UnaryOpKind::Exp
            | UnaryOpKind::Ln
            | UnaryOpKind::Abs => MathType::Real,
        })
    }

    fn infer_application(
        &mut self,
        env: &Rc<TypeEnv>,
        app: &Application,
    ) -> Result<MathType, TypeError> {
        let func_ty = self.infer_in(env, &app.func);

        match func_ty {
            MathType::Function(domain, codomain) if domain.is_var() => {
                let arg_ty = self.infer_in(env, &app.arg);
                self.unifier.unify(&domain, &arg_ty)?;
                Ok(self.unifier.resolve(&codomain))
            }
            MathType::Function(domain, codomain) => {
                self.check_in(env, &app.arg, &domain);
                Ok(*codomain)
            }
            MathType::Var(_) => {
                let arg_ty = self.infer_in(env, &app.arg);
                let result = self.fresh_var();
                self.unifier
                    .unify(&func_ty, &MathType::func(arg_ty, result.clone()))?;
                Ok(self.unifier.resolve(&result))
            }
            other => {
                self.infer_in(env, &app.arg);
                Err(TypeError::invalid_operation(format!(
                    "cannot apply a value of type {} as a function",
                    other
                )))
            }
        }
    }

    fn infer_lambda(&mut self, env: &Rc<TypeEnv>, lambda: &Lambda) -> Result<MathType, TypeError> {
        let param_ty = match &lambda.annotation {
            Some(ty) => ty.clone(),
            None => self.fresh_var(),
        };

        let mut scope = TypeEnv::extend(env);
        scope.bind(&lambda.param, param_ty.clone());
        let body_ty = self.infer_in(&Rc::new(scope), &lambda.body);

        Ok(MathType::func(self.unifier.resolve(&param_ty), body_ty))
    }

    fn infer_let(
        &mut self,
        env: &Rc<TypeEnv>,
        binding: &Let,
        expr: &Expr,
    ) -> Result<MathType, TypeError> {
        let value_ty = self.infer_in(env, &binding.value);

        let bound_ty = match &binding.annotation {
            Some(declared) => {
                if !self.conform(&value_ty, declared) {
                    self.reporter.record(
                        TypeError::AnnotationMismatch {
                            name: binding.name.clone(),
                            declared: declared.clone(),
                            inferred: value_ty,
                        },
                        expr,
                    );
                }
                declared.clone()
            }
            None => value_ty,
        };

        let mut scope = TypeEnv::extend(env);
        scope.bind(&binding.name, bound_ty);
        Ok(self.infer_in(&Rc::new(scope), &binding.body))
    }

    fn infer_matrix(
        &mut self,
        env: &Rc<TypeEnv>,
        matrix: &MatrixLiteral,
    ) -> Result<MathType, TypeError> {
        let cols = matrix.rows.first().map_or(0, Vec::len);
        for (i, row) in matrix.rows.iter().enumerate() {
            if row.len() != cols {
                return Err(TypeError::DimensionMismatch {
                    context: format!("matrix row {}", i + 1),
                    expected: cols,
                    found: row.len(),
                });
            }
        }

        let types: Vec<_> = matrix
            .rows
            .iter()
            .flatten()
            .map(|cell| self.infer_in(env, cell))
            .collect();
        let base = self.join_all(&types)?;
        Ok(MathType::matrix(base, matrix.rows.len(), cols))
    }

    fn infer_comprehension(
        &mut self,
        env: &Rc<TypeEnv>,
        comp: &SetComprehension,
    ) -> Result<MathType, TypeError> {
        let domain_ty = self.infer_in(env, &comp.domain);

        let element = match domain_ty {
            MathType::Set(element) => *element,
            MathType::Var(_) => {
                let element = self.fresh_var();
                self.unifier
                    .unify(&domain_ty, &MathType::set(element.clone()))?;
                self.unifier.resolve(&element)
            }
            other => {
                return Err(TypeError::invalid_operation(format!(
                    "cannot draw {} from a value of type {}",
                    comp.var, other
                )));
            }
        };

        let mut scope = TypeEnv::extend(env);
        scope.bind(&comp.var, element);
        let scope = Rc::new(scope);

        if let Some(condition) = &comp.condition {
            self.infer_in(&scope, condition);
        }
        let body_ty = self.infer_in(&scope, &comp.body);
        Ok(MathType::set(body_ty))
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}

fn infer_literal(lit: &Literal) -> Result<MathType, TypeError> {
    match lit.value {
        LiteralValue::Number(n) if !n.is_finite() => Err(TypeError::invalid_operation(format!(
            "non-finite literal {}",
            n
        ))),
        LiteralValue::Number(n) if n.fract() == 0.0 && n < 0.0 => Ok(MathType::Int),
        LiteralValue::Number(n) if n.fract() == 0.0 => Ok(MathType::Nat),
        LiteralValue::Number(_) => Ok(MathType::Real),
        LiteralValue::Complex { re, im } if !(re.is_finite() && im.is_finite()) => Err(
            TypeError::invalid_operation(format!("non-finite literal {}", lit.value)),
        ),
        LiteralValue::Complex { .. } => Ok(MathType::Complex),
    }
}
