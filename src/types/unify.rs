use log::trace;
use thiserror::Error;

use super::lattice::{is_subtype, type_equals};
use super::subst::Substitution;
use super::ty::{MathType, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("cannot unify {left} with {right}")]
    Mismatch { left: MathType, right: MathType },
    #[error("occurs check: cannot construct infinite type {var} = {ty}")]
    OccursCheck { var: String, ty: MathType },
    #[error("{ty} does not satisfy the bound {bound} of {var}")]
    BoundViolation {
        var: String,
        bound: MathType,
        ty: MathType,
    },
}

/// Check if a type variable occurs within a type (occurs check).
///
/// Binding `τ0 := Set(τ0)` would describe an infinite type, so unification
/// refuses any binding whose right-hand side mentions the variable itself,
/// however deeply it is nested:
///
/// ```text
/// occurs_in(τ0, ℕ)                 = false
/// occurs_in(τ0, τ0)                = true
/// occurs_in(τ0, τ0 → ℕ)            = true
/// occurs_in(τ0, (ℕ × Vector(τ0,3))) = true
/// occurs_in(τ0, τ1 → τ2)           = false
/// ```
pub fn occurs_in(var: &str, ty: &MathType) -> bool {
    match ty {
        MathType::Nat | MathType::Int | MathType::Real | MathType::Complex => false,
        MathType::Var(v) => v.name == var || v.bound.as_deref().is_some_and(|b| occurs_in(var, b)),
        MathType::Set(element) => occurs_in(var, element),
        MathType::Function(domain, codomain) => occurs_in(var, domain) || occurs_in(var, codomain),
        MathType::Matrix { base, .. } | MathType::Vector { base, .. } => occurs_in(var, base),
        MathType::Tuple(elements) => elements.iter().any(|t| occurs_in(var, t)),
    }
}

/// Incremental unifier threading one substitution through many equations.
///
/// Every call to [`Unifier::unify`] first resolves both sides under the
/// bindings collected so far. A failed call leaves the substitution exactly
/// as it was before the call.
#[derive(Debug, Clone, Default)]
pub struct Unifier {
    subst: Substitution,
}

impl Unifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn substitution(&self) -> &Substitution {
        &self.subst
    }

    pub fn into_substitution(self) -> Substitution {
        self.subst
    }

    pub fn resolve(&self, ty: &MathType) -> MathType {
        self.subst.apply(ty)
    }

    /// Unify two types, extending the substitution on success.
    ///
    /// ## Algorithm
    ///
    /// ```text
    /// Unify(S(a), S(b)) where S is the substitution so far:
    ///   S(a) = S(b)                       → done
    ///   either side a variable            → UnifyVar
    ///   Set(x), Set(y)                    → Unify(x, y)
    ///   x₁ → y₁, x₂ → y₂                  → Unify(x₁, x₂); Unify(y₁, y₂)
    ///   Matrix(x, r×c), Matrix(y, r×c)    → Unify(x, y)
    ///   Vector(x, n), Vector(y, n)        → Unify(x, y)
    ///   (x₁ … xₙ), (y₁ … yₙ)              → Unify(xᵢ, yᵢ) for each i
    ///   anything else                     → Mismatch
    /// ```
    ///
    /// Constructor, dimension and arity mismatches are terminal.
    pub fn unify(&mut self, t1: &MathType, t2: &MathType) -> Result<(), UnifyError> {
        let snapshot = self.subst.clone();
        let result = self.unify_inner(t1, t2);
        if result.is_err() {
            self.subst = snapshot;
        }
        result
    }

    fn unify_inner(&mut self, t1: &MathType, t2: &MathType) -> Result<(), UnifyError> {
        let left = self.subst.apply(t1);
        let right = self.subst.apply(t2);

        if type_equals(&left, &right) {
            return Ok(());
        }

        match (&left, &right) {
            (MathType::Var(v), other) | (other, MathType::Var(v)) => self.unify_var(v, other),

            (MathType::Set(x), MathType::Set(y)) => self.unify_inner(x, y),

            (MathType::Function(d1, c1), MathType::Function(d2, c2)) => {
                self.unify_inner(d1, d2)?;
                self.unify_inner(c1, c2)
            }

            (
                MathType::Matrix { base: b1, rows: r1, cols: c1 },
                MathType::Matrix { base: b2, rows: r2, cols: c2 },
            ) if r1 == r2 && c1 == c2 => self.unify_inner(b1, b2),

            (MathType::Vector { base: b1, dim: d1 }, MathType::Vector { base: b2, dim: d2 })
                if d1 == d2 =>
            {
                self.unify_inner(b1, b2)
            }

            (MathType::Tuple(xs), MathType::Tuple(ys)) if xs.len() == ys.len() => {
                for (x, y) in xs.iter().zip(ys) {
                    self.unify_inner(x, y)?;
                }
                Ok(())
            }

            _ => Err(UnifyError::Mismatch {
                left: left.clone(),
                right: right.clone(),
            }),
        }
    }

    /// Bind a type variable to a type.
    ///
    /// Binding a variable to itself is a no-op. Between two variables the
    /// binding points the unbounded one at the bounded one, so the bound
    /// survives; two bounded variables must have compatible bounds. Any other
    /// type must pass the occurs check and satisfy `var`'s bound.
    ///
    /// # Arguments
    ///
    /// * `var` - The variable to bind, already resolved under the current
    ///   substitution
    /// * `ty` - The type to bind it to, likewise resolved
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The substitution now maps `var` (or `ty`, when it is the
    ///   unbounded variable) accordingly
    /// * `Err(UnifyError::OccursCheck)` - `ty` mentions `var`
    /// * `Err(UnifyError::BoundViolation)` - `ty` is not below `var`'s bound
    ///
    /// # Examples
    ///
    /// ```
    /// use mathtype::types::{MathType, TypeVar, Unifier, UnifyError};
    ///
    /// let mut unifier = Unifier::new();
    /// let real_bounded = TypeVar::bounded("τ0", MathType::Real);
    ///
    /// assert!(unifier.unify_var(&real_bounded, &MathType::Int).is_ok());
    /// assert_eq!(unifier.resolve(&MathType::var("τ0")), MathType::Int);
    ///
    /// let mut unifier = Unifier::new();
    /// assert!(matches!(
    ///     unifier.unify_var(&real_bounded, &MathType::Complex),
    ///     Err(UnifyError::BoundViolation { .. })
    /// ));
    /// ```
    pub fn unify_var(&mut self, var: &TypeVar, ty: &MathType) -> Result<(), UnifyError> {
        if let MathType::Var(other) = ty {
            if other.name == var.name {
                return Ok(());
            }
            // Keep whichever variable carries the tighter bound.
            return match (&var.bound, &other.bound) {
                (Some(_), None) => {
                    self.bind(&other.name, MathType::Var(var.clone()));
                    Ok(())
                }
                (Some(bound), Some(other_bound)) if !is_subtype(other_bound, bound) => {
                    Err(UnifyError::BoundViolation {
                        var: var.name.clone(),
                        bound: (**bound).clone(),
                        ty: ty.clone(),
                    })
                }
                _ => {
                    self.bind(&var.name, ty.clone());
                    Ok(())
                }
            };
        }

        if occurs_in(&var.name, ty) {
            return Err(UnifyError::OccursCheck {
                var: var.name.clone(),
                ty: ty.clone(),
            });
        }

        if let Some(bound) = &var.bound {
            if !is_subtype(ty, bound) {
                return Err(UnifyError::BoundViolation {
                    var: var.name.clone(),
                    bound: (**bound).clone(),
                    ty: ty.clone(),
                });
            }
        }

        self.bind(&var.name, ty.clone());
        Ok(())
    }

    fn bind(&mut self, name: &str, ty: MathType) {
        trace!("binding {} := {}", name, ty);
        self.subst = self.subst.compose(&Substitution::singleton(name, ty));
    }
}

/// Unify two types from scratch, returning the most general substitution.
///
/// # Arguments
///
/// * `t1` - First type to unify
/// * `t2` - Second type to unify
///
/// # Returns
///
/// * `Ok(Substitution)` - A substitution that makes `t1` equal to `t2`
/// * `Err(UnifyError::Mismatch)` - Different constructors or shapes, e.g.
///   `ℕ` against `Set(ℕ)`, or `ℕ` against `ℤ` (subtyping is not equality)
/// * `Err(UnifyError::OccursCheck)` - Would create an infinite type
/// * `Err(UnifyError::BoundViolation)` - A bounded variable met a type
///   outside its bound
pub fn unify(t1: &MathType, t2: &MathType) -> Result<Substitution, UnifyError> {
    let mut unifier = Unifier::new();
    unifier.unify(t1, t2)?;
    Ok(unifier.into_substitution())
}
