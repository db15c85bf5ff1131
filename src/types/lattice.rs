//! # Subtype Lattice
//!
//! The numeric tower `ℕ ⊑ ℤ ⊑ ℝ ⊑ ℂ` extended structurally:
//!
//! ```text
//! Set(A)        ⊑ Set(B)         iff A ⊑ B
//! A → B         ⊑ C → D          iff C ⊑ A and B ⊑ D
//! Matrix(A,r×c) ⊑ Matrix(B,r×c)  iff A ⊑ B
//! Vector(A,n)   ⊑ Vector(B,n)    iff A ⊑ B
//! (A₁ × … × Aₙ) ⊑ (B₁ × … × Bₙ)  iff Aᵢ ⊑ Bᵢ for all i
//! ```
//!
//! Promotion (`⊔`) is the least upper bound used for the result type of a
//! binary operation. It is total on the numeric tower, lifts through `Set`,
//! and is undefined for everything else.

use super::ty::MathType;

/// Comparisons produce `0`/`1` naturals; there is no dedicated boolean type.
pub const BOOLEAN: MathType = MathType::Nat;

/// Position of a numeric type in the tower, `None` for anything else.
pub fn numeric_rank(ty: &MathType) -> Option<u8> {
    match ty {
        MathType::Nat => Some(0),
        MathType::Int => Some(1),
        MathType::Real => Some(2),
        MathType::Complex => Some(3),
        _ => None,
    }
}

pub fn type_equals(a: &MathType, b: &MathType) -> bool {
    a == b
}

/// Decide `a ⊑ b`.
///
/// A type variable is only related to itself, unless it carries an upper
/// bound, in which case `τ <: B ⊑ T` whenever `B ⊑ T`.
pub fn is_subtype(a: &MathType, b: &MathType) -> bool {
    if type_equals(a, b) {
        return true;
    }

    match (a, b) {
        (MathType::Var(v), _) => v.bound.as_deref().is_some_and(|bound| is_subtype(bound, b)),
        (MathType::Set(x), MathType::Set(y)) => is_subtype(x, y),
        (MathType::Function(d1, c1), MathType::Function(d2, c2)) => {
            is_subtype(d2, d1) && is_subtype(c1, c2)
        }
        (
            MathType::Matrix { base: b1, rows: r1, cols: c1 },
            MathType::Matrix { base: b2, rows: r2, cols: c2 },
        ) => r1 == r2 && c1 == c2 && is_subtype(b1, b2),
        (MathType::Vector { base: b1, dim: d1 }, MathType::Vector { base: b2, dim: d2 }) => {
            d1 == d2 && is_subtype(b1, b2)
        }
        (MathType::Tuple(xs), MathType::Tuple(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| is_subtype(x, y))
        }
        _ => match (numeric_rank(a), numeric_rank(b)) {
            (Some(ra), Some(rb)) => ra <= rb,
            _ => false,
        },
    }
}

/// Least upper bound of two types, `None` when no rule applies.
///
/// A bare type variable on exactly one side yields the concrete side. This
/// drops the constraint that the variable equals that type; callers that
/// need it must unify separately.
pub fn promote(a: &MathType, b: &MathType) -> Option<MathType> {
    if type_equals(a, b) {
        return Some(a.clone());
    }

    if let (Some(ra), Some(rb)) = (numeric_rank(a), numeric_rank(b)) {
        return Some(if ra >= rb { a.clone() } else { b.clone() });
    }

    match (a, b) {
        (MathType::Var(_), MathType::Var(_)) => None,
        (MathType::Var(_), concrete) | (concrete, MathType::Var(_)) => Some(concrete.clone()),
        (MathType::Set(x), MathType::Set(y)) => promote(x, y).map(MathType::set),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ty::TypeVar;

    const TOWER: [MathType; 4] = [MathType::Nat, MathType::Int, MathType::Real, MathType::Complex];

    #[test]
    fn test_numeric_chain() {
        for (i, a) in TOWER.iter().enumerate() {
            for (j, b) in TOWER.iter().enumerate() {
                assert_eq!(is_subtype(a, b), i <= j, "{} ⊑ {}", a, b);
            }
        }
    }

    #[test]
    fn test_set_is_covariant() {
        assert!(is_subtype(&MathType::set(MathType::Nat), &MathType::set(MathType::Real)));
        assert!(!is_subtype(&MathType::set(MathType::Real), &MathType::set(MathType::Nat)));
    }

    #[test]
    fn test_function_variance() {
        let narrow = MathType::func(MathType::Real, MathType::Nat);
        let wide = MathType::func(MathType::Nat, MathType::Real);
        assert!(is_subtype(&narrow, &wide));
        assert!(!is_subtype(&wide, &narrow));
    }

    #[test]
    fn test_matrix_requires_same_shape() {
        let a = MathType::matrix(MathType::Nat, 2, 3);
        assert!(is_subtype(&a, &MathType::matrix(MathType::Real, 2, 3)));
        assert!(!is_subtype(&a, &MathType::matrix(MathType::Real, 3, 2)));
    }

    #[test]
    fn test_vector_requires_same_dim() {
        let a = MathType::vector(MathType::Int, 3);
        assert!(is_subtype(&a, &MathType::vector(MathType::Complex, 3)));
        assert!(!is_subtype(&a, &MathType::vector(MathType::Complex, 2)));
    }

    #[test]
    fn test_tuple_pointwise() {
        let a = MathType::Tuple(vec![MathType::Nat, MathType::Real]);
        let b = MathType::Tuple(vec![MathType::Int, MathType::Complex]);
        assert!(is_subtype(&a, &b));
        assert!(!is_subtype(&b, &a));
        assert!(!is_subtype(&a, &MathType::Tuple(vec![MathType::Int])));
    }

    #[test]
    fn test_var_subtyping() {
        let free = MathType::var("τ0");
        assert!(is_subtype(&free, &free));
        assert!(!is_subtype(&free, &MathType::Complex));

        let bounded = MathType::Var(TypeVar::bounded("τ1", MathType::Int));
        assert!(is_subtype(&bounded, &MathType::Real));
        assert!(!is_subtype(&bounded, &MathType::Nat));
    }

    #[test]
    fn test_structural_constructors_unrelated() {
        assert!(!is_subtype(&MathType::set(MathType::Nat), &MathType::Nat));
        assert!(!is_subtype(
            &MathType::vector(MathType::Nat, 1),
            &MathType::Tuple(vec![MathType::Nat])
        ));
    }

    #[test]
    fn test_promote_numeric() {
        assert_eq!(promote(&MathType::Nat, &MathType::Real), Some(MathType::Real));
        assert_eq!(promote(&MathType::Complex, &MathType::Int), Some(MathType::Complex));
        assert_eq!(promote(&MathType::Int, &MathType::Int), Some(MathType::Int));
    }

    #[test]
    fn test_promote_sets() {
        assert_eq!(
            promote(&MathType::set(MathType::Nat), &MathType::set(MathType::Int)),
            Some(MathType::set(MathType::Int))
        );
        assert_eq!(
            promote(
                &MathType::set(MathType::Nat),
                &MathType::set(MathType::set(MathType::Nat))
            ),
            None
        );
    }

    #[test]
    fn test_promote_var_prefers_concrete_side() {
        let v = MathType::var("τ0");
        assert_eq!(promote(&v, &MathType::Real), Some(MathType::Real));
        assert_eq!(promote(&MathType::Nat, &v), Some(MathType::Nat));
        assert_eq!(promote(&v, &MathType::var("τ1")), None);
    }

    #[test]
    fn test_promote_mixed_constructors_undefined() {
        assert_eq!(promote(&MathType::Nat, &MathType::set(MathType::Nat)), None);
        assert_eq!(
            promote(
                &MathType::vector(MathType::Nat, 2),
                &MathType::vector(MathType::Real, 2)
            ),
            None
        );
    }

    #[test]
    fn test_boolean_is_nat() {
        assert_eq!(BOOLEAN, MathType::Nat);
    }
}
