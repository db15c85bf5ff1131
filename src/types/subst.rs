use std::collections::HashMap;

use super::ty::MathType;

/// A finite map from type-variable names to types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub HashMap<String, MathType>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: impl Into<String>, ty: MathType) -> Self {
        let mut map = HashMap::new();
        map.insert(var.into(), ty);
        Substitution(map)
    }

    pub fn lookup(&self, var: &str) -> Option<&MathType> {
        self.0.get(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn apply(&self, ty: &MathType) -> MathType {
        match ty {
            MathType::Nat | MathType::Int | MathType::Real | MathType::Complex => ty.clone(),
            MathType::Var(v) => self.0.get(&v.name).cloned().unwrap_or_else(|| ty.clone()),
            MathType::Set(element) => MathType::set(self.apply(element)),
            MathType::Function(domain, codomain) => {
                MathType::func(self.apply(domain), self.apply(codomain))
            }
            MathType::Matrix { base, rows, cols } => MathType::matrix(self.apply(base), *rows, *cols),
            MathType::Vector { base, dim } => MathType::vector(self.apply(base), *dim),
            MathType::Tuple(elements) => {
                MathType::Tuple(elements.iter().map(|t| self.apply(t)).collect())
            }
        }
    }

    /// Apply `other` to every stored type, then add `other`'s bindings for
    /// keys not already present.
    ///
    /// `self.compose(other).apply(t) == other.apply(&self.apply(t))`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = HashMap::new();

        for (var, ty) in &self.0 {
            result.insert(var.clone(), other.apply(ty));
        }

        // A key bound by both sides means the caller unified the same
        // variable twice; the existing binding wins.
        for (var, ty) in &other.0 {
            if !result.contains_key(var) {
                result.insert(var.clone(), ty.clone());
            }
        }

        Substitution(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        let ty = MathType::set(MathType::Nat);
        assert_eq!(subst.apply(&ty), ty);
    }

    #[test]
    fn test_singleton_substitution() {
        let subst = Substitution::singleton("τ0", MathType::Int);
        assert_eq!(subst.apply(&MathType::var("τ0")), MathType::Int);
    }

    #[test]
    fn test_apply_to_structural() {
        let subst = Substitution::singleton("τ0", MathType::Real);
        let ty = MathType::Tuple(vec![
            MathType::func(MathType::var("τ0"), MathType::Nat),
            MathType::matrix(MathType::var("τ0"), 2, 2),
            MathType::vector(MathType::set(MathType::var("τ0")), 3),
        ]);
        let expected = MathType::Tuple(vec![
            MathType::func(MathType::Real, MathType::Nat),
            MathType::matrix(MathType::Real, 2, 2),
            MathType::vector(MathType::set(MathType::Real), 3),
        ]);
        assert_eq!(subst.apply(&ty), expected);
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let subst = Substitution::singleton("τ0", MathType::Int);
        assert_eq!(subst.apply(&MathType::var("τ1")), MathType::var("τ1"));
    }

    #[test]
    fn test_compose_substitutions() {
        let s1 = Substitution::singleton("τ0", MathType::var("τ1"));
        let s2 = Substitution::singleton("τ1", MathType::Int);

        let composed = s1.compose(&s2);

        assert_eq!(composed.apply(&MathType::var("τ0")), MathType::Int);
        assert_eq!(composed.apply(&MathType::var("τ1")), MathType::Int);
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let s1 = Substitution::singleton("τ0", MathType::set(MathType::var("τ1")));
        let s2 = Substitution::singleton("τ1", MathType::Complex);
        let ty = MathType::func(MathType::var("τ0"), MathType::var("τ1"));

        assert_eq!(s1.compose(&s2).apply(&ty), s2.apply(&s1.apply(&ty)));
    }

    #[test]
    fn test_substitution_idempotent() {
        let subst = Substitution::singleton("τ0", MathType::Int)
            .compose(&Substitution::singleton("τ1", MathType::set(MathType::Nat)));
        let ty = MathType::Tuple(vec![MathType::var("τ0"), MathType::var("τ1")]);

        let once = subst.apply(&ty);
        let twice = subst.apply(&once);
        assert_eq!(once, twice);
    }
}
