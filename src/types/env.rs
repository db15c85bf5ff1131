use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::ty::MathType;

/// A chain of lexical scopes mapping names to types.
///
/// Bindings are only ever written into the innermost scope. Children hold a
/// shared reference to their parent, so shadowing a name never touches the
/// enclosing scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, MathType>,
    parent: Option<Rc<TypeEnv>>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_bindings(bindings: Vec<(String, MathType)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
            parent: None,
        }
    }

    /// The built-in vocabulary of the surrounding framework: the usual
    /// constants plus the integer sequence generators.
    pub fn standard() -> Self {
        let nat_seq = MathType::func(MathType::Nat, MathType::Nat);
        TypeEnv::with_bindings(vec![
            ("φ".to_string(), MathType::Real),
            ("π".to_string(), MathType::Real),
            ("e".to_string(), MathType::Real),
            ("i".to_string(), MathType::Complex),
            ("fib".to_string(), nat_seq.clone()),
            ("lucas".to_string(), nat_seq),
            (
                "zeckendorf".to_string(),
                MathType::func(MathType::Nat, MathType::set(MathType::Nat)),
            ),
        ])
    }

    /// Bind a name in this scope.
    ///
    /// # Arguments
    ///
    /// * `name` - The variable name
    /// * `ty` - Its type
    ///
    /// A binding already present in this scope is replaced. Bindings in
    /// parent scopes are left alone and merely shadowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    ///
    /// use mathtype::types::{MathType, TypeEnv};
    ///
    /// let parent = Rc::new(TypeEnv::standard());
    /// let mut scope = TypeEnv::extend(&parent);
    /// scope.bind("φ", MathType::Nat);
    ///
    /// assert_eq!(scope.lookup("φ"), Some(&MathType::Nat));
    /// assert_eq!(parent.lookup("φ"), Some(&MathType::Real));
    /// ```
    pub fn bind(&mut self, name: impl Into<String>, ty: MathType) {
        self.bindings.insert(name.into(), ty);
    }

    /// Look up a name, innermost scope first.
    ///
    /// # Returns
    ///
    /// The type of the nearest binding of `name`, or `None` if no scope in
    /// the chain binds it
    pub fn lookup(&self, name: &str) -> Option<&MathType> {
        self.bindings
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Names of every type variable mentioned by any binding in the chain,
    /// shadowed bindings included.
    pub fn free_type_vars(&self) -> HashSet<String> {
        let mut vars: HashSet<String> = self
            .bindings
            .values()
            .flat_map(MathType::free_type_vars)
            .collect();
        if let Some(parent) = &self.parent {
            vars.extend(parent.free_type_vars());
        }
        vars
    }

    /// Open a child scope on top of `parent`.
    pub fn extend(parent: &Rc<TypeEnv>) -> TypeEnv {
        TypeEnv {
            bindings: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }
    }

    /// Number of scopes in the chain, this one included.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }
}
