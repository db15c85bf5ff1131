use std::collections::HashSet;
use std::fmt;

/// A type variable, optionally bounded above by another type.
///
/// Names are handed out by the inference engine from a per-run counter, so
/// two variables from the same run are equal iff their names are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVar {
    pub name: String,
    pub bound: Option<Box<MathType>>,
}

impl TypeVar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
        }
    }

    pub fn bounded(name: impl Into<String>, bound: MathType) -> Self {
        Self {
            name: name.into(),
            bound: Some(Box::new(bound)),
        }
    }
}

/// The closed set of type constructors understood by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathType {
    Nat,
    Int,
    Real,
    Complex,
    Set(Box<MathType>),
    Function(Box<MathType>, Box<MathType>),
    Matrix {
        base: Box<MathType>,
        rows: usize,
        cols: usize,
    },
    Vector {
        base: Box<MathType>,
        dim: usize,
    },
    Tuple(Vec<MathType>),
    Var(TypeVar),
}

impl MathType {
    pub fn set(element: MathType) -> Self {
        MathType::Set(Box::new(element))
    }

    pub fn func(domain: MathType, codomain: MathType) -> Self {
        MathType::Function(Box::new(domain), Box::new(codomain))
    }

    pub fn matrix(base: MathType, rows: usize, cols: usize) -> Self {
        MathType::Matrix {
            base: Box::new(base),
            rows,
            cols,
        }
    }

    pub fn vector(base: MathType, dim: usize) -> Self {
        MathType::Vector {
            base: Box::new(base),
            dim,
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        MathType::Var(TypeVar::new(name))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            MathType::Nat | MathType::Int | MathType::Real | MathType::Complex
        )
    }

    pub fn is_var(&self) -> bool {
        matches!(self, MathType::Var(_))
    }

    pub fn as_var(&self) -> Option<&TypeVar> {
        match self {
            MathType::Var(v) => Some(v),
            _ => None,
        }
    }

    /// Names of every type variable occurring in this type, including those
    /// inside the bounds of bounded variables.
    pub fn free_type_vars(&self) -> HashSet<String> {
        let mut set = HashSet::new();
        self.collect_vars(&mut set);
        set
    }

    fn collect_vars(&self, set: &mut HashSet<String>) {
        match self {
            MathType::Nat | MathType::Int | MathType::Real | MathType::Complex => {}
            MathType::Var(v) => {
                set.insert(v.name.clone());
                if let Some(bound) = &v.bound {
                    bound.collect_vars(set);
                }
            }
            MathType::Set(element) => element.collect_vars(set),
            MathType::Function(domain, codomain) => {
                domain.collect_vars(set);
                codomain.collect_vars(set);
            }
            MathType::Matrix { base, .. } | MathType::Vector { base, .. } => {
                base.collect_vars(set)
            }
            MathType::Tuple(elements) => elements.iter().for_each(|t| t.collect_vars(set)),
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            MathType::Nat => "ℕ".to_string(),
            MathType::Int => "ℤ".to_string(),
            MathType::Real => "ℝ".to_string(),
            MathType::Complex => "ℂ".to_string(),
            MathType::Set(element) => format!("Set({})", element.pretty()),
            MathType::Function(domain, codomain) => {
                let domain_str = if matches!(**domain, MathType::Function(_, _)) {
                    format!("({})", domain.pretty())
                } else {
                    domain.pretty()
                };
                format!("{} → {}", domain_str, codomain.pretty())
            }
            MathType::Matrix { base, rows, cols } => {
                format!("Matrix({}, {}×{})", base.pretty(), rows, cols)
            }
            MathType::Vector { base, dim } => format!("Vector({}, {})", base.pretty(), dim),
            MathType::Tuple(elements) => {
                let parts: Vec<_> = elements.iter().map(MathType::pretty).collect();
                format!("({})", parts.join(" × "))
            }
            MathType::Var(v) => match &v.bound {
                Some(bound) => format!("{} <: {}", v.name, bound.pretty()),
                None => v.name.clone(),
            },
        }
    }
}

impl fmt::Display for MathType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Render a type for human consumption.
///
/// Downstream tooling should go through this rather than formatting
/// `MathType` values on its own.
pub fn type_to_string(ty: &MathType) -> String {
    ty.pretty()
}
