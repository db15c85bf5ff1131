pub mod check;
pub mod env;
pub mod error;
pub mod infer;
pub mod lattice;
pub mod report;
pub mod subst;
pub mod ty;
pub mod unify;

pub use check::{CheckError, is_well_typed, type_check};
pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::Infer;
pub use lattice::{BOOLEAN, is_subtype, promote, type_equals};
pub use report::{Diagnostic, Reporter};
pub use subst::Substitution;
pub use ty::{MathType, TypeVar, type_to_string};
pub use unify::{UnifyError, Unifier, unify};
