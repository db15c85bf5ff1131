//! # mathtype - Static Types for Symbolic Mathematics
//!
//! `mathtype` infers and checks the types of symbolic mathematical
//! expressions before anything evaluates them. The language covers the
//! numeric tower (ℕ, ℤ, ℝ, ℂ) and structural types (sets, functions,
//! matrices, vectors, tuples), related by subtyping with promotion.
//!
//! ## Architecture Overview
//!
//! 1. **Expression Model** (`expr`) - The immutable tree handed in by a parser
//!    or evaluator, with a write-once type slot on every node
//! 2. **Type Lattice** (`types::ty`, `types::lattice`) - Type constructors,
//!    subtyping, equality and promotion
//! 3. **Environment & Substitution** (`types::env`, `types::subst`) - Scoped
//!    name bindings and type-variable bindings
//! 4. **Unifier** (`types::unify`) - Structural unification with occurs check
//! 5. **Inference Engine** (`types::infer`) - Per-node typing rules
//! 6. **Error Reporter** (`types::report`) - Diagnostics for one pass
//!
//! ## Pipeline Flow
//!
//! ```text
//! Expr tree + TypeEnv
//!     ↓
//! [Infer] ──lookup──→ TypeEnv (scoped)
//!     │   ──unify───→ Unifier → Substitution
//!     │   ──record──→ Reporter (placeholder type returned, checking goes on)
//!     ↓
//! MathType, or every Diagnostic of the pass
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Subtyping first, unification where variables appear
//! Concrete types are compared with the lattice (`ℕ ⊑ ℝ`, contravariant
//! function domains). Unification only runs when a type variable has to be
//! resolved, e.g. an unannotated lambda parameter or a function whose domain
//! is a variable.
//!
//! ### Booleans are naturals
//! Comparisons type as [`types::BOOLEAN`], which is `ℕ` standing for `{0, 1}`.
//!
//! ### One checker per run
//! The scope chain, substitution, fresh-variable counter and reporter all
//! live in one [`types::Infer`]. Checking independent expressions in
//! parallel means one instance each; nothing is shared.
//!
//! ## Getting Started
//!
//! ```
//! use mathtype::expr::{apply, num, var};
//! use mathtype::types::{MathType, TypeEnv, type_check};
//!
//! let env = TypeEnv::with_bindings(vec![(
//!     "F".to_string(),
//!     MathType::func(MathType::Nat, MathType::Int),
//! )]);
//! let expr = apply(var("F"), num(5.0));
//! assert_eq!(type_check(&expr, Some(env)), Ok(MathType::Int));
//! ```

pub mod expr;
pub mod types;

pub use types::{is_well_typed, type_check, type_to_string};
