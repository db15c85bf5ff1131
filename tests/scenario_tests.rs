use mathtype::expr::*;
use mathtype::types::{Infer, MathType, TypeEnv, TypeError, is_well_typed, type_check};

fn env(bindings: &[(&str, MathType)]) -> TypeEnv {
    TypeEnv::with_bindings(
        bindings
            .iter()
            .map(|(name, ty)| (name.to_string(), ty.clone()))
            .collect(),
    )
}

fn nat_to_int() -> MathType {
    MathType::func(MathType::Nat, MathType::Int)
}

/// Helper to run a check and pull out the raw errors
fn errors(expr: &Expr, env: TypeEnv) -> Vec<TypeError> {
    match type_check(expr, Some(env)) {
        Ok(ty) => panic!("Expected type errors, got type {}", ty),
        Err(err) => err.diagnostics.into_iter().map(|d| d.error).collect(),
    }
}

#[test]
fn test_application_of_declared_function() {
    let expr = apply(var("F"), num(5.0));
    let result = type_check(&expr, Some(env(&[("F", nat_to_int())])));
    assert_eq!(result, Ok(MathType::Int));
}

#[test]
fn test_sum_of_reals() {
    let expr = binop(BinOpKind::Add, var("φ"), var("ψ"));
    let env = env(&[("φ", MathType::Real), ("ψ", MathType::Real)]);
    assert_eq!(type_check(&expr, Some(env)), Ok(MathType::Real));
}

#[test]
fn test_real_argument_to_natural_domain() {
    let expr = apply(var("F"), var("φ"));
    let env = env(&[("F", nat_to_int()), ("φ", MathType::Real)]);
    assert_eq!(
        errors(&expr, env),
        vec![TypeError::type_mismatch(MathType::Nat, MathType::Real)]
    );
}

#[test]
fn test_integer_result_fed_to_natural_domain() {
    let expr = apply(var("S"), apply(var("F"), num(5.0)));
    let env = env(&[
        ("S", MathType::func(MathType::Nat, MathType::Nat)),
        ("F", nat_to_int()),
    ]);
    let err = type_check(&expr, Some(env)).unwrap_err();

    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(
        err.diagnostics[0].error,
        TypeError::type_mismatch(MathType::Nat, MathType::Int)
    );
    assert_eq!(err.diagnostics[0].expr, "F(5)");
}

#[test]
fn test_ragged_matrix() {
    let expr = matrix(vec![vec![num(1.0), num(2.0)], vec![num(3.0)]]);
    let found = errors(&expr, TypeEnv::empty());
    assert_eq!(
        found,
        vec![TypeError::DimensionMismatch {
            context: "matrix row 2".to_string(),
            expected: 2,
            found: 1,
        }]
    );
    // no cell was inferred
    if let Expr::Matrix(m) = &expr {
        assert!(m.rows.iter().flatten().all(|cell| cell.inferred_type().is_none()));
    }
}

#[test]
fn test_check_keeps_narrow_type() {
    let mut infer = Infer::with_env(env(&[("F", nat_to_int())]));
    let ty = infer.check(&apply(var("F"), num(5.0)), &MathType::Complex);
    assert_eq!(ty, MathType::Int);
    assert!(!infer.reporter().has_errors());
}

#[test]
fn test_multiple_independent_errors_in_one_pass() {
    // (F(φ), undefined, [[1], [2, 3]])
    let expr = tuple(vec![
        apply(var("F"), var("φ")),
        var("undefined"),
        matrix(vec![vec![num(1.0)], vec![num(2.0), num(3.0)]]),
    ]);
    let env = env(&[("F", nat_to_int()), ("φ", MathType::Real)]);
    let found = errors(&expr, env);

    assert_eq!(found.len(), 3);
    assert!(matches!(found[0], TypeError::TypeMismatch { .. }));
    assert!(matches!(found[1], TypeError::UndefinedVariable { .. }));
    assert!(matches!(found[2], TypeError::DimensionMismatch { .. }));
}

#[test]
fn test_polymorphic_domain_resolved_by_argument() {
    let pair_with = MathType::func(
        MathType::var("α"),
        MathType::Tuple(vec![MathType::var("α"), MathType::Nat]),
    );
    let expr = apply(var("pair"), vector(vec![num(1.0), num(0.5)]));
    assert_eq!(
        type_check(&expr, Some(env(&[("pair", pair_with)]))),
        Ok(MathType::Tuple(vec![
            MathType::vector(MathType::Real, 2),
            MathType::Nat
        ]))
    );
}

#[test]
fn test_higher_order_application() {
    // (λf. f(3))(F) with F : ℕ → ℤ
    let expr = apply(lambda("f", None, apply(var("f"), num(3.0))), var("F"));
    assert_eq!(
        type_check(&expr, Some(env(&[("F", nat_to_int())]))),
        Ok(MathType::Int)
    );
}

#[test]
fn test_contravariant_argument() {
    // G expects a ℕ → ℝ; passing F : ℤ → ℕ is fine since ℕ ⊑ ℤ and ℕ ⊑ ℝ
    let env = env(&[
        (
            "G",
            MathType::func(MathType::func(MathType::Nat, MathType::Real), MathType::Real),
        ),
        ("F", MathType::func(MathType::Int, MathType::Nat)),
    ]);
    assert!(is_well_typed(&apply(var("G"), var("F")), Some(env.clone())));

    let env_wrong = {
        let mut e = env;
        e.bind("F", MathType::func(MathType::Real, MathType::Complex));
        e
    };
    assert!(!is_well_typed(&apply(var("G"), var("F")), Some(env_wrong)));
}

#[test]
fn test_standard_vocabulary() {
    let expr = let_in(
        "z",
        Some(MathType::Complex),
        binop(BinOpKind::Mul, var("φ"), var("i")),
        unary(UnaryOpKind::Abs, var("z")),
    );
    assert_eq!(type_check(&expr, None), Ok(MathType::Real));
}

#[test]
fn test_set_comprehension_over_sequence() {
    // {fib(k) | k ∈ zeckendorf(50), k > 2}
    let expr = set_comprehension(
        apply(var("fib"), var("k")),
        "k",
        apply(var("zeckendorf"), num(50.0)),
        Some(binop(BinOpKind::Gt, var("k"), num(2.0))),
    );
    assert_eq!(type_check(&expr, None), Ok(MathType::set(MathType::Nat)));
}

#[test]
fn test_independent_runs_do_not_share_state() {
    let expr = lambda("x", None, apply(var("F"), var("x")));
    let env = env(&[("F", nat_to_int())]);

    let first = type_check(&expr.clone(), Some(env.clone()));
    let second = type_check(&expr.clone(), Some(env));
    assert_eq!(first, second);
    assert_eq!(first, Ok(nat_to_int()));
}

#[test]
fn test_integer_condition_is_accepted() {
    let expr = cond(var("p"), num(1.0), num(2.0));
    assert_eq!(
        type_check(&expr, Some(env(&[("p", MathType::Int)]))),
        Ok(MathType::Nat)
    );
}

#[test]
fn test_caller_type_variables_are_not_reused() {
    // g : τ0 → τ0 pinned by g(2.5) must not pin the unrelated λy. y
    let env = env(&[(
        "g",
        MathType::func(MathType::var("τ0"), MathType::var("τ0")),
    )]);
    let expr = tuple(vec![lambda("y", None, var("y")), apply(var("g"), num(2.5))]);

    let Ok(MathType::Tuple(parts)) = type_check(&expr, Some(env)) else {
        panic!("expected a tuple type");
    };
    assert_eq!(parts[1], MathType::Real);
    match &parts[0] {
        MathType::Function(domain, codomain) => {
            assert!(domain.is_var());
            assert_eq!(domain, codomain);
            assert_ne!(**domain, MathType::var("τ0"));
        }
        other => panic!("expected a function type, got {}", other),
    }
}

#[test]
fn test_literal_elements_without_common_type() {
    for expr in [
        vector(vec![num(1.0), set(vec![num(2.0)])]),
        set(vec![num(1.0), set(vec![num(2.0)])]),
        matrix(vec![vec![num(1.0), set(vec![num(2.0)])]]),
    ] {
        let found = errors(&expr, TypeEnv::empty());
        assert!(
            matches!(found[..], [TypeError::InvalidOperation { .. }]),
            "{}: {:?}",
            expr,
            found
        );
    }
}
