use anyhow::ensure;
use log::{info, warn};

use mathtype::expr::*;
use mathtype::types::{TypeEnv, type_check};

/// Sample expressions over the standard vocabulary, with whether each one
/// should type check.
fn samples() -> Vec<(&'static str, Expr, bool)> {
    let rotation = matrix(vec![
        vec![
            unary(UnaryOpKind::Cos, var("π")),
            unary(UnaryOpKind::Neg, unary(UnaryOpKind::Sin, var("π"))),
        ],
        vec![
            unary(UnaryOpKind::Sin, var("π")),
            unary(UnaryOpKind::Cos, var("π")),
        ],
    ]);

    vec![
        ("golden ratio squared", binop(BinOpKind::Pow, var("φ"), num(2.0)), true),
        (
            "fibonacci of fibonacci",
            apply(var("fib"), apply(var("fib"), num(7.0))),
            true,
        ),
        (
            "zeckendorf of a real",
            apply(var("zeckendorf"), binop(BinOpKind::Div, var("π"), num(2.0))),
            false,
        ),
        (
            "squares of a decomposition",
            set_comprehension(
                binop(BinOpKind::Pow, var("k"), num(2.0)),
                "k",
                apply(var("zeckendorf"), num(100.0)),
                Some(binop(BinOpKind::Gt, var("k"), num(1.0))),
            ),
            true,
        ),
        ("rotation matrix", rotation, true),
        (
            "ragged matrix",
            matrix(vec![vec![num(1.0), num(2.0)], vec![var("i")]]),
            false,
        ),
        (
            "lucas after fibonacci",
            lambda("n", None, apply(var("lucas"), apply(var("fib"), var("n")))),
            true,
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    for (label, expr, expect_ok) in samples() {
        let result = type_check(&expr, Some(TypeEnv::standard()));
        match &result {
            Ok(ty) => info!("{}: {} : {}", label, expr, ty),
            Err(err) => warn!("{}: {}\n{}", label, expr, err),
        }
        ensure!(
            result.is_ok() == expect_ok,
            "unexpected verdict for {}",
            label
        );
    }

    Ok(())
}
