//! Shared fixtures for the lock tests.
//!
//! The arithmetic grammar below is the reference scenario: `one() -> int`,
//! `add(int, int) -> int`, evaluated over `i64`.

#![forbid(unsafe_code)]

use neurosym_kernel::dsl::{BoxError, Dsl, DslError, Params, Production};
use neurosym_kernel::types::{Type, TypeSignature};
use neurosym_search::DslSearchNode;

#[must_use]
pub fn int() -> Type {
    Type::atomic("int")
}

/// Build one production of the arithmetic grammar by symbol.
///
/// # Panics
///
/// On a symbol the fixture does not define.
#[must_use]
pub fn arith_production(symbol: &str) -> Production<i64> {
    match symbol {
        "one" => Production::stateless("one", TypeSignature::constant(int()), |_| Ok(1)),
        "add" => Production::stateless(
            "add",
            TypeSignature::new(vec![int(), int()], int()),
            |xs: &[i64]| Ok(xs[0] + xs[1]),
        ),
        // Multiplies by a parameter fixed at initialization.
        "scale" => Production::parameterized(
            "scale",
            TypeSignature::new(vec![int()], int()),
            || Params::from([("factor".to_string(), 3)]),
            |xs: &[i64], params: &Params<i64>| {
                let factor = params.get("factor").copied().ok_or("factor missing")?;
                Ok(xs[0] * factor)
            },
        ),
        // Always fails to evaluate.
        "boom" => Production::stateless("boom", TypeSignature::constant(int()), |_| {
            Err::<i64, BoxError>("boom cannot be evaluated".into())
        }),
        // Needs a `str` argument, which nothing produces.
        "parse_int" => Production::stateless(
            "parse_int",
            TypeSignature::new(vec![Type::atomic("str")], int()),
            |xs: &[i64]| Ok(xs[0]),
        ),
        other => panic!("fixture has no production {other:?}"),
    }
}

/// The arithmetic grammar with productions in the given order.
///
/// # Panics
///
/// On unknown or repeated symbols.
#[must_use]
pub fn arith_dsl(order: &[&str]) -> Dsl<i64> {
    Dsl::new("arith", order.iter().map(|&s| arith_production(s)).collect())
        .unwrap_or_else(|e| panic!("fixture dsl: {e}"))
}

/// Goal predicate: the node is complete and evaluates to `target` under
/// the node's own DSL.
///
/// Evaluator failures are returned unchanged.
pub fn evaluates_to<'d>(
    target: i64,
) -> impl Fn(&DslSearchNode<'d, i64>) -> Result<bool, DslError> {
    move |node: &DslSearchNode<'d, i64>| {
        if !node.is_complete() {
            return Ok(false);
        }
        Ok(node.dsl().evaluate(node.program())? == target)
    }
}
