//! Flattening nested scalar calls into ordered chains.
//!
//! Both functions order the chain outermost first. An expression whose top
//! node is not a scalar call has nothing to unwrap and yields an empty chain.

use crate::expression::{Expression, ScalarCall};

/// Unwrap `F(G(leaf))` into `[F(G(leaf)), G(leaf), leaf]`.
///
/// The trailing leaf is kept so callers can inspect what the chain is
/// built on.
pub fn unwrap_full_chain(expr: &Expression) -> Vec<&Expression> {
    if !matches!(expr, Expression::ScalarCall(_)) {
        return Vec::new();
    }

    let mut chain = Vec::new();
    let mut cursor = expr;
    while let Expression::ScalarCall(call) = cursor {
        chain.push(cursor);
        cursor = call.argument();
    }
    chain.push(cursor);
    chain
}

/// Unwrap `F(G(leaf))` into the scalar calls `[F, G]`, dropping the leaf.
pub fn unwrap_scalar_chain(expr: &Expression) -> Vec<&ScalarCall> {
    let call = match expr {
        Expression::ScalarCall(call) => call,
        _ => return Vec::new(),
    };

    // common case: a single function over a column or aggregate
    if !matches!(call.argument(), Expression::ScalarCall(_)) {
        return vec![call];
    }

    let mut chain = Vec::new();
    let mut cursor = expr;
    while let Expression::ScalarCall(call) = cursor {
        chain.push(call);
        cursor = call.argument();
    }
    chain
}

/// Last element of a full chain: the node the backend actually evaluates.
/// For a non-scalar expression this is the expression itself.
pub fn chain_leaf(expr: &Expression) -> &Expression {
    let mut cursor = expr;
    while let Expression::ScalarCall(call) = cursor {
        cursor = call.argument();
    }
    cursor
}
