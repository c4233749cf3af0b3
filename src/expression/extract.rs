//! Locating the aggregate a column expression is built on.

use crate::expression::{AggregateCall, Expression};

/// Follow the unary spine of `expr` through aliases and scalar calls and
/// return the aggregate call it bottoms out in.
///
/// `ALIAS(ROUND(ABS(SUM(x))))` yields `SUM(x)`. The first node that is
/// neither a wrapper nor an aggregate (a column or literal) ends the search
/// with `None`.
pub fn extract_aggregate(expr: &Expression) -> Option<&AggregateCall> {
    let mut cursor = expr;
    loop {
        match cursor {
            Expression::Alias(alias) => cursor = alias.child(),
            Expression::ScalarCall(call) => cursor = call.argument(),
            Expression::AggregateCall(call) => return Some(call),
            Expression::Column(_) | Expression::Literal(_) => return None,
        }
    }
}
