//! Shape predicates over expression nodes.

use crate::expression::Expression;

/// Broad category of an expression's outermost node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Aggregate,
    Scalar,
    Other,
}

pub fn is_aggregate(expr: &Expression) -> bool {
    matches!(expr, Expression::AggregateCall(_))
}

pub fn is_scalar(expr: &Expression) -> bool {
    matches!(expr, Expression::ScalarCall(_))
}

pub fn classify(expr: &Expression) -> ExpressionKind {
    match expr {
        Expression::AggregateCall(_) => ExpressionKind::Aggregate,
        Expression::ScalarCall(_) => ExpressionKind::Scalar,
        Expression::Column(_) | Expression::Literal(_) | Expression::Alias(_) => {
            ExpressionKind::Other
        }
    }
}
