//! Compilation of SELECT output columns into backend requests and
//! client-side post-processing.
//!
//! For every output column the planner works out:
//! 1. what the backend has to evaluate (an aggregate, a column or a constant)
//! 2. the scalar functions to re-apply to the value the backend returns
//!
//! Columns compile independently of each other and the resulting plans are
//! immutable, so they can be shared by any number of materializing threads.

pub mod column;

pub use column::{ColumnPlan, LeafSource};

use crate::access::Value;
use crate::expression::Expression;
use crate::processor::ProcessError;
use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Unsupported leaf {0}: expected a column, literal or aggregate")]
    UnsupportedLeaf(String),

    #[error("Row has {actual} values but the projection has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),
}

pub type Result<T> = std::result::Result<T, PlanError>;

/// Compile every expression of a SELECT list
pub fn compile_projection(expressions: &[Expression]) -> Result<Vec<ColumnPlan>> {
    let plans = expressions
        .iter()
        .map(ColumnPlan::compile)
        .collect::<Result<Vec<_>>>()?;
    debug!("compiled projection with {} columns", plans.len());
    Ok(plans)
}

/// Turn one raw backend row into the output row, column by column
pub fn materialize_row(plans: &[ColumnPlan], raw: Vec<Value>) -> Result<Vec<Value>> {
    if plans.len() != raw.len() {
        return Err(PlanError::RowWidth {
            expected: plans.len(),
            actual: raw.len(),
        });
    }
    plans
        .iter()
        .zip(raw)
        .map(|(plan, value)| plan.materialize(value).map_err(PlanError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::DataType;
    use crate::function::{AggregateFunction, ScalarFunction};

    fn projection() -> Vec<Expression> {
        vec![
            Expression::column("region"),
            Expression::alias(
                "total",
                Expression::scalar(
                    ScalarFunction::Round { digits: 1 },
                    Expression::aggregate(AggregateFunction::Sum, "amount"),
                ),
            ),
            Expression::scalar(ScalarFunction::Upper, Expression::column("region")),
        ]
    }

    #[test]
    fn test_compile_projection() {
        let plans = compile_projection(&projection()).unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].name(), "region");
        assert_eq!(plans[1].name(), "total");
        assert_eq!(plans[2].name(), "UPPER(region)");
        assert!(plans[0].processor().is_none());
        assert!(plans[1].processor().is_some());
    }

    #[test]
    fn test_materialize_row() {
        let plans = compile_projection(&projection()).unwrap();
        let row = materialize_row(
            &plans,
            vec![
                Value::String("north".to_string()),
                Value::Float64(12.345),
                Value::String("north".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            row,
            vec![
                Value::String("north".to_string()),
                Value::Float64(12.3),
                Value::String("NORTH".to_string()),
            ]
        );
    }

    #[test]
    fn test_materialize_row_errors() {
        let plans = compile_projection(&projection()).unwrap();
        assert_eq!(
            materialize_row(&plans, vec![Value::Null]),
            Err(PlanError::RowWidth {
                expected: 3,
                actual: 1,
            })
        );

        let err = materialize_row(
            &plans,
            vec![Value::Null, Value::String("x".to_string()), Value::Null],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlanError::Process(ProcessError::InvalidArgumentType {
                function: "ROUND",
                value_type: DataType::Varchar,
            })
        );
    }
}
