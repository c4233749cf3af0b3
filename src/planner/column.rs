//! Plan for a single output column.

use crate::access::{DataType, Value};
use crate::expression::{
    chain_leaf, classify, extract_aggregate, unwrap_full_chain, unwrap_scalar_chain,
    AggregateCall, ColumnRef, Expression, ExpressionKind, Literal,
};
use crate::function::ScalarFunction;
use crate::planner::{PlanError, Result};
use crate::processor::{self, chain_processors, ProcessResult, Processor};
use log::debug;

/// What the backend evaluates for a column
#[derive(Debug, Clone, PartialEq)]
pub enum LeafSource {
    /// Aggregation request pushed to the backend
    Aggregate(AggregateCall),
    /// Plain field read
    Column(ColumnRef),
    /// Constant, no backend work at all
    Constant(Literal),
}

/// Compiled output column
#[derive(Debug)]
pub struct ColumnPlan {
    name: String,
    kind: ExpressionKind,
    source: LeafSource,
    /// Scalar functions over the leaf, outermost first
    functions: Vec<ScalarFunction>,
    processor: Option<Box<dyn Processor>>,
}

impl ColumnPlan {
    /// Compile one SELECT list expression.
    ///
    /// Aliases are only expected at the top of the expression; an alias
    /// sitting below a scalar call is reported as an unsupported leaf.
    pub fn compile(expr: &Expression) -> Result<Self> {
        let name = expr.name();
        let body = strip_aliases(expr);

        let leaf = chain_leaf(body);
        if matches!(leaf, Expression::Alias(_)) {
            return Err(PlanError::UnsupportedLeaf(leaf.to_string()));
        }

        let source = match extract_aggregate(expr) {
            Some(aggregate) => LeafSource::Aggregate(aggregate.clone()),
            None => match leaf {
                Expression::Column(column) => LeafSource::Column(column.clone()),
                Expression::Literal(literal) => LeafSource::Constant(literal.clone()),
                other => return Err(PlanError::UnsupportedLeaf(other.to_string())),
            },
        };

        let functions = unwrap_scalar_chain(body)
            .into_iter()
            .map(|call| call.function.clone())
            .collect::<Vec<_>>();
        let processor = chain_processors(&unwrap_full_chain(body));

        debug!(
            "compiled column '{}': source={:?}, {} scalar functions",
            name,
            source,
            functions.len()
        );

        Ok(Self {
            name,
            kind: classify(body),
            source,
            functions,
            processor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classification of the column body (aliases removed)
    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    pub fn source(&self) -> &LeafSource {
        &self.source
    }

    pub fn aggregate(&self) -> Option<&AggregateCall> {
        match &self.source {
            LeafSource::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    pub fn functions(&self) -> &[ScalarFunction] {
        &self.functions
    }

    pub fn processor(&self) -> Option<&dyn Processor> {
        self.processor.as_deref()
    }

    /// Apply the column's post-processing to a raw backend value
    pub fn materialize(&self, raw: Value) -> ProcessResult<Value> {
        processor::apply(self.processor(), raw)
    }

    /// Output type of the column given the type of the leaf value
    pub fn output_type(&self, leaf_type: Option<DataType>) -> Option<DataType> {
        let mut current = leaf_type;
        for function in self.functions.iter().rev() {
            current = Some(function.output_type(current)?);
        }
        current
    }
}

fn strip_aliases(expr: &Expression) -> &Expression {
    let mut cursor = expr;
    while let Expression::Alias(alias) = cursor {
        cursor = alias.child();
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::AggregateFunction;

    #[test]
    fn test_plain_column() {
        let plan = ColumnPlan::compile(&Expression::column("price")).unwrap();
        assert_eq!(plan.name(), "price");
        assert_eq!(plan.kind(), ExpressionKind::Other);
        assert_eq!(plan.source(), &LeafSource::Column(ColumnRef::new("price")));
        assert!(plan.functions().is_empty());
        assert!(plan.processor().is_none());
        assert_eq!(plan.materialize(Value::Int64(-4)).unwrap(), Value::Int64(-4));
    }

    #[test]
    fn test_scalar_over_column() {
        let expr = Expression::scalar(
            ScalarFunction::Round { digits: 0 },
            Expression::scalar(ScalarFunction::Abs, Expression::column("price")),
        );
        let plan = ColumnPlan::compile(&expr).unwrap();
        assert_eq!(plan.kind(), ExpressionKind::Scalar);
        assert!(plan.aggregate().is_none());
        assert_eq!(
            plan.functions(),
            &[ScalarFunction::Round { digits: 0 }, ScalarFunction::Abs]
        );
        assert_eq!(
            plan.materialize(Value::Float64(-2.5)).unwrap(),
            Value::Float64(3.0)
        );
    }

    #[test]
    fn test_aliased_aggregate() {
        let expr = Expression::alias(
            "avg_len",
            Expression::scalar(
                ScalarFunction::Cast {
                    to: DataType::Int64,
                },
                Expression::aggregate(AggregateFunction::Avg, "len"),
            ),
        );
        let plan = ColumnPlan::compile(&expr).unwrap();
        assert_eq!(plan.name(), "avg_len");
        assert_eq!(plan.kind(), ExpressionKind::Scalar);
        assert_eq!(
            plan.aggregate(),
            Some(&AggregateCall::new(AggregateFunction::Avg, ColumnRef::new("len")))
        );
        assert_eq!(plan.materialize(Value::Float64(7.8)).unwrap(), Value::Int64(7));
        assert_eq!(plan.materialize(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_bare_aggregate() {
        let plan = ColumnPlan::compile(&Expression::count_star()).unwrap();
        assert_eq!(plan.kind(), ExpressionKind::Aggregate);
        assert_eq!(plan.aggregate(), Some(&AggregateCall::count_star()));
        assert!(plan.processor().is_none());
    }

    #[test]
    fn test_constant() {
        let expr = Expression::scalar(
            ScalarFunction::Lower,
            Expression::literal(Value::String("ABC".to_string())),
        );
        let plan = ColumnPlan::compile(&expr).unwrap();
        assert_eq!(
            plan.source(),
            &LeafSource::Constant(Literal::new(Value::String("ABC".to_string())))
        );
        assert_eq!(
            plan.materialize(Value::String("ABC".to_string())).unwrap(),
            Value::String("abc".to_string())
        );
    }

    #[test]
    fn test_alias_below_scalar_is_rejected() {
        let expr = Expression::scalar(
            ScalarFunction::Abs,
            Expression::alias("inner", Expression::column("x")),
        );
        assert_eq!(
            ColumnPlan::compile(&expr).unwrap_err(),
            PlanError::UnsupportedLeaf("x AS inner".to_string())
        );

        let expr = Expression::scalar(
            ScalarFunction::Abs,
            Expression::alias("inner", Expression::count_star()),
        );
        assert!(ColumnPlan::compile(&expr).is_err());
    }

    #[test]
    fn test_output_type() {
        let expr = Expression::scalar(
            ScalarFunction::Length,
            Expression::scalar(ScalarFunction::Upper, Expression::column("name")),
        );
        let plan = ColumnPlan::compile(&expr).unwrap();
        assert_eq!(plan.output_type(Some(DataType::Varchar)), Some(DataType::Int64));
        assert_eq!(plan.output_type(Some(DataType::Int64)), None);

        let plan = ColumnPlan::compile(&Expression::column("name")).unwrap();
        assert_eq!(plan.output_type(Some(DataType::Boolean)), Some(DataType::Boolean));
    }
}
