//! Expression tree definitions.

use crate::access::Value;
use crate::function::{AggregateFunction, ScalarFunction};
use crate::processor::Processor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column reference in an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Field name as the backend knows it
    pub name: String,
    /// Optional table qualifier
    pub qualifier: Option<String>,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: Some(qualifier.into()),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}.{}", qualifier, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

/// Named wrapper around an expression (`expr AS name`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub child: Box<Expression>,
}

impl Alias {
    pub fn child(&self) -> &Expression {
        &self.child
    }
}

/// Call of a unary scalar function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarCall {
    pub function: ScalarFunction,
    pub argument: Box<Expression>,
}

impl ScalarCall {
    pub fn new(function: ScalarFunction, argument: Expression) -> Self {
        Self {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn argument(&self) -> &Expression {
        &self.argument
    }

    /// Processor reproducing this call's function, created on every request
    pub fn as_processor(&self) -> Box<dyn Processor> {
        self.function.as_processor()
    }
}

impl fmt::Display for ScalarCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg = &self.argument;
        match &self.function {
            ScalarFunction::Round { digits } | ScalarFunction::Truncate { digits } => {
                write!(f, "{}({}, {})", self.function.name(), arg, digits)
            }
            ScalarFunction::Multiply { factor } => write!(f, "({} * {})", arg, factor),
            ScalarFunction::Add { addend } => write!(f, "({} + {})", arg, addend),
            ScalarFunction::Concat { suffix } => write!(f, "CONCAT({}, '{}')", arg, suffix),
            ScalarFunction::Cast { to } => write!(f, "CAST({} AS {})", arg, to),
            function => write!(f, "{}({})", function.name(), arg),
        }
    }
}

/// Call of an aggregate function. Always a leaf: the aggregated input is a
/// plain column reference evaluated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateCall {
    pub function: AggregateFunction,
    /// Column to aggregate (None for COUNT(*))
    pub column: Option<ColumnRef>,
    pub distinct: bool,
}

impl AggregateCall {
    pub fn new(function: AggregateFunction, column: ColumnRef) -> Self {
        Self {
            function,
            column: Some(column),
            distinct: false,
        }
    }

    pub fn count_star() -> Self {
        Self {
            function: AggregateFunction::Count,
            column: None,
            distinct: false,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

impl fmt::Display for AggregateCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        match &self.column {
            Some(column) => write!(f, "{}({}{})", self.function.name(), distinct, column),
            None => write!(f, "{}({}*)", self.function.name(), distinct),
        }
    }
}

/// Expression tree node, as validated by the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Column reference
    Column(ColumnRef),

    /// Literal constant value
    Literal(Literal),

    /// Named expression
    Alias(Alias),

    /// Scalar function applied to a single argument
    ScalarCall(ScalarCall),

    /// Aggregate function computed by the backend
    AggregateCall(AggregateCall),
}

impl Expression {
    /// Create a column reference expression
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(ColumnRef::new(name))
    }

    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create an alias expression
    pub fn alias(name: impl Into<String>, child: Expression) -> Self {
        Expression::Alias(Alias {
            name: name.into(),
            child: Box::new(child),
        })
    }

    /// Create a scalar function call expression
    pub fn scalar(function: ScalarFunction, argument: Expression) -> Self {
        Expression::ScalarCall(ScalarCall::new(function, argument))
    }

    /// Create an aggregate over a named column
    pub fn aggregate(function: AggregateFunction, column: impl Into<String>) -> Self {
        Expression::AggregateCall(AggregateCall::new(function, ColumnRef::new(column)))
    }

    /// Create a COUNT(*) expression
    pub fn count_star() -> Self {
        Expression::AggregateCall(AggregateCall::count_star())
    }

    /// Output column name: the alias if there is one, otherwise the
    /// expression text
    pub fn name(&self) -> String {
        match self {
            Expression::Alias(alias) => alias.name.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Column(column) => write!(f, "{}", column),
            Expression::Literal(literal) => write!(f, "{}", literal.value),
            Expression::Alias(alias) => write!(f, "{} AS {}", alias.child, alias.name),
            Expression::ScalarCall(call) => write!(f, "{}", call),
            Expression::AggregateCall(call) => write!(f, "{}", call),
        }
    }
}
