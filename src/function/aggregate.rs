//! Aggregate functions computed by the backend.

use crate::access::DataType;
use crate::function::{FunctionError, FunctionResult};
use serde::{Deserialize, Serialize};

/// Supported aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunction {
    /// COUNT(*) or COUNT(expr) - counts non-NULL values
    Count,
    /// SUM(expr) - sums numeric values, ignoring NULLs
    Sum,
    /// AVG(expr) - average of numeric values, ignoring NULLs
    Avg,
    /// MIN(expr) - minimum value, ignoring NULLs
    Min,
    /// MAX(expr) - maximum value, ignoring NULLs
    Max,
}

impl AggregateFunction {
    /// Returns the name of the aggregate function
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    /// Resolve an aggregate by its SQL name (case insensitive)
    pub fn from_name(name: &str) -> FunctionResult<Self> {
        match name.to_ascii_uppercase().as_str() {
            "COUNT" => Ok(AggregateFunction::Count),
            "SUM" => Ok(AggregateFunction::Sum),
            "AVG" => Ok(AggregateFunction::Avg),
            "MIN" => Ok(AggregateFunction::Min),
            "MAX" => Ok(AggregateFunction::Max),
            _ => Err(FunctionError::UnknownFunction(name.to_string())),
        }
    }

    /// Returns the output data type for this aggregate function given the input type
    pub fn output_type(&self, input_type: Option<DataType>) -> Option<DataType> {
        match self {
            AggregateFunction::Count => Some(DataType::Int64),
            AggregateFunction::Avg => Some(DataType::Float64),
            AggregateFunction::Sum => match input_type {
                Some(t) if t.is_numeric() => Some(t),
                Some(_) => None,
                None => Some(DataType::Float64),
            },
            AggregateFunction::Min | AggregateFunction::Max => input_type,
        }
    }
}
