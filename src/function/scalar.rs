//! Scalar functions applied to a single value after the backend returns it.

use crate::access::{DataType, Value};
use crate::function::{FunctionError, FunctionResult};
use crate::processor::{Processor, ScalarProcessor};
use serde::{Deserialize, Serialize};

/// Scalar function kinds together with their bound (literal) arguments.
///
/// Every variant is unary over its input value; any extra SQL arguments
/// (`ROUND(x, 2)`, `CONCAT(x, '!')`) are already folded into the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarFunction {
    // Math
    Abs,
    Ceil,
    Floor,
    Sqrt,
    Negate,
    Sign,
    Round { digits: i32 },
    Truncate { digits: i32 },
    Multiply { factor: f64 },
    Add { addend: f64 },

    // String
    Upper,
    Lower,
    Length,
    Trim,
    Concat { suffix: String },

    // Conversion
    Cast { to: DataType },
}

impl ScalarFunction {
    /// Get the SQL name of this function
    pub fn name(&self) -> &'static str {
        match self {
            ScalarFunction::Abs => "ABS",
            ScalarFunction::Ceil => "CEIL",
            ScalarFunction::Floor => "FLOOR",
            ScalarFunction::Sqrt => "SQRT",
            ScalarFunction::Negate => "NEGATE",
            ScalarFunction::Sign => "SIGN",
            ScalarFunction::Round { .. } => "ROUND",
            ScalarFunction::Truncate { .. } => "TRUNCATE",
            ScalarFunction::Multiply { .. } => "*",
            ScalarFunction::Add { .. } => "+",
            ScalarFunction::Upper => "UPPER",
            ScalarFunction::Lower => "LOWER",
            ScalarFunction::Length => "LENGTH",
            ScalarFunction::Trim => "TRIM",
            ScalarFunction::Concat { .. } => "CONCAT",
            ScalarFunction::Cast { .. } => "CAST",
        }
    }

    /// Resolve a named scalar function with its literal arguments.
    ///
    /// `args` holds only the bound arguments, not the value being
    /// transformed: `ROUND(price, 2)` resolves as `from_name("ROUND", &[2])`.
    pub fn from_name(name: &str, args: &[Value]) -> FunctionResult<Self> {
        let upper = name.to_ascii_uppercase();
        let function = match upper.as_str() {
            "ABS" => ScalarFunction::Abs,
            "CEIL" | "CEILING" => ScalarFunction::Ceil,
            "FLOOR" => ScalarFunction::Floor,
            "SQRT" => ScalarFunction::Sqrt,
            "NEGATE" => ScalarFunction::Negate,
            "SIGN" => ScalarFunction::Sign,
            "ROUND" => {
                return Ok(ScalarFunction::Round {
                    digits: optional_digits(&upper, args)?,
                })
            }
            "TRUNCATE" | "TRUNC" => {
                return Ok(ScalarFunction::Truncate {
                    digits: optional_digits(&upper, args)?,
                })
            }
            "UPPER" | "UCASE" => ScalarFunction::Upper,
            "LOWER" | "LCASE" => ScalarFunction::Lower,
            "LENGTH" | "CHAR_LENGTH" => ScalarFunction::Length,
            "TRIM" => ScalarFunction::Trim,
            "CONCAT" => {
                expect_args(&upper, args, 1)?;
                return match &args[0] {
                    Value::String(s) => Ok(ScalarFunction::Concat { suffix: s.clone() }),
                    other => Err(invalid_argument(&upper, other)),
                };
            }
            _ => return Err(FunctionError::UnknownFunction(name.to_string())),
        };
        expect_args(&upper, args, 0)?;
        Ok(function)
    }

    /// Get the output type of this function given its input type.
    ///
    /// `None` input means the type is unknown (e.g. a NULL literal).
    pub fn output_type(&self, input: Option<DataType>) -> Option<DataType> {
        match self {
            ScalarFunction::Abs
            | ScalarFunction::Ceil
            | ScalarFunction::Floor
            | ScalarFunction::Negate
            | ScalarFunction::Round { .. }
            | ScalarFunction::Truncate { .. } => match input {
                Some(t) if t.is_numeric() => Some(t),
                Some(_) => None,
                None => Some(DataType::Float64),
            },
            ScalarFunction::Multiply { factor: operand }
            | ScalarFunction::Add { addend: operand } => match input {
                Some(DataType::Int64) if operand.fract() == 0.0 => Some(DataType::Int64),
                Some(t) if t.is_numeric() => Some(DataType::Float64),
                Some(_) => None,
                None => Some(DataType::Float64),
            },
            ScalarFunction::Sqrt => match input {
                Some(t) if !t.is_numeric() => None,
                _ => Some(DataType::Float64),
            },
            ScalarFunction::Sign => match input {
                Some(t) if !t.is_numeric() => None,
                _ => Some(DataType::Int64),
            },
            ScalarFunction::Upper
            | ScalarFunction::Lower
            | ScalarFunction::Trim
            | ScalarFunction::Concat { .. } => match input {
                Some(DataType::Varchar) | None => Some(DataType::Varchar),
                Some(_) => None,
            },
            ScalarFunction::Length => match input {
                Some(DataType::Varchar) | None => Some(DataType::Int64),
                Some(_) => None,
            },
            ScalarFunction::Cast { to } => Some(*to),
        }
    }

    /// Create a fresh processor carrying this function's runtime behavior
    pub fn as_processor(&self) -> Box<dyn Processor> {
        Box::new(ScalarProcessor::new(self.clone()))
    }
}

fn expect_args(function: &str, args: &[Value], expected: usize) -> FunctionResult<()> {
    if args.len() != expected {
        return Err(FunctionError::ArgumentCount {
            function: function.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn optional_digits(function: &str, args: &[Value]) -> FunctionResult<i32> {
    match args {
        [] => Ok(0),
        [Value::Int64(n)] => {
            i32::try_from(*n).map_err(|_| invalid_argument(function, &Value::Int64(*n)))
        }
        [other] => Err(invalid_argument(function, other)),
        _ => Err(FunctionError::ArgumentCount {
            function: function.to_string(),
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn invalid_argument(function: &str, value: &Value) -> FunctionError {
    FunctionError::InvalidArgument {
        function: function.to_string(),
        argument: value.to_string(),
    }
}
