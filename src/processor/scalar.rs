//! Runtime behavior of each scalar function.

use crate::access::{DataType, Value};
use crate::function::ScalarFunction;
use crate::processor::{ProcessError, ProcessResult, Processor};

/// Processor for a single scalar function and its bound arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarProcessor {
    function: ScalarFunction,
}

impl ScalarProcessor {
    pub fn new(function: ScalarFunction) -> Self {
        Self { function }
    }

    fn invalid(&self, value: &Value) -> ProcessError {
        match value.data_type() {
            Some(value_type) => ProcessError::InvalidArgumentType {
                function: self.function.name(),
                value_type,
            },
            // NULL never reaches the per-function code
            None => unreachable!("NULL is handled before dispatch"),
        }
    }

    fn overflow(&self) -> ProcessError {
        ProcessError::Overflow {
            function: self.function.name(),
        }
    }

    fn process_math(&self, input: Value) -> ProcessResult<Value> {
        match (&self.function, input) {
            (ScalarFunction::Abs, Value::Int64(n)) => {
                n.checked_abs().map(Value::Int64).ok_or_else(|| self.overflow())
            }
            (ScalarFunction::Abs, Value::Float64(n)) => Ok(Value::Float64(n.abs())),

            (ScalarFunction::Ceil | ScalarFunction::Floor, Value::Int64(n)) => Ok(Value::Int64(n)),
            (ScalarFunction::Ceil, Value::Float64(n)) => Ok(Value::Float64(n.ceil())),
            (ScalarFunction::Floor, Value::Float64(n)) => Ok(Value::Float64(n.floor())),

            (ScalarFunction::Sqrt, value @ (Value::Int64(_) | Value::Float64(_))) => {
                let n = value.as_f64().unwrap_or_default();
                if n < 0.0 {
                    return Err(ProcessError::Domain {
                        function: self.function.name(),
                        message: format!("negative input {}", value),
                    });
                }
                Ok(Value::Float64(n.sqrt()))
            }

            (ScalarFunction::Negate, Value::Int64(n)) => {
                n.checked_neg().map(Value::Int64).ok_or_else(|| self.overflow())
            }
            (ScalarFunction::Negate, Value::Float64(n)) => Ok(Value::Float64(-n)),

            (ScalarFunction::Sign, Value::Int64(n)) => Ok(Value::Int64(n.signum())),
            (ScalarFunction::Sign, Value::Float64(n)) => {
                let sign = if n > 0.0 {
                    1
                } else if n < 0.0 {
                    -1
                } else {
                    0
                };
                Ok(Value::Int64(sign))
            }

            (ScalarFunction::Round { digits }, Value::Int64(n)) => self.round_int(n, *digits),
            (ScalarFunction::Round { digits }, Value::Float64(n)) => {
                // f64::round rounds half away from zero
                self.scale_float(n, *digits, f64::round)
            }

            (ScalarFunction::Truncate { digits }, Value::Int64(n)) => {
                if *digits >= 0 {
                    return Ok(Value::Int64(n));
                }
                match 10i64.checked_pow(digits.unsigned_abs()) {
                    Some(p) => Ok(Value::Int64(n - n % p)),
                    None => Ok(Value::Int64(0)),
                }
            }
            (ScalarFunction::Truncate { digits }, Value::Float64(n)) => {
                self.scale_float(n, *digits, f64::trunc)
            }

            (ScalarFunction::Multiply { factor }, Value::Int64(n)) if factor.fract() == 0.0 => {
                let factor = self.integral_operand(*factor)?;
                n.checked_mul(factor).map(Value::Int64).ok_or_else(|| self.overflow())
            }
            (
                ScalarFunction::Multiply { factor },
                value @ (Value::Int64(_) | Value::Float64(_)),
            ) => Ok(Value::Float64(value.as_f64().unwrap_or_default() * factor)),

            (ScalarFunction::Add { addend }, Value::Int64(n)) if addend.fract() == 0.0 => {
                let addend = self.integral_operand(*addend)?;
                n.checked_add(addend).map(Value::Int64).ok_or_else(|| self.overflow())
            }
            (ScalarFunction::Add { addend }, value @ (Value::Int64(_) | Value::Float64(_))) => {
                Ok(Value::Float64(value.as_f64().unwrap_or_default() + addend))
            }

            (_, other) => Err(self.invalid(&other)),
        }
    }

    /// Round an integer to `digits` decimal places, half away from zero.
    /// Non-negative digits leave an integer untouched.
    fn round_int(&self, n: i64, digits: i32) -> ProcessResult<Value> {
        if digits >= 0 {
            return Ok(Value::Int64(n));
        }
        // 10^38 is the largest power of ten in i128; past it every i64 rounds to 0
        let p = match 10i128.checked_pow(digits.unsigned_abs()) {
            Some(p) => p,
            None => return Ok(Value::Int64(0)),
        };
        let n = i128::from(n);
        let rem = n % p;
        let base = n - rem;
        let rounded = if rem.abs() * 2 >= p {
            base + p * n.signum()
        } else {
            base
        };
        i64::try_from(rounded)
            .map(Value::Int64)
            .map_err(|_| self.overflow())
    }

    /// Apply `op` to `n` scaled by 10^digits and scale the result back.
    ///
    /// Once the scaled value has no fractional digits left (2^53 and up, or
    /// not finite) the input is returned as is. A scale that underflows to
    /// zero means every finite input collapses to 0.
    fn scale_float(&self, n: f64, digits: i32, op: fn(f64) -> f64) -> ProcessResult<Value> {
        const EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

        if !n.is_finite() {
            return Ok(Value::Float64(n));
        }
        let scale = 10f64.powi(digits);
        if scale == 0.0 {
            return Ok(Value::Float64(0.0));
        }
        if !scale.is_finite() {
            return Ok(Value::Float64(n));
        }
        let scaled = n * scale;
        if !scaled.is_finite() || (digits > 0 && scaled.abs() >= EXACT_INTEGER) {
            return Ok(Value::Float64(n));
        }
        let result = op(scaled) / scale;
        if result.is_finite() {
            Ok(Value::Float64(result))
        } else {
            Err(self.overflow())
        }
    }

    fn integral_operand(&self, operand: f64) -> ProcessResult<i64> {
        if operand < i64::MIN as f64 || operand >= i64::MAX as f64 {
            return Err(self.overflow());
        }
        Ok(operand as i64)
    }

    fn process_string(&self, input: Value) -> ProcessResult<Value> {
        let s = match input {
            Value::String(s) => s,
            other => return Err(self.invalid(&other)),
        };
        match &self.function {
            ScalarFunction::Upper => Ok(Value::String(s.to_uppercase())),
            ScalarFunction::Lower => Ok(Value::String(s.to_lowercase())),
            ScalarFunction::Trim => Ok(Value::String(s.trim().to_string())),
            ScalarFunction::Length => Ok(Value::Int64(s.chars().count() as i64)),
            ScalarFunction::Concat { suffix } => Ok(Value::String(s + suffix)),
            _ => unreachable!("process_string called for {}", self.function.name()),
        }
    }

    fn process_cast(&self, input: Value, to: DataType) -> ProcessResult<Value> {
        let cast_error = |value: &Value| ProcessError::Cast {
            value: value.to_string(),
            to,
        };
        match (input, to) {
            (Value::String(s), DataType::Varchar) => Ok(Value::String(s)),
            (value, DataType::Varchar) => Ok(Value::String(value.to_string())),

            (Value::Boolean(b), DataType::Boolean) => Ok(Value::Boolean(b)),
            (Value::Int64(n), DataType::Boolean) => Ok(Value::Boolean(n != 0)),
            (Value::Float64(n), DataType::Boolean) => Ok(Value::Boolean(n != 0.0)),
            (Value::String(s), DataType::Boolean) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(cast_error(&Value::String(s))),
            },

            (Value::Boolean(b), DataType::Int64) => Ok(Value::Int64(i64::from(b))),
            (Value::Int64(n), DataType::Int64) => Ok(Value::Int64(n)),
            (Value::Float64(n), DataType::Int64) => {
                if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 {
                    Ok(Value::Int64(n.trunc() as i64))
                } else {
                    Err(cast_error(&Value::Float64(n)))
                }
            }
            (Value::String(s), DataType::Int64) => match s.trim().parse::<i64>() {
                Ok(n) => Ok(Value::Int64(n)),
                Err(_) => Err(cast_error(&Value::String(s))),
            },

            (Value::Boolean(b), DataType::Float64) => Ok(Value::Float64(if b { 1.0 } else { 0.0 })),
            (Value::Int64(n), DataType::Float64) => Ok(Value::Float64(n as f64)),
            (Value::Float64(n), DataType::Float64) => Ok(Value::Float64(n)),
            (Value::String(s), DataType::Float64) => match s.trim().parse::<f64>() {
                Ok(n) => Ok(Value::Float64(n)),
                Err(_) => Err(cast_error(&Value::String(s))),
            },

            (Value::Null, _) => Ok(Value::Null),
        }
    }
}

impl Processor for ScalarProcessor {
    fn process(&self, input: Value) -> ProcessResult<Value> {
        if input.is_null() {
            return Ok(Value::Null);
        }
        match &self.function {
            ScalarFunction::Upper
            | ScalarFunction::Lower
            | ScalarFunction::Trim
            | ScalarFunction::Length
            | ScalarFunction::Concat { .. } => self.process_string(input),
            ScalarFunction::Cast { to } => self.process_cast(input, *to),
            _ => self.process_math(input),
        }
    }
}
