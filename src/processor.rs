//! Client-side post-processing of backend values.
//!
//! The backend evaluates only the leaf of a column expression (a column
//! read or an aggregate). Scalar functions wrapping that leaf are turned
//! into processors here and re-applied to the raw value, innermost first.

pub mod compose;
pub mod error;
pub mod scalar;

pub use compose::{chain_processors, ComposeProcessor};
pub use error::{ProcessError, ProcessResult};
pub use scalar::ScalarProcessor;

use crate::access::Value;
use std::fmt::Debug;

/// Transforms one runtime value into another.
///
/// Processors are immutable once built, so a compiled plan can be shared
/// between the threads materializing rows.
pub trait Processor: Debug + Send + Sync {
    fn process(&self, input: Value) -> ProcessResult<Value>;
}

/// Run `raw` through an optional processor; no processor means the raw
/// value is passed through unchanged.
pub fn apply(processor: Option<&dyn Processor>, raw: Value) -> ProcessResult<Value> {
    match processor {
        Some(processor) => processor.process(raw),
        None => Ok(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::ScalarFunction;

    #[test]
    fn test_apply_without_processor_is_identity() {
        let raw = Value::Float64(-2.5);
        assert_eq!(apply(None, raw.clone()).unwrap(), raw);
        assert_eq!(apply(None, Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_apply_with_processor() {
        let processor = ScalarFunction::Abs.as_processor();
        assert_eq!(
            apply(Some(processor.as_ref()), Value::Float64(-2.5)).unwrap(),
            Value::Float64(2.5)
        );
    }
}
