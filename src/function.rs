//! Function kinds that can appear in an expression tree.
//!
//! - `ScalarFunction`: unary value-to-value functions re-applied client side
//! - `AggregateFunction`: group computations performed by the backend

pub mod aggregate;
pub mod scalar;

pub use aggregate::AggregateFunction;
pub use scalar::ScalarFunction;

use thiserror::Error;

/// Errors raised while resolving a function by name
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function {function} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument for function {function}: {argument}")]
    InvalidArgument { function: String, argument: String },
}

pub type FunctionResult<T> = std::result::Result<T, FunctionError>;
