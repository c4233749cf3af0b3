//! Error types for value processing.

use crate::access::DataType;
use thiserror::Error;

/// Errors that can occur while a processor transforms a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("Function {function} cannot process a value of type {value_type}")]
    InvalidArgumentType {
        function: &'static str,
        value_type: DataType,
    },

    #[error("Function {function} is undefined for {message}")]
    Domain {
        function: &'static str,
        message: String,
    },

    #[error("Numeric overflow in function {function}")]
    Overflow { function: &'static str },

    #[error("Cannot cast {value} to {to}")]
    Cast { value: String, to: DataType },
}

/// Result type for processor operations
pub type ProcessResult<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProcessError::InvalidArgumentType {
            function: "ABS",
            value_type: DataType::Varchar,
        };
        assert_eq!(
            err.to_string(),
            "Function ABS cannot process a value of type VARCHAR"
        );

        let err = ProcessError::Domain {
            function: "SQRT",
            message: "negative input -4".to_string(),
        };
        assert_eq!(err.to_string(), "Function SQRT is undefined for negative input -4");

        let err = ProcessError::Overflow { function: "NEGATE" };
        assert_eq!(err.to_string(), "Numeric overflow in function NEGATE");

        let err = ProcessError::Cast {
            value: "'abc'".to_string(),
            to: DataType::Int64,
        };
        assert_eq!(err.to_string(), "Cannot cast 'abc' to BIGINT");
    }
}
