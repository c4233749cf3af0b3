//! Runtime values returned by the backend.

pub mod value;

pub use value::{DataType, Value};
