//! Expression model and the structural analysis of column expressions.
//!
//! This module provides:
//! - The expression tree handed over by the planner
//! - Classification of nodes as aggregate or scalar calls
//! - Extraction of the aggregate a column expression is built on
//! - Unwrapping of nested scalar calls into ordered chains
//!
//! All analysis is read-only over the tree.

pub mod chain;
pub mod classify;
pub mod expr;
pub mod extract;

pub use chain::{chain_leaf, unwrap_full_chain, unwrap_scalar_chain};
pub use classify::{classify, is_aggregate, is_scalar, ExpressionKind};
pub use expr::{AggregateCall, Alias, ColumnRef, Expression, Literal, ScalarCall};
pub use extract::extract_aggregate;
