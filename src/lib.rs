pub mod access;
pub mod expression;
pub mod function;
pub mod planner;
pub mod processor;
