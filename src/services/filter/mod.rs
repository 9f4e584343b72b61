//! Transaction filtering functionality.
//!
//! Implements the function-name filter applied to every fetched page of
//! transactions before it reaches the alert pipeline.

mod error;
mod function_filter;

pub use error::FilterError;
pub use function_filter::{filter_transactions, FunctionNameFilter};
