//! Filter error types and handling.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors while building or applying filters
#[derive(Debug)]
pub enum FilterError {
	/// A configured prefix could not be compiled into a matcher
	InvalidPattern(String),
}

impl FilterError {
	fn format_message(&self) -> String {
		match self {
			Self::InvalidPattern(msg) => format!("Invalid pattern: {}", msg),
		}
	}

	/// Creates a new invalid pattern error with logging
	pub fn invalid_pattern(msg: impl Into<String>) -> Self {
		let error = Self::InvalidPattern(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for FilterError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for FilterError {}
