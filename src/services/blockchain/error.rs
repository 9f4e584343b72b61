//! Blockchain error types and handling.
//!
//! This module provides the error type shared by every external chain data
//! wrapper: the explorer API, the JSON-RPC provider and the beacon explorer.

use log::error;

/// Represents possible errors that can occur during blockchain data lookups
#[derive(Debug)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues (including timeouts)
	ConnectionError(String),

	/// Errors related to malformed requests or invalid responses
	RequestError(String),

	/// The remote API answered but reported a failure (e.g. invalid API key)
	ApiError(String),

	/// Internal errors within the blockchain client
	InternalError(String),
}

impl BlockChainError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::ApiError(msg) => format!("API error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new API error with logging
	pub fn api_error(msg: impl Into<String>) -> Self {
		let error = Self::ApiError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

// Standard error trait implementations
impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}

/// Conversion from reqwest errors to BlockChainError
impl From<reqwest::Error> for BlockChainError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_timeout() || err.is_connect() {
			Self::connection_error(err.to_string())
		} else {
			Self::request_error(err.to_string())
		}
	}
}
