//! Notification error types and handling.
//!
//! Provides error types for alert delivery, including SMTP failures
//! and problems building the outgoing message.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors during notification operations
#[derive(Debug)]
pub enum NotificationError {
	/// Delivery errors (e.g., relay unreachable, message rejected)
	NetworkError(String),
	/// Configuration-related errors (e.g., invalid relay host)
	ConfigError(String),
	/// Internal errors (e.g., failed to build email)
	InternalError(String),
}

impl NotificationError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::NetworkError(msg) => format!("Network error: {}", msg),
			Self::ConfigError(msg) => format!("Config error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new network error with logging
	pub fn network_error(msg: impl Into<String>) -> Self {
		let error = Self::NetworkError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new configuration error with logging
	pub fn config_error(msg: impl Into<String>) -> Self {
		let error = Self::ConfigError(msg.into());
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

impl fmt::Display for NotificationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for NotificationError {}
