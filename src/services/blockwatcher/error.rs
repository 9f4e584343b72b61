//! Address watcher error types and handling.
//!
//! Provides error types for scheduling polling cycles and for watermark
//! storage access.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors during address watching
#[derive(Debug)]
pub enum BlockWatcherError {
	/// Errors creating, starting or stopping the cron scheduler
	SchedulerError(String),
	/// Errors reading or writing watermarks
	StorageError(String),
	/// Errors while processing a polling cycle
	ProcessingError(String),
}

impl BlockWatcherError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::SchedulerError(msg) => format!("Scheduler error: {}", msg),
			Self::StorageError(msg) => format!("Storage error: {}", msg),
			Self::ProcessingError(msg) => format!("Processing error: {}", msg),
		}
	}

	/// Creates a new scheduler error with logging
	pub fn scheduler_error(msg: impl Into<String>) -> Self {
		let error = Self::SchedulerError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new storage error with logging
	pub fn storage_error(msg: impl Into<String>) -> Self {
		let error = Self::StorageError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new processing error with logging
	pub fn processing_error(msg: impl Into<String>) -> Self {
		let error = Self::ProcessingError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for BlockWatcherError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for BlockWatcherError {}
