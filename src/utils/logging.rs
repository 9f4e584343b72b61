//! Logging utilities for the application
//!
//! This module sets up `tracing_subscriber` for the application. Output goes
//! to stdout by default, or to a daily rolling file when `LOG_MODE=file`.
//!
//! Environment variables:
//! - `LOG_MODE`: `stdout` (default) or `file`
//! - `LOG_LEVEL`: default filter when `RUST_LOG` is not set (default `info`)
//! - `LOG_DATA_DIR`: directory for log files (default `logs/`)
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "tx-monitor.log";
const DEFAULT_LOG_DIR: &str = "logs/";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Where log output is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
	Stdout,
	/// Daily rolling files in the given directory
	File(PathBuf),
}

/// Logging settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub mode: LogMode,
	pub level: String,
}

impl LoggingConfig {
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds the settings from an arbitrary variable lookup
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let mode = match lookup("LOG_MODE").map(|m| m.trim().to_ascii_lowercase()) {
			Some(mode) if mode == "file" => LogMode::File(PathBuf::from(
				lookup("LOG_DATA_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
			)),
			_ => LogMode::Stdout,
		};
		let level = lookup("LOG_LEVEL")
			.filter(|l| !l.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

		Self { mode, level }
	}

	/// `RUST_LOG` takes precedence over `LOG_LEVEL`
	fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
	}
}

/// Setup logging for the application
///
/// Reads [`LoggingConfig`] from the environment and installs the global subscriber.
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	let config = LoggingConfig::from_env();
	match &config.mode {
		LogMode::Stdout => init_subscriber(std::io::stdout, config.env_filter(), true),
		LogMode::File(dir) => {
			std::fs::create_dir_all(dir)?;
			let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
			init_subscriber(appender, config.env_filter(), false)
		}
	}
}

/// Setup logging for the application with a custom writer
///
/// Uses `RUST_LOG` when set, `info` otherwise.
pub fn setup_logging_with_writer<W>(
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
	init_subscriber(writer, filter, true)
}

fn init_subscriber<W>(
	writer: W,
	filter: EnvFilter,
	ansi: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(writer)
				.with_ansi(ansi)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(ansi)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
