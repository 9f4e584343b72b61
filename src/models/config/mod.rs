//! Configuration loading and validation.
//!
//! - `error`: configuration error types
//! - `monitor_config`: environment driven monitor configuration

mod error;
mod monitor_config;

pub use error::ConfigError;
pub use monitor_config::{
	AlertConfig, ExplorerConfig, MetricsConfig, MonitorConfig, NotificationFailurePolicy,
	SmtpConfig,
};
