//! Monitor configuration loading and validation.
//!
//! The monitor is configured entirely through environment variables (a `.env`
//! file is honoured by the binary). Values are read through a lookup function
//! so the loader can be exercised without touching the process environment.

use alloy::primitives::Address;
use email_address::EmailAddress;
use std::{fmt, str::FromStr, time::Duration};
use url::Url;

use crate::{
	models::{config::error::ConfigError, FunctionNameSet},
	utils::constants::{
		DEFAULT_ALERT_BODY, DEFAULT_ALERT_SUBJECT, DEFAULT_BEACON_API_URL, DEFAULT_CRON_SCHEDULE,
		DEFAULT_EXPLORER_API_URL, DEFAULT_METRICS_ADDRESS, DEFAULT_REQUEST_TIMEOUT_SECS,
		DEFAULT_SMTP_PORT,
	},
};

/// What happens to the watermark when an alert for a transaction fails to send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationFailurePolicy {
	/// The transaction counts as processed regardless (at-most-once delivery)
	#[default]
	Advance,
	/// The watermark stops below the lowest failed block so the alert is retried
	/// next cycle (at-least-once delivery)
	Hold,
}

impl FromStr for NotificationFailurePolicy {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"advance" => Ok(Self::Advance),
			"hold" => Ok(Self::Hold),
			other => Err(ConfigError::validation_error(format!(
				"Invalid notification failure policy '{}', expected 'advance' or 'hold'",
				other
			))),
		}
	}
}

/// Block explorer endpoint used to list transactions
#[derive(Clone)]
pub struct ExplorerConfig {
	pub api_url: String,
	pub api_key: String,
}

impl fmt::Debug for ExplorerConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExplorerConfig")
			.field("api_url", &self.api_url)
			.field("api_key", &"<redacted>")
			.finish()
	}
}

/// Configuration for SMTP connection
#[derive(Clone)]
pub struct SmtpConfig {
	pub host: String,
	pub port: u16,
	pub username: Option<String>,
	pub password: Option<String>,
}

impl fmt::Debug for SmtpConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SmtpConfig")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("username", &self.username)
			.field("password", &self.password.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Alerting pipeline configuration. Absent when alerts are disabled.
#[derive(Debug, Clone)]
pub struct AlertConfig {
	pub smtp: SmtpConfig,
	pub sender: EmailAddress,
	pub recipients: Vec<EmailAddress>,
	pub subject_template: String,
	pub body_template: String,
	/// Beacon explorer base URL, `None` when validator lookups are disabled
	pub beacon_api_url: Option<String>,
}

/// Prometheus endpoint settings
#[derive(Debug, Clone)]
pub struct MetricsConfig {
	pub enabled: bool,
	pub address: String,
}

/// Complete monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
	/// Addresses to watch, in configured order
	pub addresses: Vec<String>,
	/// Accepted function-signature prefixes
	pub function_names: FunctionNameSet,
	/// JSON-RPC provider used for bytecode lookups
	pub rpc_url: String,
	pub explorer: ExplorerConfig,
	/// `None` runs the monitor in watermark-only mode
	pub alerts: Option<AlertConfig>,
	pub cron_schedule: String,
	/// Upper bound applied to every external call
	pub request_timeout: Duration,
	/// Number of addresses polled in parallel within one cycle
	pub address_concurrency: usize,
	pub notification_failure_policy: NotificationFailurePolicy,
	pub metrics: MetricsConfig,
}

impl MonitorConfig {
	/// Loads the configuration from the process environment
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the configuration using `lookup` to resolve variable names
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| -> Option<String> {
			lookup(key)
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty())
		};
		let require = |key: &str| -> Result<String, ConfigError> {
			get(key).ok_or_else(|| {
				ConfigError::missing_value(format!("environment variable {} is not set", key))
			})
		};

		let addresses = parse_addresses(&require("MONITORED_ADDRESSES")?)?;
		let function_names = FunctionNameSet::parse(&require("FUNCTION_NAMES")?);
		let rpc_url = require("RPC_URL")?;

		let explorer = ExplorerConfig {
			api_url: get("ETHERSCAN_API_URL")
				.unwrap_or_else(|| DEFAULT_EXPLORER_API_URL.to_string()),
			api_key: require("ETHERSCAN_API_KEY")?,
		};

		let alerts = if parse_bool(get("ALERTS_ENABLED"), "ALERTS_ENABLED", true)? {
			let recipients = require("ALERT_RECIPIENTS")?
				.split(',')
				.map(str::trim)
				.filter(|r| !r.is_empty())
				.map(parse_email)
				.collect::<Result<Vec<_>, _>>()?;

			let username = get("SMTP_USERNAME");
			let password = get("SMTP_PASSWORD");
			if username.is_some() != password.is_some() {
				return Err(ConfigError::validation_error(
					"SMTP_USERNAME and SMTP_PASSWORD must be set together",
				));
			}

			let port = match get("SMTP_PORT") {
				Some(port) => port.parse::<u16>().map_err(|e| {
					ConfigError::parse_error(format!("Invalid SMTP_PORT '{}': {}", port, e))
				})?,
				None => DEFAULT_SMTP_PORT,
			};

			let beacon_api_url = if parse_bool(
				get("VALIDATOR_LOOKUP_ENABLED"),
				"VALIDATOR_LOOKUP_ENABLED",
				true,
			)? {
				Some(get("BEACON_API_URL").unwrap_or_else(|| DEFAULT_BEACON_API_URL.to_string()))
			} else {
				None
			};

			Some(AlertConfig {
				smtp: SmtpConfig {
					host: require("SMTP_HOST")?,
					port,
					username,
					password,
				},
				sender: parse_email(&require("ALERT_SENDER")?)?,
				recipients,
				subject_template: get("ALERT_SUBJECT")
					.unwrap_or_else(|| DEFAULT_ALERT_SUBJECT.to_string()),
				body_template: lookup("ALERT_BODY")
					.filter(|body| !body.trim().is_empty())
					.map(|body| body.replace("\\n", "\n"))
					.unwrap_or_else(|| DEFAULT_ALERT_BODY.to_string()),
				beacon_api_url,
			})
		} else {
			None
		};

		let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
			Some(value) => value.parse::<u64>()?,
			None => DEFAULT_REQUEST_TIMEOUT_SECS,
		};

		let address_concurrency = match get("ADDRESS_CONCURRENCY") {
			Some(value) => value.parse::<usize>().map_err(|e| {
				ConfigError::parse_error(format!("Invalid ADDRESS_CONCURRENCY '{}': {}", value, e))
			})?,
			None => 1,
		};

		let config = Self {
			addresses,
			function_names,
			rpc_url,
			explorer,
			alerts,
			cron_schedule: get("CRON_SCHEDULE").unwrap_or_else(|| DEFAULT_CRON_SCHEDULE.to_string()),
			request_timeout: Duration::from_secs(request_timeout_secs),
			address_concurrency,
			notification_failure_policy: get("NOTIFICATION_FAILURE_POLICY")
				.map(|policy| policy.parse())
				.transpose()?
				.unwrap_or_default(),
			metrics: MetricsConfig {
				enabled: parse_bool(get("METRICS_ENABLED"), "METRICS_ENABLED", false)?,
				address: get("METRICS_ADDRESS")
					.unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string()),
			},
		};

		config.validate()?;
		Ok(config)
	}

	/// Validate the monitor configuration
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.addresses.is_empty() {
			return Err(ConfigError::validation_error(
				"At least one monitored address is required",
			));
		}

		validate_url("RPC_URL", &self.rpc_url)?;
		validate_url("ETHERSCAN_API_URL", &self.explorer.api_url)?;

		if let Some(alerts) = &self.alerts {
			if alerts.recipients.is_empty() {
				return Err(ConfigError::validation_error(
					"At least one alert recipient is required when alerts are enabled",
				));
			}
			if let Some(beacon_api_url) = &alerts.beacon_api_url {
				validate_url("BEACON_API_URL", beacon_api_url)?;
			}
		}

		cron::Schedule::from_str(&self.cron_schedule).map_err(|e| {
			ConfigError::validation_error(format!(
				"Invalid cron schedule '{}': {}",
				self.cron_schedule, e
			))
		})?;

		if self.request_timeout.is_zero() {
			return Err(ConfigError::validation_error(
				"REQUEST_TIMEOUT_SECS must be greater than zero",
			));
		}

		if self.address_concurrency == 0 {
			return Err(ConfigError::validation_error(
				"ADDRESS_CONCURRENCY must be greater than zero",
			));
		}

		Ok(())
	}
}

/// Splits and validates the monitored address list, dropping case-insensitive duplicates
fn parse_addresses(list: &str) -> Result<Vec<String>, ConfigError> {
	let mut addresses: Vec<String> = Vec::new();
	for address in list.split(',').map(str::trim).filter(|a| !a.is_empty()) {
		Address::from_str(address).map_err(|e| {
			ConfigError::validation_error(format!("Invalid address '{}': {}", address, e))
		})?;
		if addresses.iter().any(|a| a.eq_ignore_ascii_case(address)) {
			tracing::warn!(address, "Ignoring duplicate monitored address");
			continue;
		}
		addresses.push(address.to_string());
	}
	Ok(addresses)
}

fn parse_email(value: &str) -> Result<EmailAddress, ConfigError> {
	EmailAddress::from_str(value.trim()).map_err(|e| {
		ConfigError::parse_error(format!("Invalid email address '{}': {}", value, e))
	})
}

fn parse_bool(value: Option<String>, key: &str, default: bool) -> Result<bool, ConfigError> {
	match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
		None => Ok(default),
		Some("true") | Some("1") | Some("yes") => Ok(true),
		Some("false") | Some("0") | Some("no") => Ok(false),
		Some(other) => Err(ConfigError::parse_error(format!(
			"Invalid boolean '{}' for {}",
			other, key
		))),
	}
}

fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
	Url::parse(value)
		.map(|_| ())
		.map_err(|e| ConfigError::validation_error(format!("Invalid {} '{}': {}", key, value, e)))
}
