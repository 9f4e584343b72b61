//! Constants used throughout the application

/// Default Etherscan-compatible explorer endpoint
pub const DEFAULT_EXPLORER_API_URL: &str = "https://api.etherscan.io/api";

/// Default beacon chain explorer used for validator lookups
pub const DEFAULT_BEACON_API_URL: &str = "https://beaconcha.in";

/// Top of every hour (six-field cron, seconds first)
pub const DEFAULT_CRON_SCHEDULE: &str = "0 0 * * * *";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_SMTP_PORT: u16 = 465;

pub const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";

pub const DEFAULT_ALERT_SUBJECT: &str = "Transaction alert: ${event} on ${monitored_address}";

pub const DEFAULT_ALERT_BODY: &str = "A new ${event} transaction was detected.\n\
	\n\
	Monitored address: ${monitored_address}\n\
	Address: ${address}\n\
	Address type: ${address_type}\n\
	Block number: ${block_number}\n\
	Transaction hash: ${transaction_hash}\n\
	Timestamp: ${timestamp}";
