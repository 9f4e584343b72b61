//! Domain models and data structures for transaction monitoring.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: Ethereum transaction and validator types
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (function name sets, address classification)

mod blockchain;
mod config;
mod core;

pub use blockchain::evm::{latest_deposit, Transaction, Validator, ValidatorDeposit};

pub use core::{
	AddressClassification, AddressType, FunctionNameSet, ACCEPT_ALL_TOKEN, TRANSFER_PREFIX,
};

pub use config::{
	AlertConfig, ConfigError, ExplorerConfig, MetricsConfig, MonitorConfig,
	NotificationFailurePolicy, SmtpConfig,
};
