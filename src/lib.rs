//! Transaction monitor for Ethereum addresses.
//!
//! Polls a block explorer for new transactions on a set of monitored
//! addresses, filters them by function name, classifies the counterparty
//! and emails an alert for every match.
//!
//! # Architecture
//!
//! - `bootstrap`: Service wiring from configuration
//! - `models`: Data structures and configuration
//! - `services`: Clients, polling, classification and notification
//! - `utils`: Logging, metrics and shared constants

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
