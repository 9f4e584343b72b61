//! Core services implementing the monitoring functionality.
//!
//! This module contains the main service implementations:
//! - `blockchain`: Explorer, JSON-RPC and beacon chain clients
//! - `blockwatcher`: Watermarks, polling cycles and scheduling
//! - `classifier`: Counterparty address classification
//! - `filter`: Function-name filtering
//! - `notification`: Alert rendering and email delivery

pub mod blockchain;
pub mod blockwatcher;
pub mod classifier;
pub mod filter;
pub mod notification;
