//! Utility modules for common functionality.
//!
//! This module provides various utility functions and types that are used across
//! the application. Currently includes:
//!
//! - constants: Constants for the application
//! - logging: Logging utilities
//! - metrics: Metrics utilities
//! - tests: Builders for test fixtures

pub mod constants;
pub mod logging;
pub mod metrics;

pub use constants::*;
