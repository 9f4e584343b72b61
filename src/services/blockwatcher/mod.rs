//! Address watching functionality.
//!
//! This module handles the incremental polling of monitored addresses:
//! - Watermark storage per address
//! - Polling cycles with a non-overlapping run guard
//! - Cron scheduling of cycles

mod error;
mod service;
mod storage;

pub use error::BlockWatcherError;
pub use service::{
	poll_address, resolve_watermark, AddressOutcome, AddressWatcher, AddressWatcherService,
	AlertPipeline, CycleSummary, JobSchedulerTrait, PollOutcome,
};
pub use storage::{InMemoryWatermarkStorage, WatermarkStorage};
