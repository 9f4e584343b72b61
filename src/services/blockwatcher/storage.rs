//! Watermark storage implementations.
//!
//! A watermark is the highest block already processed for a monitored
//! address. Keys are normalised to lower case so that differently cased
//! spellings of one address share a watermark.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::services::blockwatcher::error::BlockWatcherError;

/// Interface for watermark storage implementations
#[async_trait]
pub trait WatermarkStorage: Send + Sync {
	/// Retrieves the watermark for an address
	///
	/// # Returns
	/// * `Ok(None)` - The address has not been processed yet
	async fn get_watermark(&self, address: &str) -> Result<Option<u64>, BlockWatcherError>;

	/// Stores the watermark for an address
	///
	/// Implementations never lower a stored watermark.
	async fn save_watermark(&self, address: &str, block: u64) -> Result<(), BlockWatcherError>;
}

/// Process-local watermark storage. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryWatermarkStorage {
	watermarks: RwLock<HashMap<String, u64>>,
}

impl InMemoryWatermarkStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of every stored watermark
	pub async fn snapshot(&self) -> HashMap<String, u64> {
		self.watermarks.read().await.clone()
	}
}

#[async_trait]
impl WatermarkStorage for InMemoryWatermarkStorage {
	async fn get_watermark(&self, address: &str) -> Result<Option<u64>, BlockWatcherError> {
		Ok(self
			.watermarks
			.read()
			.await
			.get(&address.to_lowercase())
			.copied())
	}

	async fn save_watermark(&self, address: &str, block: u64) -> Result<(), BlockWatcherError> {
		let mut watermarks = self.watermarks.write().await;
		let entry = watermarks.entry(address.to_lowercase()).or_insert(block);
		*entry = (*entry).max(block);
		Ok(())
	}
}
