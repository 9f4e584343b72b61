//! Test helper utilities for explorer transactions
//!
//! - `TransactionBuilder`: Builder for creating test Transaction instances

use crate::models::Transaction;

/// Builder for creating test Transaction instances
pub struct TransactionBuilder {
	hash: Option<String>,
	block_number: u64,
	from: String,
	to: String,
	function_name: String,
	timestamp: Option<u64>,
	value: Option<String>,
	contract_address: Option<String>,
}

impl Default for TransactionBuilder {
	fn default() -> Self {
		Self {
			hash: None,
			block_number: 1,
			from: "0x1111111111111111111111111111111111111111".to_string(),
			to: "0x2222222222222222222222222222222222222222".to_string(),
			function_name: String::new(),
			timestamp: Some(1_700_000_000),
			value: Some("0".to_string()),
			contract_address: None,
		}
	}
}

impl TransactionBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn hash(mut self, hash: &str) -> Self {
		self.hash = Some(hash.to_string());
		self
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.block_number = block_number;
		self
	}

	pub fn from(mut self, from: &str) -> Self {
		self.from = from.to_string();
		self
	}

	pub fn to(mut self, to: &str) -> Self {
		self.to = to.to_string();
		self
	}

	pub fn function_name(mut self, function_name: &str) -> Self {
		self.function_name = function_name.to_string();
		self
	}

	pub fn timestamp(mut self, timestamp: Option<u64>) -> Self {
		self.timestamp = timestamp;
		self
	}

	pub fn value(mut self, value: &str) -> Self {
		self.value = Some(value.to_string());
		self
	}

	pub fn contract_address(mut self, contract_address: &str) -> Self {
		self.contract_address = Some(contract_address.to_string());
		self
	}

	/// Builds the transaction. Without an explicit hash, one is derived from the block number.
	pub fn build(self) -> Transaction {
		Transaction {
			hash: self
				.hash
				.unwrap_or_else(|| format!("0x{:064x}", self.block_number)),
			block_number: self.block_number,
			from: self.from,
			to: self.to,
			function_name: self.function_name,
			timestamp: self.timestamp,
			value: self.value,
			contract_address: self.contract_address,
			raw: serde_json::Map::new(),
		}
	}
}
