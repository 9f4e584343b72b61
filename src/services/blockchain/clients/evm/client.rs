//! EVM-compatible blockchain client implementation.
//!
//! This module provides the execution-layer lookups the monitor needs, which
//! currently amount to reading the bytecode deployed at an address.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::services::blockchain::{
	transports::{BlockchainTransport, HttpTransportClient},
	BlockChainError,
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
///
/// Provides access to chain state through a JSON-RPC transport.
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	transport: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

impl EvmClient<HttpTransportClient> {
	/// Creates a new EVM client instance
	///
	/// # Arguments
	/// * `rpc_url` - JSON-RPC endpoint of the provider
	/// * `timeout` - Upper bound for every request
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or configuration error
	pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::new(rpc_url, timeout)?;
		Ok(Self::new_with_transport(transport))
	}
}

/// Extended functionality specific to EVM-compatible blockchains
#[async_trait]
pub trait EvmClientTrait: Send + Sync {
	/// Retrieves the bytecode deployed at an address at the latest block
	///
	/// # Arguments
	/// * `address` - The address to inspect
	///
	/// # Returns
	/// * `Result<String, BlockChainError>` - Hex encoded bytecode (`0x` when empty) or error
	async fn get_code(&self, address: &str) -> Result<String, BlockChainError>;
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> EvmClientTrait for EvmClient<T> {
	async fn get_code(&self, address: &str) -> Result<String, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("eth_getCode", Some(json!([address, "latest"])))
			.await?;

		// Extract the "result" field from the JSON-RPC response
		response
			.get("result")
			.and_then(|v| v.as_str())
			.map(str::to_string)
			.ok_or_else(|| BlockChainError::request_error("Missing 'result' field".to_string()))
	}
}

/// Whether a `eth_getCode` result denotes deployed bytecode
pub fn has_code(code: &str) -> bool {
	let code = code.trim();
	let hex = code.strip_prefix("0x").unwrap_or(code);
	!hex.is_empty() && hex.chars().any(|c| c != '0')
}
