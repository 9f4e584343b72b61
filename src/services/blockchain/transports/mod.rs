//! Network transport implementations for blockchain clients.
//!
//! Provides the JSON-RPC over HTTP transport used to query the execution
//! layer provider.

mod http;

pub use http::HttpTransportClient;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::services::blockchain::BlockChainError;

/// Base trait for all blockchain transport clients
#[async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL being used by the transport
	fn get_current_url(&self) -> &str;

	/// Send a raw request to the blockchain
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize;

	/// Customizes the request for specific blockchain requirements
	fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		// Default implementation for JSON-RPC
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into())
		})
	}
}
