//! HTTP transport implementation for blockchain interactions.
//!
//! Sends JSON-RPC requests to a single provider endpoint with a bounded
//! per-request timeout. No retries are performed; the next scheduled cycle is
//! the retry mechanism.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::services::blockchain::{transports::BlockchainTransport, BlockChainError};

/// Basic HTTP transport client for JSON-RPC requests
///
/// The underlying reqwest client pools connections and is cheap to clone.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	client: Client,
	url: String,
}

impl HttpTransportClient {
	/// Creates a new HTTP transport client
	///
	/// # Arguments
	/// * `url` - JSON-RPC endpoint of the provider
	/// * `timeout` - Upper bound for every request
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or configuration error
	pub fn new(url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let url = Url::parse(url)
			.map_err(|e| BlockChainError::internal_error(format!("Invalid URL {}: {}", url, e)))?;

		let client = ClientBuilder::new().timeout(timeout).build().map_err(|e| {
			BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
		})?;

		Ok(Self {
			client,
			url: url.to_string(),
		})
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn get_current_url(&self) -> &str {
		&self.url
	}

	/// Sends a JSON-RPC request to the provider
	///
	/// # Arguments
	/// * `method` - The JSON-RPC method name to call
	/// * `params` - Optional parameters for the method call
	///
	/// # Returns
	/// * `Result<Value, BlockChainError>` - The full JSON-RPC response, or an error if the
	///   transport failed, the status was not successful or the node returned an `error` object
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request_body = self.customize_request(method, params);

		let response = self
			.client
			.post(&self.url)
			.json(&request_body)
			.send()
			.await?
			.error_for_status()?;

		let json: Value = response.json().await.map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse {} response: {}", method, e))
		})?;

		if let Some(error) = json.get("error") {
			return Err(BlockChainError::request_error(format!(
				"{} returned an error: {}",
				method, error
			)));
		}

		Ok(json)
	}
}
