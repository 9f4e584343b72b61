//! Block explorer client implementation.
//!
//! Lists the transactions of an account through an Etherscan-compatible
//! `account/txlist` endpoint.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{
	models::Transaction,
	services::blockchain::{client::TransactionSource, BlockChainError},
};

/// Message the explorer returns alongside `status: "0"` when an account simply has no activity
const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found";

/// Envelope wrapping every explorer response
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
	status: String,
	#[serde(default)]
	message: String,
	#[serde(default)]
	result: Value,
}

/// Client for an Etherscan-compatible explorer API
#[derive(Clone)]
pub struct ExplorerClient {
	client: Client,
	api_url: String,
	api_key: String,
}

impl ExplorerClient {
	/// Creates a new explorer client
	///
	/// # Arguments
	/// * `api_url` - Base API endpoint, e.g. `https://api.etherscan.io/api`
	/// * `api_key` - Explorer API key
	/// * `timeout` - Upper bound for every request
	pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let client = ClientBuilder::new().timeout(timeout).build().map_err(|e| {
			BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
		})?;

		Ok(Self {
			client,
			api_url: api_url.to_string(),
			api_key: api_key.to_string(),
		})
	}
}

#[async_trait]
impl TransactionSource for ExplorerClient {
	async fn get_transactions(
		&self,
		address: &str,
		start_block: u64,
	) -> Result<Vec<Transaction>, BlockChainError> {
		let start_block = start_block.to_string();
		let response = self
			.client
			.get(&self.api_url)
			.query(&[
				("module", "account"),
				("action", "txlist"),
				("address", address),
				("startblock", start_block.as_str()),
				("sort", "desc"),
				("apikey", self.api_key.as_str()),
			])
			.send()
			.await?
			.error_for_status()?;

		let body: ExplorerResponse = response.json().await.map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse explorer response: {}", e))
		})?;

		parse_transactions(address, body)
	}
}

/// Unwraps the explorer envelope into transactions.
///
/// Records that cannot be decoded are skipped rather than failing the whole page.
fn parse_transactions(
	address: &str,
	body: ExplorerResponse,
) -> Result<Vec<Transaction>, BlockChainError> {
	if body.status != "1" {
		if body.message.starts_with(NO_TRANSACTIONS_MESSAGE) {
			return Ok(Vec::new());
		}
		let detail = match &body.result {
			Value::String(detail) => detail.clone(),
			Value::Null => String::new(),
			other => other.to_string(),
		};
		return Err(BlockChainError::api_error(format!(
			"Explorer rejected txlist request for {}: {} {}",
			address, body.message, detail
		)));
	}

	let records = match body.result {
		Value::Array(records) => records,
		other => {
			return Err(BlockChainError::request_error(format!(
				"Expected a list of transactions, got: {}",
				other
			)))
		}
	};

	Ok(records
		.into_iter()
		.filter_map(|record| match serde_json::from_value::<Transaction>(record) {
			Ok(transaction) => Some(transaction),
			Err(e) => {
				tracing::warn!(address, error = %e, "Skipping malformed explorer transaction");
				None
			}
		})
		.collect())
}
