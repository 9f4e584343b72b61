//! Beacon chain explorer client implementation.
//!
//! Resolves the validators associated with an execution-layer address and
//! their deposit history through a beaconcha.in compatible API.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::time::Duration;

use crate::{
	models::{Validator, ValidatorDeposit},
	services::blockchain::BlockChainError,
};

/// Lookups against the beacon chain explorer
#[async_trait]
pub trait ValidatorClientTrait: Send + Sync {
	/// Lists validators whose deposits trace back to `address`, in API order
	async fn get_validators_by_address(
		&self,
		address: &str,
	) -> Result<Vec<Validator>, BlockChainError>;

	/// Lists the deposits made for the validator identified by `public_key`
	async fn get_deposits(&self, public_key: &str)
		-> Result<Vec<ValidatorDeposit>, BlockChainError>;
}

/// `data` is an object when a single entry matches and an array otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
	Many(Vec<T>),
	One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
	fn from(value: OneOrMany<T>) -> Self {
		match value {
			OneOrMany::Many(items) => items,
			OneOrMany::One(item) => vec![item],
		}
	}
}

#[derive(Debug, Deserialize)]
struct BeaconResponse {
	status: String,
	#[serde(default)]
	data: Value,
}

/// Client for a beaconcha.in compatible API
#[derive(Clone)]
pub struct BeaconClient {
	client: Client,
	base_url: String,
}

impl BeaconClient {
	/// Creates a new beacon explorer client
	///
	/// # Arguments
	/// * `base_url` - API host, e.g. `https://beaconcha.in`
	/// * `timeout` - Upper bound for every request
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let client = ClientBuilder::new().timeout(timeout).build().map_err(|e| {
			BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
		})?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, BlockChainError> {
		let url = format!("{}{}", self.base_url, path);
		let response = self.client.get(&url).send().await?.error_for_status()?;

		let body: BeaconResponse = response.json().await.map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse response from {}: {}", url, e))
		})?;

		parse_data(&url, body)
	}
}

fn parse_data<T: DeserializeOwned>(url: &str, body: BeaconResponse) -> Result<Vec<T>, BlockChainError> {
	if !body.status.eq_ignore_ascii_case("OK") {
		return Err(BlockChainError::api_error(format!(
			"{} answered with status {}",
			url, body.status
		)));
	}

	if body.data.is_null() {
		return Ok(Vec::new());
	}

	serde_json::from_value::<OneOrMany<T>>(body.data)
		.map(Vec::from)
		.map_err(|e| BlockChainError::request_error(format!("Unexpected data from {}: {}", url, e)))
}

#[async_trait]
impl ValidatorClientTrait for BeaconClient {
	async fn get_validators_by_address(
		&self,
		address: &str,
	) -> Result<Vec<Validator>, BlockChainError> {
		self.get_list(&format!("/api/v1/validator/eth1/{}", address))
			.await
	}

	async fn get_deposits(
		&self,
		public_key: &str,
	) -> Result<Vec<ValidatorDeposit>, BlockChainError> {
		self.get_list(&format!("/api/v1/validator/{}/deposits", public_key))
			.await
	}
}
