//! Counterparty address classification.
//!
//! An address is classified as a smart contract when bytecode is deployed at
//! it. Otherwise, if validator lookups are enabled, the beacon explorer is
//! asked whether one of the validators funded from that address has the
//! inspected transaction as its latest deposit.
//!
//! Every lookup failure degrades to a normal, non-validator address so that a
//! flaky dependency never blocks an alert.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
	models::{latest_deposit, AddressClassification, Transaction, Validator},
	services::blockchain::{has_code, BlockChainError, EvmClientTrait, ValidatorClientTrait},
};

/// Interface for classifying the counterparty of a monitored transaction
#[async_trait]
pub trait AddressClassifierTrait: Send + Sync {
	/// Classifies `address` in the context of `transaction`. Never fails.
	async fn classify(&self, address: &str, transaction: &Transaction) -> AddressClassification;
}

/// Classifier backed by an execution-layer client and an optional beacon explorer client
pub struct AddressClassifier<E, V> {
	evm_client: Arc<E>,
	validator_client: Option<Arc<V>>,
}

impl<E, V> AddressClassifier<E, V>
where
	E: EvmClientTrait,
	V: ValidatorClientTrait,
{
	/// Creates a new classifier
	///
	/// # Arguments
	/// * `evm_client` - Client used for bytecode lookups
	/// * `validator_client` - Beacon explorer client, `None` disables validator lookups
	pub fn new(evm_client: Arc<E>, validator_client: Option<Arc<V>>) -> Self {
		Self {
			evm_client,
			validator_client,
		}
	}

	/// Whether bytecode is deployed at `address`. Lookup failures count as "not a contract".
	pub async fn is_contract(&self, address: &str) -> bool {
		match self.evm_client.get_code(address).await {
			Ok(code) => has_code(&code),
			Err(e) => {
				warn!(address, error = %e, "Bytecode lookup failed, treating address as non-contract");
				false
			}
		}
	}
}

#[async_trait]
impl<E, V> AddressClassifierTrait for AddressClassifier<E, V>
where
	E: EvmClientTrait + 'static,
	V: ValidatorClientTrait + 'static,
{
	#[instrument(skip_all, fields(address = %address, tx = %transaction.hash))]
	async fn classify(&self, address: &str, transaction: &Transaction) -> AddressClassification {
		if address.is_empty() {
			return AddressClassification::normal();
		}

		if self.is_contract(address).await {
			return AddressClassification::contract();
		}

		let Some(validator_client) = &self.validator_client else {
			return AddressClassification::normal();
		};

		match find_matching_validator(validator_client.as_ref(), address, &transaction.hash).await
		{
			Ok(Some(validator)) => AddressClassification::validator(validator),
			Ok(None) => AddressClassification::normal(),
			Err(e) => {
				warn!(error = %e, "Validator lookup failed, treating address as normal");
				AddressClassification::normal()
			}
		}
	}
}

/// Finds the validator whose most recent deposit is `tx_hash`.
///
/// Candidates are checked in the order the explorer lists them for `address` and the first
/// match wins. A candidate whose deposit history cannot be fetched is skipped. This costs one
/// request per candidate on top of the listing, which is acceptable only because matching
/// addresses are rare.
///
/// # Returns
/// * `Ok(None)` - No associated validator, or none whose latest deposit matches
/// * `Err(_)` - The candidate listing itself failed
pub async fn find_matching_validator<V>(
	client: &V,
	address: &str,
	tx_hash: &str,
) -> Result<Option<Validator>, BlockChainError>
where
	V: ValidatorClientTrait + ?Sized,
{
	let candidates = client.get_validators_by_address(address).await?;
	debug!(address, candidates = candidates.len(), "Checking validator candidates");

	for candidate in candidates {
		let deposits = match client.get_deposits(&candidate.public_key).await {
			Ok(deposits) => deposits,
			Err(e) => {
				warn!(
					public_key = %candidate.public_key,
					error = %e,
					"Failed to fetch validator deposits, skipping candidate"
				);
				continue;
			}
		};

		if latest_deposit(&deposits).is_some_and(|d| d.tx_hash.eq_ignore_ascii_case(tx_hash)) {
			return Ok(Some(candidate));
		}
	}

	Ok(None)
}
