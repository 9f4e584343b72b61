//! Beacon chain validator data structures.
//!
//! These mirror the beacon explorer responses used to resolve whether an
//! address backs a staking validator.

use serde::{Deserialize, Serialize};

/// A validator associated with an execution-layer address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
	/// Validator index, `None` while the deposit is still pending activation
	#[serde(rename = "validatorindex", default)]
	pub index: Option<u64>,

	/// BLS public key of the validator
	#[serde(rename = "publickey")]
	pub public_key: String,
}

impl Validator {
	/// Index rendered for humans, `pending` when no index has been assigned yet
	pub fn display_index(&self) -> String {
		self.index
			.map(|index| index.to_string())
			.unwrap_or_else(|| "pending".to_string())
	}
}

/// A deposit made towards a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDeposit {
	/// Hash of the execution-layer deposit transaction
	pub tx_hash: String,

	/// Execution-layer block that included the deposit
	#[serde(default)]
	pub block_number: u64,

	/// Address that submitted the deposit
	#[serde(default)]
	pub from_address: Option<String>,

	/// Deposited amount in gwei
	#[serde(default)]
	pub amount: Option<u64>,
}

/// Selects the most recent deposit, i.e. the one with the highest block number.
///
/// Ties keep the entry that appears first in the input.
pub fn latest_deposit(deposits: &[ValidatorDeposit]) -> Option<&ValidatorDeposit> {
	deposits.iter().fold(None, |latest, deposit| match latest {
		Some(current) if current.block_number >= deposit.block_number => Some(current),
		_ => Some(deposit),
	})
}
