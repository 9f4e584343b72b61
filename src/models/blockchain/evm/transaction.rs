//! EVM transaction data structures.
//!
//! Transactions are produced by the explorer `txlist` endpoint, which encodes
//! every field as a string. The fields the monitor acts on are parsed into
//! typed members, everything else is carried through untouched in `raw`.

use serde::{Deserialize, Deserializer, Serialize};

/// A transaction as reported by the block explorer for a monitored address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
	/// Transaction hash
	pub hash: String,

	/// Block the transaction was included in
	#[serde(rename = "blockNumber", deserialize_with = "deserialize_block_number")]
	pub block_number: u64,

	/// Sender address
	#[serde(default)]
	pub from: String,

	/// Recipient address (empty for contract creation)
	#[serde(default)]
	pub to: String,

	/// Invoked function signature, e.g. `transfer(address _to, uint256 _value)`.
	/// Empty for plain value transfers.
	#[serde(rename = "functionName", default)]
	pub function_name: String,

	/// Unix timestamp of the block
	#[serde(
		rename = "timeStamp",
		default,
		deserialize_with = "deserialize_optional_u64"
	)]
	pub timestamp: Option<u64>,

	/// Transferred value in wei
	#[serde(default)]
	pub value: Option<String>,

	/// Created contract address, only set for contract creations
	#[serde(
		rename = "contractAddress",
		default,
		deserialize_with = "deserialize_non_empty"
	)]
	pub contract_address: Option<String>,

	/// Remaining explorer fields, passed through verbatim
	#[serde(flatten)]
	pub raw: serde_json::Map<String, serde_json::Value>,
}

impl Transaction {
	/// Returns the event label for this transaction.
	///
	/// The label is the identifier portion of the function signature (before the
	/// first parenthesis), or `transfer` for a plain value transfer.
	pub fn event_name(&self) -> String {
		let name = self.function_name.trim();
		if name.is_empty() {
			return "transfer".to_string();
		}
		name.split('(').next().unwrap_or(name).trim().to_string()
	}

	/// Whether this transaction carries no function signature (plain value transfer)
	pub fn is_plain_transfer(&self) -> bool {
		self.function_name.trim().is_empty()
	}

	/// Resolves the address on the other side of the transaction relative to `monitored`.
	///
	/// If the monitored address sent the transaction, the counterparty is the recipient
	/// (or the created contract for deployments). Otherwise it is the sender.
	pub fn counterparty(&self, monitored: &str) -> &str {
		if self.from.eq_ignore_ascii_case(monitored) {
			if self.to.is_empty() {
				self.contract_address.as_deref().unwrap_or_default()
			} else {
				&self.to
			}
		} else {
			&self.from
		}
	}
}

/// Parses a numeric string, accepting both decimal and `0x` prefixed hex
pub(crate) fn parse_numeric(value: &str) -> Result<u64, std::num::ParseIntError> {
	let value = value.trim();
	match value.strip_prefix("0x") {
		Some(hex) => u64::from_str_radix(hex, 16),
		None => value.parse::<u64>(),
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
	Number(u64),
	String(String),
}

fn deserialize_block_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	match NumberOrString::deserialize(deserializer)? {
		NumberOrString::Number(n) => Ok(n),
		NumberOrString::String(s) => parse_numeric(&s).map_err(serde::de::Error::custom),
	}
}

fn deserialize_optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<NumberOrString>::deserialize(deserializer)? {
		None => Ok(None),
		Some(NumberOrString::Number(n)) => Ok(Some(n)),
		Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
		Some(NumberOrString::String(s)) => parse_numeric(&s)
			.map(Some)
			.map_err(serde::de::Error::custom),
	}
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<String>::deserialize(deserializer)?;
	Ok(value.filter(|s| !s.trim().is_empty()))
}
