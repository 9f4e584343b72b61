use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Validator;

/// Kind of address on the other side of a monitored transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
	/// Externally owned account with no known validator
	Normal,
	/// Address with deployed bytecode
	SmartContract,
	/// Externally owned account whose latest validator deposit is the inspected transaction
	Validator,
}

impl fmt::Display for AddressType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Normal => write!(f, "normal address"),
			Self::SmartContract => write!(f, "smart contract"),
			Self::Validator => write!(f, "validator"),
		}
	}
}

/// Result of classifying a counterparty address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressClassification {
	pub is_contract: bool,
	pub validator: Option<Validator>,
}

impl AddressClassification {
	/// Classification used whenever a lookup fails or is disabled
	pub fn normal() -> Self {
		Self {
			is_contract: false,
			validator: None,
		}
	}

	pub fn contract() -> Self {
		Self {
			is_contract: true,
			validator: None,
		}
	}

	pub fn validator(validator: Validator) -> Self {
		Self {
			is_contract: false,
			validator: Some(validator),
		}
	}

	/// Resolved address type. A validator takes precedence over contract/normal.
	pub fn address_type(&self) -> AddressType {
		if self.validator.is_some() {
			AddressType::Validator
		} else if self.is_contract {
			AddressType::SmartContract
		} else {
			AddressType::Normal
		}
	}
}

impl Default for AddressClassification {
	fn default() -> Self {
		Self::normal()
	}
}
