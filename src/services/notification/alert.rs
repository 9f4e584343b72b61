//! Alert content for matched transactions.
//!
//! Turns a matched transaction and its classified counterparty into the
//! variables used by the subject and body templates.

use chrono::DateTime;
use std::collections::HashMap;

use crate::models::{AddressClassification, Transaction};

/// Everything needed to describe one matched transaction
#[derive(Debug, Clone)]
pub struct TransactionAlert {
	pub transaction: Transaction,
	/// The configured address whose activity produced the match
	pub monitored_address: String,
	/// The counterparty address that was classified
	pub address: String,
	pub classification: AddressClassification,
}

impl TransactionAlert {
	/// Creates an alert, resolving the counterparty from the transaction
	pub fn new(
		transaction: Transaction,
		monitored_address: &str,
		classification: AddressClassification,
	) -> Self {
		let address = transaction.counterparty(monitored_address).to_string();
		Self {
			transaction,
			monitored_address: monitored_address.to_string(),
			address,
			classification,
		}
	}

	/// Template variables for this alert
	pub fn variables(&self) -> HashMap<String, String> {
		HashMap::from([
			(
				"monitored_address".to_string(),
				self.monitored_address.clone(),
			),
			("address".to_string(), self.address.clone()),
			(
				"address_type".to_string(),
				self.classification.address_type().to_string(),
			),
			(
				"block_number".to_string(),
				self.transaction.block_number.to_string(),
			),
			("transaction_hash".to_string(), self.transaction.hash.clone()),
			("event".to_string(), self.transaction.event_name()),
			(
				"timestamp".to_string(),
				format_timestamp(self.transaction.timestamp),
			),
		])
	}

	/// Extra body lines describing the matched validator, if any
	pub fn validator_details(&self) -> Option<String> {
		self.classification.validator.as_ref().map(|validator| {
			format!(
				"Validator index: {}\nValidator public key: {}",
				validator.display_index(),
				validator.public_key
			)
		})
	}
}

/// Substitutes `${name}` placeholders in `template`
///
/// Unknown placeholders are left untouched.
pub fn format_template(template: &str, variables: &HashMap<String, String>) -> String {
	variables
		.iter()
		.fold(template.to_string(), |message, (key, value)| {
			message.replace(&format!("${{{}}}", key), value)
		})
}

fn format_timestamp(timestamp: Option<u64>) -> String {
	timestamp
		.and_then(|ts| i64::try_from(ts).ok())
		.and_then(|ts| DateTime::from_timestamp(ts, 0))
		.map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
		.unwrap_or_else(|| "unknown".to_string())
}
