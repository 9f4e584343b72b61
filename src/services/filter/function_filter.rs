//! Function-name filtering of explorer transactions.
//!
//! A transaction passes when:
//! 1. the accepted set is empty (accept all), or
//! 2. its function name is empty and `transfer` is accepted (plain value transfer), or
//! 3. its function name starts with an accepted identifier immediately followed by `(`.

use regex::RegexSet;

use crate::{
	models::{FunctionNameSet, Transaction, TRANSFER_PREFIX},
	services::filter::FilterError,
};

/// Precompiled matcher for a [`FunctionNameSet`]
#[derive(Debug, Clone)]
pub struct FunctionNameFilter {
	patterns: Option<RegexSet>,
	accepts_plain_transfers: bool,
}

impl FunctionNameFilter {
	/// Compiles one anchored `^<prefix>\(` pattern per accepted prefix
	pub fn new(accepted: &FunctionNameSet) -> Result<Self, FilterError> {
		if accepted.is_accept_all() {
			return Ok(Self {
				patterns: None,
				accepts_plain_transfers: true,
			});
		}

		let patterns = RegexSet::new(
			accepted
				.prefixes()
				.iter()
				.map(|prefix| format!(r"^{}\(", regex::escape(prefix))),
		)
		.map_err(|e| FilterError::invalid_pattern(e.to_string()))?;

		Ok(Self {
			patterns: Some(patterns),
			accepts_plain_transfers: accepted.contains(TRANSFER_PREFIX),
		})
	}

	/// Whether a single transaction passes the filter
	pub fn matches(&self, transaction: &Transaction) -> bool {
		let Some(patterns) = &self.patterns else {
			return true;
		};

		if transaction.is_plain_transfer() {
			return self.accepts_plain_transfers;
		}

		patterns.is_match(&transaction.function_name)
	}

	/// Returns the matching transactions, preserving input order
	pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
		transactions
			.iter()
			.filter(|transaction| self.matches(transaction))
			.cloned()
			.collect()
	}
}

/// Filters `transactions` against `accepted` in one call.
///
/// Prefer [`FunctionNameFilter`] when the same set is applied repeatedly.
pub fn filter_transactions(
	transactions: &[Transaction],
	accepted: &FunctionNameSet,
) -> Result<Vec<Transaction>, FilterError> {
	Ok(FunctionNameFilter::new(accepted)?.filter(transactions))
}
