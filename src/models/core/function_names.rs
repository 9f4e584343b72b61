use serde::{Deserialize, Serialize};

/// Token that, when present in the configured list, disables function-name filtering
pub const ACCEPT_ALL_TOKEN: &str = "all";

/// Prefix that additionally admits plain value transfers (empty function name)
pub const TRANSFER_PREFIX: &str = "transfer";

/// Set of accepted function-signature prefixes.
///
/// An empty set accepts every transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNameSet {
	prefixes: Vec<String>,
}

impl FunctionNameSet {
	/// Set that accepts every transaction
	pub fn accept_all() -> Self {
		Self::default()
	}

	/// Builds the set from configured entries.
	///
	/// Entries are trimmed, blanks and duplicates are dropped. If any entry is the
	/// `all` token the result is the accept-all set.
	pub fn new<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut prefixes: Vec<String> = Vec::new();
		for entry in entries {
			let entry = entry.as_ref().trim();
			if entry.is_empty() {
				continue;
			}
			if entry.eq_ignore_ascii_case(ACCEPT_ALL_TOKEN) {
				return Self::accept_all();
			}
			if !prefixes.iter().any(|p| p == entry) {
				prefixes.push(entry.to_string());
			}
		}
		Self { prefixes }
	}

	/// Parses a comma-separated list such as `transfer,approve` or `all`
	pub fn parse(list: &str) -> Self {
		Self::new(list.split(','))
	}

	pub fn is_accept_all(&self) -> bool {
		self.prefixes.is_empty()
	}

	pub fn contains(&self, prefix: &str) -> bool {
		self.prefixes.iter().any(|p| p == prefix)
	}

	pub fn prefixes(&self) -> &[String] {
		&self.prefixes
	}
}
