//! Core transaction source interface.
//!
//! The monitor only needs one thing from the chain indexer: the list of
//! transactions touching an address from a given block onwards.

use async_trait::async_trait;

use crate::{models::Transaction, services::blockchain::BlockChainError};

/// Defines the interface for fetching the transactions of a monitored address
#[async_trait]
pub trait TransactionSource: Send + Sync {
	/// Retrieves transactions for `address` starting at `start_block` (inclusive),
	/// sorted by block number in descending order
	///
	/// # Arguments
	/// * `address` - The account to list transactions for
	/// * `start_block` - Lowest block number to include
	///
	/// # Returns
	/// * `Result<Vec<Transaction>, BlockChainError>` - Transactions or an error. No retry is
	///   attempted; callers decide how to degrade.
	async fn get_transactions(
		&self,
		address: &str,
		start_block: u64,
	) -> Result<Vec<Transaction>, BlockChainError>;
}
