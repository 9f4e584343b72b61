use proptest::prelude::*;
use tx_monitor::{
	models::{FunctionNameSet, Transaction},
	utils::tests::builders::transaction::TransactionBuilder,
};

const MAX_TRANSACTIONS: usize = 20;
const MAX_BLOCK: u64 = 1_000;

pub const MONITORED_ADDRESS: &str = "0x1111111111111111111111111111111111111111";

/// Identifiers the accepted-name sets are drawn from
pub const KNOWN_PREFIXES: &[&str] = &["transfer", "transferFrom", "approve", "deposit", "swap"];

pub fn function_name_strategy() -> impl Strategy<Value = String> {
	prop_oneof![
		Just(String::new()),
		Just("transfer(address to, uint256 amount)".to_string()),
		Just("transferFrom(address from, address to, uint256 amount)".to_string()),
		Just("approve(address spender, uint256 amount)".to_string()),
		Just("deposit(bytes pubkey, bytes signature)".to_string()),
		Just("swapExactTokensForETH(uint256 amountIn)".to_string()),
		"[a-zA-Z]{1,12}\\([a-z0-9 ,]{0,20}\\)".prop_map(|s| s.to_string()),
	]
}

pub fn transaction_strategy() -> impl Strategy<Value = Transaction> {
	(0..MAX_BLOCK, function_name_strategy()).prop_map(|(block, function_name)| {
		TransactionBuilder::new()
			.block_number(block)
			.from(MONITORED_ADDRESS)
			.function_name(&function_name)
			.build()
	})
}

/// Transactions sorted by block number, newest first, as the explorer returns them
pub fn transaction_batch_strategy() -> impl Strategy<Value = Vec<Transaction>> {
	prop::collection::vec(transaction_strategy(), 0..MAX_TRANSACTIONS).prop_map(
		|mut transactions| {
			transactions.sort_by(|a, b| b.block_number.cmp(&a.block_number));
			transactions
		},
	)
}

pub fn function_name_set_strategy() -> impl Strategy<Value = FunctionNameSet> {
	prop::sample::subsequence(KNOWN_PREFIXES.to_vec(), 0..=KNOWN_PREFIXES.len())
		.prop_map(FunctionNameSet::new)
}
