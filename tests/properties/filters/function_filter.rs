use crate::properties::strategies::{
	function_name_set_strategy, transaction_batch_strategy, transaction_strategy,
};

use proptest::{prelude::*, test_runner::Config};
use tx_monitor::{
	models::{FunctionNameSet, TRANSFER_PREFIX},
	services::filter::{filter_transactions, FunctionNameFilter},
	utils::tests::builders::transaction::TransactionBuilder,
};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_empty_set_is_identity(transactions in transaction_batch_strategy()) {
		let filtered = filter_transactions(&transactions, &FunctionNameSet::accept_all()).unwrap();
		prop_assert_eq!(filtered, transactions);
	}

	#[test]
	fn test_plain_transfer_acceptance(
		accepted in function_name_set_strategy(),
		block in 0u64..1_000
	) {
		let transaction = TransactionBuilder::new().block_number(block).build();
		let filter = FunctionNameFilter::new(&accepted).unwrap();

		let expected = accepted.is_accept_all() || accepted.contains(TRANSFER_PREFIX);
		prop_assert_eq!(filter.matches(&transaction), expected);
	}

	#[test]
	fn test_match_requires_exact_identifier(
		accepted in function_name_set_strategy(),
		transaction in transaction_strategy()
	) {
		prop_assume!(!accepted.is_accept_all());
		prop_assume!(!transaction.function_name.is_empty());
		let filter = FunctionNameFilter::new(&accepted).unwrap();

		let expected = accepted
			.prefixes()
			.iter()
			.any(|prefix| transaction.function_name.starts_with(&format!("{}(", prefix)));
		prop_assert_eq!(filter.matches(&transaction), expected);
	}

	#[test]
	fn test_filter_preserves_order_and_is_idempotent(
		accepted in function_name_set_strategy(),
		transactions in transaction_batch_strategy()
	) {
		let filter = FunctionNameFilter::new(&accepted).unwrap();
		let once = filter.filter(&transactions);

		prop_assert!(once.len() <= transactions.len());
		prop_assert!(once.windows(2).all(|w| w[0].block_number >= w[1].block_number));
		prop_assert_eq!(filter.filter(&once), once.clone());
	}
}
