use mockall::predicate;
use std::sync::Arc;

use tx_monitor::{
	models::{AddressType, Validator, ValidatorDeposit},
	services::{
		blockchain::BlockChainError,
		blockwatcher::AlertPipeline,
		classifier::{AddressClassifier, AddressClassifierTrait},
		notification::NotificationService,
	},
};

use crate::integration::mocks::{
	create_test_transaction, MockEvmClientTrait, MockNotifier, MockValidatorClientTrait,
	COUNTERPARTY_ADDRESS, MONITORED_ADDRESS,
};

fn validator(public_key: &str, index: Option<u64>) -> Validator {
	Validator {
		index,
		public_key: public_key.to_string(),
	}
}

fn deposit(tx_hash: &str, block_number: u64) -> ValidatorDeposit {
	ValidatorDeposit {
		tx_hash: tx_hash.to_string(),
		block_number,
		from_address: Some(COUNTERPARTY_ADDRESS.to_string()),
		amount: Some(32_000_000_000),
	}
}

fn account_evm() -> MockEvmClientTrait {
	let mut evm = MockEvmClientTrait::new();
	evm.expect_get_code()
		.with(predicate::eq(COUNTERPARTY_ADDRESS))
		.returning(|_| Ok("0x".to_string()));
	evm
}

#[tokio::test]
async fn test_contract_skips_validator_lookup() {
	let mut evm = MockEvmClientTrait::new();
	evm.expect_get_code()
		.times(1)
		.returning(|_| Ok("0x6080604052".to_string()));

	let mut beacon = MockValidatorClientTrait::new();
	beacon.expect_get_validators_by_address().times(0);

	let classifier = AddressClassifier::new(Arc::new(evm), Some(Arc::new(beacon)));
	let transaction = create_test_transaction(10, "");

	let classification = classifier
		.classify(COUNTERPARTY_ADDRESS, &transaction)
		.await;

	assert_eq!(classification.address_type(), AddressType::SmartContract);
}

#[tokio::test]
async fn test_validator_matched_by_latest_deposit() {
	let transaction = create_test_transaction(10, "deposit(bytes pubkey)");
	let tx_hash = transaction.hash.clone();

	let mut beacon = MockValidatorClientTrait::new();
	beacon
		.expect_get_validators_by_address()
		.with(predicate::eq(COUNTERPARTY_ADDRESS))
		.returning(|_| Ok(vec![validator("0xaaa", Some(7)), validator("0xbbb", Some(8))]));
	let earlier_hash = tx_hash.clone();
	beacon
		.expect_get_deposits()
		.with(predicate::eq("0xaaa"))
		.returning(move |_| Ok(vec![deposit(&earlier_hash, 10), deposit("0xlater", 11)]));
	let matching_hash = tx_hash.clone();
	beacon
		.expect_get_deposits()
		.with(predicate::eq("0xbbb"))
		.returning(move |_| Ok(vec![deposit(&matching_hash.to_uppercase().replace("0X", "0x"), 10)]));

	let classifier = AddressClassifier::new(Arc::new(account_evm()), Some(Arc::new(beacon)));
	let classification = classifier
		.classify(COUNTERPARTY_ADDRESS, &transaction)
		.await;

	assert_eq!(classification.address_type(), AddressType::Validator);
	assert_eq!(classification.validator, Some(validator("0xbbb", Some(8))));
}

#[tokio::test]
async fn test_bytecode_failure_still_checks_validators() {
	let transaction = create_test_transaction(10, "");
	let tx_hash = transaction.hash.clone();

	let mut evm = MockEvmClientTrait::new();
	evm.expect_get_code()
		.returning(|_| Err(BlockChainError::connection_error("rpc down")));

	let mut beacon = MockValidatorClientTrait::new();
	beacon
		.expect_get_validators_by_address()
		.times(1)
		.returning(|_| Ok(vec![validator("0xaaa", None)]));
	beacon
		.expect_get_deposits()
		.returning(move |_| Ok(vec![deposit(&tx_hash, 10)]));

	let classifier = AddressClassifier::new(Arc::new(evm), Some(Arc::new(beacon)));
	let classification = classifier
		.classify(COUNTERPARTY_ADDRESS, &transaction)
		.await;

	assert_eq!(classification.address_type(), AddressType::Validator);
}

#[tokio::test]
async fn test_lookups_disabled_yields_normal() {
	let classifier =
		AddressClassifier::<_, MockValidatorClientTrait>::new(Arc::new(account_evm()), None);
	let transaction = create_test_transaction(10, "");

	let classification = classifier
		.classify(COUNTERPARTY_ADDRESS, &transaction)
		.await;

	assert_eq!(classification.address_type(), AddressType::Normal);
}

#[tokio::test]
async fn test_validator_listing_failure_yields_normal() {
	let mut beacon = MockValidatorClientTrait::new();
	beacon
		.expect_get_validators_by_address()
		.returning(|_| Err(BlockChainError::api_error("rate limited")));
	beacon.expect_get_deposits().times(0);

	let classifier = AddressClassifier::new(Arc::new(account_evm()), Some(Arc::new(beacon)));
	let transaction = create_test_transaction(10, "");

	let classification = classifier
		.classify(COUNTERPARTY_ADDRESS, &transaction)
		.await;

	assert_eq!(classification.address_type(), AddressType::Normal);
}

#[tokio::test]
async fn test_pipeline_renders_validator_alert() {
	let transaction = create_test_transaction(42, "");
	let tx_hash = transaction.hash.clone();

	let mut beacon = MockValidatorClientTrait::new();
	beacon
		.expect_get_validators_by_address()
		.returning(|_| Ok(vec![validator("0xpubkey", None)]));
	beacon
		.expect_get_deposits()
		.returning(move |_| Ok(vec![deposit(&tx_hash, 42)]));

	let expected_hash = transaction.hash.clone();
	let mut notifier = MockNotifier::new();
	notifier
		.expect_notify()
		.withf(move |subject, body| {
			subject == format!("validator 42 {}", MONITORED_ADDRESS)
				&& body.starts_with(&format!("{} {}", COUNTERPARTY_ADDRESS, expected_hash))
				&& body.ends_with("Validator index: pending\nValidator public key: 0xpubkey")
		})
		.times(1)
		.returning(|_, _| Ok(()));

	let pipeline = AlertPipeline::new(
		Arc::new(AddressClassifier::new(
			Arc::new(account_evm()),
			Some(Arc::new(beacon)),
		)),
		Arc::new(NotificationService::new(
			Arc::new(notifier),
			"${address_type} ${block_number} ${monitored_address}",
			"${address} ${transaction_hash}",
		)),
	);

	pipeline
		.process(MONITORED_ADDRESS, &transaction)
		.await
		.unwrap();
}
