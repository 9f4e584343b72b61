use async_trait::async_trait;
use mockall::mock;

use tx_monitor::{
	models::{Transaction, Validator, ValidatorDeposit},
	services::blockchain::{
		BlockChainError, EvmClientTrait, TransactionSource, ValidatorClientTrait,
	},
};

mock! {
	pub TransactionSource {}

	#[async_trait]
	impl TransactionSource for TransactionSource {
		async fn get_transactions(
			&self,
			address: &str,
			start_block: u64,
		) -> Result<Vec<Transaction>, BlockChainError>;
	}
}

mock! {
	pub EvmClientTrait {}

	#[async_trait]
	impl EvmClientTrait for EvmClientTrait {
		async fn get_code(&self, address: &str) -> Result<String, BlockChainError>;
	}
}

mock! {
	pub ValidatorClientTrait {}

	#[async_trait]
	impl ValidatorClientTrait for ValidatorClientTrait {
		async fn get_validators_by_address(
			&self,
			address: &str,
		) -> Result<Vec<Validator>, BlockChainError>;
		async fn get_deposits(
			&self,
			public_key: &str,
		) -> Result<Vec<ValidatorDeposit>, BlockChainError>;
	}
}
