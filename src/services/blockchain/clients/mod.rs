//! Blockchain client implementations.
//!
//! Contains the clients for each external chain data provider:
//! - Explorer client listing account transactions
//! - EVM client for execution-layer state (bytecode)
//! - Beacon client for validator and deposit lookups

mod beacon {
	pub mod client;
}
mod evm {
	pub mod client;
}
mod explorer {
	pub mod client;
}

pub use beacon::client::{BeaconClient, ValidatorClientTrait};
pub use evm::client::{has_code, EvmClient, EvmClientTrait};
pub use explorer::client::ExplorerClient;
