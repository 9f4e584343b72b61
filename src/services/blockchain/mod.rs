//! Blockchain client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for the external chain
//! data sources the monitor depends on. Includes:
//!
//! - Transaction source trait and its explorer implementation
//! - Execution-layer and beacon chain clients
//! - JSON-RPC transport
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::TransactionSource;
pub use clients::{
	has_code, BeaconClient, EvmClient, EvmClientTrait, ExplorerClient, ValidatorClientTrait,
};
pub use error::BlockChainError;
pub use transports::{BlockchainTransport, HttpTransportClient};
