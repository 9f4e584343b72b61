//! Ethereum Virtual Machine (EVM) blockchain specific implementations.
//!
//! This module contains data structures specific to Ethereum: explorer
//! transactions and the beacon chain validators backing execution addresses.

mod transaction;
mod validator;

pub use transaction::Transaction;
pub use validator::{latest_deposit, Validator, ValidatorDeposit};
