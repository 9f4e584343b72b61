//! Address classification services.
//!
//! Determines whether the counterparty of a monitored transaction is a smart
//! contract, a validator or a normal account.

mod service;

pub use service::{find_matching_validator, AddressClassifier, AddressClassifierTrait};
