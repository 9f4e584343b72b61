//! Core domain models for the transaction monitor.
//!
//! This module contains the fundamental data structures that represent:
//! - Function name sets: which transaction types are of interest
//! - Address classifications: what kind of account sits on the other side of a transaction

mod classification;
mod function_names;

pub use classification::{AddressClassification, AddressType};
pub use function_names::{FunctionNameSet, ACCEPT_ALL_TOKEN, TRANSFER_PREFIX};
