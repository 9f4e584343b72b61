//! Blockchain-specific model implementations.
//!
//! Only Ethereum is supported; the `evm` submodule holds transaction and
//! validator types.

pub mod evm;
