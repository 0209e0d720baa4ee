//! Signer module for the account SDK.
//!
//! This module defines the signing capability the account depends on:
//! producing elliptic-curve signatures over transaction hashes and
//! typed-data message hashes, and exposing the public key. The account
//! never depends on a concrete signer; any implementation of
//! [`SignerInterface`] (local key, hardware-backed, remote) is
//! interchangeable.

use account_types::{
	Call, ConfigSchema, Felt, ImplementationRegistry, InvocationsSignerDetails, Signature,
	TypedData,
};
use async_trait::async_trait;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SignerError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when interacting with the signer implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the signing capability.
///
/// Exactly three operations: signing a transaction, signing a typed-data
/// message, and exposing the public key. Implementations must be pure and
/// reentrant so concurrent signing calls are safe.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait SignerInterface: Send + Sync {
	/// Returns the configuration schema for this signer implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the public key of the held key material.
	async fn get_pub_key(&self) -> Result<Felt, SignerError>;

	/// Signs an invocation batch.
	///
	/// Computes the transaction hash over the compiled calldata and the
	/// signer details, then signs it. The details must be byte-identical
	/// to those ultimately submitted.
	async fn sign_transaction(
		&self,
		calls: &[Call],
		details: &InvocationsSignerDetails,
	) -> Result<Signature, SignerError>;

	/// Signs a typed-data message bound to the given account address.
	async fn sign_message(
		&self,
		typed_data: &TypedData,
		account_address: Felt,
	) -> Result<Signature, SignerError>;
}

/// Factory function type for signer implementations.
///
/// All signer implementations provide this signature to construct an
/// instance from their validated TOML section.
pub type SignerFactory = fn(&toml::Value) -> Result<Box<dyn SignerInterface>, SignerError>;

/// Registry trait for signer implementations.
pub trait SignerRegistry: ImplementationRegistry<Factory = SignerFactory> {}

/// Get all registered signer implementations.
///
/// Returns a vector of (name, factory) tuples for all available signer
/// implementations.
pub fn get_all_implementations() -> Vec<(&'static str, SignerFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}
