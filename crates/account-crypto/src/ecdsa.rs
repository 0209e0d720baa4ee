//! Elliptic-curve signing and verification on the STARK curve.
//!
//! Signing is deterministic: the ephemeral nonce is derived with RFC 6979
//! from the message hash and the private key, so the same key never reuses
//! a nonce across two different hashes. Verification is a total predicate:
//! structurally invalid signatures yield `false`, never an error.

use account_types::encoding::felt_from_hex;
use account_types::Signature;
use starknet_crypto::{get_public_key, rfc6979_generate_k, sign, verify};
use starknet_types_core::felt::Felt;
use thiserror::Error;

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SigningError {
	/// Error that occurs when key material is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when the underlying curve operation fails.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
}

/// An in-memory private/public key pair.
///
/// The private key never leaves this struct: it is not serialized, and the
/// `Debug` representation shows only the public key.
#[derive(Clone)]
pub struct KeyPair {
	private_key: Felt,
	public_key: Felt,
}

impl KeyPair {
	/// Creates a key pair from a private-key field element.
	pub fn new(private_key: Felt) -> Result<Self, SigningError> {
		if private_key == Felt::ZERO {
			return Err(SigningError::InvalidKey(
				"private key must be non-zero".to_string(),
			));
		}
		let public_key = get_public_key(&private_key);
		Ok(Self {
			private_key,
			public_key,
		})
	}

	/// Creates a key pair from a hex-encoded private key, with or without
	/// the `0x` prefix.
	pub fn from_hex(private_key_hex: &str) -> Result<Self, SigningError> {
		let private_key =
			felt_from_hex(private_key_hex).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
		Self::new(private_key)
	}

	/// Returns the public key.
	pub fn public_key(&self) -> Felt {
		self.public_key
	}

	/// Signs a hash with this key pair's private key.
	pub fn sign(&self, hash: &Felt) -> Result<Signature, SigningError> {
		ecdsa_sign(&self.private_key, hash)
	}
}

impl std::fmt::Debug for KeyPair {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KeyPair")
			.field("public_key", &self.public_key)
			.field("private_key", &"<redacted>")
			.finish()
	}
}

/// Produces a deterministic ECDSA signature over `hash`.
pub fn ecdsa_sign(private_key: &Felt, hash: &Felt) -> Result<Signature, SigningError> {
	let k = rfc6979_generate_k(hash, private_key, None);
	let signature =
		sign(private_key, hash, &k).map_err(|e| SigningError::SigningFailed(e.to_string()))?;
	Ok(Signature {
		r: signature.r,
		s: signature.s,
	})
}

/// Verifies an ECDSA signature over `hash` against `public_key`.
///
/// Total function: malformed but well-typed signatures (r or s out of
/// range) return `false` rather than failing.
pub fn ecdsa_verify(public_key: &Felt, hash: &Felt, signature: &Signature) -> bool {
	verify(public_key, hash, &signature.r, &signature.s).unwrap_or(false)
}
