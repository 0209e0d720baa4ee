//! Local key-holding signer implementation.
//!
//! Holds a STARK-curve private key in memory and signs transaction and
//! message hashes with deterministic ECDSA. Suitable wherever key
//! management simplicity is preferred over hardware isolation.

use crate::{SignerError, SignerInterface};
use account_crypto::{compile_execute_calldata, message_hash, transaction_hash, KeyPair};
use account_types::{
	without_0x_prefix, Call, ConfigSchema, Felt, Field, FieldType, InvocationsSignerDetails,
	Schema, Signature, TypedData, ValidationError,
};
use async_trait::async_trait;

/// Signer backed by an in-memory key pair.
#[derive(Debug)]
pub struct LocalSigner {
	keys: KeyPair,
}

impl LocalSigner {
	/// Creates a local signer from a hex-encoded private key, with or
	/// without the `0x` prefix.
	pub fn new(private_key_hex: &str) -> Result<Self, SignerError> {
		let keys =
			KeyPair::from_hex(private_key_hex).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
		Ok(Self { keys })
	}

	/// Creates a local signer from an existing key pair.
	pub fn from_keys(keys: KeyPair) -> Self {
		Self { keys }
	}
}

/// Configuration schema for [`LocalSigner`].
pub struct LocalSignerSchema;

impl LocalSignerSchema {
	/// Static validation method for use before instance creation.
	pub fn validate_config(config: &toml::Value) -> Result<(), ValidationError> {
		LocalSignerSchema.validate(config)
	}
}

impl ConfigSchema for LocalSignerSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("private_key", FieldType::String).with_validator(
				|value| match value.as_str() {
					Some(key) => {
						let digits = without_0x_prefix(key);
						if digits.is_empty() || digits.len() > 64 {
							return Err(
								"Private key must be at most 64 hex characters".to_string()
							);
						}
						if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
							return Err("Private key must be valid hexadecimal".to_string());
						}
						Ok(())
					}
					None => Err("Expected string value for private_key".to_string()),
				},
			)],
			vec![],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl SignerInterface for LocalSigner {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalSignerSchema)
	}

	async fn get_pub_key(&self) -> Result<Felt, SignerError> {
		Ok(self.keys.public_key())
	}

	async fn sign_transaction(
		&self,
		calls: &[Call],
		details: &InvocationsSignerDetails,
	) -> Result<Signature, SignerError> {
		let calldata = compile_execute_calldata(calls, details.nonce);
		let hash = transaction_hash(
			&calldata,
			details.wallet_address,
			details.nonce,
			details.max_fee,
			details.version,
			details.chain_id,
		);

		self.keys
			.sign(&hash)
			.map_err(|e| SignerError::SigningFailed(e.to_string()))
	}

	async fn sign_message(
		&self,
		typed_data: &TypedData,
		account_address: Felt,
	) -> Result<Signature, SignerError> {
		let hash = message_hash(typed_data, account_address)
			.map_err(|e| SignerError::SigningFailed(e.to_string()))?;

		self.keys
			.sign(&hash)
			.map_err(|e| SignerError::SigningFailed(e.to_string()))
	}
}

/// Factory function to create a signer from configuration.
///
/// # Errors
///
/// Returns an error if `private_key` is missing or malformed, or if the
/// key pair cannot be constructed from it.
pub fn create_signer(config: &toml::Value) -> Result<Box<dyn SignerInterface>, SignerError> {
	LocalSignerSchema::validate_config(config)
		.map_err(|e| SignerError::InvalidKey(format!("Invalid configuration: {}", e)))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.ok_or_else(|| SignerError::InvalidKey("private_key must be a string".to_string()))?;

	Ok(Box::new(LocalSigner::new(private_key)?))
}

/// Registry for the local signer implementation.
pub struct Registry;

impl account_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::SignerFactory;

	fn factory() -> Self::Factory {
		create_signer
	}
}

impl crate::SignerRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use account_crypto::ecdsa_verify;
	use account_types::ImplementationRegistry;

	// Test private key (FOR TESTING ONLY!)
	const TEST_PRIVATE_KEY: &str =
		"0x2dccce1da22003777062ee0870e9881b460a8b7eca276870f57c601f182136c";

	fn test_config(private_key: &str) -> toml::Value {
		let mut table = toml::map::Map::new();
		table.insert(
			"private_key".to_string(),
			toml::Value::String(private_key.to_string()),
		);
		toml::Value::Table(table)
	}

	fn test_details() -> InvocationsSignerDetails {
		InvocationsSignerDetails {
			wallet_address: Felt::from(0xabcu64),
			nonce: Felt::ZERO,
			max_fee: Felt::ZERO,
			version: Felt::ZERO,
			chain_id: Felt::from(0x534eu64),
		}
	}

	fn test_call() -> Call {
		Call {
			contract_address: Felt::from(0xdefu64),
			entrypoint: "transfer".to_string(),
			calldata: vec![Felt::ONE, Felt::from(10u64)],
		}
	}

	#[tokio::test]
	async fn test_sign_transaction_verifies_against_pub_key() {
		let signer = LocalSigner::new(TEST_PRIVATE_KEY).unwrap();
		let details = test_details();
		let calls = vec![test_call()];

		let signature = signer.sign_transaction(&calls, &details).await.unwrap();

		let calldata = compile_execute_calldata(&calls, details.nonce);
		let hash = transaction_hash(
			&calldata,
			details.wallet_address,
			details.nonce,
			details.max_fee,
			details.version,
			details.chain_id,
		);
		let pub_key = signer.get_pub_key().await.unwrap();
		assert!(ecdsa_verify(&pub_key, &hash, &signature));
	}

	#[tokio::test]
	async fn test_signature_depends_on_details() {
		let signer = LocalSigner::new(TEST_PRIVATE_KEY).unwrap();
		let calls = vec![test_call()];

		let base = signer
			.sign_transaction(&calls, &test_details())
			.await
			.unwrap();

		let mut bumped_nonce = test_details();
		bumped_nonce.nonce = Felt::ONE;
		let other = signer
			.sign_transaction(&calls, &bumped_nonce)
			.await
			.unwrap();

		assert_ne!(base, other);
	}

	#[tokio::test]
	async fn test_sign_message_binds_account_address() {
		let signer = LocalSigner::new(TEST_PRIVATE_KEY).unwrap();
		let data: TypedData = serde_json::from_value(serde_json::json!({
			"types": {
				"StarkNetDomain": [ { "name": "name", "type": "felt" } ],
				"Greeting": [ { "name": "text", "type": "felt" } ],
			},
			"primaryType": "Greeting",
			"domain": { "name": "Example" },
			"message": { "text": "hi" },
		}))
		.unwrap();

		let for_a = signer
			.sign_message(&data, Felt::from(0xau64))
			.await
			.unwrap();
		let for_b = signer
			.sign_message(&data, Felt::from(0xbu64))
			.await
			.unwrap();
		assert_ne!(for_a, for_b);

		let hash = message_hash(&data, Felt::from(0xau64)).unwrap();
		let pub_key = signer.get_pub_key().await.unwrap();
		assert!(ecdsa_verify(&pub_key, &hash, &for_a));
	}

	#[test]
	fn test_new_rejects_invalid_key() {
		assert!(matches!(
			LocalSigner::new("not hex"),
			Err(SignerError::InvalidKey(_))
		));
		assert!(matches!(
			LocalSigner::new("0x0"),
			Err(SignerError::InvalidKey(_))
		));
	}

	#[test]
	fn test_schema_validation() {
		assert!(LocalSignerSchema::validate_config(&test_config(TEST_PRIVATE_KEY)).is_ok());
		assert!(LocalSignerSchema::validate_config(&test_config("zzzz")).is_err());
		assert!(LocalSignerSchema::validate_config(&test_config("")).is_err());

		let empty = toml::Value::Table(toml::map::Map::new());
		assert!(LocalSignerSchema::validate_config(&empty).is_err());
	}

	#[test]
	fn test_create_signer_from_config() {
		let signer = create_signer(&test_config(TEST_PRIVATE_KEY));
		assert!(signer.is_ok());

		let bad = create_signer(&test_config("nope"));
		assert!(bad.is_err());
	}

	#[test]
	fn test_registry_name() {
		assert_eq!(Registry::NAME, "local");
	}
}
