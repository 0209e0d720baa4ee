//! Account orchestration for the account SDK.
//!
//! `Account` ties the signer and the provider together: it assembles
//! invoke transactions, delegates signing, submits payloads and answers
//! signature-validity questions against the account contract. It holds no
//! mutable state; the nonce is read fresh from the chain for every
//! transaction.

use account_config::{ChainConfig, Config};
use account_crypto::{compile_execute_calldata, message_hash, TypedDataError};
use account_provider::{ProviderError, ProviderInterface};
use account_signer::{SignerError, SignerInterface};
use account_types::{
	felt_from_hex, AddTransactionResponse, Call, EncodingError, ExecuteOverrides, Felt,
	FunctionCall, InvocationsSignerDetails, InvokeFunctionPayload, Signature, TypedData,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs while decoding chain data.
	#[error("Encoding error: {0}")]
	Encoding(#[from] EncodingError),
	/// Error that occurs while hashing a typed-data document.
	#[error("Typed data error: {0}")]
	TypedData(#[from] TypedDataError),
	/// Error that occurs while signing.
	#[error("Signing error: {0}")]
	Signing(#[from] SignerError),
	/// Error that occurs while submitting a transaction.
	#[error("Submission failed: {0}")]
	Submission(String),
	/// Error that occurs on read-only provider calls.
	#[error("Provider error: {0}")]
	Provider(#[from] ProviderError),
	/// Zero max fee submitted against a chain that disallows it.
	#[error("Zero max fee is disallowed for chain {0}")]
	ZeroFeeDisallowed(String),
	/// Operation is not supported by this SDK version.
	#[error("Not implemented: {0}")]
	NotImplemented(String),
	/// Error that occurs while building an account from configuration.
	#[error("Configuration error: {0}")]
	Config(String),
}

/// A deployed account contract together with its signer and provider.
///
/// All fields are fixed at construction. Concurrent `execute` calls are
/// safe but race on the on-chain nonce.
pub struct Account {
	address: Felt,
	signer: Arc<dyn SignerInterface>,
	provider: Arc<dyn ProviderInterface>,
	chain: ChainConfig,
}

impl Account {
	/// Creates an account from its collaborators.
	pub fn new(
		address: Felt,
		signer: Arc<dyn SignerInterface>,
		provider: Arc<dyn ProviderInterface>,
		chain: ChainConfig,
	) -> Self {
		Self {
			address,
			signer,
			provider,
			chain,
		}
	}

	/// Builds an account from configuration.
	///
	/// The `implementation` key of the provider and signer tables selects
	/// the factory; it defaults to "jsonrpc" and "local" respectively.
	pub fn from_config(config: &Config, address: Felt) -> Result<Self, AccountError> {
		let provider_name = implementation_name(&config.provider, "jsonrpc");
		let provider_factory = account_provider::get_all_implementations()
			.into_iter()
			.find(|(name, _)| *name == provider_name)
			.map(|(_, factory)| factory)
			.ok_or_else(|| {
				AccountError::Config(format!("unknown provider implementation: {}", provider_name))
			})?;
		let provider = provider_factory(&config.provider)
			.map_err(|e| AccountError::Config(format!("provider: {}", e)))?;

		let signer_name = implementation_name(&config.signer, "local");
		let signer_factory = account_signer::get_all_implementations()
			.into_iter()
			.find(|(name, _)| *name == signer_name)
			.map(|(_, factory)| factory)
			.ok_or_else(|| {
				AccountError::Config(format!("unknown signer implementation: {}", signer_name))
			})?;
		let signer = signer_factory(&config.signer)
			.map_err(|e| AccountError::Config(format!("signer: {}", e)))?;

		Ok(Self::new(
			address,
			Arc::from(signer),
			Arc::from(provider),
			config.chain.clone(),
		))
	}

	/// Returns the account contract address.
	pub fn address(&self) -> Felt {
		self.address
	}

	/// Reads the account's current nonce from the chain.
	///
	/// Never cached; each call hits the contract.
	pub async fn get_nonce(&self) -> Result<Felt, AccountError> {
		let response = self
			.provider
			.call_contract(FunctionCall {
				contract_address: self.address,
				entrypoint: "get_nonce".to_string(),
				calldata: vec![],
			})
			.await?;

		let raw = response.result.first().ok_or_else(|| {
			AccountError::Submission("get_nonce returned no result elements".to_string())
		})?;
		Ok(felt_from_hex(raw)?)
	}

	/// Signs and submits a batch of calls as one invoke transaction.
	pub async fn execute(
		&self,
		calls: &[Call],
		overrides: ExecuteOverrides,
	) -> Result<AddTransactionResponse, AccountError> {
		let nonce = match overrides.nonce {
			Some(nonce) => nonce,
			None => self.get_nonce().await?,
		};

		let max_fee = overrides.max_fee.unwrap_or(Felt::ZERO);
		if max_fee == Felt::ZERO && !self.chain.allow_zero_max_fee {
			return Err(AccountError::ZeroFeeDisallowed(self.chain.chain_id.clone()));
		}

		let version = Felt::from(self.chain.transaction_version);
		let details = InvocationsSignerDetails {
			wallet_address: self.address,
			nonce,
			max_fee,
			version,
			chain_id: self.chain.chain_id_felt()?,
		};

		// The signer hashes from the same details and call batch that go
		// into the payload below.
		let signature = self.signer.sign_transaction(calls, &details).await?;

		let calldata = compile_execute_calldata(calls, nonce);
		let payload = InvokeFunctionPayload {
			contract_address: self.address,
			entry_point_selector: *account_crypto::EXECUTE_ENTRYPOINT,
			calldata,
		};

		tracing::debug!(
			address = %format!("{:#x}", self.address),
			nonce = %nonce,
			calls = calls.len(),
			"submitting invoke transaction"
		);

		self.provider
			.add_invoke_transaction(payload, signature, max_fee, version)
			.await
			.map_err(|e| AccountError::Submission(e.to_string()))
	}

	/// Fee estimation is not part of this SDK version.
	pub async fn estimate_fee(&self, _calls: &[Call]) -> Result<Felt, AccountError> {
		Err(AccountError::NotImplemented(
			"fee estimation".to_string(),
		))
	}

	/// Hashes a typed-data document bound to this account's address.
	pub fn hash_message(&self, typed_data: &TypedData) -> Result<Felt, AccountError> {
		Ok(message_hash(typed_data, self.address)?)
	}

	/// Signs a typed-data document with the account's signer.
	pub async fn sign_message(&self, typed_data: &TypedData) -> Result<Signature, AccountError> {
		Ok(self.signer.sign_message(typed_data, self.address).await?)
	}

	/// Checks a signature over a message hash against the account contract.
	///
	/// Total boolean: any failure, whether a contract revert or a transport
	/// problem, reads as invalid. Use
	/// [`verify_message_hash_with_reason`](Self::verify_message_hash_with_reason)
	/// to distinguish causes.
	pub async fn verify_message_hash(&self, hash: Felt, signature: &Signature) -> bool {
		match self.verify_message_hash_with_reason(hash, signature).await {
			Ok(()) => true,
			Err(e) => {
				tracing::debug!(error = %e, "signature verification failed");
				false
			},
		}
	}

	/// Like [`verify_message_hash`](Self::verify_message_hash), but surfaces
	/// the provider error on failure.
	pub async fn verify_message_hash_with_reason(
		&self,
		hash: Felt,
		signature: &Signature,
	) -> Result<(), ProviderError> {
		self.provider
			.call_contract(FunctionCall {
				contract_address: self.address,
				entrypoint: "is_valid_signature".to_string(),
				calldata: vec![hash, Felt::TWO, signature.r, signature.s],
			})
			.await?;
		Ok(())
	}

	/// Hashes a typed-data document and checks its signature on chain.
	pub async fn verify_message(&self, typed_data: &TypedData, signature: &Signature) -> bool {
		let hash = match message_hash(typed_data, self.address) {
			Ok(hash) => hash,
			Err(e) => {
				tracing::debug!(error = %e, "typed data hashing failed");
				return false;
			},
		};
		self.verify_message_hash(hash, signature).await
	}
}

/// Reads the implementation selector from a config table.
fn implementation_name<'a>(table: &'a toml::Value, default: &'a str) -> &'a str {
	table
		.get("implementation")
		.and_then(|v| v.as_str())
		.unwrap_or(default)
}
