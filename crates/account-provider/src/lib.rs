//! Provider module for the account SDK.
//!
//! The provider is the account's narrow window onto the network: read-only
//! contract calls, transaction submission, deployment and status polling.
//! Its internals (transport, retries, timeouts) are not part of the
//! transaction pipeline; the account depends only on
//! [`ProviderInterface`].

use account_types::{
	AddTransactionResponse, CallContractResponse, ConfigSchema, Felt, FunctionCall,
	ImplementationRegistry, InvokeFunctionPayload, Signature, TransactionStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod jsonrpc;
}

/// Errors that can occur during provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error returned by the remote endpoint.
	#[error("RPC error {code}: {message}")]
	Rpc { code: i64, message: String },
	/// Error that occurs when a submitted transaction is rejected.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// Error that occurs when a response cannot be interpreted.
	#[error("Unexpected response: {0}")]
	UnexpectedResponse(String),
}

/// Trait defining the interface to the network gateway.
///
/// Implementations submit assembled transactions and answer read-only
/// queries; they never construct, hash or sign anything themselves.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ProviderInterface: Send + Sync {
	/// Returns the configuration schema for this provider implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Submits a raw JSON-RPC style request to the endpoint.
	async fn fetch_endpoint(
		&self,
		method: String,
		params: serde_json::Value,
	) -> Result<serde_json::Value, ProviderError>;

	/// Executes a read-only contract call.
	///
	/// Used for nonce reads and on-chain signature verification.
	async fn call_contract(
		&self,
		request: FunctionCall,
	) -> Result<CallContractResponse, ProviderError>;

	/// Submits a signed invoke transaction.
	async fn add_invoke_transaction(
		&self,
		payload: InvokeFunctionPayload,
		signature: Signature,
		max_fee: Felt,
		version: Felt,
	) -> Result<AddTransactionResponse, ProviderError>;

	/// Submits a contract deployment.
	async fn deploy_contract(
		&self,
		definition: serde_json::Value,
		constructor_calldata: Vec<Felt>,
		salt: Felt,
	) -> Result<AddTransactionResponse, ProviderError>;

	/// Returns the current status of a transaction.
	async fn get_transaction_status(&self, hash: Felt) -> Result<TransactionStatus, ProviderError>;

	/// Polls a transaction until it is accepted.
	///
	/// Rejection surfaces as [`ProviderError::TransactionFailed`].
	async fn wait_for_transaction(&self, hash: Felt) -> Result<(), ProviderError>;
}

/// Factory function type for provider implementations.
pub type ProviderFactory = fn(&toml::Value) -> Result<Box<dyn ProviderInterface>, ProviderError>;

/// Registry trait for provider implementations.
pub trait ProviderRegistry: ImplementationRegistry<Factory = ProviderFactory> {}

/// Get all registered provider implementations.
pub fn get_all_implementations() -> Vec<(&'static str, ProviderFactory)> {
	use implementations::jsonrpc;

	vec![(jsonrpc::Registry::NAME, jsonrpc::Registry::factory())]
}

/// Service that routes account operations to a provider implementation.
///
/// A thin coordination layer in front of the implementation, mirroring the
/// account's usage: query, submit, wait.
#[derive(Clone)]
pub struct ProviderService {
	implementation: Arc<dyn ProviderInterface>,
}

impl ProviderService {
	/// Creates a new service around the given implementation.
	pub fn new(implementation: Arc<dyn ProviderInterface>) -> Self {
		Self { implementation }
	}

	/// Executes a read-only contract call.
	pub async fn call_contract(
		&self,
		request: FunctionCall,
	) -> Result<CallContractResponse, ProviderError> {
		self.implementation.call_contract(request).await
	}

	/// Submits a signed invoke transaction.
	pub async fn add_invoke_transaction(
		&self,
		payload: InvokeFunctionPayload,
		signature: Signature,
		max_fee: Felt,
		version: Felt,
	) -> Result<AddTransactionResponse, ProviderError> {
		self.implementation
			.add_invoke_transaction(payload, signature, max_fee, version)
			.await
	}

	/// Submits a contract deployment.
	pub async fn deploy_contract(
		&self,
		definition: serde_json::Value,
		constructor_calldata: Vec<Felt>,
		salt: Felt,
	) -> Result<AddTransactionResponse, ProviderError> {
		self.implementation
			.deploy_contract(definition, constructor_calldata, salt)
			.await
	}

	/// Polls a transaction until it is accepted.
	pub async fn wait_for_transaction(&self, hash: Felt) -> Result<(), ProviderError> {
		self.implementation.wait_for_transaction(hash).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct ScriptedProvider;

	#[async_trait]
	impl ProviderInterface for ScriptedProvider {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			Box::new(implementations::jsonrpc::JsonRpcProviderSchema)
		}

		async fn fetch_endpoint(
			&self,
			_method: String,
			_params: serde_json::Value,
		) -> Result<serde_json::Value, ProviderError> {
			Ok(serde_json::Value::Null)
		}

		async fn call_contract(
			&self,
			request: FunctionCall,
		) -> Result<CallContractResponse, ProviderError> {
			Ok(CallContractResponse {
				result: vec![request.entrypoint],
			})
		}

		async fn add_invoke_transaction(
			&self,
			_payload: InvokeFunctionPayload,
			_signature: Signature,
			_max_fee: Felt,
			_version: Felt,
		) -> Result<AddTransactionResponse, ProviderError> {
			Ok(AddTransactionResponse {
				code: TransactionStatus::Received,
				transaction_hash: Felt::ONE,
				address: None,
			})
		}

		async fn deploy_contract(
			&self,
			_definition: serde_json::Value,
			_constructor_calldata: Vec<Felt>,
			_salt: Felt,
		) -> Result<AddTransactionResponse, ProviderError> {
			Ok(AddTransactionResponse {
				code: TransactionStatus::Received,
				transaction_hash: Felt::TWO,
				address: Some("0x99".to_string()),
			})
		}

		async fn get_transaction_status(
			&self,
			_hash: Felt,
		) -> Result<TransactionStatus, ProviderError> {
			Ok(TransactionStatus::AcceptedOnL2)
		}

		async fn wait_for_transaction(&self, _hash: Felt) -> Result<(), ProviderError> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn test_service_routes_to_implementation() {
		let service = ProviderService::new(Arc::new(ScriptedProvider));

		let response = service
			.call_contract(FunctionCall {
				contract_address: Felt::ONE,
				entrypoint: "get_nonce".to_string(),
				calldata: vec![],
			})
			.await
			.unwrap();
		assert_eq!(response.result, vec!["get_nonce".to_string()]);

		let response = service
			.add_invoke_transaction(
				InvokeFunctionPayload {
					contract_address: Felt::ONE,
					entry_point_selector: Felt::TWO,
					calldata: vec![],
				},
				Signature {
					r: Felt::ONE,
					s: Felt::TWO,
				},
				Felt::ZERO,
				Felt::ZERO,
			)
			.await
			.unwrap();
		assert_eq!(response.transaction_hash, Felt::ONE);

		let response = service
			.deploy_contract(serde_json::json!({}), vec![], Felt::ZERO)
			.await
			.unwrap();
		assert_eq!(response.address.as_deref(), Some("0x99"));

		service.wait_for_transaction(Felt::ONE).await.unwrap();
	}

	#[test]
	fn test_provider_error_display() {
		let err = ProviderError::Rpc {
			code: -32602,
			message: "invalid params".to_string(),
		};
		assert_eq!(format!("{}", err), "RPC error -32602: invalid params");

		let err = ProviderError::Network("connection refused".to_string());
		assert_eq!(format!("{}", err), "Network error: connection refused");
	}

	#[test]
	fn test_get_all_implementations_includes_jsonrpc() {
		let impls = get_all_implementations();
		assert!(impls.iter().any(|(name, _)| *name == "jsonrpc"));
	}
}
