//! JSON-RPC provider implementation.
//!
//! Talks to a StarkNet gateway over HTTP using JSON-RPC 2.0 request
//! framing. Every network operation funnels through [`JsonRpcProvider::rpc`],
//! which assigns request ids and splits result from error envelopes.

use crate::{ProviderError, ProviderInterface, ProviderRegistry};
use account_crypto::selector_from_name;
use account_types::{
	felt_to_hex, felts_to_hex, AddTransactionResponse, CallContractResponse, ConfigSchema, Felt,
	Field, FieldType, FunctionCall, ImplementationRegistry, InvokeFunctionPayload, Schema,
	Signature, TransactionStatus, ValidationError,
};
use async_trait::async_trait;
use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};
use url::Url;

/// Default interval between status polls, in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Provider backed by an HTTP JSON-RPC endpoint.
pub struct JsonRpcProvider {
	client: reqwest::Client,
	url: Url,
	request_id: AtomicU64,
	poll_interval: Duration,
}

impl JsonRpcProvider {
	/// Creates a new provider for the given endpoint URL.
	pub fn new(url: Url, poll_interval: Duration) -> Self {
		Self {
			client: reqwest::Client::new(),
			url,
			request_id: AtomicU64::new(1),
			poll_interval,
		}
	}

	/// Sends one JSON-RPC request and unwraps its envelope.
	async fn rpc(
		&self,
		method: &str,
		params: serde_json::Value,
	) -> Result<serde_json::Value, ProviderError> {
		let id = self.request_id.fetch_add(1, Ordering::Relaxed);
		let body = build_request_body(id, method, params);

		tracing::debug!(method, id, "sending rpc request");

		let response = self
			.client
			.post(self.url.clone())
			.json(&body)
			.send()
			.await
			.map_err(|e| ProviderError::Network(e.to_string()))?;

		let envelope: serde_json::Value = response
			.json()
			.await
			.map_err(|e| ProviderError::Network(e.to_string()))?;

		extract_result(envelope)
	}
}

/// Builds a JSON-RPC 2.0 request body.
fn build_request_body(id: u64, method: &str, params: serde_json::Value) -> serde_json::Value {
	serde_json::json!({
		"jsonrpc": "2.0",
		"id": id,
		"method": method,
		"params": params,
	})
}

/// Splits a JSON-RPC response envelope into result or error.
fn extract_result(envelope: serde_json::Value) -> Result<serde_json::Value, ProviderError> {
	if let Some(error) = envelope.get("error") {
		let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
		let message = error
			.get("message")
			.and_then(|m| m.as_str())
			.unwrap_or("unknown error")
			.to_string();
		return Err(ProviderError::Rpc { code, message });
	}
	match envelope.get("result") {
		Some(result) => Ok(result.clone()),
		None => Err(ProviderError::UnexpectedResponse(
			"response has neither result nor error".to_string(),
		)),
	}
}

/// Builds the params object for a read-only contract call.
///
/// The entrypoint name is resolved to its selector here, at the wire
/// boundary.
fn call_contract_params(request: &FunctionCall) -> serde_json::Value {
	serde_json::json!({
		"contract_address": felt_to_hex(&request.contract_address),
		"entry_point_selector": felt_to_hex(&selector_from_name(&request.entrypoint)),
		"calldata": felts_to_hex(&request.calldata),
	})
}

/// Builds the params object for an invoke transaction submission.
fn invoke_transaction_params(
	payload: &InvokeFunctionPayload,
	signature: &Signature,
	max_fee: Felt,
	version: Felt,
) -> serde_json::Value {
	serde_json::json!({
		"type": "INVOKE_FUNCTION",
		"contract_address": felt_to_hex(&payload.contract_address),
		"entry_point_selector": felt_to_hex(&payload.entry_point_selector),
		"calldata": felts_to_hex(&payload.calldata),
		"signature": felts_to_hex(&signature.as_felts()),
		"max_fee": felt_to_hex(&max_fee),
		"version": felt_to_hex(&version),
	})
}

/// Builds the params object for a contract deployment.
fn deploy_transaction_params(
	definition: &serde_json::Value,
	constructor_calldata: &[Felt],
	salt: Felt,
) -> serde_json::Value {
	serde_json::json!({
		"type": "DEPLOY",
		"contract_definition": definition,
		"constructor_calldata": felts_to_hex(constructor_calldata),
		"contract_address_salt": felt_to_hex(&salt),
	})
}

/// Parses an add-transaction response envelope.
fn parse_add_transaction(value: serde_json::Value) -> Result<AddTransactionResponse, ProviderError> {
	serde_json::from_value(value)
		.map_err(|e| ProviderError::UnexpectedResponse(format!("add transaction response: {}", e)))
}

/// Decision taken after one status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollOutcome {
	/// The transaction reached a terminal accepted status.
	Accepted,
	/// The transaction was rejected; polling stops with an error.
	Failed,
	/// No terminal status yet; poll again after the interval.
	Pending,
}

/// Maps a transaction status to the polling decision.
fn poll_outcome(status: TransactionStatus) -> PollOutcome {
	match status {
		TransactionStatus::Rejected => PollOutcome::Failed,
		s if s.is_accepted() => PollOutcome::Accepted,
		_ => PollOutcome::Pending,
	}
}

/// Parses a transaction status response.
fn parse_transaction_status(value: serde_json::Value) -> Result<TransactionStatus, ProviderError> {
	let status = value
		.get("tx_status")
		.or_else(|| value.get("status"))
		.and_then(|s| s.as_str())
		.ok_or_else(|| {
			ProviderError::UnexpectedResponse("status response missing tx_status".to_string())
		})?;
	serde_json::from_value(serde_json::Value::String(status.to_string()))
		.map_err(|_| ProviderError::UnexpectedResponse(format!("unknown tx_status: {}", status)))
}

/// Configuration schema for the JSON-RPC provider.
pub struct JsonRpcProviderSchema;

impl ConfigSchema for JsonRpcProviderSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![
				Field::new("url", FieldType::String).with_validator(|value| match value.as_str() {
					Some(raw) => Url::parse(raw)
						.map(|_| ())
						.map_err(|e| format!("invalid URL: {}", e)),
					None => Err("Expected string value for url".to_string()),
				}),
			],
			// Optional fields
			vec![Field::new(
				"poll_interval_seconds",
				FieldType::Integer {
					min: Some(1),
					max: Some(600),
				},
			)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl ProviderInterface for JsonRpcProvider {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(JsonRpcProviderSchema)
	}

	async fn fetch_endpoint(
		&self,
		method: String,
		params: serde_json::Value,
	) -> Result<serde_json::Value, ProviderError> {
		self.rpc(&method, params).await
	}

	async fn call_contract(
		&self,
		request: FunctionCall,
	) -> Result<CallContractResponse, ProviderError> {
		let result = self
			.rpc("starknet_call", call_contract_params(&request))
			.await?;
		serde_json::from_value(result)
			.map_err(|e| ProviderError::UnexpectedResponse(format!("call response: {}", e)))
	}

	async fn add_invoke_transaction(
		&self,
		payload: InvokeFunctionPayload,
		signature: Signature,
		max_fee: Felt,
		version: Felt,
	) -> Result<AddTransactionResponse, ProviderError> {
		let params = invoke_transaction_params(&payload, &signature, max_fee, version);
		let result = self.rpc("starknet_addInvokeTransaction", params).await?;
		parse_add_transaction(result)
	}

	async fn deploy_contract(
		&self,
		definition: serde_json::Value,
		constructor_calldata: Vec<Felt>,
		salt: Felt,
	) -> Result<AddTransactionResponse, ProviderError> {
		let params = deploy_transaction_params(&definition, &constructor_calldata, salt);
		let result = self.rpc("starknet_addDeployTransaction", params).await?;
		parse_add_transaction(result)
	}

	async fn get_transaction_status(&self, hash: Felt) -> Result<TransactionStatus, ProviderError> {
		let params = serde_json::json!({
			"transaction_hash": felt_to_hex(&hash),
		});
		let result = self.rpc("starknet_getTransactionStatus", params).await?;
		parse_transaction_status(result)
	}

	async fn wait_for_transaction(&self, hash: Felt) -> Result<(), ProviderError> {
		loop {
			let status = self.get_transaction_status(hash).await?;
			tracing::debug!(hash = %felt_to_hex(&hash), ?status, "polled transaction status");

			match poll_outcome(status) {
				PollOutcome::Accepted => return Ok(()),
				PollOutcome::Failed => {
					return Err(ProviderError::TransactionFailed(format!(
						"transaction {} rejected",
						felt_to_hex(&hash)
					)));
				},
				PollOutcome::Pending => tokio::time::sleep(self.poll_interval).await,
			}
		}
	}
}

/// Factory function to create a JSON-RPC provider from configuration.
pub fn create_provider(config: &toml::Value) -> Result<Box<dyn ProviderInterface>, ProviderError> {
	JsonRpcProviderSchema
		.validate(config)
		.map_err(|e| ProviderError::Network(format!("invalid configuration: {}", e)))?;

	let url = config
		.get("url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| ProviderError::Network("url is required".to_string()))?;
	let url = Url::parse(url).map_err(|e| ProviderError::Network(format!("invalid URL: {}", e)))?;

	let poll_interval = config
		.get("poll_interval_seconds")
		.and_then(|v| v.as_integer())
		.map(|s| Duration::from_secs(s as u64))
		.unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));

	Ok(Box::new(JsonRpcProvider::new(url, poll_interval)))
}

/// Registry for the JSON-RPC provider implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "jsonrpc";
	type Factory = crate::ProviderFactory;

	fn factory() -> Self::Factory {
		create_provider
	}
}

impl ProviderRegistry for Registry {}
