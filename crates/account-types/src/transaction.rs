//! Transaction-related types for the account pipeline.
//!
//! This module defines the contract call representation, the metadata bound
//! into transaction hashes, elliptic-curve signatures, and the wire payload
//! and response types exchanged with the network gateway.

use crate::encoding::{felt_hex, felt_hex_vec};
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

/// A single contract invocation.
///
/// The entrypoint is carried by name and resolved to a selector at encoding
/// time. A call is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
	/// Address of the target contract.
	#[serde(with = "felt_hex")]
	pub contract_address: Felt,
	/// Entrypoint name, e.g. `"transfer"`.
	pub entrypoint: String,
	/// Flat ordered calldata for this call.
	#[serde(with = "felt_hex_vec")]
	pub calldata: Vec<Felt>,
}

/// Metadata bound into the transaction hash.
///
/// Every field must be fully determined before signing; the values hashed
/// and the values submitted must be identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationsSignerDetails {
	/// Address of the account contract sending the transaction.
	pub wallet_address: Felt,
	/// Account nonce for this transaction.
	pub nonce: Felt,
	/// Maximum fee the sender is willing to pay.
	pub max_fee: Felt,
	/// Transaction version.
	pub version: Felt,
	/// Chain identifier (encoded short string).
	pub chain_id: Felt,
}

/// Caller-supplied overrides for `execute`.
///
/// Absent fields are resolved by the account: the nonce is read from the
/// chain and the max fee defaults to zero where the network allows it.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOverrides {
	/// Explicit nonce, bypassing the on-chain read.
	pub nonce: Option<Felt>,
	/// Explicit maximum fee.
	pub max_fee: Option<Felt>,
}

/// An elliptic-curve signature over a transaction or message hash.
///
/// Always carried as the ordered pair `(r, s)`, never as a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
	pub r: Felt,
	pub s: Felt,
}

impl Signature {
	/// Returns the signature as an ordered sequence of field elements.
	pub fn as_felts(&self) -> Vec<Felt> {
		vec![self.r, self.s]
	}

	/// Reconstructs a signature from an ordered sequence.
	///
	/// Returns `None` unless the sequence is exactly `[r, s]`.
	pub fn from_felts(felts: &[Felt]) -> Option<Self> {
		match felts {
			[r, s] => Some(Self { r: *r, s: *s }),
			_ => None,
		}
	}
}

impl Serialize for Signature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_seq(self.as_felts().iter().map(crate::encoding::felt_to_hex))
	}
}

impl<'de> Deserialize<'de> for Signature {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let literals = Vec::<String>::deserialize(deserializer)?;
		let felts = crate::encoding::felts_from_hex(&literals).map_err(serde::de::Error::custom)?;
		Signature::from_felts(&felts)
			.ok_or_else(|| serde::de::Error::custom("signature must be exactly [r, s]"))
	}
}

/// A read-only contract query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
	#[serde(with = "felt_hex")]
	pub contract_address: Felt,
	/// Entrypoint name; implementations resolve it to a selector.
	pub entrypoint: String,
	#[serde(with = "felt_hex_vec")]
	pub calldata: Vec<Felt>,
}

/// The assembled invocation submitted to the gateway.
///
/// The calldata layout is the stable `__execute__` wire contract; see the
/// calldata compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeFunctionPayload {
	#[serde(with = "felt_hex")]
	pub contract_address: Felt,
	#[serde(with = "felt_hex")]
	pub entry_point_selector: Felt,
	#[serde(with = "felt_hex_vec")]
	pub calldata: Vec<Felt>,
}

/// Status codes returned by the gateway for submitted transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
	/// Submission accepted by the gateway. Not finality.
	#[serde(rename = "TRANSACTION_RECEIVED")]
	Received,
	/// Transaction is in the pending block.
	#[serde(rename = "PENDING")]
	Pending,
	/// Transaction accepted on the layer-2 chain.
	#[serde(rename = "ACCEPTED_ON_L2")]
	AcceptedOnL2,
	/// Transaction proven and accepted on the base layer.
	#[serde(rename = "ACCEPTED_ON_L1")]
	AcceptedOnL1,
	/// Transaction rejected by the sequencer.
	#[serde(rename = "REJECTED")]
	Rejected,
	/// Transaction not yet received.
	#[serde(rename = "NOT_RECEIVED")]
	NotReceived,
}

impl TransactionStatus {
	/// Whether this status is terminal and successful.
	pub fn is_accepted(&self) -> bool {
		matches!(self, Self::AcceptedOnL2 | Self::AcceptedOnL1)
	}
}

/// Gateway response to a transaction submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTransactionResponse {
	/// Submission status; `TRANSACTION_RECEIVED` on success.
	pub code: TransactionStatus,
	#[serde(with = "felt_hex")]
	pub transaction_hash: Felt,
	/// Deployed contract address, present for deployments only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
}

/// Gateway response to a read-only contract call.
///
/// Result elements are hex strings; callers decode them through the
/// encoding layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContractResponse {
	pub result: Vec<String>,
}
