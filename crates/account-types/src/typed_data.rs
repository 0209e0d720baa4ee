//! Typed structured data for off-chain message signing.
//!
//! A [`TypedData`] document carries a schema of struct types, a signing
//! domain and a message payload. The account treats it as opaque input; the
//! hashing engine reduces it deterministically to a single field element
//! bound to the signer's address.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
	/// Field name as it appears in the message payload.
	pub name: String,
	/// Field type: `"felt"`, `"felt*"` for arrays, or another struct name.
	#[serde(rename = "type")]
	pub r#type: String,
}

/// A caller-supplied structured document for off-chain signing.
///
/// Field values inside `domain` and `message` may be JSON numbers,
/// `0x`-prefixed hex strings, decimal strings, or short strings (the
/// fallback for any other string). JSON numbers must fit in a `u64`;
/// larger field elements must be passed as decimal or hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedData {
	/// Struct type definitions, including the domain type.
	pub types: BTreeMap<String, Vec<TypeField>>,
	/// Name of the struct type describing `message`.
	#[serde(rename = "primaryType")]
	pub primary_type: String,
	/// The signing domain, an instance of `StarkNetDomain`.
	pub domain: serde_json::Value,
	/// The message payload, an instance of `primary_type`.
	pub message: serde_json::Value,
}
