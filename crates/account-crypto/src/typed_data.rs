//! Typed structured data hashing.
//!
//! Reduces a [`TypedData`] document to one field element using a recursive
//! struct-hashing scheme: each struct hashes to `h([type_hash, field1, ..])`
//! where the type hash is the selector of a canonical type-signature
//! string, and array fields hash through the length-binding hash chain.
//! The final message hash also binds the signer's address, so a signature
//! can never be replayed against a different account.

use crate::hash::{compute_hash_on_elements, selector_from_name};
use account_types::encoding::{felt_from_dec, felt_from_hex, felt_from_short_string, EncodingError};
use account_types::{TypeField, TypedData};
use starknet_types_core::felt::Felt;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Domain-separation prefix for off-chain messages, the short string
/// `"StarkNet Message"`.
static PREFIX_MESSAGE: LazyLock<Felt> =
	LazyLock::new(|| felt_from_short_string("StarkNet Message").expect("valid short string"));

/// Name of the struct type describing the signing domain.
const DOMAIN_TYPE: &str = "StarkNetDomain";

/// Errors that can occur while hashing a typed-data document.
#[derive(Debug, thiserror::Error)]
pub enum TypedDataError {
	/// A referenced struct type has no definition.
	#[error("Unknown type: {0}")]
	UnknownType(String),
	/// A struct value is missing a field its type declares.
	#[error("Missing field '{field}' in value of type '{r#type}'")]
	MissingField { r#type: String, field: String },
	/// A value cannot be interpreted as its declared type.
	#[error("Invalid value for type '{r#type}': {message}")]
	InvalidValue { r#type: String, message: String },
	/// A scalar literal failed to encode as a field element.
	#[error(transparent)]
	Encoding(#[from] EncodingError),
}

type Types = BTreeMap<String, Vec<TypeField>>;

/// Collects the struct types referenced by `type_name`, excluding itself.
fn dependencies(types: &Types, type_name: &str) -> Result<Vec<String>, TypedDataError> {
	let mut found = Vec::new();
	let mut pending = vec![type_name.to_string()];

	while let Some(current) = pending.pop() {
		let fields = types
			.get(&current)
			.ok_or_else(|| TypedDataError::UnknownType(current.clone()))?;
		for field in fields {
			let base = field.r#type.trim_end_matches('*');
			if types.contains_key(base)
				&& base != type_name
				&& !found.iter().any(|seen: &String| seen == base)
			{
				found.push(base.to_string());
				pending.push(base.to_string());
			}
		}
	}

	Ok(found)
}

/// Produces the canonical type-signature string for `type_name`.
///
/// The primary type comes first, followed by its dependencies sorted
/// alphabetically, each rendered as `Name(field1:type1,field2:type2)`.
fn encode_type(types: &Types, type_name: &str) -> Result<String, TypedDataError> {
	let mut deps = dependencies(types, type_name)?;
	deps.sort();

	let mut out = String::new();
	for name in std::iter::once(type_name.to_string()).chain(deps) {
		let fields = types
			.get(&name)
			.ok_or_else(|| TypedDataError::UnknownType(name.clone()))?;
		let rendered: Vec<String> = fields
			.iter()
			.map(|f| format!("{}:{}", f.name, f.r#type))
			.collect();
		out.push_str(&format!("{}({})", name, rendered.join(",")));
	}

	Ok(out)
}

/// Hash of the canonical type-signature string.
fn type_hash(types: &Types, type_name: &str) -> Result<Felt, TypedDataError> {
	Ok(selector_from_name(&encode_type(types, type_name)?))
}

/// Encodes a scalar JSON value as a field element.
///
/// Numbers encode directly; strings are interpreted as hex when
/// `0x`-prefixed, as decimal when all digits, and as a short string
/// otherwise. Numbers are limited to `u64`; larger values must be passed
/// as decimal or hex strings.
fn encode_scalar(value: &serde_json::Value) -> Result<Felt, TypedDataError> {
	match value {
		serde_json::Value::Number(n) => {
			let as_u64 = n.as_u64().ok_or_else(|| TypedDataError::InvalidValue {
				r#type: "felt".to_string(),
				message: format!("{} is not a non-negative integer", n),
			})?;
			Ok(Felt::from(as_u64))
		}
		serde_json::Value::String(s) => {
			if s.starts_with("0x") {
				Ok(felt_from_hex(s)?)
			} else if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
				Ok(felt_from_dec(s)?)
			} else {
				Ok(felt_from_short_string(s)?)
			}
		}
		other => Err(TypedDataError::InvalidValue {
			r#type: "felt".to_string(),
			message: format!("expected number or string, got {}", other),
		}),
	}
}

/// Encodes one value of the given type, recursing into structs and arrays.
fn encode_value(
	types: &Types,
	type_name: &str,
	value: &serde_json::Value,
) -> Result<Felt, TypedDataError> {
	if let Some(base) = type_name.strip_suffix('*') {
		let items = value.as_array().ok_or_else(|| TypedDataError::InvalidValue {
			r#type: type_name.to_string(),
			message: "expected an array".to_string(),
		})?;
		let encoded: Vec<Felt> = items
			.iter()
			.map(|item| encode_value(types, base, item))
			.collect::<Result<_, _>>()?;
		// The chain finalizer binds the array length.
		Ok(compute_hash_on_elements(&encoded))
	} else if types.contains_key(type_name) {
		struct_hash(types, type_name, value)
	} else {
		encode_scalar(value)
	}
}

/// Hashes a struct value: `h([type_hash, field1, .., fieldN])`.
fn struct_hash(
	types: &Types,
	type_name: &str,
	value: &serde_json::Value,
) -> Result<Felt, TypedDataError> {
	let fields = types
		.get(type_name)
		.ok_or_else(|| TypedDataError::UnknownType(type_name.to_string()))?;
	let object = value.as_object().ok_or_else(|| TypedDataError::InvalidValue {
		r#type: type_name.to_string(),
		message: "expected an object".to_string(),
	})?;

	let mut elements = vec![type_hash(types, type_name)?];
	for field in fields {
		let field_value = object
			.get(&field.name)
			.ok_or_else(|| TypedDataError::MissingField {
				r#type: type_name.to_string(),
				field: field.name.clone(),
			})?;
		elements.push(encode_value(types, &field.r#type, field_value)?);
	}

	Ok(compute_hash_on_elements(&elements))
}

/// Computes the message hash of a typed-data document for a signer.
///
/// ```text
/// h(["StarkNet Message", domain_hash, account_address, message_hash])
/// ```
///
/// Identical `(data, address)` inputs always yield the identical hash;
/// different signer addresses always yield different hashes.
pub fn message_hash(data: &TypedData, account_address: Felt) -> Result<Felt, TypedDataError> {
	let domain = struct_hash(&data.types, DOMAIN_TYPE, &data.domain)?;
	let message = struct_hash(&data.types, &data.primary_type, &data.message)?;

	Ok(compute_hash_on_elements(&[
		*PREFIX_MESSAGE,
		domain,
		account_address,
		message,
	]))
}
