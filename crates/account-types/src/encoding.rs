//! Numeric/encoding layer for field elements.
//!
//! This module converts between the arbitrary-precision field element
//! representation and the decimal, hexadecimal and short-string encodings
//! used on the wire and in hash inputs. All conversions are round-trip safe
//! and fail fast on malformed literals; nothing is silently truncated or
//! reduced.

use starknet_types_core::felt::Felt;
use thiserror::Error;

/// Errors that can occur while converting numeric literals.
#[derive(Debug, Error)]
pub enum EncodingError {
	/// Error that occurs when a hexadecimal literal is malformed.
	#[error("Invalid hexadecimal literal: {0}")]
	InvalidHex(String),
	/// Error that occurs when a decimal literal is malformed.
	#[error("Invalid decimal literal: {0}")]
	InvalidDecimal(String),
	/// Error that occurs when a literal does not fit in a field element.
	#[error("Value does not fit in a field element: {0}")]
	Overflow(String),
	/// Error that occurs when a short string is not encodable.
	#[error("Invalid short string: {0}")]
	InvalidShortString(String),
}

/// Ensures a hex string has the `0x` prefix.
pub fn with_0x_prefix(hex: &str) -> String {
	if hex.starts_with("0x") {
		hex.to_string()
	} else {
		format!("0x{}", hex)
	}
}

/// Removes the `0x` prefix from a hex string if present.
pub fn without_0x_prefix(hex: &str) -> &str {
	hex.strip_prefix("0x").unwrap_or(hex)
}

/// Parses a hexadecimal literal into a field element.
///
/// Accepts the canonical `0x` prefix or a bare hex string. Rejects empty
/// literals, non-hex digits and values at or above the field prime.
pub fn felt_from_hex(literal: &str) -> Result<Felt, EncodingError> {
	let digits = without_0x_prefix(literal);
	if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(EncodingError::InvalidHex(literal.to_string()));
	}
	if digits.len() > 64 {
		return Err(EncodingError::Overflow(literal.to_string()));
	}

	let padded = format!("{:0>64}", digits.to_ascii_lowercase());
	let mut bytes = [0u8; 32];
	hex::decode_to_slice(&padded, &mut bytes)
		.map_err(|_| EncodingError::InvalidHex(literal.to_string()))?;

	// Big-endian comparison against P - 1 catches values outside the field
	// before `from_bytes_be` would reduce them.
	if bytes > Felt::MAX.to_bytes_be() {
		return Err(EncodingError::Overflow(literal.to_string()));
	}

	Ok(Felt::from_bytes_be(&bytes))
}

/// Parses a non-negative decimal literal into a field element.
pub fn felt_from_dec(literal: &str) -> Result<Felt, EncodingError> {
	if literal.is_empty() || !literal.chars().all(|c| c.is_ascii_digit()) {
		return Err(EncodingError::InvalidDecimal(literal.to_string()));
	}

	let value =
		Felt::from_dec_str(literal).map_err(|_| EncodingError::InvalidDecimal(literal.to_string()))?;

	// A literal at or above the prime parses but no longer round-trips to
	// its canonical form; treat that as overflow rather than reducing.
	let canonical = literal.trim_start_matches('0');
	let canonical = if canonical.is_empty() { "0" } else { canonical };
	if felt_to_dec(&value) != canonical {
		return Err(EncodingError::Overflow(literal.to_string()));
	}

	Ok(value)
}

/// Formats a field element as a minimal-width, `0x`-prefixed hex string.
pub fn felt_to_hex(value: &Felt) -> String {
	format!("{:#x}", value)
}

/// Formats a field element as a decimal string.
pub fn felt_to_dec(value: &Felt) -> String {
	value.to_string()
}

/// Parses a slice of hexadecimal literals element-wise.
pub fn felts_from_hex<S: AsRef<str>>(literals: &[S]) -> Result<Vec<Felt>, EncodingError> {
	literals.iter().map(|s| felt_from_hex(s.as_ref())).collect()
}

/// Parses a slice of decimal literals element-wise.
pub fn felts_from_dec<S: AsRef<str>>(literals: &[S]) -> Result<Vec<Felt>, EncodingError> {
	literals.iter().map(|s| felt_from_dec(s.as_ref())).collect()
}

/// Formats a slice of field elements as hex strings element-wise.
pub fn felts_to_hex(values: &[Felt]) -> Vec<String> {
	values.iter().map(felt_to_hex).collect()
}

/// Formats a slice of field elements as decimal strings element-wise.
pub fn felts_to_dec(values: &[Felt]) -> Vec<String> {
	values.iter().map(felt_to_dec).collect()
}

/// Encodes an ASCII short string (at most 31 bytes) as a field element.
///
/// Bytes are packed big-endian, so `"a"` encodes to `0x61`. Chain
/// identifiers and hash domain prefixes use this encoding.
pub fn felt_from_short_string(text: &str) -> Result<Felt, EncodingError> {
	if !text.is_ascii() || text.len() > 31 {
		return Err(EncodingError::InvalidShortString(text.to_string()));
	}

	let mut bytes = [0u8; 32];
	bytes[32 - text.len()..].copy_from_slice(text.as_bytes());
	Ok(Felt::from_bytes_be(&bytes))
}

/// Serde adapter serializing a [`Felt`] as a `0x`-prefixed hex string.
pub mod felt_hex {
	use serde::{Deserialize, Deserializer, Serializer};
	use starknet_types_core::felt::Felt;

	pub fn serialize<S: Serializer>(value: &Felt, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&super::felt_to_hex(value))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Felt, D::Error> {
		let literal = String::deserialize(deserializer)?;
		super::felt_from_hex(&literal).map_err(serde::de::Error::custom)
	}
}

/// Serde adapter serializing a `Vec<Felt>` as hex strings element-wise.
pub mod felt_hex_vec {
	use serde::{Deserialize, Deserializer, Serializer};
	use starknet_types_core::felt::Felt;

	pub fn serialize<S: Serializer>(values: &[Felt], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(values.iter().map(super::felt_to_hex))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Felt>, D::Error> {
		let literals = Vec::<String>::deserialize(deserializer)?;
		super::felts_from_hex(&literals).map_err(serde::de::Error::custom)
	}
}
