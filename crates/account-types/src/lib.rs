//! Common types module for the account SDK.
//!
//! This module defines the core data types and structures used throughout
//! the account pipeline. It provides a centralized location for shared types
//! to ensure consistency across all components.

/// Numeric/encoding layer: conversions between field elements and their
/// decimal, hexadecimal and short-string representations.
pub mod encoding;
/// Transaction-related types: calls, signer details, wire payloads and
/// gateway responses.
pub mod transaction;
/// Typed structured data for off-chain message signing.
pub mod typed_data;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;
/// Registry trait for self-registering implementations.
pub mod registry;

// Re-export all types for convenient access
pub use encoding::{
	felt_from_dec, felt_from_hex, felt_from_short_string, felt_to_dec, felt_to_hex,
	felts_from_dec, felts_from_hex, felts_to_dec, felts_to_hex, with_0x_prefix,
	without_0x_prefix, EncodingError,
};
pub use registry::ImplementationRegistry;
pub use transaction::{
	AddTransactionResponse, Call, CallContractResponse, ExecuteOverrides, FunctionCall,
	InvocationsSignerDetails, InvokeFunctionPayload, Signature, TransactionStatus,
};
pub use typed_data::{TypeField, TypedData};
pub use validation::{ConfigSchema, Field, FieldType, Schema, ValidationError};

/// The field element type used for all calldata and hash values.
///
/// Re-exported so downstream crates do not need a direct dependency on
/// `starknet-types-core`.
pub use starknet_types_core::felt::Felt;
