//! Hashing and signing primitives for the account SDK.
//!
//! This crate hosts the deterministic pieces of the transaction pipeline:
//! the Pedersen hash chain and selector hashing, the calldata compiler for
//! the `__execute__` wire layout, the transaction hash, the typed-data
//! hashing scheme for off-chain messages, and the elliptic-curve signature
//! operations on the STARK curve.
//!
//! Every function here is pure; changing any hashing scheme is a breaking
//! version bump, never a silent change.

/// Calldata compiler: flattening calls into the `__execute__` layout.
pub mod calldata;
/// Elliptic-curve key handling, signing and verification.
pub mod ecdsa;
/// Pedersen hash chain and selector hashing.
pub mod hash;
/// Transaction hash computation.
pub mod transaction_hash;
/// Typed structured data hashing for off-chain message signing.
pub mod typed_data;

pub use calldata::{compile_calldata, compile_execute_calldata, CallArg};
pub use ecdsa::{ecdsa_sign, ecdsa_verify, KeyPair, SigningError};
pub use hash::{compute_hash_on_elements, selector_from_name, starknet_keccak, HashChain};
pub use transaction_hash::{transaction_hash, EXECUTE_ENTRYPOINT, PREFIX_INVOKE};
pub use typed_data::{message_hash, TypedDataError};
