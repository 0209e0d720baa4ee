//! Pedersen hash chain and selector hashing.
//!
//! The hash chain is the canonical array hash of the network: starting from
//! zero, each element is folded in with a Pedersen hash and the chain is
//! finalized with the element count, so arrays of different lengths can
//! never collide. Selectors are the Keccak-250 hash of an entrypoint name.

use sha3::{Digest, Keccak256};
use starknet_crypto::pedersen_hash;
use starknet_types_core::felt::Felt;

/// An incremental Pedersen hash over a sequence of field elements.
///
/// `finalize` folds in the element count, which binds the sequence length
/// into the digest.
#[derive(Debug, Clone, Default)]
pub struct HashChain {
	current: Felt,
	length: u64,
}

impl HashChain {
	/// Creates an empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Folds one element into the chain.
	pub fn update(&mut self, element: &Felt) {
		self.current = pedersen_hash(&self.current, element);
		self.length += 1;
	}

	/// Completes the chain by folding in the element count.
	pub fn finalize(self) -> Felt {
		pedersen_hash(&self.current, &Felt::from(self.length))
	}
}

/// Computes the canonical array hash `h(..h(h(0, e1), e2).., en), n)`.
pub fn compute_hash_on_elements(elements: &[Felt]) -> Felt {
	let mut chain = HashChain::new();
	for element in elements {
		chain.update(element);
	}
	chain.finalize()
}

/// Keccak-256 reduced into the field by masking to 250 bits.
pub fn starknet_keccak(data: &[u8]) -> Felt {
	let mut hash: [u8; 32] = Keccak256::digest(data).into();
	// Keep the low 250 bits so the result is always a valid field element.
	hash[0] &= 0x03;
	Felt::from_bytes_be(&hash)
}

/// Hashes an entrypoint name into its selector.
///
/// Identical names always yield identical selectors. The default
/// entrypoints dispatch on selector zero.
pub fn selector_from_name(name: &str) -> Felt {
	if name == "__default__" || name == "__l1_default__" {
		Felt::ZERO
	} else {
		starknet_keccak(name.as_bytes())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn felt(hex: &str) -> Felt {
		Felt::from_hex(hex).unwrap()
	}

	#[test]
	fn test_empty_chain_matches_known_vector() {
		assert_eq!(
			compute_hash_on_elements(&[]),
			felt("0x49ee3eba8c1600700ee1b87eb599f16716b0b1022947733551fde4050ca6804")
		);
	}

	#[test]
	fn test_pedersen_known_vector() {
		// Vector from the reference implementation's signature test suite.
		assert_eq!(
			pedersen_hash(
				&felt("0x3d937c035c878245caf64531a5756109c53068da139362728feb561405371cb"),
				&felt("0x208a0a10250e382e1e4bbe2880906c2791bf6275695e02fbbc6aeff9cd8b31a"),
			),
			felt("0x30e480bed5fe53fa909cc0f8c4d99b8f9f2c016be4c41e13a4848797979c662")
		);
	}

	#[test]
	fn test_chain_binds_length() {
		// [1] and [1, 0] must never collide even though the extra element
		// is zero.
		let one = compute_hash_on_elements(&[Felt::ONE]);
		let one_zero = compute_hash_on_elements(&[Felt::ONE, Felt::ZERO]);
		assert_ne!(one, one_zero);
	}

	#[test]
	fn test_chain_is_order_sensitive() {
		let ab = compute_hash_on_elements(&[Felt::ONE, Felt::TWO]);
		let ba = compute_hash_on_elements(&[Felt::TWO, Felt::ONE]);
		assert_ne!(ab, ba);
	}

	#[test]
	fn test_incremental_chain_matches_batch() {
		let elements = [Felt::ONE, Felt::TWO, Felt::THREE];
		let mut chain = HashChain::new();
		for element in &elements {
			chain.update(element);
		}
		assert_eq!(chain.finalize(), compute_hash_on_elements(&elements));
	}

	#[test]
	fn test_selector_known_vectors() {
		assert_eq!(
			selector_from_name("transfer"),
			felt("0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e")
		);
		assert_eq!(
			selector_from_name("__execute__"),
			felt("0x15d40a3d6ca2ac30f4031e42be28da9b056fef9bb7357ac5e85627ee876e5ad")
		);
	}

	#[test]
	fn test_selector_is_deterministic() {
		assert_eq!(selector_from_name("balance_of"), selector_from_name("balance_of"));
		assert_ne!(selector_from_name("balance_of"), selector_from_name("transfer"));
	}

	#[test]
	fn test_default_entrypoints_hash_to_zero() {
		assert_eq!(selector_from_name("__default__"), Felt::ZERO);
		assert_eq!(selector_from_name("__l1_default__"), Felt::ZERO);
	}

	#[test]
	fn test_keccak_fits_in_250_bits() {
		let value = starknet_keccak(b"some fairly long input that produces high bits");
		let bytes = value.to_bytes_be();
		assert_eq!(bytes[0] & 0xfc, 0);
	}
}
