//! Transaction hash computation.
//!
//! The hash binds the full transaction metadata: calldata, sender address,
//! nonce, max fee, version and chain id. A signature over this hash cannot
//! be replayed against a different nonce, fee, version or chain.

use crate::hash::{compute_hash_on_elements, selector_from_name};
use account_types::encoding::felt_from_short_string;
use starknet_types_core::felt::Felt;
use std::sync::LazyLock;

/// Domain-separation prefix for invoke transactions, the short string
/// `"invoke"`.
pub static PREFIX_INVOKE: LazyLock<Felt> =
	LazyLock::new(|| felt_from_short_string("invoke").expect("valid short string"));

/// Selector of the account contract's multicall entrypoint.
pub static EXECUTE_ENTRYPOINT: LazyLock<Felt> = LazyLock::new(|| selector_from_name("__execute__"));

/// Computes the invoke transaction hash.
///
/// `calldata` is the compiled `__execute__` calldata. The scheme is fixed
/// and versioned:
///
/// ```text
/// h([PREFIX_INVOKE, version, address, EXECUTE_ENTRYPOINT,
///    h(calldata), max_fee, chain_id, nonce])
/// ```
pub fn transaction_hash(
	calldata: &[Felt],
	contract_address: Felt,
	nonce: Felt,
	max_fee: Felt,
	version: Felt,
	chain_id: Felt,
) -> Felt {
	compute_hash_on_elements(&[
		*PREFIX_INVOKE,
		version,
		contract_address,
		*EXECUTE_ENTRYPOINT,
		compute_hash_on_elements(calldata),
		max_fee,
		chain_id,
		nonce,
	])
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_hash() -> Felt {
		transaction_hash(
			&[Felt::ONE, Felt::TWO],
			Felt::from(0xaau64),
			Felt::ZERO,
			Felt::ZERO,
			Felt::ZERO,
			Felt::from(0x534eu64),
		)
	}

	#[test]
	fn test_prefix_is_short_string_invoke() {
		assert_eq!(*PREFIX_INVOKE, Felt::from_hex("0x696e766f6b65").unwrap());
	}

	#[test]
	fn test_hash_is_deterministic() {
		assert_eq!(base_hash(), base_hash());
	}

	#[test]
	fn test_hash_binds_every_field() {
		let base = base_hash();
		let calldata = [Felt::ONE, Felt::TWO];
		let address = Felt::from(0xaau64);
		let chain = Felt::from(0x534eu64);

		// Calldata
		assert_ne!(
			base,
			transaction_hash(
				&[Felt::ONE, Felt::THREE],
				address,
				Felt::ZERO,
				Felt::ZERO,
				Felt::ZERO,
				chain,
			)
		);
		// Address
		assert_ne!(
			base,
			transaction_hash(
				&calldata,
				Felt::from(0xabu64),
				Felt::ZERO,
				Felt::ZERO,
				Felt::ZERO,
				chain,
			)
		);
		// Nonce
		assert_ne!(
			base,
			transaction_hash(&calldata, address, Felt::ONE, Felt::ZERO, Felt::ZERO, chain)
		);
		// Max fee
		assert_ne!(
			base,
			transaction_hash(&calldata, address, Felt::ZERO, Felt::ONE, Felt::ZERO, chain)
		);
		// Version
		assert_ne!(
			base,
			transaction_hash(&calldata, address, Felt::ZERO, Felt::ZERO, Felt::ONE, chain)
		);
		// Chain id
		assert_ne!(
			base,
			transaction_hash(
				&calldata,
				address,
				Felt::ZERO,
				Felt::ZERO,
				Felt::ZERO,
				Felt::from(0x534fu64),
			)
		);
	}
}
