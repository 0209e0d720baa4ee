//! Calldata compiler.
//!
//! Flattens structured calls into the flat field-element sequences the
//! account contract expects. The `__execute__` layout produced by
//! [`compile_execute_calldata`] is a stable wire contract with the deployed
//! account contract; reordering any span breaks on-chain execution.

use crate::hash::selector_from_name;
use account_types::Call;
use starknet_types_core::felt::Felt;

/// A named argument value: either a single field element or an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
	Single(Felt),
	Array(Vec<Felt>),
}

/// Flattens named arguments into a calldata sequence.
///
/// Arguments are emitted in insertion order, which is the documented field
/// order of the call shape. Arrays expand to their length followed by the
/// elements, matching the ABI rule that every variable-length span is
/// length-prefixed.
pub fn compile_calldata(args: &[(String, CallArg)]) -> Vec<Felt> {
	let mut out = Vec::new();
	for (_, arg) in args {
		match arg {
			CallArg::Single(value) => out.push(*value),
			CallArg::Array(values) => {
				out.push(Felt::from(values.len() as u64));
				out.extend_from_slice(values);
			}
		}
	}
	out
}

/// Flattens a batch of calls plus a nonce into `__execute__` calldata.
///
/// Layout, in order:
/// 1. call count;
/// 2. per call: contract address, entrypoint selector, offset of the call's
///    data within the concatenated span, and its length;
/// 3. length of the concatenated calldata, then the concatenated calldata
///    of all calls in call order;
/// 4. the nonce.
///
/// Pure and deterministic; call order is significant and preserved.
pub fn compile_execute_calldata(calls: &[Call], nonce: Felt) -> Vec<Felt> {
	let mut call_array = Vec::with_capacity(calls.len() * 4);
	let mut concatenated = Vec::new();

	for call in calls {
		call_array.push(call.contract_address);
		call_array.push(selector_from_name(&call.entrypoint));
		call_array.push(Felt::from(concatenated.len() as u64));
		call_array.push(Felt::from(call.calldata.len() as u64));
		concatenated.extend_from_slice(&call.calldata);
	}

	let mut out = Vec::with_capacity(2 + call_array.len() + concatenated.len() + 1);
	out.push(Felt::from(calls.len() as u64));
	out.extend(call_array);
	out.push(Felt::from(concatenated.len() as u64));
	out.extend(concatenated);
	out.push(nonce);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn call(address: u64, entrypoint: &str, calldata: Vec<u64>) -> Call {
		Call {
			contract_address: Felt::from(address),
			entrypoint: entrypoint.to_string(),
			calldata: calldata.into_iter().map(Felt::from).collect(),
		}
	}

	#[test]
	fn test_compile_calldata_preserves_insertion_order() {
		let args = vec![
			("recipient".to_string(), CallArg::Single(Felt::from(5u64))),
			(
				"amounts".to_string(),
				CallArg::Array(vec![Felt::from(10u64), Felt::from(20u64)]),
			),
			("flag".to_string(), CallArg::Single(Felt::ONE)),
		];

		assert_eq!(
			compile_calldata(&args),
			vec![
				Felt::from(5u64),
				Felt::TWO, // array length prefix
				Felt::from(10u64),
				Felt::from(20u64),
				Felt::ONE,
			]
		);
	}

	#[test]
	fn test_compile_calldata_empty_array() {
		let args = vec![("values".to_string(), CallArg::Array(vec![]))];
		assert_eq!(compile_calldata(&args), vec![Felt::ZERO]);
	}

	#[test]
	fn test_execute_calldata_single_call() {
		let transfer = call(0xe5, "transfer", vec![0xaa, 10]);
		let out = compile_execute_calldata(&[transfer], Felt::ZERO);

		assert_eq!(
			out,
			vec![
				Felt::ONE,                      // call count
				Felt::from(0xe5u64),            // contract address
				selector_from_name("transfer"), // selector
				Felt::ZERO,                     // data offset
				Felt::TWO,                      // data length
				Felt::TWO,                      // total calldata length
				Felt::from(0xaau64),
				Felt::from(10u64),
				Felt::ZERO, // nonce
			]
		);
	}

	#[test]
	fn test_execute_calldata_multicall_offsets() {
		let first = call(1, "set_a", vec![7, 8, 9]);
		let second = call(2, "set_b", vec![4]);
		let out = compile_execute_calldata(&[first, second], Felt::from(3u64));

		assert_eq!(out[0], Felt::TWO);
		// First call descriptor: offset 0, length 3.
		assert_eq!(out[3], Felt::ZERO);
		assert_eq!(out[4], Felt::THREE);
		// Second call descriptor: offset 3, length 1.
		assert_eq!(out[7], Felt::THREE);
		assert_eq!(out[8], Felt::ONE);
		// Concatenated span: total length then data in call order.
		assert_eq!(out[9], Felt::from(4u64));
		assert_eq!(
			&out[10..14],
			&[
				Felt::from(7u64),
				Felt::from(8u64),
				Felt::from(9u64),
				Felt::from(4u64)
			]
		);
		// Nonce is last.
		assert_eq!(*out.last().unwrap(), Felt::THREE);
	}

	#[test]
	fn test_execute_calldata_is_deterministic() {
		let calls = vec![call(1, "a", vec![1, 2]), call(2, "b", vec![3])];
		let nonce = Felt::from(9u64);
		assert_eq!(
			compile_execute_calldata(&calls, nonce),
			compile_execute_calldata(&calls, nonce)
		);
	}

	#[test]
	fn test_execute_calldata_call_order_is_significant() {
		let a = call(1, "a", vec![1]);
		let b = call(2, "b", vec![2]);
		let forward = compile_execute_calldata(&[a.clone(), b.clone()], Felt::ZERO);
		let reversed = compile_execute_calldata(&[b, a], Felt::ZERO);
		assert_ne!(forward, reversed);
	}

	#[test]
	fn test_execute_calldata_no_calls() {
		let out = compile_execute_calldata(&[], Felt::from(5u64));
		assert_eq!(out, vec![Felt::ZERO, Felt::ZERO, Felt::from(5u64)]);
	}
}
