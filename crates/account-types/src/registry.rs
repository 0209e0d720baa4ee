//! Registry trait for self-registering implementations.
//!
//! Signer and provider implementations register themselves under a stable
//! name together with a factory, so components are selected by
//! configuration rather than compile-time wiring.

/// Trait implemented by every pluggable implementation.
pub trait ImplementationRegistry {
	/// Stable name the implementation is selected by in configuration.
	const NAME: &'static str;
	/// Factory function type producing the implementation.
	type Factory;

	/// Returns the factory for this implementation.
	fn factory() -> Self::Factory;
}
