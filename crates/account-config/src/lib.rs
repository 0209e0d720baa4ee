//! Configuration module for the account SDK.
//!
//! Configuration lives in a TOML file with one table per concern: the
//! chain the account targets, the provider implementation and the signer
//! implementation. The chain table is fully typed here; the provider and
//! signer tables stay opaque and are validated by the implementation each
//! factory builds.

use account_types::{felt_from_short_string, EncodingError, Felt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs when reading the configuration file.
	#[error("Failed to read config file: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML content.
	#[error("Failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
	/// Error that occurs when a configuration value is invalid.
	#[error("Invalid config: {0}")]
	Validation(String),
}

/// Chain parameters shared by every transaction the account builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
	/// Chain identifier as a short string, e.g. "SN_SEPOLIA".
	pub chain_id: String,
	/// Transaction version used for invoke transactions.
	#[serde(default)]
	pub transaction_version: u64,
	/// Whether execute() may submit transactions with a zero max fee.
	///
	/// Useful against devnets that do not charge fees. Defaults to true.
	#[serde(default = "default_allow_zero_max_fee")]
	pub allow_zero_max_fee: bool,
}

fn default_allow_zero_max_fee() -> bool {
	true
}

impl ChainConfig {
	/// Encodes the chain identifier as a field element.
	pub fn chain_id_felt(&self) -> Result<Felt, EncodingError> {
		felt_from_short_string(&self.chain_id)
	}
}

/// Top-level configuration for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	/// Chain parameters.
	pub chain: ChainConfig,
	/// Provider implementation configuration, validated by the provider.
	pub provider: toml::Value,
	/// Signer implementation configuration, validated by the signer.
	pub signer: toml::Value,
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml(&content)
	}

	/// Parses configuration from a TOML string.
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks structural constraints the type system cannot express.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.chain.chain_id.is_empty() {
			return Err(ConfigError::Validation(
				"chain.chain_id must not be empty".to_string(),
			));
		}
		self.chain
			.chain_id_felt()
			.map_err(|e| ConfigError::Validation(format!("chain.chain_id: {}", e)))?;

		if !self.provider.is_table() {
			return Err(ConfigError::Validation(
				"provider must be a table".to_string(),
			));
		}
		if !self.signer.is_table() {
			return Err(ConfigError::Validation("signer must be a table".to_string()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VALID_CONFIG: &str = r#"
		[chain]
		chain_id = "SN_SEPOLIA"
		transaction_version = 0

		[provider]
		url = "http://localhost:5050/rpc"

		[signer]
		private_key = "0x1234"
	"#;

	#[test]
	fn test_parse_valid_config() {
		let config = Config::from_toml(VALID_CONFIG).unwrap();
		assert_eq!(config.chain.chain_id, "SN_SEPOLIA");
		assert_eq!(config.chain.transaction_version, 0);
		assert!(config.chain.allow_zero_max_fee);
		assert_eq!(
			config.provider.get("url").and_then(|v| v.as_str()),
			Some("http://localhost:5050/rpc")
		);
	}

	#[test]
	fn test_chain_id_felt_encoding() {
		let config = Config::from_toml(VALID_CONFIG).unwrap();
		let felt = config.chain.chain_id_felt().unwrap();
		// "SN_SEPOLIA" as big-endian ASCII bytes.
		assert_eq!(format!("{:#x}", felt), "0x534e5f5345504f4c4941");
	}

	#[test]
	fn test_allow_zero_max_fee_override() {
		let content = r#"
			[chain]
			chain_id = "SN_MAIN"
			allow_zero_max_fee = false

			[provider]
			url = "http://localhost:5050/rpc"

			[signer]
			private_key = "0x1"
		"#;
		let config = Config::from_toml(content).unwrap();
		assert!(!config.chain.allow_zero_max_fee);
	}

	#[test]
	fn test_empty_chain_id_rejected() {
		let content = r#"
			[chain]
			chain_id = ""

			[provider]
			url = "x"

			[signer]
			private_key = "0x1"
		"#;
		assert!(matches!(
			Config::from_toml(content),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_non_ascii_chain_id_rejected() {
		let content = r#"
			[chain]
			chain_id = "SN_SEPOLIA_WITH_A_VERY_LONG_NAME_OVER_31_BYTES"

			[provider]
			url = "x"

			[signer]
			private_key = "0x1"
		"#;
		assert!(matches!(
			Config::from_toml(content),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_missing_section_rejected() {
		let content = r#"
			[chain]
			chain_id = "SN_SEPOLIA"

			[signer]
			private_key = "0x1"
		"#;
		assert!(matches!(Config::from_toml(content), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_non_table_section_rejected() {
		let content = r#"
			[chain]
			chain_id = "SN_SEPOLIA"

			provider = "not a table"

			[signer]
			private_key = "0x1"
		"#;
		let result = Config::from_toml(content);
		assert!(result.is_err());
	}
}
