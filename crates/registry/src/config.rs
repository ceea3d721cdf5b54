//! Registry configuration.
//!
//! Configuration is written in TOML:
//!
//! ```toml
//! # Abort any single operation that would produce more elements.
//! step-limit = 10000
//!
//! # Policy used by `Registry::zip_all`.
//! [zip]
//! continuation = "any"   # or "all"
//! keying = "by-name"     # or "by-position"
//! ```
//!
//! Every field is optional; an empty document yields [`RegistryConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use weft_views::ZipPolicy;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A field parsed but holds an unusable value.
	#[error("invalid value: {0}")]
	InvalidValue(String),
}

/// Tunables shared by every operation of a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
	/// Maximum number of elements one operation may produce.
	pub step_limit: Option<usize>,
	/// Completion policy of `zip_all`.
	pub zip: ZipPolicy,
}

impl RegistryConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Sets the step limit.
	pub fn with_step_limit(mut self, limit: usize) -> Self {
		self.step_limit = Some(limit);
		self
	}

	/// Sets the `zip_all` policy.
	pub fn with_zip(mut self, zip: ZipPolicy) -> Self {
		self.zip = zip;
		self
	}

	/// Rejects values no traversal could satisfy.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.step_limit == Some(0) {
			return Err(ConfigError::InvalidValue(
				"step-limit must be at least 1".to_string(),
			));
		}
		Ok(())
	}
}
