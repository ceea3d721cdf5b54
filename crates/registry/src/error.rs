use thiserror::Error;
use weft_views::ViewError;

/// Errors returned by registry operations.
///
/// Resolution and construction failures are reported before any callback
/// runs. Failures raised mid-traversal leave the callbacks that already ran
/// for earlier elements in effect.
#[derive(Error, Debug)]
pub enum RegistryError {
	/// The operation named a sequence that is not registered.
	#[error("sequence not found: {0}")]
	NotFound(String),
	/// An argument was provided but invalid.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// The traversal would produce more elements than the configured limit.
	#[error("traversal exceeded the step limit of {limit}")]
	StepLimit {
		/// Configured maximum number of produced elements.
		limit: usize,
	},
	/// Building or driving a view failed.
	#[error(transparent)]
	View(#[from] ViewError),
	/// A callback returned an error; the traversal was abandoned.
	#[error(transparent)]
	Callback(#[from] anyhow::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
