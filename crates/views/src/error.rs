use thiserror::Error;

/// Errors raised while building or driving a view.
#[derive(Error, Debug)]
pub enum ViewError {
	/// `current()` was called on a cursor that has run past its last entry.
	#[error("position {position} is out of range for a sequence of {len} entries")]
	OutOfRange {
		/// Cursor position at the time of the call.
		position: usize,
		/// Number of entries in the sequence.
		len: usize,
	},
	/// A cycle was built over a source that yields nothing.
	#[error("cannot cycle over an empty source")]
	Empty,
	/// The pattern expression did not compile.
	#[error("invalid pattern {pattern:?}: {source}")]
	InvalidPattern {
		/// The rejected expression.
		pattern: String,
		/// Parser diagnostics.
		#[source]
		source: regex::Error,
	},
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
