use std::fmt::Display;

use regex::Regex;

use crate::error::{Result, ViewError};
use crate::key::Entry;
use crate::view::{View, seek};

/// Which side of an entry a [`Pattern`] view matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchTarget {
	/// Match the value's `Display` text.
	#[default]
	Value,
	/// Match the key's text.
	Key,
}

/// Keeps only entries whose text contains a match for a regular expression.
///
/// Matching is a search, not a full match: `"b"` accepts `"abc"`.
#[derive(Debug, Clone)]
pub struct Pattern<V> {
	inner: V,
	regex: Regex,
	target: MatchTarget,
}

impl<'s, V, T> Pattern<V>
where
	V: View<Item = Entry<'s, T>>,
	T: Display + 's,
{
	/// Compiles `pattern` and moves `inner` onto its first matching entry.
	///
	/// An unparseable pattern fails here with [`ViewError::InvalidPattern`].
	pub fn new(inner: V, pattern: &str, target: MatchTarget) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| ViewError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		})?;
		let mut view = Self {
			inner,
			regex,
			target,
		};
		view.settle();
		Ok(view)
	}

	/// The compiled expression.
	pub fn regex(&self) -> &Regex {
		&self.regex
	}

	/// Returns true if `entry` matches.
	pub fn accepts(&self, entry: &Entry<'s, T>) -> bool {
		matches(&self.regex, self.target, entry)
	}

	fn settle(&mut self) {
		let (regex, target) = (&self.regex, self.target);
		seek(&mut self.inner, |entry| matches(regex, target, entry));
	}
}

fn matches<T: Display>(regex: &Regex, target: MatchTarget, entry: &Entry<'_, T>) -> bool {
	let text = match target {
		MatchTarget::Value => entry.value.to_string(),
		MatchTarget::Key => entry.key.to_string(),
	};
	regex.is_match(&text)
}

impl<'s, V, T> View for Pattern<V>
where
	V: View<Item = Entry<'s, T>>,
	T: Display + 's,
{
	type Item = Entry<'s, T>;

	fn has_more(&self) -> bool {
		self.inner.has_more()
	}

	fn current(&self) -> Result<Entry<'s, T>> {
		self.inner.current()
	}

	fn advance(&mut self) {
		self.inner.advance();
		self.settle();
	}

	fn rewind(&mut self) {
		self.inner.rewind();
		self.settle();
	}
}
