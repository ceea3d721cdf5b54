use indexmap::IndexMap;

use crate::error::{Result, ViewError};
use crate::key::{Entry, Key};
use crate::view::View;

/// Ordered, keyed, in-memory collection.
///
/// Insertion order is preserved and significant. Keys are unique: inserting
/// an existing key overwrites its value in place without moving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T> {
	entries: IndexMap<Key, T>,
}

impl<T> Default for Sequence<T> {
	fn default() -> Self {
		Self {
			entries: IndexMap::new(),
		}
	}
}

impl<T> Sequence<T> {
	/// Creates an empty sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a sequence from values, keyed by position.
	pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
		Self {
			entries: values
				.into_iter()
				.enumerate()
				.map(|(i, v)| (Key::Index(i), v))
				.collect(),
		}
	}

	/// Builds a sequence from `(key, value)` pairs.
	///
	/// A repeated key keeps its first position and takes the last value.
	pub fn from_pairs<K: Into<Key>>(pairs: impl IntoIterator<Item = (K, T)>) -> Self {
		let mut seq = Self::new();
		for (key, value) in pairs {
			seq.insert(key, value);
		}
		seq
	}

	/// Inserts or overwrites an entry, returning the previous value.
	pub fn insert(&mut self, key: impl Into<Key>, value: T) -> Option<T> {
		self.entries.insert(key.into(), value)
	}

	/// Returns the number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the sequence holds no entries.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the entry at `index` in insertion order.
	pub fn get(&self, index: usize) -> Option<Entry<'_, T>> {
		self.entries
			.get_index(index)
			.map(|(key, value)| Entry::new(key, value))
	}

	/// Looks up a value by key.
	pub fn get_key(&self, key: &Key) -> Option<&T> {
		self.entries.get(key)
	}

	/// Returns the insertion position of `key`.
	pub fn position(&self, key: &Key) -> Option<usize> {
		self.entries.get_index_of(key)
	}

	/// Returns an iterator over all entries in order.
	pub fn iter(&self) -> impl Iterator<Item = Entry<'_, T>> + '_ {
		self.entries.iter().map(|(key, value)| Entry::new(key, value))
	}

	/// Returns an iterator over keys in order.
	pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
		self.entries.keys()
	}

	/// Returns an iterator over values in order.
	pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
		self.entries.values()
	}

	/// Returns a fresh cursor positioned on the first entry.
	pub fn cursor(&self) -> Cursor<'_, T> {
		Cursor { seq: self, pos: 0 }
	}
}

impl<T> From<Vec<T>> for Sequence<T> {
	fn from(values: Vec<T>) -> Self {
		Self::from_values(values)
	}
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
	fn from(values: [T; N]) -> Self {
		Self::from_values(values)
	}
}

impl<T> From<IndexMap<Key, T>> for Sequence<T> {
	fn from(entries: IndexMap<Key, T>) -> Self {
		Self { entries }
	}
}

impl<K: Into<Key>, T> FromIterator<(K, T)> for Sequence<T> {
	fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
		Self::from_pairs(iter)
	}
}

/// Read cursor over a [`Sequence`].
///
/// The cursor is the only mutable state of a traversal; the sequence itself
/// stays borrowed immutably for as long as the cursor lives.
#[derive(Debug)]
pub struct Cursor<'s, T> {
	seq: &'s Sequence<T>,
	pos: usize,
}

impl<T> Clone for Cursor<'_, T> {
	fn clone(&self) -> Self {
		Self {
			seq: self.seq,
			pos: self.pos,
		}
	}
}

impl<'s, T> Cursor<'s, T> {
	/// Current position, equal to `len()` once exhausted.
	#[inline]
	pub fn position(&self) -> usize {
		self.pos
	}

	/// The sequence being traversed.
	pub fn sequence(&self) -> &'s Sequence<T> {
		self.seq
	}
}

impl<'s, T> View for Cursor<'s, T> {
	type Item = Entry<'s, T>;

	fn has_more(&self) -> bool {
		self.pos < self.seq.len()
	}

	fn current(&self) -> Result<Entry<'s, T>> {
		self.seq.get(self.pos).ok_or(ViewError::OutOfRange {
			position: self.pos,
			len: self.seq.len(),
		})
	}

	fn advance(&mut self) {
		if self.pos < self.seq.len() {
			self.pos += 1;
		}
	}

	fn rewind(&mut self) {
		self.pos = 0;
	}
}
