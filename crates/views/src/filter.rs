use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::key::{Entry, Key};
use crate::view::{View, seek};

/// Skips entries whose value or key appears in an exclusion set.
///
/// An entry is rejected if its value is in `values`, or if `keys` is
/// non-empty and contains its key. With both sets empty every entry passes.
///
/// Filtering a [`Cycle`](crate::Cycle) that excludes every entry never
/// settles; build the cycle over the filter instead.
#[derive(Debug, Clone)]
pub struct Filter<V, T> {
	inner: V,
	values: FxHashSet<T>,
	keys: FxHashSet<Key>,
}

impl<'s, V, T> Filter<V, T>
where
	V: View<Item = Entry<'s, T>>,
	T: Eq + Hash + 's,
{
	/// Builds the filter and moves `inner` onto its first accepted entry.
	///
	/// Exclusions are normalized into sets; pass `[x]` or `Some(x)` for a
	/// single value and `None` or `[]` for none.
	pub fn new<K: Into<Key>>(
		inner: V,
		values: impl IntoIterator<Item = T>,
		keys: impl IntoIterator<Item = K>,
	) -> Self {
		let mut filter = Self {
			inner,
			values: values.into_iter().collect(),
			keys: keys.into_iter().map(Into::into).collect(),
		};
		filter.settle();
		filter
	}

	/// Returns true if `entry` passes both exclusion sets.
	pub fn accepts(&self, entry: &Entry<'s, T>) -> bool {
		accepts(&self.values, &self.keys, entry)
	}

	fn settle(&mut self) {
		let (values, keys) = (&self.values, &self.keys);
		seek(&mut self.inner, |entry| accepts(values, keys, entry));
	}
}

fn accepts<T: Eq + Hash>(
	values: &FxHashSet<T>,
	keys: &FxHashSet<Key>,
	entry: &Entry<'_, T>,
) -> bool {
	if values.contains(entry.value) {
		return false;
	}
	keys.is_empty() || !keys.contains(entry.key)
}

/// Skips entries whose key appears in an exclusion set.
///
/// Unlike [`Filter`] it never looks at values, so it works over sequences
/// of values that cannot be hashed (floats, for instance). An empty key set
/// accepts every entry.
#[derive(Debug, Clone)]
pub struct KeyFilter<V> {
	inner: V,
	keys: FxHashSet<Key>,
}

impl<'s, V, T> KeyFilter<V>
where
	V: View<Item = Entry<'s, T>>,
	T: 's,
{
	/// Builds the filter and moves `inner` onto its first accepted entry.
	pub fn new<K: Into<Key>>(inner: V, keys: impl IntoIterator<Item = K>) -> Self {
		let mut filter = Self {
			inner,
			keys: keys.into_iter().map(Into::into).collect(),
		};
		filter.settle();
		filter
	}

	fn settle(&mut self) {
		let keys = &self.keys;
		seek(&mut self.inner, |entry| !keys.contains(entry.key));
	}
}

impl<'s, V, T> View for KeyFilter<V>
where
	V: View<Item = Entry<'s, T>>,
	T: 's,
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

impl<'s, V, T> View for Filter<V, T>
where
	V: View<Item = Entry<'s, T>>,
	T: Eq + Hash + 's,
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
