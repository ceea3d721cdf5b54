use crate::error::{Result, ViewError};
use crate::view::View;

/// Repeats `inner` indefinitely, rewinding it each time it runs out.
///
/// A cycle never terminates on its own; bound it with
/// [`BoundedWindow`](crate::BoundedWindow) before traversing.
#[derive(Debug, Clone)]
pub struct Cycle<V> {
	inner: V,
	laps: usize,
}

impl<V: View> Cycle<V> {
	/// Wraps `inner`, rewound to its start.
	///
	/// Fails with [`ViewError::Empty`] if `inner` has nothing to yield, since
	/// the cycle could never produce an item.
	pub fn new(mut inner: V) -> Result<Self> {
		inner.rewind();
		if !inner.has_more() {
			return Err(ViewError::Empty);
		}
		Ok(Self { inner, laps: 0 })
	}

	/// Number of completed passes over `inner`.
	pub fn laps(&self) -> usize {
		self.laps
	}
}

impl<V: View> View for Cycle<V> {
	type Item = V::Item;

	fn has_more(&self) -> bool {
		true
	}

	fn current(&self) -> Result<V::Item> {
		self.inner.current()
	}

	fn advance(&mut self) {
		self.inner.advance();
		if !self.inner.has_more() {
			self.inner.rewind();
			self.laps += 1;
		}
	}

	fn rewind(&mut self) {
		self.inner.rewind();
		self.laps = 0;
	}
}
