use crate::error::{Result, ViewError};
use crate::view::View;

/// Exposes only the items of `inner` within `[offset, offset + count)`.
///
/// The offset is skipped eagerly at construction, so an offset past the end
/// of `inner` leaves an empty window. `count: None` runs to the end.
#[derive(Debug, Clone)]
pub struct BoundedWindow<V> {
	inner: V,
	offset: usize,
	count: Option<usize>,
	produced: usize,
}

impl<V: View> BoundedWindow<V> {
	pub fn new(mut inner: V, offset: usize, count: Option<usize>) -> Self {
		skip(&mut inner, offset);
		Self {
			inner,
			offset,
			count,
			produced: 0,
		}
	}

	/// Number of items skipped before the window opens.
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// Upper bound on yielded items, if any.
	pub fn count(&self) -> Option<usize> {
		self.count
	}

	/// Number of items yielded so far.
	pub fn produced(&self) -> usize {
		self.produced
	}

	/// Returns the wrapped view.
	pub fn into_inner(self) -> V {
		self.inner
	}

	fn budget_left(&self) -> bool {
		self.count.is_none_or(|count| self.produced < count)
	}
}

impl<V: View> View for BoundedWindow<V> {
	type Item = V::Item;

	fn has_more(&self) -> bool {
		self.budget_left() && self.inner.has_more()
	}

	fn current(&self) -> Result<V::Item> {
		match self.count {
			Some(count) if self.produced >= count => Err(ViewError::OutOfRange {
				position: self.offset + self.produced,
				len: self.offset + count,
			}),
			_ => self.inner.current(),
		}
	}

	fn advance(&mut self) {
		if self.has_more() {
			self.inner.advance();
			self.produced += 1;
		}
	}

	fn rewind(&mut self) {
		self.inner.rewind();
		skip(&mut self.inner, self.offset);
		self.produced = 0;
	}
}

fn skip<V: View>(inner: &mut V, n: usize) {
	for _ in 0..n {
		if !inner.has_more() {
			break;
		}
		inner.advance();
	}
}
