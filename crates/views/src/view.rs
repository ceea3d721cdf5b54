use std::fmt::Display;
use std::hash::Hash;

use crate::cycle::Cycle;
use crate::error::Result;
use crate::filter::{Filter, KeyFilter};
use crate::key::{Entry, Key};
use crate::pattern::{MatchTarget, Pattern};
use crate::window::BoundedWindow;

/// A restartable cursor-style traversal.
///
/// Views hold borrowed sources and cursor state only. The protocol is:
///
/// ```rust,ignore
/// while view.has_more() {
///     let item = view.current()?;
///     // use item
///     view.advance();
/// }
/// ```
pub trait View {
	/// What one step of the traversal produces.
	type Item;

	/// Returns true while [`current`](Self::current) has an item to return.
	fn has_more(&self) -> bool;

	/// Returns the item under the cursor.
	fn current(&self) -> Result<Self::Item>;

	/// Moves past the current item. A no-op once exhausted.
	fn advance(&mut self);

	/// Restarts the traversal from the beginning.
	fn rewind(&mut self);

	/// Converts the view into a std [`Iterator`] over its items.
	fn into_items(self) -> Items<Self>
	where
		Self: Sized,
	{
		Items { view: self }
	}

	/// Converts the view into an [`Iterator`] of `Result`s.
	///
	/// A failing [`current`](Self::current) is yielded once as `Err`, then
	/// iteration ends.
	fn try_items(self) -> TryItems<Self>
	where
		Self: Sized,
	{
		TryItems {
			view: self,
			failed: false,
		}
	}

	/// Restricts the view to `count` items after skipping `offset`.
	fn window(self, offset: usize, count: Option<usize>) -> BoundedWindow<Self>
	where
		Self: Sized,
	{
		BoundedWindow::new(self, offset, count)
	}

	/// Repeats the view once exhausted. See [`Cycle::new`].
	fn cycle(self) -> Result<Cycle<Self>>
	where
		Self: Sized,
	{
		Cycle::new(self)
	}

	/// Skips entries whose value or key is excluded. See [`Filter::new`].
	fn exclude<'s, T, K>(
		self,
		values: impl IntoIterator<Item = T>,
		keys: impl IntoIterator<Item = K>,
	) -> Filter<Self, T>
	where
		Self: Sized + View<Item = Entry<'s, T>>,
		T: Eq + Hash + 's,
		K: Into<Key>,
	{
		Filter::new(self, values, keys)
	}

	/// Skips entries whose key is excluded. See [`KeyFilter::new`].
	fn exclude_keys<'s, T, K>(self, keys: impl IntoIterator<Item = K>) -> KeyFilter<Self>
	where
		Self: Sized + View<Item = Entry<'s, T>>,
		T: 's,
		K: Into<Key>,
	{
		KeyFilter::new(self, keys)
	}

	/// Keeps entries whose rendered value or key matches `pattern`.
	fn matching<'s, T>(self, pattern: &str, target: MatchTarget) -> Result<Pattern<Self>>
	where
		Self: Sized + View<Item = Entry<'s, T>>,
		T: Display + 's,
	{
		Pattern::new(self, pattern, target)
	}
}

impl<V: View + ?Sized> View for &mut V {
	type Item = V::Item;

	fn has_more(&self) -> bool {
		(**self).has_more()
	}

	fn current(&self) -> Result<V::Item> {
		(**self).current()
	}

	fn advance(&mut self) {
		(**self).advance()
	}

	fn rewind(&mut self) {
		(**self).rewind()
	}
}

/// Iterator adapter returned by [`View::into_items`].
///
/// Meant for views that cannot fail while `has_more` holds, which is every
/// view in this crate. An error from `current` ends the iteration and is
/// lost; use [`View::try_items`] for views that may fail.
#[derive(Debug, Clone)]
pub struct Items<V> {
	view: V,
}

impl<V> Items<V> {
	/// Returns the wrapped view.
	pub fn into_inner(self) -> V {
		self.view
	}
}

impl<V: View> Iterator for Items<V> {
	type Item = V::Item;

	fn next(&mut self) -> Option<V::Item> {
		if !self.view.has_more() {
			return None;
		}
		let item = self.view.current().ok()?;
		self.view.advance();
		Some(item)
	}
}

/// Iterator adapter returned by [`View::try_items`].
#[derive(Debug, Clone)]
pub struct TryItems<V> {
	view: V,
	failed: bool,
}

impl<V: View> Iterator for TryItems<V> {
	type Item = Result<V::Item>;

	fn next(&mut self) -> Option<Result<V::Item>> {
		if self.failed || !self.view.has_more() {
			return None;
		}
		match self.view.current() {
			Ok(item) => {
				self.view.advance();
				Some(Ok(item))
			}
			Err(err) => {
				self.failed = true;
				Some(Err(err))
			}
		}
	}
}

/// Advances `inner` until its current item satisfies `accept` or it runs out.
pub(crate) fn seek<V: View>(inner: &mut V, mut accept: impl FnMut(&V::Item) -> bool) {
	while inner.has_more() {
		match inner.current() {
			Ok(item) if accept(&item) => return,
			Ok(_) => inner.advance(),
			// Leave the cursor in place so `current()` reports the failure.
			Err(_) => return,
		}
	}
}
