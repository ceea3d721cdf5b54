use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, trace, trace_span, warn};
use weft_views::{
	BoundedWindow, Cursor, Cycle, Entry, Filter, Key, KeyFilter, MatchTarget, MultiZip, Pattern,
	Sequence, View, ZipPolicy, Zipped,
};

use crate::callback::CallbackSet;
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};

/// Named sequences plus the operations that traverse them.
///
/// Every operation resolves its source names, builds the matching view,
/// then drives it to completion, dispatching each produced element to the
/// callback set. It returns the number of elements produced.
///
/// Operations borrow the registry immutably, so a sequence cannot be
/// replaced while a traversal over it is running.
#[derive(Debug, Clone)]
pub struct Registry<T> {
	sequences: IndexMap<String, Sequence<T>>,
	config: RegistryConfig,
}

impl<T> Default for Registry<T> {
	fn default() -> Self {
		Self {
			sequences: IndexMap::new(),
			config: RegistryConfig::default(),
		}
	}
}

impl<T> Registry<T> {
	/// Creates an empty registry with default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry with the given configuration.
	pub fn with_config(config: RegistryConfig) -> Self {
		Self {
			sequences: IndexMap::new(),
			config,
		}
	}

	/// Builds a registry from named collections, registered in order.
	pub fn from_collections<N, C>(collections: impl IntoIterator<Item = (N, C)>) -> Self
	where
		N: Into<String>,
		C: Into<Sequence<T>>,
	{
		let mut registry = Self::new();
		for (name, collection) in collections {
			registry.register(name, collection);
		}
		registry
	}

	/// The active configuration.
	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Registers `collection` under `name`.
	///
	/// An existing sequence with the same name is replaced in place (its zip
	/// position is kept) and returned.
	pub fn register(
		&mut self,
		name: impl Into<String>,
		collection: impl Into<Sequence<T>>,
	) -> Option<Sequence<T>> {
		let name = name.into();
		let sequence = collection.into();
		let len = sequence.len();
		match self.sequences.get_mut(&name) {
			Some(slot) => {
				let previous = std::mem::replace(slot, sequence);
				debug!(%name, len, previous_len = previous.len(), "replaced sequence");
				Some(previous)
			}
			None => {
				debug!(%name, len, "registered sequence");
				self.sequences.insert(name, sequence);
				None
			}
		}
	}

	/// Removes and returns the sequence registered under `name`.
	pub fn unregister(&mut self, name: &str) -> Option<Sequence<T>> {
		let removed = self.sequences.shift_remove(name);
		if removed.is_some() {
			debug!(name, "unregistered sequence");
		}
		removed
	}

	/// Returns the sequence registered under `name`.
	pub fn get(&self, name: &str) -> Option<&Sequence<T>> {
		self.sequences.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.sequences.contains_key(name)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.sequences.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.sequences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sequences.is_empty()
	}

	fn resolve(&self, name: &str) -> Result<&Sequence<T>> {
		self.sequences
			.get(name)
			.ok_or_else(|| RegistryError::NotFound(name.to_string()))
	}

	/// Dispatches the entries in `[offset, offset + count)` of `name`.
	///
	/// `count: None` runs to the end; an offset past the end produces nothing.
	pub fn bounded_window<A>(
		&self,
		name: &str,
		offset: usize,
		count: Option<usize>,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		let span = trace_span!("bounded_window", source = name, offset, count = ?count);
		let _guard = span.enter();

		let sequence = self.resolve(name)?;
		self.drive_entries(BoundedWindow::new(sequence.cursor(), offset, count), callbacks)
	}

	/// Dispatches the first `n` entries of `name`.
	pub fn take_first<A>(
		&self,
		name: &str,
		n: usize,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		self.bounded_window(name, 0, Some(n), callbacks)
	}

	/// Dispatches the last `n` entries of `name` (all of them if `n >= len`).
	pub fn take_last<A>(
		&self,
		name: &str,
		n: usize,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		let offset = self.resolve(name)?.len().saturating_sub(n);
		self.bounded_window(name, offset, None, callbacks)
	}

	/// Dispatches every entry of `name` from `offset` on.
	pub fn skip_to<A>(
		&self,
		name: &str,
		offset: usize,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		self.bounded_window(name, offset, None, callbacks)
	}

	/// Dispatches the whole of `name`, `repeats` times over.
	///
	/// Fails with `InvalidArgument` for zero repeats and with
	/// [`ViewError::Empty`](weft_views::ViewError::Empty) for an empty
	/// sequence, before any callback runs.
	pub fn cycle_repeated<A>(
		&self,
		name: &str,
		repeats: usize,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		let span = trace_span!("cycle_repeated", source = name, repeats);
		let _guard = span.enter();

		let sequence = self.resolve(name)?;
		if repeats == 0 {
			return Err(RegistryError::InvalidArgument(
				"repeat count must be at least 1".to_string(),
			));
		}
		let total = repeats.checked_mul(sequence.len()).ok_or_else(|| {
			RegistryError::InvalidArgument(format!(
				"{repeats} repeats of {} entries overflow",
				sequence.len()
			))
		})?;
		let cycle = Cycle::new(sequence.cursor())?;
		self.drive_entries(BoundedWindow::new(cycle, 0, Some(total)), callbacks)
	}

	/// Dispatches the entries of `name` whose key is not in `excluded`.
	///
	/// Values are never inspected, so this works for any value type.
	pub fn filter_by_key<A, K: Into<Key>>(
		&self,
		name: &str,
		excluded: impl IntoIterator<Item = K>,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		let span = trace_span!("filter_by_key", source = name);
		let _guard = span.enter();

		let sequence = self.resolve(name)?;
		self.drive_entries(KeyFilter::new(sequence.cursor(), excluded), callbacks)
	}

	/// Dispatches the entries of `name` whose value text contains a match for
	/// the regular expression `pattern`.
	///
	/// An invalid pattern fails before any callback runs.
	pub fn match_pattern<A>(
		&self,
		name: &str,
		pattern: &str,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize>
	where
		T: Display,
	{
		self.match_target(name, pattern, MatchTarget::Value, callbacks)
	}

	/// Like [`match_pattern`](Self::match_pattern), but matches key text.
	pub fn match_key_pattern<A>(
		&self,
		name: &str,
		pattern: &str,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize>
	where
		T: Display,
	{
		self.match_target(name, pattern, MatchTarget::Key, callbacks)
	}

	fn match_target<A>(
		&self,
		name: &str,
		pattern: &str,
		target: MatchTarget,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize>
	where
		T: Display,
	{
		let span = trace_span!("match_pattern", source = name, pattern, target = ?target);
		let _guard = span.enter();

		let sequence = self.resolve(name)?;
		let view = Pattern::new(sequence.cursor(), pattern, target)?;
		self.drive_entries(view, callbacks)
	}

	/// Zips every registered sequence, in registration order, using the
	/// configured policy (by default: continue while any source has entries,
	/// slots keyed by sequence name).
	///
	/// Callbacks receive the zipped item and `Key::Index(step)`.
	pub fn zip_all<'s, A>(
		&'s self,
		callbacks: &mut CallbackSet<'_, Zipped<'s, T>, A>,
	) -> Result<usize> {
		let span = trace_span!("zip_all", sources = self.sequences.len());
		let _guard = span.enter();

		let sources = self
			.sequences
			.iter()
			.map(|(name, sequence)| (name.as_str(), sequence.cursor()));
		self.drive_zip(MultiZip::new(sources, self.config.zip), callbacks)
	}

	/// Zips the named sequences with an explicit policy.
	///
	/// Every name must be registered and appear once.
	pub fn zip<'s, A, N: AsRef<str>>(
		&'s self,
		names: impl IntoIterator<Item = N>,
		policy: ZipPolicy,
		callbacks: &mut CallbackSet<'_, Zipped<'s, T>, A>,
	) -> Result<usize> {
		let mut sources: Vec<(&'s str, Cursor<'s, T>)> = Vec::new();
		for name in names {
			let name = name.as_ref();
			let (name, sequence) = self
				.sequences
				.get_key_value(name)
				.ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
			if sources.iter().any(|(seen, _)| *seen == name.as_str()) {
				return Err(RegistryError::InvalidArgument(format!(
					"sequence {name:?} zipped more than once"
				)));
			}
			sources.push((name.as_str(), sequence.cursor()));
		}

		let span = trace_span!("zip", sources = sources.len(), policy = ?policy);
		let _guard = span.enter();
		self.drive_zip(MultiZip::new(sources, policy), callbacks)
	}

	fn drive_entries<'s, V, A>(
		&self,
		view: V,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize>
	where
		V: View<Item = Entry<'s, T>>,
		T: 's,
	{
		self.drive(view, |entry| {
			trace!(key = %entry.key, "dispatch");
			callbacks.dispatch(entry.value, Some(entry.key))
		})
	}

	fn drive_zip<'s, A>(
		&self,
		view: MultiZip<'s, Cursor<'s, T>>,
		callbacks: &mut CallbackSet<'_, Zipped<'s, T>, A>,
	) -> Result<usize> {
		self.drive(view, |zipped| {
			let step = Key::Index(zipped.step());
			trace!(step = zipped.step(), present = zipped.len(), "dispatch");
			callbacks.dispatch(&zipped, Some(&step))
		})
	}

	fn drive<V: View>(
		&self,
		mut view: V,
		mut emit: impl FnMut(V::Item) -> anyhow::Result<()>,
	) -> Result<usize> {
		let mut produced = 0;
		while view.has_more() {
			if let Some(limit) = self.config.step_limit
				&& produced >= limit
			{
				warn!(limit, "traversal stopped at step limit");
				return Err(RegistryError::StepLimit { limit });
			}
			emit(view.current()?)?;
			view.advance();
			produced += 1;
		}
		trace!(produced, "traversal complete");
		Ok(produced)
	}
}

impl<T: Eq + Hash> Registry<T> {
	/// Dispatches the entries of `name` whose value is not in `excluded`.
	///
	/// For a single value pass `[value]`.
	pub fn filter_by_value<A>(
		&self,
		name: &str,
		excluded: impl IntoIterator<Item = T>,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		self.filter(name, excluded, Vec::<Key>::new(), callbacks)
	}

	/// Dispatches the entries of `name` passing both exclusion sets.
	pub fn filter<A, K: Into<Key>>(
		&self,
		name: &str,
		excluded_values: impl IntoIterator<Item = T>,
		excluded_keys: impl IntoIterator<Item = K>,
		callbacks: &mut CallbackSet<'_, T, A>,
	) -> Result<usize> {
		let span = trace_span!("filter", source = name);
		let _guard = span.enter();

		let sequence = self.resolve(name)?;
		let view = Filter::new(sequence.cursor(), excluded_values, excluded_keys);
		self.drive_entries(view, callbacks)
	}
}

impl<N, C, T> FromIterator<(N, C)> for Registry<T>
where
	N: Into<String>,
	C: Into<Sequence<T>>,
{
	fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
		Self::from_collections(iter)
	}
}

#[cfg(test)]
mod tests;
