use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::key::{Entry, Key};
use crate::view::View;

/// When a multi-source traversal stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Continuation {
	/// Continue while at least one source has entries.
	#[default]
	Any,
	/// Continue only while every source has entries.
	All,
}

/// How the slots of a [`Zipped`] item are keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Keying {
	/// `Key::Label(source name)`.
	#[default]
	ByName,
	/// `Key::Index(source position)`.
	ByPosition,
}

/// Completion policy of a [`MultiZip`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipPolicy {
	pub continuation: Continuation,
	pub keying: Keying,
}

impl ZipPolicy {
	pub fn new(continuation: Continuation, keying: Keying) -> Self {
		Self {
			continuation,
			keying,
		}
	}
}

/// One step of a [`MultiZip`]: the current entry of every source that still
/// had one, in source order.
///
/// Exhausted sources have no slot.
#[derive(Debug)]
pub struct Zipped<'s, T> {
	step: usize,
	width: usize,
	slots: IndexMap<Key, Entry<'s, T>>,
}

impl<T> Clone for Zipped<'_, T> {
	fn clone(&self) -> Self {
		Self {
			step: self.step,
			width: self.width,
			slots: self.slots.clone(),
		}
	}
}

impl<'s, T> Zipped<'s, T> {
	/// Zero-based index of this step.
	pub fn step(&self) -> usize {
		self.step
	}

	/// Number of zipped sources.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Number of sources present in this step.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Number of exhausted sources in this step.
	pub fn absent(&self) -> usize {
		self.width - self.slots.len()
	}

	/// Returns the value of the slot keyed by `key`.
	pub fn get(&self, key: &Key) -> Option<&'s T> {
		self.slots.get(key).map(|entry| entry.value)
	}

	/// Returns the value contributed by the source named `name`.
	///
	/// Only meaningful under [`Keying::ByName`].
	pub fn get_by_name(&self, name: &str) -> Option<&'s T> {
		self.get(&Key::from(name))
	}

	/// Returns the full source entry (original key and value) of a slot.
	pub fn entry(&self, key: &Key) -> Option<Entry<'s, T>> {
		self.slots.get(key).copied()
	}

	/// Iterates over present slots in source order.
	pub fn iter(&self) -> impl Iterator<Item = (&Key, Entry<'s, T>)> + '_ {
		self.slots.iter().map(|(key, entry)| (key, *entry))
	}
}

/// Walks several named sources in lockstep.
#[derive(Debug, Clone)]
pub struct MultiZip<'s, V> {
	sources: Vec<(&'s str, V)>,
	policy: ZipPolicy,
	step: usize,
}

impl<'s, V: View> MultiZip<'s, V> {
	/// Builds the zip; every source is rewound to its start.
	pub fn new(sources: impl IntoIterator<Item = (&'s str, V)>, policy: ZipPolicy) -> Self {
		let sources = sources
			.into_iter()
			.map(|(name, mut view)| {
				view.rewind();
				(name, view)
			})
			.collect();
		Self {
			sources,
			policy,
			step: 0,
		}
	}

	/// Number of sources.
	pub fn width(&self) -> usize {
		self.sources.len()
	}

	/// The completion policy.
	pub fn policy(&self) -> ZipPolicy {
		self.policy
	}

	/// Source names in order.
	pub fn names(&self) -> impl Iterator<Item = &'s str> + '_ {
		self.sources.iter().map(|(name, _)| *name)
	}

	fn slot_key(&self, position: usize, name: &str) -> Key {
		match self.policy.keying {
			Keying::ByName => Key::from(name),
			Keying::ByPosition => Key::Index(position),
		}
	}
}

impl<'s, V, T> View for MultiZip<'s, V>
where
	V: View<Item = Entry<'s, T>>,
	T: 's,
{
	type Item = Zipped<'s, T>;

	fn has_more(&self) -> bool {
		match self.policy.continuation {
			Continuation::Any => self.sources.iter().any(|(_, v)| v.has_more()),
			Continuation::All => {
				!self.sources.is_empty() && self.sources.iter().all(|(_, v)| v.has_more())
			}
		}
	}

	fn current(&self) -> Result<Zipped<'s, T>> {
		if !self.has_more() {
			return Err(ViewError::OutOfRange {
				position: self.step,
				len: self.step,
			});
		}
		let mut slots = IndexMap::with_capacity(self.sources.len());
		for (position, (name, view)) in self.sources.iter().enumerate() {
			if view.has_more() {
				slots.insert(self.slot_key(position, name), view.current()?);
			}
		}
		Ok(Zipped {
			step: self.step,
			width: self.sources.len(),
			slots,
		})
	}

	fn advance(&mut self) {
		if !self.has_more() {
			return;
		}
		for (_, view) in &mut self.sources {
			if view.has_more() {
				view.advance();
			}
		}
		self.step += 1;
	}

	fn rewind(&mut self) {
		for (_, view) in &mut self.sources {
			view.rewind();
		}
		self.step = 0;
	}
}
