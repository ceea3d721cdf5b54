use std::fmt;

/// Key of a sequence entry.
///
/// Keys are either positional indices (assigned when a plain list is
/// registered) or string labels carried over from a keyed collection.
/// Comparison is strict: `Index(1)` and `Label("1")` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
	/// Positional key.
	Index(usize),
	/// Label key.
	Label(String),
}

impl Key {
	/// Returns the index if this is an `Index` key.
	pub fn as_index(&self) -> Option<usize> {
		match self {
			Key::Index(i) => Some(*i),
			Key::Label(_) => None,
		}
	}

	/// Returns the label if this is a `Label` key.
	pub fn as_label(&self) -> Option<&str> {
		match self {
			Key::Index(_) => None,
			Key::Label(s) => Some(s),
		}
	}

	/// Returns the kind name of this key.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Key::Index(_) => "index",
			Key::Label(_) => "label",
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Index(i) => write!(f, "{i}"),
			Key::Label(s) => f.write_str(s),
		}
	}
}

impl From<usize> for Key {
	fn from(v: usize) -> Self {
		Key::Index(v)
	}
}

impl From<String> for Key {
	fn from(v: String) -> Self {
		Key::Label(v)
	}
}

impl From<&str> for Key {
	fn from(v: &str) -> Self {
		Key::Label(v.to_string())
	}
}

impl From<&Key> for Key {
	fn from(v: &Key) -> Self {
		v.clone()
	}
}

/// A borrowed `(key, value)` pair produced by a traversal.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Entry<'s, T> {
	/// Key of the entry in its source sequence.
	pub key: &'s Key,
	/// Stored value.
	pub value: &'s T,
}

impl<'s, T> Entry<'s, T> {
	pub fn new(key: &'s Key, value: &'s T) -> Self {
		Self { key, value }
	}
}

// Manual impls: deriving would require `T: Clone`.
impl<T> Clone for Entry<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Entry<'_, T> {}
