//! Keyed sequences and the views that traverse them.
//!
//! A [`Sequence`] is an ordered, keyed, in-memory collection. Traversal goes
//! through a [`View`]: a restartable cursor exposing `has_more`, `current`,
//! `advance` and `rewind`. Views borrow their sources and compose:
//!
//! - [`BoundedWindow`]: items in `[offset, offset + count)`
//! - [`Cycle`]: repeats its source forever (bound it with a window)
//! - [`Filter`]: drops entries by excluded value or key
//! - [`KeyFilter`]: drops entries by excluded key only
//! - [`Pattern`]: keeps entries whose value or key text matches a regex
//! - [`MultiZip`]: walks named sources in lockstep
//!
//! ```rust,ignore
//! let seq = Sequence::from(vec![1, 2, 3]);
//! let twice: Vec<_> = seq
//!     .cursor()
//!     .cycle()?
//!     .window(0, Some(2 * seq.len()))
//!     .into_items()
//!     .map(|entry| *entry.value)
//!     .collect();
//! assert_eq!(twice, [1, 2, 3, 1, 2, 3]);
//! ```

/// Cyclic repetition.
pub mod cycle;
/// View error taxonomy.
pub mod error;
/// Exclusion filtering.
pub mod filter;
/// Entry keys and borrowed entries.
pub mod key;
/// Regex matching.
pub mod pattern;
/// Ordered keyed storage and its cursor.
pub mod sequence;
/// The view capability.
pub mod view;
/// Offset/count windows.
pub mod window;
/// Multi-source lockstep traversal.
pub mod zip;

pub use cycle::Cycle;
pub use error::{Result, ViewError};
pub use filter::{Filter, KeyFilter};
pub use key::{Entry, Key};
pub use pattern::{MatchTarget, Pattern};
pub use sequence::{Cursor, Sequence};
pub use view::{Items, TryItems, View};
pub use window::BoundedWindow;
pub use zip::{Continuation, Keying, MultiZip, ZipPolicy, Zipped};
