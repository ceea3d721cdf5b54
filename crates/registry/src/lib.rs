//! Registry of named sequences with callback dispatch.
//!
//! Register ordered collections under names, then run an operation that
//! builds a view over one or more of them and hands every produced element
//! to a [`CallbackSet`]:
//!
//! ```rust,ignore
//! let mut registry = Registry::new();
//! registry.register("nums", vec![1, 2, 3, 4, 5]);
//!
//! let mut total = 0;
//! let mut set = CallbackSet::new(|value: &i32, _key| {
//!     total += value;
//!     Ok(())
//! });
//! registry.take_first("nums", 3, &mut set)?;
//! ```
//!
//! Operations: [`bounded_window`](Registry::bounded_window) and its
//! `take_first`/`take_last`/`skip_to` shorthands,
//! [`cycle_repeated`](Registry::cycle_repeated),
//! [`filter_by_value`](Registry::filter_by_value),
//! [`filter_by_key`](Registry::filter_by_key),
//! [`match_pattern`](Registry::match_pattern) and
//! [`zip_all`](Registry::zip_all).
//!
//! Logging goes through `tracing`; install a subscriber to see registration
//! events and per-operation spans.

pub mod callback;
pub mod config;
pub mod error;
mod registry;

pub use callback::{Callback, CallbackSet};
pub use config::{ConfigError, RegistryConfig};
pub use error::{RegistryError, Result};
pub use registry::Registry;
pub use weft_views as views;
pub use weft_views::{Continuation, Key, Keying, Sequence, ZipPolicy, Zipped};
