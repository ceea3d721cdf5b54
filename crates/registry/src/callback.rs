use weft_views::Key;

use crate::error::{RegistryError, Result};

/// A boxed callback: `(item, key, extra_args)`.
pub type Callback<'c, I, A> =
	Box<dyn FnMut(&I, Option<&Key>, &A) -> anyhow::Result<()> + 'c>;

/// Ordered, non-empty list of callbacks plus a fixed extra-argument bundle.
///
/// Every produced element is dispatched to each callback exactly once, in
/// the order the callbacks were added. The first callback error stops the
/// dispatch and is returned to the operation's caller.
///
/// ```rust,ignore
/// let mut seen = Vec::new();
/// let mut set = CallbackSet::new(|value: &i32, _key| {
///     seen.push(*value);
///     Ok(())
/// });
/// registry.take_first("nums", 3, &mut set)?;
/// ```
pub struct CallbackSet<'c, I: ?Sized, A = ()> {
	callbacks: Vec<Callback<'c, I, A>>,
	args: A,
}

impl<'c, I: ?Sized> CallbackSet<'c, I> {
	/// Creates a set with one callback and no extra arguments.
	pub fn new(
		mut callback: impl FnMut(&I, Option<&Key>) -> anyhow::Result<()> + 'c,
	) -> Self {
		Self {
			callbacks: vec![Box::new(move |item: &I, key: Option<&Key>, _: &()| {
				callback(item, key)
			})],
			args: (),
		}
	}

	/// Appends a callback that ignores extra arguments.
	pub fn then(
		mut self,
		mut callback: impl FnMut(&I, Option<&Key>) -> anyhow::Result<()> + 'c,
	) -> Self {
		self.callbacks
			.push(Box::new(move |item: &I, key: Option<&Key>, _: &()| {
				callback(item, key)
			}));
		self
	}
}

impl<'c, I: ?Sized, A> CallbackSet<'c, I, A> {
	/// Creates a set with one callback receiving `args` on every call.
	pub fn with_args(
		args: A,
		callback: impl FnMut(&I, Option<&Key>, &A) -> anyhow::Result<()> + 'c,
	) -> Self {
		Self {
			callbacks: vec![Box::new(callback)],
			args,
		}
	}

	/// Builds a set from already boxed callbacks.
	///
	/// Fails with [`RegistryError::InvalidArgument`] if `callbacks` is empty.
	pub fn from_callbacks(callbacks: Vec<Callback<'c, I, A>>, args: A) -> Result<Self> {
		if callbacks.is_empty() {
			return Err(RegistryError::InvalidArgument(
				"a callback set needs at least one callback".to_string(),
			));
		}
		Ok(Self { callbacks, args })
	}

	/// Appends a callback receiving the extra arguments.
	pub fn then_with_args(
		mut self,
		callback: impl FnMut(&I, Option<&Key>, &A) -> anyhow::Result<()> + 'c,
	) -> Self {
		self.callbacks.push(Box::new(callback));
		self
	}

	/// The extra-argument bundle.
	pub fn args(&self) -> &A {
		&self.args
	}

	/// Number of callbacks (never zero).
	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}

	/// Invokes every callback once with `item`, in order.
	pub fn dispatch(&mut self, item: &I, key: Option<&Key>) -> anyhow::Result<()> {
		for callback in &mut self.callbacks {
			callback(item, key, &self.args)?;
		}
		Ok(())
	}
}

impl<I: ?Sized, A: std::fmt::Debug> std::fmt::Debug for CallbackSet<'_, I, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CallbackSet")
			.field("callbacks", &self.callbacks.len())
			.field("args", &self.args)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_each_callback_runs_once_in_order() {
		let log = RefCell::new(Vec::new());
		let mut set = CallbackSet::new(|v: &i32, _| {
			log.borrow_mut().push(format!("first:{v}"));
			Ok(())
		})
		.then(|v: &i32, _| {
			log.borrow_mut().push(format!("second:{v}"));
			Ok(())
		});

		set.dispatch(&1, None).unwrap();
		set.dispatch(&2, Some(&Key::Index(1))).unwrap();

		assert_eq!(
			*log.borrow(),
			vec!["first:1", "second:1", "first:2", "second:2"]
		);
	}

	#[test]
	fn test_args_are_passed_to_every_call() {
		let log = RefCell::new(Vec::new());
		let mut set = CallbackSet::with_args("ctx", |v: &i32, key, args| {
			log.borrow_mut().push(format!("{args}:{v}:{key:?}"));
			Ok(())
		})
		.then_with_args(|v: &i32, _, args| {
			log.borrow_mut().push(format!("{args}!{v}"));
			Ok(())
		});

		set.dispatch(&7, Some(&Key::from("k"))).unwrap();
		assert_eq!(*set.args(), "ctx");
		assert_eq!(
			*log.borrow(),
			vec![r#"ctx:7:Some(Label("k"))"#, "ctx!7"]
		);
	}

	#[test]
	fn test_error_stops_later_callbacks() {
		let ran_second = RefCell::new(false);
		let mut set =
			CallbackSet::new(|_: &i32, _| anyhow::bail!("boom")).then(|_: &i32, _| {
				*ran_second.borrow_mut() = true;
				Ok(())
			});

		let err = set.dispatch(&0, None).unwrap_err();
		assert_eq!(err.to_string(), "boom");
		assert!(!*ran_second.borrow());
	}

	#[test]
	fn test_empty_list_rejected() {
		let err = CallbackSet::<i32>::from_callbacks(Vec::new(), ()).unwrap_err();
		assert!(matches!(err, RegistryError::InvalidArgument(_)));
	}
}
