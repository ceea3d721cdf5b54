use std::cell::Cell;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use weft_views::{Continuation, Keying, ViewError};

use super::*;

#[fixture]
fn registry() -> Registry<i32> {
	Registry::from_collections([
		("nums", Sequence::from(vec![1, 2, 3, 4, 5])),
		(
			"scores",
			Sequence::from_pairs([("alice", 90), ("bob", 72), ("carol", 90)]),
		),
		("empty", Sequence::new()),
	])
}

/// Runs `op` with a recording callback; returns the values and keys seen.
fn record<T: Clone>(
	op: impl FnOnce(&mut CallbackSet<'_, T>) -> Result<usize>,
) -> (Vec<(Key, T)>, Result<usize>) {
	let mut seen = Vec::new();
	let result = {
		let mut set = CallbackSet::new(|value: &T, key: Option<&Key>| {
			let key = key.cloned().ok_or_else(|| anyhow::anyhow!("missing key"))?;
			seen.push((key, value.clone()));
			Ok(())
		});
		op(&mut set)
	};
	(seen, result)
}

fn values<T: Clone>(seen: &[(Key, T)]) -> Vec<T> {
	seen.iter().map(|(_, v)| v.clone()).collect()
}

#[rstest]
fn test_register_replaces_and_returns_previous(mut registry: Registry<i32>) {
	let previous = registry.register("nums", vec![9]).unwrap();
	assert_eq!(previous.len(), 5);
	assert_eq!(registry.get("nums").unwrap().len(), 1);

	// Replacement keeps the zip position.
	assert_eq!(
		registry.names().collect::<Vec<_>>(),
		vec!["nums", "scores", "empty"]
	);
	assert!(registry.register("fresh", vec![1]).is_none());
	assert_eq!(registry.len(), 4);
}

#[rstest]
fn test_unregister(mut registry: Registry<i32>) {
	assert!(registry.unregister("scores").is_some());
	assert!(!registry.contains("scores"));
	assert!(registry.unregister("scores").is_none());
	assert_eq!(registry.names().collect::<Vec<_>>(), vec!["nums", "empty"]);
}

#[rstest]
#[case::window(0, Some(3), vec![1, 2, 3])]
#[case::middle(1, Some(2), vec![2, 3])]
#[case::to_end(3, None, vec![4, 5])]
#[case::past_end(7, Some(1), vec![])]
fn test_bounded_window(
	registry: Registry<i32>,
	#[case] offset: usize,
	#[case] count: Option<usize>,
	#[case] expected: Vec<i32>,
) {
	let (seen, result) = record(|cb| registry.bounded_window("nums", offset, count, cb));
	assert_eq!(result.unwrap(), expected.len());
	assert_eq!(values(&seen), expected);
}

#[rstest]
fn test_first_last_from(registry: Registry<i32>) {
	let (first, _) = record(|cb| registry.take_first("nums", 2, cb));
	assert_eq!(values(&first), vec![1, 2]);

	let (last, _) = record(|cb| registry.take_last("nums", 2, cb));
	assert_eq!(values(&last), vec![4, 5]);
	assert_eq!(last[0].0, Key::Index(3));

	let (all, _) = record(|cb| registry.take_last("nums", 50, cb));
	assert_eq!(values(&all), vec![1, 2, 3, 4, 5]);

	let (from, _) = record(|cb| registry.skip_to("nums", 4, cb));
	assert_eq!(values(&from), vec![5]);
}

#[rstest]
fn test_cycle_repeated(registry: Registry<i32>) {
	let (seen, result) = record(|cb| registry.cycle_repeated("scores", 2, cb));
	assert_eq!(result.unwrap(), 6);
	assert_eq!(values(&seen), vec![90, 72, 90, 90, 72, 90]);
	assert_eq!(seen[4].0, Key::from("bob"));
}

#[rstest]
fn test_cycle_rejects_zero_repeats_and_empty(registry: Registry<i32>) {
	let (seen, result) = record(|cb| registry.cycle_repeated("nums", 0, cb));
	assert!(matches!(result, Err(RegistryError::InvalidArgument(_))));
	assert!(seen.is_empty());

	let (seen, result) = record(|cb| registry.cycle_repeated("empty", 3, cb));
	assert!(matches!(result, Err(RegistryError::View(ViewError::Empty))));
	assert!(seen.is_empty());
}

#[rstest]
fn test_filters(registry: Registry<i32>) {
	let (seen, _) = record(|cb| registry.filter_by_value("scores", [90], cb));
	assert_eq!(seen, vec![(Key::from("bob"), 72)]);

	let (seen, _) = record(|cb| registry.filter_by_key("scores", ["alice", "carol"], cb));
	assert_eq!(values(&seen), vec![72]);

	let (seen, _) = record(|cb| registry.filter("nums", [5], [0usize], cb));
	assert_eq!(values(&seen), vec![2, 3, 4]);
}

#[test]
fn test_filter_by_key_on_float_values() {
	let mut registry = Registry::new();
	registry.register("temps", vec![1.5, 2.5, 3.5]);

	let (seen, result) = record(|cb| registry.filter_by_key("temps", [1usize], cb));
	assert_eq!(result.unwrap(), 2);
	assert_eq!(seen, vec![(Key::Index(0), 1.5), (Key::Index(2), 3.5)]);
}

#[rstest]
fn test_patterns(registry: Registry<i32>) {
	let (seen, _) = record(|cb| registry.match_pattern("scores", "^9", cb));
	assert_eq!(values(&seen), vec![90, 90]);

	let (seen, _) = record(|cb| registry.match_key_pattern("scores", "o", cb));
	assert_eq!(values(&seen), vec![72, 90]);

	let (seen, result) = record(|cb| registry.match_pattern("scores", "[", cb));
	assert!(matches!(
		result,
		Err(RegistryError::View(ViewError::InvalidPattern { .. }))
	));
	assert!(seen.is_empty());
}

#[rstest]
fn test_unknown_name(registry: Registry<i32>) {
	let (seen, result) = record(|cb| registry.take_first("missing", 1, cb));
	match result {
		Err(RegistryError::NotFound(name)) => assert_eq!(name, "missing"),
		other => panic!("unexpected result: {other:?}"),
	}
	assert!(seen.is_empty());
}

#[rstest]
fn test_callback_error_aborts_traversal(registry: Registry<i32>) {
	let calls = Cell::new(0);
	let mut set = CallbackSet::new(|value: &i32, _| {
		calls.set(calls.get() + 1);
		if *value == 3 {
			anyhow::bail!("stop at {value}");
		}
		Ok(())
	});

	let err = registry.take_first("nums", 5, &mut set).unwrap_err();
	assert!(matches!(err, RegistryError::Callback(_)));
	assert_eq!(err.to_string(), "stop at 3");
	assert_eq!(calls.get(), 3);
}

#[rstest]
fn test_extra_args_reach_callbacks(registry: Registry<i32>) {
	let total = Cell::new(0);
	let mut set = CallbackSet::with_args(10, |value: &i32, _, scale: &i32| {
		total.set(total.get() + value * scale);
		Ok(())
	});
	registry.take_first("nums", 2, &mut set).unwrap();
	assert_eq!(total.get(), 30);
}

#[rstest]
#[case::below(4, Ok(3))]
#[case::exact(3, Ok(3))]
#[case::above(2, Err(2))]
fn test_step_limit_boundary(
	#[case] limit: usize,
	#[case] expected: std::result::Result<usize, usize>,
) {
	let mut registry = Registry::with_config(RegistryConfig::default().with_step_limit(limit));
	registry.register("nums", vec![1, 2, 3]);

	let (seen, result) = record(|cb| registry.take_first("nums", 3, cb));
	match (result, expected) {
		(Ok(produced), Ok(want)) => assert_eq!(produced, want),
		(Err(RegistryError::StepLimit { limit: hit }), Err(dispatched)) => {
			assert_eq!(hit, limit);
			assert_eq!(seen.len(), dispatched);
		}
		(other, _) => panic!("unexpected result: {other:?}"),
	}
}

#[test]
fn test_step_limit() {
	let config = RegistryConfig::default().with_step_limit(4);
	let mut registry = Registry::with_config(config);
	registry.register("nums", vec![1, 2, 3]);

	let (seen, result) = record(|cb| registry.cycle_repeated("nums", 1, cb));
	assert_eq!(result.unwrap(), 3);
	assert_eq!(seen.len(), 3);

	let (seen, result) = record(|cb| registry.cycle_repeated("nums", 2, cb));
	assert!(matches!(result, Err(RegistryError::StepLimit { limit: 4 })));
	assert_eq!(values(&seen), vec![1, 2, 3, 1]);
}

#[rstest]
fn test_zip_all_keys_by_name(registry: Registry<i32>) {
	let mut steps = Vec::new();
	let produced = {
		let mut set = CallbackSet::new(|item: &Zipped<'_, i32>, key: Option<&Key>| {
			steps.push((
				key.cloned(),
				item.get_by_name("nums").copied(),
				item.get_by_name("scores").copied(),
				item.absent(),
			));
			Ok(())
		});
		registry.zip_all(&mut set).unwrap()
	};

	assert_eq!(produced, 5);
	assert_eq!(steps[0], (Some(Key::Index(0)), Some(1), Some(90), 1));
	assert_eq!(steps[2], (Some(Key::Index(2)), Some(3), Some(90), 1));
	assert_eq!(steps[3], (Some(Key::Index(3)), Some(4), None, 2));
}

#[rstest]
fn test_zip_subset_with_policy(registry: Registry<i32>) {
	let mut widths = Vec::new();
	let produced = {
		let mut set = CallbackSet::new(|item: &Zipped<'_, i32>, _| {
			widths.push((
				item.get(&Key::Index(0)).copied(),
				item.get(&Key::Index(1)).copied(),
			));
			Ok(())
		});
		let policy = ZipPolicy::new(Continuation::All, Keying::ByPosition);
		registry.zip(["scores", "nums"], policy, &mut set).unwrap()
	};

	assert_eq!(produced, 3);
	assert_eq!(
		widths,
		vec![(Some(90), Some(1)), (Some(72), Some(2)), (Some(90), Some(3))]
	);
}

#[rstest]
fn test_zip_rejects_unknown_and_duplicate_names(registry: Registry<i32>) {
	let calls = Cell::new(0);
	let mut set: CallbackSet<'_, Zipped<'_, i32>> = CallbackSet::new(|_, _| {
		calls.set(calls.get() + 1);
		Ok(())
	});

	let err = registry
		.zip(["nums", "ghost"], ZipPolicy::default(), &mut set)
		.unwrap_err();
	assert!(matches!(err, RegistryError::NotFound(_)));

	let err = registry
		.zip(["nums", "nums"], ZipPolicy::default(), &mut set)
		.unwrap_err();
	assert!(matches!(err, RegistryError::InvalidArgument(_)));
	assert_eq!(calls.get(), 0);
}

#[test]
fn test_zip_all_uses_configured_policy() {
	let config = RegistryConfig::default()
		.with_zip(ZipPolicy::new(Continuation::All, Keying::ByName));
	let mut registry = Registry::with_config(config);
	registry.register("a", vec!['x', 'y', 'z']);
	registry.register("b", vec!['q']);

	let calls = Cell::new(0);
	let mut set: CallbackSet<'_, Zipped<'_, char>> = CallbackSet::new(|_, _| {
		calls.set(calls.get() + 1);
		Ok(())
	});
	assert_eq!(registry.zip_all(&mut set).unwrap(), 1);
	assert_eq!(calls.get(), 1);
}
