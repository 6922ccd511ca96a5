//! Property-based tests for PathedMap
//!
//! Uses proptest to verify:
//! 1. A value set at a path is read back from that path
//! 2. Paths never set are absent
//! 3. Sibling paths under a shared level do not clobber each other

use formwright_forms::PathedMap;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
	"[A-Za-z][A-Za-z0-9_]{0,6}"
}

fn path() -> impl Strategy<Value = String> {
	prop::collection::vec(segment(), 1..4).prop_map(|segments| segments.join("."))
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	/// Property: set then get returns the stored value
	#[test]
	fn test_set_then_get(path in path(), value in ".*") {
		let mut map = PathedMap::new();

		map.set(&path, value.clone());

		prop_assert_eq!(map.get(&path), Some(&value));
		prop_assert!(map.contains(&path));
	}

	/// Property: a path that was never set is absent
	#[test]
	fn test_unset_path_is_absent(set in path(), other in path()) {
		prop_assume!(set != other);
		let mut map = PathedMap::new();

		map.set(&set, 1u32);

		prop_assert_eq!(map.get(&other), None);
	}

	/// Property: siblings sharing a parent level both survive
	#[test]
	fn test_siblings_do_not_clobber(
		parent in path(),
		left in segment(),
		right in segment(),
		a in any::<i64>(),
		b in any::<i64>(),
	) {
		prop_assume!(left != right);
		let left_path = format!("{}.{}", parent, left);
		let right_path = format!("{}.{}", parent, right);
		let mut map = PathedMap::new();

		map.set(&left_path, a);
		map.set(&right_path, b);

		prop_assert_eq!(map.get(&left_path), Some(&a));
		prop_assert_eq!(map.get(&right_path), Some(&b));
		prop_assert_eq!(map.len(), 2);
		prop_assert!(map.get(&parent).is_none());
	}
}
