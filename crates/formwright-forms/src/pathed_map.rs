//! Nested string-keyed map addressed by dot-separated paths
//!
//! Used for the per-request snapshots a binding produces: the raw submitted
//! strings and the validation messages, both keyed by field path.
//!
//! ```
//! use formwright_forms::PathedMap;
//!
//! let mut errors = PathedMap::new();
//! errors.set("Sub.SubField", "required".to_string());
//! errors.set("Sub.Other", "too short".to_string());
//!
//! assert_eq!(errors.get("Sub.SubField").map(String::as_str), Some("required"));
//! assert!(errors.get("Sub").is_none());
//! assert_eq!(errors.len(), 2);
//! ```

use serde::Serialize;
use std::collections::HashMap;

/// Path segment separator.
pub const PATH_SEPARATOR: char = '.';

/// One level entry: a leaf value or a deeper level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathedEntry<V> {
	Value(V),
	Nested(PathedMap<V>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathedMap<V> {
	entries: HashMap<String, PathedEntry<V>>,
}

impl<V> Default for PathedMap<V> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}
}

impl<V> PathedMap<V> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `value` at `path`, creating intermediate levels as needed.
	///
	/// A leaf sitting where an intermediate level is needed is replaced by
	/// that level. Setting a path that currently holds a level replaces the
	/// whole level with the leaf.
	pub fn set(&mut self, path: &str, value: V) {
		match path.split_once(PATH_SEPARATOR) {
			None => {
				self.entries
					.insert(path.to_string(), PathedEntry::Value(value));
			}
			Some((head, rest)) => {
				let entry = self
					.entries
					.entry(head.to_string())
					.or_insert_with(|| PathedEntry::Nested(PathedMap::new()));
				if let PathedEntry::Value(_) = entry {
					*entry = PathedEntry::Nested(PathedMap::new());
				}
				if let PathedEntry::Nested(level) = entry {
					level.set(rest, value);
				}
			}
		}
	}

	/// Leaf value at `path`. Paths naming a level, or nothing, give `None`.
	pub fn get(&self, path: &str) -> Option<&V> {
		match path.split_once(PATH_SEPARATOR) {
			None => match self.entries.get(path)? {
				PathedEntry::Value(v) => Some(v),
				PathedEntry::Nested(_) => None,
			},
			Some((head, rest)) => match self.entries.get(head)? {
				PathedEntry::Nested(level) => level.get(rest),
				PathedEntry::Value(_) => None,
			},
		}
	}

	pub fn contains(&self, path: &str) -> bool {
		self.get(path).is_some()
	}

	/// Direct access to the level stored under one segment.
	pub fn level(&self, segment: &str) -> Option<&PathedMap<V>> {
		match self.entries.get(segment)? {
			PathedEntry::Nested(level) => Some(level),
			PathedEntry::Value(_) => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Number of leaves across all levels.
	pub fn len(&self) -> usize {
		self.entries
			.values()
			.map(|entry| match entry {
				PathedEntry::Value(_) => 1,
				PathedEntry::Nested(level) => level.len(),
			})
			.sum()
	}

	/// All leaves with their full paths, sorted by path.
	pub fn leaves(&self) -> Vec<(String, &V)> {
		let mut out = Vec::new();
		self.collect_leaves("", &mut out);
		out.sort_by(|a, b| a.0.cmp(&b.0));
		out
	}

	fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a V)>) {
		for (key, entry) in &self.entries {
			let path = if prefix.is_empty() {
				key.clone()
			} else {
				format!("{}{}{}", prefix, PATH_SEPARATOR, key)
			};
			match entry {
				PathedEntry::Value(v) => out.push((path, v)),
				PathedEntry::Nested(level) => level.collect_leaves(&path, out),
			}
		}
	}
}

impl<V, K: AsRef<str>> FromIterator<(K, V)> for PathedMap<V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = PathedMap::new();
		for (path, value) in iter {
			map.set(path.as_ref(), value);
		}
		map
	}
}
