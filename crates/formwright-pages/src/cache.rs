//! Request-scoped key/value cache

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A type-erased cache entry.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

/// Key/value store that lives for one request/response cycle.
///
/// Implementations take `&self` so a context can hand out shared access
/// while components store snapshots into it.
pub trait Cache: Send + Sync {
	fn get_value(&self, key: &str) -> Option<CacheValue>;
	fn set_value(&self, key: &str, value: CacheValue);
}

impl<'c> dyn Cache + 'c {
	/// Typed read. Returns `None` when the key is missing or holds another type.
	///
	/// # Examples
	///
	/// ```
	/// use formwright_pages::{Cache, MemoryCache};
	///
	/// let cache = MemoryCache::new();
	/// let cache: &dyn Cache = &cache;
	/// cache.set("answer", 42u32);
	///
	/// assert_eq!(cache.get::<u32>("answer").as_deref(), Some(&42));
	/// assert!(cache.get::<String>("answer").is_none());
	/// ```
	pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
		self.get_value(key)?.downcast::<T>().ok()
	}

	/// Typed write, replacing any previous entry under `key`.
	pub fn set<T: Any + Send + Sync>(&self, key: &str, value: T) {
		self.set_value(key, Arc::new(value));
	}
}

/// In-memory [`Cache`] backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryCache {
	data: RwLock<HashMap<String, CacheValue>>,
}

impl MemoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.data.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.read().is_empty()
	}
}

impl Cache for MemoryCache {
	fn get_value(&self, key: &str) -> Option<CacheValue> {
		self.data.read().get(key).cloned()
	}

	fn set_value(&self, key: &str, value: CacheValue) {
		self.data.write().insert(key.to_string(), value);
	}
}

impl std::fmt::Debug for MemoryCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let data = self.data.read();
		let mut keys: Vec<&String> = data.keys().collect();
		keys.sort();
		f.debug_struct("MemoryCache").field("keys", &keys).finish()
	}
}
