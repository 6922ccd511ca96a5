//! Per-request page context
//!
//! A context is the only state a form component sees while handling a
//! request. Every request gets its own [`RequestContext`] with an empty
//! cache, so snapshots written while processing a submission are visible
//! to the redisplay of that same request and to nothing else.

use crate::cache::{Cache, MemoryCache};
use std::collections::HashMap;
use uuid::Uuid;

/// Request-scoped services available to components.
pub trait PageContext: Send + Sync {
	/// Unique id of the request being handled.
	fn request_id(&self) -> Uuid;

	/// Cache that persists for the life of the request.
	fn request_cache(&self) -> &dyn Cache;

	/// Parameters that changed how the page was called, such as the query
	/// string. Multi-valued by key.
	fn context_data(&self) -> &HashMap<String, Vec<String>>;
}

/// Default [`PageContext`] built per incoming request.
#[derive(Debug)]
pub struct RequestContext {
	id: Uuid,
	cache: MemoryCache,
	query: HashMap<String, Vec<String>>,
}

impl RequestContext {
	/// Fresh context with a new request id and an empty cache.
	///
	/// # Examples
	///
	/// ```
	/// use formwright_pages::{PageContext, RequestContext};
	///
	/// let a = RequestContext::new();
	/// let b = RequestContext::new();
	/// assert_ne!(a.request_id(), b.request_id());
	/// assert!(a.request_cache().get_value("anything").is_none());
	/// ```
	pub fn new() -> Self {
		Self {
			id: Uuid::new_v4(),
			cache: MemoryCache::new(),
			query: HashMap::new(),
		}
	}

	/// Attach query parameters decoded from a url-encoded query string.
	///
	/// Malformed input is logged and leaves the parameters empty.
	pub fn with_query(mut self, query: &str) -> Self {
		match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => {
				for (key, value) in pairs {
					self.query.entry(key).or_default().push(value);
				}
			}
			Err(err) => {
				tracing::warn!(request = %self.id, "ignoring malformed query string: {}", err);
			}
		}
		self
	}
}

impl Default for RequestContext {
	fn default() -> Self {
		Self::new()
	}
}

impl PageContext for RequestContext {
	fn request_id(&self) -> Uuid {
		self.id
	}

	fn request_cache(&self) -> &dyn Cache {
		&self.cache
	}

	fn context_data(&self) -> &HashMap<String, Vec<String>> {
		&self.query
	}
}
