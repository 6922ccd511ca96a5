//! Form components for formwright
//!
//! This crate provides:
//! - [`FormComponent`]: a form built from a [`FormModel`](formwright_forms::FormModel)
//!   that handles submissions and produces render views
//! - [`PageContext`] and [`RequestContext`]: per-request services
//! - [`Cache`]: the request-scoped store used to carry submitted values and
//!   validation messages to the redisplay

pub mod cache;
pub mod context;
pub mod error;
pub mod form;

pub use cache::{Cache, CacheValue, MemoryCache};
pub use context::{PageContext, RequestContext};
pub use error::{PageError, PageResult};
pub use form::{FieldView, FormComponent, RenderedForm, SubmissionStatus};
