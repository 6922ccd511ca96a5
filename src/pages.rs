//! Form components and per-request context
//!
//! This module provides access to `formwright-pages`:
//!
//! - **Components**: [`FormComponent`] handling submissions and rendering
//! - **Context**: [`PageContext`], [`RequestContext`] and the request [`Cache`]
//! - **Views**: [`RenderedForm`] and [`FieldView`](form::FieldView)

pub use formwright_pages::*;
