//! Form components and their render views
//!
//! ## Request flow
//!
//! ```text
//! POST body ──▶ handle_post ──▶ bind ──┬─▶ Committed ──▶ submit handler
//!                                      └─▶ Rejected ──▶ ORIG<id> / VAL<id>
//!                                                        in request cache
//! render(ctx) ◀── request cache ◀──────────────────────────────┘
//! ```

pub mod component;
pub mod rendering;

pub use component::{FormComponent, SubmissionStatus};
pub use rendering::{FieldView, RenderedForm, original_values_key, validation_errors_key};
