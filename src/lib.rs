//! # formwright
//!
//! Dynamic form schemas, validation and data binding for typed Rust models.
//!
//! A model declares its fields once through [`FormModel`]. formwright turns
//! that declaration into an ordered, path-addressed schema, validates flat
//! `path -> string` submissions against it, and binds the valid ones onto a
//! fresh instance of the model. Failed submissions keep the user's raw input
//! and the per-field messages so the form can be shown again as submitted.
//!
//! ## Feature Flags
//!
//! - `forms` - schema description, validation and binding
//! - `pages` - form components, request context and render views
//! - `full` (default) - everything
//!
//! ## Example
//!
//! ```
//! use formwright::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Signup {
//! 	name: String,
//! 	age: Option<u8>,
//! }
//!
//! impl FormModel for Signup {
//! 	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
//! 		form.leaf("Name", |s| &s.name, |s| &mut s.name).hint("required,min=2");
//! 		form.leaf("Age", |s| &s.age, |s| &mut s.age);
//! 	}
//! }
//!
//! let form = FormComponent::new(&Signup::default()).unwrap();
//! let ctx = RequestContext::new();
//!
//! let status = form.handle_post(&ctx, "Name=A&Age=30").unwrap();
//! assert_eq!(status, SubmissionStatus::Rejected);
//!
//! let view = form.render(&ctx, None);
//! assert_eq!(view.field("Name").unwrap().value, "A");
//! assert_eq!(view.field("Age").unwrap().value, "30");
//! ```

#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "forms")]
pub use formwright_forms::{
	BindError, BindOutcome, Binding, Describe, FieldRule, FieldValue, FormField, FormModel,
	FormSettings, FormStructure, PathedMap, RuleMap, SchemaBuilder, SchemaError, ValueType, bind,
	build_schema,
};
#[cfg(feature = "pages")]
pub use formwright_pages::{
	FormComponent, PageContext, PageError, RenderedForm, RequestContext, SubmissionStatus,
};

/// Commonly used items.
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use formwright_forms::{
		BindOutcome, Describe, FieldRule, FormModel, FormSettings, PathedMap, RuleMap,
		SchemaBuilder, bind, build_schema,
	};
	#[cfg(feature = "pages")]
	pub use formwright_pages::{
		FormComponent, PageContext, RenderedForm, RequestContext, SubmissionStatus,
	};
}
