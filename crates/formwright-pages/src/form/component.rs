//! Form component: schema, submission handling and redisplay
//!
//! A [`FormComponent`] is built once per declared form and shared by every
//! request that renders or submits it. Per-request state never lives on the
//! component: a rejected submission writes its snapshots into the request
//! cache under keys derived from the component's instance id, and the
//! following render of the same request reads them back.
//!
//! ```
//! use formwright_forms::{Describe, FormModel};
//! use formwright_pages::{FormComponent, RequestContext, SubmissionStatus};
//!
//! #[derive(Debug, Default)]
//! struct Feedback {
//! 	email: String,
//! 	rating: u8,
//! }
//!
//! impl FormModel for Feedback {
//! 	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
//! 		form.leaf("Email", |f| &f.email, |f| &mut f.email).hint("required");
//! 		form.leaf("Rating", |f| &f.rating, |f| &mut f.rating).hint("min=1,max=5");
//! 	}
//! }
//!
//! let form = FormComponent::new(&Feedback::default())
//! 	.unwrap()
//! 	.with_submit_handler(|_ctx, value: Feedback| assert_eq!(value.rating, 4));
//!
//! let ctx = RequestContext::new();
//! let status = form.handle_post(&ctx, "Email=&Rating=9").unwrap();
//! assert_eq!(status, SubmissionStatus::Rejected);
//!
//! let view = form.render(&ctx, None);
//! assert_eq!(view.field("Rating").unwrap().value, "9");
//! assert_eq!(view.field("Email").unwrap().error.as_deref(), Some("required"));
//!
//! let ctx = RequestContext::new();
//! let status = form.handle_post(&ctx, "Email=a%40b.c&Rating=4").unwrap();
//! assert_eq!(status, SubmissionStatus::Committed);
//! ```

use crate::context::PageContext;
use crate::error::PageResult;
use crate::form::rendering::{
	RenderSources, RenderedForm, original_values_key, render_fields, validation_errors_key,
};
use formwright_forms::{
	BindOutcome, FormModel, FormSettings, FormStructure, PathedMap, RuleMap, SchemaBuilder, bind,
};
use std::fmt;
use uuid::Uuid;

type SubmitHandler<T> = Box<dyn Fn(&dyn PageContext, T) + Send + Sync>;

/// Result of handling one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
	/// Every field validated; the submit handler received the value.
	Committed,
	/// At least one field failed validation; snapshots are in the request cache.
	Rejected,
}

pub struct FormComponent<T> {
	id: String,
	structure: FormStructure<T>,
	retain_values: bool,
	on_submit: Option<SubmitHandler<T>>,
}

impl<T: FormModel> FormComponent<T> {
	/// Build the schema of `T` from `sample` with no explicit rules.
	pub fn new(sample: &T) -> PageResult<Self> {
		Self::with_settings(sample, None, &FormSettings::default())
	}

	/// Build with an explicit rule map, which wins over inline hints.
	pub fn with_rules(sample: &T, rules: &RuleMap) -> PageResult<Self> {
		Self::with_settings(sample, Some(rules), &FormSettings::default())
	}

	pub fn with_settings(
		sample: &T,
		rules: Option<&RuleMap>,
		settings: &FormSettings,
	) -> PageResult<Self> {
		let mut builder = SchemaBuilder::new().settings(settings.clone());
		if let Some(rules) = rules {
			builder = builder.rules(rules);
		}
		let structure = builder.build(sample)?;
		Ok(Self::from_structure(structure).retain_values(settings.retain_values_on_success))
	}

	/// Wrap an already built schema.
	pub fn from_structure(structure: FormStructure<T>) -> Self {
		Self {
			id: Uuid::new_v4().simple().to_string(),
			structure,
			retain_values: false,
			on_submit: None,
		}
	}

	/// Set the function called with the bound value after a valid submission.
	///
	/// A component has at most one handler; binding another one replaces it.
	pub fn with_submit_handler<F>(mut self, handler: F) -> Self
	where
		F: Fn(&dyn PageContext, T) + Send + Sync + 'static,
	{
		if self.on_submit.is_some() {
			tracing::warn!(form = %self.id, "submit handler already bound, replacing it");
		}
		self.on_submit = Some(Box::new(handler));
		self
	}

	/// Keep the submitted strings for redisplay after a successful submission.
	pub fn retain_values(mut self, retain: bool) -> Self {
		self.retain_values = retain;
		self
	}

	/// Unique id of this component instance, used for cache keys and
	/// element ids.
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn structure(&self) -> &FormStructure<T> {
		&self.structure
	}

	/// Bind submitted `(path, value)` pairs and act on the outcome.
	///
	/// A structural mismatch between the submission and the schema is an
	/// error; failed field validation is not.
	pub fn handle_submission<I, K, V>(
		&self,
		ctx: &dyn PageContext,
		submitted: I,
	) -> PageResult<SubmissionStatus>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let cache = ctx.request_cache();
		match bind(&self.structure, submitted)?.into_outcome() {
			BindOutcome::Committed {
				value,
				original_values,
			} => {
				if self.retain_values {
					cache.set(&original_values_key(&self.id), original_values);
				}
				match &self.on_submit {
					Some(handler) => handler(ctx, value),
					None => tracing::warn!(form = %self.id, "valid submission but no submit handler is bound"),
				}
				Ok(SubmissionStatus::Committed)
			}
			BindOutcome::Rejected {
				original_values,
				validation_errors,
			} => {
				tracing::debug!(
					form = %self.id,
					request = %ctx.request_id(),
					invalid = validation_errors.len(),
					"form submission rejected"
				);
				cache.set(&original_values_key(&self.id), original_values);
				cache.set(&validation_errors_key(&self.id), validation_errors);
				Ok(SubmissionStatus::Rejected)
			}
		}
	}

	/// Decode an `application/x-www-form-urlencoded` body and submit it.
	pub fn handle_post(&self, ctx: &dyn PageContext, body: &str) -> PageResult<SubmissionStatus> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
		self.handle_submission(ctx, pairs)
	}

	/// Produce the render view for this request.
	///
	/// Each control shows the string submitted earlier in the request if
	/// there is one, then the value in `current`, then the schema default.
	pub fn render(&self, ctx: &dyn PageContext, current: Option<&T>) -> RenderedForm {
		let cache = ctx.request_cache();
		let originals = cache.get::<PathedMap<String>>(&original_values_key(&self.id));
		let errors = cache.get::<PathedMap<String>>(&validation_errors_key(&self.id));
		let sources = RenderSources {
			instance_id: &self.id,
			current,
			originals: originals.as_deref(),
			errors: errors.as_deref(),
		};
		RenderedForm {
			id: self.id.clone(),
			title: self.structure.title().to_string(),
			fields: render_fields(&self.structure, &sources),
		}
	}
}

impl<T> fmt::Debug for FormComponent<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormComponent")
			.field("id", &self.id)
			.field("structure", &self.structure)
			.field("retain_values", &self.retain_values)
			.field("has_submit_handler", &self.on_submit.is_some())
			.finish()
	}
}
