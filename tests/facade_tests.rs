//! Facade re-export tests

use formwright::prelude::*;
use rstest::rstest;

#[derive(Debug, Default)]
struct Note {
	title: String,
	pages: Option<u32>,
}

impl FormModel for Note {
	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
		form.leaf("Title", |n| &n.title, |n| &mut n.title).hint("required");
		form.leaf("Pages", |n| &n.pages, |n| &mut n.pages);
	}
}

#[rstest]
fn test_prelude_binds_through_facade() {
	// Arrange
	let schema = build_schema("", &Note::default(), None).unwrap();

	// Act
	let binding = bind(&schema, [("Title", "Draft"), ("Pages", "12")]).unwrap();

	// Assert
	match binding.into_outcome() {
		BindOutcome::Committed { value, .. } => {
			assert_eq!(value.title, "Draft");
			assert_eq!(value.pages, Some(12));
		}
		BindOutcome::Rejected { validation_errors, .. } => {
			panic!("unexpected rejection: {:?}", validation_errors)
		}
	}
}

#[rstest]
fn test_modules_expose_member_crates() {
	let form = formwright::pages::FormComponent::new(&Note::default()).unwrap();
	let ctx = formwright::pages::RequestContext::new();

	let status = form.handle_post(&ctx, "Title=").unwrap();

	assert_eq!(status, SubmissionStatus::Rejected);
	let errors = ctx
		.request_cache()
		.get::<formwright::forms::PathedMap<String>>(&formwright::pages::form::validation_errors_key(
			form.id(),
		))
		.unwrap();
	assert_eq!(errors.get("Title").map(String::as_str), Some("required"));
}
