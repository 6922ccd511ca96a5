//! Form Component Integration Tests
//!
//! Tests for submission handling, request cache snapshots and the
//! redisplay of a form after a failed submission.
//!
//! Test Categories:
//! - Category 1: Construction
//! - Category 2: Submission handling
//! - Category 3: Rendering and redisplay

use formwright_forms::{
	Describe, FieldRule, FormModel, FormSettings, PathedMap, RuleMap, SchemaError,
	build_schema,
};
use formwright_pages::form::{original_values_key, validation_errors_key};
use formwright_pages::{
	FormComponent, PageContext, PageError, RequestContext, SubmissionStatus,
};
use parking_lot::Mutex;
use rstest::rstest;
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq)]
struct Address {
	street: String,
	number: Option<u16>,
}

impl FormModel for Address {
	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
		form.leaf("Street", |a| &a.street, |a| &mut a.street)
			.hint("required");
		form.leaf("Number", |a| &a.number, |a| &mut a.number);
	}
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
	name: String,
	age: i32,
	home: Option<Box<Address>>,
}

impl FormModel for Person {
	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
		form.leaf("Name", |p| &p.name, |p| &mut p.name)
			.label("Full name")
			.hint("required,min=2");
		form.leaf("Age", |p| &p.age, |p| &mut p.age).hint("min=18");
		form.nested("Home", |p| &p.home, |p| &mut p.home);
	}
}

fn recording_form() -> (FormComponent<Person>, Arc<Mutex<Vec<Person>>>) {
	let received = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&received);
	let form = FormComponent::new(&Person::default())
		.unwrap()
		.with_submit_handler(move |_ctx: &dyn PageContext, person: Person| {
			sink.lock().push(person)
		});
	(form, received)
}

// ============================================================================
// Category 1: Construction
// ============================================================================

#[rstest]
fn test_instance_ids_are_unique() {
	let a = FormComponent::new(&Person::default()).unwrap();
	let b = FormComponent::new(&Person::default()).unwrap();

	assert_ne!(a.id(), b.id());
	assert_eq!(a.id().len(), 32);
}

#[rstest]
fn test_from_prebuilt_structure() {
	let structure = build_schema("person", &Person::default(), None).unwrap();

	let form = FormComponent::from_structure(structure);

	assert_eq!(form.structure().prefix(), "person");
	assert_eq!(form.structure().title(), "Person");
}

#[rstest]
fn test_schema_error_surfaces_at_construction() {
	#[derive(Default)]
	struct Broken {
		inline: Address,
	}

	impl FormModel for Broken {
		fn describe<R: 'static>(form: &mut Describe<R, Self>) {
			form.embedded::<Address>("Inline");
		}
	}

	let result = FormComponent::new(&Broken::default());

	assert!(matches!(
		result,
		Err(PageError::Schema(SchemaError::NotAPointer { .. }))
	));
}

// ============================================================================
// Category 2: Submission handling
// ============================================================================

#[rstest]
fn test_valid_submission_calls_handler_once() {
	// Arrange
	let (form, received) = recording_form();
	let ctx = RequestContext::new();

	// Act
	let status = form
		.handle_post(&ctx, "Name=Ada+Lovelace&Age=36&Home.Street=Main%20St&Home.Number=7")
		.unwrap();

	// Assert
	assert_eq!(status, SubmissionStatus::Committed);
	let received = received.lock();
	assert_eq!(received.len(), 1);
	assert_eq!(received[0].name, "Ada Lovelace");
	assert_eq!(received[0].age, 36);
	let home = received[0].home.as_deref().unwrap();
	assert_eq!(home.street, "Main St");
	assert_eq!(home.number, Some(7));
	assert!(
		ctx.request_cache()
			.get_value(&original_values_key(form.id()))
			.is_none()
	);
}

#[rstest]
fn test_rejected_submission_stores_snapshots() {
	// Arrange
	let (form, received) = recording_form();
	let ctx = RequestContext::new();

	// Act
	let status = form
		.handle_submission(&ctx, [("Name", "A"), ("Age", "12"), ("Home.Street", "Elm")])
		.unwrap();

	// Assert
	assert_eq!(status, SubmissionStatus::Rejected);
	assert!(received.lock().is_empty());
	let cache = ctx.request_cache();
	let originals = cache
		.get::<PathedMap<String>>(&original_values_key(form.id()))
		.unwrap();
	let errors = cache
		.get::<PathedMap<String>>(&validation_errors_key(form.id()))
		.unwrap();
	assert_eq!(originals.len(), 3);
	assert_eq!(originals.get("Home.Street").map(String::as_str), Some("Elm"));
	assert_eq!(
		errors.get("Name").map(String::as_str),
		Some("must be at least 2 characters long")
	);
	assert_eq!(errors.get("Age").map(String::as_str), Some("must be at least 18"));
	assert!(errors.get("Home.Street").is_none());
}

#[rstest]
fn test_retained_values_after_success() {
	let form = FormComponent::with_settings(
		&Person::default(),
		None,
		&FormSettings {
			retain_values_on_success: true,
			..FormSettings::default()
		},
	)
	.unwrap();
	let ctx = RequestContext::new();

	let status = form
		.handle_submission(&ctx, [("Name", "Grace"), ("Age", "45")])
		.unwrap();

	assert_eq!(status, SubmissionStatus::Committed);
	assert_eq!(form.render(&ctx, None).field("Name").unwrap().value, "Grace");
	assert!(
		ctx.request_cache()
			.get_value(&validation_errors_key(form.id()))
			.is_none()
	);
}

#[rstest]
fn test_rebinding_handler_replaces_previous() {
	// Arrange
	let calls = Arc::new(Mutex::new(Vec::new()));
	let first = Arc::clone(&calls);
	let second = Arc::clone(&calls);
	let form = FormComponent::new(&Person::default())
		.unwrap()
		.with_submit_handler(move |_: &dyn PageContext, _: Person| first.lock().push("first"))
		.with_submit_handler(move |_: &dyn PageContext, _: Person| second.lock().push("second"));

	// Act
	form.handle_submission(&RequestContext::new(), [("Name", "Bo"), ("Age", "20")])
		.unwrap();

	// Assert
	assert_eq!(*calls.lock(), ["second"]);
}

#[rstest]
fn test_explicit_rules_override_hints() {
	let rules = RuleMap::new().rule("Age", FieldRule::new().with_max(10.0));
	let form = FormComponent::with_rules(&Person::default(), &rules).unwrap();
	let ctx = RequestContext::new();

	let status = form
		.handle_submission(&ctx, [("Name", "Al"), ("Age", "5")])
		.unwrap();

	assert_eq!(status, SubmissionStatus::Committed);
}

#[rstest]
#[case("Nickname=x")]
#[case("Home=x")]
fn test_structural_errors_fail_the_request(#[case] body: &str) {
	let (form, received) = recording_form();
	let ctx = RequestContext::new();

	let result = form.handle_post(&ctx, body);

	assert!(matches!(result, Err(PageError::Bind(_))));
	assert!(received.lock().is_empty());
}

#[rstest]
fn test_empty_body_commits_defaults() {
	let (form, received) = recording_form();

	let status = form.handle_post(&RequestContext::new(), "").unwrap();

	assert_eq!(status, SubmissionStatus::Committed);
	assert_eq!(*received.lock(), [Person::default()]);
}

// ============================================================================
// Category 3: Rendering and redisplay
// ============================================================================

#[rstest]
fn test_fresh_render_uses_defaults() {
	// Arrange
	let sample = Person {
		name: "Sample".to_string(),
		..Person::default()
	};
	let form = FormComponent::new(&sample).unwrap();

	// Act
	let view = form.render(&RequestContext::new(), None);

	// Assert
	assert_eq!(view.title, "Person");
	assert!(!view.has_errors());
	let name = view.field("Name").unwrap();
	assert_eq!(name.label, "Full name");
	assert_eq!(name.value, "Sample");
	assert!(name.required);
	assert_eq!(name.input_type, "text");
	assert_eq!(view.field("Age").unwrap().input_type, "number");
	assert_eq!(view.field("Age").unwrap().value, "0");
	let home = view.field("Home").unwrap();
	assert!(home.is_group());
	assert_eq!(home.children.len(), 2);
	assert_eq!(view.field("Home.Number").unwrap().value, "0");
	assert_eq!(
		view.field("Home.Street").unwrap().html_id,
		format!("{}-Home.Street", form.id())
	);
}

#[derive(Debug, Default)]
struct Pair {
	b: String,
}

impl FormModel for Pair {
	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
		form.leaf("b", |p| &p.b, |p| &mut p.b);
	}
}

#[derive(Debug, Default)]
struct Lookalikes {
	dashed: String,
	a: Option<Box<Pair>>,
}

impl FormModel for Lookalikes {
	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
		form.leaf("a-b", |l| &l.dashed, |l| &mut l.dashed);
		form.nested("a", |l| &l.a, |l| &mut l.a);
	}
}

#[rstest]
fn test_element_ids_stay_distinct() {
	// Arrange
	let form = FormComponent::new(&Lookalikes::default()).unwrap();

	// Act
	let view = form.render(&RequestContext::new(), None);

	// Assert
	let dashed = &view.field("a-b").unwrap().html_id;
	let nested = &view.field("a.b").unwrap().html_id;
	assert_ne!(dashed, nested);
	assert_eq!(nested, &format!("{}-a.b", form.id()));
}

#[rstest]
fn test_current_instance_beats_defaults() {
	let form = FormComponent::new(&Person::default()).unwrap();
	let current = Person {
		name: "Current".to_string(),
		age: 50,
		home: Some(Box::new(Address {
			street: "High St".to_string(),
			number: None,
		})),
	};

	let view = form.render(&RequestContext::new(), Some(&current));

	assert_eq!(view.field("Name").unwrap().value, "Current");
	assert_eq!(view.field("Age").unwrap().value, "50");
	assert_eq!(view.field("Home.Street").unwrap().value, "High St");
	assert_eq!(view.field("Home.Number").unwrap().value, "0");
}

#[rstest]
fn test_redisplay_keeps_user_input_and_errors() {
	// Arrange
	let (form, _) = recording_form();
	let ctx = RequestContext::new();
	let current = Person {
		name: "Stored".to_string(),
		..Person::default()
	};
	form.handle_post(&ctx, "Name=&Age=abc&Home.Street=").unwrap();

	// Act
	let view = form.render(&ctx, Some(&current));

	// Assert
	let name = view.field("Name").unwrap();
	assert_eq!(name.value, "");
	assert_eq!(name.error.as_deref(), Some("must be at least 2 characters long"));
	let age = view.field("Age").unwrap();
	assert_eq!(age.value, "abc");
	assert_eq!(
		age.error.as_deref(),
		Some("couldn't parse the given value as an integer")
	);
	assert_eq!(
		view.field("Home.Street").unwrap().error.as_deref(),
		Some("required")
	);
	assert!(view.has_errors());
}

#[rstest]
fn test_snapshots_do_not_leak_across_requests() {
	let (form, _) = recording_form();
	let failed = RequestContext::new();
	form.handle_post(&failed, "Name=&Age=1").unwrap();

	let next = RequestContext::new();
	let view = form.render(&next, None);

	assert!(!view.has_errors());
	assert_eq!(view.field("Age").unwrap().value, "0");
}

#[rstest]
fn test_render_view_serializes() {
	let form = FormComponent::new(&Person::default()).unwrap();

	let json = form.render(&RequestContext::new(), None).to_json().unwrap();

	assert_eq!(json["title"], "Person");
	assert_eq!(json["fields"][0]["name"], "Name");
	assert_eq!(json["fields"][2]["children"][0]["name"], "Home.Street");
	assert!(json["fields"][0].get("children").is_none());
}
