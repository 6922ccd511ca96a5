//! Binding a flat submission onto a fresh model instance
//!
//! Each submitted `(path, value)` pair is resolved through the schema, its
//! raw string recorded, validated, and applied when valid. Invalid fields
//! are collected and skipped; the other fields keep going. A path the
//! schema does not know aborts the whole call, since it means the markup
//! and the schema disagree.

use crate::error::{BindError, BindResult};
use crate::pathed_map::PathedMap;
use crate::schema::FormStructure;

/// Everything one binding pass produced.
#[derive(Debug)]
pub struct Binding<T> {
	/// The instance the valid fields were written into.
	pub value: T,
	/// Raw submitted strings by path, kept for redisplay.
	pub original_values: PathedMap<String>,
	/// Validation messages by path.
	pub validation_errors: PathedMap<String>,
}

/// Final state of a submission.
#[derive(Debug)]
pub enum BindOutcome<T> {
	Committed {
		value: T,
		original_values: PathedMap<String>,
	},
	Rejected {
		original_values: PathedMap<String>,
		validation_errors: PathedMap<String>,
	},
}

impl<T> Binding<T> {
	pub fn is_valid(&self) -> bool {
		self.validation_errors.is_empty()
	}

	/// Split into the committed value or the rejection snapshots.
	pub fn into_outcome(self) -> BindOutcome<T> {
		if self.is_valid() {
			BindOutcome::Committed {
				value: self.value,
				original_values: self.original_values,
			}
		} else {
			BindOutcome::Rejected {
				original_values: self.original_values,
				validation_errors: self.validation_errors,
			}
		}
	}
}

/// Bind `submitted` onto `T::default()` using `schema`.
///
/// # Examples
///
/// ```
/// use formwright_forms::{bind, build_schema, Describe, FormModel};
///
/// #[derive(Default)]
/// struct Signup {
/// 	name: String,
/// 	age: Option<u8>,
/// }
///
/// impl FormModel for Signup {
/// 	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
/// 		form.leaf("Name", |s| &s.name, |s| &mut s.name).hint("required");
/// 		form.leaf("Age", |s| &s.age, |s| &mut s.age);
/// 	}
/// }
///
/// let schema = build_schema("", &Signup::default(), None).unwrap();
///
/// let ok = bind(&schema, [("Name", "Ada"), ("Age", "36")]).unwrap();
/// assert!(ok.is_valid());
/// assert_eq!(ok.value.age, Some(36));
///
/// let rejected = bind(&schema, [("Name", " "), ("Age", "old")]).unwrap();
/// assert_eq!(rejected.validation_errors.len(), 2);
/// assert_eq!(rejected.original_values.get("Age").map(String::as_str), Some("old"));
///
/// assert!(bind(&schema, [("Nickname", "x")]).is_err());
/// ```
pub fn bind<T, I, K, V>(schema: &FormStructure<T>, submitted: I) -> BindResult<Binding<T>>
where
	T: Default,
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut value = T::default();
	let mut original_values = PathedMap::new();
	let mut validation_errors = PathedMap::new();

	for (path, raw) in submitted {
		let (path, raw) = (path.as_ref(), raw.as_ref());
		let chain = schema
			.resolve_chain(path)
			.ok_or_else(|| BindError::UnknownPath {
				path: path.to_string(),
				form: schema.title().to_string(),
			})?;
		let Some((field, groups)) = chain.split_last() else {
			return Err(BindError::UnknownPath {
				path: path.to_string(),
				form: schema.title().to_string(),
			});
		};
		if !field.is_leaf() {
			return Err(BindError::NotALeaf {
				path: path.to_string(),
			});
		}

		original_values.set(path, raw.to_string());

		if let Err(message) = field.validate(raw) {
			tracing::debug!(path, %message, "submitted value failed validation");
			validation_errors.set(path, message);
			continue;
		}

		for group in groups {
			group.allocate(&mut value);
		}
		field
			.set_value(&mut value, raw)
			.map_err(|source| BindError::Apply {
				path: path.to_string(),
				source,
			})?;
	}

	tracing::debug!(
		form = %schema.title(),
		submitted = original_values.len(),
		invalid = validation_errors.len(),
		"bound form submission"
	);

	Ok(Binding {
		value,
		original_values,
		validation_errors,
	})
}
