//! Render views handed to the markup layer
//!
//! A [`RenderedForm`] is plain data: the ordered fields of a schema with
//! the text to put in each control and the message to show under it.

use formwright_forms::{FormField, FormStructure, PathedMap, ValueType};
use serde::Serialize;

/// Cache key of the raw submitted values of a form instance.
pub fn original_values_key(instance_id: &str) -> String {
	format!("ORIG{}", instance_id)
}

/// Cache key of the validation messages of a form instance.
pub fn validation_errors_key(instance_id: &str) -> String {
	format!("VAL{}", instance_id)
}

/// One control, or one nested group of controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
	pub label: String,
	/// Submission key of the control.
	pub name: String,
	/// Element id, unique within the page: the instance id, a `-`, then the
	/// path unchanged.
	pub html_id: String,
	/// `"text"`, `"number"`, or `"group"` for nested levels.
	pub input_type: &'static str,
	pub value: String,
	pub error: Option<String>,
	pub required: bool,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<FieldView>,
}

impl FieldView {
	pub fn is_group(&self) -> bool {
		self.input_type == "group"
	}

	pub fn is_invalid(&self) -> bool {
		self.error.is_some()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedForm {
	pub id: String,
	pub title: String,
	pub fields: Vec<FieldView>,
}

impl RenderedForm {
	/// Depth-first lookup by submission key.
	pub fn field(&self, name: &str) -> Option<&FieldView> {
		fn find<'a>(fields: &'a [FieldView], name: &str) -> Option<&'a FieldView> {
			fields.iter().find_map(|view| {
				if view.name == name {
					Some(view)
				} else {
					find(&view.children, name)
				}
			})
		}
		find(&self.fields, name)
	}

	pub fn has_errors(&self) -> bool {
		fn any_error(fields: &[FieldView]) -> bool {
			fields
				.iter()
				.any(|view| view.is_invalid() || any_error(&view.children))
		}
		any_error(&self.fields)
	}

	pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
		serde_json::to_value(self)
	}
}

/// Snapshots and instance used to fill in display values.
pub(crate) struct RenderSources<'a, T> {
	pub(crate) instance_id: &'a str,
	pub(crate) current: Option<&'a T>,
	pub(crate) originals: Option<&'a PathedMap<String>>,
	pub(crate) errors: Option<&'a PathedMap<String>>,
}

pub(crate) fn render_fields<T>(
	structure: &FormStructure<T>,
	sources: &RenderSources<'_, T>,
) -> Vec<FieldView> {
	structure
		.inputs()
		.iter()
		.map(|field| render_field(field, sources))
		.collect()
}

fn render_field<T>(field: &FormField<T>, sources: &RenderSources<'_, T>) -> FieldView {
	let html_id = format!("{}-{}", sources.instance_id, field.path);

	if let Some(sub) = &field.sub_structure {
		return FieldView {
			label: field.label.clone(),
			name: field.path.clone(),
			html_id,
			input_type: "group",
			value: String::new(),
			error: None,
			required: false,
			children: render_fields(sub, sources),
		};
	}

	FieldView {
		label: field.label.clone(),
		name: field.path.clone(),
		html_id,
		input_type: match field.value_type {
			ValueType::Int(_) => "number",
			_ => "text",
		},
		value: display_value(field, sources),
		error: sources
			.errors
			.and_then(|errors| errors.get(&field.path))
			.cloned(),
		required: field.is_required(),
		children: Vec::new(),
	}
}

fn display_value<T>(field: &FormField<T>, sources: &RenderSources<'_, T>) -> String {
	if let Some(original) = sources.originals.and_then(|o| o.get(&field.path)) {
		return original.clone();
	}
	sources
		.current
		.and_then(|current| field.value(current))
		.or_else(|| field.default_value.clone())
		.map(|value| value.to_string())
		.unwrap_or_default()
}
