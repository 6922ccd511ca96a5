//! The form schema: one [`FormStructure`] per model level
//!
//! A schema is built once per form type and then only read. Every entry
//! carries its full dot-separated path from the root, which is the key used
//! for submissions, rendered control names and snapshot lookups.

use crate::accessor::{GroupAccess, LeafAccess};
use crate::error::{AccessError, SchemaError, SchemaResult};
use crate::pathed_map::PATH_SEPARATOR;
use crate::rules::FieldRule;
use crate::validators;
use crate::value::{FieldValue, ValueType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub(crate) enum FieldAccess<R> {
	Leaf(Arc<dyn LeafAccess<R>>),
	Group(Arc<dyn GroupAccess<R>>),
}

/// One declared field of a model level.
pub struct FormField<R> {
	/// Text shown next to the control.
	pub label: String,
	/// Declared name, unique within its level.
	pub field_name: String,
	/// Dot-separated address from the schema root.
	pub path: String,
	pub value_type: ValueType,
	/// Whether the model stores the field behind an `Option`.
	pub nullable: bool,
	/// Value found in the sample the schema was built from, or the zero
	/// value of the leaf type.
	///
	/// Always `None` for groups: a nested level has no scalar default of its
	/// own, and its leaves carry theirs. Rendering an unset level falls back
	/// to those leaf defaults.
	pub default_value: Option<FieldValue>,
	pub rule: Option<FieldRule>,
	/// Schema of the nested level for `ValueType::Struct` fields.
	pub sub_structure: Option<Box<FormStructure<R>>>,
	pub(crate) access: FieldAccess<R>,
}

impl<R> FormField<R> {
	pub fn is_leaf(&self) -> bool {
		self.sub_structure.is_none()
	}

	pub fn is_required(&self) -> bool {
		self.rule.as_ref().is_some_and(|rule| rule.required)
	}

	/// Read this field out of an instance of the root type.
	///
	/// Returns `None` for groups, and for leaves whose storage or any
	/// enclosing level is unset.
	pub fn value(&self, instance: &R) -> Option<FieldValue> {
		match &self.access {
			FieldAccess::Leaf(access) => access.get(instance),
			FieldAccess::Group(_) => None,
		}
	}

	/// Whether the level a group field points at is allocated.
	pub fn is_present(&self, instance: &R) -> bool {
		match &self.access {
			FieldAccess::Leaf(access) => access.get(instance).is_some(),
			FieldAccess::Group(access) => access.is_present(instance),
		}
	}

	/// Parse `raw` and write it into `instance`, allocating nullable storage.
	pub fn set_value(&self, instance: &mut R, raw: &str) -> Result<(), AccessError> {
		match &self.access {
			FieldAccess::Leaf(access) => access.set(instance, raw),
			FieldAccess::Group(_) => Err(AccessError::NotALeaf),
		}
	}

	/// Allocate the nested level of a group field. No-op on leaves.
	pub fn allocate(&self, instance: &mut R) {
		if let FieldAccess::Group(access) = &self.access {
			access.allocate(instance);
		}
	}

	/// Check a submitted string against the field type and rule.
	///
	/// Groups have no validator of their own and always pass.
	pub fn validate(&self, raw: &str) -> Result<(), String> {
		validators::validate(self.value_type, raw, self.rule.as_ref())
	}
}

impl<R> fmt::Debug for FormField<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormField")
			.field("label", &self.label)
			.field("field_name", &self.field_name)
			.field("path", &self.path)
			.field("value_type", &self.value_type)
			.field("nullable", &self.nullable)
			.field("default_value", &self.default_value)
			.field("rule", &self.rule)
			.field("sub_structure", &self.sub_structure)
			.finish()
	}
}

/// Ordered fields of one model level.
pub struct FormStructure<R> {
	title: String,
	prefix: String,
	inputs: Vec<FormField<R>>,
	index: HashMap<String, usize>,
}

impl<R> FormStructure<R> {
	pub(crate) fn new(title: impl Into<String>, prefix: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			prefix: prefix.into(),
			inputs: Vec::new(),
			index: HashMap::new(),
		}
	}

	pub(crate) fn push(&mut self, field: FormField<R>) -> SchemaResult<()> {
		if self.index.contains_key(&field.field_name) {
			return Err(SchemaError::DuplicateField { path: field.path });
		}
		self.index
			.insert(field.field_name.clone(), self.inputs.len());
		self.inputs.push(field);
		Ok(())
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	/// Path of this level; empty for an unprefixed root.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Fields of this level in declaration order.
	pub fn inputs(&self) -> &[FormField<R>] {
		&self.inputs
	}

	/// Field of this level by declared name.
	pub fn field(&self, name: &str) -> Option<&FormField<R>> {
		self.index.get(name).map(|&i| &self.inputs[i])
	}

	/// Resolve a full path to its field, descending through groups.
	pub fn resolve(&self, path: &str) -> Option<&FormField<R>> {
		self.resolve_chain(path)?.pop()
	}

	/// Every field along `path`: the enclosing groups, then the target.
	pub fn resolve_chain(&self, path: &str) -> Option<Vec<&FormField<R>>> {
		let mut chain = Vec::new();
		let mut level = self;
		let mut rest = self.relative(path)?;
		loop {
			let (head, tail) = match rest.split_once(PATH_SEPARATOR) {
				Some((head, tail)) => (head, Some(tail)),
				None => (rest, None),
			};
			let field = level.field(head)?;
			chain.push(field);
			match tail {
				None => return Some(chain),
				Some(tail) => {
					level = field.sub_structure.as_deref()?;
					rest = tail;
				}
			}
		}
	}

	fn relative<'p>(&self, path: &'p str) -> Option<&'p str> {
		if self.prefix.is_empty() {
			return Some(path);
		}
		path.strip_prefix(self.prefix.as_str())?
			.strip_prefix(PATH_SEPARATOR)
	}

	/// All leaves, depth first in declaration order.
	pub fn leaves(&self) -> Vec<&FormField<R>> {
		let mut out = Vec::new();
		self.collect_leaves(&mut out);
		out
	}

	fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FormField<R>>) {
		for field in &self.inputs {
			match &field.sub_structure {
				Some(sub) => sub.collect_leaves(out),
				None => out.push(field),
			}
		}
	}

	/// Fill leaf defaults from `sample`, falling back to zero values.
	pub(crate) fn apply_defaults(&mut self, sample: &R) {
		for field in &mut self.inputs {
			match &mut field.sub_structure {
				Some(sub) => sub.apply_defaults(sample),
				None => {
					field.default_value = field
						.value(sample)
						.or_else(|| field.value_type.zero_value());
				}
			}
		}
	}
}

impl<R> fmt::Debug for FormStructure<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormStructure")
			.field("title", &self.title)
			.field("prefix", &self.prefix)
			.field("inputs", &self.inputs)
			.finish()
	}
}
