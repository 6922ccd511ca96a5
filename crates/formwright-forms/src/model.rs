//! Declaring bindable models and building their schema
//!
//! A model lists its fields once, in rendering order, through
//! [`FormModel::describe`]. The builder walks that description, resolves a
//! rule for every leaf, recurses into nested models and produces an
//! immutable [`FormStructure`].
//!
//! ```
//! use formwright_forms::{build_schema, Describe, FormModel, ValueType};
//!
//! #[derive(Default)]
//! struct Address {
//! 	street: String,
//! 	number: Option<u16>,
//! }
//!
//! impl FormModel for Address {
//! 	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
//! 		form.leaf("Street", |a| &a.street, |a| &mut a.street).hint("required");
//! 		form.leaf("Number", |a| &a.number, |a| &mut a.number);
//! 	}
//! }
//!
//! #[derive(Default)]
//! struct Person {
//! 	name: String,
//! 	home: Option<Box<Address>>,
//! }
//!
//! impl FormModel for Person {
//! 	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
//! 		form.leaf("Name", |p| &p.name, |p| &mut p.name).label("Full name");
//! 		form.nested("Home", |p| &p.home, |p| &mut p.home);
//! 	}
//! }
//!
//! let schema = build_schema("", &Person::default(), None).unwrap();
//! let paths: Vec<&str> = schema.leaves().iter().map(|f| f.path.as_str()).collect();
//! assert_eq!(paths, ["Name", "Home.Street", "Home.Number"]);
//! assert_eq!(schema.inputs()[1].value_type, ValueType::Struct);
//! ```

use crate::accessor::{GroupAccess, LeafAccess, LeafSlot, LeafType, Lens, NestedAccessor, SlotAccessor};
use crate::error::{SchemaError, SchemaResult};
use crate::pathed_map::PATH_SEPARATOR;
use crate::rules::{RuleMap, resolve_rule};
use crate::schema::{FieldAccess, FormField, FormStructure};
use crate::settings::FormSettings;
use crate::value::ValueType;
use std::sync::Arc;

/// A record type that can be rendered as a form and bound from a submission.
pub trait FormModel: Default + Send + Sync + 'static {
	/// Title of the form level. Defaults to the unqualified type name.
	fn title() -> String {
		let full = std::any::type_name::<Self>();
		let base = full.split('<').next().unwrap_or(full);
		base.rsplit("::").next().unwrap_or(base).to_string()
	}

	/// Declare the fields of `Self` in order. `R` is the schema root type.
	fn describe<R: 'static>(form: &mut Describe<R, Self>);
}

type NestedBuild<R> =
	Box<dyn FnOnce(&str, Option<&RuleMap>, &FormSettings) -> SchemaResult<FormStructure<R>>>;

enum DeclKind<R> {
	Leaf {
		value_type: ValueType,
		nullable: bool,
		access: Arc<dyn LeafAccess<R>>,
	},
	Nested {
		access: Arc<dyn GroupAccess<R>>,
		build: NestedBuild<R>,
	},
	Embedded,
	Unsupported {
		kind: String,
	},
}

/// One declared field, returned by the [`Describe`] calls for chaining.
pub struct Declaration<R> {
	name: String,
	label: Option<String>,
	hint: Option<String>,
	kind: DeclKind<R>,
}

impl<R> Declaration<R> {
	/// Override the label, which defaults to the declared name.
	pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
		self.label = Some(label.into());
		self
	}

	/// Inline rule hint, e.g. `"required,min=2,max=10"`.
	pub fn hint(&mut self, hint: impl Into<String>) -> &mut Self {
		self.hint = Some(hint.into());
		self
	}
}

/// Field registry handed to [`FormModel::describe`].
///
/// Declared names become path segments, so they must be non-empty and
/// must not contain `.`.
pub struct Describe<R, S> {
	lens: Lens<R, S>,
	decls: Vec<Declaration<R>>,
}

impl<R: 'static, S: 'static> Describe<R, S> {
	/// A scalar field: `String`, any integer width, or an `Option` of one.
	pub fn leaf<V, G, M>(&mut self, name: &str, get: G, get_mut: M) -> &mut Declaration<R>
	where
		V: LeafSlot,
		G: Fn(&S) -> &V + Send + Sync + 'static,
		M: Fn(&mut S) -> &mut V + Send + Sync + 'static,
	{
		let access = SlotAccessor::new(self.lens.clone(), get, get_mut);
		self.push(
			name,
			DeclKind::Leaf {
				value_type: <V::Leaf as LeafType>::VALUE_TYPE,
				nullable: V::NULLABLE,
				access: Arc::new(access),
			},
		)
	}

	/// A nested model stored as `Option<Box<C>>`.
	pub fn nested<C, G, M>(&mut self, name: &str, get: G, get_mut: M) -> &mut Declaration<R>
	where
		C: FormModel,
		G: Fn(&S) -> &Option<Box<C>> + Send + Sync + 'static,
		M: Fn(&mut S) -> &mut Option<Box<C>> + Send + Sync + 'static,
	{
		let lens = self.lens.then_nested(get, get_mut);
		let access = Arc::new(NestedAccessor::new(lens.clone()));
		let build: NestedBuild<R> = Box::new(
			move |prefix: &str, rules: Option<&RuleMap>, settings: &FormSettings| {
				build_level::<R, C>(lens, prefix, rules, settings)
			},
		);
		self.push(name, DeclKind::Nested { access, build })
	}

	/// A nested model stored inline.
	///
	/// An inline model cannot represent "not supplied yet", so building a
	/// schema that contains one fails.
	pub fn embedded<C: FormModel>(&mut self, name: &str) -> &mut Declaration<R> {
		self.push(name, DeclKind::Embedded)
	}

	/// A field whose kind cannot be bound (lists, maps, floats...).
	///
	/// Left out of the schema, or rejected when
	/// [`FormSettings::strict_field_kinds`] is set.
	pub fn unsupported(&mut self, name: &str, kind: impl Into<String>) -> &mut Declaration<R> {
		self.push(name, DeclKind::Unsupported { kind: kind.into() })
	}

	fn push(&mut self, name: &str, kind: DeclKind<R>) -> &mut Declaration<R> {
		let at = self.decls.len();
		self.decls.push(Declaration {
			name: name.to_string(),
			label: None,
			hint: None,
			kind,
		});
		&mut self.decls[at]
	}
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
	if prefix.is_empty() {
		name.to_string()
	} else {
		format!("{}{}{}", prefix, PATH_SEPARATOR, name)
	}
}

fn build_level<R: 'static, S: FormModel>(
	lens: Lens<R, S>,
	prefix: &str,
	rules: Option<&RuleMap>,
	settings: &FormSettings,
) -> SchemaResult<FormStructure<R>> {
	let mut form = Describe {
		lens,
		decls: Vec::new(),
	};
	S::describe(&mut form);

	let mut structure = FormStructure::new(S::title(), prefix);
	for decl in form.decls {
		let path = join_path(prefix, &decl.name);
		if decl.name.is_empty() || decl.name.contains(PATH_SEPARATOR) {
			return Err(SchemaError::InvalidName { path });
		}
		let label = decl.label.unwrap_or_else(|| decl.name.clone());
		let field = match decl.kind {
			DeclKind::Leaf {
				value_type,
				nullable,
				access,
			} => {
				let rule = resolve_rule(&decl.name, decl.hint.as_deref(), rules).map_err(
					|source| SchemaError::InvalidHint {
						path: path.clone(),
						source,
					},
				)?;
				FormField {
					label,
					field_name: decl.name,
					default_value: value_type.zero_value(),
					path,
					value_type,
					nullable,
					rule,
					sub_structure: None,
					access: FieldAccess::Leaf(access),
				}
			}
			DeclKind::Nested { access, build } => {
				if decl.hint.is_some() {
					tracing::warn!("rule hint on group field {} is ignored", path);
				}
				let sub_rules = rules.and_then(|r| r.get_nested(&decl.name));
				let sub = build(&path, sub_rules, settings)?;
				FormField {
					label,
					field_name: decl.name,
					path,
					value_type: ValueType::Struct,
					nullable: true,
					default_value: None,
					rule: None,
					sub_structure: Some(Box::new(sub)),
					access: FieldAccess::Group(access),
				}
			}
			DeclKind::Embedded => return Err(SchemaError::NotAPointer { path }),
			DeclKind::Unsupported { kind } => {
				if settings.strict_field_kinds {
					return Err(SchemaError::UnsupportedKind { path, kind });
				}
				tracing::debug!(path = %path, kind = %kind, "skipping field of unsupported kind");
				continue;
			}
		};
		structure.push(field)?;
	}
	Ok(structure)
}

/// Builds a [`FormStructure`] from a sample value.
///
/// # Examples
///
/// ```
/// use formwright_forms::{Describe, FieldRule, FormModel, FormSettings, RuleMap, SchemaBuilder};
///
/// #[derive(Default)]
/// struct Login {
/// 	user: String,
/// 	tags: Vec<String>,
/// }
///
/// impl FormModel for Login {
/// 	fn describe<R: 'static>(form: &mut Describe<R, Self>) {
/// 		form.leaf("User", |l| &l.user, |l| &mut l.user);
/// 		form.unsupported("Tags", "list");
/// 	}
/// }
///
/// let rules = RuleMap::new().rule("User", FieldRule::new().required());
/// let schema = SchemaBuilder::new()
/// 	.prefix("login")
/// 	.rules(&rules)
/// 	.build(&Login::default())
/// 	.unwrap();
/// assert_eq!(schema.inputs().len(), 1);
/// assert!(schema.resolve("login.User").unwrap().is_required());
///
/// let strict = FormSettings { strict_field_kinds: true, ..FormSettings::default() };
/// assert!(SchemaBuilder::new().settings(strict).build(&Login::default()).is_err());
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder<'a> {
	prefix: String,
	rules: Option<&'a RuleMap>,
	settings: FormSettings,
}

impl<'a> SchemaBuilder<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn rules(mut self, rules: &'a RuleMap) -> Self {
		self.rules = Some(rules);
		self
	}

	pub fn settings(mut self, settings: FormSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn build<T: FormModel>(&self, sample: &T) -> SchemaResult<FormStructure<T>> {
		let mut structure =
			build_level::<T, T>(Lens::identity(), &self.prefix, self.rules, &self.settings)?;
		structure.apply_defaults(sample);
		tracing::debug!(
			form = %structure.title(),
			leaves = structure.leaves().len(),
			"built form schema"
		);
		Ok(structure)
	}
}

/// Build the schema of `T` with default settings.
pub fn build_schema<T: FormModel>(
	prefix: &str,
	sample: &T,
	rules: Option<&RuleMap>,
) -> SchemaResult<FormStructure<T>> {
	let mut builder = SchemaBuilder::new().prefix(prefix);
	if let Some(rules) = rules {
		builder = builder.rules(rules);
	}
	builder.build(sample)
}
