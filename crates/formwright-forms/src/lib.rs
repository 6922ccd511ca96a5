//! Form schema description, validation and binding for formwright
//!
//! This crate provides:
//! - Declaring bindable models through [`FormModel`]
//! - Building an immutable, shareable [`FormStructure`] from a model type
//! - Rule resolution from inline hints or an explicit [`RuleMap`]
//! - Per-type validation of submitted strings
//! - Binding flat `path -> value` submissions onto a fresh instance
//! - [`PathedMap`] snapshots of raw values and validation messages

pub mod accessor;
pub mod binding;
pub mod error;
pub mod model;
pub mod pathed_map;
pub mod rules;
pub mod schema;
pub mod settings;
pub mod validators;
pub mod value;

pub use accessor::{GroupAccess, LeafAccess, LeafSlot, LeafType, Lens};
pub use binding::{BindOutcome, Binding, bind};
pub use error::{AccessError, BindError, BindResult, HintError, SchemaError, SchemaResult};
pub use model::{Declaration, Describe, FormModel, SchemaBuilder, build_schema};
pub use pathed_map::{PATH_SEPARATOR, PathedEntry, PathedMap};
pub use rules::{FieldRule, RuleEntry, RuleMap};
pub use schema::{FormField, FormStructure};
pub use settings::{FormSettings, SettingsError};
pub use value::{FieldValue, IntKind, ValueType};
