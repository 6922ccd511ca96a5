//! Error types for schema construction, value access and binding
//!
//! Three classes of failure are kept apart:
//!
//! - [`SchemaError`]: the form type itself is malformed. Raised while the
//!   schema is built and meant for the component author.
//! - [`BindError`]: a submission does not fit the schema (stale markup, a
//!   value posted for a group). The whole binding call fails.
//! - Per-field validation messages, which are not errors at all. They are
//!   collected into a [`PathedMap`](crate::PathedMap) by the binder.

use crate::value::IntKind;

/// Failure while parsing an inline rule hint such as `"required,min=2"`.
#[derive(Debug, thiserror::Error)]
pub enum HintError {
	#[error("invalid number {value:?} for `{key}`")]
	InvalidNumber { key: String, value: String },
	#[error("invalid url-escaped pattern {0:?}")]
	InvalidEscape(String),
	#[error("invalid pattern: {0}")]
	InvalidPattern(#[from] regex::Error),
	#[error("`{key}` needs a value")]
	MissingValue { key: String },
	#[error("`{key}` takes no value, got {value:?}")]
	UnexpectedValue { key: String, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("field {path}: nested structure fields must be a pointer (declare it as Option<Box<_>>)")]
	NotAPointer { path: String },
	#[error("field {path}: {source}")]
	InvalidHint {
		path: String,
		#[source]
		source: HintError,
	},
	#[error("field {path}: {kind} fields cannot be bound to a form")]
	UnsupportedKind { path: String, kind: String },
	#[error("field {path} is declared more than once")]
	DuplicateField { path: String },
	#[error("field {path:?}: names must be non-empty and must not contain '.'")]
	InvalidName { path: String },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failure converting a raw submitted string into a field's storage type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
	#[error("couldn't parse {value:?} as {kind}")]
	Parse { value: String, kind: IntKind },
	#[error("{value} is out of range for {kind}")]
	OutOfRange { value: String, kind: IntKind },
	#[error("field is a group and holds no value of its own")]
	NotALeaf,
}

#[derive(Debug, thiserror::Error)]
pub enum BindError {
	#[error("submitted field {path:?} does not exist in form {form}")]
	UnknownPath { path: String, form: String },
	#[error("submitted field {path:?} is a group and cannot take a value")]
	NotALeaf { path: String },
	#[error("failed to apply {path:?}: {source}")]
	Apply {
		path: String,
		#[source]
		source: AccessError,
	},
}

pub type BindResult<T> = Result<T, BindError>;
