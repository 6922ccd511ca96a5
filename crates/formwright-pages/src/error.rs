//! Error types for form components

use formwright_forms::{BindError, SchemaError};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
	/// The form type could not be turned into a schema.
	#[error("failed to build form schema: {0}")]
	Schema(#[from] SchemaError),
	/// The POST body is not valid `application/x-www-form-urlencoded`.
	#[error("malformed form body: {0}")]
	MalformedBody(#[from] serde_urlencoded::de::Error),
	/// The submission does not match the form schema.
	#[error("form submission rejected: {0}")]
	Bind(#[from] BindError),
}

pub type PageResult<T> = Result<T, PageError>;
