//! Schema description, validation and binding
//!
//! This module provides access to `formwright-forms`:
//!
//! - **Models**: [`FormModel`] and the [`Describe`] registration API
//! - **Schema**: [`FormStructure`] and its path-addressed [`FormField`]s
//! - **Rules**: [`FieldRule`], [`RuleMap`] and inline hints
//! - **Binding**: [`bind`] producing a [`Binding`] with [`PathedMap`] snapshots

pub use formwright_forms::*;
