//! Form engine settings
//!
//! Loaded from the `[forms]` table of a TOML settings file:
//!
//! ```toml
//! [forms]
//! strict_field_kinds = true
//! retain_values_on_success = false
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("invalid form settings: {0}")]
	Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Reject fields of kinds the engine cannot bind instead of skipping them.
	pub strict_field_kinds: bool,
	/// Keep the submitted strings for redisplay after a successful submission.
	pub retain_values_on_success: bool,
}

#[derive(Deserialize)]
struct SettingsFile {
	#[serde(default)]
	forms: FormSettings,
}

impl FormSettings {
	/// Parse settings from a TOML document. A missing `[forms]` table gives
	/// the defaults.
	///
	/// # Examples
	///
	/// ```
	/// use formwright_forms::FormSettings;
	///
	/// let settings = FormSettings::from_toml_str("[forms]\nstrict_field_kinds = true\n").unwrap();
	/// assert!(settings.strict_field_kinds);
	/// assert!(!settings.retain_values_on_success);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let file: SettingsFile = toml::from_str(source)?;
		Ok(file.forms)
	}
}
