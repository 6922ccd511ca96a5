//! Per-type validation of submitted strings
//!
//! Each validator returns `Ok(())` or the message shown under the field.
//! The first failing check wins.

use crate::rules::FieldRule;
use crate::value::{IntKind, ValueType};

pub const REQUIRED_MESSAGE: &str = "required";
pub const INT_PARSE_MESSAGE: &str = "couldn't parse the given value as an integer";
pub const UINT_PARSE_MESSAGE: &str = "couldn't parse the given value as an unsigned integer";

/// Validate `raw` for a field of `value_type`.
pub fn validate(value_type: ValueType, raw: &str, rule: Option<&FieldRule>) -> Result<(), String> {
	match value_type {
		ValueType::String => validate_string(raw, rule),
		ValueType::Int(kind) => validate_integer(raw, kind, rule),
		ValueType::Struct => Ok(()),
	}
}

/// String checks, in order: minimum length, maximum length, required,
/// pattern. Lengths count characters, not bytes.
///
/// # Examples
///
/// ```
/// use formwright_forms::FieldRule;
/// use formwright_forms::validators::validate_string;
///
/// let rule = FieldRule::new().with_min(3.0).with_max(5.0);
/// assert!(validate_string("abc", Some(&rule)).is_ok());
/// assert_eq!(
/// 	validate_string("ab", Some(&rule)),
/// 	Err("must be at least 3 characters long".to_string())
/// );
/// ```
pub fn validate_string(raw: &str, rule: Option<&FieldRule>) -> Result<(), String> {
	let Some(rule) = rule else {
		return Ok(());
	};
	let char_count = raw.chars().count();

	if rule.has_min() && (char_count as f64) < rule.min {
		return Err(format!("must be at least {} characters long", rule.min));
	}
	if rule.has_max() && (char_count as f64) > rule.max {
		return Err(format!("must be at most {} characters long", rule.max));
	}
	if rule.required && raw.trim().is_empty() {
		return Err(REQUIRED_MESSAGE.to_string());
	}
	if !rule.matches(raw) {
		return Err(format!("must match the pattern {}", rule.regex_string()));
	}
	Ok(())
}

/// Integer checks: blank input, parsing as a 64-bit value, the declared
/// width, then the numeric bounds and the pattern.
///
/// # Examples
///
/// ```
/// use formwright_forms::{FieldRule, IntKind};
/// use formwright_forms::validators::validate_integer;
///
/// let rule = FieldRule::new().with_min(10.0);
/// assert_eq!(
/// 	validate_integer("7", IntKind::I64, Some(&rule)),
/// 	Err("must be at least 10".to_string())
/// );
/// assert!(validate_integer("", IntKind::I64, Some(&rule)).is_ok());
/// ```
pub fn validate_integer(raw: &str, kind: IntKind, rule: Option<&FieldRule>) -> Result<(), String> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return match rule {
			Some(rule) if rule.required => Err(REQUIRED_MESSAGE.to_string()),
			_ => Ok(()),
		};
	}

	let number = if kind.is_unsigned() {
		let n = trimmed
			.parse::<u64>()
			.map_err(|_| UINT_PARSE_MESSAGE.to_string())?;
		if n > kind.unsigned_max() {
			return Err(out_of_range(kind));
		}
		n as f64
	} else {
		let n = trimmed
			.parse::<i64>()
			.map_err(|_| INT_PARSE_MESSAGE.to_string())?;
		let (lo, hi) = kind.signed_range();
		if n < lo || n > hi {
			return Err(out_of_range(kind));
		}
		n as f64
	};

	let Some(rule) = rule else {
		return Ok(());
	};
	if rule.has_min() && number < rule.min {
		return Err(format!("must be at least {}", rule.min));
	}
	if rule.has_max() && number > rule.max {
		return Err(format!("must be at most {}", rule.max));
	}
	if !rule.matches(raw) {
		return Err(format!("must match the pattern {}", rule.regex_string()));
	}
	Ok(())
}

fn out_of_range(kind: IntKind) -> String {
	format!("value is out of range for {}", kind)
}
