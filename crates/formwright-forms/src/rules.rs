//! Field validation rules and their resolution
//!
//! A rule comes from one of two places, checked in order:
//!
//! 1. An explicit [`RuleMap`] handed to the schema builder, keyed by the
//!    declared field name (with sub-maps for nested structures).
//! 2. The inline hint declared next to the field, written as
//!    `required,min=2,max=10,regex=<url-escaped pattern>`.
//!
//! `min` and `max` bound the character count of string fields and the
//! numeric value of integer fields. A bound of `0` means "no bound".

use crate::error::HintError;
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FieldRule {
	pub required: bool,
	pub min: f64,
	pub max: f64,
	pattern: Option<RulePattern>,
}

#[derive(Debug, Clone)]
struct RulePattern {
	source: String,
	anchored: Regex,
}

impl FieldRule {
	pub fn new() -> Self {
		Self::default()
	}

	/// Mark the field as required.
	///
	/// # Examples
	///
	/// ```
	/// use formwright_forms::FieldRule;
	///
	/// let rule = FieldRule::new().required();
	/// assert!(rule.required);
	/// ```
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = min;
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = max;
		self
	}

	/// Attach a pattern the whole value must match.
	///
	/// # Examples
	///
	/// ```
	/// use formwright_forms::FieldRule;
	///
	/// let rule = FieldRule::new().with_regex("[A-Z]{3}").unwrap();
	/// assert!(rule.matches("ABC"));
	/// assert!(!rule.matches("xABCx"));
	/// assert_eq!(rule.regex_string(), "[A-Z]{3}");
	/// ```
	pub fn with_regex(mut self, pattern: &str) -> Result<Self, regex::Error> {
		let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
		self.pattern = Some(RulePattern {
			source: pattern.to_string(),
			anchored,
		});
		Ok(self)
	}

	/// The pattern as declared, or an empty string when there is none.
	pub fn regex_string(&self) -> &str {
		self.pattern.as_ref().map_or("", |p| p.source.as_str())
	}

	pub fn has_regex(&self) -> bool {
		self.pattern.is_some()
	}

	/// Whether `value` satisfies the pattern. Always true without one.
	pub fn matches(&self, value: &str) -> bool {
		self.pattern
			.as_ref()
			.is_none_or(|p| p.anchored.is_match(value))
	}

	pub fn has_min(&self) -> bool {
		self.min != 0.0
	}

	pub fn has_max(&self) -> bool {
		self.max != 0.0
	}
}

impl PartialEq for FieldRule {
	fn eq(&self, other: &Self) -> bool {
		self.required == other.required
			&& self.min == other.min
			&& self.max == other.max
			&& self.regex_string() == other.regex_string()
	}
}

/// Parse an inline rule hint.
///
/// Returns `Ok(None)` for an empty hint. Unknown keys are ignored with a
/// warning. `required` takes no value; `min`, `max` and `regex` need a
/// well-formed one.
///
/// # Examples
///
/// ```
/// use formwright_forms::rules::parse_hint;
///
/// let rule = parse_hint("required,min=2,max=10").unwrap().unwrap();
/// assert!(rule.required);
/// assert_eq!(rule.min, 2.0);
/// assert_eq!(rule.max, 10.0);
///
/// let rule = parse_hint("regex=%5Ea%2Bb%24").unwrap().unwrap();
/// assert_eq!(rule.regex_string(), "^a+b$");
///
/// assert!(parse_hint("").unwrap().is_none());
/// assert!(parse_hint("min=two").is_err());
/// ```
pub fn parse_hint(hint: &str) -> Result<Option<FieldRule>, HintError> {
	let mut rule = FieldRule::new();
	let mut seen_any = false;

	for part in hint.split(',').map(str::trim).filter(|p| !p.is_empty()) {
		let (key, value) = match part.split_once('=') {
			Some((k, v)) => (k.trim(), Some(v.trim())),
			None => (part, None),
		};
		match (key, value) {
			("required", None) => rule.required = true,
			("required", Some(v)) => {
				return Err(HintError::UnexpectedValue {
					key: key.to_string(),
					value: v.to_string(),
				});
			}
			("min" | "max" | "regex", None | Some("")) => {
				return Err(HintError::MissingValue {
					key: key.to_string(),
				});
			}
			("min", Some(v)) => rule.min = parse_bound(key, v)?,
			("max", Some(v)) => rule.max = parse_bound(key, v)?,
			("regex", Some(v)) => {
				let pattern =
					urlencoding::decode(v).map_err(|_| HintError::InvalidEscape(v.to_string()))?;
				rule = rule.with_regex(&pattern)?;
			}
			_ => {
				tracing::warn!("ignoring unknown rule hint `{}`", part);
				continue;
			}
		}
		seen_any = true;
	}

	Ok(seen_any.then_some(rule))
}

fn parse_bound(key: &str, value: &str) -> Result<f64, HintError> {
	value.parse::<f64>().map_err(|_| HintError::InvalidNumber {
		key: key.to_string(),
		value: value.to_string(),
	})
}

/// Entry of an explicit [`RuleMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum RuleEntry {
	Rule(FieldRule),
	Nested(RuleMap),
}

/// Explicit rules keyed by declared field name.
///
/// # Examples
///
/// ```
/// use formwright_forms::{FieldRule, RuleMap};
///
/// let rules = RuleMap::new()
/// 	.rule("Name", FieldRule::new().required().with_min(2.0))
/// 	.nested("Sub", RuleMap::new().rule("SubField", FieldRule::new().required()));
///
/// assert!(rules.get_rule("Name").unwrap().required);
/// assert!(rules.get_nested("Sub").unwrap().get_rule("SubField").is_some());
/// assert!(rules.get_rule("Sub").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMap {
	entries: HashMap<String, RuleEntry>,
}

impl RuleMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn rule(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
		self.entries.insert(name.into(), RuleEntry::Rule(rule));
		self
	}

	pub fn nested(mut self, name: impl Into<String>, rules: RuleMap) -> Self {
		self.entries.insert(name.into(), RuleEntry::Nested(rules));
		self
	}

	pub fn get(&self, name: &str) -> Option<&RuleEntry> {
		self.entries.get(name)
	}

	pub fn get_rule(&self, name: &str) -> Option<&FieldRule> {
		match self.entries.get(name)? {
			RuleEntry::Rule(rule) => Some(rule),
			RuleEntry::Nested(_) => None,
		}
	}

	pub fn get_nested(&self, name: &str) -> Option<&RuleMap> {
		match self.entries.get(name)? {
			RuleEntry::Nested(rules) => Some(rules),
			RuleEntry::Rule(_) => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Resolve the rule of one declared field.
///
/// An explicit rule wins verbatim; otherwise the inline hint is parsed.
pub fn resolve_rule(
	name: &str,
	hint: Option<&str>,
	rules: Option<&RuleMap>,
) -> Result<Option<FieldRule>, HintError> {
	if let Some(rule) = rules.and_then(|r| r.get_rule(name)) {
		return Ok(Some(rule.clone()));
	}
	match hint {
		Some(hint) => parse_hint(hint),
		None => Ok(None),
	}
}
