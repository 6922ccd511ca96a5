//! Value kinds a form field can hold

use serde::Serialize;
use std::fmt;

/// Exact integer width of a field.
///
/// Kept on the schema so a parsed value is stored back with the width the
/// model declared, not as a generic wide integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntKind {
	I8,
	I16,
	I32,
	I64,
	Isize,
	U8,
	U16,
	U32,
	U64,
	Usize,
}

impl IntKind {
	pub fn is_unsigned(self) -> bool {
		matches!(
			self,
			IntKind::U8 | IntKind::U16 | IntKind::U32 | IntKind::U64 | IntKind::Usize
		)
	}

	/// Number of bits of the declared storage.
	pub fn bits(self) -> u32 {
		match self {
			IntKind::I8 | IntKind::U8 => 8,
			IntKind::I16 | IntKind::U16 => 16,
			IntKind::I32 | IntKind::U32 => 32,
			IntKind::I64 | IntKind::U64 => 64,
			IntKind::Isize | IntKind::Usize => usize::BITS,
		}
	}

	/// Inclusive bounds of a signed width, widened to `i64`.
	pub(crate) fn signed_range(self) -> (i64, i64) {
		match self {
			IntKind::I8 => (i8::MIN.into(), i8::MAX.into()),
			IntKind::I16 => (i16::MIN.into(), i16::MAX.into()),
			IntKind::I32 => (i32::MIN.into(), i32::MAX.into()),
			IntKind::Isize => (isize::MIN as i64, isize::MAX as i64),
			_ => (i64::MIN, i64::MAX),
		}
	}

	/// Upper bound of an unsigned width, widened to `u64`.
	pub(crate) fn unsigned_max(self) -> u64 {
		match self {
			IntKind::U8 => u8::MAX.into(),
			IntKind::U16 => u16::MAX.into(),
			IntKind::U32 => u32::MAX.into(),
			IntKind::Usize => usize::MAX as u64,
			_ => u64::MAX,
		}
	}
}

impl fmt::Display for IntKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let article = if self.bits() == 8 { "an" } else { "a" };
		if self.is_unsigned() {
			write!(f, "{} {}-bit unsigned integer", article, self.bits())
		} else {
			write!(f, "{} {}-bit integer", article, self.bits())
		}
	}
}

/// Classification of a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "width", rename_all = "lowercase")]
pub enum ValueType {
	String,
	Int(IntKind),
	Struct,
}

impl ValueType {
	pub fn is_leaf(self) -> bool {
		!matches!(self, ValueType::Struct)
	}

	/// The value a leaf of this type holds when nothing was set.
	pub fn zero_value(self) -> Option<FieldValue> {
		match self {
			ValueType::String => Some(FieldValue::String(String::new())),
			ValueType::Int(kind) if kind.is_unsigned() => Some(FieldValue::Uint(0)),
			ValueType::Int(_) => Some(FieldValue::Int(0)),
			ValueType::Struct => None,
		}
	}
}

/// A leaf value read out of a model instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
	String(String),
	Int(i64),
	Uint(u64),
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldValue::String(s) => f.write_str(s),
			FieldValue::Int(n) => write!(f, "{}", n),
			FieldValue::Uint(n) => write!(f, "{}", n),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::String(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::String(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(IntKind::I16, "a 16-bit integer")]
	#[case(IntKind::U64, "a 64-bit unsigned integer")]
	#[case(IntKind::U8, "an 8-bit unsigned integer")]
	fn test_int_kind_display(#[case] kind: IntKind, #[case] expected: &str) {
		assert_eq!(kind.to_string(), expected);
	}

	#[rstest]
	fn test_zero_values() {
		assert_eq!(
			ValueType::String.zero_value(),
			Some(FieldValue::String(String::new()))
		);
		assert_eq!(
			ValueType::Int(IntKind::I32).zero_value(),
			Some(FieldValue::Int(0))
		);
		assert_eq!(
			ValueType::Int(IntKind::U16).zero_value(),
			Some(FieldValue::Uint(0))
		);
		assert_eq!(ValueType::Struct.zero_value(), None);
	}

	#[rstest]
	fn test_signed_range_matches_width() {
		assert_eq!(IntKind::I8.signed_range(), (-128, 127));
		assert_eq!(IntKind::U16.unsigned_max(), 65535);
	}
}
