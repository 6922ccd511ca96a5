//! Typed accessors from a model root to each bindable location
//!
//! Every schema entry owns an accessor addressed from the root model type,
//! no matter how deep the field sits. Reads walk through `Option<Box<_>>`
//! levels and stop at the first empty one; writes allocate empty levels on
//! the way down.
//!
//! Accessors hold no mutable state, so a schema can be shared between
//! requests without synchronization.

use crate::error::AccessError;
use crate::value::{FieldValue, IntKind, ValueType};
use std::sync::Arc;

/// A scalar type a form field can be parsed into.
pub trait LeafType: Sized + Send + Sync + 'static {
	const VALUE_TYPE: ValueType;

	fn to_value(&self) -> FieldValue;

	/// Parse a submitted string. Blank input yields `Ok(None)`, meaning the
	/// destination is left untouched.
	fn parse(raw: &str) -> Result<Option<Self>, AccessError>;
}

impl LeafType for String {
	const VALUE_TYPE: ValueType = ValueType::String;

	fn to_value(&self) -> FieldValue {
		FieldValue::String(self.clone())
	}

	fn parse(raw: &str) -> Result<Option<Self>, AccessError> {
		if raw.is_empty() {
			Ok(None)
		} else {
			Ok(Some(raw.to_string()))
		}
	}
}

macro_rules! int_leaf {
	($($ty:ty => $kind:ident, $wide:ty, $variant:ident;)*) => {
		$(
			impl LeafType for $ty {
				const VALUE_TYPE: ValueType = ValueType::Int(IntKind::$kind);

				fn to_value(&self) -> FieldValue {
					FieldValue::$variant(*self as $wide)
				}

				fn parse(raw: &str) -> Result<Option<Self>, AccessError> {
					let trimmed = raw.trim();
					if trimmed.is_empty() {
						return Ok(None);
					}
					let wide = trimmed.parse::<$wide>().map_err(|_| AccessError::Parse {
						value: raw.to_string(),
						kind: IntKind::$kind,
					})?;
					<$ty>::try_from(wide)
						.map(Some)
						.map_err(|_| AccessError::OutOfRange {
							value: raw.to_string(),
							kind: IntKind::$kind,
						})
				}
			}
		)*
	};
}

int_leaf! {
	i8 => I8, i64, Int;
	i16 => I16, i64, Int;
	i32 => I32, i64, Int;
	i64 => I64, i64, Int;
	isize => Isize, i64, Int;
	u8 => U8, u64, Uint;
	u16 => U16, u64, Uint;
	u32 => U32, u64, Uint;
	u64 => U64, u64, Uint;
	usize => Usize, u64, Uint;
}

/// Storage of a leaf inside a model: the bare value or a nullable `Option`.
pub trait LeafSlot: Send + Sync + 'static {
	type Leaf: LeafType;
	const NULLABLE: bool;

	fn read(&self) -> Option<&Self::Leaf>;
	fn write(&mut self, value: Self::Leaf);
}

macro_rules! leaf_slot {
	($($ty:ty),*) => {
		$(
			impl LeafSlot for $ty {
				type Leaf = $ty;
				const NULLABLE: bool = false;

				fn read(&self) -> Option<&$ty> {
					Some(self)
				}

				fn write(&mut self, value: $ty) {
					*self = value;
				}
			}

			impl LeafSlot for Option<$ty> {
				type Leaf = $ty;
				const NULLABLE: bool = true;

				fn read(&self) -> Option<&$ty> {
					self.as_ref()
				}

				fn write(&mut self, value: $ty) {
					*self = Some(value);
				}
			}
		)*
	};
}

leaf_slot!(String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

type ReadFn<R, S> = dyn Fn(&R) -> Option<&S> + Send + Sync;
type WriteFn<R, S> = dyn Fn(&mut R) -> &mut S + Send + Sync;

/// Path from a root `R` to a nested level `S`.
pub struct Lens<R, S> {
	read: Arc<ReadFn<R, S>>,
	write: Arc<WriteFn<R, S>>,
}

impl<R, S> Clone for Lens<R, S> {
	fn clone(&self) -> Self {
		Self {
			read: Arc::clone(&self.read),
			write: Arc::clone(&self.write),
		}
	}
}

impl<R: 'static> Lens<R, R> {
	pub fn identity() -> Self {
		Lens::new(|root| Some(root), |root| root)
	}
}

impl<R: 'static, S: 'static> Lens<R, S> {
	pub fn new<F, G>(read: F, write: G) -> Self
	where
		F: Fn(&R) -> Option<&S> + Send + Sync + 'static,
		G: Fn(&mut R) -> &mut S + Send + Sync + 'static,
	{
		Self {
			read: Arc::new(read),
			write: Arc::new(write),
		}
	}

	/// The level, or `None` when an enclosing `Option` is empty.
	pub fn get<'a>(&self, root: &'a R) -> Option<&'a S> {
		(self.read)(root)
	}

	/// The level, allocating every empty enclosing `Option` on the way.
	pub fn get_mut<'a>(&self, root: &'a mut R) -> &'a mut S {
		(self.write)(root)
	}

	/// Extend the path through an `Option<Box<C>>` field of `S`.
	pub fn then_nested<C, G, M>(&self, get: G, get_mut: M) -> Lens<R, C>
	where
		C: Default + Send + Sync + 'static,
		G: Fn(&S) -> &Option<Box<C>> + Send + Sync + 'static,
		M: Fn(&mut S) -> &mut Option<Box<C>> + Send + Sync + 'static,
	{
		let read = Arc::clone(&self.read);
		let write = Arc::clone(&self.write);
		Lens::new(
			move |root| read(root).and_then(|level| get(level).as_deref()),
			move |root| {
				let slot = get_mut(write(root));
				&mut **slot.get_or_insert_with(|| Box::new(C::default()))
			},
		)
	}
}

/// Read and write access to one leaf, addressed from the root.
pub trait LeafAccess<R>: Send + Sync {
	/// Current value, or `None` when the leaf or an enclosing level is unset.
	fn get(&self, root: &R) -> Option<FieldValue>;

	/// Parse `raw` and store it. Blank input leaves the leaf untouched.
	fn set(&self, root: &mut R, raw: &str) -> Result<(), AccessError>;
}

/// Presence check and allocation of one nested level.
pub trait GroupAccess<R>: Send + Sync {
	fn is_present(&self, root: &R) -> bool;
	fn allocate(&self, root: &mut R);
}

pub(crate) struct SlotAccessor<R, S, V> {
	lens: Lens<R, S>,
	read: Arc<dyn Fn(&S) -> &V + Send + Sync>,
	write: Arc<dyn Fn(&mut S) -> &mut V + Send + Sync>,
}

impl<R: 'static, S: 'static, V: LeafSlot> SlotAccessor<R, S, V> {
	pub(crate) fn new<G, M>(lens: Lens<R, S>, read: G, write: M) -> Self
	where
		G: Fn(&S) -> &V + Send + Sync + 'static,
		M: Fn(&mut S) -> &mut V + Send + Sync + 'static,
	{
		Self {
			lens,
			read: Arc::new(read),
			write: Arc::new(write),
		}
	}
}

impl<R: 'static, S: 'static, V: LeafSlot> LeafAccess<R> for SlotAccessor<R, S, V> {
	fn get(&self, root: &R) -> Option<FieldValue> {
		let level = self.lens.get(root)?;
		(self.read)(level).read().map(|leaf| leaf.to_value())
	}

	fn set(&self, root: &mut R, raw: &str) -> Result<(), AccessError> {
		let Some(value) = V::Leaf::parse(raw)? else {
			return Ok(());
		};
		let level = self.lens.get_mut(root);
		(self.write)(level).write(value);
		Ok(())
	}
}

pub(crate) struct NestedAccessor<R, C> {
	lens: Lens<R, C>,
}

impl<R, C> NestedAccessor<R, C> {
	pub(crate) fn new(lens: Lens<R, C>) -> Self {
		Self { lens }
	}
}

impl<R: 'static, C: 'static> GroupAccess<R> for NestedAccessor<R, C> {
	fn is_present(&self, root: &R) -> bool {
		self.lens.get(root).is_some()
	}

	fn allocate(&self, root: &mut R) {
		self.lens.get_mut(root);
	}
}
