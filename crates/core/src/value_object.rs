//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two values with the same attributes are
/// equal. A stock lot is a value object, while the catalog entry owning it is an
/// aggregate root with an [`EntryId`](crate::EntryId).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Lot {
///     quantity: i64,
/// }
///
/// impl ValueObject for Lot {}
///
/// assert_eq!(Lot { quantity: 3 }, Lot { quantity: 3 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
