//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An [`ItemName`]
/// or a [`Quantity`] has no identity of its own; two of them holding the same
/// value are interchangeable.
///
/// To "modify" a value object, build a new one (see [`Quantity::checked_add`]).
///
/// [`ItemName`]: crate::ItemName
/// [`Quantity`]: crate::Quantity
/// [`Quantity::checked_add`]: crate::Quantity::checked_add
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
