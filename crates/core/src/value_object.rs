//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute
/// values. A `Quantity(2)` is interchangeable with any other `Quantity(2)`,
/// whereas two items named "Carrot" are distinct entities.
///
/// To "modify" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
