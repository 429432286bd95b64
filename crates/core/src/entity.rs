//! Entity trait: identity that survives state changes.

/// Something tracked by id rather than by value, like an inventory item that
/// keeps its id across shelf moves.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this entity is the one identified by `id`.
    fn is(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
