use core::cmp::Ordering;

use crate::identity::EntityTag;

/// The common contract of identity values.
///
/// An identity value is an immutable pair of a declared entity tag and a
/// canonical string. Equality and ordering are defined solely on that pair:
/// the concrete flavor that produced a value — a flake generator, an
/// adapter around an external token — never matters. The scope in which a
/// value uniquely identifies an entity (globally, one process run, one
/// node) is up to the producer.
pub trait Identity {
    /// The declared entity type of this value.
    fn tag(&self) -> EntityTag;

    /// The canonical string, which is also the wire form.
    fn value(&self) -> &str;

    /// Equal iff both the entity tag and the canonical string match.
    fn identity_eq(&self, other: &dyn Identity) -> bool {
        self.tag() == other.tag() && self.value() == other.value()
    }

    /// Orders by entity tag (canonical name) first, then by ordinal
    /// comparison of the canonical string.
    fn identity_cmp(&self, other: &dyn Identity) -> Ordering {
        self.tag()
            .cmp(&other.tag())
            .then_with(|| self.value().cmp(other.value()))
    }
}
