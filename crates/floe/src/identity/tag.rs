use core::any::{self, TypeId};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// The declared entity type of an identity value.
///
/// Two tags are equal when they name the same Rust type. Ordering uses the
/// canonical type name, so identifiers for different entities sort
/// deterministically regardless of which generator produced them.
#[derive(Debug, Clone, Copy)]
pub struct EntityTag {
    type_id: TypeId,
    name: &'static str,
}

impl EntityTag {
    /// The tag for entity type `E`.
    #[must_use]
    pub fn of<E: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            name: any::type_name::<E>(),
        }
    }

    /// The canonical name of the entity type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for EntityTag {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityTag {}

impl PartialOrd for EntityTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityTag {
    fn cmp(&self, other: &Self) -> Ordering {
        // Name first; the type id tiebreaker keeps the ordering consistent
        // with equality should two distinct types ever render the same name.
        self.name
            .cmp(other.name)
            .then_with(|| self.type_id.cmp(&other.type_id))
    }
}

impl Hash for EntityTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
