use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::identity::{EntityTag, Id, Identity};

/// Adapts an externally produced identifier — a UUID, a database key, an
/// upstream token — into the identity contract for entity type `E`.
///
/// The canonical string is captured at construction; the adaptee stays
/// available as a read-only attribute but takes no part in equality,
/// ordering, or hashing beyond that string form.
///
/// # Example
///
/// ```
/// use floe::{AdaptingId, Identity};
///
/// struct Session;
///
/// let id: AdaptingId<Session, u64> = AdaptingId::new(7100);
/// assert_eq!(id.value(), "7100");
/// assert_eq!(*id.adaptee(), 7100);
///
/// let hex: AdaptingId<Session, u64> = AdaptingId::with_stringifier(7100, |n| format!("{n:x}"));
/// assert_eq!(hex.value(), "1bbc");
/// ```
pub struct AdaptingId<E: ?Sized, X> {
    id: Id<E>,
    adaptee: X,
}

impl<E: ?Sized, X> AdaptingId<E, X> {
    /// Adapts `adaptee`, stringifying it through its [`fmt::Display`] impl.
    #[must_use]
    pub fn new(adaptee: X) -> Self
    where
        X: fmt::Display,
    {
        let value = adaptee.to_string();
        Self {
            id: Id::new(value),
            adaptee,
        }
    }

    /// Adapts `adaptee` with a caller-supplied stringifier, applied once at
    /// construction.
    #[must_use]
    pub fn with_stringifier(adaptee: X, stringify: impl FnOnce(&X) -> String) -> Self {
        let value = stringify(&adaptee);
        Self {
            id: Id::new(value),
            adaptee,
        }
    }

    /// The adapted external id.
    #[must_use]
    pub const fn adaptee(&self) -> &X {
        &self.adaptee
    }

    /// The canonical string of the id.
    #[must_use]
    pub fn value(&self) -> &str {
        self.id.value()
    }
}

impl<E: ?Sized, X> AsRef<Id<E>> for AdaptingId<E, X> {
    fn as_ref(&self) -> &Id<E> {
        &self.id
    }
}

impl<E: ?Sized + 'static, X> Identity for AdaptingId<E, X> {
    fn tag(&self) -> EntityTag {
        EntityTag::of::<E>()
    }

    fn value(&self) -> &str {
        self.id.value()
    }
}

impl<E: ?Sized, X: Clone> Clone for AdaptingId<E, X> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            adaptee: self.adaptee.clone(),
        }
    }
}

impl<E: ?Sized + 'static, X: fmt::Debug> fmt::Debug for AdaptingId<E, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptingId")
            .field("id", &self.id)
            .field("adaptee", &self.adaptee)
            .finish()
    }
}

impl<E: ?Sized + 'static, F: ?Sized + 'static, X, Y> PartialEq<AdaptingId<F, Y>>
    for AdaptingId<E, X>
{
    fn eq(&self, other: &AdaptingId<F, Y>) -> bool {
        self.id == other.id
    }
}

impl<E: ?Sized + 'static, X> Eq for AdaptingId<E, X> {}

impl<E: ?Sized + 'static, F: ?Sized + 'static, X, Y> PartialOrd<AdaptingId<F, Y>>
    for AdaptingId<E, X>
{
    fn partial_cmp(&self, other: &AdaptingId<F, Y>) -> Option<Ordering> {
        self.id.partial_cmp(&other.id)
    }
}

impl<E: ?Sized + 'static, X> Ord for AdaptingId<E, X> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<E: ?Sized + 'static, X> Hash for AdaptingId<E, X> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<E: ?Sized, X> fmt::Display for AdaptingId<E, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}
