//! Constructor markers and their identities.
//!
//! Rust has no higher-kinded types, so a type constructor such as `Option<_>`
//! cannot be named on its own. Instead each carrier family gets a zero-sized
//! marker type that implements [`Marker`]; the marker's generic associated
//! type `Carrier<A>` recovers the concrete carrier for any element type.
//!
//! # Example
//!
//! ```rust
//! use kindred::kind::{Marker, MarkerId};
//! use kindred::carrier::{OptionKind, VecKind};
//!
//! fn first<F: Marker>() -> &'static str {
//!     F::NAME
//! }
//!
//! assert_eq!(first::<OptionKind>(), "Option");
//! assert_ne!(MarkerId::of::<OptionKind>(), MarkerId::of::<VecKind>());
//! ```

use std::any::TypeId;
use std::hash::{Hash, Hasher};

use super::Kind;

/// Values that may flow through carriers.
///
/// Every element is cloneable and may cross threads, so every carrier built
/// from elements (and every [`Kind`]) is itself an `Element`. This is what
/// lets kinds nest, as in `Kind<G, Kind<F, B>>` produced by traversals.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Send + Sync + 'static {}

/// A nominal tag standing for a type constructor of arity one.
///
/// # Laws
///
/// A marker is associated one-to-one with a carrier family: two distinct
/// markers never share a [`MarkerId`], and `Carrier<A>` is the only shape a
/// `Kind<Self, A>` may hold.
pub trait Marker: Sized + Send + Sync + 'static {
    /// The concrete carrier this marker stands for, applied to `A`.
    type Carrier<A: Element>: Clone + Send + Sync + 'static;

    /// Human-readable family name, used in errors and logs.
    const NAME: &'static str;

    /// Returns the identity of this marker.
    #[inline]
    fn id() -> MarkerId {
        MarkerId::of::<Self>()
    }

    /// Tags a carrier with this marker.
    #[inline]
    fn widen<A: Element>(carrier: Self::Carrier<A>) -> Kind<Self, A> {
        Kind::widen(carrier)
    }

    /// Strips the marker from a kinded value.
    #[inline]
    fn narrow<A: Element>(kind: Kind<Self, A>) -> Self::Carrier<A> {
        kind.narrow()
    }
}

/// Runtime identity of a [`Marker`].
///
/// Two ids are equal exactly when they were taken from the same marker type;
/// the name is carried for diagnostics only.
#[derive(Debug, Clone, Copy)]
pub struct MarkerId {
    type_id: TypeId,
    name: &'static str,
}

impl MarkerId {
    /// Returns the id of marker `F`.
    #[inline]
    pub fn of<F: Marker>() -> Self {
        Self {
            type_id: TypeId::of::<F>(),
            name: F::NAME,
        }
    }

    /// The marker's family name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The `TypeId` of the marker type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for MarkerId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for MarkerId {}

impl Hash for MarkerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{IdentityKind, OptionKind, VecKind};
    use rstest::rstest;
    use rustc_hash::FxHashSet;

    #[rstest]
    fn ids_compare_by_marker_identity() {
        assert_eq!(OptionKind::id(), MarkerId::of::<OptionKind>());
        assert_ne!(OptionKind::id(), VecKind::id());
    }

    #[rstest]
    fn ids_hash_consistently_with_equality() {
        let mut seen = FxHashSet::default();
        seen.insert(OptionKind::id());
        seen.insert(OptionKind::id());
        seen.insert(IdentityKind::id());
        assert_eq!(seen.len(), 2);
    }

    #[rstest]
    fn id_displays_family_name() {
        assert_eq!(format!("{}", VecKind::id()), "Vec");
        assert_eq!(IdentityKind::id().name(), "Identity");
    }

    #[test]
    fn kinds_of_elements_are_elements() {
        fn assert_element<T: Element>() {}
        assert_element::<Kind<OptionKind, i32>>();
        assert_element::<Kind<VecKind, Kind<OptionKind, String>>>();
    }
}
