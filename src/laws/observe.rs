use std::fmt;

#[cfg(feature = "async")]
use crate::carrier::TaskKind;
use crate::carrier::{IdentityKind, OptionKind, SeqKind, VecKind};
use crate::kind::{Element, Kind, Marker};
use crate::typeclass::Identity;

/// How many elements of a [`Seq`](crate::carrier::Seq) an observation looks
/// at. Infinite sequences are compared on this prefix.
pub const SEQ_PREFIX: usize = 256;

/// Element types a law check can compare and report.
pub trait Comparable: Element + PartialEq + fmt::Debug {}

impl<T> Comparable for T where T: Element + PartialEq + fmt::Debug {}

/// A way to look inside a kinded value without consuming it.
///
/// Two kinds are considered equal by the law checks when their observations
/// are equal. Carriers without structural equality (lazy sequences, tasks)
/// pick an observation that is cheap and never blocks.
pub trait Observe: Marker {
    /// What an observation of `Kind<Self, A>` produces.
    type Observation<A: Comparable>: Comparable;

    /// Observes `kind`.
    fn observe<A: Comparable>(kind: &Kind<Self, A>) -> Self::Observation<A>;
}

impl Observe for OptionKind {
    type Observation<A: Comparable> = Option<A>;

    fn observe<A: Comparable>(kind: &Kind<Self, A>) -> Option<A> {
        kind.as_carrier().clone()
    }
}

impl Observe for VecKind {
    type Observation<A: Comparable> = Vec<A>;

    fn observe<A: Comparable>(kind: &Kind<Self, A>) -> Vec<A> {
        kind.as_carrier().clone()
    }
}

impl Observe for IdentityKind {
    type Observation<A: Comparable> = Identity<A>;

    fn observe<A: Comparable>(kind: &Kind<Self, A>) -> Identity<A> {
        kind.as_carrier().clone()
    }
}

impl Observe for SeqKind {
    type Observation<A: Comparable> = Vec<A>;

    /// The first [`SEQ_PREFIX`] elements.
    fn observe<A: Comparable>(kind: &Kind<Self, A>) -> Vec<A> {
        kind.as_carrier().iter().take(SEQ_PREFIX).collect()
    }
}

#[cfg(feature = "async")]
impl Observe for TaskKind {
    type Observation<A: Comparable> = Option<A>;

    /// The value if the task completes without waiting; a pending task is
    /// observed as `None`.
    fn observe<A: Comparable>(kind: &Kind<Self, A>) -> Option<A> {
        kind.as_carrier().peek_value()
    }
}
