//! The capabilities a marker may be registered for.

use std::fmt;

/// A type class a marker can have a record for.
///
/// Capabilities form a hierarchy: registering a record at a capability also
/// registers it at every capability [`implied`](Capability::implied) by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// `map`.
    Functor,
    /// `unit`, `ap`, `map2`.
    Applicative,
    /// `flat_map`.
    Monad,
    /// `empty`, `filter`.
    MonadZero,
    /// `plus` and its monoid.
    MonadPlus,
    /// `fold_left`, `fold_right`.
    Foldable,
    /// `traverse_a`.
    Traverse,
    /// `unfold`.
    Unfoldable,
}

impl Capability {
    /// Every capability, in hierarchy order.
    pub const ALL: [Self; 8] = [
        Self::Functor,
        Self::Applicative,
        Self::Monad,
        Self::MonadZero,
        Self::MonadPlus,
        Self::Foldable,
        Self::Traverse,
        Self::Unfoldable,
    ];

    /// This capability and every capability it extends.
    pub const fn implied(self) -> &'static [Self] {
        match self {
            Self::Functor => &[Self::Functor],
            Self::Applicative => &[Self::Functor, Self::Applicative],
            Self::Monad => &[Self::Functor, Self::Applicative, Self::Monad],
            Self::MonadZero => &[Self::Functor, Self::Applicative, Self::Monad, Self::MonadZero],
            Self::MonadPlus => &[
                Self::Functor,
                Self::Applicative,
                Self::Monad,
                Self::MonadZero,
                Self::MonadPlus,
            ],
            Self::Foldable => &[Self::Foldable],
            Self::Traverse => &[Self::Functor, Self::Foldable, Self::Traverse],
            Self::Unfoldable => &[Self::Unfoldable],
        }
    }

    /// The type-class name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Functor => "Functor",
            Self::Applicative => "Applicative",
            Self::Monad => "Monad",
            Self::MonadZero => "MonadZero",
            Self::MonadPlus => "MonadPlus",
            Self::Foldable => "Foldable",
            Self::Traverse => "Traverse",
            Self::Unfoldable => "Unfoldable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_capability_implies_itself() {
        for capability in Capability::ALL {
            assert!(capability.implied().contains(&capability), "{capability}");
        }
    }

    #[rstest]
    #[case(Capability::MonadPlus, Capability::Functor, true)]
    #[case(Capability::Traverse, Capability::Foldable, true)]
    #[case(Capability::Foldable, Capability::Functor, false)]
    #[case(Capability::Monad, Capability::MonadZero, false)]
    fn hierarchy(
        #[case] capability: Capability,
        #[case] other: Capability,
        #[case] expected: bool,
    ) {
        assert_eq!(capability.implied().contains(&other), expected);
    }
}
