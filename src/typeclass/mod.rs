//! Type-class records for kinded carriers.
//!
//! Records are dictionaries keyed by a constructor marker (see
//! [`Instance`]). The capability ladder is:
//!
//! - [`Functor`]: `map`
//! - [`Applicative`]: `unit`, `ap`, `map2`
//! - [`Monad`]: `flat_map`
//! - [`MonadZero`]: `empty`, `filter`
//! - [`MonadPlus`]: `plus`, `plus_using`
//!
//! alongside the independent [`Foldable`], [`Traverse`] and [`Unfoldable`].
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not support higher-kinded types, so records take and return
//! [`Kind`](crate::kind::Kind) values whose marker's generic associated type
//! names the concrete carrier. Built-in markers implement their own records:
//!
//! ```rust
//! use kindred::carrier::OptionKind;
//! use kindred::kind::Kind;
//! use kindred::typeclass::{Applicative, Functor, Monad};
//!
//! let value = OptionKind.unit(20);
//! let value = OptionKind.map(|n| n + 1, value);
//! let value = OptionKind.flat_map(|n| Kind::from(Some(n * 2)), value);
//! assert_eq!(value.narrow(), Some(42));
//! ```

mod applicative;
mod foldable;
mod functor;
mod identity;
mod monad;
mod monad_plus;
mod monad_zero;
mod monoid;
mod traverse;
mod unfoldable;

pub use applicative::Applicative;
pub use foldable::Foldable;
pub use functor::{Functor, Instance};
pub use identity::Identity;
pub use monad::Monad;
pub use monad_plus::MonadPlus;
pub use monad_zero::MonadZero;
pub use monoid::{KindMonoid, Monoid, Semigroup, Sum};
pub use traverse::Traverse;
pub use unfoldable::Unfoldable;
