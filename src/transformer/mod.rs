//! Monad transformers: an inner shape lifted through any outer monad.
//!
//! A transformer wraps `Outer<Inner<A>>` and lets it be used as if it were
//! one flat carrier of `A`. The outer carrier is any record implementing
//! [`Monad`](crate::typeclass::Monad) (see [`Outer`]); the inner shape is
//! fixed per transformer:
//!
//! - [`OptionT`]: at most one `A` per outer element
//! - [`SeqT`]: a [`Seq`](crate::carrier::Seq) of `A` per outer element, with
//!   the full sequence surface lifted through the outer carrier
//!
//! # Semantics
//!
//! - The outer carrier's ordering is preserved exactly; inner operations run
//!   in the order the outer produces its elements.
//! - An empty inner is contained: it empties that outer element only.
//! - `on_empty*` and the other per-inner operations apply to each outer
//!   element separately.
//! - Windowing (`sliding`, `grouped*`) applies across the concatenation of
//!   all inners, in outer order, and needs a [`Foldable`](crate::typeclass::Foldable)
//!   outer.
//! - `SeqT::flat_map` binds lazily inside each inner, folding the outer of
//!   every returned transformer into the inner as it is traversed.
//! - Operations that must observe a whole inner (`cycle`, `sorted`,
//!   `shuffle`, `reverse`, ...) refuse inners not known to be finite with
//!   [`EngineError::CycleOnInfinite`](crate::EngineError::CycleOnInfinite) or
//!   [`EngineError::UnorderableInfinite`](crate::EngineError::UnorderableInfinite).
//!
//! Transformer values are immutable; every operation returns a new one.
//!
//! # Examples
//!
//! ```rust
//! use kindred::carrier::VecKind;
//! use kindred::kind::Kind;
//! use kindred::transformer::OptionT;
//!
//! let users = OptionT::new(VecKind, Kind::from(vec![Some("ada"), None, Some("grace")]));
//! let lengths = users.map(str::len).on_empty(0);
//! assert_eq!(lengths.run().narrow(), vec![Some(3), Some(0), Some(5)]);
//! ```

mod option_t;
mod seq_t;

pub use option_t::OptionT;
pub use seq_t::SeqT;

use crate::typeclass::Monad;

/// Outer monads a transformer can be built on.
///
/// The record is kept by value inside the transformer and cloned into the
/// closures it hands to the outer carrier.
pub trait Outer: Monad + Clone + Send + Sync + 'static {}

impl<M> Outer for M where M: Monad + Clone + Send + Sync + 'static {}
