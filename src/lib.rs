//! # kindred
//!
//! Higher-kinded abstractions, runtime carrier dispatch and monad
//! transformers for Rust.
//!
//! ## Overview
//!
//! Rust has no type constructors as type parameters. This crate encodes
//! them and builds a small functional engine on top:
//!
//! - **Kinds**: a zero-sized [`Marker`](kind::Marker) per carrier family and
//!   [`Kind<F, A>`](kind::Kind), a carrier value branded with its marker
//! - **Type Classes**: Functor, Applicative, Monad, `MonadZero`, `MonadPlus`,
//!   Foldable, Traverse, Unfoldable, as records passed by reference
//! - **Carriers**: `Option`, `Vec`, `Identity`, the lazy replayable
//!   [`Seq`](carrier::Seq), and the shared asynchronous
//!   [`Task`](carrier::Task)
//! - **Registry**: a sealed map from marker and capability to records
//! - **Comprehenders**: `map`/`flat_map`/`filter` for carriers known only at
//!   runtime, resolved by type with a walk over declared ancestors
//! - **`AnyM`**: one monadic surface over every comprehended carrier
//! - **Transformers**: [`OptionT`](transformer::OptionT) and
//!   [`SeqT`](transformer::SeqT) over any outer monad
//! - **Laws**: executable checks of the algebraic laws
//!
//! ## Feature Flags
//!
//! - `async`: [`Task`](carrier::Task), future and stream carriers (uses
//!   `futures`)
//! - `laws`: the [`laws`] module
//! - `full`: Enable all features
//!
//! Both `async` and `laws` are on by default.
//!
//! ## Example
//!
//! ```rust
//! use kindred::prelude::*;
//!
//! let words: Kind<VecKind, &str> = Kind::from(vec!["kind", "red"]);
//! let lengths = VecKind.map(str::len, words);
//! assert_eq!(lengths.narrow(), vec![4, 3]);
//!
//! let nested = SeqT::from_vecs(OptionKind, Kind::from(Some(vec![1, 2, 3])));
//! let doubled = nested.map(|n| n * 2).to_vecs();
//! assert_eq!(doubled.narrow(), Some(vec![2, 4, 6]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the kind encoding, every type class, the built-in markers,
/// `AnyM` and the transformers.
///
/// # Usage
///
/// ```rust
/// use kindred::prelude::*;
/// ```
pub mod prelude {
    pub use crate::anym::{AnyM, AnyMSeq, AnyMValue};
    pub use crate::carrier::*;
    pub use crate::error::EngineError;
    pub use crate::kind::{DynKind, Element, Kind, Marker, narrow, widen};
    pub use crate::transformer::{OptionT, SeqT};
    pub use crate::typeclass::*;
}

pub mod anym;
pub mod carrier;
pub mod comprehender;
pub mod error;
pub mod kind;
pub mod registry;
pub mod transformer;
pub mod typeclass;

#[cfg(feature = "laws")]
pub mod laws;

pub use error::{EngineError, ErrorCategory};
