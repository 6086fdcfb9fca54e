//! Built-in carriers and their constructor markers.
//!
//! | Marker           | Carrier       | Lineage  |
//! |------------------|---------------|----------|
//! | [`OptionKind`]   | `Option<A>`   | value    |
//! | [`IdentityKind`] | `Identity<A>` | value    |
//! | [`TaskKind`]     | [`Task<A>`]   | value (asynchronous) |
//! | [`VecKind`]      | `Vec<A>`      | sequence |
//! | [`SeqKind`]      | [`Seq<A>`]    | sequence (lazy, possibly infinite) |
//!
//! Each marker is a zero-sized type that is also its own default type-class
//! record, so `VecKind.map(f, kind)` needs no registry lookup.

mod identity;
mod option;
mod seq;
#[cfg(feature = "async")]
mod task;
mod vec;
pub(crate) mod window;

pub use identity::IdentityKind;
pub use option::OptionKind;
pub(crate) use seq::shared;
pub use seq::{Elements, Extent, Seq, SeqKind};
#[cfg(feature = "async")]
pub use task::{Task, TaskKind};
pub use vec::VecKind;
