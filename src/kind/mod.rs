//! Kind encoding: carriers as first-class type constructors.
//!
//! - [`Marker`]: a zero-sized tag standing for a type constructor
//! - [`Kind`]: a carrier value branded with its marker
//! - [`DynKind`]: a kind whose marker is checked at runtime
//! - [`widen`] / [`narrow`]: free conversions between carriers and kinds
//!
//! # Examples
//!
//! ```rust
//! use kindred::kind::{narrow, widen, Kind};
//! use kindred::carrier::VecKind;
//!
//! let kind: Kind<VecKind, i32> = widen(vec![1, 2, 3]);
//! assert_eq!(narrow(kind), vec![1, 2, 3]);
//! ```

mod dynamic;
mod kinded;
mod marker;

pub use dynamic::DynKind;
pub use kinded::{Kind, narrow, widen};
pub use marker::{Element, Marker, MarkerId};
