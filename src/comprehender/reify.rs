#[cfg(feature = "async")]
use futures::stream::{BoxStream, StreamExt};

use super::{CarrierKey, Dynamic, Opaque, recover, unbox};
#[cfg(feature = "async")]
use crate::carrier::Task;
use crate::error::EngineError;
use crate::kind::Element;
use crate::typeclass::Identity;

/// Typed carriers that can be rebuilt from their erased form.
///
/// Synchronous carriers fail as a whole when an element cannot be
/// recovered. Asynchronous ones cannot fail up front, so they reify into
/// carriers of `Result` and report per element.
pub trait Reify: Sized + Send + 'static {
    /// The element type.
    type Element: Element;

    /// The key of the erased carrier this type is rebuilt from.
    fn carrier_key() -> CarrierKey;

    /// Rebuilds the typed carrier.
    ///
    /// # Errors
    ///
    /// [`EngineError::KindMismatch`] when `carrier` is not the erased form of
    /// `Self` or holds elements of another type, or the first engine error
    /// travelling in-band.
    fn reify(carrier: Opaque) -> Result<Self, EngineError>;
}

const OPERATION: &str = "Reify::reify";

impl<A: Element> Reify for Option<A> {
    type Element = A;

    fn carrier_key() -> CarrierKey {
        CarrierKey::of::<Option<Dynamic>>("Option")
    }

    fn reify(carrier: Opaque) -> Result<Self, EngineError> {
        unbox::<Option<Dynamic>>(carrier, "Option", OPERATION)?
            .map(|element| recover(element, OPERATION))
            .transpose()
    }
}

impl<A: Element> Reify for Vec<A> {
    type Element = A;

    fn carrier_key() -> CarrierKey {
        CarrierKey::of::<Vec<Dynamic>>("Vec")
    }

    fn reify(carrier: Opaque) -> Result<Self, EngineError> {
        unbox::<Vec<Dynamic>>(carrier, "Vec", OPERATION)?
            .into_iter()
            .map(|element| recover(element, OPERATION))
            .collect()
    }
}

impl<A: Element> Reify for Identity<A> {
    type Element = A;

    fn carrier_key() -> CarrierKey {
        CarrierKey::of::<Identity<Dynamic>>("Identity")
    }

    fn reify(carrier: Opaque) -> Result<Self, EngineError> {
        let Identity(element) = unbox::<Identity<Dynamic>>(carrier, "Identity", OPERATION)?;
        recover(element, OPERATION).map(Identity)
    }
}

#[cfg(feature = "async")]
impl<A: Element> Reify for Task<Result<A, EngineError>> {
    type Element = A;

    fn carrier_key() -> CarrierKey {
        CarrierKey::of::<Task<Dynamic>>("Task")
    }

    fn reify(carrier: Opaque) -> Result<Self, EngineError> {
        let task = unbox::<Task<Dynamic>>(carrier, "Task", OPERATION)?;
        Ok(Task::from_future(futures::FutureExt::map(task, |element| {
            recover(element, OPERATION)
        })))
    }
}

#[cfg(feature = "async")]
impl<A: Element> Reify for BoxStream<'static, Result<A, EngineError>> {
    type Element = A;

    fn carrier_key() -> CarrierKey {
        CarrierKey::of::<BoxStream<'static, Dynamic>>("Stream")
    }

    fn reify(carrier: Opaque) -> Result<Self, EngineError> {
        let elements = unbox::<BoxStream<'static, Dynamic>>(carrier, "Stream", OPERATION)?;
        Ok(elements.map(|element| recover(element, OPERATION)).boxed())
    }
}
