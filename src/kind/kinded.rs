//! The branded wrapper `Kind<F, A>`.

use std::marker::PhantomData;

use super::{DynKind, Element, Marker, MarkerId};
use crate::error::EngineError;

/// A carrier value tagged with its constructor marker.
///
/// `Kind<F, A>` holds exactly an `F::Carrier<A>`; the marker lives only in
/// the type. Conversions in both directions are free:
///
/// ```text
/// narrow(widen(c)) == c
/// widen(narrow(k)) == k
/// ```
///
/// # Examples
///
/// ```rust
/// use kindred::kind::Kind;
/// use kindred::carrier::OptionKind;
///
/// let kind: Kind<OptionKind, i32> = Kind::from(Some(3));
/// assert_eq!(kind.narrow(), Some(3));
/// ```
pub struct Kind<F: Marker, A: Element> {
    carrier: F::Carrier<A>,
    marker: PhantomData<fn() -> F>,
}

impl<F: Marker, A: Element> Kind<F, A> {
    /// Tags `carrier` with the marker `F`.
    #[inline]
    pub const fn widen(carrier: F::Carrier<A>) -> Self {
        Self {
            carrier,
            marker: PhantomData,
        }
    }

    /// Tags a carrier that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidKind`] when `carrier` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::kind::Kind;
    /// use kindred::carrier::VecKind;
    ///
    /// let absent: Option<Vec<i32>> = None;
    /// assert!(Kind::<VecKind, i32>::try_widen(absent).is_err());
    /// ```
    pub fn try_widen(carrier: Option<F::Carrier<A>>) -> Result<Self, EngineError> {
        carrier.map(Self::widen).ok_or(EngineError::InvalidKind {
            marker: F::NAME,
            operation: "try_widen",
        })
    }

    /// Removes the marker, giving back the concrete carrier.
    #[inline]
    pub fn narrow(self) -> F::Carrier<A> {
        self.carrier
    }

    /// Borrows the concrete carrier.
    #[inline]
    pub const fn as_carrier(&self) -> &F::Carrier<A> {
        &self.carrier
    }

    /// Narrows and hands the carrier to `function`.
    #[inline]
    pub fn convert<R, Function>(self, function: Function) -> R
    where
        Function: FnOnce(F::Carrier<A>) -> R,
    {
        function(self.carrier)
    }

    /// The identity of this value's marker.
    #[inline]
    pub fn marker_id(&self) -> MarkerId {
        F::id()
    }

    /// Erases the marker into a runtime-tagged [`DynKind`].
    #[inline]
    pub fn erase(self) -> DynKind {
        DynKind::erase(self)
    }
}

impl<F: Marker, A: Element> Clone for Kind<F, A> {
    fn clone(&self) -> Self {
        Self::widen(self.carrier.clone())
    }
}

impl<F, A> PartialEq for Kind<F, A>
where
    F: Marker,
    A: Element,
    F::Carrier<A>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.carrier == other.carrier
    }
}

impl<F, A> Eq for Kind<F, A>
where
    F: Marker,
    A: Element,
    F::Carrier<A>: Eq,
{
}

impl<F, A> std::fmt::Debug for Kind<F, A>
where
    F: Marker,
    A: Element,
    F::Carrier<A>: std::fmt::Debug,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_tuple("Kind")
            .field(&F::NAME)
            .field(&self.carrier)
            .finish()
    }
}

/// Tags `carrier` with the marker `F`.
#[inline]
pub const fn widen<F: Marker, A: Element>(carrier: F::Carrier<A>) -> Kind<F, A> {
    Kind::widen(carrier)
}

/// Strips the marker from `kind`.
#[inline]
pub fn narrow<F: Marker, A: Element>(kind: Kind<F, A>) -> F::Carrier<A> {
    kind.narrow()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{IdentityKind, OptionKind, VecKind};
    use crate::typeclass::Identity;
    use rstest::rstest;

    #[rstest]
    #[case(Some(5))]
    #[case(None)]
    fn narrow_after_widen_is_identity(#[case] carrier: Option<i32>) {
        let kind: Kind<OptionKind, i32> = widen(carrier);
        assert_eq!(narrow(kind), carrier);
    }

    #[rstest]
    fn widen_after_narrow_is_identity() {
        let kind: Kind<VecKind, i32> = Kind::from(vec![1, 2, 3]);
        let again: Kind<VecKind, i32> = widen(kind.clone().narrow());
        assert_eq!(again, kind);
    }

    #[rstest]
    fn try_widen_rejects_absent_carrier() {
        let result = Kind::<IdentityKind, i32>::try_widen(None);
        assert_eq!(
            result.unwrap_err(),
            EngineError::InvalidKind {
                marker: "Identity",
                operation: "try_widen",
            }
        );
    }

    #[rstest]
    fn try_widen_accepts_present_carrier() {
        let result = Kind::<IdentityKind, i32>::try_widen(Some(Identity(4)));
        assert_eq!(result.map(Kind::narrow), Ok(Identity(4)));
    }

    #[rstest]
    fn convert_passes_the_carrier() {
        let kind: Kind<OptionKind, &'static str> = Kind::from(Some("hello"));
        assert_eq!(kind.convert(|option| option.map(str::len)), Some(5));
    }

    #[rstest]
    fn debug_names_the_marker() {
        let kind: Kind<OptionKind, i32> = Kind::from(Some(1));
        assert_eq!(format!("{kind:?}"), "Kind(\"Option\", Some(1))");
    }
}
