use std::any::{Any, type_name};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::Capability;
use crate::carrier::{IdentityKind, OptionKind, SeqKind, VecKind};
#[cfg(feature = "async")]
use crate::carrier::TaskKind;
use crate::error::EngineError;
use crate::kind::{Marker, MarkerId};
use crate::typeclass::{
    Applicative, Foldable, Functor, Instance, Monad, MonadPlus, MonadZero, Traverse, Unfoldable,
};

/// A type-erased record as stored in the registry.
pub type Record = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
struct Registered {
    record: Record,
    record_type: &'static str,
}

#[derive(Clone, Default)]
struct Entry {
    name: &'static str,
    records: FxHashMap<Capability, Registered>,
}

/// Collects records before sealing them into an [`InstanceRegistry`].
///
/// Registering at a capability also registers the same record at every
/// capability it implies, so a `MonadPlus` registration answers `Functor`
/// lookups too. Registering twice at the same capability keeps the later
/// record.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::OptionKind;
/// use kindred::kind::Marker;
/// use kindred::registry::{Capability, RegistryBuilder};
///
/// let registry = RegistryBuilder::new().register_monad_plus(OptionKind).build();
/// assert!(registry.supports(OptionKind::id(), Capability::Functor));
/// assert!(!registry.supports(OptionKind::id(), Capability::Foldable));
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    entries: FxHashMap<MarkerId, Entry>,
}

impl RegistryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder holding the records of every built-in marker.
    pub fn with_defaults() -> Self {
        let builder = Self::new()
            .register_monad_plus(OptionKind)
            .register_traverse(OptionKind)
            .register_unfoldable(OptionKind)
            .register_monad_plus(VecKind)
            .register_traverse(VecKind)
            .register_unfoldable(VecKind)
            .register_monad(IdentityKind)
            .register_traverse(IdentityKind)
            .register_monad_plus(SeqKind)
            .register_foldable(SeqKind)
            .register_unfoldable(SeqKind);
        #[cfg(feature = "async")]
        let builder = builder.register_monad_plus(TaskKind).register_traverse(TaskKind);
        builder
    }

    /// Registers a `Functor` record.
    #[must_use]
    pub fn register_functor<R: Functor + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::Functor, record)
    }

    /// Registers an `Applicative` record, and `Functor` with it.
    #[must_use]
    pub fn register_applicative<R: Applicative + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::Applicative, record)
    }

    /// Registers a `Monad` record, and everything below it.
    #[must_use]
    pub fn register_monad<R: Monad + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::Monad, record)
    }

    /// Registers a `MonadZero` record, and everything below it.
    #[must_use]
    pub fn register_monad_zero<R: MonadZero + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::MonadZero, record)
    }

    /// Registers a `MonadPlus` record, and everything below it.
    #[must_use]
    pub fn register_monad_plus<R: MonadPlus + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::MonadPlus, record)
    }

    /// Registers a `Foldable` record.
    #[must_use]
    pub fn register_foldable<R: Foldable + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::Foldable, record)
    }

    /// Registers a `Traverse` record, with `Functor` and `Foldable`.
    #[must_use]
    pub fn register_traverse<R: Traverse + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::Traverse, record)
    }

    /// Registers an `Unfoldable` record.
    #[must_use]
    pub fn register_unfoldable<R: Unfoldable + Send + Sync + 'static>(self, record: R) -> Self {
        self.insert(Capability::Unfoldable, record)
    }

    fn insert<R: Instance + Send + Sync + 'static>(
        mut self,
        capability: Capability,
        record: R,
    ) -> Self {
        let marker = <R::Marker as Marker>::id();
        let record: Record = Arc::new(record);
        let entry = self.entries.entry(marker).or_insert_with(|| Entry {
            name: marker.name(),
            records: FxHashMap::default(),
        });
        for implied in capability.implied() {
            let registered = Registered {
                record: Arc::clone(&record),
                record_type: type_name::<R>(),
            };
            if entry.records.insert(*implied, registered).is_some() {
                debug!(
                    marker = entry.name,
                    capability = %implied,
                    record = type_name::<R>(),
                    "replaced record"
                );
            }
        }
        debug!(marker = entry.name, %capability, record = type_name::<R>(), "registered record");
        self
    }

    /// Seals the builder.
    pub fn build(self) -> InstanceRegistry {
        debug!(markers = self.entries.len(), "sealed instance registry");
        InstanceRegistry {
            entries: Arc::new(self.entries),
        }
    }
}

/// An immutable map from `(marker, capability)` to type-class records.
///
/// Cloning is cheap and every clone sees the same records.
#[derive(Clone)]
pub struct InstanceRegistry {
    entries: Arc<FxHashMap<MarkerId, Entry>>,
}

impl InstanceRegistry {
    /// The record of type `R` registered for `R`'s marker at `capability`.
    ///
    /// Returns `None` when nothing is registered there or the record there is
    /// of another type.
    pub fn lookup<R: Instance + Send + Sync + 'static>(
        &self,
        capability: Capability,
    ) -> Option<Arc<R>> {
        self.require::<R>(capability).ok()
    }

    /// Like [`lookup`](Self::lookup), reporting why nothing was found.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingInstance`] when no record is registered at
    /// `capability`, [`EngineError::KindMismatch`] when the record there is
    /// not an `R`.
    pub fn require<R: Instance + Send + Sync + 'static>(
        &self,
        capability: Capability,
    ) -> Result<Arc<R>, EngineError> {
        let marker = <R::Marker as Marker>::id();
        let registered = self.registered(marker, capability).ok_or(EngineError::MissingInstance {
            marker: marker.name(),
            capability,
            operation: "InstanceRegistry::require",
        })?;
        Arc::clone(&registered.record).downcast::<R>().map_err(|_| {
            trace!(marker = marker.name(), %capability, "record has another type");
            EngineError::KindMismatch {
                expected: type_name::<R>(),
                found: registered.record_type,
                operation: "InstanceRegistry::require",
            }
        })
    }

    /// The type-erased record for `marker` at `capability`.
    pub fn lookup_erased(&self, marker: MarkerId, capability: Capability) -> Option<Record> {
        self.registered(marker, capability)
            .map(|registered| Arc::clone(&registered.record))
    }

    fn registered(&self, marker: MarkerId, capability: Capability) -> Option<&Registered> {
        self.entries.get(&marker)?.records.get(&capability)
    }

    /// Whether `marker` has a record at `capability`.
    pub fn supports(&self, marker: MarkerId, capability: Capability) -> bool {
        self.registered(marker, capability).is_some()
    }

    /// Every capability `marker` has a record for, in hierarchy order.
    pub fn capabilities(&self, marker: MarkerId) -> Vec<Capability> {
        let mut capabilities: Vec<Capability> = self
            .entries
            .get(&marker)
            .map(|entry| entry.records.keys().copied().collect())
            .unwrap_or_default();
        capabilities.sort_unstable();
        capabilities
    }

    /// Every marker with at least one record, sorted by name.
    pub fn markers(&self) -> Vec<MarkerId> {
        let mut markers: Vec<MarkerId> = self.entries.keys().copied().collect();
        markers.sort_unstable_by_key(MarkerId::name);
        markers
    }
}

static_assertions::assert_impl_all!(InstanceRegistry: Send, Sync, Clone);

impl std::fmt::Debug for InstanceRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = formatter.debug_map();
        for marker in self.markers() {
            map.entry(&marker.name(), &self.capabilities(marker));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy)]
    struct FirstWins;

    impl Instance for FirstWins {
        type Marker = OptionKind;
    }

    impl Foldable for FirstWins {
        fn fold_left<A, B, Function>(
            &self,
            init: B,
            function: Function,
            value: crate::kind::Kind<OptionKind, A>,
        ) -> B
        where
            A: crate::kind::Element,
            Function: FnMut(B, A) -> B,
        {
            OptionKind.fold_left(init, function, value)
        }

        fn fold_right<A, B, Function>(
            &self,
            init: B,
            function: Function,
            value: crate::kind::Kind<OptionKind, A>,
        ) -> B
        where
            A: crate::kind::Element,
            Function: FnMut(A, B) -> B,
        {
            OptionKind.fold_right(init, function, value)
        }
    }

    #[rstest]
    fn defaults_follow_the_instance_table() {
        let registry = RegistryBuilder::with_defaults().build();
        assert_eq!(registry.capabilities(OptionKind::id()), Capability::ALL.to_vec());
        assert_eq!(registry.capabilities(VecKind::id()), Capability::ALL.to_vec());
        assert_eq!(
            registry.capabilities(IdentityKind::id()),
            vec![
                Capability::Functor,
                Capability::Applicative,
                Capability::Monad,
                Capability::Foldable,
                Capability::Traverse,
            ]
        );
        assert!(!registry.supports(SeqKind::id(), Capability::Traverse));
        assert!(registry.supports(SeqKind::id(), Capability::Unfoldable));
    }

    #[rstest]
    fn lookup_returns_the_registered_record() {
        let registry = RegistryBuilder::with_defaults().build();
        let monad = registry.lookup::<VecKind>(Capability::Monad);
        assert!(monad.is_some());
    }

    #[rstest]
    fn require_reports_missing_capability() {
        let registry = RegistryBuilder::with_defaults().build();
        let error = registry.require::<IdentityKind>(Capability::MonadZero).err();
        assert_eq!(
            error,
            Some(EngineError::MissingInstance {
                marker: "Identity",
                capability: Capability::MonadZero,
                operation: "InstanceRegistry::require",
            })
        );
    }

    #[rstest]
    fn custom_records_replace_defaults_at_their_capability() {
        let registry = RegistryBuilder::with_defaults().register_foldable(FirstWins).build();
        assert!(registry.lookup::<FirstWins>(Capability::Foldable).is_some());
        assert!(registry.lookup::<OptionKind>(Capability::Foldable).is_none());
        assert!(registry.lookup::<OptionKind>(Capability::Monad).is_some());
        assert!(matches!(
            registry.require::<OptionKind>(Capability::Foldable),
            Err(EngineError::KindMismatch { .. })
        ));
    }

    #[rstest]
    fn empty_registry_knows_nothing() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.markers().is_empty());
        assert!(registry.capabilities(OptionKind::id()).is_empty());
        assert!(registry.lookup_erased(OptionKind::id(), Capability::Functor).is_none());
    }

    #[rstest]
    fn markers_are_listed_by_name() {
        let registry = RegistryBuilder::new()
            .register_monad(VecKind)
            .register_monad(IdentityKind)
            .build();
        let names: Vec<&str> = registry.markers().iter().map(MarkerId::name).collect();
        assert_eq!(names, vec!["Identity", "Vec"]);
    }
}
