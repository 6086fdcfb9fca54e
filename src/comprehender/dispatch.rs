//! The dispatch table: comprehenders keyed by carrier type, resolved
//! through registered ancestry.
//!
//! A [`Dispatch`] is built once with [`DispatchBuilder`] and is immutable
//! afterwards. Lookups try the exact carrier type first, then walk the
//! ancestors registered for it, upcasting the carrier on the way.

use std::any::{Any, TypeId, type_name};
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use super::{CarrierKey, Comprehender, Opaque};
use crate::error::EngineError;

/// Converts an erased carrier into its ancestor's erased carrier type.
pub type Upcast = Arc<dyn Fn(Opaque) -> Result<Opaque, EngineError> + Send + Sync>;

#[derive(Clone)]
struct Ancestor {
    parent: TypeId,
    upcast: Upcast,
}

/// The comprehender chosen for a carrier type, with the upcasts that turn
/// the carrier into that comprehender's target.
#[derive(Clone)]
pub struct Resolution {
    comprehender: Arc<dyn Comprehender>,
    upcasts: SmallVec<[Upcast; 2]>,
}

impl Resolution {
    fn direct(comprehender: &Arc<dyn Comprehender>) -> Self {
        Self {
            comprehender: Arc::clone(comprehender),
            upcasts: SmallVec::new(),
        }
    }

    /// The comprehender.
    pub fn comprehender(&self) -> &Arc<dyn Comprehender> {
        &self.comprehender
    }

    /// Whether the carrier was matched through an ancestor.
    pub fn is_inherited(&self) -> bool {
        !self.upcasts.is_empty()
    }

    /// Converts `carrier` into the comprehender's target type.
    ///
    /// # Errors
    ///
    /// [`EngineError::KindMismatch`] when `carrier` is not of the type this
    /// resolution was made for.
    pub fn prepare(&self, carrier: Opaque) -> Result<Opaque, EngineError> {
        self.upcasts
            .iter()
            .try_fold(carrier, |carrier, upcast| upcast(carrier))
    }
}

struct Table {
    direct: FxHashMap<TypeId, Arc<dyn Comprehender>>,
    ancestry: FxHashMap<TypeId, SmallVec<[Ancestor; 2]>>,
    cache: RwLock<FxHashMap<TypeId, Resolution>>,
}

impl Table {
    /// Breadth-first over declared ancestors, in declaration order.
    fn search(&self, start: TypeId) -> Option<Resolution> {
        if let Some(comprehender) = self.direct.get(&start) {
            return Some(Resolution::direct(comprehender));
        }
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut frontier = VecDeque::from([(start, SmallVec::<[Upcast; 2]>::new())]);
        while let Some((current, upcasts)) = frontier.pop_front() {
            for ancestor in self.ancestry.get(&current).into_iter().flatten() {
                if !visited.insert(ancestor.parent) {
                    continue;
                }
                let mut chain = upcasts.clone();
                chain.push(Arc::clone(&ancestor.upcast));
                if let Some(comprehender) = self.direct.get(&ancestor.parent) {
                    return Some(Resolution {
                        comprehender: Arc::clone(comprehender),
                        upcasts: chain,
                    });
                }
                frontier.push_back((ancestor.parent, chain));
            }
        }
        None
    }
}

/// A sealed table of comprehenders.
///
/// Cloning is cheap. Resolution results are cached per carrier type; the
/// cache is the only mutable state and concurrent resolutions of the same
/// type agree on the result.
///
/// # Examples
///
/// ```rust
/// use std::collections::VecDeque;
/// use kindred::comprehender::{Dispatch, Opaque, erase};
///
/// let dispatch = Dispatch::global();
/// let deque: Opaque = Box::new(VecDeque::from([erase(1)]));
/// let resolution = dispatch.resolve(&deque, "example").expect("VecDeque inherits from Vec");
/// assert!(resolution.is_inherited());
/// assert_eq!(resolution.comprehender().target().name(), "Vec");
/// ```
#[derive(Clone)]
pub struct Dispatch {
    table: Arc<Table>,
}

static GLOBAL: OnceLock<Dispatch> = OnceLock::new();

impl Dispatch {
    /// A builder starting from the built-in comprehenders.
    pub fn builder() -> DispatchBuilder {
        DispatchBuilder::new()
    }

    /// The process-wide dispatch table, sealed on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            debug!("sealing default global dispatch table");
            DispatchBuilder::new().build()
        })
    }

    /// Makes `dispatch` the process-wide table.
    ///
    /// # Errors
    ///
    /// Gives `dispatch` back if the global table is already sealed.
    pub fn install_global(dispatch: Self) -> Result<(), Self> {
        GLOBAL
            .set(dispatch)
            .inspect_err(|_| warn!("global dispatch table is already sealed; install ignored"))
    }

    /// The comprehender registered for exactly `key`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownCarrier`] when there is none.
    pub fn comprehender_for(&self, key: CarrierKey) -> Result<Arc<dyn Comprehender>, EngineError> {
        self.table
            .direct
            .get(&key.type_id())
            .cloned()
            .ok_or(EngineError::UnknownCarrier {
                carrier: key.name(),
                operation: "Dispatch::comprehender_for",
            })
    }

    /// The comprehender for carrier type `C`, directly or through an
    /// ancestor.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownCarrier`] when nothing matches.
    pub fn resolve_type<C: Any>(&self) -> Result<Resolution, EngineError> {
        self.resolve_id(TypeId::of::<C>()).ok_or(EngineError::UnknownCarrier {
            carrier: type_name::<C>(),
            operation: "Dispatch::resolve_type",
        })
    }

    /// The comprehender for the runtime type of `carrier`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownCarrier`] when nothing matches.
    pub fn resolve(
        &self,
        carrier: &Opaque,
        operation: &'static str,
    ) -> Result<Resolution, EngineError> {
        self.resolve_id((**carrier).type_id())
            .ok_or(EngineError::UnknownCarrier {
                carrier: "unregistered carrier",
                operation,
            })
    }

    fn resolve_id(&self, type_id: TypeId) -> Option<Resolution> {
        if let Some(cached) = self.table.cache.read().get(&type_id) {
            return Some(cached.clone());
        }
        let found = self.table.search(type_id)?;
        trace!(
            comprehender = found.comprehender.target().name(),
            inherited = found.is_inherited(),
            "resolved carrier"
        );
        Some(self.table.cache.write().entry(type_id).or_insert(found).clone())
    }

    /// Converts `produced`, returned by a function bound over a `target`
    /// carrier, into `target`'s carrier type.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownCarrier`] for an unregistered carrier, plus
    /// whatever the cross-type resolution raises.
    pub fn absorb(
        &self,
        target: &dyn Comprehender,
        produced: Opaque,
    ) -> Result<Opaque, EngineError> {
        let wanted = target.target();
        if (*produced).type_id() == wanted.type_id() {
            return Ok(produced);
        }
        let resolution = self.resolve(&produced, "Dispatch::absorb")?;
        let prepared = resolution.prepare(produced)?;
        let source = resolution.comprehender();
        if source.target() == wanted {
            return Ok(prepared);
        }
        trace!(from = source.target().name(), into = wanted.name(), "cross-type flat_map");
        source.resolve_for_cross_type_flat_map(target, prepared)
    }
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self
            .table
            .direct
            .values()
            .map(|comprehender| comprehender.target().name())
            .collect();
        names.sort_unstable();
        formatter.debug_struct("Dispatch").field("comprehenders", &names).finish_non_exhaustive()
    }
}

/// Assembles a [`Dispatch`] table.
pub struct DispatchBuilder {
    direct: FxHashMap<TypeId, Arc<dyn Comprehender>>,
    ancestry: FxHashMap<TypeId, SmallVec<[Ancestor; 2]>>,
}

impl Default for DispatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchBuilder {
    /// A builder holding the built-in comprehenders and the `VecDeque`
    /// ancestry edge onto `Vec`.
    pub fn new() -> Self {
        super::builtin::install(Self::bare())
    }

    /// A builder with nothing registered.
    pub fn bare() -> Self {
        Self {
            direct: FxHashMap::default(),
            ancestry: FxHashMap::default(),
        }
    }

    /// Registers `comprehender` for its target carrier.
    ///
    /// # Errors
    ///
    /// [`EngineError::DuplicateComprehender`] when the carrier already has
    /// one.
    pub fn register<C: Comprehender>(mut self, comprehender: C) -> Result<Self, EngineError> {
        let key = comprehender.target();
        if self.direct.contains_key(&key.type_id()) {
            return Err(EngineError::DuplicateComprehender {
                carrier: key.name(),
                operation: "DispatchBuilder::register",
            });
        }
        debug!(carrier = key.name(), "registered comprehender");
        self.direct.insert(key.type_id(), Arc::new(comprehender));
        Ok(self)
    }

    pub(super) fn with_builtin<C: Comprehender>(mut self, comprehender: C) -> Self {
        self.direct.insert(comprehender.target().type_id(), Arc::new(comprehender));
        self
    }

    /// Declares `Parent` as an ancestor of `Child`.
    ///
    /// Carriers of type `Child` without a comprehender of their own are
    /// handled by the nearest ancestor's, after `upcast`. Ancestors are tried
    /// breadth-first in declaration order.
    #[must_use]
    pub fn declare_ancestor<Child, Parent, Upcaster>(mut self, upcast: Upcaster) -> Self
    where
        Child: Any + Send,
        Parent: Any + Send,
        Upcaster: Fn(Child) -> Parent + Send + Sync + 'static,
    {
        let upcast: Upcast = Arc::new(move |carrier: Opaque| {
            carrier
                .downcast::<Child>()
                .map(|child| Box::new(upcast(*child)) as Opaque)
                .map_err(|_| EngineError::KindMismatch {
                    expected: type_name::<Child>(),
                    found: "another carrier",
                    operation: "Dispatch::upcast",
                })
        });
        self.ancestry
            .entry(TypeId::of::<Child>())
            .or_default()
            .push(Ancestor {
                parent: TypeId::of::<Parent>(),
                upcast,
            });
        debug!(child = type_name::<Child>(), parent = type_name::<Parent>(), "declared ancestor");
        self
    }

    /// Seals the table.
    pub fn build(self) -> Dispatch {
        debug!(comprehenders = self.direct.len(), "sealed dispatch table");
        Dispatch {
            table: Arc::new(Table {
                direct: self.direct,
                ancestry: self.ancestry,
                cache: RwLock::new(FxHashMap::default()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comprehender::{Dynamic, OptionComprehender, VecComprehender, erase, recover};
    use rstest::rstest;
    use std::collections::VecDeque;

    #[derive(Clone)]
    struct Wrapped(Vec<Dynamic>);

    #[derive(Clone)]
    struct DoublyWrapped(Wrapped);

    #[rstest]
    fn resolves_built_ins_directly() {
        let dispatch = Dispatch::builder().build();
        let carrier: Opaque = Box::new(Some(erase(1)));
        let resolution = dispatch.resolve(&carrier, "test").ok();
        assert!(resolution.is_some_and(|resolution| !resolution.is_inherited()));
    }

    #[rstest]
    fn unknown_carriers_are_reported() {
        let dispatch = Dispatch::builder().build();
        let carrier: Opaque = Box::new("not a carrier");
        assert!(matches!(
            dispatch.resolve(&carrier, "test"),
            Err(EngineError::UnknownCarrier { operation: "test", .. })
        ));
    }

    #[rstest]
    fn duplicate_registration_is_rejected() {
        let result = DispatchBuilder::bare()
            .register(VecComprehender)
            .and_then(|builder| builder.register(VecComprehender));
        assert!(matches!(result, Err(EngineError::DuplicateComprehender { carrier: "Vec", .. })));
    }

    #[rstest]
    fn ancestry_is_walked_transitively() {
        let dispatch = Dispatch::builder()
            .declare_ancestor::<DoublyWrapped, Wrapped, _>(|doubly| doubly.0)
            .declare_ancestor::<Wrapped, Vec<Dynamic>, _>(|wrapped| wrapped.0)
            .build();
        let carrier: Opaque = Box::new(DoublyWrapped(Wrapped(vec![erase(1), erase(2)])));
        let resolution = dispatch.resolve(&carrier, "test").ok();
        let prepared = resolution.and_then(|resolution| resolution.prepare(carrier).ok());
        let elements = prepared.and_then(|prepared| prepared.downcast::<Vec<Dynamic>>().ok());
        let values: Option<Vec<i32>> =
            elements.map(|elements| {
                elements.into_iter().filter_map(|e| recover(e, "test").ok()).collect()
            });
        assert_eq!(values, Some(vec![1, 2]));
    }

    #[rstest]
    fn deque_inherits_vec() {
        let resolution = Dispatch::global().resolve_type::<VecDeque<Dynamic>>().ok();
        assert!(resolution.is_some_and(|resolution| resolution.is_inherited()));
    }

    #[rstest]
    fn repeated_resolution_hits_the_cache() {
        let dispatch = Dispatch::builder().build();
        let first = dispatch.resolve_type::<Option<Dynamic>>().ok();
        let second = dispatch.resolve_type::<Option<Dynamic>>().ok();
        let same = first
            .zip(second)
            .is_some_and(|(first, second)| {
                Arc::ptr_eq(first.comprehender(), second.comprehender())
            });
        assert!(same);
    }

    #[rstest]
    fn absorb_converts_between_lineages() {
        let dispatch = Dispatch::builder().build();
        let produced: Opaque = Box::new(vec![erase(7), erase(8)]);
        let absorbed = dispatch.absorb(&OptionComprehender, produced).ok();
        let option = absorbed.and_then(|opaque| opaque.downcast::<Option<Dynamic>>().ok());
        let value = option
            .and_then(|option| *option)
            .and_then(|element| recover::<i32>(element, "test").ok());
        assert_eq!(value, Some(7));
    }

    #[rstest]
    fn absorb_of_empty_sequence_into_value_fails() {
        let dispatch = Dispatch::builder().build();
        let produced: Opaque = Box::new(Vec::<Dynamic>::new());
        assert!(matches!(
            dispatch.absorb(&OptionComprehender, produced),
            Err(EngineError::NoElement { marker: "Vec", .. })
        ));
    }
}
