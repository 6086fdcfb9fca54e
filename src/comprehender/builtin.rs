//! Comprehenders for the built-in carriers.
//!
//! The synchronous ones delegate to the carriers' own type-class records
//! with `Dynamic` elements; only binding needs the dispatch table.

use std::collections::VecDeque;

#[cfg(feature = "async")]
use futures::stream::{self, BoxStream, StreamExt};

use super::{
    CarrierKey, Comprehender, Dispatch, DispatchBuilder, DynBind, DynFunction, DynPredicate,
    Dynamic, Lineage, Opaque, unbox,
};
#[cfg(feature = "async")]
use super::{erase, is_error};
use crate::carrier::{IdentityKind, OptionKind, VecKind};
#[cfg(feature = "async")]
use crate::carrier::{Task, TaskKind};
use crate::error::EngineError;
use crate::kind::Kind;
use crate::registry::Capability;
use crate::typeclass::{Functor, Identity, MonadZero};

pub(super) fn install(builder: DispatchBuilder) -> DispatchBuilder {
    let builder = builder
        .with_builtin(OptionComprehender)
        .with_builtin(VecComprehender)
        .with_builtin(IdentityComprehender)
        .declare_ancestor::<VecDeque<Dynamic>, Vec<Dynamic>, _>(Vec::from);
    #[cfg(feature = "async")]
    let builder = builder.with_builtin(TaskComprehender).with_builtin(StreamComprehender);
    builder
}

const OPTION: &str = "Option";
const VEC: &str = "Vec";
const IDENTITY: &str = "Identity";

/// Comprehender for `Option<Dynamic>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionComprehender;

impl Comprehender for OptionComprehender {
    fn target(&self) -> CarrierKey {
        CarrierKey::of::<Option<Dynamic>>(OPTION)
    }

    fn lineage(&self) -> Lineage {
        Lineage::Value
    }

    fn of(&self, value: Dynamic) -> Opaque {
        Box::new(Some(value))
    }

    fn empty(&self) -> Result<Opaque, EngineError> {
        Ok(Box::new(None::<Dynamic>))
    }

    fn map(&self, carrier: Opaque, function: DynFunction) -> Result<Opaque, EngineError> {
        let option = unbox::<Option<Dynamic>>(carrier, OPTION, "OptionComprehender::map")?;
        Ok(Box::new(OptionKind.map(function, Kind::from(option)).narrow()))
    }

    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        mut function: DynBind,
    ) -> Result<Opaque, EngineError> {
        match unbox::<Option<Dynamic>>(carrier, OPTION, "OptionComprehender::flat_map")? {
            Some(element) => dispatch.absorb(self, function(element)),
            None => self.empty(),
        }
    }

    fn filter(
        &self,
        _dispatch: &Dispatch,
        carrier: Opaque,
        predicate: DynPredicate,
    ) -> Result<Opaque, EngineError> {
        let option = unbox::<Option<Dynamic>>(carrier, OPTION, "OptionComprehender::filter")?;
        Ok(Box::new(OptionKind.filter(predicate, Kind::from(option)).narrow()))
    }

    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError> {
        let option = unbox::<Option<Dynamic>>(carrier, OPTION, "OptionComprehender::elements")?;
        Ok(option.into_iter().collect())
    }

    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError> {
        Ok(Box::new(elements.into_iter().next()))
    }
}

/// Comprehender for `Vec<Dynamic>`.
///
/// `VecDeque<Dynamic>` carriers resolve here through a declared ancestry
/// edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecComprehender;

impl Comprehender for VecComprehender {
    fn target(&self) -> CarrierKey {
        CarrierKey::of::<Vec<Dynamic>>(VEC)
    }

    fn lineage(&self) -> Lineage {
        Lineage::Sequence
    }

    fn of(&self, value: Dynamic) -> Opaque {
        Box::new(vec![value])
    }

    fn empty(&self) -> Result<Opaque, EngineError> {
        Ok(Box::new(Vec::<Dynamic>::new()))
    }

    fn map(&self, carrier: Opaque, function: DynFunction) -> Result<Opaque, EngineError> {
        let elements = unbox::<Vec<Dynamic>>(carrier, VEC, "VecComprehender::map")?;
        Ok(Box::new(VecKind.map(function, Kind::from(elements)).narrow()))
    }

    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        mut function: DynBind,
    ) -> Result<Opaque, EngineError> {
        let elements = unbox::<Vec<Dynamic>>(carrier, VEC, "VecComprehender::flat_map")?;
        let mut bound = Vec::with_capacity(elements.len());
        for element in elements {
            let absorbed = dispatch.absorb(self, function(element))?;
            bound.extend(unbox::<Vec<Dynamic>>(absorbed, VEC, "VecComprehender::flat_map")?);
        }
        Ok(Box::new(bound))
    }

    fn filter(
        &self,
        _dispatch: &Dispatch,
        carrier: Opaque,
        predicate: DynPredicate,
    ) -> Result<Opaque, EngineError> {
        let elements = unbox::<Vec<Dynamic>>(carrier, VEC, "VecComprehender::filter")?;
        Ok(Box::new(VecKind.filter(predicate, Kind::from(elements)).narrow()))
    }

    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError> {
        unbox::<Vec<Dynamic>>(carrier, VEC, "VecComprehender::elements")
    }

    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError> {
        Ok(Box::new(elements))
    }
}

/// Comprehender for `Identity<Dynamic>`.
///
/// Identity cannot be empty: `empty`, and a `filter` rejecting its value,
/// fail with [`EngineError::MissingInstance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityComprehender;

impl IdentityComprehender {
    const fn no_zero(operation: &'static str) -> EngineError {
        EngineError::MissingInstance {
            marker: IDENTITY,
            capability: Capability::MonadZero,
            operation,
        }
    }
}

impl Comprehender for IdentityComprehender {
    fn target(&self) -> CarrierKey {
        CarrierKey::of::<Identity<Dynamic>>(IDENTITY)
    }

    fn lineage(&self) -> Lineage {
        Lineage::Value
    }

    fn of(&self, value: Dynamic) -> Opaque {
        Box::new(Identity(value))
    }

    fn empty(&self) -> Result<Opaque, EngineError> {
        Err(Self::no_zero("IdentityComprehender::empty"))
    }

    fn map(&self, carrier: Opaque, function: DynFunction) -> Result<Opaque, EngineError> {
        let identity = unbox::<Identity<Dynamic>>(carrier, IDENTITY, "IdentityComprehender::map")?;
        Ok(Box::new(IdentityKind.map(function, Kind::from(identity)).narrow()))
    }

    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        mut function: DynBind,
    ) -> Result<Opaque, EngineError> {
        let Identity(element) =
            unbox::<Identity<Dynamic>>(carrier, IDENTITY, "IdentityComprehender::flat_map")?;
        dispatch.absorb(self, function(element))
    }

    fn filter(
        &self,
        _dispatch: &Dispatch,
        carrier: Opaque,
        mut predicate: DynPredicate,
    ) -> Result<Opaque, EngineError> {
        let identity = unbox::<Identity<Dynamic>>(
            carrier,
            IDENTITY,
            "IdentityComprehender::filter",
        )?;
        if predicate(identity.as_inner()) {
            Ok(Box::new(identity))
        } else {
            Err(Self::no_zero("IdentityComprehender::filter"))
        }
    }

    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError> {
        let Identity(element) =
            unbox::<Identity<Dynamic>>(carrier, IDENTITY, "IdentityComprehender::elements")?;
        Ok(vec![element])
    }

    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError> {
        match elements.into_iter().next() {
            Some(element) => Ok(self.of(element)),
            None => self.empty(),
        }
    }
}

#[cfg(feature = "async")]
const TASK: &str = "Task";
#[cfg(feature = "async")]
const STREAM: &str = "Stream";

/// Comprehender for `Task<Dynamic>`.
///
/// Nothing here blocks except [`elements`](Comprehender::elements). Engine
/// errors raised while binding travel in-band as the task's value.
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskComprehender;

#[cfg(feature = "async")]
impl Comprehender for TaskComprehender {
    fn target(&self) -> CarrierKey {
        CarrierKey::of::<Task<Dynamic>>(TASK)
    }

    fn lineage(&self) -> Lineage {
        Lineage::Value
    }

    fn of(&self, value: Dynamic) -> Opaque {
        Box::new(Task::ready(value))
    }

    fn empty(&self) -> Result<Opaque, EngineError> {
        Ok(Box::new(Task::<Dynamic>::never()))
    }

    fn map(&self, carrier: Opaque, mut function: DynFunction) -> Result<Opaque, EngineError> {
        let task = unbox::<Task<Dynamic>>(carrier, TASK, "TaskComprehender::map")?;
        let mapped = TaskKind.map(
            move |element| if is_error(&element) { element } else { function(element) },
            Kind::from(task),
        );
        Ok(Box::new(mapped.narrow()))
    }

    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        mut function: DynBind,
    ) -> Result<Opaque, EngineError> {
        let task = unbox::<Task<Dynamic>>(carrier, TASK, "TaskComprehender::flat_map")?;
        let dispatch = dispatch.clone();
        Ok(Box::new(Task::from_future(async move {
            let element = task.await;
            if is_error(&element) {
                return element;
            }
            let bound = dispatch
                .absorb(&Self, function(element))
                .and_then(|absorbed| {
                    unbox::<Task<Dynamic>>(absorbed, TASK, "TaskComprehender::flat_map")
                });
            match bound {
                Ok(next) => next.await,
                Err(error) => erase(error),
            }
        })))
    }

    fn filter(
        &self,
        _dispatch: &Dispatch,
        carrier: Opaque,
        mut predicate: DynPredicate,
    ) -> Result<Opaque, EngineError> {
        let task = unbox::<Task<Dynamic>>(carrier, TASK, "TaskComprehender::filter")?;
        let filtered = TaskKind.filter(
            move |element: &Dynamic| is_error(element) || predicate(element),
            Kind::from(task),
        );
        Ok(Box::new(filtered.narrow()))
    }

    /// Blocks until the task completes.
    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError> {
        let task = unbox::<Task<Dynamic>>(carrier, TASK, "TaskComprehender::elements")?;
        Ok(vec![task.block()])
    }

    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError> {
        match elements.into_iter().next() {
            Some(element) => Ok(self.of(element)),
            None => self.empty(),
        }
    }

    /// Into a stream without blocking; otherwise as the default.
    fn resolve_for_cross_type_flat_map(
        &self,
        target: &dyn Comprehender,
        carrier: Opaque,
    ) -> Result<Opaque, EngineError> {
        if target.target() == StreamComprehender.target() {
            let task = unbox::<Task<Dynamic>>(
                carrier,
                TASK,
                "TaskComprehender::resolve_for_cross_type_flat_map",
            )?;
            let single: BoxStream<'static, Dynamic> = stream::once(task).boxed();
            return Ok(Box::new(single));
        }
        let elements = self.elements(carrier)?;
        target.of_all(elements)
    }
}

/// Comprehender for `BoxStream<'static, Dynamic>`.
///
/// Engine errors raised while binding are emitted in-band as elements.
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamComprehender;

#[cfg(feature = "async")]
impl StreamComprehender {
    fn single(value: Dynamic) -> BoxStream<'static, Dynamic> {
        stream::iter(vec![value]).boxed()
    }
}

#[cfg(feature = "async")]
impl Comprehender for StreamComprehender {
    fn target(&self) -> CarrierKey {
        CarrierKey::of::<BoxStream<'static, Dynamic>>(STREAM)
    }

    fn lineage(&self) -> Lineage {
        Lineage::Sequence
    }

    fn of(&self, value: Dynamic) -> Opaque {
        Box::new(Self::single(value))
    }

    fn empty(&self) -> Result<Opaque, EngineError> {
        let nothing: BoxStream<'static, Dynamic> = stream::empty().boxed();
        Ok(Box::new(nothing))
    }

    fn map(&self, carrier: Opaque, mut function: DynFunction) -> Result<Opaque, EngineError> {
        let elements = unbox::<BoxStream<'static, Dynamic>>(
            carrier,
            STREAM,
            "StreamComprehender::map",
        )?;
        let mapped: BoxStream<'static, Dynamic> = elements
            .map(move |element| if is_error(&element) { element } else { function(element) })
            .boxed();
        Ok(Box::new(mapped))
    }

    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        mut function: DynBind,
    ) -> Result<Opaque, EngineError> {
        let elements = unbox::<BoxStream<'static, Dynamic>>(
            carrier,
            STREAM,
            "StreamComprehender::flat_map",
        )?;
        let dispatch = dispatch.clone();
        let bound: BoxStream<'static, Dynamic> = elements
            .flat_map(move |element| {
                if is_error(&element) {
                    return Self::single(element);
                }
                dispatch
                    .absorb(&Self, function(element))
                    .and_then(|absorbed| {
                        unbox::<BoxStream<'static, Dynamic>>(
                            absorbed,
                            STREAM,
                            "StreamComprehender::flat_map",
                        )
                    })
                    .unwrap_or_else(|error| Self::single(erase(error)))
            })
            .boxed();
        Ok(Box::new(bound))
    }

    fn filter(
        &self,
        _dispatch: &Dispatch,
        carrier: Opaque,
        mut predicate: DynPredicate,
    ) -> Result<Opaque, EngineError> {
        let elements = unbox::<BoxStream<'static, Dynamic>>(
            carrier,
            STREAM,
            "StreamComprehender::filter",
        )?;
        let filtered: BoxStream<'static, Dynamic> = elements
            .filter(move |element| futures::future::ready(is_error(element) || predicate(element)))
            .boxed();
        Ok(Box::new(filtered))
    }

    /// Blocks until the stream ends.
    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError> {
        let elements = unbox::<BoxStream<'static, Dynamic>>(
            carrier,
            STREAM,
            "StreamComprehender::elements",
        )?;
        Ok(futures::executor::block_on(elements.collect()))
    }

    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError> {
        let all: BoxStream<'static, Dynamic> = stream::iter(elements).boxed();
        Ok(Box::new(all))
    }

    /// Into a task without blocking; into other value carriers after
    /// waiting for the first element only.
    fn resolve_for_cross_type_flat_map(
        &self,
        target: &dyn Comprehender,
        carrier: Opaque,
    ) -> Result<Opaque, EngineError> {
        const OPERATION: &str = "StreamComprehender::resolve_for_cross_type_flat_map";
        let mut elements = unbox::<BoxStream<'static, Dynamic>>(carrier, STREAM, OPERATION)?;
        let no_element = EngineError::NoElement {
            marker: STREAM,
            operation: OPERATION,
        };
        if target.target() == TaskComprehender.target() {
            let first = Task::from_future(async move {
                elements.next().await.unwrap_or_else(|| erase(no_element))
            });
            return Ok(Box::new(first));
        }
        match target.lineage() {
            Lineage::Sequence => target.of_all(futures::executor::block_on(elements.collect())),
            Lineage::Value => futures::executor::block_on(elements.next())
                .map(|element| target.of(element))
                .ok_or(no_element),
        }
    }
}
