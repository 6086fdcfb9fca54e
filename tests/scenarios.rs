//! End-to-end scenarios across the type classes, the registry, the
//! comprehenders and the transformers.

#![cfg(feature = "async")]

use std::time::Duration;

use kindred::EngineError;
use kindred::anym::AnyM;
use kindred::carrier::{OptionKind, Seq, Task, TaskKind, VecKind};
use kindred::comprehender::{
    CarrierKey, Comprehender, Dispatch, DynBind, DynFunction, Dynamic, Lineage, Opaque, erase,
    recover, unbox,
};
use kindred::kind::Kind;
use kindred::registry::{self, Capability};
use kindred::transformer::{OptionT, SeqT};
use kindred::typeclass::{Applicative, Functor, KindMonoid, Monad, MonadPlus, MonadZero, Traverse};
use rstest::rstest;

// =============================================================================
// Type Classes
// =============================================================================

#[rstest]
#[case(Some("hello"), Some(5))]
#[case(None, None)]
fn option_functor_maps_the_present_value(
    #[case] input: Option<&'static str>,
    #[case] expected: Option<usize>,
) {
    assert_eq!(OptionKind.map(str::len, Kind::from(input)).narrow(), expected);
}

#[tokio::test]
async fn task_monad_binds_to_the_length() {
    let length = TaskKind.flat_map(|text: &str| TaskKind.unit(text.len()), TaskKind.unit("hello"));
    assert_eq!(length.narrow().await, 5);
}

#[tokio::test]
async fn task_filter_keeps_a_matching_value() {
    let kept = TaskKind.filter(|text: &&str| text.starts_with("he"), TaskKind.unit("hello"));
    assert_eq!(kept.narrow().await, "hello");
}

#[tokio::test(start_paused = true)]
async fn task_filter_rejecting_the_value_never_completes() {
    let rejected = TaskKind.filter(|text: &&str| !text.starts_with("he"), TaskKind.unit("hello"));
    let task = rejected.narrow();
    assert!(!task.is_completed());
    assert!(tokio::time::timeout(Duration::from_secs(60), task).await.is_err());
}

#[tokio::test]
async fn task_plus_defaults_to_the_first_completion() {
    let record = registry::global()
        .require::<TaskKind>(Capability::MonadPlus)
        .expect("TaskKind is a built-in MonadPlus");
    let combined = record.plus(record.empty(), record.unit(10));
    assert_eq!(combined.narrow().await, 10);
}

#[tokio::test]
async fn task_plus_using_a_custom_monoid() {
    let prefer_pending: KindMonoid<TaskKind, i32> = KindMonoid::new(
        || TaskKind.empty(),
        |left, right| if left.as_carrier().is_completed() { right } else { left },
    );
    let combined = TaskKind.plus_using(&prefer_pending, TaskKind.unit(5), TaskKind.unit(10));
    assert_eq!(combined.narrow().await, 10);
}

#[rstest]
fn traverse_with_the_option_applicative() {
    let doubled = VecKind.traverse_a(
        &OptionKind,
        |n: i32| Kind::from(Some(n * 2)),
        VecKind.unit(1),
    );
    assert_eq!(doubled.narrow().map(Kind::narrow), Some(vec![2]));

    let from_task = TaskKind.traverse_a(
        &OptionKind,
        |n: i32| Kind::from(Some(n * 2)),
        TaskKind.unit(1),
    );
    assert_eq!(from_task.narrow().map(|task| task.narrow().block()), Some(2));
}

// =============================================================================
// Transformers
// =============================================================================

#[rstest]
fn transformer_zip_pairs_units() {
    let sequences = SeqT::unit(VecKind, 1).zip(SeqT::unit(VecKind, "x"));
    assert_eq!(sequences.to_vecs().narrow(), vec![vec![(1, "x")]]);

    let options = OptionT::unit(OptionKind, 1).zip(OptionT::unit(OptionKind, "x"));
    assert_eq!(options.run().narrow(), Some(Some((1, "x"))));
}

#[tokio::test]
async fn transformer_over_a_task_stays_asynchronous() {
    let outer = TaskKind.map(Seq::from_vec, TaskKind.unit(vec!["a", "bb"]));
    let lengths = SeqT::new(TaskKind, outer).map(str::len).to_vecs();
    assert_eq!(lengths.narrow().await, vec![1, 2]);
}

// =============================================================================
// Comprehender Round Trip
// =============================================================================

/// A carrier from outside the engine: a stack read top first.
#[derive(Debug, Clone, PartialEq)]
struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    fn map<B>(self, function: impl FnMut(A) -> B) -> Stack<B> {
        Stack(self.0.into_iter().map(function).collect())
    }
}

const STACK: &str = "Stack";

struct StackComprehender;

impl Comprehender for StackComprehender {
    fn target(&self) -> CarrierKey {
        CarrierKey::of::<Stack<Dynamic>>(STACK)
    }

    fn lineage(&self) -> Lineage {
        Lineage::Sequence
    }

    fn of(&self, value: Dynamic) -> Opaque {
        Box::new(Stack(vec![value]))
    }

    fn empty(&self) -> Result<Opaque, EngineError> {
        Ok(Box::new(Stack::<Dynamic>(Vec::new())))
    }

    fn map(&self, carrier: Opaque, function: DynFunction) -> Result<Opaque, EngineError> {
        let stack = unbox::<Stack<Dynamic>>(carrier, STACK, "StackComprehender::map")?;
        Ok(Box::new(stack.map(function)))
    }

    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        mut function: DynBind,
    ) -> Result<Opaque, EngineError> {
        let stack = unbox::<Stack<Dynamic>>(carrier, STACK, "StackComprehender::flat_map")?;
        let mut bound = Vec::new();
        for element in stack.0 {
            let absorbed = dispatch.absorb(self, function(element))?;
            let stack = unbox::<Stack<Dynamic>>(absorbed, STACK, "StackComprehender::flat_map")?;
            bound.extend(stack.0);
        }
        Ok(Box::new(Stack(bound)))
    }

    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError> {
        Ok(unbox::<Stack<Dynamic>>(carrier, STACK, "StackComprehender::elements")?.0)
    }

    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError> {
        Ok(Box::new(Stack(elements)))
    }
}

fn stack_dispatch() -> Dispatch {
    Dispatch::builder()
        .register(StackComprehender)
        .expect("Stack has no comprehender yet")
        .build()
}

fn erased(stack: Stack<i32>) -> Opaque {
    Box::new(stack.map(erase))
}

#[rstest]
fn comprehender_map_agrees_with_the_carriers_own_map() {
    let stack = Stack(vec![3, 2, 1]);
    let native = stack.clone().map(|n| n * 10);

    let mapped = StackComprehender
        .map(
            erased(stack),
            Box::new(|element: Dynamic| {
                erase(recover::<i32>(element, "test").map_or(0, |n| n * 10))
            }),
        )
        .and_then(|carrier| StackComprehender.elements(carrier))
        .and_then(|elements| {
            elements
                .into_iter()
                .map(|element| recover::<i32>(element, "test"))
                .collect::<Result<Vec<_>, _>>()
        });
    assert_eq!(mapped, Ok(native.0));
}

#[rstest]
fn anym_drives_a_registered_foreign_carrier() {
    let dispatch = stack_dispatch();
    let any = AnyM::<i32>::from_carrier(&dispatch, erased(Stack(vec![1, 2, 3])))
        .expect("Stack is registered");
    assert_eq!(any.lineage(), Lineage::Sequence);
    assert_eq!(any.carrier_name(), STACK);

    let result = any.map(|n| n + 1).flat_map(|n: i32| (n % 2 == 0).then_some(n)).to_vec();
    assert_eq!(result, Ok(vec![2, 4]));
}

#[rstest]
fn registering_a_carrier_twice_is_rejected() {
    let result = Dispatch::builder()
        .register(StackComprehender)
        .and_then(|builder| builder.register(StackComprehender))
        .map(|_| ());
    assert_eq!(
        result,
        Err(EngineError::DuplicateComprehender {
            carrier: STACK,
            operation: "DispatchBuilder::register",
        })
    );
}

#[rstest]
fn unregistered_carriers_are_unknown() {
    let result = AnyM::<i32>::from_carrier(&Dispatch::builder().build(), erased(Stack(vec![1])));
    assert!(matches!(result, Err(EngineError::UnknownCarrier { .. })));
}

#[rstest]
fn task_results_are_observable_without_blocking() {
    assert_eq!(Task::ready(1).peek_value(), Some(1));
}
