//! [`Task<A>`], a shared asynchronous value, and its marker [`TaskKind`].
//!
//! A task completes at most once and may be awaited from any number of
//! clones. The type-class operations never block: they build new tasks that
//! wait on their inputs. Only the [`Foldable`] and [`Traverse`] instances
//! block, because folding needs the value now; blocking on a task that never
//! completes (such as [`TaskKind`]'s `empty`) never returns.
//!
//! # Examples
//!
//! ```rust
//! use kindred::carrier::{Task, TaskKind};
//! use kindred::kind::Kind;
//! use kindred::typeclass::{Applicative, Functor, MonadPlus, MonadZero};
//!
//! let ten = TaskKind.map(|n: i32| n * 2, TaskKind.unit(5));
//! assert_eq!(ten.narrow().block(), 10);
//!
//! // `plus` takes whichever side completes first.
//! let raced = TaskKind.plus(TaskKind.empty(), Kind::from(Task::ready(7)));
//! assert_eq!(raced.narrow().block(), 7);
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{BoxFuture, Either, Shared};

use crate::kind::{Element, Kind, Marker};
use crate::typeclass::{
    Applicative, Foldable, Functor, Instance, Monad, MonadPlus, MonadZero, Traverse,
};

/// A cloneable handle on an asynchronous computation producing one `A`.
pub struct Task<A: Element> {
    inner: Shared<BoxFuture<'static, A>>,
}

impl<A: Element> Clone for Task<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Element> Task<A> {
    /// Wraps a future.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// A task that has already completed with `value`.
    pub fn ready(value: A) -> Self {
        Self::from_future(futures::future::ready(value))
    }

    /// A task that never completes.
    pub fn never() -> Self {
        Self::from_future(futures::future::pending())
    }

    /// Whether the value is available without waiting.
    pub fn is_completed(&self) -> bool {
        self.peek_value().is_some()
    }

    /// The value, if it is available without waiting.
    pub fn peek_value(&self) -> Option<A> {
        self.inner.clone().now_or_never()
    }

    /// Blocks the current thread until the value is available.
    pub fn block(self) -> A {
        futures::executor::block_on(self.inner)
    }

    /// The value, read directly when already available so that no executor
    /// is entered, otherwise blocked on.
    pub(crate) fn settle(self) -> A {
        self.peek_value().unwrap_or_else(|| self.block())
    }
}

impl<A: Element> Future for Task<A> {
    type Output = A;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<A> {
        self.get_mut().inner.poll_unpin(context)
    }
}

impl<A: Element + fmt::Debug> fmt::Debug for Task<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek_value() {
            Some(value) => formatter.debug_tuple("Task").field(&value).finish(),
            None => formatter.write_str("Task(<pending>)"),
        }
    }
}

/// Constructor marker for [`Task<_>`], and its default type-class record.
///
/// `empty` never completes, and `plus` races its arguments: the first to
/// complete wins, the left one on a tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskKind;

impl Marker for TaskKind {
    type Carrier<A: Element> = Task<A>;
    const NAME: &'static str = "Task";
}

impl<A: Element> From<Task<A>> for Kind<TaskKind, A> {
    fn from(carrier: Task<A>) -> Self {
        Self::widen(carrier)
    }
}

impl Instance for TaskKind {
    type Marker = Self;
}

impl Functor for TaskKind {
    fn map<A, B, Function>(&self, function: Function, value: Kind<Self, A>) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        Kind::widen(Task::from_future(value.narrow().map(function)))
    }
}

impl Applicative for TaskKind {
    fn unit<A: Element>(&self, value: A) -> Kind<Self, A> {
        Kind::widen(Task::ready(value))
    }

    fn ap<A, B, Function>(
        &self,
        functions: Kind<Self, Function>,
        value: Kind<Self, A>,
    ) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Element,
    {
        self.map2(functions, value, |mut function, element| function(element))
    }

    fn map2<A, B, C, Function>(
        &self,
        first: Kind<Self, A>,
        second: Kind<Self, B>,
        mut function: Function,
    ) -> Kind<Self, C>
    where
        A: Element,
        B: Element,
        C: Element,
        Function: FnMut(A, B) -> C + Send + 'static,
    {
        let joined = futures::future::join(first.narrow(), second.narrow());
        Kind::widen(Task::from_future(joined.map(move |(left, right)| function(left, right))))
    }
}

impl Monad for TaskKind {
    fn flat_map<A, B, Function>(
        &self,
        mut function: Function,
        value: Kind<Self, A>,
    ) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> Kind<Self, B> + Send + 'static,
    {
        let source = value.narrow();
        Kind::widen(Task::from_future(async move {
            let element = source.await;
            function(element).narrow().await
        }))
    }
}

impl MonadZero for TaskKind {
    fn empty<A: Element>(&self) -> Kind<Self, A> {
        Kind::widen(Task::never())
    }

    /// A rejected value turns the task into one that never completes.
    fn filter<A, Predicate>(&self, mut predicate: Predicate, value: Kind<Self, A>) -> Kind<Self, A>
    where
        A: Element,
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let source = value.narrow();
        Kind::widen(Task::from_future(async move {
            let element = source.await;
            if predicate(&element) {
                element
            } else {
                futures::future::pending::<A>().await
            }
        }))
    }
}

impl MonadPlus for TaskKind {
    fn plus<A: Element>(&self, left: Kind<Self, A>, right: Kind<Self, A>) -> Kind<Self, A> {
        let race = futures::future::select(left.narrow(), right.narrow());
        Kind::widen(Task::from_future(race.map(|winner| match winner {
            Either::Left((value, _)) | Either::Right((value, _)) => value,
        })))
    }
}

impl Foldable for TaskKind {
    /// Blocks until the task completes, unless it already has.
    fn fold_left<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(B, A) -> B,
    {
        function(init, value.narrow().settle())
    }

    /// Blocks until the task completes, unless it already has.
    fn fold_right<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(A, B) -> B,
    {
        function(value.narrow().settle(), init)
    }

    fn length<A: Element>(&self, _value: &Kind<Self, A>) -> usize {
        1
    }
}

impl Traverse for TaskKind {
    /// Blocks until the task completes, then lifts the effect's result back
    /// into a completed task.
    fn traverse_a<G, A, B, Function>(
        &self,
        applicative: &G,
        mut function: Function,
        value: Kind<Self, A>,
    ) -> Kind<G::Marker, Kind<Self, B>>
    where
        G: Applicative,
        A: Element,
        B: Element,
        Function: FnMut(A) -> Kind<G::Marker, B> + Send + 'static,
    {
        let element = value.narrow().block();
        applicative.map(
            |result| Kind::<Self, B>::widen(Task::ready(result)),
            function(element),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::OptionKind;
    use rstest::rstest;

    fn ready(value: i32) -> Kind<TaskKind, i32> {
        Kind::from(Task::ready(value))
    }

    #[rstest]
    fn ready_tasks_are_completed() {
        assert!(Task::ready(1).is_completed());
        assert!(!Task::<i32>::never().is_completed());
    }

    #[rstest]
    fn map_of_ready_task_completes_without_an_executor() {
        let mapped = TaskKind.map(|n: i32| n + 1, ready(1)).narrow();
        assert_eq!(mapped.peek_value(), Some(2));
    }

    #[rstest]
    fn flat_map_sequences_tasks() {
        let result = TaskKind.flat_map(|n: i32| ready(n * 10), ready(4));
        assert_eq!(result.narrow().block(), 40);
    }

    #[rstest]
    fn map2_waits_for_both() {
        let result = TaskKind.map2(ready(2), ready(3), |a, b| a * b);
        assert_eq!(result.narrow().block(), 6);
    }

    #[rstest]
    fn rejected_filter_never_completes() {
        let kept = TaskKind.filter(|n: &i32| *n > 0, ready(5)).narrow();
        let rejected = TaskKind.filter(|n: &i32| *n > 0, ready(-5)).narrow();
        assert_eq!(kept.peek_value(), Some(5));
        assert!(!rejected.is_completed());
    }

    #[rstest]
    #[case(ready(1), ready(2), Some(1))]
    #[case(TaskKind.empty(), ready(2), Some(2))]
    #[case(ready(1), TaskKind.empty(), Some(1))]
    #[case(TaskKind.empty(), TaskKind.empty(), None)]
    fn plus_takes_first_completed(
        #[case] left: Kind<TaskKind, i32>,
        #[case] right: Kind<TaskKind, i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(TaskKind.plus(left, right).narrow().peek_value(), expected);
    }

    #[rstest]
    fn clones_share_the_result() {
        let task = TaskKind.map(|n: i32| n * 3, ready(3)).narrow();
        let copy = task.clone();
        assert_eq!(task.block(), 9);
        assert_eq!(copy.block(), 9);
    }

    #[rstest]
    fn traverse_into_option() {
        let result = TaskKind.traverse_a(&OptionKind, |n: i32| Kind::from(Some(n + 1)), ready(1));
        let task = result.narrow().map(Kind::narrow);
        assert_eq!(task.and_then(|task| task.peek_value()), Some(2));
    }

    #[tokio::test]
    async fn tasks_are_futures() {
        let (sender, receiver) = futures::channel::oneshot::channel::<i32>();
        let pending = Task::from_future(receiver.map(|received| received.unwrap_or_default()));
        let doubled = TaskKind.map(|n: i32| n * 2, Kind::from(pending.clone())).narrow();
        assert!(!doubled.is_completed());
        sender.send(21).ok();
        assert_eq!(doubled.await, 42);
    }
}
