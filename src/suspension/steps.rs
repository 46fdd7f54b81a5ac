//! A handle built from a sequence of continuation closures.
//!
//! Each step is a closure that receives the values resolved so far and
//! returns the next pending operation. Closures are consumed one at a time,
//! so a step's pending operation is only created after every earlier step
//! has settled to a success.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::error::ProtocolViolation;
use super::handle::{Resume, Step, Suspension};
use crate::failure::{Fallible, Untagged};

type StepFn<V, P, G> = Box<dyn FnOnce(&[V]) -> BoxFuture<'static, Fallible<V, P, G>> + Send>;

type FinishFn<V, O, P, G> = Box<dyn FnOnce(Vec<V>) -> Fallible<O, P, G> + Send>;

/// Collects the steps of a [`Steps`] handle.
///
/// # Examples
///
/// ```rust
/// use futures::future::ready;
/// use safe_error::suspension::StepsBuilder;
///
/// let builder = StepsBuilder::<i32, &str>::new()
///     .step(|_| ready(Ok(1)))
///     .step(|resolved| ready(Ok(resolved[0] + 1)));
///
/// assert_eq!(builder.len(), 2);
/// ```
pub struct StepsBuilder<V, P, G = Untagged> {
    steps: VecDeque<StepFn<V, P, G>>,
}

impl<V: 'static, P: 'static> StepsBuilder<V, P> {
    /// Creates an empty builder for untagged failures.
    ///
    /// Use [`StepsBuilder::default`] to choose a tag type.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: 'static, P: 'static, G: 'static> Default for StepsBuilder<V, P, G> {
    fn default() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }
}

impl<V: 'static, P: 'static, G: 'static> StepsBuilder<V, P, G> {
    /// Appends a step.
    ///
    /// `step` receives the values resolved by the previous steps, in order,
    /// and returns the pending operation for this step.
    #[must_use]
    pub fn step<F, Fut>(mut self, step: F) -> Self
    where
        F: FnOnce(&[V]) -> Fut + Send + 'static,
        Fut: Future<Output = Fallible<V, P, G>> + Send + 'static,
    {
        self.steps
            .push_back(Box::new(move |resolved: &[V]| step(resolved).boxed()));
        self
    }

    /// Returns the number of steps added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step was added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Completes the handle with a finisher that turns every resolved value
    /// into the final result.
    ///
    /// The finisher only runs if every step succeeded.
    pub fn finish<O, F>(self, finish: F) -> Steps<V, O, P, G>
    where
        F: FnOnce(Vec<V>) -> Fallible<O, P, G> + Send + 'static,
    {
        let resolved = Vec::with_capacity(self.steps.len());
        Steps {
            pending: self.steps,
            resolved,
            finish: Some(Box::new(finish)),
            started: false,
        }
    }
}

impl<V, P, G> fmt::Debug for StepsBuilder<V, P, G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StepsBuilder")
            .field("steps", &self.steps.len())
            .finish()
    }
}

/// A [`Suspension`] that runs a fixed sequence of steps, then a finisher.
///
/// # Panics
///
/// Resuming it out of protocol (a second `Start`, a `Resolved` before
/// `Start`, or any resume after it is done) panics with a
/// [`ProtocolViolation`].
///
/// # Examples
///
/// ```rust
/// use futures::future::ready;
/// use safe_error::suspension::{StepsBuilder, drive};
///
/// let handle = StepsBuilder::<String, &str>::new()
///     .step(|_| ready(Ok(String::from("user-42"))))
///     .step(|resolved| {
///         let user = resolved[0].clone();
///         async move { Ok(format!("{user}/orders")) }
///     })
///     .finish(|mut values| Ok(values.pop().unwrap_or_default()));
///
/// let path = futures::executor::block_on(drive(handle));
/// assert_eq!(path.as_deref().ok(), Some("user-42/orders"));
/// ```
pub struct Steps<V, O, P, G = Untagged> {
    pending: VecDeque<StepFn<V, P, G>>,
    resolved: Vec<V>,
    finish: Option<FinishFn<V, O, P, G>>,
    started: bool,
}

impl<V, O, P, G> Steps<V, O, P, G> {
    /// Returns the number of steps not yet started.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl<V: 'static, O, P: 'static, G: 'static> Suspension for Steps<V, O, P, G> {
    type Value = V;
    type Payload = P;
    type Tag = G;
    type Output = O;
    type Pending = BoxFuture<'static, Fallible<V, P, G>>;

    fn resume(&mut self, input: Resume<V>) -> Step<Self::Pending, Fallible<O, P, G>> {
        if self.finish.is_none() {
            ProtocolViolation::ResumedAfterCompletion.raise();
        }
        match (input, self.started) {
            (Resume::Start, false) => self.started = true,
            (Resume::Resolved(value), true) => self.resolved.push(value),
            (Resume::Start, true) => ProtocolViolation::StartedTwice.raise(),
            (Resume::Resolved(_), false) => ProtocolViolation::ResolvedBeforeStart.raise(),
        }

        if let Some(step) = self.pending.pop_front() {
            return Step::Await(step(&self.resolved));
        }
        match self.finish.take() {
            Some(finish) => Step::Done(finish(std::mem::take(&mut self.resolved))),
            None => ProtocolViolation::ResumedAfterCompletion.raise(),
        }
    }
}

impl<V, O, P, G> fmt::Debug for Steps<V, O, P, G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Steps")
            .field("remaining", &self.pending.len())
            .field("resolved", &self.resolved.len())
            .field("started", &self.started)
            .field("finished", &self.finish.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::failure;
    use crate::suspension::drive;
    use futures::future::ready;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn sum_of(
        first: Fallible<i32, &'static str>,
        second_created: Arc<AtomicBool>,
    ) -> Steps<i32, i32, &'static str> {
        StepsBuilder::new()
            .step(move |_| ready(first))
            .step(move |_| {
                second_created.store(true, Ordering::SeqCst);
                ready(Ok(11))
            })
            .finish(|values| Ok(values.iter().sum()))
    }

    #[rstest]
    #[tokio::test]
    async fn test_steps_run_in_order() {
        let created = Arc::new(AtomicBool::new(false));
        assert_eq!(drive(sum_of(Ok(10), Arc::clone(&created))).await, Ok(21));
        assert!(created.load(Ordering::SeqCst));
    }

    #[rstest]
    #[tokio::test]
    async fn test_second_step_never_created_after_first_failure() {
        let created = Arc::new(AtomicBool::new(false));
        let result = drive(sum_of(Err(failure("F")), Arc::clone(&created))).await;
        assert_eq!(result, Err(failure("F")));
        assert!(!created.load(Ordering::SeqCst));
    }

    #[rstest]
    fn test_resume_hands_out_one_step_at_a_time() {
        let mut handle = sum_of(Ok(10), Arc::new(AtomicBool::new(false)));
        assert_eq!(handle.remaining(), 2);
        assert!(handle.resume(Resume::Start).is_await());
        assert_eq!(handle.remaining(), 1);
        assert!(handle.resume(Resume::Resolved(10)).is_await());
        assert_eq!(handle.remaining(), 0);
        assert!(matches!(handle.resume(Resume::Resolved(11)), Step::Done(Ok(21))));
    }

    #[rstest]
    fn test_no_steps_finishes_on_start() {
        let mut handle = StepsBuilder::<i32, &str>::new().finish(|values| Ok(values.len()));
        assert!(matches!(handle.resume(Resume::Start), Step::Done(Ok(0))));
    }

    #[rstest]
    #[should_panic(expected = "handle started twice")]
    fn test_start_twice_panics() {
        let mut handle = sum_of(Ok(10), Arc::new(AtomicBool::new(false)));
        let _ = handle.resume(Resume::Start);
        let _ = handle.resume(Resume::Start);
    }

    #[rstest]
    #[should_panic(expected = "resolved value given before start")]
    fn test_resolved_before_start_panics() {
        let mut handle = sum_of(Ok(10), Arc::new(AtomicBool::new(false)));
        let _ = handle.resume(Resume::Resolved(1));
    }

    #[rstest]
    #[should_panic(expected = "handle resumed after it completed")]
    fn test_resume_after_done_panics() {
        let mut handle = StepsBuilder::<i32, &str>::new().finish(|_| Ok(()));
        let _ = handle.resume(Resume::Start);
        let _ = handle.resume(Resume::Resolved(1));
    }

    #[rstest]
    fn test_debug() {
        let handle = sum_of(Ok(1), Arc::new(AtomicBool::new(false)));
        assert_eq!(
            format!("{handle:?}"),
            "Steps { remaining: 2, resolved: 0, started: false, finished: false }"
        );
    }
}
