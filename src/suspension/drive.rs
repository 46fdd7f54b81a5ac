//! The drive loop.
//!
//! [`Drive`] is a hand-written state machine rather than an `async fn` so
//! that it can be named, stored and polled without boxing:
//!
//! - `Resuming` -> `Waiting` (the handle yielded a pending operation)
//! - `Waiting` -> `Resuming` (the operation settled to a success)
//! - `Waiting` -> `Finished` (the operation settled to a failure)
//! - `Resuming` -> `Finished` (the handle is done)

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use pin_project_lite::pin_project;

use super::error::ProtocolViolation;
use super::handle::{Resume, Step, Suspension};
use crate::failure::Fallible;

pin_project! {
    /// A future that drives a [`Suspension`] to its final result or to the
    /// first failure one of its pending operations settles to.
    ///
    /// Created by [`drive`]. A failure a pending operation settles to and a
    /// failure the handle finishes with both surface as the `Err` side of
    /// its output.
    ///
    /// # Panics
    ///
    /// A panic raised while polling a pending operation is not caught and
    /// propagates out of `poll`. Wrap pending steps in
    /// [`settle`](crate::capture::settle) or
    /// [`settle_try`](crate::capture::settle_try) to turn such faults into
    /// failures.
    ///
    /// Polling again after it returned `Poll::Ready` panics with
    /// [`ProtocolViolation::PolledAfterCompletion`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Drive<S: Suspension> {
        handle: S,
        input: Option<Resume<S::Value>>,
        step: usize,
        #[pin]
        state: DriveState<S::Pending>,
    }
}

pin_project! {
    #[project = DriveStateProj]
    enum DriveState<F> {
        Resuming,
        Waiting {
            #[pin]
            pending: F,
        },
        Finished,
    }
}

impl<S: Suspension> Drive<S> {
    /// Returns how many pending operations the handle has yielded so far.
    #[inline]
    pub const fn steps(&self) -> usize {
        self.step
    }
}

impl<S: Suspension> Future for Drive<S> {
    type Output = Fallible<S::Output, S::Payload, S::Tag>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                DriveStateProj::Resuming => {
                    // INVARIANT: every transition into Resuming stores the input first
                    let input = this.input.take().expect(
                        "Drive internal error: resume input was already consumed. \
                         This indicates a state machine invariant violation.",
                    );
                    match this.handle.resume(input) {
                        Step::Await(pending) => {
                            *this.step += 1;
                            tracing::trace!(step = *this.step, "awaiting pending step");
                            this.state.set(DriveState::Waiting { pending });
                        }
                        Step::Done(result) => {
                            tracing::trace!(
                                steps = *this.step,
                                failed = result.is_err(),
                                "suspension completed"
                            );
                            this.state.set(DriveState::Finished);
                            return Poll::Ready(result);
                        }
                    }
                }
                DriveStateProj::Waiting { pending } => match ready!(pending.poll(context)) {
                    Ok(value) => {
                        *this.input = Some(Resume::Resolved(value));
                        this.state.set(DriveState::Resuming);
                    }
                    Err(failure) => {
                        tracing::debug!(
                            step = *this.step,
                            tagged = failure.is_tagged(),
                            "short-circuited on failure"
                        );
                        this.state.set(DriveState::Finished);
                        return Poll::Ready(Err(failure));
                    }
                },
                DriveStateProj::Finished => ProtocolViolation::PolledAfterCompletion.raise(),
            }
        }
    }
}

/// Drives `handle` until it is done or one of its pending operations settles
/// to a failure.
///
/// The returned future resolves to the handle's final result, or to the
/// first failure. After a failure the handle is never resumed, so none of
/// its remaining steps run. The handle is dropped together with the returned
/// future.
///
/// Panics raised by a pending operation propagate out of the drive loop; see
/// [`Drive`].
///
/// # Examples
///
/// ```rust
/// use futures::future::ready;
/// use safe_error::failure::{failure, tagged};
/// use safe_error::suspension::{StepsBuilder, drive};
///
/// let timeout = tagged("timeout");
///
/// let handle = StepsBuilder::<i32, &str, &str>::default()
///     .step(|_| ready(Ok(10)))
///     .step(move |_| ready(Err(timeout.make("step 2 timed out"))))
///     .finish(|values| Ok(values.iter().sum::<i32>()));
///
/// let failure = futures::executor::block_on(drive(handle)).unwrap_err();
/// assert!(failure.is_tagged_with(&"timeout"));
/// assert_eq!(*failure.payload(), "step 2 timed out");
/// ```
pub fn drive<S: Suspension>(handle: S) -> Drive<S> {
    Drive {
        handle,
        input: Some(Resume::Start),
        step: 0,
        state: DriveState::Resuming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::{Failure, failure};
    use crate::suspension::from_fn;
    use futures::FutureExt;
    use futures::future::{BoxFuture, Ready, ready};
    use rstest::rstest;
    use std::panic::AssertUnwindSafe;
    use std::task::Waker;

    type Reply = Step<Ready<Fallible<i32, &'static str>>, Fallible<i32, &'static str>>;

    fn two_steps(
        first: Fallible<i32, &'static str>,
        second: Fallible<i32, &'static str>,
    ) -> impl Suspension<
        Value = i32,
        Payload = &'static str,
        Tag = crate::Untagged,
        Output = i32,
        Pending = Ready<Fallible<i32, &'static str>>,
    > {
        let mut first = Some(first);
        let mut second = Some(second);
        let mut sum = 0;
        from_fn(move |input: Resume<i32>| -> Reply {
            sum += input.resolved().unwrap_or(0);
            match (first.take(), second.take()) {
                (Some(pending), rest) => {
                    second = rest;
                    Step::Await(ready(pending))
                }
                (None, Some(pending)) => Step::Await(ready(pending)),
                (None, None) => Step::Done(Ok(sum)),
            }
        })
    }

    #[rstest]
    #[tokio::test]
    async fn test_no_failure() {
        assert_eq!(drive(two_steps(Ok(10), Ok(11))).await, Ok(21));
    }

    #[rstest]
    #[case(Err(failure("F")), Ok(11))]
    #[case(Ok(10), Err(failure("F")))]
    #[tokio::test]
    async fn test_failure_short_circuits(
        #[case] first: Fallible<i32, &'static str>,
        #[case] second: Fallible<i32, &'static str>,
    ) {
        assert_eq!(drive(two_steps(first, second)).await, Err(failure("F")));
    }

    #[rstest]
    fn test_step_counter_stops_at_failure() {
        let mut driving = drive(two_steps(Err(failure("F")), Ok(11)));
        let mut context = Context::from_waker(Waker::noop());
        assert!(driving.poll_unpin(&mut context).is_ready());
        assert_eq!(driving.steps(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_terminal_failure_is_returned() {
        let handle = from_fn(|_: Resume<i32>| -> Reply { Step::Done(Err(failure("built"))) });
        let result: Fallible<i32, &str> = drive(handle).await;
        assert_eq!(result, Err(Failure::new("built")));
    }

    #[rstest]
    #[tokio::test]
    async fn test_falsy_values_are_fed_back() {
        let mut seen = Vec::new();
        let handle = from_fn(move |input: Resume<i32>| -> Reply {
            if let Resume::Resolved(value) = input {
                seen.push(value);
            }
            if seen.len() < 3 {
                Step::Await(ready(Ok(0)))
            } else {
                Step::Done(Ok(i32::try_from(seen.len()).unwrap_or(i32::MAX)))
            }
        });
        assert_eq!(drive(handle).await, Ok(3));
    }

    #[rstest]
    #[should_panic(expected = "drive loop polled after completion")]
    fn test_poll_after_completion_panics() {
        let mut driving = drive(two_steps(Ok(1), Ok(2)));
        let mut context = Context::from_waker(Waker::noop());
        assert!(driving.poll_unpin(&mut context).is_ready());
        let _ = driving.poll_unpin(&mut context);
    }

    #[rstest]
    fn test_step_counter_polls_through_opaque_handle() {
        let mut driving = drive(two_steps(Ok(10), Err(failure("F"))));
        let mut context = Context::from_waker(Waker::noop());
        assert_eq!(driving.poll_unpin(&mut context), Poll::Ready(Err(failure("F"))));
        assert_eq!(driving.steps(), 2);
    }

    async fn explode() -> Fallible<i32, &'static str> {
        panic!("step blew up")
    }

    #[rstest]
    #[tokio::test]
    async fn test_panicking_step_propagates_out_of_drive() {
        type Pending = BoxFuture<'static, Fallible<i32, &'static str>>;
        let handle = from_fn(|input: Resume<i32>| -> Step<Pending, Fallible<i32, &'static str>> {
            match input {
                Resume::Start => Step::Await(explode().boxed()),
                Resume::Resolved(value) => Step::Done(Ok(value)),
            }
        });

        let caught = AssertUnwindSafe(drive(handle)).catch_unwind().await;
        let payload = caught.expect_err("panic should escape the drive loop");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"step blew up"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_settled_panicking_step_becomes_failure() {
        type Pending = BoxFuture<'static, Fallible<i32, crate::Panic>>;
        let handle = from_fn(
            |input: Resume<i32>| -> Step<Pending, Fallible<i32, crate::Panic>> {
                match input {
                    Resume::Start => Step::Await(
                        crate::capture::settle(explode())
                            .map(|outcome| outcome.map(|value| value.unwrap_or(0)))
                            .boxed(),
                    ),
                    Resume::Resolved(value) => Step::Done(Ok(value)),
                }
            },
        );

        let failure = drive(handle).await.unwrap_err();
        assert_eq!(failure.payload().message(), Some("step blew up"));
    }
}
