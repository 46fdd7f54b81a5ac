//! Asynchronous capture boundary.
//!
//! [`Settle`] and [`SettleTry`] are hand-written futures built with
//! `pin_project_lite`, so settling a future adds no allocation of its own.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{CatchUnwind, JoinAll, join_all};
use pin_project_lite::pin_project;

use super::panic::Panic;
use super::sync::{capture_panic, catch_sync};
use crate::failure::{Fallible, Failure, failure};

pin_project! {
    /// A future that never panics: a panic while polling the inner future
    /// resolves to a failure instead.
    ///
    /// Returned by [`settle`] and [`wrap_async`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Settle<F> {
        #[pin]
        state: SettleState<F>,
    }
}

pin_project! {
    #[project = SettleStateProj]
    enum SettleState<F> {
        // Polling the caught future.
        Running {
            #[pin]
            future: CatchUnwind<AssertUnwindSafe<F>>,
        },
        // The function panicked before it produced a future.
        Panicked {
            failure: Option<Failure<Panic>>,
        },
    }
}

impl<F: Future> Future for Settle<F> {
    type Output = Fallible<F::Output, Panic>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().state.project() {
            SettleStateProj::Running { future } => future
                .poll(context)
                .map(|outcome| outcome.map_err(capture_panic)),
            SettleStateProj::Panicked { failure } => Poll::Ready(Err(failure.take().expect(
                "Settle internal error: the captured panic was already returned. \
                 This indicates the future was polled after completion.",
            ))),
        }
    }
}

/// Returns a future that resolves to the output of `future`, or to a failure
/// if polling it panics.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::settle;
///
/// async fn connect() -> u32 {
///     panic!("lost connection")
/// }
///
/// futures::executor::block_on(async {
///     assert_eq!(settle(async { 10 }).await.ok(), Some(10));
///
///     let failure = settle(connect()).await.unwrap_err();
///     assert_eq!(failure.payload().message(), Some("lost connection"));
/// });
/// ```
pub fn settle<F: Future>(future: F) -> Settle<F> {
    Settle {
        state: SettleState::Running {
            future: AssertUnwindSafe(future).catch_unwind(),
        },
    }
}

/// Wraps an async `function` so that a panic, whether raised while calling
/// it or while polling the future it returns, resolves to a failure.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::wrap_async;
///
/// let checked = wrap_async(|value: i32| {
///     assert!(value >= 0, "negative input");
///     async move { value * 2 }
/// });
///
/// futures::executor::block_on(async {
///     assert_eq!(checked(21).await.ok(), Some(42));
///     assert!(checked(-1).await.is_err());
/// });
/// ```
pub fn wrap_async<A, Fut, F>(function: F) -> impl Fn(A) -> Settle<Fut>
where
    F: Fn(A) -> Fut,
    Fut: Future,
{
    move |argument| match catch_sync(|| function(argument)) {
        Ok(future) => settle(future),
        Err(failure) => Settle {
            state: SettleState::Panicked {
                failure: Some(failure),
            },
        },
    }
}

pin_project! {
    /// A future over a `Result` that resolves `Err(e)` to a failure whose
    /// payload is `e`.
    ///
    /// Returned by [`settle_try`] and [`wrap_async_try`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct SettleTry<F> {
        #[pin]
        future: F,
    }
}

impl<F, T, E> Future for SettleTry<F>
where
    F: Future<Output = Result<T, E>>,
{
    type Output = Fallible<T, E>;

    #[inline]
    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.project()
            .future
            .poll(context)
            .map(|outcome| outcome.map_err(failure))
    }
}

/// Returns a future that resolves `Ok(v)` to `Ok(v)` and `Err(e)` to a
/// failure wrapping `e`.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::settle_try;
///
/// futures::executor::block_on(async {
///     let rejected = settle_try(async { Err::<i32, _>("refused") }).await;
///     assert_eq!(*rejected.unwrap_err().payload(), "refused");
///
///     let fulfilled = settle_try(async { Ok::<_, &str>(7) }).await;
///     assert_eq!(fulfilled.ok(), Some(7));
/// });
/// ```
pub const fn settle_try<F, T, E>(future: F) -> SettleTry<F>
where
    F: Future<Output = Result<T, E>>,
{
    SettleTry { future }
}

/// Wraps a `Result`-returning async `function` with [`settle_try`].
pub fn wrap_async_try<A, T, E, Fut, F>(function: F) -> impl Fn(A) -> SettleTry<Fut>
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    move |argument| settle_try(function(argument))
}

/// Settles every future concurrently and collects the outcomes in input order.
///
/// Nothing is short-circuited: a failure in one item does not stop the
/// others.
///
/// # Examples
///
/// ```rust
/// use futures::future::{BoxFuture, FutureExt, ready};
/// use safe_error::capture::settle_all;
///
/// let pending: Vec<BoxFuture<'static, Result<&str, &str>>> = vec![
///     ready(Ok("str")).boxed(),
///     ready(Err("rejected")).boxed(),
/// ];
///
/// let outcomes = futures::executor::block_on(settle_all(pending));
/// assert_eq!(outcomes[0].as_ref().ok(), Some(&"str"));
/// assert!(outcomes[1].is_err());
/// ```
pub fn settle_all<I, T, E>(futures: I) -> JoinAll<SettleTry<I::Item>>
where
    I: IntoIterator,
    I::Item: Future<Output = Result<T, E>>,
{
    join_all(futures.into_iter().map(settle_try))
}
