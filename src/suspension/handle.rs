//! The suspension handle protocol.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use crate::failure::Fallible;

/// The input given to a handle when it is resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resume<V> {
    /// First entry: nothing has been awaited yet.
    Start,
    /// The value the most recently yielded pending operation resolved to.
    Resolved(V),
}

impl<V> Resume<V> {
    /// Returns the resolved value, or `None` for `Start`.
    #[inline]
    pub fn resolved(self) -> Option<V> {
        match self {
            Self::Start => None,
            Self::Resolved(value) => Some(value),
        }
    }
}

/// What a handle hands back when resumed.
///
/// # Type Parameters
///
/// * `F` - The pending operation to wait on
/// * `O` - The final result
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<F, O> {
    /// Not done: wait for this pending operation, then resume.
    Await(F),
    /// Done: no more steps.
    Done(O),
}

impl<F, O> Step<F, O> {
    /// Returns `true` if this is `Await`.
    #[inline]
    pub const fn is_await(&self) -> bool {
        matches!(self, Self::Await(_))
    }

    /// Returns `true` if this is `Done`.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

impl<F, O: fmt::Debug> fmt::Debug for Step<F, O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Await(_) => formatter.debug_tuple("Await").field(&"<pending>").finish(),
            Self::Done(output) => formatter.debug_tuple("Done").field(output).finish(),
        }
    }
}

/// A paused multi-step computation.
///
/// Each pending operation resolves to a [`Fallible`]; a failure stops the
/// computation before the handle sees it. The final result is itself a
/// [`Fallible`], so a handle may also finish with a failure it built.
///
/// A handle is owned by exactly one drive loop, which resumes it with
/// [`Resume::Start`] once and then with [`Resume::Resolved`] after every
/// successful wait. Because [`Step::Await`] carries a `Future`, a handle
/// cannot yield anything but a pending operation while not done.
///
/// # Examples
///
/// An explicit state machine that adds two resolved values:
///
/// ```rust
/// use futures::future::{Ready, ready};
/// use safe_error::failure::Fallible;
/// use safe_error::suspension::{Resume, Step, Suspension, drive};
///
/// enum Sum {
///     First(i32, i32),
///     Second(i32),
///     Finished,
/// }
///
/// impl Suspension for Sum {
///     type Value = i32;
///     type Payload = &'static str;
///     type Tag = safe_error::failure::Untagged;
///     type Output = i32;
///     type Pending = Ready<Fallible<i32, &'static str>>;
///
///     fn resume(&mut self, input: Resume<i32>) -> Step<Self::Pending, Fallible<i32, &'static str>> {
///         match (std::mem::replace(self, Sum::Finished), input) {
///             (Sum::First(first, second), Resume::Start) => {
///                 *self = Sum::Second(second);
///                 Step::Await(ready(Ok(first)))
///             }
///             (Sum::Second(second), Resume::Resolved(first)) => {
///                 *self = Sum::Finished;
///                 Step::Await(ready(Ok(first + second)))
///             }
///             (Sum::Finished, Resume::Resolved(total)) => Step::Done(Ok(total)),
///             _ => unreachable!(),
///         }
///     }
/// }
///
/// assert_eq!(futures::executor::block_on(drive(Sum::First(10, 11))), Ok(21));
/// ```
pub trait Suspension {
    /// The success type each pending operation resolves to.
    type Value;
    /// The failure payload type shared by the steps and the final result.
    type Payload;
    /// The failure tag type shared by the steps and the final result.
    type Tag;
    /// The success type of the final result.
    type Output;
    /// The pending operation type.
    type Pending: Future<Output = Fallible<Self::Value, Self::Payload, Self::Tag>>;

    /// Resumes the computation with `input`.
    fn resume(
        &mut self,
        input: Resume<Self::Value>,
    ) -> Step<Self::Pending, Fallible<Self::Output, Self::Payload, Self::Tag>>;
}

impl<S: Suspension + ?Sized> Suspension for Box<S> {
    type Value = S::Value;
    type Payload = S::Payload;
    type Tag = S::Tag;
    type Output = S::Output;
    type Pending = S::Pending;

    #[inline]
    fn resume(
        &mut self,
        input: Resume<Self::Value>,
    ) -> Step<Self::Pending, Fallible<Self::Output, Self::Payload, Self::Tag>> {
        (**self).resume(input)
    }
}

/// A handle backed by a closure. Created by [`from_fn`].
pub struct FromFn<F, V> {
    function: F,
    value: PhantomData<fn(V)>,
}

impl<F, V> fmt::Debug for FromFn<F, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F, V, O, P, G, Fut> Suspension for FromFn<F, V>
where
    F: FnMut(Resume<V>) -> Step<Fut, Fallible<O, P, G>>,
    Fut: Future<Output = Fallible<V, P, G>>,
{
    type Value = V;
    type Payload = P;
    type Tag = G;
    type Output = O;
    type Pending = Fut;

    #[inline]
    fn resume(&mut self, input: Resume<V>) -> Step<Fut, Fallible<O, P, G>> {
        (self.function)(input)
    }
}

/// Creates a handle whose resumption is the given closure.
///
/// The closure keeps its own state between calls; it is called once with
/// [`Resume::Start`] and then once per resolved value.
///
/// # Examples
///
/// ```rust
/// use futures::future::ready;
/// use safe_error::failure::Failure;
/// use safe_error::suspension::{Resume, Step, drive, from_fn};
///
/// let mut total = 0;
/// let countdown = from_fn(move |input: Resume<u32>| {
///     total += input.resolved().unwrap_or(0);
///     if total >= 6 {
///         Step::Done(Ok::<u32, Failure<&str>>(total))
///     } else {
///         Step::Await(ready(Ok::<u32, Failure<&str>>(3)))
///     }
/// });
///
/// assert_eq!(futures::executor::block_on(drive(countdown)), Ok(6));
/// ```
pub fn from_fn<V, O, P, G, Fut, F>(function: F) -> FromFn<F, V>
where
    F: FnMut(Resume<V>) -> Step<Fut, Fallible<O, P, G>>,
    Fut: Future<Output = Fallible<V, P, G>>,
{
    FromFn {
        function,
        value: PhantomData,
    }
}
