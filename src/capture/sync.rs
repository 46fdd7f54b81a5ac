//! Synchronous capture boundary.
//!
//! Multi-argument functions are wrapped by taking their arguments as a tuple:
//!
//! ```rust
//! use safe_error::capture::wrap_sync;
//!
//! let divide = wrap_sync(|(dividend, divisor): (i32, i32)| dividend / divisor);
//!
//! assert_eq!(divide((10, 2)).ok(), Some(5));
//! assert!(divide((1, 0)).is_err());
//! ```

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::panic::Panic;
use crate::failure::{Fallible, Failure, failure};

/// Runs `thunk`, converting a panic into a failure.
///
/// A normal return value is passed through unchanged.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::catch_sync;
///
/// assert_eq!(catch_sync(|| 1 + 1).ok(), Some(2));
///
/// let failure = catch_sync(|| -> i32 { panic!("boom") }).unwrap_err();
/// assert_eq!(failure.payload().message(), Some("boom"));
/// ```
pub fn catch_sync<R, F>(thunk: F) -> Fallible<R, Panic>
where
    F: FnOnce() -> R,
{
    catch_unwind(AssertUnwindSafe(thunk)).map_err(capture_panic)
}

pub(super) fn capture_panic(payload: Box<dyn Any + Send>) -> Failure<Panic> {
    let panic = Panic::new(payload);
    tracing::debug!(
        reason = panic.message().unwrap_or("<non-string payload>"),
        "captured panic"
    );
    failure(panic)
}

/// Wraps `function` so that a panic during a call returns a failure instead.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::wrap_sync;
/// use safe_error::failure::is_failure;
///
/// let first_byte = wrap_sync(|input: &[u8]| input[0]);
///
/// assert_eq!(first_byte(b"abc".as_slice()).ok(), Some(b'a'));
/// assert!(is_failure(&first_byte(b"".as_slice())));
/// ```
pub fn wrap_sync<A, R, F>(function: F) -> impl Fn(A) -> Fallible<R, Panic>
where
    F: Fn(A) -> R,
{
    move |argument| catch_sync(|| function(argument))
}

/// Wraps a `Result`-returning `function` so that `Err(e)` becomes a failure
/// whose payload is `e`.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::wrap_try;
///
/// let parse = wrap_try(|input: &str| input.parse::<u8>());
///
/// assert_eq!(parse("42").ok(), Some(42));
/// assert_eq!(
///     parse("%FF").unwrap_err().payload().to_string(),
///     "invalid digit found in string"
/// );
/// ```
pub fn wrap_try<A, T, E, F>(function: F) -> impl Fn(A) -> Fallible<T, E>
where
    F: Fn(A) -> Result<T, E>,
{
    move |argument| function(argument).map_err(failure)
}
