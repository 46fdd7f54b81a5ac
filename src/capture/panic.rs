//! The payload of a captured panic.

use std::any::Any;
use std::fmt;
use std::panic::resume_unwind;

/// A panic caught at the capture boundary.
///
/// The original panic object is kept untouched; [`Panic::into_inner`] returns
/// the exact box that was unwound, and [`Panic::resume`] re-raises it.
///
/// # Examples
///
/// ```rust
/// use safe_error::capture::catch_sync;
///
/// let outcome = catch_sync(|| -> i32 { panic!("division by zero") });
/// let failure = outcome.unwrap_err();
///
/// assert_eq!(failure.payload().message(), Some("division by zero"));
/// ```
#[derive(thiserror::Error)]
#[error("panicked: {}", describe(.payload))]
pub struct Panic {
    payload: Box<dyn Any + Send>,
}

impl Panic {
    /// Wraps a panic payload as returned by `std::panic::catch_unwind`.
    #[inline]
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Returns the panic message if the payload is a `&str` or a `String`.
    ///
    /// `panic!` with a literal produces a `&'static str` payload, and
    /// `panic!` with format arguments produces a `String`.
    pub fn message(&self) -> Option<&str> {
        let payload: &(dyn Any + Send) = &*self.payload;
        payload
            .downcast_ref::<&'static str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
    }

    /// Returns the payload if it is of type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::capture::catch_sync;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Overdrawn(u32);
    ///
    /// let failure = catch_sync(|| -> u32 { std::panic::panic_any(Overdrawn(7)) }).unwrap_err();
    /// assert_eq!(failure.payload().downcast_ref::<Overdrawn>(), Some(&Overdrawn(7)));
    /// ```
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let payload: &(dyn Any + Send) = &*self.payload;
        payload.downcast_ref::<T>()
    }

    /// Returns the original panic payload.
    #[inline]
    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Re-raises the captured panic with its original payload.
    ///
    /// This is the explicit way back to unwinding semantics; the library
    /// itself never re-raises a captured fault.
    pub fn resume(self) -> ! {
        resume_unwind(self.payload)
    }
}

#[allow(clippy::borrowed_box)]
fn describe(payload: &Box<dyn Any + Send>) -> &str {
    let payload: &(dyn Any + Send) = &**payload;
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("Box<dyn Any>")
}

impl fmt::Debug for Panic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Panic")
            .field(&describe(&self.payload))
            .finish()
    }
}
