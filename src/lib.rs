//! # safe-error
//!
//! Failures as ordinary values instead of panics or `?`-propagated errors,
//! plus a trampoline that composes several fallible asynchronous steps and
//! stops at the first failure.
//!
//! ## Overview
//!
//! - **Failure values**: [`Failure`] wraps a payload and an optional tag.
//!   A success-or-failure value is a [`Fallible`], and [`is_failure`] decides
//!   whether any supported value is a failure without inspecting its payload.
//! - **Capture boundary**: [`wrap_sync`], [`wrap_async`] and [`settle`] turn
//!   panics into failure values; [`wrap_try`], [`settle_try`] and
//!   [`wrap_async_try`] do the same for `Err` results.
//! - **Drive loop**: [`drive`] resumes a [`Suspension`] handle, awaits each
//!   pending step it yields and short-circuits on the first failure.
//!
//! ## Feature Flags
//!
//! - `async` (default): the asynchronous capture boundary and the drive loop
//!
//! ## Example
//!
//! ```rust
//! use safe_error::prelude::*;
//!
//! let not_positive = tagged("not-positive");
//!
//! let check = |x: i32| -> Fallible<i32, &'static str, &'static str> {
//!     if x <= 0 { Err(not_positive.make("number must be positive")) } else { Ok(x) }
//! };
//!
//! let outcome = check(0);
//! assert!(is_failure(&outcome));
//! let failure = outcome.unwrap_err();
//! assert_eq!(failure.tag(), Some(&"not-positive"));
//! assert_eq!(*failure.payload(), "number must be positive");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use safe_error::prelude::*;
/// ```
pub mod prelude {
    pub use crate::capture::*;
    pub use crate::failure::*;

    #[cfg(feature = "async")]
    pub use crate::suspension::*;
}

pub mod capture;
pub mod failure;

#[cfg(feature = "async")]
pub mod suspension;

pub use capture::{Panic, catch_sync, wrap_sync, wrap_try};
pub use failure::{
    Fallible, Failure, MaybeFailure, TaggedConstructor, Untagged, failure, generic_failure,
    is_failure, tagged,
};

#[cfg(feature = "async")]
pub use capture::{Settle, SettleTry, settle, settle_all, settle_try, wrap_async, wrap_async_try};

#[cfg(feature = "async")]
pub use suspension::{
    Drive, ProtocolViolation, Resume, Step, Steps, StepsBuilder, Suspension, drive, from_fn,
};
