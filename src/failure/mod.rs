//! Failure values.
//!
//! This module defines what a failure looks like and how to recognize one:
//!
//! - [`Failure`]: an immutable payload, optionally stamped with a tag
//! - [`Fallible`]: a value that is either a success or a [`Failure`]
//! - [`tagged`]: binds a tag and returns a [`TaggedConstructor`]
//! - [`is_failure`]: decides whether a value is a failure
//!
//! # Examples
//!
//! ## Untagged Failures
//!
//! ```rust
//! use safe_error::failure::{failure, is_failure};
//!
//! let error = failure("Hi");
//!
//! assert!(is_failure(&error));
//! assert_eq!(*error.payload(), "Hi");
//! assert!(!error.is_tagged());
//! ```
//!
//! ## Dispatching on Tags
//!
//! ```rust
//! use safe_error::failure::{Fallible, tagged};
//!
//! let below_zero = tagged("a");
//! let below_one = tagged("b");
//!
//! let classify = |x: f64| -> Fallible<f64, &'static str, &'static str> {
//!     if x <= 0.0 {
//!         Err(below_zero.make("Number is smaller than 0"))
//!     } else if x < 1.0 {
//!         Err(below_one.make("Number is smaller than 1"))
//!     } else {
//!         Ok(x)
//!     }
//! };
//!
//! assert_eq!(classify(0.0).unwrap_err().tag(), Some(&"a"));
//! assert_eq!(classify(0.5).unwrap_err().tag(), Some(&"b"));
//! assert_eq!(classify(1.0), Ok(1.0));
//! ```

mod check;
mod tagged;
mod value;

pub use check::{MaybeFailure, is_failure};
pub use tagged::{TaggedConstructor, tagged};
pub use value::{Fallible, Failure, Untagged, failure, generic_failure};
