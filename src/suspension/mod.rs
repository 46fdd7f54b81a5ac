//! Composing fallible asynchronous steps with a trampoline.
//!
//! A [`Suspension`] is a paused multi-step computation. Each time it is
//! resumed it either hands back a pending operation to wait on
//! ([`Step::Await`]) or finishes ([`Step::Done`]). The first resume carries
//! [`Resume::Start`]; every later resume carries the value the previous
//! pending operation resolved to.
//!
//! [`drive`] is the trampoline that runs the protocol:
//!
//! 1. Resume the handle.
//! 2. If it awaits, wait for the pending operation to settle.
//! 3. If the settled value is a failure, stop: the handle is never resumed
//!    again and the failure is the result.
//! 4. Otherwise resume the handle with the value and go to 2.
//! 5. When the handle is done, its final value is the result.
//!
//! Only one pending operation is outstanding at a time, and step *k + 1* is
//! not created before step *k* has settled and been checked.
//!
//! # Examples
//!
//! ```rust
//! use futures::future::ready;
//! use safe_error::failure::{Fallible, failure};
//! use safe_error::suspension::{StepsBuilder, drive};
//!
//! let sum = StepsBuilder::<i32, &str>::new()
//!     .step(|_| ready(Ok(10)))
//!     .step(|_| ready(Ok(11)))
//!     .finish(|values| Ok(values.iter().sum::<i32>()));
//! assert_eq!(futures::executor::block_on(drive(sum)), Ok(21));
//!
//! let short_circuited = StepsBuilder::<i32, &str>::new()
//!     .step(|_| ready(Err(failure("step 1 failed"))))
//!     .step(|_| -> futures::future::Ready<Fallible<i32, &'static str>> {
//!         unreachable!("never created")
//!     })
//!     .finish(|values| Ok(values.iter().sum::<i32>()));
//! assert_eq!(
//!     futures::executor::block_on(drive(short_circuited)),
//!     Err(failure("step 1 failed"))
//! );
//! ```

mod drive;
mod error;
mod handle;
mod steps;

pub use drive::{Drive, drive};
pub use error::ProtocolViolation;
pub use handle::{FromFn, Resume, Step, Suspension, from_fn};
pub use steps::{Steps, StepsBuilder};
