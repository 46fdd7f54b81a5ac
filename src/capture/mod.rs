//! Converting native faults into failure values.
//!
//! Functions at this boundary never let a fault escape: whatever the wrapped
//! code raises comes back as the `Err` side of a [`Fallible`](crate::Fallible).
//!
//! Rust has two fault channels, and each has its own adapters:
//!
//! | Fault | Sync | Async |
//! |-------|------|-------|
//! | Unwinding panic | [`catch_sync`], [`wrap_sync`] | [`settle`], [`wrap_async`] |
//! | `Err` result | [`wrap_try`] | [`settle_try`], [`wrap_async_try`], [`settle_all`] |
//!
//! A captured panic keeps its original payload inside a [`Panic`]. A captured
//! `Err(e)` becomes a failure whose payload is `e` itself.
//!
//! Side effects performed before the fault are not rolled back.
//!
//! Capturing a panic does not silence the panic hook, so the panic message is
//! still printed by the default hook.

mod panic;
mod sync;

#[cfg(feature = "async")]
mod settle;

pub use panic::Panic;
pub use sync::{catch_sync, wrap_sync, wrap_try};

#[cfg(feature = "async")]
pub use settle::{Settle, SettleTry, settle, settle_all, settle_try, wrap_async, wrap_async_try};
