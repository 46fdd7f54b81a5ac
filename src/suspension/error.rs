//! Contract violations of the suspension protocol.

/// A misuse of the suspension protocol.
///
/// These are defects in the code driving or implementing a handle, not
/// runtime failures, so they are raised as panics carrying this value's
/// message instead of being returned as failure values.
///
/// # Examples
///
/// ```rust
/// use safe_error::suspension::ProtocolViolation;
///
/// assert_eq!(
///     ProtocolViolation::ResumedAfterCompletion.to_string(),
///     "suspension protocol violation: handle resumed after it completed"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ProtocolViolation {
    /// `Resume::Start` was given to a handle that had already started.
    #[error("suspension protocol violation: handle started twice")]
    StartedTwice,
    /// `Resume::Resolved` was given to a handle that had not started.
    #[error("suspension protocol violation: resolved value given before start")]
    ResolvedBeforeStart,
    /// The handle was resumed after it returned `Step::Done`.
    #[error("suspension protocol violation: handle resumed after it completed")]
    ResumedAfterCompletion,
    /// The drive loop was polled after it returned `Poll::Ready`.
    #[error("suspension protocol violation: drive loop polled after completion")]
    PolledAfterCompletion,
}

impl ProtocolViolation {
    /// Panics with this violation's message.
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        panic!("{self}")
    }
}
