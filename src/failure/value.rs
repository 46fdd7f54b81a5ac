//! The failure value and its success-or-failure alias.
//!
//! A [`Failure<P, G>`] holds a payload of type `P` that is set exactly once at
//! construction, and an optional tag of type `G`. A computation that may fail
//! returns a [`Fallible<T, P, G>`], which is `Result<T, Failure<P, G>>`: the
//! `Err` discriminant is the identity marker, so no success value of any type
//! can be mistaken for a failure and the check never looks at the payload.
//!
//! # Examples
//!
//! ```rust
//! use safe_error::failure::{Fallible, failure};
//!
//! fn parse_port(input: &str) -> Fallible<u16, String> {
//!     input
//!         .parse()
//!         .map_err(|_| failure(format!("invalid port: {input}")))
//! }
//!
//! assert_eq!(parse_port("8080"), Ok(8080));
//! assert_eq!(
//!     parse_port("http").unwrap_err().payload(),
//!     "invalid port: http"
//! );
//! ```

use std::error::Error;
use std::fmt;

/// A value that is either a success `T` or a [`Failure`].
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::{Fallible, failure};
///
/// let success: Fallible<i32, &str> = Ok(0);
/// let failed: Fallible<i32, &str> = Err(failure("boom"));
///
/// assert!(success.is_ok());
/// assert!(failed.is_err());
/// ```
pub type Fallible<T, P, G = Untagged> = Result<T, Failure<P, G>>;

/// The tag type of failures built without a tag.
///
/// `Untagged` has no values, so a `Failure<P, Untagged>` provably carries no
/// tag and [`Failure::tag`] always returns `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Untagged {}

impl fmt::Display for Untagged {
    fn fmt(&self, _formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

/// An immutable failure value.
///
/// `Failure<P, G>` carries a payload (the substantive error information) and,
/// when it was built through a [`TaggedConstructor`](super::TaggedConstructor),
/// a tag used as a discriminant for multi-way dispatch.
///
/// The fields are private and there are no setters: once built, a failure is
/// only read or moved.
///
/// # Type Parameters
///
/// * `P` - The payload type
/// * `G` - The tag type, [`Untagged`] by default
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::{Failure, tagged};
///
/// let plain = Failure::new("disk full");
/// assert!(!plain.is_tagged());
///
/// let io = tagged("io").make("disk full");
/// assert!(io.is_tagged());
/// assert_eq!(io.tag(), Some(&"io"));
/// assert_eq!(*io.payload(), "disk full");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Failure<P, G = Untagged> {
    payload: P,
    tag: Option<G>,
}

impl<P> Failure<P> {
    /// Creates an untagged failure wrapping `payload`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::Failure;
    ///
    /// let error = Failure::new(404);
    /// assert_eq!(*error.payload(), 404);
    /// assert_eq!(error.tag(), None);
    /// ```
    #[inline]
    pub const fn new(payload: P) -> Self {
        Self { payload, tag: None }
    }

    /// Re-types an untagged failure so it fits a signature with tag type `G`.
    ///
    /// The result is still untagged. This lets untagged and tagged failures
    /// share one [`Fallible`] return type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::{Fallible, failure, tagged};
    ///
    /// fn lookup(key: &str) -> Fallible<u32, &'static str, &'static str> {
    ///     match key {
    ///         "" => Err(failure("empty key").retag()),
    ///         "missing" => Err(tagged("not-found").make("no such key")),
    ///         _ => Ok(1),
    ///     }
    /// }
    ///
    /// assert!(!lookup("").unwrap_err().is_tagged());
    /// assert!(lookup("missing").unwrap_err().is_tagged());
    /// ```
    #[inline]
    pub fn retag<G>(self) -> Failure<P, G> {
        Failure {
            payload: self.payload,
            tag: None,
        }
    }
}

impl<P, G> Failure<P, G> {
    /// Creates a failure stamped with `tag`.
    ///
    /// Prefer [`tagged`](super::tagged) when the same tag is used from
    /// several places.
    #[inline]
    pub const fn with_tag(tag: G, payload: P) -> Self {
        Self {
            payload,
            tag: Some(tag),
        }
    }

    /// Returns `true` if a tag was stamped at construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::{Failure, failure};
    ///
    /// assert!(!failure("plain").is_tagged());
    /// assert!(Failure::with_tag("kind", "tagged").is_tagged());
    /// ```
    #[inline]
    pub const fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    /// Returns the stamped tag, or `None` if the failure is untagged.
    #[inline]
    pub const fn tag(&self) -> Option<&G> {
        self.tag.as_ref()
    }

    /// Returns `true` if the failure is tagged with a tag equal to `tag`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::tagged;
    ///
    /// let error = tagged("foo").make(());
    /// assert!(error.is_tagged_with(&"foo"));
    /// assert!(!error.is_tagged_with(&"bar"));
    /// ```
    #[inline]
    pub fn is_tagged_with(&self, tag: &G) -> bool
    where
        G: PartialEq,
    {
        self.tag.as_ref() == Some(tag)
    }

    /// Returns a reference to the payload stored at construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::failure;
    ///
    /// let error = failure(vec![1, 2, 3]);
    /// assert_eq!(error.payload(), &vec![1, 2, 3]);
    /// ```
    #[inline]
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the failure and returns its payload.
    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Consumes the failure and returns its payload and tag.
    #[inline]
    pub fn into_parts(self) -> (P, Option<G>) {
        (self.payload, self.tag)
    }

    /// Wraps the failure in the `Err` side of a [`Fallible`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::{Fallible, failure};
    ///
    /// let outcome: Fallible<i32, &str> = failure("nope").into_fallible();
    /// assert!(outcome.is_err());
    /// ```
    #[inline]
    pub const fn into_fallible<T>(self) -> Fallible<T, P, G> {
        Err(self)
    }
}

/// Creates an untagged failure wrapping `payload`.
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::{failure, is_failure};
///
/// let error = failure("Hi");
/// assert!(is_failure(&error));
/// assert_eq!(*error.payload(), "Hi");
/// ```
#[inline]
pub const fn failure<P>(payload: P) -> Failure<P> {
    Failure::new(payload)
}

/// Returns a failure that carries no information.
///
/// Useful when the caller only needs to know that something failed.
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::generic_failure;
///
/// let error = generic_failure();
/// assert_eq!(error.payload(), &());
/// assert!(!error.is_tagged());
/// ```
#[inline]
pub const fn generic_failure() -> Failure<()> {
    Failure::new(())
}

// =============================================================================
// Formatting and std::error::Error
// =============================================================================

impl<P: fmt::Debug, G: fmt::Debug> fmt::Debug for Failure<P, G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => formatter
                .debug_struct("Failure")
                .field("tag", tag)
                .field("payload", &self.payload)
                .finish(),
            None => formatter.debug_tuple("Failure").field(&self.payload).finish(),
        }
    }
}

impl<P: fmt::Display, G: fmt::Display> fmt::Display for Failure<P, G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(formatter, "{tag}: {}", self.payload),
            None => write!(formatter, "{}", self.payload),
        }
    }
}

impl<P, G> Error for Failure<P, G>
where
    P: Error + 'static,
    G: fmt::Debug + fmt::Display,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.payload)
    }
}
