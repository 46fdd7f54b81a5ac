//! Tagged failure constructors.
//!
//! A [`TaggedConstructor`] binds a tag once and stamps it into every failure
//! it builds. Dispatch is by tag equality, so two constructors created with
//! equal tags produce failures that cannot be told apart by tag.

use super::value::Failure;

/// Builds failures stamped with a fixed tag.
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::tagged;
///
/// let foo = tagged("foo");
/// let bar = tagged("bar");
///
/// let error = if 1 + 1 == 2 { foo.make("foo") } else { bar.make("bar") };
///
/// let label = match error.tag() {
///     Some(&"foo") => "Foo",
///     Some(&"bar") => "Bar",
///     _ => "Unknown",
/// };
/// assert_eq!(label, "Foo");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedConstructor<G> {
    tag: G,
}

impl<G> TaggedConstructor<G> {
    /// Creates a constructor that stamps `tag`.
    #[inline]
    pub const fn new(tag: G) -> Self {
        Self { tag }
    }

    /// Returns the tag this constructor stamps.
    #[inline]
    pub const fn tag(&self) -> &G {
        &self.tag
    }

    /// Builds a failure wrapping `payload`, tagged with this constructor's tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::tagged;
    ///
    /// let not_found = tagged("not-found");
    /// let error = not_found.make("/index.html");
    ///
    /// assert!(error.is_tagged());
    /// assert_eq!(error.tag(), Some(&"not-found"));
    /// assert_eq!(*error.payload(), "/index.html");
    /// ```
    #[inline]
    pub fn make<P>(&self, payload: P) -> Failure<P, G>
    where
        G: Clone,
    {
        Failure::with_tag(self.tag.clone(), payload)
    }

    /// Returns `true` if `failure` carries this constructor's tag.
    #[inline]
    pub fn matches<P>(&self, failure: &Failure<P, G>) -> bool
    where
        G: PartialEq,
    {
        failure.is_tagged_with(&self.tag)
    }

    /// Turns the constructor into a plain function from payload to failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_error::failure::{Fallible, tagged};
    ///
    /// let parsed: Fallible<i32, std::num::ParseIntError, &str> =
    ///     "12x".parse::<i32>().map_err(tagged("parse").into_fn());
    ///
    /// assert!(parsed.unwrap_err().is_tagged_with(&"parse"));
    /// ```
    pub fn into_fn<P>(self) -> impl Fn(P) -> Failure<P, G>
    where
        G: Clone,
    {
        move |payload| self.make(payload)
    }
}

/// Binds `tag` and returns a constructor that stamps it into every failure.
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::tagged;
///
/// let first = tagged("a");
/// let second = tagged("a");
///
/// assert_eq!(first.make(1).tag(), second.make(2).tag());
/// ```
#[inline]
pub const fn tagged<G>(tag: G) -> TaggedConstructor<G> {
    TaggedConstructor::new(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        NotFound,
        Denied,
    }

    #[rstest]
    fn test_make_stamps_tag() {
        let error = tagged("a").make("Number is smaller than 0");
        assert!(error.is_tagged());
        assert_eq!(error.tag(), Some(&"a"));
    }

    #[rstest]
    fn test_constructors_with_equal_tags_are_interchangeable() {
        let here = tagged(Kind::NotFound);
        let there = tagged(Kind::NotFound);
        assert!(here.matches(&there.make(())));
        assert!(!tagged(Kind::Denied).matches(&here.make(())));
    }

    #[rstest]
    fn test_tag_accessor() {
        assert_eq!(*tagged(Kind::Denied).tag(), Kind::Denied);
    }

    #[rstest]
    fn test_into_fn() {
        let make = tagged(Kind::Denied).into_fn();
        let error = make("no access");
        assert_eq!(error.into_parts(), ("no access", Some(Kind::Denied)));
    }
}
