//! Deciding whether a value is a failure.
//!
//! The check is closed-world: a value is a failure only if it is a
//! [`Failure`] or the `Err` side of a [`Fallible`]. Every other supported
//! value, however "empty" or falsy it looks (`0`, `""`, `false`, `None`,
//! `()`, an empty `Vec`), is a success. The decision is a single
//! discriminant check and never looks at a payload.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::value::Failure;

/// Types whose values can be asked whether they are a failure.
///
/// Implement it for your own success types with [`success_values!`]:
///
/// ```rust
/// use safe_error::failure::is_failure;
/// use safe_error::success_values;
///
/// struct Invoice;
/// success_values!(Invoice);
///
/// assert!(!is_failure(&Invoice));
/// ```
///
/// [`success_values!`]: crate::success_values
pub trait MaybeFailure {
    /// Returns `true` if this value is a failure.
    fn is_failure(&self) -> bool;
}

/// Returns `true` if `value` is a failure.
///
/// # Examples
///
/// ```rust
/// use safe_error::failure::{Fallible, failure, is_failure};
///
/// assert!(is_failure(&failure("boom")));
///
/// let outcome: Fallible<i32, &str> = Ok(0);
/// assert!(!is_failure(&outcome));
///
/// assert!(!is_failure(&0));
/// assert!(!is_failure(""));
/// assert!(!is_failure(&false));
/// assert!(!is_failure(&None::<i32>));
/// assert!(!is_failure(&Vec::<i32>::new()));
/// ```
#[inline]
pub fn is_failure<V: MaybeFailure + ?Sized>(value: &V) -> bool {
    value.is_failure()
}

impl<P, G> MaybeFailure for Failure<P, G> {
    #[inline]
    fn is_failure(&self) -> bool {
        true
    }
}

impl<T, P, G> MaybeFailure for Result<T, Failure<P, G>> {
    #[inline]
    fn is_failure(&self) -> bool {
        self.is_err()
    }
}

impl<V: MaybeFailure + ?Sized> MaybeFailure for &V {
    #[inline]
    fn is_failure(&self) -> bool {
        (**self).is_failure()
    }
}

impl<V: MaybeFailure + ?Sized> MaybeFailure for &mut V {
    #[inline]
    fn is_failure(&self) -> bool {
        (**self).is_failure()
    }
}

impl<V: MaybeFailure + ?Sized> MaybeFailure for Box<V> {
    #[inline]
    fn is_failure(&self) -> bool {
        (**self).is_failure()
    }
}

impl<V: MaybeFailure + ?Sized> MaybeFailure for Rc<V> {
    #[inline]
    fn is_failure(&self) -> bool {
        (**self).is_failure()
    }
}

impl<V: MaybeFailure + ?Sized> MaybeFailure for Arc<V> {
    #[inline]
    fn is_failure(&self) -> bool {
        (**self).is_failure()
    }
}

/// Declares types whose values are always successes.
///
/// ```rust
/// use safe_error::failure::is_failure;
/// use safe_error::success_values;
///
/// struct Celsius(f64);
/// struct Fahrenheit(f64);
/// success_values!(Celsius, Fahrenheit);
///
/// assert!(!is_failure(&Celsius(-40.0)));
/// ```
#[macro_export]
macro_rules! success_values {
    ($($success:ty),+ $(,)?) => {
        $(
            impl $crate::failure::MaybeFailure for $success {
                #[inline]
                fn is_failure(&self) -> bool {
                    false
                }
            }
        )+
    };
}

success_values!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
);

// Containers are successes even when they hold failures.
macro_rules! success_containers {
    ($($container:ident<$($parameter:ident),+>),+ $(,)?) => {
        $(
            impl<$($parameter),+> MaybeFailure for $container<$($parameter),+> {
                #[inline]
                fn is_failure(&self) -> bool {
                    false
                }
            }
        )+
    };
}

success_containers!(
    Option<T>,
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    BTreeMap<K, V>,
    HashSet<T, S>,
    HashMap<K, V, S>,
);

impl<T> MaybeFailure for [T] {
    #[inline]
    fn is_failure(&self) -> bool {
        false
    }
}

impl<T, const N: usize> MaybeFailure for [T; N] {
    #[inline]
    fn is_failure(&self) -> bool {
        false
    }
}

macro_rules! success_tuples {
    ($(($($element:ident),+)),+ $(,)?) => {
        $(
            impl<$($element),+> MaybeFailure for ($($element,)+) {
                #[inline]
                fn is_failure(&self) -> bool {
                    false
                }
            }
        )+
    };
}

success_tuples!((A), (A, B), (A, B, C), (A, B, C, D));
