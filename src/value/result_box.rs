//! `ResultBox`: success-or-error with a two-slot decomposition.

use serde::{Deserialize, Serialize};

use super::ValueBox;

/// Explicit marker for the error side of a [`ResultBox`].
///
/// There is no `From<E>` for `ResultBox<T, E>`; wrapping the error in
/// `Unexpected` is the only implicit way to build the error side, so `T` and
/// `E` may be the same type without ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unexpected<E>(pub E);

impl<E> Unexpected<E> {
    /// Unwraps the marked error.
    #[inline]
    pub fn into_inner(self) -> E {
        self.0
    }
}

/// Holds exactly one of a success value `T` or an error value `E`.
///
/// # Example
///
/// ```rust
/// use monobox::{ResultBox, Unexpected};
///
/// let parsed: ResultBox<i32, String> = ResultBox::new(7);
/// let parts = parsed.decompose();
/// assert_eq!(parts.value.get(), Some(&&7));
/// assert!(!parts.error.is_present());
///
/// let failed: ResultBox<i32, String> = Unexpected("bad digit".to_string()).into();
/// let parts = failed.decompose();
/// assert!(!parts.value.is_present());
/// assert_eq!(parts.error.get().map(|e| e.as_str()), Some("bad digit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultBox<T, E> {
    inner: Result<T, E>,
}

/// The two slots of a decomposed [`ResultBox`]. Exactly one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultParts<'a, T, E> {
    /// Success slot.
    pub value: ValueBox<&'a T>,
    /// Error slot.
    pub error: ValueBox<&'a E>,
}

impl<'a, T, E> ResultParts<'a, T, E> {
    /// Flattens the parts into a `(value, error)` tuple.
    #[inline]
    pub fn into_tuple(self) -> (ValueBox<&'a T>, ValueBox<&'a E>) {
        (self.value, self.error)
    }
}

impl<T, E> ResultBox<T, E> {
    /// Creates a successful box.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { inner: Ok(value) }
    }

    /// Creates a failed box.
    #[inline]
    pub const fn from_error(error: E) -> Self {
        Self { inner: Err(error) }
    }

    /// Returns `true` if the box holds a success value.
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    /// Returns `true` if the box holds an error value.
    #[inline]
    pub const fn is_error(&self) -> bool {
        self.inner.is_err()
    }

    /// Decomposes into a success slot and an error slot.
    pub fn decompose(&self) -> ResultParts<'_, T, E> {
        match &self.inner {
            Ok(value) => ResultParts {
                value: ValueBox::new(value),
                error: ValueBox::empty(),
            },
            Err(error) => ResultParts {
                value: ValueBox::empty(),
                error: ValueBox::new(error),
            },
        }
    }

    /// Owned decomposition.
    pub fn into_parts(self) -> (ValueBox<T>, ValueBox<E>) {
        match self.inner {
            Ok(value) => (ValueBox::new(value), ValueBox::empty()),
            Err(error) => (ValueBox::empty(), ValueBox::new(error)),
        }
    }

    /// Borrows the success value.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    /// Borrows the error value.
    #[inline]
    pub fn error(&self) -> Option<&E> {
        self.inner.as_ref().err()
    }

    /// Unwraps into the underlying `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        self.inner
    }

    /// Maps the success value.
    #[inline]
    pub fn map<U, F>(self, f: F) -> ResultBox<U, E>
    where
        F: FnOnce(T) -> U,
    {
        ResultBox {
            inner: self.inner.map(f),
        }
    }

    /// Maps the error value.
    #[inline]
    pub fn map_err<G, F>(self, f: F) -> ResultBox<T, G>
    where
        F: FnOnce(E) -> G,
    {
        ResultBox {
            inner: self.inner.map_err(f),
        }
    }

    /// Chains a fallible computation on the success value.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> ResultBox<U, E>
    where
        F: FnOnce(T) -> ResultBox<U, E>,
    {
        match self.inner {
            Ok(value) => f(value),
            Err(error) => ResultBox::from_error(error),
        }
    }
}

impl<T, E> From<Unexpected<E>> for ResultBox<T, E> {
    #[inline]
    fn from(marked: Unexpected<E>) -> Self {
        Self::from_error(marked.0)
    }
}

impl<T, E> From<Result<T, E>> for ResultBox<T, E> {
    #[inline]
    fn from(inner: Result<T, E>) -> Self {
        Self { inner }
    }
}

impl<T, E> From<ResultBox<T, E>> for Result<T, E> {
    #[inline]
    fn from(boxed: ResultBox<T, E>) -> Self {
        boxed.inner
    }
}
