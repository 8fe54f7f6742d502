//! `ValueBox`: zero-or-one value with a two-slot decomposition.

use serde::{Deserialize, Serialize};

/// A box holding zero or one value of type `T`.
///
/// `ValueBox` is the leaf of the crate: every other container reports its
/// individual decomposition slots as `ValueBox`es, usually borrowed
/// (`ValueBox<&T>`) so the slot stays tied to the lifetime of its owner.
///
/// Absence is a valid state, not an error. Callers branch on the presence flag;
/// there is deliberately no `unwrap_or`-style substitution.
///
/// # Example
///
/// ```rust
/// use monobox::ValueBox;
///
/// let boxed = ValueBox::new(5);
/// let (value, present) = boxed.decompose().into_tuple();
/// assert!(present);
/// assert_eq!(value, Some(&5));
///
/// let empty: ValueBox<i32> = ValueBox::empty();
/// assert_eq!(empty.decompose().into_tuple(), (None, false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBox<T> {
    slot: Option<T>,
}

/// The two slots of a decomposed [`ValueBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueParts<'a, T> {
    /// Borrow of the held value, `None` when the box is empty.
    pub value: Option<&'a T>,
    /// Presence flag; `value` is `Some` iff this is `true`.
    pub present: bool,
}

impl<'a, T> ValueParts<'a, T> {
    /// Flattens the parts into a `(value, present)` tuple.
    #[inline]
    pub fn into_tuple(self) -> (Option<&'a T>, bool) {
        (self.value, self.present)
    }
}

impl<'a, T> From<ValueParts<'a, T>> for (Option<&'a T>, bool) {
    #[inline]
    fn from(parts: ValueParts<'a, T>) -> Self {
        parts.into_tuple()
    }
}

impl<T> ValueBox<T> {
    /// Creates a box holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { slot: Some(value) }
    }

    /// Creates an empty box.
    #[inline]
    pub const fn empty() -> Self {
        Self { slot: None }
    }

    /// Wraps an `Option`: `Some` becomes present, `None` becomes empty.
    #[inline]
    pub fn from_option(slot: Option<T>) -> Self {
        Self { slot }
    }

    /// Returns `true` if the box holds a value.
    #[inline]
    pub const fn is_present(&self) -> bool {
        self.slot.is_some()
    }

    /// Decomposes the box into its value slot and presence flag.
    #[inline]
    pub fn decompose(&self) -> ValueParts<'_, T> {
        ValueParts {
            value: self.slot.as_ref(),
            present: self.slot.is_some(),
        }
    }

    /// Mutable decomposition: `(Some(&mut v), true)` or `(None, false)`.
    #[inline]
    pub fn decompose_mut(&mut self) -> (Option<&mut T>, bool) {
        let present = self.slot.is_some();
        (self.slot.as_mut(), present)
    }

    /// Borrows the held value.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Converts `&ValueBox<T>` into a borrowed `ValueBox<&T>`.
    #[inline]
    pub fn as_ref(&self) -> ValueBox<&T> {
        ValueBox {
            slot: self.slot.as_ref(),
        }
    }

    /// Unwraps into the underlying `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.slot
    }

    /// Maps the held value, keeping absence as absence.
    #[inline]
    pub fn map<U, F>(self, f: F) -> ValueBox<U>
    where
        F: FnOnce(T) -> U,
    {
        ValueBox {
            slot: self.slot.map(f),
        }
    }

    /// Chains a computation that may itself produce an empty box.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> ValueBox<U>
    where
        F: FnOnce(T) -> ValueBox<U>,
    {
        match self.slot {
            Some(value) => f(value),
            None => ValueBox::empty(),
        }
    }
}

impl<T: Clone> ValueBox<&T> {
    /// Clones the borrowed value into an owned box.
    #[inline]
    pub fn cloned(self) -> ValueBox<T> {
        ValueBox {
            slot: self.slot.cloned(),
        }
    }
}

impl<T> Default for ValueBox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for ValueBox<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
