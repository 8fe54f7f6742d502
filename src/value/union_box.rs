//! `UnionBox2` … `UnionBox8`: closed tagged unions with per-alternative slots.
//!
//! Each arity is a plain enum whose discriminant is the active index. The
//! [`Alternative`] trait is implemented only for in-range indices, so asking a
//! `UnionBox3` for alternative `3` does not compile.

use serde::{Deserialize, Serialize};

use super::ValueBox;

/// Compile-time access to alternative `I` of a union box.
pub trait Alternative<const I: usize>: Sized {
    /// The type stored by alternative `I`.
    type Output;

    /// Builds the union with alternative `I` active.
    fn from_alternative(value: Self::Output) -> Self;

    /// Returns the payload if alternative `I` is the active one.
    fn alternative(&self) -> ValueBox<&Self::Output>;
}

macro_rules! union_box {
    (@alternative $name:ident ($($param:ident),+) $idx:literal $variant:ident $ty:ident) => {
        impl<$($param),+> Alternative<$idx> for $name<$($param),+> {
            type Output = $ty;

            #[inline]
            fn from_alternative(value: $ty) -> Self {
                Self::$variant(value)
            }

            #[inline]
            fn alternative(&self) -> ValueBox<&$ty> {
                match self {
                    Self::$variant(value) => ValueBox::new(value),
                    _ => ValueBox::empty(),
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $name:ident $params:tt {
            $($idx:literal => $variant:ident($ty:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name<$($ty),+> {
            $(
                #[doc = concat!("Alternative ", stringify!($idx), ".")]
                $variant($ty),
            )+
        }

        impl<$($ty),+> $name<$($ty),+> {
            /// Number of alternatives.
            pub const ARITY: usize = [$($idx),+].len();

            /// Builds the union with alternative `I` active.
            #[inline]
            pub fn at<const I: usize>(value: <Self as Alternative<I>>::Output) -> Self
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::from_alternative(value)
            }

            /// Index of the active alternative, always in `[0, ARITY)`.
            #[inline]
            pub const fn index(&self) -> usize {
                match self {
                    $(Self::$variant(_) => $idx,)+
                }
            }

            /// Number of alternatives.
            #[inline]
            pub const fn arity(&self) -> usize {
                Self::ARITY
            }

            /// Slot `I`: present iff alternative `I` is active.
            #[inline]
            pub fn decompose_at<const I: usize>(&self) -> ValueBox<&<Self as Alternative<I>>::Output>
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::alternative(self)
            }

            /// All slots at once; exactly one is present.
            #[inline]
            pub fn decompose(&self) -> ($(ValueBox<&$ty>,)+) {
                ($(self.decompose_at::<$idx>(),)+)
            }
        }

        $(union_box!(@alternative $name $params $idx $variant $ty);)+
    };
}

union_box! {
    /// One of two alternatives.
    ///
    /// ```rust
    /// use monobox::UnionBox2;
    ///
    /// let word: UnionBox2<i64, String> = UnionBox2::at::<1>("two".to_string());
    /// assert_eq!(word.index(), 1);
    /// assert!(!word.decompose_at::<0>().is_present());
    /// assert_eq!(word.decompose_at::<1>().get().map(|s| s.as_str()), Some("two"));
    /// ```
    UnionBox2 (A, B) {
        0 => V0(A),
        1 => V1(B),
    }
}

union_box! {
    /// One of three alternatives.
    UnionBox3 (A, B, C) {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
    }
}

union_box! {
    /// One of four alternatives.
    UnionBox4 (A, B, C, D) {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
    }
}

union_box! {
    /// One of five alternatives.
    UnionBox5 (A, B, C, D, E) {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
    }
}

union_box! {
    /// One of six alternatives.
    UnionBox6 (A, B, C, D, E, F) {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
        5 => V5(F),
    }
}

union_box! {
    /// One of seven alternatives.
    UnionBox7 (A, B, C, D, E, F, G) {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
        5 => V5(F),
        6 => V6(G),
    }
}

union_box! {
    /// One of eight alternatives.
    UnionBox8 (A, B, C, D, E, F, G, H) {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
        5 => V5(F),
        6 => V6(G),
        7 => V7(H),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_constants() {
        assert_eq!(UnionBox2::<u8, u8>::ARITY, 2);
        assert_eq!(UnionBox5::<u8, u8, u8, u8, u8>::ARITY, 5);
        assert_eq!(UnionBox8::<u8, u8, u8, u8, u8, u8, u8, u8>::ARITY, 8);
    }

    #[test]
    fn test_same_type_alternatives_keep_index() {
        let left: UnionBox2<i32, i32> = UnionBox2::at::<0>(4);
        let right: UnionBox2<i32, i32> = UnionBox2::at::<1>(4);

        assert_eq!(left.index(), 0);
        assert_eq!(right.index(), 1);
        assert_ne!(left, right);
        assert_eq!(left.decompose(), (ValueBox::new(&4), ValueBox::empty()));
        assert_eq!(right.decompose(), (ValueBox::empty(), ValueBox::new(&4)));
    }

    #[test]
    fn test_full_decomposition_has_one_present_slot() {
        let u: UnionBox4<u8, char, &str, f64> = UnionBox4::V2("mid");
        let (a, b, c, d) = u.decompose();
        assert!(!a.is_present());
        assert!(!b.is_present());
        assert_eq!(c.get(), Some(&&"mid"));
        assert!(!d.is_present());
        assert_eq!(u.arity(), 4);
    }

    #[test]
    fn test_serde_externally_tagged() {
        let u: UnionBox3<i32, String, bool> = UnionBox3::V1("x".into());
        let json = serde_json::to_string(&u).unwrap();
        assert_eq!(json, r#"{"V1":"x"}"#);
        let back: UnionBox3<i32, String, bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, u);
    }
}
