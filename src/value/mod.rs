//! Synchronous containers.
//!
//! - `ValueBox` is the leaf every other box reports its slots through.
//! - `ResultBox` and the `UnionBoxN` family are built on it.

pub mod result_box;
pub mod union_box;
pub mod value_box;

pub use result_box::{ResultBox, ResultParts, Unexpected};
pub use union_box::{
    Alternative, UnionBox2, UnionBox3, UnionBox4, UnionBox5, UnionBox6, UnionBox7, UnionBox8,
};
pub use value_box::{ValueBox, ValueParts};
