//! `proptest` strategies for the synchronous boxes.
//!
//! Enabled by the `proptest` feature.

use proptest::prelude::*;

use crate::{ResultBox, UnionBox2, ValueBox};

/// Present or empty boxes, with values drawn from `inner`.
pub fn value_box<S>(inner: S) -> impl Strategy<Value = ValueBox<S::Value>>
where
    S: Strategy,
{
    proptest::option::of(inner).prop_map(ValueBox::from_option)
}

/// Success or error boxes, with payloads drawn from `value` and `error`.
pub fn result_box<S, R>(value: S, error: R) -> impl Strategy<Value = ResultBox<S::Value, R::Value>>
where
    S: Strategy,
    R: Strategy,
    S::Value: 'static,
    R::Value: 'static,
{
    prop_oneof![
        value.prop_map(ResultBox::new),
        error.prop_map(ResultBox::from_error),
    ]
}

/// Two-way unions with either alternative active.
pub fn union_box2<S, R>(first: S, second: R) -> impl Strategy<Value = UnionBox2<S::Value, R::Value>>
where
    S: Strategy,
    R: Strategy,
    S::Value: 'static,
    R::Value: 'static,
{
    prop_oneof![first.prop_map(UnionBox2::V0), second.prop_map(UnionBox2::V1)]
}
