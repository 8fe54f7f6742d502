//! Checks the exported `proptest` strategies. Needs `--features proptest`.
#![cfg(feature = "proptest")]

use monobox::arbitrary::{result_box, union_box2, value_box};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_value_box_strategy_decomposes(boxed in value_box(any::<u8>())) {
        let parts = boxed.decompose();
        prop_assert_eq!(parts.present, parts.value.is_some());
    }

    #[test]
    fn test_result_box_strategy_one_side(boxed in result_box(any::<u8>(), "[a-z]{1,4}")) {
        prop_assert_ne!(boxed.is_success(), boxed.is_error());
    }

    #[test]
    fn test_union_box_strategy_index_in_range(u in union_box2(any::<bool>(), any::<char>())) {
        prop_assert!(u.index() < 2);
        prop_assert_eq!(u.decompose_at::<0>().is_present(), u.index() == 0);
    }
}
