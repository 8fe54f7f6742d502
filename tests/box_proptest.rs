//! Property tests for the synchronous boxes.

use monobox::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_value_box_round_trips_presence(v in proptest::option::of(any::<i64>())) {
        let boxed = ValueBox::from_option(v);
        let (value, present) = boxed.decompose().into_tuple();
        prop_assert_eq!(present, v.is_some());
        prop_assert_eq!(value.copied(), v);
    }

    #[test]
    fn test_result_box_exactly_one_slot(v in any::<u32>(), e in ".*", is_ok in any::<bool>()) {
        let boxed: ResultBox<u32, String> = if is_ok {
            ResultBox::new(v)
        } else {
            Unexpected(e.clone()).into()
        };

        let parts = boxed.decompose();
        prop_assert_ne!(parts.value.is_present(), parts.error.is_present());
        if is_ok {
            prop_assert_eq!(parts.value.get(), Some(&&v));
        } else {
            prop_assert_eq!(parts.error.get(), Some(&&e));
        }
    }

    #[test]
    fn test_union_box_slot_matches_index(choice in 0_usize..4, v in any::<u16>()) {
        let u: UnionBox4<u16, u16, u16, u16> = match choice {
            0 => UnionBox4::at::<0>(v),
            1 => UnionBox4::at::<1>(v),
            2 => UnionBox4::at::<2>(v),
            _ => UnionBox4::at::<3>(v),
        };

        prop_assert_eq!(u.index(), choice);
        let (a, b, c, d) = u.decompose();
        let slots = [a, b, c, d];
        for (j, slot) in slots.iter().enumerate() {
            if j == choice {
                prop_assert_eq!(slot.get(), Some(&&v));
            } else {
                prop_assert!(!slot.is_present());
            }
        }
    }

    #[test]
    fn test_ready_async_box_memoizes(v in any::<i32>(), extractions in 1_usize..8) {
        let mut boxed = AsyncBox::ready(v);
        for _ in 0..extractions {
            let extracted = boxed.extract_value();
            prop_assert_eq!(extracted.get(), Some(&&v));
            prop_assert!(boxed.poll_ready());
        }
        prop_assert_eq!(boxed.state(), AsyncState::ConsumedSuccess);
    }
}
