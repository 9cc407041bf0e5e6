use proptest::prelude::*;
use red_black_paths::red_black_tree::{Color, RedBlackSet};
use red_black_paths::Error;

proptest! {
    #[test]
    fn inserts_keep_coloring_rules(values in proptest::collection::vec(any::<i32>(), 0..256)) {
        let mut set = RedBlackSet::new();
        for value in &values {
            let _ = set.insert(*value);
            prop_assert_ne!(set.root_color(), Some(Color::Red), "root must stay black");
        }
        prop_assert!(set.is_valid_red_black());

        let mut expected = values.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(set.iter().cloned().collect::<Vec<i32>>(), expected);
    }

    #[test]
    fn duplicate_insert_changes_nothing(
        values in proptest::collection::vec(0u16..512, 1..128),
        pick in any::<prop::sample::Index>(),
    ) {
        let set_values = values.iter().cloned().collect::<RedBlackSet<u16>>();
        let mut set = values.iter().cloned().collect::<RedBlackSet<u16>>();
        let duplicate = values[pick.index(values.len())];

        prop_assert_eq!(set.insert(duplicate), Err(Error::DuplicateValue));
        prop_assert_eq!(set.len(), set_values.len());
        prop_assert_eq!(set.to_level_order_string(), set_values.to_level_order_string());
        let colors = set.level_order().map(|value| set.color_of(value)).collect::<Vec<_>>();
        let expected_colors = set_values
            .level_order()
            .map(|value| set_values.color_of(value))
            .collect::<Vec<_>>();
        prop_assert_eq!(colors, expected_colors);
    }

    #[test]
    fn removals_keep_order_and_uniqueness(
        values in proptest::collection::vec(0u16..256, 0..128),
        removals in proptest::collection::vec(0u16..256, 0..128),
    ) {
        let mut set = values.iter().cloned().collect::<RedBlackSet<u16>>();
        let mut expected = values.clone();
        expected.sort();
        expected.dedup();

        for value in &removals {
            let was_present = expected.binary_search(value).map(|index| expected.remove(index));
            prop_assert_eq!(set.remove(value).ok(), was_present.ok());
        }

        prop_assert_eq!(set.len(), expected.len());
        prop_assert_eq!(set.iter().cloned().collect::<Vec<u16>>(), expected);
    }
}
