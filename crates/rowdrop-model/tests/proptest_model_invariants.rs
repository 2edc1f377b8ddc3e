//! Property-based invariant tests for the row-collection model.
//!
//! These verify the structural invariants that must hold for any valid
//! inputs:
//!
//! 1. insert grows the length by the inserted count.
//! 2. insert places the items contiguously at the requested index.
//! 3. insert preserves the relative order of pre-existing rows.
//! 4. remove shrinks the length by the removed count.
//! 5. remove leaves the surviving rows in their prior relative order.
//! 6. set changes exactly one slot.
//! 7. index_of finds the lowest-index occurrence.
//! 8. Rejected calls leave the rows untouched.

use proptest::prelude::*;
use rowdrop_model::{Item, ListSource, MutableListSource, RowListModel};

// ── Helpers ─────────────────────────────────────────────────────────────

fn row_texts(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,8}", 1..=max_len)
}

fn items(texts: &[String]) -> Vec<Item> {
    texts.iter().map(Item::new).collect()
}

fn texts(model: &RowListModel) -> Vec<String> {
    model.rows().iter().map(|i| i.as_str().to_owned()).collect()
}

// ── insert ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn insert_grows_and_places_contiguously(
        base in row_texts(24),
        extra in row_texts(8),
        at_seed in 0usize..=24,
    ) {
        let at = at_seed.min(base.len());
        let mut model = RowListModel::from_items(base.clone());
        model.insert(at, items(&extra)).unwrap();

        prop_assert_eq!(model.len(), base.len() + extra.len());
        prop_assert_eq!(&texts(&model)[at..at + extra.len()], &extra[..]);

        // Pre-existing rows keep their relative order around the gap.
        let mut survivors = texts(&model);
        survivors.drain(at..at + extra.len());
        prop_assert_eq!(survivors, base);
    }
}

// ── remove ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn remove_shrinks_and_keeps_relative_order(
        base in row_texts(24),
        at_seed in 0usize..24,
        count_seed in 1usize..8,
    ) {
        let at = at_seed.min(base.len() - 1);
        let count = count_seed.min(base.len() - at);
        let mut model = RowListModel::from_items(base.clone());
        model.remove(at, count).unwrap();

        prop_assert_eq!(model.len(), base.len() - count);

        let mut expected = base;
        expected.drain(at..at + count);
        prop_assert_eq!(texts(&model), expected);
    }
}

// ── set / index_of ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn set_changes_exactly_one_slot(
        base in row_texts(24),
        at_seed in 0usize..24,
        value in "[a-z]{1,8}",
    ) {
        let at = at_seed.min(base.len() - 1);
        let mut model = RowListModel::from_items(base.clone());
        model.set(at, Item::new(value.clone())).unwrap();

        for (i, original) in base.iter().enumerate() {
            let got = model.get(i).unwrap().as_str();
            if i == at {
                prop_assert_eq!(got, value.as_str());
            } else {
                prop_assert_eq!(got, original.as_str());
            }
        }
    }
}

proptest! {
    #[test]
    fn index_of_is_the_lowest_occurrence(base in row_texts(24), probe_seed in 0usize..24) {
        let probe = base[probe_seed.min(base.len() - 1)].clone();
        let model = RowListModel::from_items(base.clone());
        let found = model.index_of(&Item::new(probe.clone())).unwrap();

        prop_assert_eq!(&base[found], &probe);
        prop_assert!(base[..found].iter().all(|t| t != &probe));
    }
}

// ── rejection leaves state untouched ────────────────────────────────────

proptest! {
    #[test]
    fn rejected_calls_do_not_mutate(base in row_texts(24)) {
        let mut model = RowListModel::from_items(base.clone());
        let len = model.len();

        prop_assert!(model.insert(len + 1, vec![Item::new("x")]).is_err());
        prop_assert!(model.remove(len, 1).is_err());
        prop_assert!(model.remove(0, len + 1).is_err());
        prop_assert!(model.set(len, Item::new("x")).is_err());

        prop_assert_eq!(texts(&model), base);
    }
}
