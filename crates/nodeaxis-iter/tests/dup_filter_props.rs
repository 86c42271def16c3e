mod common;

use std::collections::BTreeSet;

use common::drain;
use nodeaxis_core::{AxisIterator, NodeHandle};
use nodeaxis_iter::{ArrayIterator, DupFilterIterator};
use proptest::prelude::*;

fn filter(raw: &[u32]) -> DupFilterIterator {
    let mut it = DupFilterIterator::new(Box::new(ArrayIterator::from_raw(raw)));
    it.set_start_node(NodeHandle::ROOT);
    it
}

fn distinct_sorted(raw: &[u32]) -> Vec<u32> {
    raw.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

proptest! {
    #[test]
    fn prop_emits_distinct_handles_ascending(raw in prop::collection::vec(0u32..64, 0..48)) {
        let mut it = filter(&raw);
        prop_assert_eq!(drain(&mut it), distinct_sorted(&raw));
        prop_assert_eq!(it.next_node(), None);
    }

    #[test]
    fn prop_goto_mark_undoes_lookahead(
        raw in prop::collection::vec(0u32..32, 0..32),
        before in 0usize..40,
        ahead in 0usize..40,
    ) {
        let expected = distinct_sorted(&raw);
        let mut it = filter(&raw);
        for _ in 0..before {
            it.next_node();
        }
        it.set_mark();
        for _ in 0..ahead {
            it.next_node();
        }
        it.goto_mark();
        let skip = before.min(expected.len());
        prop_assert_eq!(it.position(), skip);
        prop_assert_eq!(drain(&mut it), expected[skip..].to_vec());
    }

    #[test]
    fn prop_clone_does_not_disturb_original(raw in prop::collection::vec(0u32..32, 1..32), before in 0usize..8) {
        let expected = distinct_sorted(&raw);
        let mut it = filter(&raw);
        for _ in 0..before {
            it.next_node();
        }
        let mut clone = it.clone_iterator().unwrap();
        prop_assert_eq!(drain(&mut *clone), expected.clone());
        let skip = before.min(expected.len());
        prop_assert_eq!(drain(&mut it), expected[skip..].to_vec());
    }
}
