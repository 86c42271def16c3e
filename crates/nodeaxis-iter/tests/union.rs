mod common;

use common::{NoCloneIterator, drain, h, sample_tree};
use nodeaxis_core::{AxisIterator, Error, SourceKind};
use nodeaxis_iter::{ArrayIterator, AxisKind, DupFilterIterator, KeyIndex, UnionIterator};
use rstest::rstest;

fn boxed(it: impl AxisIterator + 'static) -> Box<dyn AxisIterator> {
    Box::new(it)
}

#[rstest]
fn branches_are_yielded_back_to_back() {
    let tree = sample_tree();
    let mut union = UnionIterator::new([
        boxed(tree.axis(AxisKind::Child)),
        boxed(tree.axis(AxisKind::DescendantOrSelf)),
        boxed(tree.axis(AxisKind::Ancestor)),
    ]);
    union.set_start_node(h(5));
    assert_eq!(drain(&mut union), vec![7, 5, 7, 2, 1, 0]);
    assert_eq!(union.position(), 6);
}

#[rstest]
fn dup_filter_turns_union_into_node_set() {
    let tree = sample_tree();
    let union = UnionIterator::new([boxed(tree.axis(AxisKind::Child)), boxed(tree.axis(AxisKind::DescendantOrSelf))])
        .with_branch(boxed(tree.axis(AxisKind::Ancestor)));
    let mut it = DupFilterIterator::new(Box::new(union));
    it.set_start_node(h(5));
    assert_eq!(drain(&mut it), vec![0, 1, 2, 5, 7]);
    it.set_start_node(h(2));
    assert_eq!(drain(&mut it), vec![0, 1, 2, 4, 5, 7]);
}

#[rstest]
fn rebinding_restarts_every_branch() {
    let tree = sample_tree();
    let mut union = UnionIterator::new([boxed(tree.axis(AxisKind::Child)), boxed(tree.axis(AxisKind::Attribute))]);
    union.set_start_node(h(2));
    assert_eq!(drain(&mut union), vec![4, 5, 3]);
    union.set_start_node(h(8));
    assert_eq!(drain(&mut union), vec![10, 9]);
}

#[rstest]
fn mark_spans_branch_boundaries() {
    let mut union = UnionIterator::new([boxed(ArrayIterator::from_raw(&[1, 2])), boxed(ArrayIterator::from_raw(&[3]))]);
    union.set_start_node(h(0));
    assert_eq!(union.next_node(), Some(h(1)));
    union.set_mark();
    assert_eq!(drain(&mut union), vec![2, 3]);
    union.goto_mark();
    assert_eq!(union.position(), 1);
    assert_eq!(drain(&mut union), vec![2, 3]);
    union.reset();
    assert_eq!(drain(&mut union), vec![1, 2, 3]);
}

#[rstest]
fn clone_copies_every_branch() {
    let mut union = UnionIterator::new([boxed(ArrayIterator::from_raw(&[4])), boxed(ArrayIterator::from_raw(&[6, 8]))]);
    union.set_start_node(h(0));
    union.next_node();
    let mut clone = union.clone_iterator().unwrap();
    assert!(!clone.is_restartable());
    assert_eq!(drain(&mut *clone), vec![6, 8]);
    assert_eq!(drain(&mut union), vec![6, 8]);
}

#[rstest]
fn clone_fails_when_a_branch_cannot_be_cloned() {
    let union = UnionIterator::new([boxed(ArrayIterator::from_raw(&[1])), boxed(NoCloneIterator::new(&[2]))]);
    assert!(matches!(union.clone_iterator(), Err(Error::CloneUnsupported { .. })));
}

#[rstest]
fn restartable_flag_reaches_every_branch() {
    let tree = sample_tree();
    let mut union = UnionIterator::new([boxed(tree.axis(AxisKind::Child)), boxed(tree.axis(AxisKind::Parent))]);
    union.set_start_node(h(2));
    union.set_restartable(false);
    union.set_start_node(h(5));
    assert_eq!(union.start_node(), Some(h(2)));
    assert_eq!(drain(&mut union), vec![4, 5, 1]);
}

#[rstest]
fn context_independent_only_when_all_branches_are() {
    let mut index = KeyIndex::new("k");
    index.add("a", h(3));
    let keys = UnionIterator::new([boxed(index.lookup(["a"])), boxed(index.lookup(["a"]))]);
    assert_eq!(keys.source_kind(), SourceKind::ContextIndependent);

    let mixed = UnionIterator::new([boxed(index.lookup(["a"])), boxed(ArrayIterator::from_raw(&[1]))]);
    assert_eq!(mixed.source_kind(), SourceKind::Axis);

    let empty = UnionIterator::new(Vec::new());
    assert_eq!(empty.source_kind(), SourceKind::Axis);
    assert_eq!(empty.branch_count(), 0);
}
