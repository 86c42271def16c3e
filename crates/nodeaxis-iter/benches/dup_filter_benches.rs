use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nodeaxis_core::{AxisIterator, NodeHandle};
use nodeaxis_iter::{ArrayIterator, AxisKind, DupFilterIterator, Tree, TreeBuilder, UnionIterator};

fn build_document(sections: usize, items: usize) -> Arc<Tree> {
    let mut builder = TreeBuilder::new().element("root");
    for s in 0..sections {
        builder = builder.element("section").attribute("id", format!("s{s}"));
        for i in 0..items {
            builder = builder.element("item").attribute("n", i.to_string()).text("value").end();
        }
        builder = builder.end();
    }
    builder.end().build()
}

fn benchmark_union_materialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("dup_filter/union");
    for &(sections, items) in &[(10usize, 10usize), (50, 40), (200, 50)] {
        let tree = build_document(sections, items);
        group.bench_with_input(BenchmarkId::from_parameter(tree.len()), &tree, |b, tree| {
            b.iter(|| {
                let union = UnionIterator::new([
                    Box::new(tree.axis(AxisKind::Descendant)) as Box<dyn AxisIterator>,
                    Box::new(tree.axis(AxisKind::DescendantOrSelf)),
                ]);
                let mut it = DupFilterIterator::new(Box::new(union));
                it.set_start_node(NodeHandle::ROOT);
                let mut count = 0usize;
                while let Some(node) = it.next_node() {
                    black_box(node);
                    count += 1;
                }
                black_box(count)
            })
        });
    }
    group.finish();
}

fn benchmark_reversed_input(c: &mut Criterion) {
    let raw: Vec<u32> = (0..10_000u32).rev().flat_map(|n| [n, n]).collect();
    c.bench_function("dup_filter/reversed_20k", |b| {
        b.iter(|| {
            let mut it = DupFilterIterator::new(Box::new(ArrayIterator::from_raw(black_box(&raw))));
            it.set_start_node(NodeHandle::ROOT);
            while let Some(node) = it.next_node() {
                black_box(node);
            }
        })
    });
}

criterion_group!(benches, benchmark_union_materialization, benchmark_reversed_input);
criterion_main!(benches);
