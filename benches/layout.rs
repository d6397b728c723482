// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use imeditor::ui::layout::{resolve_axis, Length, Size, SizeSpec, Track};
use imeditor::ui::scale::ScaleFactor;
use imeditor::ui::text::MonospaceMeasurer;
use imeditor::ui::tree::{WidgetId, WidgetTree};
use imeditor::ui::widgets::Element;
use std::hint::black_box;

/// A column of `rows` rows, each holding a label, a flex spacer and a button.
fn form(rows: usize) -> (WidgetTree<()>, WidgetId) {
    let mut tree = WidgetTree::new(
        ScaleFactor::default(),
        Box::new(MonospaceMeasurer::default()),
        Size::new(1280, 4000),
    );
    let column = Element::column((0..rows).map(|row| {
        Element::row([
            Element::label(format!("Row {row}")),
            Element::spacer().size(SizeSpec::new(Length::Flex(1.0), Length::Unset)),
            Element::button("Apply", ()),
        ])
        .size(SizeSpec::new(Length::Flex(1.0), Length::Unset))
    }));
    let root = tree.mount(column);
    let label = tree
        .node(root)
        .and_then(|node| tree.node(node.children()[rows / 2]))
        .map(|row| row.children()[0])
        .expect("form has a middle row");
    (tree, label)
}

fn layout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    for rows in [10usize, 100, 500] {
        let (mut tree, label) = form(rows);
        let root = tree.root().expect("mounted");

        group.bench_with_input(BenchmarkId::new("full_pass", rows), &rows, |b, _| {
            b.iter(|| black_box(tree.recalculate_layout(root, true).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("narrow_pass", rows), &rows, |b, _| {
            b.iter(|| black_box(tree.after_layout_recalculation(label).unwrap()));
        });
    }

    group.bench_function("resolve_axis_mixed", |b| {
        let tracks = [
            Track::Fixed(10),
            Track::Flex(1.0),
            Track::Percent(30.0),
            Track::Content(120),
            Track::Flex(2.0),
            Track::Flex(1.0),
        ];
        b.iter(|| black_box(resolve_axis(black_box(1920), &tracks)));
    });

    group.finish();
}

criterion_group!(benches, layout_benchmark);
criterion_main!(benches);
