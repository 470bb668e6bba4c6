use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mutforge_sim::{BufferStore, SegmentArena, Sequence};
use std::hint::black_box;
use std::str::FromStr;

fn build_chain(bases: usize) -> (BufferStore, SegmentArena, mutforge_sim::base::SegmentId) {
    let mut store = BufferStore::new();
    let text = "ACGT".repeat(bases / 4);
    let seq = Sequence::from_str(&text).unwrap();
    let len = seq.len();
    let buf = store.insert_original("chr1", seq);
    let mut arena = SegmentArena::new();
    let head = arena.new_chain(buf, len);
    (store, arena, head)
}

fn bench_chain_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_ops");

    group.bench_function("split_1k", |b| {
        b.iter_batched(
            || build_chain(1024),
            |(_store, mut arena, head)| {
                black_box(arena.split(head, 512));
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("insert_1k", |b| {
        b.iter_batched(
            || {
                let (mut store, arena, head) = build_chain(1024);
                let ins = store.insert_synthesized(Sequence::from_str("ACGTACGT").unwrap());
                (store, arena, head, ins)
            },
            |(store, mut arena, head, ins)| {
                black_box(arena.insert_sequence(head, 512, ins, &store));
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("delete_1k", |b| {
        b.iter_batched(
            || build_chain(1024),
            |(_store, mut arena, head)| {
                black_box(arena.delete_section(head, 256, 128));
            },
            BatchSize::SmallInput,
        )
    });

    // render cost scales with content, not with the number of edits applied
    group.bench_function("render_fragmented_64k", |b| {
        b.iter_batched(
            || {
                let (mut store, mut arena, head) = build_chain(65536);
                let mut seg = head;
                for i in 1..256usize {
                    let ins = store.insert_synthesized(Sequence::from_str("TT").unwrap());
                    seg = arena.insert_sequence(seg, i * 256, ins, &store);
                }
                (store, arena, head)
            },
            |(store, arena, head)| {
                black_box(arena.render(head, &store, false));
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_chain_ops);
criterion_main!(benches);
