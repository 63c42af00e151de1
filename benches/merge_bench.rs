use std::cmp::Ordering;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use paging_merge::{Options, Page, PagingIterator, SortedPagingIterator, TieBreak};

type IntPaging = SortedPagingIterator<Page<u64>, fn(&u64, &u64) -> Ordering>;

/// `shards` sorted pages of `rows` random keys each.
fn random_pages(shards: usize, rows: usize) -> Vec<Page<u64>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..shards)
        .map(|_| {
            let mut keys: Vec<u64> = (0..rows).map(|_| rng.gen_range(0..1_000_000)).collect();
            keys.sort_unstable();
            Page::new(keys)
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_merge");
    for shards in [2usize, 16, 128] {
        let pages = random_pages(shards, 10_000 / shards);

        group.bench_with_input(BenchmarkId::new("drain", shards), &pages, |b, pages| {
            b.iter(|| {
                let mut it: IntPaging = SortedPagingIterator::by_ord();
                it.merge(pages.iter().cloned());
                it.finish();
                black_box(it.by_ref().count())
            })
        });

        group.bench_with_input(
            BenchmarkId::new("drain_unspecified_ties", shards),
            &pages,
            |b, pages| {
                b.iter(|| {
                    let options = Options::default().with_tie_break(TieBreak::Unspecified);
                    let mut it: IntPaging = SortedPagingIterator::with_options(u64::cmp, options);
                    it.merge(pages.iter().cloned());
                    it.finish();
                    black_box(it.by_ref().count())
                })
            },
        );
    }
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let pages = random_pages(16, 1_000);
    let mut it: IntPaging = SortedPagingIterator::by_ord();
    it.merge(pages);
    it.finish();
    let drained = it.by_ref().count();

    c.bench_function("replay_16x1000", |b| {
        b.iter(|| {
            let replayed = it.repeat().map(Iterator::count).unwrap_or_default();
            assert_eq!(replayed, drained);
            black_box(replayed)
        })
    });
}

criterion_group!(benches, bench_merge, bench_replay);
criterion_main!(benches);
