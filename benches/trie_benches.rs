use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use path_trie::{MutablePathTrie, PathTrie};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FANOUT: usize = 8;
const DEPTH: usize = 4;

fn random_paths(count: usize, seed: u64) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let depth = rng.gen_range(1..=DEPTH);
            (0..depth)
                .map(|_| format!("s{}", rng.gen_range(0..FANOUT)))
                .collect()
        })
        .collect()
}

fn build(paths: &[Vec<String>]) -> PathTrie<usize> {
    PathTrie::create(paths.iter().cloned().enumerate().map(|(i, p)| (p, i)))
}

fn bench_build(c: &mut Criterion) {
    let paths = random_paths(1_000, 1);

    c.bench_function("create 1k", |b| b.iter(|| build(black_box(&paths))));

    c.bench_function("persistent update 1k", |b| {
        b.iter(|| {
            paths
                .iter()
                .enumerate()
                .fold(PathTrie::new(), |trie, (i, p)| trie.update(black_box(p), i))
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let paths = random_paths(1_000, 2);
    let trie = build(&paths);
    let probes = random_paths(100, 3);

    c.bench_function("get 100", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|p| trie.get(black_box(p.as_slice())).is_some())
                .count()
        })
    });

    c.bench_function("iter 1k", |b| b.iter(|| trie.iter().map(|(_, v)| *v).sum::<usize>()));

    c.bench_function("len cached", |b| b.iter(|| black_box(&trie).len()));
}

fn bench_versions(c: &mut Criterion) {
    let paths = random_paths(1_000, 4);
    let trie = build(&paths);
    let probes = random_paths(100, 5);

    c.bench_function("update one path", |b| {
        b.iter(|| trie.update(black_box(&probes[0]), 0))
    });

    c.bench_function("remove 100", |b| {
        b.iter(|| probes.iter().fold(trie.clone(), |t, p| t.remove(p)))
    });

    c.bench_function("thaw and edit 100", |b| {
        b.iter_batched(
            || MutablePathTrie::from(trie.clone()),
            |mut editable| {
                for (i, p) in probes.iter().enumerate() {
                    editable.update(p, i);
                }
                editable
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build, bench_lookup, bench_versions);
criterion_main!(benches);
