use chained_hashtable::{fnv1a_64, HashTable};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> u64 {
    fnv1a_64(format!("k{:016x}", n).as_bytes())
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("hash_table_insert_10k_with_growth", |b| {
        b.iter_batched(
            || HashTable::<u64>::with_buckets(2).unwrap(),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.insert(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("hash_table_find_hit", |b| {
        let mut t = HashTable::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, &k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(t.find(k));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("hash_table_find_miss", |b| {
        let mut t = HashTable::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.insert(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the table
            let k = key(miss.next().unwrap());
            black_box(t.find(k));
        })
    });
}

fn bench_cursor_drain(c: &mut Criterion) {
    c.bench_function("hash_table_cursor_drain_10k", |b| {
        b.iter_batched(
            || {
                let mut t = HashTable::new();
                for (i, x) in lcg(3).take(10_000).enumerate() {
                    t.insert(key(x), i as u64);
                }
                t
            },
            |mut t| {
                let mut cur = t.cursor();
                let mut sum = 0u64;
                while let Some(kv) = cur.remove(&mut t) {
                    sum = sum.wrapping_add(kv.value);
                }
                black_box(sum)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_cursor_drain
}
criterion_main!(benches);
