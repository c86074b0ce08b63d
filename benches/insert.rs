use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use lexicon_trie::{Trie, TrieBuilder};
use std::hint::black_box;

/// Deterministic pseudo-words over `a..=z`.
fn words(count: usize) -> Vec<String> {
    let mut state = 0x2545_f491_u64;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let len = 3 + (state % 8) as usize;
            (0..len)
                .map(|i| (b'a' + ((state >> (i * 5)) % 26) as u8) as char)
                .collect()
        })
        .collect()
}

fn insert_benchmark(c: &mut Criterion) {
    let words = words(10_000);

    c.bench_function("construction", |b| {
        b.iter(|| {
            TrieBuilder::new()
                .words(words.iter().map(|word| (word.as_str(), ())))
                .build()
                .unwrap()
        })
    });

    c.bench_function("remove", |b| {
        b.iter_batched(
            || {
                let trie = Trie::new();
                for word in &words {
                    trie.insert(word, ()).unwrap();
                }
                trie
            },
            |trie| {
                for word in &words {
                    black_box(trie.remove(word));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = insert_benchmark
}
criterion_main!(benches);
