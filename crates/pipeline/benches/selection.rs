//! Benchmarks for best-post selection and prompt construction
//!
//! Run with: cargo bench --package pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use domain::{Engagement, Identity, Post};
use pipeline::{build_prompt, select_best};

fn synthetic_posts(count: u64) -> Vec<Post> {
    (0..count)
        .map(|i| Post {
            id: Some(i.to_string()),
            text: Some(format!("post number {i} about rust, coffee and cats")),
            // Every tenth post is malformed
            engagement: (i % 10 != 0).then(|| Engagement {
                reply_count: Some(i % 5),
                repost_count: Some((i * 31) % 97),
                favorite_count: Some((i * 17) % 89),
            }),
            ..Post::default()
        })
        .collect()
}

fn bench_select_best(c: &mut Criterion) {
    let posts = synthetic_posts(1_000);

    c.bench_function("select_best_1000", |b| {
        b.iter(|| {
            let best = select_best(black_box(&posts));
            black_box(best)
        })
    });
}

fn bench_build_prompt(c: &mut Criterion) {
    let posts1 = synthetic_posts(200);
    let posts2 = synthetic_posts(200);
    let alice = Identity::parse("alice").unwrap();
    let bob = Identity::parse("bob").unwrap();

    c.bench_function("build_prompt_200x200", |b| {
        b.iter(|| {
            let prompt = build_prompt(black_box(&posts1), black_box(&posts2), &alice, &bob);
            black_box(prompt)
        })
    });
}

criterion_group!(benches, bench_select_best, bench_build_prompt);
criterion_main!(benches);
