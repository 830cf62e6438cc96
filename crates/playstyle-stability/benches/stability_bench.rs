//! Criterion benchmarks for playstyle-stability: seeded split and re-identification ranking.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;

use playstyle_cluster::MedoidId;
use playstyle_stability::{SessionKey, split, stability_metric};

fn league(n_owners: usize, sessions: usize) -> IndexMap<SessionKey, Vec<MedoidId>> {
    let mut out = IndexMap::new();
    for owner in 0..n_owners {
        for session in 0..sessions {
            let labels = (0..40)
                .map(|i| MedoidId::new((owner * 7 + session * 3 + i) % 60))
                .collect();
            out.insert(SessionKey::new(session.to_string(), format!("owner{owner}")), labels);
        }
    }
    out
}

fn bench_split(c: &mut Criterion) {
    let labels = league(100, 38);
    c.bench_function("split_100x38", |b| {
        b.iter(|| split(&labels, Some(42)));
    });
}

fn bench_metric(c: &mut Criterion) {
    let mut group = c.benchmark_group("stability_metric");

    for &owners in &[20usize, 100, 400] {
        let profiles = split(&league(owners, 20), Some(42));
        group.bench_with_input(BenchmarkId::new("owners", owners), &profiles, |b, p| {
            b.iter(|| stability_metric(p, true));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_metric);
criterion_main!(benches);
