//! Benchmarks for the merge engine.
//!
//! Run with: cargo bench --bench merge_benchmark
//!
//! Measures N-way folds in both modes over generated documents whose
//! component sets overlap by half, so every fold step does real
//! identity merging rather than pure appends.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sbom_merge::merge::{merge_all, merge_all_as_dependencies};
use sbom_merge::model::{Bom, Component, Dependency, LicenseChoice, Metadata};
use std::hint::black_box;

/// Generate a document with `count` components, half of them shared with
/// every other generated document.
fn generate_bom(part: usize, count: usize) -> Bom {
    let root_ref = format!("pkg:cargo/part-{part}@1.0.0");
    let mut bom = Bom::new("1.5");
    bom.metadata = Some(Metadata {
        component: Some(
            Component::new("application", format!("part-{part}")).with_bom_ref(root_ref.as_str()),
        ),
        ..Metadata::default()
    });

    let components: Vec<Component> = (0..count)
        .map(|i| {
            let name = if i % 2 == 0 {
                format!("shared-{i}")
            } else {
                format!("part-{part}-dep-{i}")
            };
            let mut c = Component::new("library", name.as_str())
                .with_version("1.0.0")
                .with_bom_ref(format!("pkg:cargo/{name}@1.0.0"))
                .with_purl(format!("pkg:cargo/{name}@1.0.0"));
            c.licenses = Some(vec![LicenseChoice::spdx(if part % 2 == 0 {
                "MIT"
            } else {
                "Apache-2.0"
            })]);
            c
        })
        .collect();

    let mut dependencies = vec![Dependency::new(root_ref.as_str())
        .depends_on(components.iter().filter_map(|c| c.bom_ref.clone()))];
    dependencies.extend(
        components
            .iter()
            .filter_map(|c| c.bom_ref.as_deref())
            .map(Dependency::new),
    );

    bom.components = Some(components);
    bom.dependencies = Some(dependencies);
    bom
}

fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold");

    for &(parts, size) in &[(2, 500), (8, 500), (8, 2_000)] {
        let boms: Vec<Bom> = (0..parts).map(|p| generate_bom(p, size)).collect();
        let label = format!("{parts}x{size}");

        group.bench_with_input(BenchmarkId::new("merge", &label), &boms, |b, boms| {
            b.iter(|| black_box(merge_all(black_box(boms))));
        });
        group.bench_with_input(BenchmarkId::new("dependency", &label), &boms, |b, boms| {
            b.iter(|| black_box(merge_all_as_dependencies(black_box(boms))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fold);
criterion_main!(benches);
