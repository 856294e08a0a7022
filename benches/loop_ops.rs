//! Benchmarks for loop reconstruction and spaced selection.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loopspan::prelude::*;
use nalgebra::Point3;

/// `rings` concentric circles of `n` vertices each, all selected.
fn create_rings(rings: usize, n: usize) -> EdgeMesh {
    let mut positions = Vec::with_capacity(rings * n);
    let mut polylines = Vec::with_capacity(rings);

    for r in 0..rings {
        let radius = 10.0 + r as f64;
        let base = positions.len();
        for i in 0..n {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            positions.push(Point3::new(radius * t.cos(), radius * t.sin(), 0.0));
        }
        let mut line: Vec<usize> = (base..base + n).collect();
        line.push(base);
        polylines.push(line);
    }

    let mut mesh: EdgeMesh = build_from_polylines(&positions, &polylines).unwrap();
    mesh.select_all();
    mesh
}

/// A zig-zag open chain of `n` vertices, all selected.
fn create_zigzag(n: usize) -> EdgeMesh {
    let positions: Vec<_> = (0..n)
        .map(|i| Point3::new(i as f64, (i % 2) as f64 * 0.5, 0.0))
        .collect();
    let mut mesh: EdgeMesh = build_from_polylines(&positions, &[(0..n).collect::<Vec<_>>()]).unwrap();
    mesh.select_all();
    mesh
}

fn bench_build_loops(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_loops");
    for n in [100, 1_000, 10_000] {
        let mesh = create_rings(4, n);
        group.bench_with_input(BenchmarkId::new("rings", n), &mesh, |b, mesh| {
            b.iter(|| build_loops(black_box(mesh)))
        });

        let mesh = create_zigzag(n);
        group.bench_with_input(BenchmarkId::new("zigzag", n), &mesh, |b, mesh| {
            b.iter(|| build_loops(black_box(mesh)))
        });
    }
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let options = SpacingOptions::default();

    c.bench_function("select_rings_4x1000", |b| {
        let mesh = create_rings(4, 1_000);
        b.iter(|| {
            let mut mesh = mesh.clone();
            select_spaced_vertices(&mut mesh, &options).unwrap()
        })
    });

    c.bench_function("select_zigzag_10000", |b| {
        let mesh = create_zigzag(10_000);
        b.iter(|| {
            let mut mesh = mesh.clone();
            select_spaced_vertices(&mut mesh, &options).unwrap()
        })
    });
}

criterion_group!(benches, bench_build_loops, bench_select);
criterion_main!(benches);
