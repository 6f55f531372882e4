// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector3;
use polyframe_csg::geometry::{BooleanModeller, Primitive, Solid};
use polyframe_csg::{difference, intersection, union};

fn offset_cube(size: f64, offset: f64) -> Solid {
    let mut cube = Primitive::cube(Vector3::new(size, size, size), true).to_solid();
    cube.translate(&Vector3::new(offset, offset, offset));
    cube
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("sphere_32", |b| {
        b.iter(|| Primitive::sphere(black_box(10.0), black_box(32)).to_solid());
    });

    group.bench_function("cylinder_32", |b| {
        b.iter(|| Primitive::cylinder(black_box(20.0), black_box(5.0), black_box(32)).to_solid());
    });

    group.finish();
}

fn bench_cube_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_boolean");
    let a = offset_cube(10.0, 0.0);
    let b = offset_cube(10.0, 3.0);

    group.bench_function("union", |bench| {
        bench.iter(|| union(black_box(&a), black_box(&b)).unwrap());
    });
    group.bench_function("intersection", |bench| {
        bench.iter(|| intersection(black_box(&a), black_box(&b)).unwrap());
    });
    group.bench_function("difference", |bench| {
        bench.iter(|| difference(black_box(&a), black_box(&b)).unwrap());
    });

    group.finish();
}

fn bench_sphere_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_minus_sphere");
    group.sample_size(10);

    let cube = offset_cube(10.0, 0.0);
    for segments in [8u32, 16, 24] {
        let sphere = Primitive::sphere(6.5, segments).to_solid();
        group.bench_with_input(BenchmarkId::from_parameter(segments), &sphere, |bench, sphere| {
            bench.iter(|| difference(black_box(&cube), black_box(sphere)).unwrap());
        });
    }

    group.finish();
}

fn bench_modeller_reuse(c: &mut Criterion) {
    let a = offset_cube(10.0, 0.0);
    let b = Primitive::sphere(6.0, 16).to_solid();

    c.bench_function("modeller_all_three", |bench| {
        bench.iter(|| {
            let mut modeller = BooleanModeller::new(black_box(&a), black_box(&b)).unwrap();
            (modeller.union(), modeller.intersection(), modeller.difference())
        });
    });
}

criterion_group!(
    benches,
    bench_primitives,
    bench_cube_operations,
    bench_sphere_resolution,
    bench_modeller_reuse
);
criterion_main!(benches);
