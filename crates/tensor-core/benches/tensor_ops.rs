// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for tensor operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensor_core::Tensor;

fn ramp<const RANK: usize>(shape: [usize; RANK]) -> Tensor<f32, RANK> {
    let len = shape.iter().product::<usize>();
    let data = (0..len).map(|i| (i % 17) as f32 * 0.25).collect();
    Tensor::from_vec(shape, data).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let a = ramp([64, 64]);
    let b = ramp([64, 64]);
    c.bench_function("matmul 64x64", |bench| {
        bench.iter(|| black_box(&a).matmul(black_box(&b)).unwrap())
    });

    let a = ramp([8, 32, 32]);
    let b = ramp([8, 32, 32]);
    c.bench_function("matmul batched 8x32x32", |bench| {
        bench.iter(|| black_box(&a).matmul(black_box(&b)).unwrap())
    });
}

fn bench_broadcast(c: &mut Criterion) {
    let a = ramp([256, 256]);
    let b = ramp([256, 1]);
    c.bench_function("broadcast mul 256x256 by 256x1", |bench| {
        bench.iter(|| (black_box(&a) * black_box(&b)).unwrap())
    });
    c.bench_function("elementwise add 256x256", |bench| {
        bench.iter(|| (black_box(&a) + black_box(&a)).unwrap())
    });
}

fn bench_transpose(c: &mut Criterion) {
    let t = ramp([16, 64, 48]);
    c.bench_function("transpose batched 16x64x48", |bench| {
        bench.iter(|| black_box(&t).transpose().unwrap())
    });
}

criterion_group!(benches, bench_matmul, bench_broadcast, bench_transpose);
criterion_main!(benches);
