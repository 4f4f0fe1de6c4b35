// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::hint::black_box;

use cld_transforms::dct::DctBasis;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_size<const N: usize>(c: &mut Criterion) {
    let basis = DctBasis::<N>::new();
    let input: [[f64; N]; N] =
        std::array::from_fn(|y| std::array::from_fn(|x| ((x * 7 + y * 13) % 255) as f64 - 128.0));
    let mut group = c.benchmark_group("dct2d");
    group.bench_function(BenchmarkId::new("forward", format_args!("{N}x{N}")), |b| {
        b.iter(|| basis.forward(black_box(&input)))
    });
    group.bench_function(BenchmarkId::new("inverse", format_args!("{N}x{N}")), |b| {
        b.iter(|| basis.inverse(black_box(&input)))
    });
    group.finish();
}

fn dct_benches(c: &mut Criterion) {
    bench_size::<4>(c);
    bench_size::<8>(c);
}

criterion_group!(benches, dct_benches);
criterion_main!(benches);
