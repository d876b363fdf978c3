// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_region::{IntRect, Pool, Region, RegionConfig};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_in(&mut self, bound: i32) -> i32 {
        (self.next_u64() % bound as u64) as i32
    }
}

/// Random small rectangles scattered over a `w`×`h` canvas, like per-glyph damage.
fn gen_damage_rects(count: usize, w: i32, h: i32, max_side: i32) -> Vec<IntRect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_in(w - max_side);
        let y0 = rng.next_in(h - max_side);
        let x1 = x0 + 1 + rng.next_in(max_side);
        let y1 = y0 + 1 + rng.next_in(max_side);
        out.push(IntRect::new(x0, y0, x1, y1));
    }
    out
}

/// A stack of overlapping windows, bottom first.
fn gen_window_stack(n: usize) -> Vec<IntRect> {
    let mut out = Vec::with_capacity(n);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    for _ in 0..n {
        let x0 = rng.next_in(1600);
        let y0 = rng.next_in(900);
        let x1 = x0 + 100 + rng.next_in(300);
        let y1 = y0 + 80 + rng.next_in(200);
        out.push(IntRect::new(x0, y0, x1, y1));
    }
    out
}

/// Row-major tiles, each adjacent to the previous one.
fn gen_tiles(n: i32, side: i32) -> Vec<IntRect> {
    let mut out = Vec::new();
    for y in 0..n {
        for x in 0..n {
            out.push(IntRect::new(
                x * side,
                y * side,
                x * side + side - 1,
                y * side + side - 1,
            ));
        }
    }
    out
}

fn bench_damage(c: &mut Criterion) {
    let mut group = c.benchmark_group("damage");
    for &n in &[64_usize, 256, 1024] {
        let rects = gen_damage_rects(n, 1920, 1080, 24);
        group.throughput(Throughput::Elements(n as u64));
        for (name, config) in [
            ("opportunistic", RegionConfig::default()),
            ("exact", RegionConfig::EXACT),
        ] {
            let mut pool = Pool::new();
            group.bench_function(format!("union_{name}_n{n}"), |b| {
                b.iter(|| {
                    let mut damage = Region::with_config(&pool, config);
                    for r in &rects {
                        damage.union_rect(&mut pool, *r).unwrap();
                    }
                    let mut pieces = 0_usize;
                    damage.for_each_rect(&pool, |_| pieces += 1);
                    black_box(pieces);
                    damage.destroy(&mut pool).unwrap();
                });
            });
        }
    }
    let tiles = gen_tiles(32, 16);
    group.bench_function("union_adjacent_tiles", |b| {
        b.iter_batched(
            Pool::new,
            |mut pool| {
                let mut damage = Region::with_config(&pool, RegionConfig::EXACT);
                for r in &tiles {
                    damage.union_rect(&mut pool, *r).unwrap();
                }
                black_box(damage.len());
                damage.destroy(&mut pool).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip");
    for &n in &[8_usize, 32, 128] {
        let stack = gen_window_stack(n);
        let paint = IntRect::new(200, 200, 1400, 800);
        group.throughput(Throughput::Elements(n as u64));
        let mut pool = Pool::new();
        group.bench_function(format!("clip_mask_n{n}"), |b| {
            b.iter(|| {
                let screen = IntRect::new(0, 0, 1919, 1079);
                let mut clip =
                    Region::from_rect_with_config(&mut pool, screen, RegionConfig::EXACT).unwrap();
                for above in &stack {
                    clip.subtract_rect(&mut pool, *above).unwrap();
                }
                clip.intersect_rect(&mut pool, paint).unwrap();
                black_box(clip.area(&pool));
                clip.destroy(&mut pool).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_region_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_vs_region");
    let mut pool = Pool::new();
    let mut a = Region::with_config(&pool, RegionConfig::EXACT);
    for r in gen_window_stack(32) {
        a.union_rect(&mut pool, r).unwrap();
    }
    let mut b_region = Region::with_config(&pool, RegionConfig::EXACT);
    for r in gen_damage_rects(128, 1920, 1080, 64) {
        b_region.union_rect(&mut pool, r).unwrap();
    }
    group.bench_function("subtract_region", |b| {
        b.iter(|| {
            let mut out = a.try_clone(&mut pool).unwrap();
            out.subtract_region(&mut pool, &b_region).unwrap();
            black_box(out.len());
            out.destroy(&mut pool).unwrap();
        });
    });
    group.bench_function("intersect_region", |b| {
        b.iter(|| {
            let mut out = a.try_clone(&mut pool).unwrap();
            out.intersect_region(&mut pool, &b_region).unwrap();
            black_box(out.len());
            out.destroy(&mut pool).unwrap();
        });
    });
    group.bench_function("xor_region", |b| {
        b.iter(|| {
            let mut out = a.try_clone(&mut pool).unwrap();
            out.xor_region(&mut pool, &b_region).unwrap();
            black_box(out.len());
            out.destroy(&mut pool).unwrap();
        });
    });
    group.finish();
    a.destroy(&mut pool).unwrap();
    b_region.destroy(&mut pool).unwrap();
}

criterion_group!(benches, bench_damage, bench_clip, bench_region_ops);
criterion_main!(benches);
