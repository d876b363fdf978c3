// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip mask for a partially obscured window.
//!
//! Start from the window's bounds, subtract every sibling stacked above it,
//! intersect with the area being painted, then emit one fill per piece.
//!
//! Run:
//! - `cargo run -p understory_region_demos --example clip_mask`

use understory_region::{IntRect, Pool, Region, RegionConfig};

fn main() {
    let mut pool = Pool::new();

    let window = IntRect::new(0, 0, 299, 199);
    let above = [
        IntRect::new(50, 30, 149, 99),
        IntRect::new(120, 80, 259, 169),
        IntRect::new(280, -20, 400, 40),
    ];

    let mut clip = Region::from_rect_with_config(&mut pool, window, RegionConfig::EXACT).unwrap();
    for sibling in above {
        clip.subtract_rect(&mut pool, sibling).unwrap();
    }

    // Only part of the window is being repainted.
    let paint = IntRect::new(20, 20, 219, 179);
    clip.intersect_rect(&mut pool, paint).unwrap();

    println!("{} pieces, {} pixels", clip.len(), clip.area(&pool));
    clip.for_each_rect(&pool, |r| {
        println!("fill ({}, {}) .. ({}, {})", r.x0, r.y0, r.x1, r.y1);
    });

    assert!(!clip.contains_point(&pool, 100, 50), "covered by a sibling");
    assert!(clip.contains_point(&pool, 25, 150));

    clip.destroy(&mut pool).unwrap();
    println!("pool: {pool:?}");
}
