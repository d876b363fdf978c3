// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accumulate world-space damage and flush it once per frame.
//!
//! Damage usually arrives as fractional Kurbo rectangles (for example the
//! `dirty_rects` of a box tree commit). Each one is snapped outward to whole
//! pixels and unioned into a damage region, which is flushed as blits.
//!
//! Run:
//! - `cargo run -p understory_region_demos --example damage_flush`

use kurbo::Rect;
use understory_region::{IntRect, Pool, Region};

fn main() {
    let mut pool = Pool::new();

    let frames: [&[Rect]; 3] = [
        &[Rect::new(10.2, 10.0, 30.7, 22.5), Rect::new(25.0, 15.0, 40.0, 30.0)],
        &[Rect::new(400.0, 300.0, 420.0, 310.0), Rect::new(0.0, 0.0, 5.0, 5.0)],
        &[],
    ];

    for (n, dirty) in frames.iter().enumerate() {
        let mut damage = Region::new(&pool);
        for rect in dirty.iter().copied() {
            if let Some(px) = IntRect::from_kurbo_outer(rect) {
                damage.union_rect(&mut pool, px).unwrap();
            }
        }

        if damage.is_empty() {
            println!("frame {n}: nothing to repaint");
        } else {
            println!(
                "frame {n}: {} blits covering {:?}",
                damage.len(),
                damage.bounding_box(&pool).map(IntRect::to_kurbo)
            );
            damage.for_each_rect(&pool, |r| println!("  blit {:?}", r.to_kurbo()));
        }
        damage.destroy(&mut pool).unwrap();
    }

    println!("recycled nodes kept: {}", pool.free_len());
}
