// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Allocation failure under a node budget.
//!
//! A region whose operation runs out of nodes is poisoned: its content is
//! released and later calls fail until it is destroyed and recomputed.
//!
//! Run:
//! - `cargo run -p understory_region_demos --example pool_budget`

use understory_region::{Budget, IntRect, PoolGeneric, Region, RegionConfig, RegionError};

fn main() {
    let mut pool = PoolGeneric::with_allocator(Budget::new(3), 8);
    let mut region =
        Region::from_rect_with_config(&mut pool, IntRect::new(0, 0, 99, 99), RegionConfig::EXACT)
            .unwrap();

    // Punching a hole needs four nodes, one more than the budget allows.
    match region.subtract_rect(&mut pool, IntRect::new(40, 40, 59, 59)) {
        Err(err @ RegionError::AllocFailed(_)) => println!("subtract failed: {err}"),
        other => panic!("expected allocation failure, got {other:?}"),
    }
    println!("state: {:?}, empty: {}", region.state(), region.is_empty());
    assert_eq!(
        region.union_rect(&mut pool, IntRect::new(0, 0, 1, 1)),
        Err(RegionError::Poisoned)
    );

    region.destroy(&mut pool).unwrap();
    let budget = pool.teardown();
    println!("nodes outstanding after teardown: {}", budget.in_use());
}
