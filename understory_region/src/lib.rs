// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_region --heading-base-level=0

//! Understory Region: integer rectangle regions with pooled storage.
//!
//! A [`Region`] is a set of pairwise-disjoint, axis-aligned, closed integer
//! rectangles. It answers "which pixels are visible, dirty, or obscured"
//! without ever materializing a bitmap.
//!
//! - Union, intersection, subtraction, and symmetric difference against a
//!   rectangle or another region.
//! - Overlap, containment, bounding-box, and area queries, plus per-rectangle
//!   iteration for emitting paint commands.
//! - Rectangle nodes come from a [`Pool`] that recycles storage up to a cap,
//!   so short-lived regions rebuilt every frame do not churn the allocator.
//!
//! Typical uses are a *clip mask* (start from a drawable's bounds, subtract
//! every sibling stacked above it, intersect with the painted area) and a
//! *damage region* (union every invalidated rectangle, flush once per frame).
//!
//! # Example
//!
//! ```rust
//! use understory_region::{IntRect, Pool, Region, RegionConfig};
//!
//! let mut pool = Pool::new();
//!
//! // Window 0..=99, with a sibling window covering 20..=39 on top of it.
//! let mut clip = Region::from_rect_with_config(
//!     &mut pool,
//!     IntRect::new(0, 0, 99, 99),
//!     RegionConfig::EXACT,
//! )?;
//! clip.subtract_rect(&mut pool, IntRect::new(20, 20, 39, 39))?;
//! clip.intersect_rect(&mut pool, IntRect::new(10, 10, 49, 49))?;
//!
//! assert!(!clip.contains_point(&pool, 25, 25));
//! assert_eq!(clip.area(&pool), 40 * 40 - 20 * 20);
//!
//! clip.for_each_rect(&pool, |r| {
//!     // Emit one paint command per disjoint piece.
//!     let _ = r;
//! });
//! clip.destroy(&mut pool)?;
//! # Ok::<(), understory_region::RegionError>(())
//! ```
//!
//! ## Storage and sharing
//!
//! Every operation takes the pool explicitly. The `&mut` borrow is the access
//! token: the engine never locks, and a pool shared across threads goes
//! behind a mutex whose guard is passed into each call. Regions remember
//! which pool they came from: mutating calls reject any other with
//! [`RegionError::ForeignPool`], and queries against it see an empty region.
//! Return a region's nodes with [`Region::destroy`] when done.
//!
//! ## Exactness
//!
//! By default [`Region::union_rect`] may replace the region with its bounding
//! box when the box is small or densely covered (see [`OpportunisticMerge`]).
//! That suits damage tracking. Use [`RegionConfig::EXACT`] for clip masks and
//! anything else that must not over-approximate.
//!
//! ## Failure
//!
//! The only runtime failure is the pool's [`NodeAllocator`] refusing a node.
//! The operation returns [`RegionError::AllocFailed`], the region releases its
//! content and is marked [`RegionState::Poisoned`]. There is no rollback;
//! destroy the region and recompute.
//!
//! ## Features
//!
//! - `kurbo`: convert between [`IntRect`] and `kurbo::Rect` (enable together
//!   with `std` or `libm`).

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
#[cfg(feature = "kurbo")]
pub mod kurbo_interop;
pub mod list;
pub mod pool;
pub mod region;
pub mod types;

pub use config::{OpportunisticMerge, RegionConfig};
pub use error::{AllocError, RegionError};
pub use list::RectList;
pub use pool::{Budget, NodeAllocator, NodeId, Pool, PoolGeneric, PoolId, Unbounded};
pub use region::{Region, RegionState};
pub use types::{IntRect, cut};
