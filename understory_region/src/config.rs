// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable policy for merging and collapsing rectangles.
//!
//! The defaults were picked empirically for window-system damage and clip
//! workloads. Other workloads may want different numbers.

/// Number of most recently inserted rectangles scanned for an adjacent merge partner.
pub const DEFAULT_MERGE_LOOKAHEAD: usize = 5;

/// Bounding boxes smaller than this many pixels always collapse.
pub const DEFAULT_AREA_THRESHOLD: u64 = 1000;

/// Coverage density (percent of the bounding box) above which a union collapses.
pub const DEFAULT_DENSITY_PERCENT: u32 = 25;

/// Maximum number of free nodes a pool retains for reuse.
pub const DEFAULT_POOL_CAP: usize = 512;

/// Thresholds for replacing an exact union with its bounding box.
///
/// After a collapse the region covers at least the true union, usually more.
/// Use it for damage, where repainting a few extra pixels is cheaper than
/// tracking many small rectangles. Never use it for clip masks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpportunisticMerge {
    /// Collapse when the bounding box covers fewer pixels than this.
    pub area_threshold: u64,
    /// Collapse when `summed_area * 100 / bbox_area` exceeds this.
    pub density_percent: u32,
}

impl Default for OpportunisticMerge {
    fn default() -> Self {
        Self {
            area_threshold: DEFAULT_AREA_THRESHOLD,
            density_percent: DEFAULT_DENSITY_PERCENT,
        }
    }
}

impl OpportunisticMerge {
    /// Decide whether rectangles with the given summed area, whose bounding
    /// box covers `bbox_area` pixels, should collapse into that box.
    ///
    /// The summed area may count pixels more than once.
    pub fn should_collapse(&self, summed_area: i128, bbox_area: i128) -> bool {
        if bbox_area <= 0 {
            return false;
        }
        bbox_area < i128::from(self.area_threshold)
            || summed_area * 100 / bbox_area > i128::from(self.density_percent)
    }
}

/// Per-region policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionConfig {
    /// How many of the newest rectangles an insertion scans for an adjacent
    /// merge partner. Zero disables merging.
    pub merge_lookahead: usize,
    /// Bounding-box collapse on union, or `None` to keep unions exact.
    pub opportunistic: Option<OpportunisticMerge>,
}

impl RegionConfig {
    /// Exact unions with the default merge lookahead.
    pub const EXACT: Self = Self {
        merge_lookahead: DEFAULT_MERGE_LOOKAHEAD,
        opportunistic: None,
    };
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            merge_lookahead: DEFAULT_MERGE_LOOKAHEAD,
            opportunistic: Some(OpportunisticMerge::default()),
        }
    }
}
