// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutable rectangle regions and their set algebra.

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::config::RegionConfig;
use crate::error::RegionError;
use crate::list::RectList;
use crate::pool::{NodeAllocator, PoolGeneric, PoolId};
use crate::types::{IntRect, cut};

/// Whether a region's content can still be trusted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegionState {
    /// Content is the result of every operation so far.
    Live,
    /// An operation failed to allocate. The content was released and every
    /// later mutating call fails with [`RegionError::Poisoned`].
    Poisoned,
}

/// A set of pairwise-disjoint closed integer rectangles.
///
/// Rectangle storage lives in a [`PoolGeneric`]; every operation takes that
/// pool explicitly. A region must be used with the pool it was created
/// against and must be returned to it with [`Region::destroy`].
///
/// Mutating operations build their result in a fresh list and only swap it in
/// on success. When the pool's allocator fails part way, the region releases
/// everything it held and becomes [`RegionState::Poisoned`].
#[derive(Debug)]
#[must_use = "a region must be returned to its pool with `Region::destroy`"]
pub struct Region {
    pool: PoolId,
    list: RectList,
    config: RegionConfig,
    state: RegionState,
}

impl Region {
    /// Create an empty region with the default configuration.
    pub fn new<A: NodeAllocator>(pool: &PoolGeneric<A>) -> Self {
        Self::with_config(pool, RegionConfig::default())
    }

    /// Create an empty region with the given configuration.
    pub fn with_config<A: NodeAllocator>(pool: &PoolGeneric<A>, config: RegionConfig) -> Self {
        Self {
            pool: pool.id(),
            list: RectList::new(),
            config,
            state: RegionState::Live,
        }
    }

    /// Create a region holding a single rectangle, with the default configuration.
    pub fn from_rect<A: NodeAllocator>(
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
    ) -> Result<Self, RegionError> {
        Self::from_rect_with_config(pool, rect, RegionConfig::default())
    }

    /// Create a region holding a single rectangle.
    ///
    /// An empty `rect` yields an empty region.
    pub fn from_rect_with_config<A: NodeAllocator>(
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
        config: RegionConfig,
    ) -> Result<Self, RegionError> {
        let mut region = Self::with_config(pool, config);
        if !rect.is_empty() {
            region.list.push(pool, rect)?;
        }
        Ok(region)
    }

    /// Return every node to `pool`.
    ///
    /// Fails with [`RegionError::ForeignPool`] if `pool` is not the region's
    /// pool; the nodes then stay counted as live in their own pool.
    pub fn destroy<A: NodeAllocator>(
        mut self,
        pool: &mut PoolGeneric<A>,
    ) -> Result<(), RegionError> {
        if self.pool != pool.id() {
            log::warn!(
                "region of {:?} destroyed against {:?}; {} nodes leaked",
                self.pool,
                pool.id(),
                self.list.len()
            );
            // Forget the nodes so the drop check below stays quiet.
            let _ = self.list.take_nodes();
            return Err(RegionError::ForeignPool);
        }
        pool.release_list(&mut self.list);
        Ok(())
    }

    /// Deep copy drawing fresh nodes from the same pool.
    pub fn try_clone<A: NodeAllocator>(
        &self,
        pool: &mut PoolGeneric<A>,
    ) -> Result<Self, RegionError> {
        self.check_usable(pool)?;
        let mut copy = Self::with_config(pool, self.config);
        for id in self.list.ids() {
            let Some(rect) = pool.rect(*id) else {
                continue;
            };
            if let Err(err) = copy.list.push(pool, rect) {
                pool.release_list(&mut copy.list);
                return Err(err);
            }
        }
        Ok(copy)
    }

    /// Drop all rectangles, keeping the region usable.
    ///
    /// Clearing a poisoned region makes it live again.
    pub fn clear<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
    ) -> Result<(), RegionError> {
        self.check_pool(pool)?;
        pool.release_list(&mut self.list);
        self.state = RegionState::Live;
        Ok(())
    }

    /// The pool this region draws from.
    pub fn pool_id(&self) -> PoolId {
        self.pool
    }

    /// The region's policy.
    pub fn config(&self) -> RegionConfig {
        self.config
    }

    /// Live or poisoned.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// True after a failed operation.
    pub fn is_poisoned(&self) -> bool {
        self.state == RegionState::Poisoned
    }

    /// True if the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of rectangles.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Add `rect` to the region.
    ///
    /// Nothing changes if the region already covers `rect`, even when several
    /// members share the cover. Otherwise, with an
    /// [`OpportunisticMerge`](crate::OpportunisticMerge) configured, the region
    /// may collapse to the bounding box of everything it covers.
    pub fn union_rect<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
    ) -> Result<(), RegionError> {
        self.check_usable(pool)?;
        if rect.is_empty() || self.contains_rect(pool, rect) {
            return Ok(());
        }
        let lookahead = self.config.merge_lookahead;

        if let Some(policy) = self.config.opportunistic {
            let mut bbox = rect;
            let mut summed = rect.area();
            for m in self.list.iter(pool) {
                bbox = bbox.union(&m);
                summed += m.area();
            }
            if policy.should_collapse(summed, bbox.area()) {
                log::trace!(
                    "collapsing {} rectangles into {bbox:?}",
                    self.list.len() + 1
                );
                return self.rebuild(pool, |_, pool, next| next.push(pool, bbox));
            }
        }

        self.rebuild(pool, |old, pool, next| {
            for &id in old.ids() {
                let Some(m) = pool.rect(id) else {
                    continue;
                };
                cut(m, rect, |piece| next.insert(pool, piece, lookahead))?;
            }
            next.insert(pool, rect, lookahead)
        })
    }

    /// Remove `rect` from the region.
    pub fn subtract_rect<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
    ) -> Result<(), RegionError> {
        self.check_usable(pool)?;
        if rect.is_empty() || !self.overlaps(pool, rect) {
            return Ok(());
        }
        let lookahead = self.config.merge_lookahead;
        self.rebuild(pool, |old, pool, next| {
            for &id in old.ids() {
                let Some(m) = pool.rect(id) else {
                    continue;
                };
                cut(m, rect, |piece| next.insert(pool, piece, lookahead))?;
            }
            Ok(())
        })
    }

    /// Keep only the part of the region inside `rect`.
    pub fn intersect_rect<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
    ) -> Result<(), RegionError> {
        self.intersect_rect_offset(pool, rect, 0, 0)
    }

    /// Keep only the part of the region inside `rect` translated by `(dx, dy)`.
    ///
    /// The translated clip is cut back to the `i32` range; a clip that lands
    /// entirely outside it empties the region.
    pub fn intersect_rect_offset<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
        dx: i32,
        dy: i32,
    ) -> Result<(), RegionError> {
        self.check_usable(pool)?;
        let clip = rect.translate(dx, dy);
        let lookahead = self.config.merge_lookahead;
        self.rebuild(pool, |old, pool, next| {
            let Some(clip) = clip else {
                return Ok(());
            };
            for &id in old.ids() {
                if let Some(overlap) = pool.rect(id).and_then(|m| m.intersect(&clip)) {
                    next.insert(pool, overlap, lookahead)?;
                }
            }
            Ok(())
        })
    }

    /// Replace the region with its symmetric difference with `rect`.
    pub fn xor_rect<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
    ) -> Result<(), RegionError> {
        self.check_usable(pool)?;
        if rect.is_empty() {
            return Ok(());
        }
        let lookahead = self.config.merge_lookahead;
        self.rebuild(pool, |old, pool, next| {
            // rect \ region, peeled member by member.
            let mut outside = Vec::from([rect]);
            let mut scratch = Vec::new();
            for &id in old.ids() {
                let Some(m) = pool.rect(id) else {
                    continue;
                };
                for piece in outside.drain(..) {
                    push_cut(piece, m, &mut scratch);
                }
                core::mem::swap(&mut outside, &mut scratch);
            }
            // region \ rect
            for &id in old.ids() {
                let Some(m) = pool.rect(id) else {
                    continue;
                };
                cut(m, rect, |piece| next.insert(pool, piece, lookahead))?;
            }
            for piece in outside {
                next.insert(pool, piece, lookahead)?;
            }
            Ok(())
        })
    }

    /// Add every rectangle of `other`.
    pub fn union_region<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        other: &Self,
    ) -> Result<(), RegionError> {
        for rect in self.foreign_rects(pool, other)? {
            self.union_rect(pool, rect)?;
        }
        Ok(())
    }

    /// Remove every rectangle of `other`.
    pub fn subtract_region<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        other: &Self,
    ) -> Result<(), RegionError> {
        for rect in self.foreign_rects(pool, other)? {
            self.subtract_rect(pool, rect)?;
        }
        Ok(())
    }

    /// Keep only the part of the region covered by `other`.
    pub fn intersect_region<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        other: &Self,
    ) -> Result<(), RegionError> {
        let clips = self.foreign_rects(pool, other)?;
        let lookahead = self.config.merge_lookahead;
        // `other` is disjoint, so the per-clip results are disjoint too.
        self.rebuild(pool, |old, pool, next| {
            for clip in &clips {
                for &id in old.ids() {
                    if let Some(overlap) = pool.rect(id).and_then(|m| m.intersect(clip)) {
                        next.insert(pool, overlap, lookahead)?;
                    }
                }
            }
            Ok(())
        })
    }

    /// Replace the region with its symmetric difference with `other`.
    pub fn xor_region<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        other: &Self,
    ) -> Result<(), RegionError> {
        // XOR over a disjoint union is the XOR of the parts, applied in sequence.
        for rect in self.foreign_rects(pool, other)? {
            self.xor_rect(pool, rect)?;
        }
        Ok(())
    }

    /// Translate every rectangle by `(dx, dy)`.
    ///
    /// Rectangles are clipped to the `i32` range. Any that move entirely out
    /// of it are dropped and their nodes go back to `pool`. Never allocates.
    pub fn shift<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        dx: i32,
        dy: i32,
    ) -> Result<(), RegionError> {
        self.check_pool(pool)?;
        let (kept, gone): (Vec<_>, Vec<_>) =
            self.list.take_nodes().into_iter().partition(|&id| {
                let Some(r) = pool.rect_mut(id) else {
                    return true;
                };
                match r.translate(dx, dy) {
                    Some(moved) => {
                        *r = moved;
                        true
                    }
                    None => false,
                }
            });
        self.list = RectList::from_nodes(kept);
        if !gone.is_empty() {
            log::debug!("shift by ({dx}, {dy}) dropped {} rectangles", gone.len());
            pool.release_list(&mut RectList::from_nodes(gone));
        }
        Ok(())
    }

    /// Rectangles in storage order.
    ///
    /// Queries never fail. Against a pool other than the region's, this and
    /// every other query see an empty region.
    pub fn rects<'a, A: NodeAllocator>(
        &'a self,
        pool: &'a PoolGeneric<A>,
    ) -> impl Iterator<Item = IntRect> + 'a {
        let ids = if self.pool == pool.id() {
            self.list.ids()
        } else {
            log::warn!("region of {:?} queried against {:?}", self.pool, pool.id());
            &[]
        };
        ids.iter().filter_map(move |&id| pool.rect(id))
    }

    /// Call `f` once per rectangle, in storage order.
    pub fn for_each_rect<A: NodeAllocator>(&self, pool: &PoolGeneric<A>, f: impl FnMut(IntRect)) {
        self.rects(pool).for_each(f);
    }

    /// Whether any rectangle shares a pixel with `rect`.
    pub fn overlaps<A: NodeAllocator>(&self, pool: &PoolGeneric<A>, rect: IntRect) -> bool {
        !rect.is_empty() && self.rects(pool).any(|m| m.overlaps(&rect))
    }

    /// Whether the pixel `(x, y)` is covered.
    pub fn contains_point<A: NodeAllocator>(&self, pool: &PoolGeneric<A>, x: i32, y: i32) -> bool {
        self.rects(pool).any(|m| m.contains_point(x, y))
    }

    /// Whether every pixel of `rect` is covered, possibly by several rectangles.
    pub fn contains_rect<A: NodeAllocator>(&self, pool: &PoolGeneric<A>, rect: IntRect) -> bool {
        if rect.is_empty() {
            return true;
        }
        let mut rest = Vec::from([rect]);
        let mut scratch = Vec::new();
        for m in self.rects(pool) {
            for piece in rest.drain(..) {
                push_cut(piece, m, &mut scratch);
            }
            core::mem::swap(&mut rest, &mut scratch);
            if rest.is_empty() {
                return true;
            }
        }
        rest.is_empty()
    }

    /// Smallest rectangle covering the region, or `None` if it is empty.
    pub fn bounding_box<A: NodeAllocator>(&self, pool: &PoolGeneric<A>) -> Option<IntRect> {
        let mut it = self.rects(pool);
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(&r)))
    }

    /// Number of covered pixels.
    ///
    /// Exact unless an opportunistic collapse widened the region.
    pub fn area<A: NodeAllocator>(&self, pool: &PoolGeneric<A>) -> i128 {
        self.rects(pool).map(|r| r.area()).sum()
    }

    fn check_pool<A: NodeAllocator>(&self, pool: &PoolGeneric<A>) -> Result<(), RegionError> {
        if self.pool == pool.id() {
            Ok(())
        } else {
            Err(RegionError::ForeignPool)
        }
    }

    fn check_usable<A: NodeAllocator>(&self, pool: &PoolGeneric<A>) -> Result<(), RegionError> {
        self.check_pool(pool)?;
        match self.state {
            RegionState::Live => Ok(()),
            RegionState::Poisoned => Err(RegionError::Poisoned),
        }
    }

    /// Snapshot `other`'s rectangles after checking both regions can be used with `pool`.
    fn foreign_rects<A: NodeAllocator>(
        &self,
        pool: &PoolGeneric<A>,
        other: &Self,
    ) -> Result<Vec<IntRect>, RegionError> {
        self.check_usable(pool)?;
        other.check_pool(pool)?;
        Ok(other.list.iter(pool).collect())
    }

    /// Build a replacement list from the current one and swap it in.
    ///
    /// On failure both lists go back to the pool and the region is poisoned.
    fn rebuild<A, F>(&mut self, pool: &mut PoolGeneric<A>, build: F) -> Result<(), RegionError>
    where
        A: NodeAllocator,
        F: FnOnce(&RectList, &mut PoolGeneric<A>, &mut RectList) -> Result<(), RegionError>,
    {
        let mut next = RectList::new();
        match build(&self.list, pool, &mut next) {
            Ok(()) => {
                let mut old = core::mem::replace(&mut self.list, next);
                pool.release_list(&mut old);
                Ok(())
            }
            Err(err) => {
                log::warn!("region operation failed ({err}); region is poisoned");
                pool.release_list(&mut next);
                pool.release_list(&mut self.list);
                self.state = RegionState::Poisoned;
                Err(err)
            }
        }
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        if !self.list.is_empty() {
            log::warn!(
                "region dropped with {} nodes still owned; use Region::destroy",
                self.list.len()
            );
        }
    }
}

fn push_cut(d: IntRect, s: IntRect, out: &mut Vec<IntRect>) {
    let _ = cut(d, s, |piece| {
        out.push(piece);
        Ok::<(), Infallible>(())
    });
}
