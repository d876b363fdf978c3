// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle node arena with a capped free list.
//!
//! Node storage is a contiguous slot vector addressed by [`NodeId`]. Freed
//! nodes are kept on a free stack for reuse, up to the pool's cap; anything
//! beyond the cap is handed back to the [`NodeAllocator`].
//!
//! Every call that touches a pool takes it by `&mut` (or `&` for reads). That
//! borrow is the only synchronization: to share one pool between threads, put
//! it behind a mutex and pass the guard into each call.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::DEFAULT_POOL_CAP;
use crate::error::{AllocError, RegionError};
use crate::list::RectList;
use crate::types::IntRect;

/// Backing store that grants and reclaims rectangle nodes.
///
/// The pool owns the node memory itself; the allocator only decides whether
/// one more node may exist and is told when one stops existing.
pub trait NodeAllocator {
    /// Grant storage for one more node.
    fn allocate(&mut self) -> Result<(), AllocError>;

    /// Reclaim the storage of one node.
    fn free(&mut self);
}

/// Allocator that never refuses.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unbounded;

impl NodeAllocator for Unbounded {
    #[inline]
    fn allocate(&mut self) -> Result<(), AllocError> {
        Ok(())
    }

    #[inline]
    fn free(&mut self) {}
}

/// Allocator with a fixed budget of outstanding nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    limit: usize,
    in_use: usize,
}

impl Budget {
    /// Allow at most `limit` nodes to exist at once.
    pub const fn new(limit: usize) -> Self {
        Self { limit, in_use: 0 }
    }

    /// Nodes currently granted and not yet freed.
    pub const fn in_use(&self) -> usize {
        self.in_use
    }

    /// The configured limit.
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

impl NodeAllocator for Budget {
    fn allocate(&mut self) -> Result<(), AllocError> {
        if self.in_use >= self.limit {
            return Err(AllocError);
        }
        self.in_use += 1;
        Ok(())
    }

    fn free(&mut self) {
        self.in_use = self.in_use.saturating_sub(1);
    }
}

/// Identity of a pool, used to catch regions handed to the wrong pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PoolId(u32);

impl PoolId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to one rectangle node in a pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node ids are intentionally 32-bit; a pool never holds 2^32 nodes."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Node arena parameterized by its backing allocator.
pub struct PoolGeneric<A: NodeAllocator> {
    id: PoolId,
    // `None` marks a slot whose storage went back to the allocator.
    slots: Vec<Option<IntRect>>,
    free: Vec<NodeId>,
    vacant: Vec<NodeId>,
    live: usize,
    cap: usize,
    allocator: A,
}

/// Pool backed by the [`Unbounded`] allocator.
pub type Pool = PoolGeneric<Unbounded>;

impl Pool {
    /// Create a pool that retains up to [`DEFAULT_POOL_CAP`] free nodes.
    pub fn new() -> Self {
        Self::with_allocator(Unbounded, DEFAULT_POOL_CAP)
    }

    /// Create a pool that retains up to `cap` free nodes.
    pub fn with_cap(cap: usize) -> Self {
        Self::with_allocator(Unbounded, cap)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: NodeAllocator> PoolGeneric<A> {
    /// Create a pool over `allocator` that retains up to `cap` free nodes.
    pub fn with_allocator(allocator: A, cap: usize) -> Self {
        Self {
            id: PoolId::next(),
            slots: Vec::new(),
            free: Vec::new(),
            vacant: Vec::new(),
            live: 0,
            cap,
            allocator,
        }
    }

    /// This pool's identity.
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Maximum number of free nodes retained for reuse.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Free nodes currently retained for reuse.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Nodes currently owned by lists.
    pub fn live_len(&self) -> usize {
        self.live
    }

    /// The backing allocator.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Take a node for `rect`, reusing a retained free node when there is one.
    pub fn acquire(&mut self, rect: IntRect) -> Result<NodeId, RegionError> {
        let id = if let Some(id) = self.free.pop() {
            id
        } else {
            self.allocator.allocate()?;
            if let Some(id) = self.vacant.pop() {
                id
            } else {
                self.slots.push(None);
                NodeId::new(self.slots.len() - 1)
            }
        };
        self.slots[id.idx()] = Some(rect);
        self.live += 1;
        Ok(id)
    }

    /// Move every node of `list` onto the free list, leaving `list` empty.
    ///
    /// Free nodes beyond the cap are returned to the allocator.
    ///
    /// The splice costs one `extend` of the free stack, linear in the list's
    /// length, with no per-node allocation. Trimming past the cap adds work
    /// proportional to the overflow and the vacant slots.
    pub fn release_list(&mut self, list: &mut RectList) {
        let nodes = list.take_nodes();
        self.live = self.live.saturating_sub(nodes.len());
        self.free.extend(nodes);
        self.trim();
    }

    /// Free every retained node and hand back the allocator.
    ///
    /// Call this only after every region drawing from the pool has been
    /// destroyed; nodes still owned by regions are leaked.
    pub fn teardown(mut self) -> A {
        if self.live > 0 {
            log::warn!(
                "pool torn down with {} nodes still owned by regions",
                self.live
            );
        }
        for _ in self.free.drain(..) {
            self.allocator.free();
        }
        self.allocator
    }

    /// Read a node's rectangle.
    pub fn rect(&self, id: NodeId) -> Option<IntRect> {
        self.slots.get(id.idx()).copied().flatten()
    }

    pub(crate) fn rect_mut(&mut self, id: NodeId) -> Option<&mut IntRect> {
        self.slots.get_mut(id.idx())?.as_mut()
    }

    fn trim(&mut self) {
        let excess = self.free.len().saturating_sub(self.cap);
        if excess == 0 {
            return;
        }
        for _ in 0..excess {
            let Some(id) = self.free.pop() else {
                break;
            };
            self.slots[id.idx()] = None;
            self.allocator.free();
            self.vacant.push(id);
        }
        // Give back trailing storage when the tail of the arena is all unbacked.
        let before = self.slots.len();
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        if self.slots.len() < before {
            let len = self.slots.len();
            self.vacant.retain(|id| id.idx() < len);
        }
        log::debug!(
            "pool trimmed {excess} free nodes (cap {}, {} slots)",
            self.cap,
            self.slots.len()
        );
    }
}

impl<A: NodeAllocator> Debug for PoolGeneric<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolGeneric")
            .field("id", &self.id)
            .field("total_slots", &self.slots.len())
            .field("live", &self.live)
            .field("free", &self.free.len())
            .field("cap", &self.cap)
            .finish_non_exhaustive()
    }
}
