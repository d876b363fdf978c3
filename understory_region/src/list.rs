// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered list of pool nodes with merge-aware insertion.

use alloc::vec::Vec;

use crate::error::RegionError;
use crate::pool::{NodeAllocator, NodeId, PoolGeneric};
use crate::types::IntRect;

/// An ordered, counted list of rectangle nodes drawn from a pool.
///
/// Order only records recency: the newest node sits at the end and is the
/// first one scanned for a merge partner. A list never frees its own nodes;
/// hand it to [`PoolGeneric::release_list`] when done.
#[derive(Debug, Default)]
pub struct RectList {
    nodes: Vec<NodeId>,
}

impl RectList {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of rectangles.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the list holds no rectangles.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node handles in storage order, oldest first.
    pub fn ids(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Rectangles in storage order, oldest first.
    pub fn iter<'a, A: NodeAllocator>(
        &'a self,
        pool: &'a PoolGeneric<A>,
    ) -> impl Iterator<Item = IntRect> + 'a {
        self.nodes.iter().filter_map(move |&id| pool.rect(id))
    }

    /// Append `rect` as a new node without looking for a merge partner.
    pub fn push<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
    ) -> Result<(), RegionError> {
        let id = pool.acquire(rect)?;
        self.nodes.push(id);
        Ok(())
    }

    /// Add `rect`, extending one of the `lookahead` newest nodes in place when
    /// it is edge-adjacent to `rect` along that node's full side.
    ///
    /// `rect` must not overlap any member. On allocation failure the list is
    /// left as it was before the call.
    pub fn insert<A: NodeAllocator>(
        &mut self,
        pool: &mut PoolGeneric<A>,
        rect: IntRect,
        lookahead: usize,
    ) -> Result<(), RegionError> {
        for &id in self.nodes.iter().rev().take(lookahead) {
            if let Some(node) = pool.rect_mut(id)
                && node.try_absorb(&rect)
            {
                return Ok(());
            }
        }
        self.push(pool, rect)
    }

    pub(crate) fn from_nodes(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub(crate) fn take_nodes(&mut self) -> Vec<NodeId> {
        core::mem::take(&mut self.nodes)
    }
}
