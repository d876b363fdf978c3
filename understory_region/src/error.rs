// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// A [`NodeAllocator`](crate::pool::NodeAllocator) could not provide another node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("node allocator is exhausted")]
pub struct AllocError;

/// Failure of a mutating region or pool operation.
///
/// After [`RegionError::AllocFailed`] the region that was being modified is
/// poisoned: its content has been released and every later mutating call
/// returns [`RegionError::Poisoned`]. Destroy it and recompute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// The pool's allocator refused to provide a rectangle node.
    #[error("rectangle node allocation failed")]
    AllocFailed(#[from] AllocError),
    /// An earlier operation on this region failed; its content is gone.
    #[error("region is poisoned by an earlier allocation failure")]
    Poisoned,
    /// The region was used with a pool other than the one it was created from.
    #[error("region does not belong to this pool")]
    ForeignPool,
}
