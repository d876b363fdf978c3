// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangle type and the rectangle decomposition primitive.

/// Closed integer rectangle.
///
/// Both corners are inclusive: `IntRect::new(0, 0, 9, 9)` covers a 10×10 block
/// of pixels. A rectangle with `x1 < x0` or `y1 < y0` covers nothing; regions
/// never store such rectangles, and operations treat them as the empty set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (inclusive).
    pub x1: i32,
    /// Bottom edge (inclusive).
    pub y1: i32,
}

impl IntRect {
    /// Create a rectangle from its inclusive corners.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from an origin and a size in pixels.
    ///
    /// Returns `None` if either dimension is zero or negative, or if the far
    /// edge does not fit in `i32`.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let x1 = x.checked_add(width - 1)?;
        let y1 = y.checked_add(height - 1)?;
        Some(Self::new(x, y, x1, y1))
    }

    /// True if the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    /// Width in pixels, widened so extreme coordinates cannot overflow.
    pub fn width(&self) -> i64 {
        (i64::from(self.x1) - i64::from(self.x0) + 1).max(0)
    }

    /// Height in pixels, widened so extreme coordinates cannot overflow.
    pub fn height(&self) -> i64 {
        (i64::from(self.y1) - i64::from(self.y0) + 1).max(0)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i128 {
        i128::from(self.width()) * i128::from(self.height())
    }

    /// Whether the pixel `(x, y)` lies inside.
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// Whether `other` lies entirely inside `self`.
    ///
    /// An empty `other` is contained by anything.
    pub const fn contains(&self, other: &Self) -> bool {
        other.is_empty()
            || (self.x0 <= other.x0
                && self.y0 <= other.y0
                && other.x1 <= self.x1
                && other.y1 <= self.y1)
    }

    /// Whether the two rectangles share at least one pixel.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// The overlap of two rectangles, or `None` if they share no pixel.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (!r.is_empty()).then_some(r)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Translate by `(dx, dy)` and clip the result to the `i32` range.
    ///
    /// Returns `None` if the rectangle is empty or lands entirely outside the
    /// representable range. Clipping never makes two disjoint rectangles
    /// overlap, unlike saturating each corner.
    pub fn translate(&self, dx: i32, dy: i32) -> Option<Self> {
        if self.is_empty() {
            return None;
        }
        let (x0, x1) = shift_span(self.x0, self.x1, dx)?;
        let (y0, y1) = shift_span(self.y0, self.y1, dy)?;
        Some(Self { x0, y0, x1, y1 })
    }

    /// Grow `self` in place to cover `other` if the two are edge-adjacent and
    /// share the full length of that edge. Returns whether it merged.
    pub(crate) fn try_absorb(&mut self, other: &Self) -> bool {
        if self.y0 == other.y0 && self.y1 == other.y1 {
            if adjacent(self.x1, other.x0) {
                self.x1 = other.x1;
                return true;
            }
            if adjacent(other.x1, self.x0) {
                self.x0 = other.x0;
                return true;
            }
        }
        if self.x0 == other.x0 && self.x1 == other.x1 {
            if adjacent(self.y1, other.y0) {
                self.y1 = other.y1;
                return true;
            }
            if adjacent(other.y1, self.y0) {
                self.y0 = other.y0;
                return true;
            }
        }
        false
    }
}

/// Move the closed span `lo..=hi` by `d`, clipped to `i32`.
fn shift_span(lo: i32, hi: i32, d: i32) -> Option<(i32, i32)> {
    let lo = (i64::from(lo) + i64::from(d)).max(i64::from(i32::MIN));
    let hi = (i64::from(hi) + i64::from(d)).min(i64::from(i32::MAX));
    Some((i32::try_from(lo).ok()?, i32::try_from(hi).ok()?)).filter(|(lo, hi)| lo <= hi)
}

/// `hi + 1 == lo` without overflowing at `i32::MAX`.
fn adjacent(hi: i32, lo: i32) -> bool {
    i64::from(hi) + 1 == i64::from(lo)
}

/// Decompose `d \ s` into at most four disjoint rectangles and pass each to `emit`.
///
/// If the rectangles do not overlap, `d` is emitted unchanged. Otherwise strips
/// are peeled in a fixed order (left, top, right, bottom) and the working
/// rectangle is narrowed after each one, so the strips never overlap each
/// other. Whatever remains lies inside `s` and is dropped.
///
/// The first error returned by `emit` aborts the decomposition.
pub fn cut<E>(
    d: IntRect,
    s: IntRect,
    mut emit: impl FnMut(IntRect) -> Result<(), E>,
) -> Result<(), E> {
    if d.is_empty() {
        return Ok(());
    }
    if s.is_empty() || !d.overlaps(&s) {
        return emit(d);
    }
    let mut w = d;
    // Bounds below cannot overflow: each strip edge sits strictly inside `d`.
    if w.x0 < s.x0 {
        emit(IntRect::new(w.x0, w.y0, s.x0 - 1, w.y1))?;
        w.x0 = s.x0;
    }
    if w.y0 < s.y0 {
        emit(IntRect::new(w.x0, w.y0, w.x1, s.y0 - 1))?;
        w.y0 = s.y0;
    }
    if w.x1 > s.x1 {
        emit(IntRect::new(s.x1 + 1, w.y0, w.x1, w.y1))?;
        w.x1 = s.x1;
    }
    if w.y1 > s.y1 {
        emit(IntRect::new(w.x0, s.y1 + 1, w.x1, w.y1))?;
    }
    Ok(())
}
