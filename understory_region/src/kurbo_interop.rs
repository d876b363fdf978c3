// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between [`IntRect`] and [`kurbo::Rect`].
//!
//! Kurbo rectangles are half-open in continuous space, while [`IntRect`] names
//! whole pixels with inclusive corners. Pixel `(x, y)` is the unit square
//! `[x, x + 1) × [y, y + 1)`.

use crate::types::IntRect;

impl IntRect {
    /// The pixel rectangle covering every pixel that `rect` touches.
    ///
    /// Returns `None` for empty, inverted, or NaN input. Coordinates beyond the
    /// `i32` range saturate.
    pub fn from_kurbo_outer(rect: kurbo::Rect) -> Option<Self> {
        let rect = rect.abs();
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            return None;
        }
        let outer = rect.expand();
        Some(Self::new(
            to_i32(outer.x0),
            to_i32(outer.y0),
            to_i32(outer.x1 - 1.0),
            to_i32(outer.y1 - 1.0),
        ))
    }

    /// The half-open Kurbo rectangle covering the same pixels.
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1) + 1.0,
            f64::from(self.y1) + 1.0,
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Float to int `as` casts saturate; out-of-range coordinates clamp to the i32 range."
)]
fn to_i32(v: f64) -> i32 {
    v as i32
}
