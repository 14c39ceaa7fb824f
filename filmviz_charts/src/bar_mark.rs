// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::vec::Vec;

use filmviz_core::{Mark, MarkId};
use kurbo::Rect;
use peniko::Brush;

use crate::scale::ScaleLinear;

/// A vertical bar mark.
///
/// This generates one rectangle per `(band_start, value)` pair, with bar geometry derived from
/// the value and a baseline.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base; bar `i` gets `id_base + i`.
    pub id_base: u64,
    /// Width of every bar.
    pub band_width: f64,
    /// Scale mapping values to scene y.
    pub y_scale: ScaleLinear,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill (`Brush::default()`).
    pub fn new(id_base: u64, band_width: f64, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            band_width,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Returns the rectangle of a bar starting at `x` with height `value`.
    pub fn rect(&self, x: f64, value: f64) -> Rect {
        let y0 = self.y_scale.map(self.baseline);
        let y1 = self.y_scale.map(value);
        Rect::new(x, y0.min(y1), x + self.band_width, y0.max(y1))
    }

    /// Generates one mark per `(x, value)` bar, in order.
    pub fn marks(&self, bars: &[(f64, f64)]) -> Vec<Mark> {
        let base = MarkId::from_raw(self.id_base);
        bars.iter()
            .enumerate()
            .map(|(i, &(x, value))| {
                Mark::rect(base.offset(i as u64), self.rect(x, value))
                    .with_z_index(self.z_index)
                    .with_fill(self.fill.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn bars_grow_up_from_the_baseline() {
        let y = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        let spec = BarMarkSpec::new(7, 20.0, y);
        let marks = spec.marks(&[(0.0, 5.0), (30.0, 10.0)]);
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].id, MarkId(7));
        assert_eq!(marks[1].id, MarkId(8));
        assert_eq!(marks[0].bounds(), Some(Rect::new(0.0, 50.0, 20.0, 100.0)));
        assert_eq!(marks[1].bounds(), Some(Rect::new(30.0, 0.0, 50.0, 100.0)));
    }
}
