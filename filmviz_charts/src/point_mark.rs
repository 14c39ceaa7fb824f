// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::vec::Vec;

use filmviz_core::{Mark, MarkId};
use kurbo::{BezPath, Circle, Shape};
use peniko::Brush;

use crate::scale::ScaleLinear;

/// A small set of symbol shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A square (axis-aligned).
    Square,
    /// A circle.
    Circle,
}

impl Symbol {
    /// Returns a path for this symbol centered at `cx, cy`, using `size` as the diameter/side.
    pub fn path(self, cx: f64, cy: f64, size: f64) -> BezPath {
        let half = size * 0.5;
        match self {
            Self::Square => {
                let mut p = BezPath::new();
                p.move_to((cx - half, cy - half));
                p.line_to((cx + half, cy - half));
                p.line_to((cx + half, cy + half));
                p.line_to((cx - half, cy + half));
                p.close_path();
                p
            }
            Self::Circle => Circle::new((cx, cy), half).path_elements(0.1).collect(),
        }
    }
}

/// A scatter point mark.
///
/// This generates one filled symbol path per `(x, y)` data pair.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Stable-id base; point `i` gets `id_base + i`.
    pub id_base: u64,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleLinear,
    /// Symbol size (diameter or side) in scene coordinates.
    pub size: f64,
    /// The point glyph shape.
    pub symbol: Symbol,
    /// Fill paint for the point glyphs.
    pub fill: Brush,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec drawing 8px circles with a default fill.
    pub fn new(id_base: u64, x_scale: ScaleLinear, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            x_scale,
            y_scale,
            size: 8.0,
            symbol: Symbol::Circle,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the glyph size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the symbol shape.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Generates one mark per data point, in order.
    pub fn marks(&self, points: &[(f64, f64)]) -> Vec<Mark> {
        let base = MarkId::from_raw(self.id_base);
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let path = self
                    .symbol
                    .path(self.x_scale.map(x), self.y_scale.map(y), self.size);
                Mark::path(base.offset(i as u64), path)
                    .with_z_index(self.z_index)
                    .with_fill(self.fill.clone())
            })
            .collect()
    }
}
