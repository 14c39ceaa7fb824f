// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles live in the top margin strip reserved by [`crate::ChartLayout`] and are rendered as a
//! single text [`Mark`].

extern crate alloc;

use alloc::string::String;

use filmviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;

use crate::z_order;

/// A chart-level title.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchor within the title rectangle.
    pub anchor: TextAnchor,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl TitleSpec {
    /// Creates an 18px start-anchored title.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 18.0,
            fill: Brush::default(),
            anchor: TextAnchor::Start,
            z_index: z_order::TITLES,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Emits the title mark, vertically centered in `title_rect`.
    pub fn mark(&self, title_rect: Rect) -> Mark {
        let x = match self.anchor {
            TextAnchor::Start => title_rect.x0,
            TextAnchor::Middle => 0.5 * (title_rect.x0 + title_rect.x1),
            TextAnchor::End => title_rect.x1,
        };
        let y = 0.5 * (title_rect.y0 + title_rect.y1);
        Mark::text(self.id, (x, y), self.text.clone())
            .with_z_index(self.z_index)
            .with_font_size(self.font_size)
            .with_fill(self.fill.clone())
            .with_anchor(self.anchor)
            .with_baseline(TextBaseline::Middle)
    }
}
