// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable scene primitives.
//!
//! Charts are lowered to a flat list of [`Mark`]s. A mark has a stable [`MarkId`], a `z_index`
//! render-order hint, and a concrete payload (rectangle, path or text) in scene coordinates.
//! Renderers should paint in `(z_index, MarkId)` order; see [`paint_order`].

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

/// A stable mark identity.
///
/// Chart code derives ids from a per-chart base plus a deterministic offset, so ids of two
/// charts never collide as long as their bases are far enough apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from its raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id `offset` steps after this one.
    pub const fn offset(self, offset: u64) -> Self {
        Self(self.0 + offset)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor position is the vertical middle of the line.
    Middle,
    /// The anchor position is the alphabetic baseline.
    Alphabetic,
    /// The anchor position is the top of the line.
    Hanging,
    /// The anchor position is the bottom of the line.
    Ideographic,
}

/// The kind of a mark's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle.
    Rect,
    /// An arbitrary path.
    Path,
    /// A single line of unshaped text.
    Text,
}

/// Rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The concrete content of a [`Mark`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`RectPayload`].
    Rect(RectPayload),
    /// See [`PathPayload`].
    Path(PathPayload),
    /// See [`TextPayload`].
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds.
    ///
    /// Text has no bounds here: measuring it needs a text backend.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Returns whether `pt` lies inside the filled geometry. Text is never hit.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.rect.contains(pt),
            Self::Path(p) => p.path.contains(pt),
            Self::Text(_) => false,
        }
    }
}

/// A drawable scene mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Render-order hint.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a filled rectangle mark with a default fill and no stroke.
    pub fn rect(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Rect(RectPayload {
                rect,
                fill: Brush::default(),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            }),
        }
    }

    /// Creates a path mark with a transparent fill and no stroke.
    pub fn path(id: MarkId, path: BezPath) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Path(PathPayload {
                path,
                fill: Brush::Solid(Color::TRANSPARENT),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            }),
        }
    }

    /// Creates a text mark with a 12px font, start anchor and middle baseline.
    pub fn text(id: MarkId, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Text(TextPayload {
                pos: pos.into(),
                text: text.into(),
                font_size: 12.0,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: Brush::default(),
            }),
        }
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns geometric bounds (see [`MarkPayload::bounds`]).
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }

    /// Returns the stroke paint and width. Text has no stroke.
    pub fn stroke(&self) -> Option<(&Brush, f64)> {
        match &self.payload {
            MarkPayload::Rect(r) => Some((&r.stroke, r.stroke_width)),
            MarkPayload::Path(p) => Some((&p.stroke, p.stroke_width)),
            MarkPayload::Text(_) => None,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }

    /// Sets the stroke paint and width. Has no effect on text.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.set_stroke(stroke.into(), stroke_width);
        self
    }

    /// Replaces the stroke in place. Has no effect on text.
    pub fn set_stroke(&mut self, stroke: Brush, stroke_width: f64) {
        match &mut self.payload {
            MarkPayload::Rect(r) => {
                r.stroke = stroke;
                r.stroke_width = stroke_width;
            }
            MarkPayload::Path(p) => {
                p.stroke = stroke;
                p.stroke_width = stroke_width;
            }
            MarkPayload::Text(_) => {}
        }
    }

    /// Sets the font size. Text only.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.font_size = font_size;
        }
        self
    }

    /// Sets the text anchor. Text only.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
        }
        self
    }

    /// Sets the text baseline. Text only.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.baseline = baseline;
        }
        self
    }

    /// Sets the rotation angle in degrees. Text only.
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }
}

/// Sorts marks into paint order: ascending `z_index`, ties broken by [`MarkId`].
pub fn paint_order(marks: &mut [Mark]) {
    marks.sort_by_key(|m| (m.z_index, m.id));
}
