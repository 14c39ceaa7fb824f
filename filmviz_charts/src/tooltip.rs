// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-chart hover tooltip.
//!
//! Every interactive chart owns exactly one [`Tooltip`]. It starts hidden, is shown with the
//! hovered mark's [`TooltipContent`], follows the pointer at [`TOOLTIP_OFFSET`] and is hidden
//! again when the pointer leaves. Hosts with an overlay layer read [`Tooltip::position`] and
//! [`Tooltip::content`]; others can draw [`Tooltip::marks`].

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use filmviz_core::{Field, Mark, MarkId, Record, TextAnchor, TextBaseline};
use kurbo::{Point, Rect, Vec2};
use peniko::{Brush, Color};
use smallvec::SmallVec;

use crate::format::format_value;
use crate::measure::TextMeasurer;
use crate::z_order;

/// Offset from the pointer to the tooltip's top-left corner.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -5.0);

/// One `label: value` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipRow {
    /// Row label.
    pub label: String,
    /// Formatted value, or `"null"` when absent.
    pub value: String,
}

impl TooltipRow {
    fn new(label: &str, value: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value: format_value(value),
        }
    }
}

/// The rows shown for a hovered mark.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipContent {
    rows: SmallVec<[TooltipRow; 4]>,
}

impl TooltipContent {
    /// Builds the four rows: rank, the chart's value, rating and classic rating.
    ///
    /// Any missing piece, including a missing record, renders as `null`.
    pub fn for_record(record: Option<&Record>, value_label: &str, value: Option<f64>) -> Self {
        let field = |f: Field| record.and_then(|r| r.value(f));
        let mut rows = SmallVec::new();
        rows.push(TooltipRow::new(Field::Rank.label(), field(Field::Rank)));
        rows.push(TooltipRow::new(value_label, value));
        rows.push(TooltipRow::new(Field::Rating.label(), field(Field::Rating)));
        rows.push(TooltipRow::new(
            Field::ClassicRating.label(),
            field(Field::ClassicRating),
        ));
        Self { rows }
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[TooltipRow] {
        &self.rows
    }

    /// Value text of the row labelled `label`.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// Tooltip box styling.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipStyle {
    /// Box fill.
    pub background: Brush,
    /// Box border.
    pub border: Brush,
    /// Text fill.
    pub text: Brush,
    /// Font size of the rows.
    pub font_size: f64,
    /// Distance between the box edge and the text.
    pub padding: f64,
    /// Vertical advance per row.
    pub line_height: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: Brush::Solid(Color::from_rgb8(0x47, 0x55, 0x69)),
            border: Brush::Solid(Color::from_rgb8(0xcc, 0xcc, 0xcc)),
            text: Brush::Solid(Color::WHITE),
            font_size: 14.0,
            padding: 10.0,
            line_height: 20.0,
        }
    }
}

/// Number of mark ids a tooltip uses: the box plus one per row.
pub const TOOLTIP_ID_COUNT: u64 = 5;

/// A chart's floating tooltip.
#[derive(Clone, Debug)]
pub struct Tooltip {
    id_base: u64,
    visible: bool,
    position: Point,
    content: TooltipContent,
    /// Box styling.
    pub style: TooltipStyle,
}

impl Tooltip {
    /// Creates a hidden tooltip whose marks start at `id_base`.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            visible: false,
            position: Point::ZERO,
            content: TooltipContent::default(),
            style: TooltipStyle::default(),
        }
    }

    /// Shows `content` next to `pointer`.
    pub fn show(&mut self, content: TooltipContent, pointer: Point) {
        self.content = content;
        self.visible = true;
        self.move_to(pointer);
    }

    /// Repositions the tooltip next to `pointer`.
    pub fn move_to(&mut self, pointer: Point) {
        self.position = pointer + TOOLTIP_OFFSET;
    }

    /// Hides the tooltip.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Returns whether the tooltip is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Top-left corner of the box.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current rows, or `None` while hidden.
    pub fn content(&self) -> Option<&TooltipContent> {
        self.visible.then_some(&self.content)
    }

    /// Renders the box and its rows. Empty while hidden.
    pub fn marks(&self, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        if !self.visible {
            return Vec::new();
        }
        let s = &self.style;
        let lines: Vec<String> = self
            .content
            .rows()
            .iter()
            .map(|r| format!("{}: {}", r.label, r.value))
            .collect();
        let text_w = lines
            .iter()
            .map(|l| measurer.measure(l, s.font_size).0)
            .fold(0.0_f64, f64::max);
        let box_rect = Rect::from_origin_size(
            self.position,
            (
                text_w + 2.0 * s.padding,
                s.line_height * lines.len() as f64 + 2.0 * s.padding,
            ),
        );

        let base = MarkId::from_raw(self.id_base);
        let mut out = Vec::with_capacity(lines.len() + 1);
        out.push(
            Mark::rect(base, box_rect)
                .with_z_index(z_order::TOOLTIP)
                .with_fill(s.background.clone())
                .with_stroke(s.border.clone(), 1.0),
        );
        for (i, line) in lines.into_iter().enumerate() {
            let y = box_rect.y0 + s.padding + s.line_height * (i as f64 + 0.5);
            out.push(
                Mark::text(base.offset(1 + i as u64), (box_rect.x0 + s.padding, y), line)
                    .with_z_index(z_order::TOOLTIP_TEXT)
                    .with_font_size(s.font_size)
                    .with_fill(s.text.clone())
                    .with_anchor(TextAnchor::Start)
                    .with_baseline(TextBaseline::Middle),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn missing_fields_render_as_null() {
        let mut r = Record::new("a");
        r.rank = Some(3);
        r.rating = Some(4.25);
        let content = TooltipContent::for_record(Some(&r), "Watch Count", None);
        let labels: Vec<&str> = content.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Rank", "Watch Count", "Rating", "Classic Rating"]);
        assert_eq!(content.value_of("Rank"), Some("3"));
        assert_eq!(content.value_of("Watch Count"), Some("null"));
        assert_eq!(content.value_of("Rating"), Some("4.25"));
        assert_eq!(content.value_of("Classic Rating"), Some("null"));

        let orphan = TooltipContent::for_record(None, "Count", Some(2.0));
        assert_eq!(orphan.value_of("Count"), Some("2"));
        assert_eq!(orphan.value_of("Rank"), Some("null"));
    }

    #[test]
    fn tooltip_follows_pointer_with_offset() {
        let mut tip = Tooltip::new(500);
        assert!(!tip.is_visible());
        assert_eq!(tip.content(), None);

        tip.show(TooltipContent::for_record(None, "Count", None), Point::new(100.0, 50.0));
        assert!(tip.is_visible());
        assert_eq!(tip.position(), Point::new(110.0, 45.0));

        tip.move_to(Point::new(0.0, 0.0));
        assert_eq!(tip.position(), Point::new(10.0, -5.0));

        tip.hide();
        assert_eq!(tip.content(), None);
        assert!(tip.marks(&HeuristicTextMeasurer).is_empty());
    }

    #[test]
    fn marks_draw_a_box_and_one_line_per_row() {
        let mut tip = Tooltip::new(500);
        tip.show(TooltipContent::for_record(None, "Count", Some(7.0)), Point::ZERO);
        let marks = tip.marks(&HeuristicTextMeasurer);
        assert_eq!(marks.len(), 5);
        assert_eq!(marks[0].id, MarkId(500));
        let b = marks[0].bounds().unwrap();
        assert_eq!(b.height(), 4.0 * 20.0 + 20.0);
        assert!(marks[1..].iter().all(|m| m.z_index == z_order::TOOLTIP_TEXT));
    }
}
