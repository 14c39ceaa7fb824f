// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] pairs a scale with an orientation and lowers to a domain line, tick rules,
//! tick labels and an optional title. Band scales tick at band centers and label with the
//! category text; linear scales tick at “nice” values labelled with zero decimals.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use filmviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{CategoryScale, ScaleBand, ScaleLinear};
use crate::z_order;

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Paint for the domain line and tick marks.
    pub rule: Brush,
    /// Stroke width for the domain line and tick marks.
    pub rule_width: f64,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let ink = Brush::Solid(css::BLACK);
        Self {
            rule: ink.clone(),
            rule_width: 1.0,
            label_fill: ink.clone(),
            label_font_size: 10.0,
            title_fill: ink,
            title_font_size: 12.0,
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot.
    Bottom,
    /// A vertical axis left of the plot.
    Left,
}

/// The scale an axis ticks.
#[derive(Clone, Debug)]
pub enum AxisScale {
    /// Positional bands, one label per band, ticked at band centers.
    ///
    /// Labels are matched to bands by index and may repeat.
    Band {
        /// Band geometry.
        band: ScaleBand,
        /// Label of band `i`.
        labels: Vec<String>,
    },
    /// A continuous linear scale.
    Linear(ScaleLinear),
}

impl From<CategoryScale> for AxisScale {
    fn from(scale: CategoryScale) -> Self {
        Self::Band {
            band: scale.band(),
            labels: scale.domain().to_vec(),
        }
    }
}

impl From<ScaleLinear> for AxisScale {
    fn from(scale: ScaleLinear) -> Self {
        Self::Linear(scale)
    }
}

/// An axis specification.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The scale to tick.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks for linear scales.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from the axis line to the title.
    pub title_offset: f64,
}

impl AxisSpec {
    /// Creates a new axis with ten ticks, 6px tick lines and a 3px label gap.
    pub fn new(id_base: u64, scale: AxisScale, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            show_domain: true,
            style: AxisStyle::default(),
            title: None,
            title_offset: 40.0,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: AxisScale) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: AxisScale) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns `(position, label)` for every tick along the axis.
    fn ticks(&self) -> Vec<(f64, String)> {
        match &self.scale {
            AxisScale::Band { band, labels } => {
                let half = 0.5 * band.band_width();
                labels
                    .iter()
                    .take(band.count())
                    .enumerate()
                    .map(|(i, l)| (band.x(i) + half, l.clone()))
                    .collect()
            }
            AxisScale::Linear(s) => s
                .ticks(self.tick_count)
                .into_iter()
                .map(|v| (s.map(v), format_tick(v)))
                .collect(),
        }
    }

    /// Number of ids the axis uses, starting at `id_base`.
    ///
    /// The domain line takes `id_base`, tick `i` takes `id_base + 1 + i`, its label
    /// `id_base + 1 + n + i` and the title `id_base + 1 + 2n`, for `n` ticks.
    pub fn id_count(&self) -> u64 {
        2 + 2 * self.ticks().len() as u64
    }

    /// Generate axis marks for the plot rectangle and the reserved axis strip.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Bottom => self.marks_bottom(plot, axis_rect),
            AxisOrient::Left => self.marks_left(plot, axis_rect),
        }
    }

    fn rule(&self, id: MarkId, from: (f64, f64), to: (f64, f64)) -> Mark {
        RuleMarkSpec::new(id, from, to)
            .with_stroke(self.style.rule.clone(), self.style.rule_width)
            .with_z_index(z_order::AXIS_RULES)
            .mark()
    }

    fn marks_bottom(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let base = MarkId::from_raw(self.id_base);
        let y = plot.y1;
        let mut out = Vec::new();

        if self.show_domain {
            out.push(self.rule(base, (plot.x0, y), (plot.x1, y)));
        }

        let ticks = self.ticks();
        let n = ticks.len() as u64;
        for (i, (x, label)) in ticks.into_iter().enumerate() {
            let i = i as u64;
            out.push(self.rule(base.offset(1 + i), (x, y), (x, y + self.tick_size)));
            let label_y = y + self.tick_size + self.tick_padding;
            out.push(
                Mark::text(base.offset(1 + n + i), (x, label_y), label)
                    .with_z_index(z_order::AXIS_LABELS)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Hanging)
                    .with_font_size(self.style.label_font_size)
                    .with_fill(self.style.label_fill.clone()),
            );
        }

        if let Some(title) = &self.title {
            let pos = (0.5 * (axis_rect.x0 + axis_rect.x1), y + self.title_offset);
            out.push(
                Mark::text(base.offset(1 + 2 * n), pos, title.clone())
                    .with_z_index(z_order::AXIS_TITLES)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Alphabetic)
                    .with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone()),
            );
        }

        out
    }

    fn marks_left(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let base = MarkId::from_raw(self.id_base);
        let x = plot.x0;
        let mut out = Vec::new();

        if self.show_domain {
            out.push(self.rule(base, (x, plot.y0), (x, plot.y1)));
        }

        let ticks = self.ticks();
        let n = ticks.len() as u64;
        for (i, (y, label)) in ticks.into_iter().enumerate() {
            let i = i as u64;
            out.push(self.rule(base.offset(1 + i), (x, y), (x - self.tick_size, y)));
            let label_x = x - self.tick_size - self.tick_padding;
            out.push(
                Mark::text(base.offset(1 + n + i), (label_x, y), label)
                    .with_z_index(z_order::AXIS_LABELS)
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Middle)
                    .with_font_size(self.style.label_font_size)
                    .with_fill(self.style.label_fill.clone()),
            );
        }

        if let Some(title) = &self.title {
            let pos = (
                axis_rect.x0 + 0.5 * self.style.title_font_size,
                0.5 * (plot.y0 + plot.y1),
            );
            out.push(
                Mark::text(base.offset(1 + 2 * n), pos, title.clone())
                    .with_z_index(z_order::AXIS_TITLES)
                    .with_anchor(TextAnchor::Middle)
                    .with_angle(-90.0)
                    .with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone()),
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use filmviz_core::{MarkKind, MarkPayload};

    use super::*;

    fn texts(marks: &[Mark]) -> Vec<&str> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) if m.z_index == z_order::AXIS_LABELS => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn band_axis_labels_categories_at_band_centers() {
        let scale = CategoryScale::new(vec!["Heat".into(), "Alien".into()], (0.0, 100.0), 0.0);
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis = AxisSpec::bottom(10, scale.into()).with_title("Film");
        let marks = axis.marks(plot, Rect::new(0.0, 50.0, 100.0, 90.0));
        assert_eq!(texts(&marks), vec!["Heat", "Alien"]);

        let label = marks.iter().find(|m| m.id == MarkId(13)).unwrap();
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text");
        };
        assert_eq!(t.pos.x, 25.0);

        let title = marks.iter().find(|m| m.id == MarkId(15)).unwrap();
        let MarkPayload::Text(t) = &title.payload else {
            panic!("expected text");
        };
        assert_eq!((t.pos.x, t.pos.y), (50.0, 90.0));
    }

    #[test]
    fn linear_axis_formats_ticks_without_decimals() {
        let scale = ScaleLinear::new((0.0, 4.5), (100.0, 0.0));
        let plot = Rect::new(20.0, 0.0, 120.0, 100.0);
        let axis = AxisSpec::left(0, AxisScale::Linear(scale)).with_tick_count(5);
        let marks = axis.marks(plot, Rect::new(0.0, 0.0, 20.0, 100.0));
        assert_eq!(texts(&marks), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn domain_line_can_be_removed() {
        let scale = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        let plot = Rect::new(20.0, 0.0, 120.0, 100.0);
        let axis = AxisSpec::left(0, AxisScale::Linear(scale));
        let strip = Rect::new(0.0, 0.0, 20.0, 100.0);

        let with = axis.marks(plot, strip);
        assert!(with.iter().any(|m| m.id == MarkId(0)));
        let without = axis.with_domain(false).marks(plot, strip);
        assert!(!without.iter().any(|m| m.id == MarkId(0)));
        assert!(without.iter().all(|m| m.kind() != MarkKind::Rect));
    }

    #[test]
    fn repeated_band_labels_keep_one_tick_per_band() {
        let band = ScaleBand::new((0.0, 90.0), 3).with_padding(0.0, 0.0);
        let labels = vec!["1".into(), "1".into(), "2".into()];
        let axis = AxisSpec::bottom(0, AxisScale::Band { band, labels });
        let plot = Rect::new(0.0, 0.0, 90.0, 50.0);
        let marks = axis.marks(plot, Rect::new(0.0, 50.0, 90.0, 90.0));
        assert_eq!(texts(&marks), vec!["1", "1", "2"]);
    }

    #[test]
    fn ids_stay_unique_with_many_ticks() {
        let n = 2500;
        let band = ScaleBand::new((0.0, 1000.0), n);
        let labels = (0..n).map(|i| alloc::format!("{i}")).collect();
        let axis = AxisSpec::bottom(100, AxisScale::Band { band, labels }).with_title("Bins");
        let plot = Rect::new(0.0, 0.0, 1000.0, 50.0);
        let marks = axis.marks(plot, Rect::new(0.0, 50.0, 1000.0, 90.0));
        let mut ids: Vec<u64> = marks.iter().map(|m| m.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), marks.len());
        assert_eq!(axis.id_count(), 2 + 2 * n as u64);
        assert!(ids.iter().all(|&id| id >= 100 && id < 100 + axis.id_count()));
    }
}
