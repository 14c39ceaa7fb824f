// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart specs, built scenes and interactive charts.
//!
//! A chart moves through three states, each its own type:
//! - **Idle**: a spec ([`BarChartSpec`], [`ScatterChartSpec`], [`HistogramChartSpec`]).
//! - **Built**: [`ChartScene`], returned by `build`. Scales and bins are computed, marks laid out,
//!   axes and labels attached. Building is pure; a failed build returns no scene at all.
//! - **Interactive**: [`InteractiveChart`], returned by [`ChartScene::bind`]. It owns the chart's
//!   tooltip and reacts to [`PointerEvent`]s until [`InteractiveChart::dispose`] hands the
//!   plain scene back.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;
use core::sync::atomic::{AtomicU64, Ordering};

use filmviz_core::{CategoryField, Field, Mark, MarkId, Record, paint_order};
use filmviz_stats::{DEFAULT_HISTOGRAM_FLOOR, histogram_bins_from};
use hashbrown::HashMap;
use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::{AxisScale, AxisSpec};
use crate::bar_mark::BarMarkSpec;
use crate::layout::{ChartConfig, ChartLayout};
use crate::measure::TextMeasurer;
use crate::point_mark::PointMarkSpec;
use crate::scale::{
    DEFAULT_BAND_PADDING, DEFAULT_DOMAIN_FLOOR, ScaleBand, ScaleLinear, band_scale, linear_scale,
};
use crate::title::TitleSpec;
use crate::tooltip::{TOOLTIP_ID_COUNT, Tooltip, TooltipContent};
use crate::ChartError;

/// Stroke applied to the hovered mark.
pub const HIGHLIGHT_WIDTH: f64 = 1.75;

/// Row label used for histogram bin counts.
pub const COUNT_LABEL: &str = "Count";

static NEXT_CHART: AtomicU64 = AtomicU64::new(0);

/// Identity of a built chart.
///
/// Every successful `build` takes a fresh id. Pointer events carry the id of the chart they
/// were hit-tested against, so charts never act on each other's events even when their mark
/// ids overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartId(pub u64);

impl ChartId {
    fn next() -> Self {
        Self(NEXT_CHART.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a data mark stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkBinding {
    /// Index of the mark in [`ChartScene::marks`].
    pub mark_index: usize,
    /// Index of the backing record, if any.
    pub record: Option<usize>,
    /// The value the mark encodes.
    pub value: Option<f64>,
}

/// A data mark waiting for its paint-order index.
struct DataMark {
    mark: Mark,
    record: Option<usize>,
    value: Option<f64>,
}

/// A built chart: marks in paint order plus the mark → record lookup behind the tooltip.
#[derive(Clone, Debug)]
pub struct ChartScene {
    id: ChartId,
    id_base: u64,
    tooltip_base: u64,
    layout: ChartLayout,
    marks: Vec<Mark>,
    bindings: HashMap<MarkId, MarkBinding>,
    records: Vec<Record>,
    value_label: String,
}

impl ChartScene {
    fn assemble(
        config: &ChartConfig,
        layout: ChartLayout,
        records: &[Record],
        value_label: impl Into<String>,
        data: Vec<DataMark>,
        (guides, tooltip_base): (Vec<Mark>, u64),
    ) -> Self {
        let mut sources: HashMap<MarkId, (Option<usize>, Option<f64>)> =
            HashMap::with_capacity(data.len());
        let mut marks = Vec::with_capacity(data.len() + guides.len());
        for d in data {
            sources.insert(d.mark.id, (d.record, d.value));
            marks.push(d.mark);
        }
        marks.extend(guides);
        paint_order(&mut marks);

        let bindings = marks
            .iter()
            .enumerate()
            .filter_map(|(mark_index, m)| {
                let (record, value) = *sources.get(&m.id)?;
                Some((
                    m.id,
                    MarkBinding {
                        mark_index,
                        record,
                        value,
                    },
                ))
            })
            .collect();

        let id = ChartId::next();
        tracing::trace!(chart = id.0, marks = marks.len(), "chart assembled");
        Self {
            id,
            id_base: config.id_base,
            tooltip_base,
            layout,
            marks,
            bindings,
            records: records.to_vec(),
            value_label: value_label.into(),
        }
    }

    /// This chart's identity.
    pub fn id(&self) -> ChartId {
        self.id
    }

    /// Mark ids taken by this chart, the tooltip's included.
    ///
    /// The range starts at [`ChartConfig::id_base`]. Its end is a free base for the next chart
    /// when ids must be unique across charts.
    pub fn id_range(&self) -> Range<u64> {
        self.id_base..self.tooltip_base + TOOLTIP_ID_COUNT
    }

    /// Marks in paint order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// The arranged layout.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// The records the chart was built from.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Label of the value row in the tooltip.
    pub fn value_label(&self) -> &str {
        &self.value_label
    }

    /// Binding of a data mark; `None` for guides and for marks of other charts.
    pub fn binding(&self, id: MarkId) -> Option<&MarkBinding> {
        self.bindings.get(&id)
    }

    /// Number of data marks.
    pub fn data_mark_count(&self) -> usize {
        self.bindings.len()
    }

    /// The record behind a data mark.
    pub fn record_for(&self, id: MarkId) -> Option<&Record> {
        let index = self.bindings.get(&id)?.record?;
        self.records.get(index)
    }

    /// Tooltip rows for a data mark; `None` when `id` is not a data mark of this chart.
    ///
    /// A data mark without a backing record yields `null` rows.
    pub fn tooltip_content(&self, id: MarkId) -> Option<TooltipContent> {
        let binding = self.bindings.get(&id)?;
        Some(self.content_for(binding))
    }

    fn content_for(&self, binding: &MarkBinding) -> TooltipContent {
        let record = binding.record.and_then(|i| self.records.get(i));
        TooltipContent::for_record(record, &self.value_label, binding.value)
    }

    /// Topmost data mark under `pos`.
    pub fn hit_test(&self, pos: Point) -> Option<MarkId> {
        self.bindings
            .values()
            .filter_map(|b| self.marks.get(b.mark_index))
            .filter(|m| m.payload.contains(pos))
            .max_by_key(|m| (m.z_index, m.id))
            .map(|m| m.id)
    }

    /// Attaches pointer handling and a tooltip.
    pub fn bind(self) -> InteractiveChart {
        tracing::debug!(chart = self.id.0, id_base = self.id_base, "chart bound");
        let tooltip = Tooltip::new(self.tooltip_base);
        InteractiveChart {
            scene: self,
            tooltip,
            highlight: None,
        }
    }
}

/// Axis and title marks, with ids following the `data_count` data marks.
///
/// Returns the marks and the first id left free, which the tooltip takes.
fn guides(
    config: &ChartConfig,
    layout: &ChartLayout,
    data_count: usize,
    x: AxisScale,
    y: AxisScale,
    axis_title: Option<String>,
) -> (Vec<Mark>, u64) {
    let mut next = config.id_base + data_count as u64;
    let mut bottom = AxisSpec::bottom(next, x);
    if let Some(title) = axis_title {
        bottom = bottom.with_title(title);
    }
    next += bottom.id_count();
    let left = AxisSpec::left(next, y).with_domain(!config.remove_domain);
    next += left.id_count();

    let mut out = bottom.marks(layout.plot, layout.axis_bottom);
    out.extend(left.marks(layout.plot, layout.axis_left));
    if let Some(title) = &config.chart_title {
        out.push(TitleSpec::new(MarkId::from_raw(next), title.clone()).mark(layout.title));
    }
    (out, next + 1)
}

/// A bar per record: categories along x, ordered by descending value; values along y.
#[derive(Clone, Debug)]
pub struct BarChartSpec {
    /// Field naming each bar's band.
    pub category: CategoryField,
    /// Field giving bar heights and band order.
    pub value: Field,
    /// Band padding in band-width units.
    pub padding: f64,
    /// Presentation options.
    pub config: ChartConfig,
}

impl BarChartSpec {
    /// Creates a bar chart spec with default configuration.
    pub fn new(category: CategoryField, value: Field) -> Self {
        Self {
            category,
            value,
            padding: DEFAULT_BAND_PADDING,
            config: ChartConfig::default(),
        }
    }

    /// Sets the presentation options.
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the band padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Lays the chart out over `records`.
    ///
    /// Records without the category or the value get no bar.
    pub fn build(&self, records: &[Record]) -> Result<ChartScene, ChartError> {
        let config = &self.config;
        let layout = ChartLayout::arrange(config)?;
        let plot = layout.plot;
        let x = band_scale(
            records,
            self.category,
            self.value,
            (plot.x0, plot.x1),
            self.padding,
        )?;
        let y = linear_scale(
            records,
            self.value,
            (plot.y1, plot.y0),
            DEFAULT_DOMAIN_FLOOR,
        )?;

        let mut bars = Vec::new();
        let mut sources = Vec::new();
        for (i, r) in records.iter().enumerate() {
            let placed = r
                .category(self.category)
                .and_then(|c| x.x_of(&c))
                .zip(r.value(self.value));
            if let Some((x0, v)) = placed {
                bars.push((x0, v));
                sources.push((i, v));
            }
        }
        let skipped = records.len() - bars.len();
        if skipped > 0 {
            tracing::debug!(skipped, value = %self.value, "records without a bar");
        }

        let data = BarMarkSpec::new(config.id_base, x.band_width(), y)
            .with_fill(config.fill.clone())
            .marks(&bars)
            .into_iter()
            .zip(sources)
            .map(|(mark, (i, v))| DataMark {
                mark,
                record: Some(i),
                value: Some(v),
            })
            .collect::<Vec<_>>();
        tracing::debug!(bars = data.len(), "bar chart built");

        let guides = guides(
            config,
            &layout,
            data.len(),
            x.into(),
            y.into(),
            config.axis_title.clone(),
        );
        Ok(ChartScene::assemble(
            config,
            layout,
            records,
            self.value.label(),
            data,
            guides,
        ))
    }
}

/// A point per record over two numeric fields.
#[derive(Clone, Debug)]
pub struct ScatterChartSpec {
    /// Horizontal field.
    pub x: Field,
    /// Vertical field; also the tooltip value row.
    pub y: Field,
    /// Point diameter.
    pub point_size: f64,
    /// Presentation options.
    pub config: ChartConfig,
}

impl ScatterChartSpec {
    /// Creates a scatter spec with default configuration.
    pub fn new(x: Field, y: Field) -> Self {
        Self {
            x,
            y,
            point_size: 8.0,
            config: ChartConfig::default(),
        }
    }

    /// Sets the presentation options.
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the point diameter.
    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }

    /// Lays the chart out over `records`.
    ///
    /// Records missing either field get no point.
    pub fn build(&self, records: &[Record]) -> Result<ChartScene, ChartError> {
        let config = &self.config;
        let layout = ChartLayout::arrange(config)?;
        let plot = layout.plot;
        let x = linear_scale(records, self.x, (plot.x0, plot.x1), DEFAULT_DOMAIN_FLOOR)?;
        let y = linear_scale(records, self.y, (plot.y1, plot.y0), DEFAULT_DOMAIN_FLOOR)?;

        let placed: Vec<(usize, f64, f64)> = records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| Some((i, r.value(self.x)?, r.value(self.y)?)))
            .collect();
        let skipped = records.len() - placed.len();
        if skipped > 0 {
            tracing::debug!(skipped, x = %self.x, y = %self.y, "records without a point");
        }

        let points: Vec<(f64, f64)> = placed.iter().map(|&(_, px, py)| (px, py)).collect();
        let data = PointMarkSpec::new(config.id_base, x, y)
            .with_size(self.point_size)
            .with_fill(config.fill.clone())
            .marks(&points)
            .into_iter()
            .zip(&placed)
            .map(|(mark, &(i, _, py))| DataMark {
                mark,
                record: Some(i),
                value: Some(py),
            })
            .collect::<Vec<_>>();
        tracing::debug!(points = data.len(), "scatter chart built");

        let axis_title = config
            .axis_title
            .clone()
            .or_else(|| Some(self.x.label().into()));
        let guides = guides(config, &layout, data.len(), x.into(), y.into(), axis_title);
        Ok(ChartScene::assemble(
            config,
            layout,
            records,
            self.y.label(),
            data,
            guides,
        ))
    }
}

/// A bar per histogram bin of one field.
#[derive(Clone, Debug)]
pub struct HistogramChartSpec {
    /// Field to bin.
    pub field: Field,
    /// Lower edge of the binned domain.
    pub floor: f64,
    /// Band padding in band-width units.
    pub padding: f64,
    /// Presentation options.
    pub config: ChartConfig,
}

impl HistogramChartSpec {
    /// Creates a histogram spec over `[DEFAULT_HISTOGRAM_FLOOR, max]`.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            floor: DEFAULT_HISTOGRAM_FLOOR,
            padding: DEFAULT_BAND_PADDING,
            config: ChartConfig::default(),
        }
    }

    /// Sets the presentation options.
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the lower edge of the binned domain.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Lays the chart out over `records`.
    ///
    /// Every bin gets a bar, empty ones included. Hovering a bar shows its first record.
    pub fn build(&self, records: &[Record]) -> Result<ChartScene, ChartError> {
        let config = &self.config;
        let layout = ChartLayout::arrange(config)?;
        let plot = layout.plot;
        let bins = histogram_bins_from(records, self.field, self.floor)?;

        // One band per bin. Bin labels may repeat once bins get finer than the label precision.
        let band = ScaleBand::new((plot.x0, plot.x1), bins.len())
            .with_padding(self.padding, self.padding);
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        let y = ScaleLinear::new((0.0, max_count), (plot.y1, plot.y0));

        let bars: Vec<(f64, f64)> = bins
            .iter()
            .enumerate()
            .map(|(i, b)| (band.x(i), b.count as f64))
            .collect();
        let data = BarMarkSpec::new(config.id_base, band.band_width(), y)
            .with_fill(config.fill.clone())
            .marks(&bars)
            .into_iter()
            .zip(&bins)
            .map(|(mark, b)| DataMark {
                mark,
                record: b.representative,
                value: Some(b.count as f64),
            })
            .collect::<Vec<_>>();
        tracing::debug!(bins = data.len(), field = %self.field, "histogram built");

        let axis_title = config
            .axis_title
            .clone()
            .or_else(|| Some(self.field.label().into()));
        let x = AxisScale::Band {
            band,
            labels: bins.iter().map(|b| b.label.clone()).collect(),
        };
        let guides = guides(config, &layout, data.len(), x, y.into(), axis_title);
        Ok(ChartScene::assemble(
            config,
            layout,
            records,
            COUNT_LABEL,
            data,
            guides,
        ))
    }
}

/// Pointer input for an [`InteractiveChart`].
///
/// `chart` and `target` name the chart and mark under the pointer, as reported by the host's
/// hit testing or by [`ChartScene::hit_test`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer is over `target` at `pos`.
    Move {
        /// Chart the target belongs to.
        chart: ChartId,
        /// Hovered mark.
        target: MarkId,
        /// Pointer position in scene coordinates.
        pos: Point,
    },
    /// The pointer left `target`.
    Leave {
        /// Chart the target belongs to.
        chart: ChartId,
        /// Mark that was left.
        target: MarkId,
    },
}

impl PointerEvent {
    /// The chart the event is addressed to.
    pub fn chart(&self) -> ChartId {
        match *self {
            Self::Move { chart, .. } | Self::Leave { chart, .. } => chart,
        }
    }
}

#[derive(Clone, Debug)]
struct Highlight {
    id: MarkId,
    mark_index: usize,
    stroke: Brush,
    stroke_width: f64,
}

/// A built chart with live hover handling.
#[derive(Clone, Debug)]
pub struct InteractiveChart {
    scene: ChartScene,
    tooltip: Tooltip,
    highlight: Option<Highlight>,
}

impl InteractiveChart {
    /// Identity of the bound scene.
    pub fn id(&self) -> ChartId {
        self.scene.id
    }

    /// The underlying scene, including the current highlight.
    pub fn scene(&self) -> &ChartScene {
        &self.scene
    }

    /// This chart's tooltip.
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// The currently hovered data mark.
    pub fn hovered(&self) -> Option<MarkId> {
        self.highlight.as_ref().map(|h| h.id)
    }

    /// Applies a pointer event. Returns whether the event belonged to this chart.
    ///
    /// Events addressed to another chart, or naming marks this chart does not bind such as
    /// guides, are ignored and leave the tooltip and highlight untouched.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        if event.chart() != self.scene.id {
            tracing::trace!(
                chart = self.scene.id.0,
                from = event.chart().0,
                "ignoring event for another chart"
            );
            return false;
        }
        match event {
            PointerEvent::Move { target, pos, .. } => {
                let Some(binding) = self.scene.binding(target).copied() else {
                    tracing::trace!(mark = target.0, "ignoring move over an unbound mark");
                    return false;
                };
                if self.hovered() == Some(target) {
                    self.tooltip.move_to(pos);
                } else {
                    self.clear_highlight();
                    self.set_highlight(target, binding.mark_index);
                    let content = self.scene.content_for(&binding);
                    self.tooltip.show(content, pos);
                    tracing::trace!(mark = target.0, "hover");
                }
                true
            }
            PointerEvent::Leave { target, .. } => {
                if self.hovered() != Some(target) {
                    return false;
                }
                self.clear_highlight();
                self.tooltip.hide();
                tracing::trace!(mark = target.0, "leave");
                true
            }
        }
    }

    /// Hit-tests `pos` and dispatches the matching move or leave events.
    pub fn pointer_at(&mut self, pos: Point) -> bool {
        let chart = self.scene.id;
        let hit = self.scene.hit_test(pos);
        let mut handled = false;
        if let Some(prev) = self.hovered()
            && hit != Some(prev)
        {
            handled |= self.handle(PointerEvent::Leave {
                chart,
                target: prev,
            });
        }
        if let Some(target) = hit {
            handled |= self.handle(PointerEvent::Move { chart, target, pos });
        }
        handled
    }

    /// Scene marks plus the tooltip marks, in paint order.
    pub fn marks(&self, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = self.scene.marks.clone();
        out.extend(self.tooltip.marks(measurer));
        paint_order(&mut out);
        out
    }

    /// Releases the tooltip and clears any highlight, returning the plain scene.
    pub fn dispose(mut self) -> ChartScene {
        self.clear_highlight();
        tracing::debug!(chart = self.scene.id.0, "chart disposed");
        self.scene
    }

    fn set_highlight(&mut self, id: MarkId, mark_index: usize) {
        let Some(mark) = self.scene.marks.get_mut(mark_index) else {
            return;
        };
        let Some((stroke, stroke_width)) = mark.stroke() else {
            return;
        };
        self.highlight = Some(Highlight {
            id,
            mark_index,
            stroke: stroke.clone(),
            stroke_width,
        });
        mark.set_stroke(Brush::Solid(css::BLACK), HIGHLIGHT_WIDTH);
    }

    fn clear_highlight(&mut self) {
        if let Some(h) = self.highlight.take()
            && let Some(mark) = self.scene.marks.get_mut(h.mark_index)
        {
            mark.set_stroke(h.stroke, h.stroke_width);
        }
    }
}
