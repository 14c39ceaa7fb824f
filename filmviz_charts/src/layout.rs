// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration and the fixed-margin arrange pass.
//!
//! Charts are laid out from explicit sizes rather than measured guides: the element box, the
//! chart box inside it, and four margins that carve the plot rectangle out of the chart box.
//! Axes and the title occupy the margin strips.

extern crate alloc;

use alloc::string::String;

use kurbo::Rect;
use peniko::{Brush, Color};

use crate::ChartError;

/// Default bar/point fill (`#f1f5f9`).
pub const DEFAULT_FILL: Color = Color::from_rgb8(0xf1, 0xf5, 0xf9);

/// Space between the plot and the chart box on each side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 0.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Presentation options shared by every chart type.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Stable-id base; every mark of the chart uses a deterministic offset from it.
    ///
    /// A built chart reports the ids it took in [`ChartScene::id_range`]. Pointer events are
    /// routed by [`ChartId`], so charts sharing a base still ignore each other's events.
    ///
    /// [`ChartScene::id_range`]: crate::ChartScene::id_range
    /// [`ChartId`]: crate::ChartId
    pub id_base: u64,
    /// Width of the drawing element.
    pub element_width: f64,
    /// Height of the drawing element.
    pub element_height: f64,
    /// Width of the chart box the margins are taken from.
    pub chart_width: f64,
    /// Height of the chart box the margins are taken from.
    pub chart_height: f64,
    /// Plot margins.
    pub margins: Margins,
    /// Fill paint for bars and points.
    pub fill: Brush,
    /// Optional title under the horizontal axis.
    ///
    /// Scatter plots and histograms fall back to the label of their horizontal field.
    pub axis_title: Option<String>,
    /// Optional chart title drawn in the top margin.
    pub chart_title: Option<String>,
    /// Whether to drop the baseline line of the value axis.
    pub remove_domain: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            id_base: 0,
            element_width: 900.0,
            element_height: 500.0,
            chart_width: 900.0,
            chart_height: 450.0,
            margins: Margins::default(),
            fill: Brush::Solid(DEFAULT_FILL),
            axis_title: None,
            chart_title: None,
            remove_domain: true,
        }
    }
}

impl ChartConfig {
    /// Sets the stable-id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the element size.
    pub fn with_element_size(mut self, width: f64, height: f64) -> Self {
        self.element_width = width;
        self.element_height = height;
        self
    }

    /// Sets the chart box size.
    pub fn with_chart_size(mut self, width: f64, height: f64) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }

    /// Sets the plot margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the mark fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the horizontal axis title.
    pub fn with_axis_title(mut self, title: impl Into<String>) -> Self {
        self.axis_title = Some(title.into());
        self
    }

    /// Sets the chart title.
    pub fn with_chart_title(mut self, title: impl Into<String>) -> Self {
        self.chart_title = Some(title.into());
        self
    }

    /// Keeps or drops the value-axis baseline.
    pub fn with_remove_domain(mut self, remove_domain: bool) -> Self {
        self.remove_domain = remove_domain;
        self
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer element bounds.
    pub view: Rect,
    /// The plot rectangle marks are drawn in.
    pub plot: Rect,
    /// Strip left of the plot holding the value axis.
    pub axis_left: Rect,
    /// Strip below the plot holding the horizontal axis, spanning the chart width.
    pub axis_bottom: Rect,
    /// Top margin strip above the plot, holding the chart title.
    pub title: Rect,
}

impl ChartLayout {
    /// Computes the layout for `config`.
    ///
    /// Returns [`ChartError::EmptyPlot`] when the margins leave no positive plot area.
    pub fn arrange(config: &ChartConfig) -> Result<Self, ChartError> {
        let m = config.margins;
        let plot = Rect::new(
            m.left,
            m.top,
            config.chart_width - m.right,
            config.chart_height - m.bottom,
        );
        if !(plot.width() > 0.0 && plot.height() > 0.0) {
            return Err(ChartError::EmptyPlot);
        }
        let view = Rect::new(0.0, 0.0, config.element_width, config.element_height);
        Ok(Self {
            view,
            plot,
            axis_left: Rect::new(0.0, plot.y0, plot.x0, plot.y1),
            axis_bottom: Rect::new(0.0, plot.y1, config.chart_width, view.y1.max(plot.y1)),
            title: Rect::new(plot.x0, 0.0, plot.x1, plot.y0),
        })
    }
}
