// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Film charts over `filmviz_core` records.
//!
//! This crate turns record lists into drawable [`filmviz_core::Mark`]s:
//! - **Scales** map data values into screen coordinates ([`band_scale`], [`linear_scale`]).
//! - **Guides** (axes, titles) and data marks (bars, points) are generated with stable ids.
//! - **Charts** ([`BarChartSpec`], [`ScatterChartSpec`], [`HistogramChartSpec`]) build a
//!   [`ChartScene`], which [`ChartScene::bind`] turns into an [`InteractiveChart`] with its own
//!   hover tooltip and highlight.
//!
//! Text shaping and painting are out of scope; text marks store unshaped strings and hosts
//! render the marks however they like.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bar_mark;
mod chart;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod measure;
mod point_mark;
mod rule_mark;
mod scale;
mod title;
mod tooltip;
mod z_order;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle};
pub use bar_mark::BarMarkSpec;
pub use chart::{
    BarChartSpec, COUNT_LABEL, ChartId, ChartScene, HIGHLIGHT_WIDTH, HistogramChartSpec,
    InteractiveChart, MarkBinding, PointerEvent, ScatterChartSpec,
};
pub use error::ChartError;
pub use format::{NULL_TEXT, format_tick, format_value};
pub use layout::{ChartConfig, ChartLayout, DEFAULT_FILL, Margins};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use point_mark::{PointMarkSpec, Symbol};
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    CategoryScale, DEFAULT_BAND_PADDING, DEFAULT_DOMAIN_FLOOR, ScaleBand, ScaleLinear,
    band_scale, linear_scale,
};
pub use title::TitleSpec;
pub use tooltip::{TOOLTIP_ID_COUNT, TOOLTIP_OFFSET, Tooltip, TooltipContent, TooltipRow, TooltipStyle};
pub use z_order::*;
