// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Marks carry an explicit `z_index` for render ordering. The chart layer sets z-indexes
//! consistently so hosts don't have to hand-tune paint order.
//!
//! These values are coarse. Renderers should sort by `(z_index, MarkId)` for a deterministic
//! tie-break (see [`filmviz_core::paint_order`]).

/// Filled series marks (bars).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (rules).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks drawn above bars and rules.
pub const SERIES_POINTS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Chart-level titles.
pub const TITLES: i32 = 80;

/// Tooltip background box.
pub const TOOLTIP: i32 = 90;
/// Tooltip text rows.
pub const TOOLTIP_TEXT: i32 = 100;
