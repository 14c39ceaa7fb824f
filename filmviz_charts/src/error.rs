// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use filmviz_core::DataError;

/// Errors that abort a chart build.
///
/// A failed build never yields a partial scene.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// A scale or binning step could not be computed from the records.
    #[error(transparent)]
    Data(#[from] DataError),
    /// The configured margins leave no room for the plot.
    #[error("plot area has no width or height")]
    EmptyPlot,
}
