// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregations over film record lists.
//!
//! This crate provides the routines that turn a resolved `&[Record]` into the derived numbers and
//! sublists charts are built from:
//! - [`average`], [`range`], [`median`], [`extremum`]: null-aware summary statistics,
//! - [`top_n`]: ranking with a stable tie-break,
//! - [`partition_by_rated_status`] / [`segment_by`]: named partitions with per-bucket aggregates,
//! - [`histogram_bins`]: fixed-width binning with an open-ended top bin.
//!
//! Every routine is a pure function of its inputs. Absent values never count as zero; when
//! nothing is left to aggregate the routines return a [`DataError`] instead of `NaN`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bin;
#[cfg(not(feature = "std"))]
mod float;
mod rank;
mod segment;
mod summary;

pub use bin::{Bin, DEFAULT_HISTOGRAM_FLOOR, histogram_bins, histogram_bins_from};
pub use filmviz_core::DataError;
pub use rank::{DEFAULT_TOP_N, index_by_id, most_reviewed, most_viewed, top_n};
pub use segment::{RatedPartition, Segment, partition_by_rated_status, segment_by};
pub use summary::{
    AggregateResult, Extremum, average, average_classic_rating, average_rating, extremum, median,
    range, round2, summarize,
};
