// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the filmviz crates.
//!
//! This crate is the bottom layer of the workspace:
//! - **Records** are the typed rows handed over by the data source ([`Record`], [`Field`],
//!   [`CategoryField`]).
//! - **Errors** are the typed failures every aggregation, scale and binning routine reports
//!   instead of producing `NaN` ([`DataError`]).
//! - **Marks** are the drawable scene primitives charts are lowered to ([`Mark`]).
//!
//! Everything here is plain data. Shaping, painting and event dispatch live downstream.

#![no_std]

extern crate alloc;

mod error;
mod mark;
mod record;

pub use error::DataError;
pub use mark::{
    Mark, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline,
    TextPayload, paint_order,
};
pub use record::{CategoryField, Field, Record};
