// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

use crate::record::Field;

/// Errors returned by aggregation, scale and binning routines.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// There is nothing to aggregate (no records, or no present values to divide by).
    #[error("no data to aggregate")]
    EmptyInput,
    /// Records are present but none of them carries a usable value for the field.
    #[error("no record has a value for `{0}`")]
    InsufficientData(Field),
    /// The caller named a field that is not part of the record schema.
    #[error("unknown record field `{0}`")]
    InvalidField(String),
}
