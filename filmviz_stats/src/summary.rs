// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Null-aware summary statistics.
//!
//! All functions skip records where the field is absent. The denominator of an average is the
//! number of present values, never the list length.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use filmviz_core::{DataError, Field, Record};

/// Which end of a sorted field to pick in [`extremum`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extremum {
    /// The smallest value (first after a stable ascending sort).
    Min,
    /// The largest value (last after a stable ascending sort).
    Max,
}

/// Aggregate view of one field over a record list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateResult<'a> {
    /// Number of records with the field present.
    pub count: usize,
    /// Mean of the present values, rounded to 2 decimals.
    pub average_value: f64,
    /// Record holding the minimum (see [`Extremum::Min`]).
    pub min_record: &'a Record,
    /// Record holding the maximum (see [`Extremum::Max`]).
    pub max_record: &'a Record,
}

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn present_values(records: &[Record], field: Field) -> Vec<f64> {
    records.iter().filter_map(|r| r.value(field)).collect()
}

/// Mean of the present values of `field`, rounded to 2 decimals.
///
/// Returns [`DataError::EmptyInput`] when no record has the field.
pub fn average(records: &[Record], field: Field) -> Result<f64, DataError> {
    let (sum, n) = records
        .iter()
        .filter_map(|r| r.value(field))
        .fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return Err(DataError::EmptyInput);
    }
    Ok(round2(sum / n as f64))
}

/// Average member rating of the list.
pub fn average_rating(records: &[Record]) -> Result<f64, DataError> {
    average(records, Field::Rating)
}

/// Average histogram-derived rating of the list.
pub fn average_classic_rating(records: &[Record]) -> Result<f64, DataError> {
    average(records, Field::ClassicRating)
}

/// Spread (`max - min`) of the present values of `field`, rounded to 2 decimals.
pub fn range(records: &[Record], field: Field) -> Result<f64, DataError> {
    let mut values = records.iter().filter_map(|r| r.value(field));
    let first = values.next().ok_or(DataError::EmptyInput)?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Ok(round2(max - min))
}

/// Median of the present values of `field`.
///
/// For an odd count this is the middle element of the sorted values; for an even count, the
/// mean of the two elements straddling the midpoint.
pub fn median(records: &[Record], field: Field) -> Result<f64, DataError> {
    let mut values = present_values(records, field);
    if values.is_empty() {
        return Err(DataError::EmptyInput);
    }
    values.sort_by(f64::total_cmp);
    let n = values.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Ok(values[mid])
    } else {
        Ok((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Record holding the smallest or largest value of `field`.
///
/// Records are stably sorted ascending by the field; ties keep list order, so `Min` returns the
/// earliest of tied minima and `Max` the latest of tied maxima. Records without the field are
/// not candidates.
pub fn extremum(
    records: &[Record],
    field: Field,
    which: Extremum,
) -> Result<&Record, DataError> {
    if records.is_empty() {
        return Err(DataError::EmptyInput);
    }
    let mut sorted: Vec<(f64, &Record)> = records
        .iter()
        .filter_map(|r| r.value(field).map(|v| (v, r)))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    let pick = match which {
        Extremum::Min => sorted.first(),
        Extremum::Max => sorted.last(),
    };
    pick.map(|(_, r)| *r).ok_or(DataError::InsufficientData(field))
}

/// Count, average and extreme records of `field`.
pub fn summarize(records: &[Record], field: Field) -> Result<AggregateResult<'_>, DataError> {
    let min_record = extremum(records, field, Extremum::Min)?;
    let max_record = extremum(records, field, Extremum::Max)?;
    let count = records.iter().filter(|r| r.value(field).is_some()).count();
    Ok(AggregateResult {
        count,
        average_value: average(records, field)?,
        min_record,
        max_record,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn rated(id: &str, rating: Option<f64>) -> Record {
        let mut r = Record::new(id);
        r.rating = rating;
        r
    }

    #[test]
    fn average_skips_absent_values() {
        let records = vec![
            rated("a", Some(4.0)),
            rated("b", None),
            rated("c", Some(2.0)),
        ];
        assert_eq!(average(&records, Field::Rating), Ok(3.0));
    }

    #[test]
    fn average_is_invariant_to_null_placement() {
        let base = vec![rated("a", Some(3.5)), rated("b", Some(4.25)), rated("c", Some(1.0))];
        let expected = average(&base, Field::Rating).unwrap();
        for at in 0..=base.len() {
            let mut with_null = base.clone();
            with_null.insert(at, rated("n", None));
            assert_eq!(average(&with_null, Field::Rating), Ok(expected));
        }
        assert_eq!(expected, 2.92);
    }

    #[test]
    fn average_without_values_is_an_error() {
        assert_eq!(average(&[], Field::Rating), Err(DataError::EmptyInput));
        assert_eq!(
            average(&[rated("a", None)], Field::Rating),
            Err(DataError::EmptyInput)
        );
    }

    #[test]
    fn range_rounds_and_rejects_empty_input() {
        let records = vec![rated("a", Some(4.333)), rated("b", None), rated("c", Some(1.0))];
        assert_eq!(range(&records, Field::Rating), Ok(3.33));
        assert_eq!(range(&[], Field::Rating), Err(DataError::EmptyInput));
    }

    #[test]
    fn median_uses_standard_definition() {
        let odd = vec![rated("a", Some(5.0)), rated("b", Some(1.0)), rated("c", Some(3.0))];
        assert_eq!(median(&odd, Field::Rating), Ok(3.0));

        let even = vec![
            rated("a", Some(4.0)),
            rated("b", Some(1.0)),
            rated("c", None),
            rated("d", Some(3.0)),
            rated("e", Some(2.0)),
        ];
        assert_eq!(median(&even, Field::Rating), Ok(2.5));

        assert_eq!(median(&[rated("a", Some(7.0))], Field::Rating), Ok(7.0));
        assert_eq!(median(&[], Field::Rating), Err(DataError::EmptyInput));
    }

    #[test]
    fn extremum_breaks_ties_by_list_order() {
        let records = vec![
            rated("first-low", Some(1.0)),
            rated("high-a", Some(5.0)),
            rated("none", None),
            rated("second-low", Some(1.0)),
            rated("high-b", Some(5.0)),
        ];
        let min = extremum(&records, Field::Rating, Extremum::Min).unwrap();
        let max = extremum(&records, Field::Rating, Extremum::Max).unwrap();
        assert_eq!(min.id, "first-low");
        assert_eq!(max.id, "high-b");
    }

    #[test]
    fn extremum_errors() {
        assert_eq!(
            extremum(&[], Field::Rating, Extremum::Min),
            Err(DataError::EmptyInput)
        );
        assert_eq!(
            extremum(&[rated("a", None)], Field::Rating, Extremum::Max),
            Err(DataError::InsufficientData(Field::Rating))
        );
    }

    #[test]
    fn summarize_collects_all_parts() {
        let records = vec![rated("a", Some(2.0)), rated("b", None), rated("c", Some(3.0))];
        let s = summarize(&records, Field::Rating).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.average_value, 2.5);
        assert_eq!(s.min_record.id, "a");
        assert_eq!(s.max_record.id, "c");
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let records = vec![rated("a", Some(0.1)), rated("b", Some(0.2)), rated("c", Some(0.7))];
        let a = average(&records, Field::Rating).unwrap();
        let b = average(&records, Field::Rating).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
        let a = median(&records, Field::Rating).unwrap();
        let b = median(&records, Field::Rating).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
