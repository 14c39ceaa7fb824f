// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-width histogram binning with an open-ended top bin.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use filmviz_core::{DataError, Field, Record};

use crate::summary::round2;

/// Lower edge of the histogram domain used by [`histogram_bins`].
pub const DEFAULT_HISTOGRAM_FLOOR: f64 = 60.0;

/// One histogram interval.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge, or `None` for the unbounded top bin.
    pub upper: Option<f64>,
    /// Number of records whose value falls in `[lower, upper)`.
    pub count: usize,
    /// Index (into the binned slice) of the first record that fell in this bin.
    pub representative: Option<usize>,
    /// Display label: `"{lower}-{upper}"`, or `"{lower}+"` for the top bin.
    pub label: String,
}

impl Bin {
    /// Returns whether this is the unbounded top bin.
    pub fn is_overflow(&self) -> bool {
        self.upper.is_none()
    }

    /// Returns whether `v` falls in this bin.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && self.upper.is_none_or(|upper| v < upper)
    }
}

fn edge(v: f64) -> String {
    format!("{}", round2(v))
}

/// Bins `field` over `[DEFAULT_HISTOGRAM_FLOOR, max]`.
///
/// See [`histogram_bins_from`].
pub fn histogram_bins(records: &[Record], field: Field) -> Result<Vec<Bin>, DataError> {
    histogram_bins_from(records, field, DEFAULT_HISTOGRAM_FLOOR)
}

/// Bins `field` over `[floor, max]` into as many equal-width bins as there are records.
///
/// Bins are contiguous and ascending. Empty intervals are still emitted with a count of zero.
/// The last bin has no upper edge, so the maximum itself lands there. Values below `floor` are
/// not counted.
///
/// Returns [`DataError::EmptyInput`] for an empty slice, and
/// [`DataError::InsufficientData`] when no record has the field or no value reaches `floor`.
pub fn histogram_bins_from(
    records: &[Record],
    field: Field,
    floor: f64,
) -> Result<Vec<Bin>, DataError> {
    if records.is_empty() {
        return Err(DataError::EmptyInput);
    }
    let max = records
        .iter()
        .filter_map(|r| r.value(field))
        .max_by(f64::total_cmp)
        .ok_or(DataError::InsufficientData(field))?;
    if max < floor {
        tracing::warn!(%field, max, floor, "no value reaches the histogram floor");
        return Err(DataError::InsufficientData(field));
    }

    let n = records.len();
    let width = (max - floor) / n as f64;
    let lowers: Vec<f64> = if width > 0.0 {
        (0..n).map(|i| floor + width * i as f64).collect()
    } else {
        tracing::debug!(%field, floor, "degenerate histogram domain, emitting a single bin");
        Vec::from([floor])
    };

    let last = lowers.len() - 1;
    let mut bins: Vec<Bin> = lowers
        .iter()
        .enumerate()
        .map(|(i, &lower)| {
            let upper = (i < last).then(|| lowers[i + 1]);
            let label = match upper {
                Some(upper) => format!("{}-{}", edge(lower), edge(upper)),
                None => format!("{}+", edge(lower)),
            };
            Bin {
                lower,
                upper,
                count: 0,
                representative: None,
                label,
            }
        })
        .collect();

    for (index, v) in records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.value(field).map(|v| (i, v)))
    {
        if v < floor {
            continue;
        }
        let slot = lowers.partition_point(|&lo| lo <= v).saturating_sub(1);
        if let Some(bin) = bins.get_mut(slot) {
            bin.count += 1;
            bin.representative.get_or_insert(index);
        }
    }

    tracing::trace!(%field, bins = bins.len(), width, "histogram binned");
    Ok(bins)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn runtimes(values: &[Option<f64>]) -> Vec<Record> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut r = Record::new(format!("f{i}"));
                r.runtime = *v;
                r
            })
            .collect()
    }

    #[test]
    fn bins_are_contiguous_and_end_unbounded() {
        let records = runtimes(&[Some(90.0), Some(140.0), Some(100.0), Some(75.0)]);
        let bins = histogram_bins(&records, Field::Runtime).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lower, 60.0);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].upper, Some(pair[1].lower));
            assert!(pair[0].lower < pair[1].lower);
        }
        let top = bins.last().unwrap();
        assert!(top.is_overflow());
        assert_eq!(top.label, "120+");
        assert_eq!(bins[0].label, "60-80");
    }

    #[test]
    fn counts_sum_to_values_within_domain() {
        let records = runtimes(&[Some(90.0), Some(40.0), None, Some(140.0), Some(60.0)]);
        let bins = histogram_bins(&records, Field::Runtime).unwrap();
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3, "values below the floor and absent values are not counted");
        assert_eq!(bins.last().unwrap().count, 1, "the maximum lands in the top bin");
        for bin in &bins {
            if let Some(i) = bin.representative {
                let v = records[i].runtime.unwrap();
                assert!(bin.contains(v));
            }
        }
    }

    #[test]
    fn empty_intervals_are_still_emitted() {
        let records = runtimes(&[Some(60.0), Some(160.0), None, None]);
        let bins = histogram_bins(&records, Field::Runtime).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[1].count, 0);
        assert_eq!(bins[1].representative, None);
        assert_eq!(bins[1].label, "85-110");
        assert_eq!(bins[0].representative, Some(0));
        assert_eq!(bins[3].representative, Some(1));
    }

    #[test]
    fn fractional_edges_are_rounded_in_labels() {
        let records = runtimes(&[Some(61.0), Some(62.0), Some(70.0)]);
        let bins = histogram_bins(&records, Field::Runtime).unwrap();
        assert_eq!(bins[0].label, "60-63.33");
        assert_eq!(bins[2].label, "66.67+");
    }

    #[test]
    fn degenerate_domain_yields_single_bin() {
        let records = runtimes(&[Some(60.0), Some(10.0)]);
        let bins = histogram_bins(&records, Field::Runtime).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].label, "60+");
        assert_eq!(bins[0].count, 1);
    }

    #[test]
    fn custom_floor() {
        let records = runtimes(&[Some(1.0), Some(3.0)]);
        let bins = histogram_bins_from(&records, Field::Runtime, 0.0).unwrap();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].label, "0-1.5");
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);
    }

    #[test]
    fn errors() {
        assert_eq!(
            histogram_bins(&[], Field::Runtime),
            Err(DataError::EmptyInput)
        );
        assert_eq!(
            histogram_bins(&runtimes(&[None, None]), Field::Runtime),
            Err(DataError::InsufficientData(Field::Runtime))
        );
        assert_eq!(
            histogram_bins(&runtimes(&[Some(10.0)]), Field::Runtime),
            Err(DataError::InsufficientData(Field::Runtime))
        );
    }

    #[test]
    fn binning_is_deterministic() {
        let records = runtimes(&[Some(91.3), Some(133.7), Some(62.1), None, Some(104.9)]);
        let a = histogram_bins(&records, Field::Runtime).unwrap();
        let b = histogram_bins(&records, Field::Runtime).unwrap();
        assert_eq!(a, b);
        let bits = |bins: &[Bin]| bins.iter().map(|b| b.lower.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }
}
