// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales that map record values into scene coordinates.
//!
//! [`ScaleLinear`] and [`ScaleBand`] are the plain coordinate mappings. [`band_scale`] and
//! [`linear_scale`] derive them from a record list: the former orders categories by a numeric
//! field, the latter spans `[floor, max]` of a field.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use filmviz_core::{CategoryField, DataError, Field, Record};
use hashbrown::{HashMap, HashSet};

/// Padding between and around bands, in band-width units.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;

/// Lower domain edge used by value axes.
pub const DEFAULT_DOMAIN_FLOOR: f64 = 0.0;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    ///
    /// Pass an inverted range (`(bottom, top)`) for vertical axes so larger values map up.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice” tick values that fall inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let eps = 1.0e-9 * (hi - lo).abs().max(1.0);
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale: `count` equal-width bands over a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: DEFAULT_BAND_PADDING,
            padding_outer: DEFAULT_BAND_PADDING,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }
}

/// A band scale keyed by category text.
#[derive(Clone, Debug)]
pub struct CategoryScale {
    band: ScaleBand,
    domain: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryScale {
    /// Creates a scale placing `domain` categories, in order, over `range`.
    ///
    /// Repeated categories keep their first position.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let mut index = HashMap::with_capacity(domain.len());
        let mut unique = Vec::with_capacity(domain.len());
        for c in domain {
            if !index.contains_key(&c) {
                index.insert(c.clone(), unique.len());
                unique.push(c);
            }
        }
        Self {
            band: ScaleBand::new(range, unique.len()).with_padding(padding, padding),
            domain: unique,
            index,
        }
    }

    /// Ordered categories.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// The underlying positional band scale.
    pub fn band(&self) -> ScaleBand {
        self.band
    }

    /// Width of every band.
    pub fn band_width(&self) -> f64 {
        self.band.band_width()
    }

    /// Position of `category` in the domain.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Start of the band for `category`, or `None` when it is not in the domain.
    pub fn x_of(&self, category: &str) -> Option<f64> {
        self.index_of(category).map(|i| self.band.x(i))
    }
}

/// Builds a band scale over the distinct `category` values of `records`.
///
/// Categories are ordered by descending `sort_field`, where a category's sort value is the one
/// of its first record. Ties are ordered by category text; categories whose first record has
/// no sort value come last. Records without the category are ignored.
///
/// Returns [`DataError::InsufficientData`] when `records` is empty or no record carries
/// `sort_field`.
pub fn band_scale(
    records: &[Record],
    category: CategoryField,
    sort_field: Field,
    range: (f64, f64),
    padding: f64,
) -> Result<CategoryScale, DataError> {
    if !records.iter().any(|r| r.value(sort_field).is_some()) {
        return Err(DataError::InsufficientData(sort_field));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut groups: Vec<(String, Option<f64>)> = Vec::new();
    for r in records {
        let Some(c) = r.category(category) else {
            continue;
        };
        if seen.insert(c.clone()) {
            groups.push((c, r.value(sort_field)));
        }
    }
    if groups.is_empty() {
        return Err(DataError::InsufficientData(sort_field));
    }

    groups.sort_by(|(ca, va), (cb, vb)| match (va, vb) {
        (Some(a), Some(b)) => b.total_cmp(a).then_with(|| ca.cmp(cb)),
        (Some(_), None) => core::cmp::Ordering::Less,
        (None, Some(_)) => core::cmp::Ordering::Greater,
        (None, None) => ca.cmp(cb),
    });
    tracing::trace!(%sort_field, categories = groups.len(), "band scale domain ordered");

    let domain = groups.into_iter().map(|(c, _)| c).collect();
    Ok(CategoryScale::new(domain, range, padding))
}

/// Builds a linear scale over `[domain_floor, max(field)]`.
///
/// Returns [`DataError::InsufficientData`] when `records` is empty or no record carries `field`.
pub fn linear_scale(
    records: &[Record],
    field: Field,
    range: (f64, f64),
    domain_floor: f64,
) -> Result<ScaleLinear, DataError> {
    let max = records
        .iter()
        .filter_map(|r| r.value(field))
        .max_by(f64::total_cmp)
        .ok_or(DataError::InsufficientData(field))?;
    if max == domain_floor {
        tracing::debug!(%field, max, "linear scale domain has zero width");
    }
    Ok(ScaleLinear::new((domain_floor, max), range))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn film(title: &str, watches: Option<f64>) -> Record {
        let mut r = Record::new(title).with_title(title);
        r.watch_count = watches;
        r
    }

    #[test]
    fn linear_maps_endpoints_and_inverts() {
        let s = ScaleLinear::new((0.0, 100.0), (420.0, 30.0));
        assert_eq!(s.map(0.0), 420.0);
        assert_eq!(s.map(100.0), 30.0);
        assert_eq!(s.map(50.0), 225.0);
    }

    #[test]
    fn zero_width_domain_maps_to_range_start() {
        let s = ScaleLinear::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(s.map(5.0), 10.0);
        assert_eq!(s.ticks(10), vec![5.0]);
    }

    #[test]
    fn ticks_stay_inside_the_domain() {
        let s = ScaleLinear::new((0.0, 87.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&80.0));
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 10.0).abs() < 1e-9));
    }

    #[test]
    fn band_geometry_matches_padding_formula() {
        let band = ScaleBand::new((40.0, 900.0), 4).with_padding(0.1, 0.1);
        // 860 / (4 + 0.3 + 0.2)
        let bw = 860.0 / 4.5;
        assert!((band.band_width() - bw).abs() < 1e-9);
        assert!((band.x(0) - (40.0 + 0.1 * bw)).abs() < 1e-9);
        assert!((band.x(1) - band.x(0) - 1.1 * bw).abs() < 1e-9);
        assert_eq!(ScaleBand::new((0.0, 1.0), 0).band_width(), 0.0);
    }

    #[test]
    fn band_scale_orders_by_descending_sort_value() {
        let records = vec![
            film("b", Some(10.0)),
            film("a", Some(30.0)),
            film("none", None),
            film("c", Some(20.0)),
            film("a", Some(1.0)),
        ];
        let s = band_scale(
            &records,
            CategoryField::Title,
            Field::WatchCount,
            (0.0, 100.0),
            DEFAULT_BAND_PADDING,
        )
        .unwrap();
        assert_eq!(s.domain(), ["a", "c", "b", "none"]);
        assert!(s.x_of("a").unwrap() < s.x_of("c").unwrap());
        assert_eq!(s.x_of("missing"), None);
    }

    #[test]
    fn band_scale_breaks_ties_by_category() {
        let records = vec![
            film("z", Some(5.0)),
            film("m", Some(5.0)),
            film("q", None),
            film("d", None),
        ];
        let s = band_scale(&records, CategoryField::Title, Field::WatchCount, (0.0, 1.0), 0.0)
            .unwrap();
        assert_eq!(s.domain(), ["m", "z", "d", "q"]);
    }

    #[test]
    fn scales_reject_missing_data() {
        assert_eq!(
            linear_scale(&[], Field::Rating, (0.0, 1.0), 0.0),
            Err(DataError::InsufficientData(Field::Rating))
        );
        let records = vec![film("a", None)];
        assert_eq!(
            linear_scale(&records, Field::WatchCount, (0.0, 1.0), 0.0),
            Err(DataError::InsufficientData(Field::WatchCount))
        );
        assert!(matches!(
            band_scale(&[], CategoryField::Title, Field::WatchCount, (0.0, 1.0), 0.1),
            Err(DataError::InsufficientData(Field::WatchCount))
        ));
    }

    #[test]
    fn linear_scale_spans_floor_to_max() {
        let records = vec![film("a", Some(12.0)), film("b", None), film("c", Some(40.0))];
        let s = linear_scale(&records, Field::WatchCount, (450.0, 30.0), 0.0).unwrap();
        assert_eq!(s.domain(), (0.0, 40.0));
        assert_eq!(s.map(40.0), 30.0);
    }
}
