// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named partitions with per-bucket aggregates.

extern crate alloc;

use alloc::vec::Vec;

use core::hash::Hash;

use filmviz_core::{Field, Record};
use hashbrown::HashMap;

use crate::summary::average;

/// One bucket of a partition.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Records in the bucket, in list order.
    pub films: Vec<Record>,
    /// Number of records in the bucket.
    pub count: usize,
    /// Mean `classic_rating` of the bucket, `None` when no record has one.
    pub average_rating: Option<f64>,
    /// Mean `watch_count` of the bucket, `None` when no record has one.
    pub average_watch_count: Option<f64>,
}

impl Segment {
    /// Builds a segment and its aggregates from owned records.
    pub fn new(films: Vec<Record>) -> Self {
        let average_rating = average(&films, Field::ClassicRating).ok();
        let average_watch_count = average(&films, Field::WatchCount).ok();
        Self {
            count: films.len(),
            films,
            average_rating,
            average_watch_count,
        }
    }

    /// Returns whether the bucket holds no records.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Records split by whether they carry a member rating.
#[derive(Clone, Debug, PartialEq)]
pub struct RatedPartition {
    /// Records with a `rating`.
    pub rated: Segment,
    /// Records without a `rating`.
    pub unrated: Segment,
}

/// Splits records into rated and unrated buckets.
///
/// The buckets are disjoint and their counts sum to `records.len()`.
pub fn partition_by_rated_status(records: &[Record]) -> RatedPartition {
    let (rated, unrated): (Vec<Record>, Vec<Record>) = records
        .iter()
        .cloned()
        .partition(|r| r.value(Field::Rating).is_some());
    RatedPartition {
        rated: Segment::new(rated),
        unrated: Segment::new(unrated),
    }
}

/// Groups records by `key`, returning buckets in order of first appearance.
pub fn segment_by<K, F>(records: &[Record], mut key: F) -> Vec<(K, Segment)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&Record) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<(K, Vec<Record>)> = Vec::new();
    for r in records {
        let k = key(r);
        let slot = *slots.entry(k.clone()).or_insert_with(|| {
            buckets.push((k, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(r.clone());
    }
    buckets
        .into_iter()
        .map(|(k, films)| (k, Segment::new(films)))
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn film(id: &str, rating: Option<f64>, classic: Option<f64>, watches: Option<f64>) -> Record {
        let mut r = Record::new(id);
        r.rating = rating;
        r.classic_rating = classic;
        r.watch_count = watches;
        r
    }

    #[test]
    fn partitions_are_disjoint_and_complete() {
        let records = vec![
            film("a", Some(4.0), Some(3.0), Some(10.0)),
            film("b", None, Some(2.0), Some(4.0)),
            film("c", Some(3.0), Some(4.0), None),
            film("d", None, None, None),
        ];
        let p = partition_by_rated_status(&records);
        assert_eq!(p.rated.count + p.unrated.count, records.len());
        assert!(p.rated.films.iter().all(|r| r.rating.is_some()));
        assert!(p.unrated.films.iter().all(|r| r.rating.is_none()));

        assert_eq!(p.rated.average_rating, Some(3.5));
        assert_eq!(p.rated.average_watch_count, Some(10.0));
        assert_eq!(p.unrated.average_rating, Some(2.0));
        assert_eq!(p.unrated.average_watch_count, Some(4.0));
    }

    #[test]
    fn empty_group_reports_no_data() {
        let records = vec![film("a", Some(4.0), Some(3.0), Some(10.0))];
        let p = partition_by_rated_status(&records);
        assert!(p.unrated.is_empty());
        assert_eq!(p.unrated.count, 0);
        assert_eq!(p.unrated.average_rating, None);
        assert_eq!(p.unrated.average_watch_count, None);
    }

    #[test]
    fn segment_by_keeps_first_appearance_order() {
        let records = vec![
            film("a", Some(4.0), None, None),
            film("b", None, None, None),
            film("c", Some(2.0), None, None),
        ];
        let segments = segment_by(&records, |r| r.rating.map(|v| v >= 3.0));
        let keys: Vec<Option<bool>> = segments.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![Some(true), None, Some(false)]);
        assert_eq!(segments.iter().map(|(_, s)| s.count).sum::<usize>(), 3);
    }
}
