// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-N ranking.

extern crate alloc;

use alloc::vec::Vec;

use filmviz_core::{Field, Record};
use hashbrown::HashMap;

/// Number of records the list views rank by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Returns at most `n` records with the highest `field`, in descending order.
///
/// Records where the field is absent or zero are not ranked. Ties keep list order. When no
/// record qualifies the result is empty.
pub fn top_n(records: &[Record], field: Field, n: usize) -> Vec<Record> {
    let mut ranked: Vec<(f64, &Record)> = records
        .iter()
        .filter_map(|r| r.value(field).filter(|v| *v != 0.0).map(|v| (v, r)))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    tracing::trace!(%field, candidates = ranked.len(), n, "ranking records");
    ranked.into_iter().take(n).map(|(_, r)| r.clone()).collect()
}

/// The [`DEFAULT_TOP_N`] most reviewed films.
pub fn most_reviewed(records: &[Record]) -> Vec<Record> {
    top_n(records, Field::ReviewCount, DEFAULT_TOP_N)
}

/// The [`DEFAULT_TOP_N`] most watched films.
pub fn most_viewed(records: &[Record]) -> Vec<Record> {
    top_n(records, Field::WatchCount, DEFAULT_TOP_N)
}

/// Indexes records by film id.
///
/// Lists may repeat a film; the last occurrence wins.
pub fn index_by_id(records: &[Record]) -> HashMap<&str, &Record> {
    records.iter().map(|r| (r.id.as_str(), r)).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn watched(id: &str, watch_count: Option<f64>) -> Record {
        let mut r = Record::new(id);
        r.watch_count = watch_count;
        r
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn top_two_by_watch_count() {
        let records = vec![
            watched("ten", Some(10.0)),
            watched("thirty", Some(30.0)),
            watched("twenty", Some(20.0)),
        ];
        let top = top_n(&records, Field::WatchCount, 2);
        assert_eq!(ids(&top), vec!["thirty", "twenty"]);
        let values: Vec<f64> = top.iter().filter_map(|r| r.watch_count).collect();
        assert_eq!(values, vec![30.0, 20.0]);
    }

    #[test]
    fn absent_and_zero_values_are_not_ranked() {
        let records = vec![
            watched("zero", Some(0.0)),
            watched("none", None),
            watched("one", Some(1.0)),
        ];
        assert_eq!(ids(&top_n(&records, Field::WatchCount, 5)), vec!["one"]);
        assert!(top_n(&records[..2], Field::WatchCount, 5).is_empty());
    }

    #[test]
    fn ties_keep_list_order() {
        let records = vec![
            watched("a", Some(5.0)),
            watched("b", Some(7.0)),
            watched("c", Some(5.0)),
            watched("d", Some(5.0)),
        ];
        assert_eq!(
            ids(&top_n(&records, Field::WatchCount, 3)),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn output_is_bounded_and_sorted() {
        let records: Vec<Record> = (0..12)
            .map(|i| watched("r", Some(f64::from((i * 7) % 5))))
            .collect();
        for n in 0..8 {
            let top = top_n(&records, Field::WatchCount, n);
            assert!(top.len() <= n);
            assert!(top.iter().all(|r| r.watch_count.is_some_and(|v| v != 0.0)));
            assert!(
                top.windows(2)
                    .all(|w| w[0].watch_count >= w[1].watch_count),
                "expected descending order"
            );
        }
    }

    #[test]
    fn conveniences_rank_five() {
        let records: Vec<Record> = (1..=8)
            .map(|i| {
                let mut r = watched("w", Some(f64::from(i)));
                r.review_count = Some(f64::from(10 - i));
                r
            })
            .collect();
        let viewed = most_viewed(&records);
        assert_eq!(viewed.len(), DEFAULT_TOP_N);
        assert_eq!(viewed[0].watch_count, Some(8.0));
        let reviewed = most_reviewed(&records);
        assert_eq!(reviewed[0].review_count, Some(9.0));
    }

    #[test]
    fn index_keeps_last_duplicate() {
        let records = vec![
            watched("a", Some(1.0)),
            watched("b", Some(2.0)),
            watched("a", Some(3.0)),
        ];
        let index = index_by_id(&records);
        assert_eq!(index.len(), 2);
        assert_eq!(index["a"].watch_count, Some(3.0));
    }
}
