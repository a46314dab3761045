//! Aggregated views of the datasets: per-category sums and cumulative shares

use crate::{
    dataset::{CategorizedRecord, Counted},
    top::{self, CategoryFilter},
    Count,
};
use serde::Serialize;
use std::{
    cmp::Reverse,
    collections::{hash_map, HashMap},
    num::NonZeroUsize,
};

/// Total citation count of a category
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct GroupSum {
    /// Category
    pub category: Box<str>,

    /// Sum of the citation counts of the category's records
    pub count: Count,
}
//
impl Counted for GroupSum {
    fn name(&self) -> &str {
        &self.category
    }

    fn count(&self) -> Count {
        self.count
    }
}

/// Sum citation counts by category
///
/// Categories are listed in order of first appearance. The sum of all group
/// counts is the sum of all record counts (up to `Count` saturation).
pub fn group_sum(records: &[CategorizedRecord]) -> Vec<GroupSum> {
    let mut groups = Vec::<GroupSum>::new();
    let mut group_indices = HashMap::<&str, usize>::new();
    for record in records {
        match group_indices.entry(&record.category) {
            hash_map::Entry::Occupied(o) => {
                let group = &mut groups[*o.get()];
                group.count = group.count.saturating_add(record.count());
            }
            hash_map::Entry::Vacant(v) => {
                v.insert(groups.len());
                groups.push(GroupSum {
                    category: record.category.clone(),
                    count: record.count(),
                });
            }
        }
    }
    log::trace!("Grouped {} records into {} categories", records.len(), groups.len());
    groups
}

/// The `top_k` categories with the highest citation sums, by decreasing sum
pub fn top_groups(records: &[CategorizedRecord], top_k: NonZeroUsize) -> Vec<GroupSum> {
    let groups = group_sum(records);
    top::select(&groups, &CategoryFilter::All, top_k)
        .into_iter()
        .cloned()
        .collect()
}

/// Running totals over records sorted by decreasing count
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CumulativeShare {
    /// Record name
    pub name: Box<str>,

    /// Record citation count
    pub count: Count,

    /// Sum of the counts of this record and all the ones before it
    pub cumulative_count: Count,

    /// Share of the total count reached with this record, in percent
    pub cumulative_percent: f64,
}

/// Compute the cumulative share of records taken by decreasing count
///
/// Records with equal counts keep their input order. The last share is 100%,
/// unless all counts are zero, in which case every share is defined to be 0%.
pub fn cumulative_share<'records, R: Counted + 'records>(
    records: impl IntoIterator<Item = &'records R>,
) -> Vec<CumulativeShare> {
    let mut sorted = records.into_iter().collect::<Vec<_>>();
    sorted.sort_by_key(|record| Reverse(record.count()));
    let total = sorted
        .iter()
        .fold(0, |acc: Count, record| acc.saturating_add(record.count()));
    let mut cumulative_count: Count = 0;
    sorted
        .into_iter()
        .map(|record| {
            cumulative_count = cumulative_count.saturating_add(record.count());
            let cumulative_percent = if total == 0 {
                0.0
            } else {
                cumulative_count as f64 / total as f64 * 100.0
            };
            CumulativeShare {
                name: record.name().into(),
                count: record.count(),
                cumulative_count,
                cumulative_percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use proptest::prelude::*;

    fn share(name: &str, count: Count, cumulative_count: Count, cumulative_percent: f64) -> CumulativeShare {
        CumulativeShare {
            name: name.into(),
            count,
            cumulative_count,
            cumulative_percent,
        }
    }

    #[test]
    fn groups_sum_by_category() {
        let records = [
            CategorizedRecord::new("x", 10, "US"),
            CategorizedRecord::new("y", 5, "US"),
            CategorizedRecord::new("z", 7, "FR"),
        ];
        assert_eq!(
            group_sum(&records),
            [
                GroupSum { category: "US".into(), count: 15 },
                GroupSum { category: "FR".into(), count: 7 },
            ]
        );
        assert!(group_sum(&[]).is_empty());
    }

    #[test]
    fn top_groups_rank_by_sum() {
        let records = [
            CategorizedRecord::new("a", 3, "DE"),
            CategorizedRecord::new("b", 10, "FR"),
            CategorizedRecord::new("c", 9, "DE"),
            CategorizedRecord::new("d", 1, "IT"),
        ];
        let top = top_groups(&records, NonZeroUsize::new(2).unwrap());
        assert_eq!(
            top,
            [
                GroupSum { category: "DE".into(), count: 12 },
                GroupSum { category: "FR".into(), count: 10 },
            ]
        );
    }

    #[test]
    fn cumulative_share_example() {
        let records = [Record::new("B", 30), Record::new("A", 50), Record::new("C", 20)];
        assert_eq!(
            cumulative_share(&records),
            [
                share("A", 50, 50, 50.0),
                share("B", 30, 80, 80.0),
                share("C", 20, 100, 100.0),
            ]
        );
    }

    #[test]
    fn zero_total_means_zero_percent() {
        let records = [Record::new("A", 0), Record::new("B", 0)];
        assert_eq!(
            cumulative_share(&records),
            [share("A", 0, 0, 0.0), share("B", 0, 0, 0.0)]
        );
        assert!(cumulative_share::<Record>([]).is_empty());
    }

    proptest! {
        #[test]
        fn grouping_conserves_counts(
            rows in prop::collection::vec((0u64..1000, 0usize..5), 0..50),
        ) {
            let records = rows
                .iter()
                .enumerate()
                .map(|(idx, &(count, country))| {
                    CategorizedRecord::new(format!("i{idx}"), count, format!("c{country}"))
                })
                .collect::<Vec<_>>();
            let grouped: Count = group_sum(&records).iter().map(|g| g.count).sum();
            let total: Count = records.iter().map(|r| r.count()).sum();
            prop_assert_eq!(grouped, total);
        }

        #[test]
        fn cumulative_percent_is_monotonic(
            counts in prop::collection::vec(0u64..1000, 1..50),
        ) {
            let records = counts
                .iter()
                .enumerate()
                .map(|(idx, &count)| Record::new(format!("r{idx}"), count))
                .collect::<Vec<_>>();
            let shares = cumulative_share(&records);
            prop_assert_eq!(shares.len(), records.len());
            prop_assert!(shares
                .windows(2)
                .all(|w| w[0].cumulative_percent <= w[1].cumulative_percent));

            let last = shares.last().unwrap().cumulative_percent;
            if counts.iter().sum::<u64>() > 0 {
                prop_assert!((last - 100.0).abs() < 1e-9);
            } else {
                prop_assert!(shares.iter().all(|s| s.cumulative_percent == 0.0));
            }
        }
    }
}
