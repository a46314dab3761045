//! Filtering and top-N selection of dataset records

use crate::dataset::{CategorizedRecord, Counted};
use serde::{Serialize, Serializer};
use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap},
    fmt::{self, Display},
    num::NonZeroUsize,
};

/// Category filter, as picked in the dashboard's sidebar
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum CategoryFilter {
    /// Keep all records
    #[default]
    All,

    /// Only keep records of this exact (case-sensitive) category
    Only(Box<str>),
}
//
impl CategoryFilter {
    /// User-facing name of the "no filter" choice
    pub const ALL: &'static str = "All";

    /// Interpret a user choice
    pub fn new(choice: &str) -> Self {
        if choice == Self::ALL {
            Self::All
        } else {
            Self::Only(choice.into())
        }
    }

    /// Truth that a record passes this filter
    ///
    /// Records that have no category at all are never filtered out.
    pub fn accepts(&self, record: &impl Counted) -> bool {
        match (self, record.category()) {
            (Self::Only(wanted), Some(category)) => **wanted == *category,
            _ => true,
        }
    }
}
//
impl Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(category) => f.write_str(category),
        }
    }
}
//
impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pick the `top_n` records with the highest count among those that pass a
/// category filter
///
/// Records are returned by decreasing count, and records with equal counts
/// keep their relative order from the input. If fewer records pass the
/// filter, all of them are returned.
pub fn select<'records, R: Counted>(
    records: &'records [R],
    filter: &CategoryFilter,
    top_n: NonZeroUsize,
) -> Vec<&'records R> {
    // Records are ranked by count, then by earliest position in the input.
    // Keep the best ones in a min-heap, so the worst candidate is evicted
    // whenever the heap grows too large.
    let max_len = top_n.get();
    let mut heap = BinaryHeap::with_capacity(max_len.min(records.len()) + 1);
    for (idx, record) in records.iter().enumerate() {
        if !filter.accepts(record) {
            log::trace!("Filtered out {:?} as it's not in {filter}", record.name());
            continue;
        }
        heap.push(Reverse((record.count(), Reverse(idx))));
        if heap.len() > max_len {
            heap.pop();
        }
    }

    // Sorting the min-heap's reversed keys in ascending order yields the
    // records from best to worst
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse((_count, Reverse(idx)))| &records[idx])
        .collect()
}

/// All records that pass a category filter, by decreasing count
///
/// Records with equal counts keep their relative order from the input.
pub fn sort_by_count<'records, R: Counted>(
    records: &'records [R],
    filter: &CategoryFilter,
) -> Vec<&'records R> {
    let mut sorted = records
        .iter()
        .filter(|record| filter.accepts(*record))
        .collect::<Vec<_>>();
    sorted.sort_by_key(|record| Reverse(record.count()));
    sorted
}

/// Choices offered by the category filter: no filtering, then every category
/// of the dataset in lexicographic order
///
/// Records with an empty category don't contribute a choice.
pub fn category_choices(records: &[CategorizedRecord]) -> Vec<CategoryFilter> {
    let categories = records
        .iter()
        .map(|record| &*record.category)
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>();
    std::iter::once(CategoryFilter::All)
        .chain(categories.into_iter().map(CategoryFilter::new))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use proptest::prelude::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn records(counts: &[u64]) -> Vec<Record> {
        counts
            .iter()
            .enumerate()
            .map(|(idx, &count)| Record::new(format!("r{idx}"), count))
            .collect()
    }

    fn names<R: Counted>(selected: &[&R]) -> Vec<String> {
        selected.iter().map(|r| r.name().to_owned()).collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let records = records(&[1, 5, 3, 5, 2]);
        let top = select(&records, &CategoryFilter::All, nz(2));
        assert_eq!(names(&top), ["r1", "r3"]);

        let top = select(&records, &CategoryFilter::All, nz(4));
        assert_eq!(names(&top), ["r1", "r3", "r2", "r4"]);
    }

    #[test]
    fn oversized_requests_return_everything() {
        let records = records(&[4, 9, 1]);
        let top = select(&records, &CategoryFilter::All, nz(10));
        assert_eq!(names(&top), ["r1", "r0", "r2"]);
        assert!(select::<Record>(&[], &CategoryFilter::All, nz(3)).is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let institutions = [
            CategorizedRecord::new("MIT", 40, "USA"),
            CategorizedRecord::new("CNRS", 25, "France"),
            CategorizedRecord::new("Stanford", 30, "USA"),
            CategorizedRecord::new("Lowercase", 99, "usa"),
        ];
        let top = select(&institutions, &CategoryFilter::new("USA"), nz(5));
        assert_eq!(names(&top), ["MIT", "Stanford"]);

        let none = select(&institutions, &CategoryFilter::new("Japan"), nz(5));
        assert!(none.is_empty());

        let all = select(&institutions, &CategoryFilter::new("All"), nz(5));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn filter_ignores_uncategorized_records() {
        let records = records(&[3, 1]);
        let top = select(&records, &CategoryFilter::new("USA"), nz(5));
        assert_eq!(names(&top), ["r0", "r1"]);
    }

    #[test]
    fn sorting_is_stable() {
        let records = records(&[2, 7, 2, 9]);
        let sorted = sort_by_count(&records, &CategoryFilter::All);
        assert_eq!(names(&sorted), ["r3", "r1", "r0", "r2"]);
    }

    #[test]
    fn choices_are_sorted_and_distinct() {
        let institutions = [
            CategorizedRecord::new("MIT", 40, "USA"),
            CategorizedRecord::new("CNRS", 25, "France"),
            CategorizedRecord::new("Unknown", 2, ""),
            CategorizedRecord::new("Stanford", 30, "USA"),
        ];
        let choices = category_choices(&institutions)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(choices, ["All", "France", "USA"]);
    }

    proptest! {
        #[test]
        fn no_filter_keeps_min_of_n_and_len(
            counts in prop::collection::vec(0u64..100, 0..40),
            n in 1usize..50,
        ) {
            let records = records(&counts);
            let top = select(&records, &CategoryFilter::All, nz(n));
            prop_assert_eq!(top.len(), n.min(records.len()));
        }

        #[test]
        fn selected_records_beat_excluded_ones(
            counts in prop::collection::vec(0u64..20, 1..40),
            n in 1usize..40,
        ) {
            let records = records(&counts);
            let n = n.min(records.len());
            let top = select(&records, &CategoryFilter::All, nz(n));
            prop_assert_eq!(top.len(), n);

            let lowest_selected = top.iter().map(|r| r.count).min().unwrap();
            let excluded = records
                .iter()
                .filter(|r| !top.iter().any(|t| std::ptr::eq(*t, *r)));
            for record in excluded {
                prop_assert!(record.count <= lowest_selected);
            }
            prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }
}
