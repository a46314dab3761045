//! Headline statistics about a whole dataset

use crate::{dataset::Counted, Count};
use std::collections::HashSet;

/// Summary of a full dataset, as displayed in the dashboard's header
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary<'dataset, R> {
    /// Record with the highest count (earliest one in case of ties), if the
    /// dataset isn't empty
    pub top_record: Option<&'dataset R>,

    /// Number of distinct non-empty categories, if records have categories
    pub distinct_categories: Option<usize>,

    /// Sum of all citation counts
    pub total_count: Count,

    /// Number of records
    pub len: usize,
}

/// Compute the summary of a dataset
///
/// This should be given the full dataset, not a filtered view of it.
pub fn summarize<R: Counted>(records: &[R]) -> Summary<'_, R> {
    let mut top_record: Option<&R> = None;
    let mut total_count: Count = 0;
    for record in records {
        total_count = total_count.saturating_add(record.count());
        if top_record.map_or(true, |top| record.count() > top.count()) {
            top_record = Some(record);
        }
    }
    let distinct_categories = R::HAS_CATEGORY.then(|| {
        records
            .iter()
            .filter_map(Counted::category)
            .filter(|category| !category.is_empty())
            .collect::<HashSet<_>>()
            .len()
    });
    Summary {
        top_record,
        distinct_categories,
        total_count,
        len: records.len(),
    }
}
