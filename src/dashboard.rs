//! Everything the dashboard displays, prepared for a given set of controls
//!
//! This is the contract between data preparation and rendering: a renderer
//! only needs to draw the series below, it never has to aggregate anything.

use crate::{
    aggregate::{self, CumulativeShare, GroupSum},
    dataset::{cache::Datasets, CategorizedRecord, Record},
    stats::{self, Summary},
    top::{self, CategoryFilter},
    Count,
};
use serde::Serialize;
use std::num::NonZeroUsize;

/// Names longer than this are shortened in the header
const MAX_HEADLINE_LEN: usize = 20;

/// Settings from the dashboard's sidebar
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Controls {
    /// Number of institutions in the ranking and treemap
    pub top_institutions: NonZeroUsize,

    /// Number of topics in the distribution and ranking
    pub top_topics: NonZeroUsize,

    /// Number of countries in the per-country breakdown
    pub top_countries: NonZeroUsize,

    /// Country of the ranked institutions
    pub country: CategoryFilter,
}

/// Prepared dashboard
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard<'data> {
    /// Headline figures
    pub kpis: Kpis<'data>,

    /// Sidebar contents
    pub sidebar: Sidebar,

    /// Institutions tab
    pub institutions: InstitutionsTab<'data>,

    /// Topics tab
    pub topics: TopicsTab<'data>,

    /// Publication types tab
    pub types: TypesTab<'data>,
}
//
impl<'data> Dashboard<'data> {
    /// Prepare the dashboard for some controls
    ///
    /// Headline figures are always computed over full datasets, only the
    /// institution rankings are affected by the country filter.
    pub fn compute(datasets: &'data Datasets, controls: &Controls) -> Self {
        let institutions = datasets.institutions.records();
        let topics = datasets.topics.records();
        let types = datasets.types.records();

        // Full dataset summaries
        let institution_summary = stats::summarize(institutions);
        let topic_summary = stats::summarize(topics);
        let type_summary = stats::summarize(types);

        // Filtered and truncated views
        let top_institutions = top::select(institutions, &controls.country, controls.top_institutions);
        let top_topics = top::select(topics, &CategoryFilter::All, controls.top_topics);
        log::debug!(
            "Selected {} institutions from {} and {} topics",
            top_institutions.len(),
            controls.country,
            top_topics.len()
        );

        Self {
            kpis: Kpis::new(&institution_summary, &topic_summary, &type_summary),
            sidebar: Sidebar {
                institutions: institution_summary.len,
                topics: topic_summary.len,
                types: type_summary.len,
                country_choices: top::category_choices(institutions),
                country: controls.country.clone(),
            },
            institutions: InstitutionsTab {
                top: top_institutions,
                by_country: aggregate::top_groups(institutions, controls.top_countries),
                table: top::sort_by_count(institutions, &controls.country),
            },
            topics: TopicsTab {
                top: top_topics,
                bubbles: topics
                    .iter()
                    .enumerate()
                    .map(|(x, record)| Bubble { x, record })
                    .collect(),
                table: top::sort_by_count(topics, &CategoryFilter::All),
            },
            types: TypesTab {
                breakdown: types,
                table: top::sort_by_count(types, &CategoryFilter::All),
                cumulative: aggregate::cumulative_share(types),
            },
        }
    }
}

/// Headline figures
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Kpis<'data> {
    /// Total citations across all institutions
    pub institution_citations: Count,

    /// Number of countries with institutions
    pub countries: Option<usize>,

    /// Short label of the most cited institution
    pub top_institution: Option<&'data str>,

    /// Most cited topic
    pub top_topic: Option<&'data str>,

    /// Total citations across all publication types
    pub type_citations: Count,
}
//
impl<'data> Kpis<'data> {
    /// Extract headline figures from dataset summaries
    fn new(
        institutions: &Summary<'data, CategorizedRecord>,
        topics: &Summary<'data, Record>,
        types: &Summary<'data, Record>,
    ) -> Self {
        Self {
            institution_citations: institutions.total_count,
            countries: institutions.distinct_categories,
            top_institution: institutions
                .top_record
                .map(|record| headline_label(&record.record.name)),
            top_topic: topics.top_record.map(|record| &*record.name),
            type_citations: types.total_count,
        }
    }
}

/// Shorten a long name to its last word for display in the header
fn headline_label(name: &str) -> &str {
    if name.chars().count() > MAX_HEADLINE_LEN {
        name.split_whitespace().last().unwrap_or(name)
    } else {
        name
    }
}

/// Sidebar contents
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Sidebar {
    /// Number of institutions
    pub institutions: usize,

    /// Number of topics
    pub topics: usize,

    /// Number of publication types
    pub types: usize,

    /// Choices of the country filter
    pub country_choices: Vec<CategoryFilter>,

    /// Active country filter
    pub country: CategoryFilter,
}

/// Institutions tab
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InstitutionsTab<'data> {
    /// Most cited institutions of the selected country, by decreasing count
    /// (ranking bar chart, country/name treemap)
    pub top: Vec<&'data CategorizedRecord>,

    /// Most cited countries over all institutions (pie chart)
    pub by_country: Vec<GroupSum>,

    /// Institutions of the selected country by decreasing count (raw data)
    pub table: Vec<&'data CategorizedRecord>,
}

/// Topics tab
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TopicsTab<'data> {
    /// Most cited topics, by decreasing count (pie and ranking bar charts)
    pub top: Vec<&'data Record>,

    /// Every topic in source order (bubble chart)
    pub bubbles: Vec<Bubble<'data>>,

    /// Every topic by decreasing count (raw data)
    pub table: Vec<&'data Record>,
}

/// Bubble chart point
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Bubble<'data> {
    /// Horizontal position
    pub x: usize,

    /// Topic, whose count sets the bubble size
    #[serde(flatten)]
    pub record: &'data Record,
}

/// Publication types tab
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypesTab<'data> {
    /// Every publication type in source order (donut chart, where the first
    /// slice is pulled out)
    pub breakdown: &'data [Record],

    /// Every publication type by decreasing count (bar chart, raw data)
    pub table: Vec<&'data Record>,

    /// Cumulative share of publication types
    pub cumulative: Vec<CumulativeShare>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use std::sync::Arc;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn datasets() -> Datasets {
        Datasets {
            institutions: Arc::new(Dataset::from_iter([
                CategorizedRecord::new("Massachusetts Institute of Technology", 40, "USA"),
                CategorizedRecord::new("CNRS", 25, "France"),
                CategorizedRecord::new("Stanford", 30, "USA"),
                CategorizedRecord::new("Sorbonne", 20, "France"),
                CategorizedRecord::new("ETH Zurich", 12, "Switzerland"),
            ])),
            topics: Arc::new(Dataset::from_iter([
                Record::new("Biology", 9),
                Record::new("Physics", 14),
                Record::new("Chemistry", 14),
            ])),
            types: Arc::new(Dataset::from_iter([
                Record::new("Book", 4),
                Record::new("Article", 50),
                Record::new("Review", 6),
            ])),
        }
    }

    fn controls() -> Controls {
        Controls {
            top_institutions: nz(2),
            top_topics: nz(2),
            top_countries: nz(2),
            country: CategoryFilter::All,
        }
    }

    #[test]
    fn headline_figures_use_full_datasets() {
        let datasets = datasets();
        let controls = Controls {
            country: CategoryFilter::new("France"),
            ..controls()
        };
        let dashboard = Dashboard::compute(&datasets, &controls);
        assert_eq!(
            dashboard.kpis,
            Kpis {
                institution_citations: 127,
                countries: Some(3),
                top_institution: Some("Technology"),
                top_topic: Some("Physics"),
                type_citations: 60,
            }
        );
        assert_eq!(dashboard.sidebar.institutions, 5);
        assert_eq!(dashboard.sidebar.country, CategoryFilter::new("France"));
        assert_eq!(
            dashboard.sidebar.country_choices,
            ["All", "France", "Switzerland", "USA"].map(CategoryFilter::new)
        );
    }

    #[test]
    fn institution_views_follow_the_filter() {
        let datasets = datasets();
        let controls = Controls {
            country: CategoryFilter::new("France"),
            ..controls()
        };
        let dashboard = Dashboard::compute(&datasets, &controls);
        fn names<'a>(records: &[&'a CategorizedRecord]) -> Vec<&'a str> {
            records.iter().map(|r| &*r.record.name).collect()
        }
        assert_eq!(names(&dashboard.institutions.top), ["CNRS", "Sorbonne"]);
        assert_eq!(names(&dashboard.institutions.table), ["CNRS", "Sorbonne"]);

        // The country breakdown ignores the filter
        assert_eq!(
            dashboard.institutions.by_country,
            [
                GroupSum { category: "USA".into(), count: 70 },
                GroupSum { category: "France".into(), count: 45 },
            ]
        );
    }

    #[test]
    fn unknown_country_yields_empty_views() {
        let datasets = datasets();
        let controls = Controls {
            country: CategoryFilter::new("Japan"),
            ..controls()
        };
        let dashboard = Dashboard::compute(&datasets, &controls);
        assert!(dashboard.institutions.top.is_empty());
        assert!(dashboard.institutions.table.is_empty());
        assert_eq!(dashboard.kpis.institution_citations, 127);
    }

    #[test]
    fn topic_and_type_views() {
        let datasets = datasets();
        let dashboard = Dashboard::compute(&datasets, &controls());
        let top_topics = dashboard
            .topics
            .top
            .iter()
            .map(|r| &*r.name)
            .collect::<Vec<_>>();
        assert_eq!(top_topics, ["Physics", "Chemistry"]);
        assert_eq!(dashboard.topics.bubbles[2].x, 2);
        assert_eq!(&*dashboard.topics.bubbles[2].record.name, "Chemistry");

        assert_eq!(&*dashboard.types.breakdown[0].name, "Book");
        assert_eq!(&*dashboard.types.table[0].name, "Article");
        let last = dashboard.types.cumulative.last().unwrap();
        assert_eq!(last.cumulative_count, 60);
        assert!((last.cumulative_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn long_names_are_shortened_to_their_last_word() {
        assert_eq!(headline_label("ETH Zurich"), "ETH Zurich");
        assert_eq!(
            headline_label("Massachusetts Institute of Technology"),
            "Technology"
        );
        assert_eq!(
            headline_label("Supercalifragilisticexpialidocious"),
            "Supercalifragilisticexpialidocious"
        );
    }
}
