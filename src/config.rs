//! Session configuration

use crate::{dashboard::Controls, dataset::Sources, report::Format, top::CategoryFilter, Args};
use std::sync::Arc;

/// Final session configuration
///
/// This is the result of digesting [`Args`]. Please refer to [`Args`] to know
/// more about individual settings.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Where the datasets come from
    pub sources: Sources,

    /// Initial dashboard display settings
    pub controls: Controls,

    /// Output format
    pub format: Format,

    /// Truth that display settings should be prompted for after display
    pub interactive: bool,
}
//
impl Config {
    /// Determine session configuration from CLI arguments
    pub(crate) fn new(args: Args) -> Arc<Self> {
        let Args {
            data_dir,
            institutions,
            topics,
            types,
            top_institutions,
            top_topics,
            top_countries,
            country,
            format,
            interactive,
        } = args;

        // Data files default to their standard location in the data directory
        let defaults = Sources::in_dir(&data_dir);
        let sources = Sources {
            institutions: institutions.unwrap_or(defaults.institutions),
            topics: topics.unwrap_or(defaults.topics),
            types: types.unwrap_or(defaults.types),
        };

        Arc::new(Self {
            sources,
            controls: Controls {
                top_institutions,
                top_topics,
                top_countries,
                country: CategoryFilter::new(&country),
            },
            format,
            interactive,
        })
    }
}
