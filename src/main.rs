//! This program prepares the data behind a citation source dashboard: which
//! institutions, topics and publication types academic citations come from.
//!
//! Each of the three datasets is a tab-separated text file with a `name` and a
//! `count` column (plus a `country` column for institutions). The program
//! loads them once, then derives the series that the dashboard charts consume
//! (top-N rankings, per-country sums, cumulative shares, headline figures) and
//! prints them either as a text report or as JSON for an external renderer.

mod aggregate;
mod config;
mod controls;
mod dashboard;
mod dataset;
mod error;
mod progress;
mod report;
mod stats;
mod top;
mod tsv;

use crate::{
    config::Config, controls::Action, dashboard::Dashboard, dataset::cache::DatasetCache,
    progress::ProgressReport, report::Format,
};
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::{num::NonZeroUsize, path::PathBuf};

/// Citation source analytics
///
/// Loads the institution, topic and publication type citation datasets and
/// prepares every series displayed by the citation dashboard.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Directory holding the "institution.txt", "topic.txt" and "type.txt"
    /// data files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Institutions data file, if not the one from the data directory
    #[arg(long)]
    institutions: Option<PathBuf>,

    /// Topics data file, if not the one from the data directory
    #[arg(long)]
    topics: Option<PathBuf>,

    /// Publication types data file, if not the one from the data directory
    #[arg(long)]
    types: Option<PathBuf>,

    /// Number of institutions in the ranking and treemap
    ///
    /// Requesting more institutions than the (filtered) dataset contains
    /// simply shows all of them.
    #[arg(short = 'i', long, default_value = "15")]
    top_institutions: NonZeroUsize,

    /// Number of topics in the topic distribution and ranking
    #[arg(short = 't', long, default_value = "12")]
    top_topics: NonZeroUsize,

    /// Number of countries in the per-country citation breakdown
    #[arg(long, default_value = "12")]
    top_countries: NonZeroUsize,

    /// Only rank institutions from this country
    ///
    /// The special value "All" disables country filtering. Country names are
    /// matched exactly, including case.
    #[arg(short, long, default_value = top::CategoryFilter::ALL)]
    country: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// After displaying the dashboard, interactively prompt for new display
    /// settings and display it again
    #[arg(long, default_value_t = false)]
    interactive: bool,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // The data directory only matters if a data file is left unspecified
        if args.institutions.is_none() || args.topics.is_none() || args.types.is_none() {
            anyhow::ensure!(
                args.data_dir.is_dir(),
                "data directory {} does not exist",
                args.data_dir.display()
            );
        }
        Ok(args)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Set up logging, but don't refuse to run on hosts without syslog
    if let Err(e) = setup_logging() {
        eprintln!("Logging is disabled because syslog is unavailable: {e}");
    }

    // Decode CLI arguments into the session configuration
    let config = Config::new(Args::parse_and_check()?);
    log::debug!("Running with {config:#?}");

    // Datasets are loaded once, then every display pass reuses them
    let report = ProgressReport::new();
    let mut cache = DatasetCache::new(config.sources.clone());
    let mut settings = config.controls.clone();
    loop {
        // Prepare and display the dashboard for the current settings
        let datasets = cache
            .load_all(&report)
            .await
            .context("loading the citation datasets")?;
        let dashboard = Dashboard::compute(&datasets, &settings);
        report::render(&dashboard, config.format)
            .await
            .context("displaying the dashboard")?;
        if !config.interactive {
            break;
        }

        // Let the user adjust the settings, then go for another pass
        match controls::prompt_action()? {
            Action::Country => {
                settings.country =
                    controls::prompt_country(&dashboard.sidebar.country_choices, &settings.country)?;
            }
            Action::TopInstitutions => {
                settings.top_institutions = controls::prompt_top_n(
                    "Top N institutions",
                    settings.top_institutions,
                    datasets.institutions.len(),
                )?;
            }
            Action::TopTopics => {
                settings.top_topics = controls::prompt_top_n(
                    "Top N topics",
                    settings.top_topics,
                    datasets.topics.len(),
                )?;
            }
            Action::TopCountries => {
                settings.top_countries = controls::prompt_top_n(
                    "Top N countries",
                    settings.top_countries,
                    dashboard.sidebar.country_choices.len().saturating_sub(1),
                )?;
            }
            Action::Quit => break,
        }
        log::debug!("Display settings changed to {settings:?}");
    }
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Citation count of a record, after coercion of the raw text
pub type Count = u64;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
