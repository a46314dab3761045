//! Process-lifetime cache of the loaded datasets
//!
//! Each data source is read at most once per cache: the first request loads
//! it, later requests get the same shared dataset back without touching the
//! file system. Caches are independent from each other, there is no global
//! state behind them.

use super::{CategorizedRecord, Dataset, Record, SourceKind, Sources};
use crate::{
    error::DataSourceError,
    progress::ProgressReport,
    tsv::{self, FromRow},
};
use std::{path::Path, sync::Arc};

/// Shared handles to all three datasets
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Datasets {
    /// Institutions, categorized by country
    pub institutions: Arc<Dataset<CategorizedRecord>>,

    /// Research topics
    pub topics: Arc<Dataset<Record>>,

    /// Publication types
    pub types: Arc<Dataset<Record>>,
}

/// Load-once cache of the datasets, keyed by data source
#[derive(Debug)]
pub struct DatasetCache {
    /// Where the datasets come from
    sources: Sources,

    /// Institutions dataset, if loaded
    institutions: Option<Arc<Dataset<CategorizedRecord>>>,

    /// Topics dataset, if loaded
    topics: Option<Arc<Dataset<Record>>>,

    /// Publication types dataset, if loaded
    types: Option<Arc<Dataset<Record>>>,
}
//
impl DatasetCache {
    /// Set up an empty cache
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            institutions: None,
            topics: None,
            types: None,
        }
    }

    /// Truth that a data source has already been loaded
    pub fn is_loaded(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Institutions => self.institutions.is_some(),
            SourceKind::Topics => self.topics.is_some(),
            SourceKind::Types => self.types.is_some(),
        }
    }

    /// Institutions dataset
    pub async fn institutions(&mut self) -> Result<Arc<Dataset<CategorizedRecord>>, DataSourceError> {
        get_or_load(&mut self.institutions, &self.sources.institutions).await
    }

    /// Topics dataset
    pub async fn topics(&mut self) -> Result<Arc<Dataset<Record>>, DataSourceError> {
        get_or_load(&mut self.topics, &self.sources.topics).await
    }

    /// Publication types dataset
    pub async fn types(&mut self) -> Result<Arc<Dataset<Record>>, DataSourceError> {
        get_or_load(&mut self.types, &self.sources.types).await
    }

    /// All three datasets, loading those that are not cached yet
    pub async fn load_all(&mut self, report: &ProgressReport) -> Result<Datasets, DataSourceError> {
        // Load what's missing, tracking progress as we go
        let pending = SourceKind::ALL
            .into_iter()
            .filter(|&kind| !self.is_loaded(kind))
            .collect::<Vec<_>>();
        let progress = report.add("Loading citation datasets", pending.len());
        for kind in pending {
            log::debug!(
                "Loading {kind} from {}",
                self.sources.path(kind).display()
            );
            match kind {
                SourceKind::Institutions => {
                    self.institutions().await?;
                }
                SourceKind::Topics => {
                    self.topics().await?;
                }
                SourceKind::Types => {
                    self.types().await?;
                }
            }
            progress.make_progress(1);
        }

        // At this point, everything comes from the cache
        Ok(Datasets {
            institutions: self.institutions().await?,
            topics: self.topics().await?,
            types: self.types().await?,
        })
    }
}

/// Get a dataset from its cache slot, or load it into the slot
///
/// The slot is left empty if loading fails.
async fn get_or_load<R: FromRow>(
    slot: &mut Option<Arc<Dataset<R>>>,
    path: &Path,
) -> Result<Arc<Dataset<R>>, DataSourceError> {
    if let Some(dataset) = slot {
        log::trace!("Reusing cached dataset from {}", path.display());
        return Ok(dataset.clone());
    }
    let dataset = Arc::new(tsv::load::<R>(path).await?);
    *slot = Some(dataset.clone());
    Ok(dataset)
}
