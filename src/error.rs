//! Failures to load a data source

use std::path::PathBuf;
use thiserror::Error;

/// A data source could not be turned into a dataset
///
/// This is fatal to the session: the dashboard is never displayed from
/// partially loaded data. Row-level problems like unparseable citation counts
/// are not errors, see [`tsv::count`](crate::tsv::count).
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The data file is missing or could not be opened
    #[error("failed to open data source {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header line could not be read
    #[error("failed to read the header line of {}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv_async::Error,
    },

    /// A column needed to build records is absent from the header line
    ///
    /// An empty file ends up here, since it has no columns at all.
    #[error("data source {} has no {column:?} column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A row could not be decoded, e.g. because it is not valid UTF-8
    #[error("failed to decode a row of {}", .path.display())]
    Row {
        path: PathBuf,
        #[source]
        source: csv_async::Error,
    },
}
