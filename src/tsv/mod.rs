//! Loading of the tab-separated citation data files

pub mod count;

use crate::{
    dataset::{CategorizedRecord, Dataset, Record},
    error::DataSourceError,
    Count,
};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::stream::StreamExt;
use std::path::Path;
use tokio::fs::File;

/// Column holding record names
pub const NAME_COLUMN: &str = "name";

/// Column holding citation counts
pub const COUNT_COLUMN: &str = "count";

/// Dataset record that can be built from a row of a data file
pub trait FromRow: Sized {
    /// Column that holds this record's category, if it has one
    const CATEGORY_COLUMN: Option<&'static str>;

    /// Build a record from the fields of a row
    ///
    /// `category` is only provided when `CATEGORY_COLUMN` is set, and is empty
    /// if the row is too short to have a category field.
    fn from_row(name: &str, count: Count, category: Option<&str>) -> Self;
}
//
impl FromRow for Record {
    const CATEGORY_COLUMN: Option<&'static str> = None;

    fn from_row(name: &str, count: Count, _category: Option<&str>) -> Self {
        Record::new(name, count)
    }
}
//
impl FromRow for CategorizedRecord {
    const CATEGORY_COLUMN: Option<&'static str> = Some("country");

    fn from_row(name: &str, count: Count, category: Option<&str>) -> Self {
        CategorizedRecord::new(name, count, category.unwrap_or_default())
    }
}

/// Load a data file into a dataset
///
/// The file must start with a header line naming its columns. Surrounding
/// whitespace is stripped from column names, extra columns are ignored, and
/// rows that are shorter than the header are accepted with their missing
/// fields treated as absent.
pub async fn load<R: FromRow>(path: &Path) -> Result<Dataset<R>, DataSourceError> {
    // Open the data file
    let file = File::open(path)
        .await
        .map_err(|source| DataSourceError::Open {
            path: path.into(),
            source,
        })?;

    // Set up a TSV decoder
    let mut reader = AsyncReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .create_reader(file);

    // Find out where the columns of interest are
    let headers = reader
        .headers()
        .await
        .map_err(|source| DataSourceError::Header {
            path: path.into(),
            source,
        })?;
    let columns = Columns::locate::<R>(path, headers)?;
    log::trace!("Located columns {columns:?} in {}", path.display());

    // Turn every row into a record, in source order
    let mut records = Vec::new();
    let mut rows = reader.records();
    while let Some(row) = rows.next().await {
        let row = row.map_err(|source| DataSourceError::Row {
            path: path.into(),
            source,
        })?;
        records.push(columns.parse::<R>(&row));
    }
    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records.into_iter().collect())
}

/// Position of the columns of interest within a data file's rows
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Columns {
    /// Record name column
    name: usize,

    /// Citation count column
    count: usize,

    /// Category column, if the record type has one
    category: Option<usize>,
}
//
impl Columns {
    /// Find the columns needed by some record type in a header line
    fn locate<R: FromRow>(path: &Path, headers: &StringRecord) -> Result<Self, DataSourceError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or_else(|| DataSourceError::MissingColumn {
                    path: path.into(),
                    column,
                })
        };
        Ok(Self {
            name: find(NAME_COLUMN)?,
            count: find(COUNT_COLUMN)?,
            category: R::CATEGORY_COLUMN.map(find).transpose()?,
        })
    }

    /// Build a record from a data row
    fn parse<R: FromRow>(&self, row: &StringRecord) -> R {
        let name = row.get(self.name).unwrap_or_default();
        let count = count::coerce(row.get(self.count));
        let category = self
            .category
            .map(|column| row.get(column).unwrap_or_default());
        R::from_row(name, count, category)
    }
}
