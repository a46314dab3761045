//! In-memory representation of the citation datasets
//!
//! - Every dataset row becomes a record with a name and a citation count
//! - Institutions additionally carry a category (their country), which is
//!   expressed in the record type so that per-category operations cannot be
//!   applied to datasets that have no categories
//! - Datasets are immutable once loaded, derived views borrow from them

pub mod cache;

use crate::Count;
use serde::Serialize;
use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

/// Something that has a name and a citation count
///
/// This is the common interface of all records, and of derived aggregates
/// that can go through the same ranking logic.
pub trait Counted {
    /// Truth that this kind of record carries a category
    const HAS_CATEGORY: bool = false;

    /// Display name
    fn name(&self) -> &str;

    /// Citation count
    fn count(&self) -> Count;

    /// Category, if this kind of record has one
    fn category(&self) -> Option<&str> {
        None
    }
}

/// Uncategorized dataset row (topics, publication types)
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Record {
    /// Display name, which is not guaranteed to be unique
    pub name: Box<str>,

    /// Citation count
    pub count: Count,
}
//
impl Record {
    /// Build a record
    pub fn new(name: impl Into<Box<str>>, count: Count) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}
//
impl Counted for Record {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> Count {
        self.count
    }
}

/// Dataset row with a category (institutions, categorized by country)
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct CategorizedRecord {
    /// Name and citation count
    #[serde(flatten)]
    pub record: Record,

    /// Category, empty if the source row had none
    pub category: Box<str>,
}
//
impl CategorizedRecord {
    /// Build a categorized record
    pub fn new(name: impl Into<Box<str>>, count: Count, category: impl Into<Box<str>>) -> Self {
        Self {
            record: Record::new(name, count),
            category: category.into(),
        }
    }
}
//
impl Counted for CategorizedRecord {
    const HAS_CATEGORY: bool = true;

    fn name(&self) -> &str {
        &self.record.name
    }

    fn count(&self) -> Count {
        self.record.count
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

/// Records from one data source, in source order
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset<R>(Box<[R]>);
//
impl<R> Dataset<R> {
    /// Access the records
    pub fn records(&self) -> &[R] {
        &self.0[..]
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
//
impl<R> FromIterator<R> for Dataset<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The three data sources of the dashboard
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SourceKind {
    /// Institutions, categorized by country
    Institutions,

    /// Research topics
    Topics,

    /// Publication types
    Types,
}
//
impl SourceKind {
    /// All data sources, in loading order
    pub const ALL: [SourceKind; 3] = [Self::Institutions, Self::Topics, Self::Types];

    /// Name of the data file within the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Institutions => "institution.txt",
            Self::Topics => "topic.txt",
            Self::Types => "type.txt",
        }
    }
}
//
impl Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Institutions => "institutions",
            Self::Topics => "topics",
            Self::Types => "publication types",
        })
    }
}

/// Location of each data source
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Sources {
    /// Institutions data file
    pub institutions: PathBuf,

    /// Topics data file
    pub topics: PathBuf,

    /// Publication types data file
    pub types: PathBuf,
}
//
impl Sources {
    /// Standard data file locations within a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            institutions: data_dir.join(SourceKind::Institutions.file_name()),
            topics: data_dir.join(SourceKind::Topics.file_name()),
            types: data_dir.join(SourceKind::Types.file_name()),
        }
    }

    /// Location of a given data source
    pub fn path(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Institutions => &self.institutions,
            SourceKind::Topics => &self.topics,
            SourceKind::Types => &self.types,
        }
    }
}
