//! Baseline data resources.
//!
//! The immutable datasets the session starts from: the catalog document
//! (books plus incoming shipments) and the shelving queue document. Both
//! are consumed read-only; a failed load is an error the engines recover
//! from with cached or placeholder data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Book, BookId, BookLine, Shipment, ShipmentId, ShipmentStatus, ShelvingCopy};
use crate::error::{Effect, Transience};

/// Baseline load failure: the resource could not be fetched or parsed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BaselineError {
    #[error("failed to read baseline resource {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse baseline resource {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BaselineError {
    pub fn transience(&self) -> Transience {
        match self {
            // A missing or unreadable file may reappear; malformed data won't.
            Self::Io { .. } => Transience::Unknown,
            Self::Parse { .. } => Transience::Permanent,
        }
    }

    pub fn effect(&self) -> Effect {
        Effect::None
    }
}

/// The catalog document: four book collections plus incoming shipments.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaselineDoc {
    pub catalog: Vec<Book>,
    pub new_arrivals: Vec<Book>,
    pub liked: Vec<Book>,
    pub more_books: Vec<Book>,
    pub shipments: ShipmentsSection,
}

impl BaselineDoc {
    /// The working set: all four collections concatenated in document
    /// order. Duplicate ids are kept; each entry is independent.
    pub fn all_books(&self) -> Vec<Book> {
        let mut books = Vec::with_capacity(
            self.catalog.len() + self.new_arrivals.len() + self.liked.len() + self.more_books.len(),
        );
        books.extend(self.catalog.iter().cloned());
        books.extend(self.new_arrivals.iter().cloned());
        books.extend(self.liked.iter().cloned());
        books.extend(self.more_books.iter().cloned());
        books
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentsSection {
    pub incoming: Vec<Shipment>,
}

/// The shelving queue document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelvingDoc {
    pub copies: Vec<ShelvingCopy>,
}

/// Where baseline documents come from. The seam between the engines and
/// whatever transport actually serves the data.
pub trait BaselineSource {
    fn fetch_catalog(&self) -> Result<BaselineDoc, BaselineError>;
    fn fetch_shelving(&self) -> Result<ShelvingDoc, BaselineError>;
}

/// File-backed baseline source.
#[derive(Clone, Debug)]
pub struct FsSource {
    catalog_path: PathBuf,
    shelving_path: PathBuf,
}

impl FsSource {
    pub fn new(catalog_path: impl Into<PathBuf>, shelving_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            shelving_path: shelving_path.into(),
        }
    }

    fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BaselineError> {
        let raw = fs::read_to_string(path).map_err(|source| BaselineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| BaselineError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl BaselineSource for FsSource {
    fn fetch_catalog(&self) -> Result<BaselineDoc, BaselineError> {
        Self::load(&self.catalog_path)
    }

    fn fetch_shelving(&self) -> Result<ShelvingDoc, BaselineError> {
        Self::load(&self.shelving_path)
    }
}

/// In-memory baseline source for tests and embedded fixtures.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    pub catalog: BaselineDoc,
    pub shelving: ShelvingDoc,
}

impl BaselineSource for StaticSource {
    fn fetch_catalog(&self) -> Result<BaselineDoc, BaselineError> {
        Ok(self.catalog.clone())
    }

    fn fetch_shelving(&self) -> Result<ShelvingDoc, BaselineError> {
        Ok(self.shelving.clone())
    }
}

/// The embedded default transfer seed, used when the baseline document
/// carries no incoming shipments and no persisted list exists yet.
pub fn default_incoming_seed() -> Vec<Shipment> {
    vec![
        Shipment {
            shipment_id: ShipmentId::from_trusted("SH-101"),
            from_branch: "Central Branch".to_string(),
            arrival_date: "2025-10-22".to_string(),
            books: vec![
                BookLine {
                    id: BookId::from_trusted("the-hobbit"),
                    quantity: 3,
                },
                BookLine {
                    id: BookId::from_trusted("gatsby"),
                    quantity: 2,
                },
            ],
            status: ShipmentStatus::Pending,
        },
        Shipment {
            shipment_id: ShipmentId::from_trusted("SH-102"),
            from_branch: "East Calgary Branch".to_string(),
            arrival_date: "2025-10-25".to_string(),
            books: vec![
                BookLine {
                    id: BookId::from_trusted("mockingbird"),
                    quantity: 4,
                },
                BookLine {
                    id: BookId::from_trusted("1984"),
                    quantity: 3,
                },
            ],
            status: ShipmentStatus::Pending,
        },
    ]
}
