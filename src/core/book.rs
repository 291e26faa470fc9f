//! Layer 3: Book + overlay merge
//!
//! The baseline catalog is immutable; local edits live in a sparse overlay
//! of field-level patches keyed by book id. Merge is field-wise assignment:
//! last write wins per field, not per record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::identity::BookId;

/// A catalog entry.
///
/// Never deleted; the baseline is authoritative for every field the overlay
/// does not carry. Wire form keeps the console's camelCase keys so
/// persisted sessions stay readable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub olid: Option<String>,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Default for Book {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Book {
    /// The "not found" record views fall back to when the baseline cannot
    /// be loaded and no cached selection exists.
    pub fn placeholder() -> Self {
        Self {
            id: BookId::from_trusted("unknown"),
            title: "Book not found".to_string(),
            author: String::new(),
            genre: None,
            isbn: None,
            olid: None,
            count: 0,
            shelf_location: None,
            summary: None,
        }
    }

    /// Apply an overlay patch: shallow, field-wise, absent fields untouched.
    pub fn apply_patch(&mut self, patch: &CatalogPatch) {
        if let Some(count) = patch.count {
            self.count = count;
        }
        if let Some(shelf) = &patch.shelf_location {
            self.shelf_location = Some(shelf.clone());
        }
    }
}

/// Sparse field-level override for one book.
///
/// `rev` is a monotonic per-record revision bumped on every persisted write;
/// it lets a session detect that another writer advanced a record it read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_location: Option<String>,
    pub rev: u64,
}

impl CatalogPatch {
    pub fn is_empty(&self) -> bool {
        self.count.is_none() && self.shelf_location.is_none()
    }
}

/// The persisted overlay: book id -> patch.
///
/// One id's patch never clobbers another's; writes merge into the existing
/// patch for that id rather than replacing it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogOverlay {
    by_id: BTreeMap<BookId, CatalogPatch>,
}

impl CatalogOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patch(&self, id: &BookId) -> Option<&CatalogPatch> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Merge `{count}` into the id's patch, preserving any shelf override.
    pub fn set_count(&mut self, id: &BookId, count: u32) {
        let patch = self.by_id.entry(id.clone()).or_default();
        patch.count = Some(count);
        patch.rev += 1;
    }

    /// Merge `{shelfLocation}` into the id's patch, preserving any count.
    pub fn set_shelf_location(&mut self, id: &BookId, location: String) {
        let patch = self.by_id.entry(id.clone()).or_default();
        patch.shelf_location = Some(location);
        patch.rev += 1;
    }

    /// Stored revision for a record, 0 when no patch exists.
    pub fn rev(&self, id: &BookId) -> u64 {
        self.by_id.get(id).map(|p| p.rev).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BookId, &CatalogPatch)> {
        self.by_id.iter()
    }
}
