//! Catalog browsing and inventory mutation.
//!
//! The working set is the baseline collections concatenated, with the
//! persisted overlay applied once at load. Mutations update the in-memory
//! records and merge field-level patches back into the overlay; the view
//! is never re-merged mid-session.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::baseline::{BaselineError, BaselineSource};
use crate::core::{Book, BookId, CatalogOverlay, CoreError};
use crate::store::{self, KvStore, keys};

pub struct CatalogEngine {
    books: Vec<Book>,
    overlay: CatalogOverlay,
}

impl CatalogEngine {
    /// Load the baseline catalog and apply the persisted overlay.
    ///
    /// Duplicate ids across collections are kept (each entry is independent)
    /// but reported, since a patch for such an id lands on every entry.
    pub fn load<S: KvStore + ?Sized>(
        source: &dyn BaselineSource,
        store: &S,
    ) -> Result<Self, BaselineError> {
        let doc = source.fetch_catalog()?;
        let mut books = doc.all_books();

        {
            let mut seen: BTreeSet<&BookId> = BTreeSet::new();
            for book in &books {
                if !seen.insert(&book.id) {
                    warn!(id = %book.id, "duplicate book id across baseline collections");
                }
            }
        }

        let overlay: CatalogOverlay = store::read_or_default(store, keys::CATALOG_UPDATES);
        for book in &mut books {
            if let Some(patch) = overlay.patch(&book.id) {
                book.apply_patch(patch);
            }
        }
        debug!(books = books.len(), patches = overlay.len(), "catalog loaded");

        Ok(Self { books, overlay })
    }

    /// Recovered state for a failed baseline load: the cached last-selected
    /// record if one exists, else the placeholder, with the persisted
    /// overlay applied on top. The view stays up.
    pub fn recover<S: KvStore + ?Sized>(store: &S) -> Self {
        let mut book: Book =
            store::read(store, keys::SELECTED_BOOK).unwrap_or_else(Book::placeholder);
        let overlay: CatalogOverlay = store::read_or_default(store, keys::CATALOG_UPDATES);
        if let Some(patch) = overlay.patch(&book.id) {
            book.apply_patch(patch);
        }
        warn!("catalog baseline unavailable, recovering from cached selection");
        Self {
            books: vec![book],
            overlay,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// First entry whose canonical id string matches.
    pub fn find_book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id.matches(id))
    }

    /// Case-insensitive substring filter over title, author, and genre.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let query = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&query)
                    || b.author.to_lowercase().contains(&query)
                    || b.genre
                        .as_deref()
                        .is_some_and(|g| g.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// `count = max(0, count + delta)`, merged into the id's overlay patch
    /// without touching its shelf override. Defined for arbitrary deltas.
    pub fn adjust_count<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: &str,
        delta: i64,
    ) -> Result<u32, CoreError> {
        let current = self
            .find_book(id)
            .map(|b| b.count)
            .ok_or_else(|| CoreError::BookNotFound { id: id.to_string() })?;

        let new_count = clamp_count(current, delta);
        let book_id = self.set_field(store, id, |b| b.count = new_count);
        self.overlay.set_count(&book_id, new_count);
        self.persist(store, &book_id);
        Ok(new_count)
    }

    /// Reassign the shelf location. Blank input is a tagged rejection with
    /// no state change.
    pub fn reassign_shelf<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: &str,
        location: &str,
    ) -> Result<(), CoreError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(CoreError::EmptyShelfText);
        }
        if self.find_book(id).is_none() {
            return Err(CoreError::BookNotFound { id: id.to_string() });
        }

        let book_id = self.set_field(store, id, |b| {
            b.shelf_location = Some(location.to_string());
        });
        self.overlay.set_shelf_location(&book_id, location.to_string());
        self.persist(store, &book_id);
        Ok(())
    }

    /// Cache the merged record as the last-selected snapshot and return it.
    /// A lookup miss falls back to the cached snapshot, then the
    /// placeholder - a valid state, not an error.
    pub fn select_book<S: KvStore + ?Sized>(&self, store: &mut S, id: &str) -> Book {
        match self.find_book(id) {
            Some(book) => {
                let book = book.clone();
                store::write(store, keys::SELECTED_BOOK, &book);
                book
            }
            None => store::read(store, keys::SELECTED_BOOK).unwrap_or_else(Book::placeholder),
        }
    }

    /// Detect a concurrent-tab write: true when another writer advanced the
    /// stored patch past the revision this session last saw.
    pub fn is_stale<S: KvStore + ?Sized>(&self, store: &S, id: &BookId) -> bool {
        let stored: CatalogOverlay = store::read_or_default(store, keys::CATALOG_UPDATES);
        stored.rev(id) > self.overlay.rev(id)
    }

    /// Mutate every in-memory entry carrying the id (duplicates get the
    /// same treatment the overlay gives them at load) and refresh the
    /// cached selection if it is the same record.
    fn set_field<S, F>(&mut self, store: &mut S, id: &str, mutate: F) -> BookId
    where
        S: KvStore + ?Sized,
        F: Fn(&mut Book),
    {
        let mut book_id = None;
        for book in self.books.iter_mut().filter(|b| b.id.matches(id)) {
            mutate(book);
            book_id.get_or_insert_with(|| book.id.clone());
        }
        // Caller has already resolved the id; first match always exists.
        let book_id = book_id.unwrap_or_else(|| BookId::from_trusted("unknown"));

        if let Some(mut selected) = store::read::<Book, _>(store, keys::SELECTED_BOOK)
            && selected.id == book_id
        {
            mutate(&mut selected);
            store::write(store, keys::SELECTED_BOOK, &selected);
        }
        book_id
    }

    fn persist<S: KvStore + ?Sized>(&self, store: &mut S, id: &BookId) {
        store::write(store, keys::CATALOG_UPDATES, &self.overlay);
        debug!(%id, rev = self.overlay.rev(id), "catalog overlay persisted");
    }
}

fn clamp_count(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}
