//! Best-effort cover-art resolution.
//!
//! Candidates are tried in priority order isbn -> olid -> title/author
//! search -> fixed fallback, each existence-checked before acceptance.
//! Failures fall through silently; resolution never blocks a mutation.
//! Results are tagged with the record they were started for so a
//! since-changed view can drop them (fire-and-forget, cancellable on
//! stale).

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::CoversConfig;
use crate::core::{Book, BookId};

/// The fixed fallback reference when no candidate resolves.
pub const FALLBACK_COVER: &str = "assets/images/book_fb.png";

/// What resolution has to work with, snapshotted off a record.
#[derive(Clone, Debug, Default)]
pub struct CoverMeta {
    pub isbn: Option<String>,
    pub olid: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl From<&Book> for CoverMeta {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn.clone(),
            olid: book.olid.clone(),
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
        }
    }
}

/// A resolved cover image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoverRef {
    Url(Url),
    Fallback,
}

impl CoverRef {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(url) => url.as_str(),
            Self::Fallback => FALLBACK_COVER,
        }
    }
}

/// Resolution output, tagged with the record it was started for.
#[derive(Clone, Debug)]
pub struct ResolvedCover {
    pub book_id: BookId,
    pub cover: CoverRef,
}

/// Transport seam: HEAD existence checks and the title/author search.
pub trait CoverTransport {
    fn head_ok(&self, url: &Url) -> bool;
    fn get_json(&self, url: &Url) -> Option<Value>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverTransport for HttpTransport {
    fn head_ok(&self, url: &Url) -> bool {
        self.client
            .head(url.clone())
            .send()
            .map(|res| res.status().is_success())
            .unwrap_or(false)
    }

    fn get_json(&self, url: &Url) -> Option<Value> {
        self.client
            .get(url.clone())
            .send()
            .ok()?
            .error_for_status()
            .ok()?
            .json()
            .ok()
    }
}

pub struct CoverResolver<T: CoverTransport> {
    transport: T,
    config: CoversConfig,
}

impl<T: CoverTransport> CoverResolver<T> {
    pub fn new(transport: T, config: CoversConfig) -> Self {
        Self { transport, config }
    }

    /// Walk the candidate chain for a record and tag the result with its id.
    pub fn resolve_for(&self, book: &Book) -> ResolvedCover {
        ResolvedCover {
            book_id: book.id.clone(),
            cover: self.resolve(&CoverMeta::from(book)),
        }
    }

    pub fn resolve(&self, meta: &CoverMeta) -> CoverRef {
        if !self.config.enabled {
            return CoverRef::Fallback;
        }

        if let Some(isbn) = &meta.isbn
            && let Some(url) = self.checked_candidate("isbn", isbn)
        {
            return CoverRef::Url(url);
        }
        if let Some(olid) = &meta.olid
            && let Some(url) = self.checked_candidate("olid", olid)
        {
            return CoverRef::Url(url);
        }
        if let Some(title) = &meta.title
            && let Some(olid) = self.search_olid(title, meta.author.as_deref())
            && let Some(url) = self.checked_candidate("olid", &olid)
        {
            return CoverRef::Url(url);
        }
        CoverRef::Fallback
    }

    /// Build `{endpoint}/b/{kind}/{id}-L.jpg?default=false` and accept it
    /// only if the HEAD probe succeeds.
    fn checked_candidate(&self, kind: &str, id: &str) -> Option<Url> {
        let url = self.cover_url(kind, id)?;
        if self.transport.head_ok(&url) {
            Some(url)
        } else {
            None
        }
    }

    fn cover_url(&self, kind: &str, id: &str) -> Option<Url> {
        let mut url = Url::parse(&self.config.covers_endpoint).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("b")
            .push(kind)
            .push(&format!("{id}-L.jpg"));
        url.set_query(Some("default=false"));
        Some(url)
    }

    /// Title/author lookup yielding an edition olid, best-effort.
    fn search_olid(&self, title: &str, author: Option<&str>) -> Option<String> {
        let mut url = Url::parse(&self.config.search_endpoint).ok()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("title", title);
            if let Some(author) = author {
                query.append_pair("author", author);
            }
            query.append_pair("limit", "1");
        }

        let body = self.transport.get_json(&url)?;
        let doc = body.get("docs")?.get(0)?;
        let olid = doc
            .get("cover_edition_key")
            .and_then(Value::as_str)
            .or_else(|| {
                doc.get("edition_key")
                    .and_then(|keys| keys.get(0))
                    .and_then(Value::as_str)
            })?;
        Some(olid.to_string())
    }
}

/// The record currently on display, guarding against stale resolutions.
#[derive(Debug, Default)]
pub struct CoverSlot {
    displayed: Option<BookId>,
    cover: Option<CoverRef>,
}

impl CoverSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the slot to a new record; any in-flight resolution for the
    /// previous one becomes stale.
    pub fn display(&mut self, id: BookId) {
        if self.displayed.as_ref() != Some(&id) {
            self.displayed = Some(id);
            self.cover = None;
        }
    }

    /// Apply a finished resolution only if its record is still displayed.
    pub fn apply(&mut self, resolved: ResolvedCover) -> bool {
        if self.displayed.as_ref() == Some(&resolved.book_id) {
            self.cover = Some(resolved.cover);
            true
        } else {
            debug!(id = %resolved.book_id, "dropping stale cover resolution");
            false
        }
    }

    pub fn cover(&self) -> Option<&CoverRef> {
        self.cover.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    struct FakeTransport {
        existing: BTreeSet<String>,
        search_body: Option<Value>,
        probes: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn new(existing: &[&str], search_body: Option<Value>) -> Self {
            Self {
                existing: existing.iter().map(|s| s.to_string()).collect(),
                search_body,
                probes: RefCell::new(Vec::new()),
            }
        }
    }

    impl CoverTransport for FakeTransport {
        fn head_ok(&self, url: &Url) -> bool {
            self.probes.borrow_mut().push(url.to_string());
            self.existing.contains(url.as_str())
        }

        fn get_json(&self, _url: &Url) -> Option<Value> {
            self.search_body.clone()
        }
    }

    fn resolver(transport: FakeTransport) -> CoverResolver<FakeTransport> {
        CoverResolver::new(transport, CoversConfig::default())
    }

    fn meta(isbn: Option<&str>, olid: Option<&str>, title: Option<&str>) -> CoverMeta {
        CoverMeta {
            isbn: isbn.map(Into::into),
            olid: olid.map(Into::into),
            title: title.map(Into::into),
            author: Some("A. Author".into()),
        }
    }

    const ISBN_URL: &str = "https://covers.openlibrary.org/b/isbn/123-L.jpg?default=false";
    const OLID_URL: &str = "https://covers.openlibrary.org/b/olid/OL1M-L.jpg?default=false";

    #[test]
    fn isbn_wins_when_it_exists() {
        let r = resolver(FakeTransport::new(&[ISBN_URL], None));
        let cover = r.resolve(&meta(Some("123"), Some("OL1M"), Some("T")));
        assert_eq!(cover.as_str(), ISBN_URL);
    }

    #[test]
    fn failed_isbn_probe_falls_through_to_olid() {
        let r = resolver(FakeTransport::new(&[OLID_URL], None));
        let cover = r.resolve(&meta(Some("123"), Some("OL1M"), None));
        assert_eq!(cover.as_str(), OLID_URL);
        assert_eq!(r.transport.probes.borrow().len(), 2);
    }

    #[test]
    fn search_supplies_olid_when_metadata_has_none() {
        let body = serde_json::json!({"docs": [{"cover_edition_key": "OL1M"}]});
        let r = resolver(FakeTransport::new(&[OLID_URL], Some(body)));
        let cover = r.resolve(&meta(None, None, Some("The Hobbit")));
        assert_eq!(cover.as_str(), OLID_URL);
    }

    #[test]
    fn search_falls_back_to_first_edition_key() {
        let body = serde_json::json!({"docs": [{"edition_key": ["OL1M", "OL2M"]}]});
        let r = resolver(FakeTransport::new(&[OLID_URL], Some(body)));
        let cover = r.resolve(&meta(None, None, Some("The Hobbit")));
        assert_eq!(cover.as_str(), OLID_URL);
    }

    #[test]
    fn exhausted_chain_yields_fallback() {
        let r = resolver(FakeTransport::new(&[], None));
        let cover = r.resolve(&meta(Some("123"), Some("OL1M"), Some("T")));
        assert_eq!(cover, CoverRef::Fallback);
        assert_eq!(cover.as_str(), FALLBACK_COVER);
    }

    #[test]
    fn disabled_config_skips_every_probe() {
        let mut config = CoversConfig::default();
        config.enabled = false;
        let r = CoverResolver::new(FakeTransport::new(&[ISBN_URL], None), config);
        assert_eq!(r.resolve(&meta(Some("123"), None, None)), CoverRef::Fallback);
        assert!(r.transport.probes.borrow().is_empty());
    }

    #[test]
    fn candidate_ids_are_path_escaped() {
        let r = resolver(FakeTransport::new(&[], None));
        let url = r.cover_url("isbn", "with space").unwrap();
        assert_eq!(
            url.as_str(),
            "https://covers.openlibrary.org/b/isbn/with%20space-L.jpg?default=false"
        );
    }

    #[test]
    fn stale_resolution_is_dropped() {
        let a = BookId::new("a").unwrap();
        let b = BookId::new("b").unwrap();
        let mut slot = CoverSlot::new();
        slot.display(a.clone());

        // the user navigates away before resolution finishes
        slot.display(b.clone());
        let applied = slot.apply(ResolvedCover {
            book_id: a,
            cover: CoverRef::Fallback,
        });
        assert!(!applied);
        assert!(slot.cover().is_none());

        let applied = slot.apply(ResolvedCover {
            book_id: b,
            cover: CoverRef::Fallback,
        });
        assert!(applied);
        assert_eq!(slot.cover(), Some(&CoverRef::Fallback));
    }
}
