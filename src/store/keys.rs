//! Phantom-typed key constants for the persisted state.
//!
//! Key strings are preserved verbatim from the console so existing local
//! sessions remain readable. The phantom parameter ties each key to the
//! one type its value decodes as.

use std::marker::PhantomData;

use crate::core::{
    Book, CatalogOverlay, Shipment, ShipmentReport, ShelvingCopy, ShelvingLogEntry,
    TransferLogEntry,
};

/// A storage key that only reads/writes values of type `T`.
pub struct StoreKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> StoreKey<T> {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for StoreKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StoreKey<T> {}

/// Cached snapshot of the last record a user opened.
pub const SELECTED_BOOK: StoreKey<Book> = StoreKey::new("selectedBook");

/// Sparse per-book overlay of local catalog edits.
pub const CATALOG_UPDATES: StoreKey<CatalogOverlay> = StoreKey::new("catalogUpdates");

/// The authoritative shelving queue once seeded.
pub const SHELVING_QUEUE: StoreKey<Vec<ShelvingCopy>> = StoreKey::new("shelvingQueue");

/// Prepend-ordered shelving activity log.
pub const SHELVING_LOG: StoreKey<Vec<ShelvingLogEntry>> = StoreKey::new("shelvingLog");

/// The transfer list once a user has acted on any shipment.
pub const TRANSFER_SHIPMENTS: StoreKey<Vec<Shipment>> = StoreKey::new("transferShipments");

/// Prepend-ordered transfer activity log.
pub const TRANSFER_LOG: StoreKey<Vec<TransferLogEntry>> = StoreKey::new("transferLog");

/// All generated reports, resolved ones included (audit history).
pub const SHIPMENT_REPORTS: StoreKey<Vec<ShipmentReport>> = StoreKey::new("shipmentReports");
