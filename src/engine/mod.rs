//! Session-scoped engines.
//!
//! One `Console` per tab session owns the store handle, the clock, and the
//! four engines; every mutation is a method on it. There is no shared
//! module state, so cross-handler coupling is visible in the signatures.

pub mod catalog;
pub mod reports;
pub mod shelving;
pub mod transfer;

use tracing::warn;

pub use catalog::CatalogEngine;
pub use reports::ReportEngine;
pub use shelving::{Progress, ShelvingEngine};
pub use transfer::{AppliedTransfer, TransferEngine};

use crate::Result;
use crate::baseline::BaselineSource;
use crate::config::Config;
use crate::core::{
    ActorId, Book, Condition, Shipment, ShipmentAction, ShipmentReport, ShelvingCopy,
    ShelvingLogEntry, SystemClock, TransferLogEntry,
};
use crate::core::time::Clock;
use crate::store::KvStore;

/// The inventory console for one session.
///
/// Baseline load failures are absorbed at open: the catalog recovers from
/// the cached selection, the shelving queue comes up empty, and transfers
/// fall back to the embedded seed. A view never fails to open.
pub struct Console<S: KvStore> {
    store: S,
    clock: Box<dyn Clock>,
    catalog: CatalogEngine,
    shelving: ShelvingEngine,
    transfer: TransferEngine,
    reports: ReportEngine,
}

impl<S: KvStore> Console<S> {
    pub fn open(store: S, source: &dyn BaselineSource, config: &Config) -> Result<Self> {
        Self::open_with_clock(store, source, config, Box::new(SystemClock))
    }

    pub fn open_with_clock(
        mut store: S,
        source: &dyn BaselineSource,
        config: &Config,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let shelving_actor = ActorId::new(config.shelving_actor.clone())?;
        let transfer_actor = ActorId::new(config.transfer_actor.clone())?;

        let catalog = CatalogEngine::load(source, &store).unwrap_or_else(|err| {
            warn!(%err, "catalog baseline load failed");
            CatalogEngine::recover(&store)
        });
        let shelving = ShelvingEngine::init(source, &mut store, shelving_actor.clone())
            .unwrap_or_else(|err| {
                warn!(%err, "shelving baseline load failed");
                ShelvingEngine::empty(shelving_actor)
            });
        let transfer = TransferEngine::init(source, &store, transfer_actor);
        let reports = ReportEngine::load(&store);

        Ok(Self {
            store,
            clock,
            catalog,
            shelving,
            transfer,
            reports,
        })
    }

    // ---- catalog ----

    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn find_book(&self, id: &str) -> Option<&Book> {
        self.catalog.find_book(id)
    }

    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        self.catalog.search(query)
    }

    pub fn adjust_count(&mut self, id: &str, delta: i64) -> Result<u32> {
        Ok(self.catalog.adjust_count(&mut self.store, id, delta)?)
    }

    pub fn reassign_shelf(&mut self, id: &str, location: &str) -> Result<()> {
        Ok(self.catalog.reassign_shelf(&mut self.store, id, location)?)
    }

    pub fn select_book(&mut self, id: &str) -> Book {
        self.catalog.select_book(&mut self.store, id)
    }

    // ---- shelving ----

    pub fn shelving_pending(&self) -> Vec<&ShelvingCopy> {
        self.shelving.pending().collect()
    }

    pub fn shelving_progress(&self) -> Progress {
        self.shelving.progress()
    }

    pub fn mark_shelved(&mut self, copy_id: &str, condition: Option<Condition>) -> Result<Progress> {
        let now = self.clock.now();
        Ok(self
            .shelving
            .mark_shelved(&mut self.store, copy_id, condition, now)?)
    }

    pub fn shelving_log(&self) -> Vec<ShelvingLogEntry> {
        self.shelving.activity_log(&self.store)
    }

    // ---- transfers ----

    pub fn pending_shipments(&self) -> Vec<&Shipment> {
        self.transfer.pending().collect()
    }

    pub fn apply_shipment_action(
        &mut self,
        shipment_id: &str,
        action: ShipmentAction,
    ) -> Result<AppliedTransfer> {
        let now = self.clock.now();
        Ok(self.transfer.apply_action(
            &mut self.store,
            &mut self.reports,
            shipment_id,
            action,
            now,
        )?)
    }

    pub fn transfer_log(&self) -> Vec<TransferLogEntry> {
        self.transfer.activity_log(&self.store)
    }

    // ---- reports ----

    pub fn reports(&self) -> &[ShipmentReport] {
        self.reports.reports()
    }

    pub fn reports_awaiting_review(&self) -> Vec<&ShipmentReport> {
        self.reports.awaiting_review().collect()
    }

    pub fn resolve_report(&mut self, report_id: &str) -> bool {
        self.reports.resolve(&mut self.store, report_id)
    }

    /// The underlying store, mostly for tests asserting persisted shape.
    pub fn store(&self) -> &S {
        &self.store
    }
}
