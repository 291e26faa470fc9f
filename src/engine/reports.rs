//! Shipment reports.
//!
//! Generated exactly once per accepted shipment, reviewed and resolved by
//! a different role. Resolved reports are filtered out of the pending view
//! but never deleted - the list is the audit history.

use tracing::{debug, info};

use crate::core::{Shipment, ShipmentReport, WallClock};
use crate::store::{self, KvStore, keys};

pub struct ReportEngine {
    reports: Vec<ShipmentReport>,
}

impl ReportEngine {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        Self {
            reports: store::read_or_default(store, keys::SHIPMENT_REPORTS),
        }
    }

    /// All reports, newest first, resolved ones included.
    pub fn reports(&self) -> &[ShipmentReport] {
        &self.reports
    }

    /// The pending-review view.
    pub fn awaiting_review(&self) -> impl Iterator<Item = &ShipmentReport> {
        self.reports.iter().filter(|r| r.is_awaiting_review())
    }

    /// Snapshot an accepted shipment and prepend the report.
    pub fn generate<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        shipment: &Shipment,
        now: WallClock,
    ) -> ShipmentReport {
        let report = ShipmentReport::for_shipment(shipment, now);
        self.reports.insert(0, report.clone());
        store::write(store, keys::SHIPMENT_REPORTS, &self.reports);
        info!(id = %report.id, "shipment report generated");
        report
    }

    /// Resolve a report. Unknown ids are a no-op: the list is unchanged
    /// and no error is raised. Returns whether anything was resolved.
    pub fn resolve<S: KvStore + ?Sized>(&mut self, store: &mut S, report_id: &str) -> bool {
        let Some(report) = self
            .reports
            .iter_mut()
            .find(|r| r.id.as_str() == report_id)
        else {
            debug!(report_id, "resolve on unknown report ignored");
            return false;
        };
        report.resolve();
        store::write(store, keys::SHIPMENT_REPORTS, &self.reports);
        info!(report_id, "shipment report resolved");
        true
    }
}
