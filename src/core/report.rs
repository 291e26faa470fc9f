//! Layer 6: Shipment report
//!
//! Created exactly once when a shipment is accepted; resolved later by a
//! different role. Resolution never reaches back into the shipment or the
//! inventory counts - the count adjustment is a separate manual act.

use serde::{Deserialize, Serialize};

use super::domain::ReportStatus;
use super::identity::ReportId;
use super::shipment::{BookLine, Shipment};
use super::time::WallClock;

/// Review snapshot of an accepted shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentReport {
    pub id: ReportId,
    pub from: String,
    pub books: Vec<BookLine>,
    pub created_at: String,
    pub status: ReportStatus,
}

impl ShipmentReport {
    /// Snapshot the shipment at acceptance time.
    pub fn for_shipment(shipment: &Shipment, at: WallClock) -> Self {
        Self {
            id: ReportId::from(&shipment.shipment_id),
            from: shipment.from_branch.clone(),
            books: shipment.books.clone(),
            created_at: at.to_rfc3339(),
            status: ReportStatus::AwaitingInventoryReview,
        }
    }

    pub fn resolve(&mut self) {
        self.status = ReportStatus::Resolved;
    }

    pub fn is_awaiting_review(&self) -> bool {
        self.status == ReportStatus::AwaitingInventoryReview
    }
}
