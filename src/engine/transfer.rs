//! Inter-branch shipment transfers.
//!
//! The persisted list fully shadows the baseline once a user acts: after
//! the first action the defaults are gone for that session/device. The
//! terminal-state guard on `Shipment` makes acceptance (and therefore
//! report generation) exactly-once under duplicate invocation.

use tracing::{debug, warn};

use crate::baseline::{BaselineSource, default_incoming_seed};
use crate::core::{
    ActorId, CoreError, Shipment, ShipmentAction, ShipmentReport, ShipmentStatus,
    TransferLogEntry, WallClock,
};
use crate::engine::reports::ReportEngine;
use crate::store::{self, KvStore, keys};

/// Result of one shipment action: the shipment as persisted, and the
/// report when the action was an acceptance.
#[derive(Clone, Debug)]
pub struct AppliedTransfer {
    pub shipment: Shipment,
    pub report: Option<ShipmentReport>,
}

pub struct TransferEngine {
    shipments: Vec<Shipment>,
    actor: ActorId,
}

impl TransferEngine {
    /// A non-empty persisted list wins outright; otherwise the baseline's
    /// incoming shipments, falling back to the embedded seed. A failed
    /// baseline load degrades to the seed rather than taking the view down.
    pub fn init<S: KvStore + ?Sized>(
        source: &dyn BaselineSource,
        store: &S,
        actor: ActorId,
    ) -> Self {
        let shipments = match store::read::<Vec<Shipment>, _>(store, keys::TRANSFER_SHIPMENTS) {
            Some(local) if !local.is_empty() => local,
            _ => match source.fetch_catalog() {
                Ok(doc) if !doc.shipments.incoming.is_empty() => doc.shipments.incoming,
                Ok(_) => default_incoming_seed(),
                Err(err) => {
                    warn!(%err, "baseline unavailable, using embedded shipment seed");
                    default_incoming_seed()
                }
            },
        };
        Self { shipments, actor }
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// The incoming view: shipments nobody has acted on yet.
    pub fn pending(&self) -> impl Iterator<Item = &Shipment> {
        self.shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::Pending)
    }

    /// Apply a staff decision: persist the full list, prepend one transfer
    /// log entry, and on acceptance generate the report exactly once.
    pub fn apply_action<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        reports: &mut ReportEngine,
        shipment_id: &str,
        action: ShipmentAction,
        now: WallClock,
    ) -> Result<AppliedTransfer, CoreError> {
        let shipment = self
            .shipments
            .iter_mut()
            .find(|s| s.shipment_id.as_str() == shipment_id)
            .ok_or_else(|| CoreError::ShipmentNotFound {
                shipment_id: shipment_id.to_string(),
            })?;

        shipment.apply(action)?;
        let shipment = shipment.clone();
        store::write(store, keys::TRANSFER_SHIPMENTS, &self.shipments);

        prepend_log(
            store,
            TransferLogEntry {
                shipment_id: shipment.shipment_id.clone(),
                branch: shipment.from_branch.clone(),
                action,
                time: now.to_rfc3339(),
                by: self.actor.clone(),
            },
        );
        debug!(shipment_id, action = action.as_str(), "shipment processed");

        let report = match action {
            ShipmentAction::Accepted => Some(reports.generate(store, &shipment, now)),
            _ => None,
        };
        Ok(AppliedTransfer { shipment, report })
    }

    /// The persisted transfer log, newest first.
    pub fn activity_log<S: KvStore + ?Sized>(&self, store: &S) -> Vec<TransferLogEntry> {
        store::read_or_default(store, keys::TRANSFER_LOG)
    }
}

fn prepend_log<S: KvStore + ?Sized>(store: &mut S, entry: TransferLogEntry) {
    let mut log: Vec<TransferLogEntry> = store::read_or_default(store, keys::TRANSFER_LOG);
    log.insert(0, entry);
    store::write(store, keys::TRANSFER_LOG, &log);
}
