//! Layer 7: Activity logs
//!
//! Append-only, prepend-ordered (newest first), unbounded, no compaction.
//! Entries have no identity and describe an action, not an entity.

use serde::{Deserialize, Serialize};

use super::domain::{Condition, CopyStatus, ShipmentAction};
use super::identity::{ActorId, ShipmentId};

/// What happened to a shelved copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelvingAction {
    Shelved,
    #[serde(rename = "Sent for Inspection")]
    SentForInspection,
}

impl ShelvingAction {
    /// The log line for a copy's terminal status.
    pub fn for_status(status: CopyStatus) -> Self {
        match status {
            CopyStatus::Inspection => Self::SentForInspection,
            _ => Self::Shelved,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shelved => "Shelved",
            Self::SentForInspection => "Sent for Inspection",
        }
    }
}

/// One shelving-log line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelvingLogEntry {
    pub title: String,
    pub condition: Condition,
    pub action: ShelvingAction,
    pub time: String,
    pub by: ActorId,
}

/// One transfer-log line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLogEntry {
    pub shipment_id: ShipmentId,
    pub branch: String,
    pub action: ShipmentAction,
    pub time: String,
    pub by: ActorId,
}
