//! Layer 2: Domain enums
//!
//! CopyStatus: Pending, Inspection, Shelved
//! Condition: Good, Worn, Damaged
//! ShipmentStatus: Pending, Accepted, Delayed, Rejected
//! ReportStatus: AwaitingInventoryReview, Resolved

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidCondition};

/// Shelving state of a physical copy.
///
/// `Inspection` and `Shelved` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyStatus {
    Pending,
    Inspection,
    Shelved,
}

impl CopyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Inspection => "Inspection",
            Self::Shelved => "Shelved",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Recorded physical condition of a copy.
///
/// Required before a copy may leave `Pending`; `Damaged` routes the copy
/// to inspection instead of the shelf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Good,
    Worn,
    Damaged,
}

impl Condition {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "Good" => Ok(Self::Good),
            "Worn" => Ok(Self::Worn),
            "Damaged" => Ok(Self::Damaged),
            _ => Err(InvalidCondition { raw: s.to_string() }.into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Worn => "Worn",
            Self::Damaged => "Damaged",
        }
    }
}

/// Transfer state of an inter-branch shipment.
///
/// Everything except `Pending` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Pending,
    Accepted,
    Delayed,
    Rejected,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Delayed => "Delayed",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Staff decision on a pending shipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentAction {
    Accepted,
    Delayed,
    Rejected,
}

impl ShipmentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Delayed => "Delayed",
            Self::Rejected => "Rejected",
        }
    }

    /// The terminal status this action moves a shipment into.
    pub fn status(&self) -> ShipmentStatus {
        match self {
            Self::Accepted => ShipmentStatus::Accepted,
            Self::Delayed => ShipmentStatus::Delayed,
            Self::Rejected => ShipmentStatus::Rejected,
        }
    }
}

/// Review state of a shipment report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "Awaiting Inventory Review")]
    AwaitingInventoryReview,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingInventoryReview => "Awaiting Inventory Review",
            Self::Resolved => "Resolved",
        }
    }
}
