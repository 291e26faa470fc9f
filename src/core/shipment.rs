//! Layer 5: Inter-branch shipment
//!
//! Pending -> Accepted | Delayed | Rejected; every non-Pending status is
//! terminal. The terminal guard is what makes report generation
//! exactly-once under duplicate invocation.

use serde::{Deserialize, Serialize};

use super::domain::{ShipmentAction, ShipmentStatus};
use super::error::CoreError;
use super::identity::{BookId, ShipmentId};

/// One line of a shipment manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLine {
    pub id: BookId,
    pub quantity: u32,
}

/// An incoming shipment from another branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub shipment_id: ShipmentId,
    pub from_branch: String,
    pub arrival_date: String,
    pub books: Vec<BookLine>,
    pub status: ShipmentStatus,
}

impl Shipment {
    /// Move out of `Pending`. Refused on a shipment that already left it,
    /// with no state change.
    pub fn apply(&mut self, action: ShipmentAction) -> Result<ShipmentStatus, CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::ShipmentAlreadyProcessed {
                shipment_id: self.shipment_id.as_str().to_string(),
                status: self.status.as_str(),
            });
        }
        self.status = action.status();
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: &str) -> Shipment {
        Shipment {
            shipment_id: ShipmentId::new(id).unwrap(),
            from_branch: "Central Branch".into(),
            arrival_date: "2025-10-22".into(),
            books: vec![BookLine {
                id: BookId::new("the-hobbit").unwrap(),
                quantity: 3,
            }],
            status: ShipmentStatus::Pending,
        }
    }

    #[test]
    fn pending_accepts_each_action_once() {
        for action in [
            ShipmentAction::Accepted,
            ShipmentAction::Delayed,
            ShipmentAction::Rejected,
        ] {
            let mut s = pending("SH-1");
            assert_eq!(s.apply(action).unwrap(), action.status());
        }
    }

    #[test]
    fn terminal_shipment_refuses_second_action() {
        let mut s = pending("SH-1");
        s.apply(ShipmentAction::Accepted).unwrap();
        let err = s.apply(ShipmentAction::Rejected).unwrap_err();
        assert!(matches!(err, CoreError::ShipmentAlreadyProcessed { .. }));
        assert_eq!(s.status, ShipmentStatus::Accepted);
    }

    #[test]
    fn wire_form_matches_console_keys() {
        let s = pending("SH-1");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["shipmentId"], "SH-1");
        assert_eq!(json["fromBranch"], "Central Branch");
        assert_eq!(json["books"][0]["quantity"], 3);
    }
}
