//! Core domain types (Layers 0-7)
//!
//! Module hierarchy follows type dependency order:
//! - time: wall clock + formatting (Layer 0)
//! - identity: BookId, CopyId, ShipmentId, ReportId, ActorId (Layer 1)
//! - domain: status/condition/action enums (Layer 2)
//! - book: Book + overlay patches (Layer 3)
//! - copy: ShelvingCopy (Layer 4)
//! - shipment: Shipment (Layer 5)
//! - report: ShipmentReport (Layer 6)
//! - log: activity-log entries (Layer 7)

pub mod book;
pub mod copy;
pub mod domain;
pub mod error;
pub mod identity;
pub mod log;
pub mod report;
pub mod shipment;
pub mod time;

pub use book::{Book, CatalogOverlay, CatalogPatch};
pub use copy::ShelvingCopy;
pub use domain::{Condition, CopyStatus, ReportStatus, ShipmentAction, ShipmentStatus};
pub use error::{CoreError, InvalidCondition, InvalidId};
pub use identity::{ActorId, BookId, CopyId, ReportId, ShipmentId};
pub use log::{ShelvingAction, ShelvingLogEntry, TransferLogEntry};
pub use report::ShipmentReport;
pub use shipment::{BookLine, Shipment};
pub use time::{Clock, FixedClock, SystemClock, WallClock};
