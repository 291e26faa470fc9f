#![forbid(unsafe_code)]

//! `stacks-rs` - session-scoped reconciliation engine for a library branch
//! inventory console: baseline catalog + local overlay merging, the
//! per-copy shelving workflow, inter-branch shipment transfers with review
//! reports, and prepend-ordered activity logs, all persisted through a
//! synchronous key-value store.

pub mod baseline;
pub mod config;
pub mod core;
pub mod covers;
pub mod engine;
pub mod error;
pub mod store;
pub mod telemetry;

pub use error::{Effect, Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    ActorId, Book, BookId, BookLine, CatalogOverlay, CatalogPatch, Condition, CopyId, CopyStatus,
    CoreError, ReportId, ReportStatus, Shipment, ShipmentAction, ShipmentId, ShipmentReport,
    ShipmentStatus, ShelvingAction, ShelvingCopy, ShelvingLogEntry, TransferLogEntry, WallClock,
};
pub use crate::engine::{AppliedTransfer, Console, Progress};
pub use crate::store::{KvStore, MemStore};
