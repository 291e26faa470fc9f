//! Core capability errors (identity, validation, state machines).
//!
//! These are bounded and stable: core errors represent domain/refusal states,
//! not library implementation details.

use thiserror::Error;

use crate::error::{Effect, Transience};

/// Invalid identifier.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("book id `{raw}` is invalid: {reason}")]
    Book { raw: String, reason: String },
    #[error("copy id `{raw}` is invalid: {reason}")]
    Copy { raw: String, reason: String },
    #[error("shipment id `{raw}` is invalid: {reason}")]
    Shipment { raw: String, reason: String },
    #[error("report id `{raw}` is invalid: {reason}")]
    Report { raw: String, reason: String },
    #[error("actor id `{raw}` is invalid: {reason}")]
    Actor { raw: String, reason: String },
}

/// Invalid condition string on a shelving action.
#[derive(Debug, Error, Clone)]
#[error("condition `{raw}` is invalid")]
pub struct InvalidCondition {
    pub raw: String,
}

/// Canonical error enum for the core capability.
///
/// Lookup misses are errors here so engines can refuse mutations against
/// unknown records; views treat "not found" as a normal empty state instead.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    #[error(transparent)]
    InvalidCondition(#[from] InvalidCondition),

    #[error("a condition must be recorded before a copy leaves the queue")]
    MissingCondition,

    #[error("shelf location text must not be empty")]
    EmptyShelfText,

    #[error("book `{id}` is not in the working set")]
    BookNotFound { id: String },

    #[error("copy `{copy_id}` is not in the shelving queue")]
    CopyNotFound { copy_id: String },

    #[error("copy `{copy_id}` has already been processed ({status})")]
    CopyAlreadyProcessed { copy_id: String, status: &'static str },

    #[error("shipment `{shipment_id}` is not in the transfer list")]
    ShipmentNotFound { shipment_id: String },

    #[error("shipment `{shipment_id}` has already been processed ({status})")]
    ShipmentAlreadyProcessed {
        shipment_id: String,
        status: &'static str,
    },
}

impl CoreError {
    pub fn transience(&self) -> Transience {
        // Core errors are pure domain/input failures.
        Transience::Permanent
    }

    pub fn effect(&self) -> Effect {
        Effect::None
    }
}
