//! Layer 4: Shelving copy
//!
//! One record per physical copy waiting to be shelved. Seeded once from the
//! shelving baseline; thereafter the persisted queue fully shadows it.

use serde::{Deserialize, Serialize};

use super::domain::{Condition, CopyStatus};
use super::error::CoreError;
use super::identity::CopyId;

/// A physical copy in the shelving queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelvingCopy {
    pub copy_id: CopyId,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub suggested_shelf: String,
    pub status: CopyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl ShelvingCopy {
    /// Record a condition and leave `Pending`.
    ///
    /// `Damaged` routes to `Inspection`; any other condition to `Shelved`.
    /// Refused without a condition, and refused once the copy is terminal
    /// so double-submission cannot double-log.
    pub fn process(&mut self, condition: Option<Condition>) -> Result<CopyStatus, CoreError> {
        let condition = condition.ok_or(CoreError::MissingCondition)?;
        if self.status.is_terminal() {
            return Err(CoreError::CopyAlreadyProcessed {
                copy_id: self.copy_id.as_str().to_string(),
                status: self.status.as_str(),
            });
        }

        self.condition = Some(condition);
        self.status = match condition {
            Condition::Damaged => CopyStatus::Inspection,
            Condition::Good | Condition::Worn => CopyStatus::Shelved,
        };
        Ok(self.status)
    }
}
