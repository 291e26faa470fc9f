//! The shelving queue.
//!
//! Seeded once from the shelving baseline; once any persisted queue exists
//! it is authoritative and the baseline is never consulted again, even if
//! it has since changed.

use serde::Serialize;
use tracing::{debug, info};

use crate::baseline::{BaselineError, BaselineSource};
use crate::core::{
    ActorId, Condition, CoreError, CopyStatus, ShelvingAction, ShelvingCopy, ShelvingLogEntry,
    WallClock,
};
use crate::store::{self, KvStore, keys};

/// Aggregate queue progress. `done` counts all non-Pending copies, so
/// `done + pending == total` holds after every mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub inspection: usize,
}

pub struct ShelvingEngine {
    queue: Vec<ShelvingCopy>,
    actor: ActorId,
}

impl ShelvingEngine {
    /// A non-empty persisted queue is returned verbatim; otherwise the
    /// baseline is fetched and persisted as the initial queue.
    pub fn init<S: KvStore + ?Sized>(
        source: &dyn BaselineSource,
        store: &mut S,
        actor: ActorId,
    ) -> Result<Self, BaselineError> {
        let queue = match store::read::<Vec<ShelvingCopy>, _>(store, keys::SHELVING_QUEUE) {
            Some(local) if !local.is_empty() => local,
            _ => {
                let doc = source.fetch_shelving()?;
                store::write(store, keys::SHELVING_QUEUE, &doc.copies);
                info!(copies = doc.copies.len(), "shelving queue seeded from baseline");
                doc.copies
            }
        };
        Ok(Self { queue, actor })
    }

    /// Recovered state when no persisted queue exists and the baseline is
    /// unavailable: an empty queue, so the view stays up.
    pub fn empty(actor: ActorId) -> Self {
        Self {
            queue: Vec::new(),
            actor,
        }
    }

    pub fn queue(&self) -> &[ShelvingCopy] {
        &self.queue
    }

    pub fn pending(&self) -> impl Iterator<Item = &ShelvingCopy> {
        self.queue.iter().filter(|c| c.status == CopyStatus::Pending)
    }

    pub fn progress(&self) -> Progress {
        let total = self.queue.len();
        let done = self.queue.iter().filter(|c| c.status.is_terminal()).count();
        let inspection = self
            .queue
            .iter()
            .filter(|c| c.status == CopyStatus::Inspection)
            .count();
        Progress {
            done,
            total,
            inspection,
        }
    }

    /// Process one copy: record its condition, apply the transition rule,
    /// persist the full queue, and prepend exactly one log entry.
    pub fn mark_shelved<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        copy_id: &str,
        condition: Option<Condition>,
        now: WallClock,
    ) -> Result<Progress, CoreError> {
        let copy = self
            .queue
            .iter_mut()
            .find(|c| c.copy_id.as_str() == copy_id)
            .ok_or_else(|| CoreError::CopyNotFound {
                copy_id: copy_id.to_string(),
            })?;

        let status = copy.process(condition)?;
        let entry = ShelvingLogEntry {
            title: copy.title.clone(),
            // process() only succeeds with a condition recorded
            condition: copy.condition.unwrap_or(Condition::Good),
            action: ShelvingAction::for_status(status),
            time: now.to_rfc3339(),
            by: self.actor.clone(),
        };

        store::write(store, keys::SHELVING_QUEUE, &self.queue);
        prepend_log(store, entry);
        debug!(copy_id, status = status.as_str(), "copy processed");
        Ok(self.progress())
    }

    /// The persisted activity log, newest first.
    pub fn activity_log<S: KvStore + ?Sized>(&self, store: &S) -> Vec<ShelvingLogEntry> {
        store::read_or_default(store, keys::SHELVING_LOG)
    }
}

fn prepend_log<S: KvStore + ?Sized>(store: &mut S, entry: ShelvingLogEntry) {
    let mut log: Vec<ShelvingLogEntry> = store::read_or_default(store, keys::SHELVING_LOG);
    log.insert(0, entry);
    store::write(store, keys::SHELVING_LOG, &log);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{ShelvingDoc, StaticSource};
    use crate::core::CopyId;
    use crate::store::MemStore;

    fn copy(id: &str) -> ShelvingCopy {
        ShelvingCopy {
            copy_id: CopyId::new(id).unwrap(),
            title: format!("Title {id}"),
            author: "An Author".into(),
            genre: None,
            isbn: Some("123".into()),
            suggested_shelf: "B-02".into(),
            status: CopyStatus::Pending,
            condition: None,
        }
    }

    fn source(copies: Vec<ShelvingCopy>) -> StaticSource {
        StaticSource {
            catalog: Default::default(),
            shelving: ShelvingDoc { copies },
        }
    }

    fn actor() -> ActorId {
        ActorId::new("Alan (Volunteer)").unwrap()
    }

    #[test]
    fn init_seeds_and_persists_baseline_once() {
        let mut store = MemStore::new();
        let engine =
            ShelvingEngine::init(&source(vec![copy("c1")]), &mut store, actor()).unwrap();
        assert_eq!(engine.queue().len(), 1);

        // once persisted, a changed baseline is ignored entirely
        let engine2 =
            ShelvingEngine::init(&source(vec![copy("x1"), copy("x2")]), &mut store, actor())
                .unwrap();
        assert_eq!(engine2.queue().len(), 1);
        assert_eq!(engine2.queue()[0].copy_id.as_str(), "c1");
    }

    #[test]
    fn damaged_copy_goes_to_inspection_with_one_log_line() {
        let mut store = MemStore::new();
        let mut engine =
            ShelvingEngine::init(&source(vec![copy("c1")]), &mut store, actor()).unwrap();
        let progress = engine
            .mark_shelved(&mut store, "c1", Some(Condition::Damaged), WallClock(0))
            .unwrap();

        assert_eq!(
            progress,
            Progress {
                done: 1,
                total: 1,
                inspection: 1
            }
        );
        assert_eq!(engine.queue()[0].status, CopyStatus::Inspection);

        let log = engine.activity_log(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, ShelvingAction::SentForInspection);
        assert_eq!(log[0].condition, Condition::Damaged);
        assert_eq!(log[0].by.as_str(), "Alan (Volunteer)");
    }

    #[test]
    fn log_is_prepend_ordered() {
        let mut store = MemStore::new();
        let mut engine =
            ShelvingEngine::init(&source(vec![copy("c1"), copy("c2")]), &mut store, actor())
                .unwrap();
        engine
            .mark_shelved(&mut store, "c1", Some(Condition::Good), WallClock(0))
            .unwrap();
        engine
            .mark_shelved(&mut store, "c2", Some(Condition::Worn), WallClock(1))
            .unwrap();

        let log = engine.activity_log(&store);
        assert_eq!(log[0].title, "Title c2");
        assert_eq!(log[1].title, "Title c1");
    }

    #[test]
    fn missing_condition_changes_nothing() {
        let mut store = MemStore::new();
        let mut engine =
            ShelvingEngine::init(&source(vec![copy("c1")]), &mut store, actor()).unwrap();
        let err = engine
            .mark_shelved(&mut store, "c1", None, WallClock(0))
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingCondition));
        assert_eq!(engine.progress().done, 0);
        assert!(engine.activity_log(&store).is_empty());
    }

    #[test]
    fn unknown_copy_is_an_error() {
        let mut store = MemStore::new();
        let mut engine = ShelvingEngine::init(&source(vec![]), &mut store, actor()).unwrap();
        let err = engine
            .mark_shelved(&mut store, "ghost", Some(Condition::Good), WallClock(0))
            .unwrap_err();
        assert!(matches!(err, CoreError::CopyNotFound { .. }));
    }

    #[test]
    fn done_plus_pending_equals_total() {
        let mut store = MemStore::new();
        let mut engine = ShelvingEngine::init(
            &source(vec![copy("c1"), copy("c2"), copy("c3")]),
            &mut store,
            actor(),
        )
        .unwrap();
        engine
            .mark_shelved(&mut store, "c2", Some(Condition::Damaged), WallClock(0))
            .unwrap();

        let progress = engine.progress();
        let pending = engine.pending().count();
        assert_eq!(progress.done + pending, progress.total);
        assert_eq!(progress.inspection, 1);
    }

    #[test]
    fn queue_survives_reinit_with_progress() {
        let mut store = MemStore::new();
        let mut engine =
            ShelvingEngine::init(&source(vec![copy("c1"), copy("c2")]), &mut store, actor())
                .unwrap();
        engine
            .mark_shelved(&mut store, "c1", Some(Condition::Good), WallClock(0))
            .unwrap();

        let engine2 =
            ShelvingEngine::init(&source(vec![]), &mut store, actor()).unwrap();
        assert_eq!(engine2.progress().done, 1);
        assert_eq!(engine2.queue()[0].status, CopyStatus::Shelved);
    }
}
