use tokio::sync::mpsc;

use crate::batch::{BatchProgress, BatchSummary};

/// Discrete notifications from the session services.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    DeleteStarted { total: usize },
    Progress(BatchProgress),
    DeleteFinished(BatchSummary),
    /// A delete ran; any snapshot held by an observer is stale.
    SnapshotInvalidated,
    SnapshotLoaded { projects: usize, workspaces: usize },
    Error(String),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Send if anyone is listening. A closed receiver is not an error.
pub(crate) fn emit(sender: &Option<EventSender>, event: AppEvent) {
    if let Some(tx) = sender {
        let _ = tx.send(event);
    }
}
