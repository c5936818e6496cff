use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::events::{emit, AppEvent, EventSender};
use crate::Result;

/// Position inside a running batch. `current` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Aggregate failure message, only when something failed.
    pub fn failure_message(&self) -> Option<String> {
        (self.failed > 0).then(|| {
            format!(
                "Deleted: {} succeeded, {} failed",
                self.succeeded, self.failed
            )
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BatchState {
    #[default]
    Idle,
    /// `progress` is `None` for single-item deletes.
    Running { progress: Option<BatchProgress> },
}

impl BatchState {
    pub fn is_running(&self) -> bool {
        matches!(self, BatchState::Running { .. })
    }

    pub fn progress(&self) -> Option<&BatchProgress> {
        match self {
            BatchState::Running { progress } => progress.as_ref(),
            BatchState::Idle => None,
        }
    }
}

/// Runs deletions one at a time and publishes where it is.
///
/// The current state is held in a watch channel so observers can read the
/// latest value at any time; discrete events go to the optional event sender.
pub struct BatchOrchestrator {
    state: watch::Sender<BatchState>,
    events: Option<EventSender>,
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BatchOrchestrator {
    pub fn new(events: Option<EventSender>) -> Self {
        let (state, _) = watch::channel(BatchState::Idle);
        Self { state, events }
    }

    pub fn subscribe(&self) -> watch::Receiver<BatchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> BatchState {
        self.state.borrow().clone()
    }

    /// Delete `targets` in order. A failing item is logged and counted; the
    /// loop always runs to the end. Yields to the scheduler after each item
    /// so progress consumers on the same thread get to run.
    pub async fn run_batch<T, L, D>(
        &self,
        targets: &[T],
        mut label_for: L,
        mut delete_one: D,
    ) -> BatchSummary
    where
        L: FnMut(&T) -> String,
        D: FnMut(&T) -> Result<u64>,
    {
        let total = targets.len();
        let mut summary = BatchSummary::default();

        self.state.send_replace(BatchState::Running { progress: None });
        emit(&self.events, AppEvent::DeleteStarted { total });

        for (index, target) in targets.iter().enumerate() {
            let progress = BatchProgress {
                current: index + 1,
                total,
                label: label_for(target),
            };
            self.state.send_replace(BatchState::Running {
                progress: Some(progress.clone()),
            });
            emit(&self.events, AppEvent::Progress(progress.clone()));

            match delete_one(target) {
                Ok(removed) => {
                    summary.succeeded += 1;
                    debug!(label = %progress.label, removed, "batch item deleted");
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(label = %progress.label, error = %err, "batch item failed");
                }
            }

            tokio::task::yield_now().await;
        }

        self.state.send_replace(BatchState::Idle);
        emit(&self.events, AppEvent::DeleteFinished(summary));
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch delete finished"
        );

        summary
    }

    /// One-element batch without progress. The error goes to the caller.
    pub fn run_single<R>(&self, op: impl FnOnce() -> Result<R>) -> Result<R> {
        self.state.send_replace(BatchState::Running { progress: None });
        let result = op();
        self.state.send_replace(BatchState::Idle);

        if let Err(err) = &result {
            emit(&self.events, AppEvent::Error(err.to_string()));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;
    use crate::Error;

    #[tokio::test]
    async fn test_failed_item_is_counted_and_loop_continues() {
        let (tx, mut rx) = events::channel();
        let orchestrator = BatchOrchestrator::new(Some(tx));
        let targets = vec!["p1", "p2", "p3"];

        let summary = orchestrator
            .run_batch(
                &targets,
                |t| t.to_string(),
                |t| {
                    if *t == "p2" {
                        Err(Error::Backend("locked".to_string()))
                    } else {
                        Ok(1)
                    }
                },
            )
            .await;

        assert_eq!(summary, BatchSummary { succeeded: 2, failed: 1 });
        assert_eq!(
            summary.failure_message().as_deref(),
            Some("Deleted: 2 succeeded, 1 failed")
        );

        let mut currents = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Progress(p) = event {
                assert_eq!(p.total, 3);
                currents.push(p.current);
            }
        }
        assert_eq!(currents, vec![1, 2, 3]);
        assert_eq!(orchestrator.state(), BatchState::Idle);
    }

    #[tokio::test]
    async fn test_empty_batch_is_empty_summary() {
        let orchestrator = BatchOrchestrator::default();
        let targets: Vec<String> = Vec::new();

        let summary = orchestrator
            .run_batch(&targets, |t| t.clone(), |_| Ok(1))
            .await;

        assert_eq!(summary.total(), 0);
        assert!(summary.failure_message().is_none());
    }

    #[tokio::test]
    async fn test_state_is_running_during_item() {
        let orchestrator = BatchOrchestrator::default();
        let watcher = orchestrator.subscribe();
        let targets = vec!["a", "b"];

        orchestrator
            .run_batch(
                &targets,
                |t| format!("label-{t}"),
                |t| {
                    let state = watcher.borrow().clone();
                    let progress = state.progress().expect("progress while running");
                    assert_eq!(progress.label, format!("label-{t}"));
                    Ok(0)
                },
            )
            .await;

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn test_run_single_surfaces_error() {
        let (tx, mut rx) = events::channel();
        let orchestrator = BatchOrchestrator::new(Some(tx));

        let err = orchestrator
            .run_single(|| -> Result<u64> { Err(Error::Backend("gone".to_string())) })
            .unwrap_err();

        assert_eq!(err.to_string(), "Backend error: gone");
        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::Error("Backend error: gone".to_string())
        );
        assert_eq!(orchestrator.state(), BatchState::Idle);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = BatchSummary { succeeded: 2, failed: 1 };
        insta::assert_json_snapshot!(summary, @r#"
        {
          "succeeded": 2,
          "failed": 1
        }
        "#);
    }
}
