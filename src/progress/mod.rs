//! Task progress tracking.
//!
//! The pipeline reports progress through the [`ProgressSink`] trait so the
//! engine never depends on how callers surface it. [`ProgressStore`] is the
//! standard sink: an explicit, lock-protected map of task snapshots that
//! callers own and share. There is no process-global registry; concurrent
//! runs write to disjoint task ids under the same lock.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::RunSummary;

/// Lifecycle state of a pipeline task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Registered but not yet started.
    Pending,
    /// Actively running.
    Processing,
    /// Finished successfully.
    Completed,
    /// Finished with a fatal error.
    Error,
}

impl TaskStatus {
    /// Returns true for states that will never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }
}

/// Snapshot of one task's progress.
///
/// Reads always observe a complete snapshot; the store clones under the lock
/// so callers never see a partially applied update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Last reported step.
    pub current_step: u32,
    /// Number of steps in the whole run.
    pub total_steps: u32,
    /// Percent complete, 0 through 100, derived from the step counters.
    pub percentage: u8,
    /// Human-readable description of the current step.
    pub message: String,
    /// Fatal error message, set only in the Error state.
    pub error: Option<String>,
    /// When the task was registered.
    pub started_at: DateTime<Utc>,
    /// When the task reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
    /// Run summary, set only in the Completed state.
    pub summary: Option<RunSummary>,
}

/// Receiver for pipeline progress events.
///
/// Implementations must be cheap and infallible; the pipeline fires events
/// and moves on without waiting on the sink.
pub trait ProgressSink: Send + Sync {
    /// Reports a progress milestone.
    fn on_progress(&self, task_id: Uuid, percentage: u8, message: &str);

    /// Reports successful completion with the run summary.
    fn on_complete(&self, task_id: Uuid, summary: &RunSummary);

    /// Reports a fatal error.
    fn on_error(&self, task_id: Uuid, message: &str);
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn on_progress(&self, _task_id: Uuid, _percentage: u8, _message: &str) {}

    fn on_complete(&self, _task_id: Uuid, _summary: &RunSummary) {}

    fn on_error(&self, _task_id: Uuid, _message: &str) {}
}

/// Thread-safe store of task progress snapshots.
///
/// # Example
///
/// ```
/// use breaktime_engine::progress::{ProgressStore, TaskStatus};
/// use uuid::Uuid;
///
/// let store = ProgressStore::new();
/// let task_id = Uuid::new_v4();
/// store.start_task(task_id);
/// store.update(task_id, 40, "Running audit checks");
///
/// let progress = store.get(task_id).unwrap();
/// assert_eq!(progress.status, TaskStatus::Processing);
/// assert_eq!(progress.percentage, 40);
/// ```
#[derive(Debug, Default)]
pub struct ProgressStore {
    tasks: Mutex<HashMap<Uuid, TaskProgress>>,
}

impl ProgressStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ProgressStore::default()
    }

    /// Registers a new pending task with a 100-step scale.
    pub fn start_task(&self, task_id: Uuid) {
        self.start_task_with_steps(task_id, 100);
    }

    /// Registers a new pending task with an explicit step count.
    pub fn start_task_with_steps(&self, task_id: Uuid, total_steps: u32) {
        let progress = TaskProgress {
            status: TaskStatus::Pending,
            current_step: 0,
            total_steps: total_steps.max(1),
            percentage: 0,
            message: "Task queued".to_string(),
            error: None,
            started_at: Utc::now(),
            finished_at: None,
            summary: None,
        };
        self.lock().insert(task_id, progress);
    }

    /// Records a progress milestone, moving the task to Processing.
    ///
    /// The percentage is derived from the step counters and capped at 100.
    /// Unknown task ids are ignored; progress is advisory.
    pub fn update(&self, task_id: Uuid, current_step: u32, message: &str) {
        let mut tasks = self.lock();
        if let Some(progress) = tasks.get_mut(&task_id) {
            progress.status = TaskStatus::Processing;
            progress.current_step = current_step.min(progress.total_steps);
            let percent =
                u64::from(progress.current_step) * 100 / u64::from(progress.total_steps);
            progress.percentage = percent.min(100) as u8;
            progress.message = message.to_string();
        }
    }

    /// Marks the task completed at 100% with its run summary.
    pub fn complete(&self, task_id: Uuid, summary: RunSummary) {
        let mut tasks = self.lock();
        if let Some(progress) = tasks.get_mut(&task_id) {
            progress.status = TaskStatus::Completed;
            progress.current_step = progress.total_steps;
            progress.percentage = 100;
            progress.message = "Processing complete".to_string();
            progress.finished_at = Some(Utc::now());
            progress.summary = Some(summary);
        }
    }

    /// Marks the task failed with an error message.
    pub fn fail(&self, task_id: Uuid, message: &str) {
        let mut tasks = self.lock();
        if let Some(progress) = tasks.get_mut(&task_id) {
            progress.status = TaskStatus::Error;
            progress.message = "Processing failed".to_string();
            progress.error = Some(message.to_string());
            progress.finished_at = Some(Utc::now());
        }
    }

    /// Returns a cloned snapshot of the task, if known.
    pub fn get(&self, task_id: Uuid) -> Option<TaskProgress> {
        self.lock().get(&task_id).cloned()
    }

    /// Removes terminal tasks whose finish time is older than `max_age`.
    ///
    /// Returns the number of tasks removed. In-flight tasks are never swept.
    pub fn sweep(&self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|_, progress| {
            !(progress.status.is_terminal()
                && progress.finished_at.is_some_and(|finished| finished < cutoff))
        });
        let removed = before - tasks.len();
        if removed > 0 {
            debug!(removed, "swept finished tasks");
        }
        removed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, TaskProgress>> {
        // A poisoned lock still holds consistent snapshots.
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressSink for ProgressStore {
    fn on_progress(&self, task_id: Uuid, percentage: u8, message: &str) {
        // The pipeline reports on a 100-step scale.
        self.update(task_id, u32::from(percentage), message);
    }

    fn on_complete(&self, task_id: Uuid, summary: &RunSummary) {
        self.complete(task_id, summary.clone());
    }

    fn on_error(&self, task_id: Uuid, message: &str) {
        self.fail(task_id, message);
    }
}
