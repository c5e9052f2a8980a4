//! Cancellable background tasks with progress.
//!
//! A [`BackgroundTask`] runs one job on a dedicated, named thread. The job
//! receives a [`TaskContext`] through which it reports progress and checks for
//! cancellation. Everything the job produces reaches the owner through a single
//! event channel, drained on the owner's thread with
//! [`try_event`](BackgroundTask::try_event) or
//! [`next_event`](BackgroundTask::next_event).
//!
//! # Example
//!
//! ```
//! use lasso_core::task::{BackgroundTask, TaskConfig, TaskEvent};
//!
//! let mut task = BackgroundTask::spawn(&TaskConfig::default(), |ctx| {
//!     let mut sum = 0u64;
//!     for i in 0..100u64 {
//!         if ctx.is_cancelled() {
//!             return None;
//!         }
//!         sum += i;
//!         ctx.report(i as usize + 1, 100);
//!     }
//!     Some(sum)
//! })
//! .unwrap();
//!
//! let result = loop {
//!     match task.next_event() {
//!         Some(TaskEvent::Progress(_)) => continue,
//!         Some(TaskEvent::Finished(sum)) => break Some(sum),
//!         Some(TaskEvent::Aborted) | None => break None,
//!     }
//! };
//! assert_eq!(result, Some(4950));
//! ```

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

use crate::cancellation::CancellationToken;
use crate::error::TaskError;
use crate::logging::targets;
use crate::progress::ProgressReporter;
use crate::signal::ConnectionType;

/// Configuration for spawning a background task.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Name for the task thread.
    pub name: String,
    /// Stack size for the task thread in bytes. `None` uses the default.
    pub stack_size: Option<usize>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: "lasso-task".to_string(),
            stack_size: None,
        }
    }
}

impl TaskConfig {
    /// Create a new configuration with the given thread name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the stack size for the task thread.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }
}

/// An event sent from a task to its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent<T> {
    /// The job reported a new percentage.
    Progress(u8),
    /// The job completed with a result. Always the last event.
    Finished(T),
    /// The job observed cancellation and produced nothing. Always the last event.
    Aborted,
}

impl<T> TaskEvent<T> {
    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

/// Handle given to a running job.
#[derive(Debug, Clone)]
pub struct TaskContext {
    token: CancellationToken,
    progress: ProgressReporter,
}

impl TaskContext {
    /// Whether the owner has requested cancellation.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The cancellation token of this task.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Report that `done` of `total` work units are complete.
    pub fn report(&self, done: usize, total: usize) {
        self.progress.set_fraction(done, total);
    }
}

/// A job running on its own thread.
///
/// Dropping the handle cancels the job without waiting for it.
pub struct BackgroundTask<T: Send + 'static> {
    events: Receiver<TaskEvent<T>>,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl<T: Send + 'static> BackgroundTask<T> {
    /// Spawn `job` on a new thread configured by `config`.
    ///
    /// The job returns `None` when it stops because of cancellation. A job
    /// that returns `Some` after cancellation was requested is still reported
    /// as [`TaskEvent::Aborted`], so the owner never receives a result it has
    /// already given up on.
    pub fn spawn<F>(config: &TaskConfig, job: F) -> Result<Self, TaskError>
    where
        F: FnOnce(&TaskContext) -> Option<T> + Send + 'static,
    {
        let (sender, events) = unbounded();
        let token = CancellationToken::new();
        let progress = ProgressReporter::new();

        let progress_sender: Sender<TaskEvent<T>> = sender.clone();
        progress.on_progress_changed().connect_with_type(
            move |&percent| {
                let _ = progress_sender.send(TaskEvent::Progress(percent));
            },
            ConnectionType::Direct,
        );

        let context = TaskContext {
            token: token.clone(),
            progress,
        };

        let mut builder = thread::Builder::new().name(config.name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let name = config.name.clone();
        let handle = builder
            .spawn(move || {
                let outcome = job(&context);
                let event = match outcome {
                    Some(value) if !context.is_cancelled() => TaskEvent::Finished(value),
                    _ => TaskEvent::Aborted,
                };
                tracing::debug!(
                    target: targets::TASK,
                    task = %name,
                    aborted = matches!(event, TaskEvent::Aborted),
                    "background task ended"
                );
                context.progress.on_progress_changed().disconnect_all();
                let _ = sender.send(event);
            })
            .map_err(TaskError::Spawn)?;

        Ok(Self {
            events,
            token,
            handle: Some(handle),
            finished: false,
        })
    }

    /// Request cooperative cancellation.
    pub fn cancel(&self) {
        if self.token.cancel() {
            tracing::debug!(target: targets::TASK, "background task cancellation requested");
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the terminal event has been received.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take the next event without blocking.
    pub fn try_event(&mut self) -> Option<TaskEvent<T>> {
        if self.finished {
            return None;
        }
        match self.events.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.observe(TaskEvent::Aborted)),
        }
    }

    /// Block until the next event arrives.
    ///
    /// Returns `None` once the terminal event has been delivered. A job that
    /// panicked is reported as [`TaskEvent::Aborted`].
    pub fn next_event(&mut self) -> Option<TaskEvent<T>> {
        if self.finished {
            return None;
        }
        let event = self.events.recv().unwrap_or(TaskEvent::Aborted);
        Some(self.observe(event))
    }

    fn observe(&mut self, event: TaskEvent<T>) -> TaskEvent<T> {
        if event.is_terminal() {
            self.finished = true;
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
        }
        event
    }
}

impl<T: Send + 'static> Drop for BackgroundTask<T> {
    fn drop(&mut self) {
        if !self.finished {
            self.token.cancel();
        }
        // Don't block in drop - the thread exits on its own.
    }
}

impl<T: Send + 'static> std::fmt::Debug for BackgroundTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundTask")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.finished)
            .finish()
    }
}
