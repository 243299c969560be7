use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

/// Work run on every period of a repeating task.
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// Host-provided source of periodic work.
///
/// Implementations decide where the task runs; callers only rely on "the task
/// runs roughly every `interval` until the handle is cancelled or dropped".
pub trait Scheduler: Send + Sync {
    fn schedule_repeating(&self, interval: Duration, task: Task) -> TaskHandle;
}

/// Cancellation handle for a scheduled task.
///
/// Cancelling is idempotent; dropping the handle cancels too.
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Handle for a task that never started.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Stops the task. After this returns the task will not run again.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").field("active", &self.is_active()).finish()
    }
}

/// Runs each task on its own OS thread.
///
/// The thread sleeps on a cancellation channel with a timeout, so cancelling
/// wakes it immediately instead of waiting out the interval. A slow task
/// delays the next period; missed periods are not made up.
#[derive(Debug, Clone)]
pub struct ThreadScheduler {
    thread_name: String,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        Self { thread_name: "tempo-ticker".to_string() }
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(&self, interval: Duration, mut task: Task) -> TaskHandle {
        let interval = interval.max(Duration::from_millis(1));
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => task(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            });

        let join = match spawned {
            Ok(join) => join,
            Err(err) => {
                log::error!("failed to spawn {} thread: {err}", self.thread_name);
                return TaskHandle::inert();
            }
        };

        log::debug!("{} started ({interval:?} period)", self.thread_name);
        TaskHandle::new(move || {
            drop(stop_tx);
            // A task cancelling itself cannot wait for its own thread.
            if join.thread().id() == thread::current().id() {
                return;
            }
            let name = join.thread().name().unwrap_or("ticker").to_string();
            if join.join().is_err() {
                log::error!("{name} thread panicked");
            } else {
                log::debug!("{name} stopped");
            }
        })
    }
}
