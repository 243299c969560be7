use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::{Scheduler, Task, TaskHandle};

/// Deterministic scheduler: time only moves when [`advance`](Self::advance)
/// is called.
///
/// Tasks run on the caller's thread, in due order. A task that is due several
/// times within one `advance` runs once per elapsed period.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    tasks: Vec<Entry>,
}

struct Entry {
    id: u64,
    interval: Duration,
    next_due: Duration,
    /// `None` while the task is running outside the lock.
    task: Option<Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of tasks scheduled and not yet cancelled.
    pub fn active_tasks(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Moves virtual time forward by `by`, running every task that falls due.
    ///
    /// Returns the number of task runs.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.lock().now + by;
        let mut runs = 0;

        loop {
            let (id, mut task) = {
                let mut inner = self.inner.lock();
                let due = inner
                    .tasks
                    .iter_mut()
                    .filter(|e| e.task.is_some() && e.next_due <= target)
                    .min_by_key(|e| (e.next_due, e.id));
                let Some(entry) = due else {
                    inner.now = target;
                    break;
                };
                let (id, due_at) = (entry.id, entry.next_due);
                entry.next_due += entry.interval;
                let Some(task) = entry.task.take() else { break };
                inner.now = due_at;
                (id, task)
            };

            // Run unlocked so the task may cancel or schedule.
            task();
            runs += 1;

            let mut inner = self.inner.lock();
            if let Some(entry) = inner.tasks.iter_mut().find(|e| e.id == id) {
                entry.task = Some(task);
            }
        }

        runs
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, task: Task) -> TaskHandle {
        let interval = interval.max(Duration::from_millis(1));
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            let next_due = inner.now + interval;
            inner.tasks.push(Entry { id, interval, next_due, task: Some(task) });
            id
        };

        let inner = Arc::downgrade(&self.inner);
        TaskHandle::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.lock().tasks.retain(|e| e.id != id);
            }
        })
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("tasks", &inner.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Task) {
        let n = Arc::new(AtomicUsize::new(0));
        let c = n.clone();
        (n, Box::new(move || { c.fetch_add(1, Ordering::SeqCst); }))
    }

    #[test]
    fn nothing_runs_before_first_period() {
        let sched = ManualScheduler::new();
        let (n, task) = counter();
        let _h = sched.schedule_repeating(Duration::from_millis(1000), task);

        assert_eq!(sched.advance(Duration::from_millis(999)), 0);
        assert_eq!(n.load(Ordering::SeqCst), 0);

        assert_eq!(sched.advance(Duration::from_millis(1)), 1);
        assert_eq!(n.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn runs_once_per_elapsed_period() {
        let sched = ManualScheduler::new();
        let (n, task) = counter();
        let _h = sched.schedule_repeating(Duration::from_millis(100), task);

        assert_eq!(sched.advance(Duration::from_millis(350)), 3);
        assert_eq!(n.load(Ordering::SeqCst), 3);
        assert_eq!(sched.now(), Duration::from_millis(350));
    }

    #[test]
    fn cancelled_task_stops() {
        let sched = ManualScheduler::new();
        let (n, task) = counter();
        let mut h = sched.schedule_repeating(Duration::from_millis(10), task);
        assert_eq!(sched.active_tasks(), 1);

        h.cancel();
        assert_eq!(sched.active_tasks(), 0);
        sched.advance(Duration::from_millis(100));
        assert_eq!(n.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dropping_handle_cancels() {
        let sched = ManualScheduler::new();
        let (_, task) = counter();
        drop(sched.schedule_repeating(Duration::from_millis(10), task));
        assert_eq!(sched.active_tasks(), 0);
    }

    #[test]
    fn tasks_interleave_in_due_order() {
        let sched = ManualScheduler::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        let _fast = sched.schedule_repeating(Duration::from_millis(10), Box::new(move || a.lock().push("fast")));
        let _slow = sched.schedule_repeating(Duration::from_millis(25), Box::new(move || b.lock().push("slow")));

        sched.advance(Duration::from_millis(30));
        assert_eq!(*log.lock(), vec!["fast", "fast", "slow", "fast"]);
    }

    #[test]
    fn task_may_cancel_itself() {
        let sched = ManualScheduler::new();
        let slot: Arc<Mutex<Option<TaskHandle>>> = Arc::new(Mutex::new(None));
        let inner_slot = slot.clone();
        let (n, _) = counter();
        let count = n.clone();
        let handle = sched.schedule_repeating(
            Duration::from_millis(10),
            Box::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
                inner_slot.lock().take();
            }),
        );
        *slot.lock() = Some(handle);

        sched.advance(Duration::from_millis(100));
        assert_eq!(n.load(Ordering::SeqCst), 1);
        assert_eq!(sched.active_tasks(), 0);
    }
}
