//! Deferred task scheduling for asynchronous contracts.
//!
//! The engine never sleeps itself. It hands the ready transition of an
//! async contract to a [`Scheduler`], which runs it once the delay has
//! elapsed. [`TokioScheduler`] is used by the server; [`ManualScheduler`]
//! lets tests drive time explicitly.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::debug;

/// A task run once by a scheduler.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once, no earlier than `delay` from now.
    fn schedule(&self, delay: Duration, task: ScheduledTask);
}

/// Schedules on the ambient tokio runtime.
///
/// Outside a runtime the task is run on a plain thread after sleeping,
/// so the engine also works from synchronous callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    task();
                });
            }
            Err(_) => {
                debug!(delay_ms = delay.as_millis() as u64, "No tokio runtime, using a thread");
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    task();
                });
            }
        }
    }
}

struct PendingTask {
    due: Duration,
    task: ScheduledTask,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    pending: Vec<PendingTask>,
}

/// A scheduler driven by an explicit clock.
///
/// Tasks run only when [`ManualScheduler::advance`] moves the clock past
/// their due time.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use eor_quote_engine::scheduler::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = fired.clone();
/// scheduler.schedule(Duration::from_secs(2), Box::new(move || flag.store(true, Ordering::SeqCst)));
///
/// scheduler.advance(Duration::from_secs(1));
/// assert!(!fired.load(Ordering::SeqCst));
/// scheduler.advance(Duration::from_secs(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<ManualClock>,
}

impl ManualScheduler {
    /// Creates a scheduler at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward and runs every task now due, in due order.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let due_tasks = {
            let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
            clock.now += by;
            let now = clock.now;
            let (mut due, waiting): (Vec<_>, Vec<_>) =
                clock.pending.drain(..).partition(|p| p.due <= now);
            clock.pending = waiting;
            due.sort_by_key(|p| p.due);
            due
        };

        // Run outside the lock so tasks may schedule more work.
        let count = due_tasks.len();
        for pending in due_tasks {
            (pending.task)();
        }
        count
    }

    /// Number of tasks not yet run.
    pub fn pending(&self) -> usize {
        self.clock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        let due = clock.now + delay;
        clock.pending.push(PendingTask { due, task });
    }
}
