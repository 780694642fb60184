//! Cancellable deferred tasks
//!
//! The only suspension point widgets have: a callback that runs after a delay
//! unless it is cancelled first. A cancelled task never runs.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::Result;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Token returned on schedule, used to cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait Scheduler: Send + Sync {
    /// Run `task` once `delay` has elapsed. A zero delay still defers the task.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    fn cancel(&self, handle: TaskHandle) -> bool;
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so ties run in schedule order
    tasks: BTreeMap<(Duration, u64), Task>,
}

/// Scheduler driven by an explicit virtual clock.
///
/// Hosts that own their event loop call [`ManualScheduler::advance`] from it;
/// tests use it for deterministic timing.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.queue.lock().now
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.lock().tasks.len()
    }

    /// Move the clock forward, running every task that falls due.
    ///
    /// Tasks run one at a time with the queue unlocked, so they may schedule
    /// or cancel other tasks. Tasks scheduled during this call wait for the
    /// next `advance` or `run_due`. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let (target, cutoff) = {
            let queue = self.queue.lock();
            (queue.now + by, queue.next_id)
        };
        let mut ran = 0;

        loop {
            let next = {
                let mut queue = self.queue.lock();
                let due = queue
                    .tasks
                    .keys()
                    .take_while(|(deadline, _)| *deadline <= target)
                    .find(|(_, id)| *id < cutoff)
                    .copied();

                match due {
                    Some(key) => {
                        queue.now = key.0;
                        queue.tasks.remove(&key)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };

            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }

        ran
    }

    /// Run tasks that are already due without moving the clock
    pub fn run_due(&self) -> usize {
        self.advance(Duration::ZERO)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let mut queue = self.queue.lock();
        let id = queue.next_id;
        queue.next_id += 1;
        let deadline = queue.now + delay;
        queue.tasks.insert((deadline, id), task);

        tracing::trace!(task_id = id, delay_ms = delay.as_millis() as u64, "Scheduled task");

        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        let mut queue = self.queue.lock();
        let key = queue
            .tasks
            .keys()
            .find(|(_, id)| *id == handle.0)
            .copied();

        match key {
            Some(key) => queue.tasks.remove(&key).is_some(),
            None => false,
        }
    }
}

/// Scheduler backed by tokio timers
#[derive(Clone)]
pub struct TokioScheduler {
    handle: Handle,
    next_id: Arc<AtomicU64>,
    tasks: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            next_id: Arc::new(AtomicU64::new(0)),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Use the runtime the caller is running in
    pub fn current() -> Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }

    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);

        // Held across spawn so the entry exists before the task can look for it
        let mut registry = self.tasks.lock();
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // A missing entry means the task was cancelled after waking
            let still_pending = tasks.lock().remove(&id).is_some();
            if still_pending {
                task();
            }
        });
        registry.insert(id, join);

        tracing::trace!(task_id = id, delay_ms = delay.as_millis() as u64, "Scheduled task");

        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        match self.tasks.lock().remove(&handle.0) {
            Some(join) => {
                join.abort();
                true
            }
            None => false,
        }
    }
}
