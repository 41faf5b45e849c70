use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Thread-safe FIFO for marshalling application-initiated actions onto the
/// event-loop thread.
///
/// Any thread may [`schedule`](Self::schedule); only the event-loop thread
/// calls [`run_pending`](Self::run_pending). This queue exists for actions
/// like "connect now" requested from a UI thread; it must never be used to
/// parallelize decoding or reassembly.
#[derive(Default)]
pub struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a task from any thread.
    pub fn schedule(&self, task: impl FnOnce() + Send + 'static) {
        self.lock().push_back(Box::new(task));
    }

    /// Run every task queued so far, on the calling thread. Returns how many
    /// ran. Tasks scheduled by a running task execute on the next drain; the
    /// lock is not held while tasks run.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<Task> = self.lock().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue").field("len", &self.len()).finish()
    }
}
