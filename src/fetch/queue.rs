//! Bounded Fetch Queue
//!
//! Admission control for asynchronous fetch tasks: submitted tasks wait in a
//! FIFO queue and at most `limit` of them run at any time. There is no priority,
//! cancellation or timeout; a started task runs to completion.

use crate::error::FetchError;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, trace};

type Job = BoxFuture<'static, ()>;

/// Queue statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Tasks waiting for a slot
    pub pending: usize,
    /// Tasks currently holding a slot
    pub running: usize,
    /// Tasks that released their slot (success, failure or panic)
    pub finished: usize,
}

struct QueueState {
    pending: VecDeque<Job>,
    running: usize,
    finished: usize,
}

struct QueueInner {
    limit: usize,
    state: Mutex<QueueState>,
}

/// Concurrency-limited task queue.
///
/// Must be used from within a Tokio runtime: started tasks are spawned onto it.
#[derive(Clone)]
pub struct FetchQueue {
    inner: Arc<QueueInner>,
}

impl FetchQueue {
    /// Create a queue admitting at most `limit` running tasks (at least 1)
    pub fn new(limit: usize) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                limit: limit.max(1),
                state: Mutex::new(QueueState {
                    pending: VecDeque::new(),
                    running: 0,
                    finished: 0,
                }),
            }),
        }
    }

    pub fn limit(&self) -> usize {
        self.inner.limit
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.inner.state.lock();
        QueueStats {
            pending: state.pending.len(),
            running: state.running,
            finished: state.finished,
        }
    }

    /// Submit a task.
    ///
    /// The task is queued before this returns; the returned future only waits
    /// for its outcome. A task that panics resolves with `FetchError::Abandoned`
    /// and still releases its slot.
    pub fn submit<T, F, Fut>(
        &self,
        task: F,
    ) -> impl Future<Output = Result<T, FetchError>> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        // `task()` runs inside the spawned job, so a panic in its synchronous
        // part unwinds through the slot guard like any other exit.
        let job = async move {
            let outcome = task().await;
            let _ = tx.send(outcome);
        }
        .boxed();

        {
            let mut state = self.inner.state.lock();
            state.pending.push_back(job);
            trace!(pending = state.pending.len(), running = state.running, "Task queued");
        }
        QueueInner::schedule(&self.inner);

        async move {
            match rx.await {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Abandoned),
            }
        }
    }
}

impl QueueInner {
    /// Start queued jobs until the limit is reached or the queue is empty
    fn schedule(inner: &Arc<QueueInner>) {
        loop {
            let job = {
                let mut state = inner.state.lock();
                if state.running >= inner.limit {
                    return;
                }
                match state.pending.pop_front() {
                    Some(job) => {
                        state.running += 1;
                        job
                    }
                    None => return,
                }
            };

            let slot = RunningSlot {
                inner: Arc::clone(inner),
            };
            tokio::spawn(async move {
                let _slot = slot;
                job.await;
            });
        }
    }
}

/// Holds one running slot; releasing it reschedules the queue
struct RunningSlot {
    inner: Arc<QueueInner>,
}

impl Drop for RunningSlot {
    fn drop(&mut self) {
        {
            let mut state = self.inner.state.lock();
            state.running -= 1;
            state.finished += 1;
            debug!(
                running = state.running,
                pending = state.pending.len(),
                "Fetch slot released"
            );
        }
        QueueInner::schedule(&self.inner);
    }
}
