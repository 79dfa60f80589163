//! Bounded fire-and-forget job queue.
//!
//! Callers submit `(job_name, args)` pairs; a single worker task executes the
//! registered handler out-of-band. Submission is explicit and can fail with
//! [`SubmitError::QueueFull`] when the queue is at capacity; what to do with
//! that failure is the caller's decision. Handler failures are logged and
//! swallowed: nothing is retried, and no outcome ever reaches the submitter.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A unit of out-of-band work.
#[derive(Debug)]
struct Job {
    name: String,
    args: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The queue is at capacity; the job was not enqueued.
    #[error("job queue is full")]
    QueueFull,
    /// The worker has shut down; the job was not enqueued.
    #[error("job queue is closed")]
    Closed,
}

type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;
type Handler = Arc<dyn Fn(serde_json::Value) -> HandlerFuture + Send + Sync>;

/// Registers handlers before the worker starts.
#[derive(Default)]
pub struct JobQueueBuilder {
    handlers: HashMap<String, Handler>,
}

impl JobQueueBuilder {
    /// Register a handler for a job name.
    pub fn handler<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.handlers
            .insert(name.into(), Arc::new(move |args| Box::pin(handler(args))));
        self
    }

    /// Spawn the worker task with a bounded channel of the given capacity.
    pub fn spawn(self, capacity: usize) -> JobQueue {
        let (tx, rx) = mpsc::channel(capacity);
        let worker = tokio::spawn(run_worker(rx, self.handlers));

        JobQueue {
            tx,
            _worker: Arc::new(worker),
        }
    }
}

/// Handle used to submit jobs; cheap to clone.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<Job>,
    _worker: Arc<JoinHandle<()>>,
}

impl JobQueue {
    pub fn builder() -> JobQueueBuilder {
        JobQueueBuilder::default()
    }

    /// Enqueue a job without waiting for capacity.
    pub fn submit(
        &self,
        name: impl Into<String>,
        args: serde_json::Value,
    ) -> Result<(), SubmitError> {
        let job = Job {
            name: name.into(),
            args,
        };

        self.tx.try_send(job).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => SubmitError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

async fn run_worker(mut rx: mpsc::Receiver<Job>, handlers: HashMap<String, Handler>) {
    while let Some(job) = rx.recv().await {
        let Some(handler) = handlers.get(&job.name) else {
            tracing::warn!(job = %job.name, "no handler registered for job");
            continue;
        };

        tracing::debug!(job = %job.name, "running job");

        if let Err(error) = handler(job.args).await {
            // Failures are swallowed; the submitter has already moved on.
            tracing::warn!(job = %job.name, %error, "job failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[tokio::test]
    async fn submitted_job_runs_with_its_args() {
        let seen = Arc::new(tokio::sync::Mutex::new(None));
        let done = Arc::new(Notify::new());

        let queue = {
            let seen = seen.clone();
            let done = done.clone();
            JobQueue::builder()
                .handler("echo", move |args| {
                    let seen = seen.clone();
                    let done = done.clone();
                    async move {
                        *seen.lock().await = Some(args);
                        done.notify_one();
                        Ok(())
                    }
                })
                .spawn(8)
        };

        queue
            .submit("echo", serde_json::json!({"title": "1984"}))
            .unwrap();
        done.notified().await;

        assert_eq!(
            seen.lock().await.take(),
            Some(serde_json::json!({"title": "1984"}))
        );
    }

    #[tokio::test]
    async fn full_queue_rejects_submission() {
        let gate = Arc::new(Notify::new());

        let queue = {
            let gate = gate.clone();
            JobQueue::builder()
                .handler("block", move |_| {
                    let gate = gate.clone();
                    async move {
                        gate.notified().await;
                        Ok(())
                    }
                })
                .spawn(1)
        };

        // First job may be picked up by the worker; keep submitting until the
        // channel itself is full.
        let mut rejected = false;
        for _ in 0..8 {
            if let Err(SubmitError::QueueFull) = queue.submit("block", serde_json::Value::Null) {
                rejected = true;
                break;
            }
        }

        assert!(rejected);
        gate.notify_waiters();
    }

    #[tokio::test]
    async fn handler_failure_is_swallowed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(Notify::new());

        let queue = {
            let calls = calls.clone();
            let done = done.clone();
            JobQueue::builder()
                .handler("flaky", move |_| {
                    let calls = calls.clone();
                    let done = done.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        done.notify_one();
                        Err(anyhow::anyhow!("boom"))
                    }
                })
                .spawn(4)
        };

        queue.submit("flaky", serde_json::Value::Null).unwrap();
        done.notified().await;

        // Exactly one attempt, no retry.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_job_name_is_ignored() {
        let queue = JobQueue::builder().spawn(4);

        // Must not panic or error at submit time.
        queue.submit("nobody-home", serde_json::Value::Null).unwrap();
    }
}
