//! Strict FIFO execution of asynchronous tasks submitted from independent callers.
//!
//! The queue owns a piece of state `S` and a single worker that drains tasks
//! one at a time, handing each task exclusive access to the state. A task is
//! scheduled at the moment [`TaskQueue::enqueue`] is called; it starts only
//! after every earlier task has settled, and its caller receives exactly its
//! own outcome through the returned [`TaskHandle`]. A task that fails or
//! panics settles like any other, so the following task still runs.

use std::{
    any::Any,
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{future::BoxFuture, FutureExt};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::QueueError;

type Job<S> = Box<dyn for<'a> FnOnce(&'a mut S) -> BoxFuture<'a, ()> + Send>;

fn job<S, F>(f: F) -> Job<S>
where
    F: for<'a> FnOnce(&'a mut S) -> BoxFuture<'a, ()> + Send + 'static,
{
    Box::new(f)
}

pub struct TaskQueue<S> {
    jobs: mpsc::UnboundedSender<Job<S>>,
}

impl<S> Clone for TaskQueue<S> {
    fn clone(&self) -> Self {
        Self {
            jobs: self.jobs.clone(),
        }
    }
}

impl<S: Send + 'static> TaskQueue<S> {
    /// Moves `state` into a worker spawned on the current tokio runtime.
    ///
    /// The worker stops once every `TaskQueue` clone has been dropped and the
    /// remaining tasks have drained.
    pub fn new(state: S) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain(state, rx));
        Self { jobs }
    }

    pub fn enqueue<T, F>(&self, task: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: for<'a> FnOnce(&'a mut S) -> BoxFuture<'a, T> + Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let queued = job(move |state: &mut S| {
            async move {
                let outcome = AssertUnwindSafe(async move { task(state).await })
                    .catch_unwind()
                    .await
                    .map_err(|payload| {
                        let message = panic_message(payload.as_ref());
                        warn!(%message, "queued task panicked");
                        QueueError::Panicked(message)
                    });
                if result_tx.send(outcome).is_err() {
                    debug!("queued task settled after its handle was dropped");
                }
            }
            .boxed()
        });

        // On a closed queue the job is dropped here, which drops `result_tx`
        // and resolves the handle to `QueueError::Closed`.
        if self.jobs.send(queued).is_err() {
            warn!("task submitted to a closed queue");
        }
        TaskHandle { result: result_rx }
    }
}

async fn drain<S>(mut state: S, mut rx: mpsc::UnboundedReceiver<Job<S>>) {
    while let Some(job) = rx.recv().await {
        job(&mut state).await;
    }
    debug!("task queue drained and closed");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Resolves with the outcome of one queued task.
///
/// Dropping the handle does not cancel the task.
#[must_use = "dropping a TaskHandle discards the task's outcome"]
pub struct TaskHandle<T> {
    result: oneshot::Receiver<Result<T, QueueError>>,
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, QueueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.result)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(QueueError::Closed)))
    }
}

#[cfg(test)]
#[path = "tests/task_queue_tests.rs"]
mod tests;
