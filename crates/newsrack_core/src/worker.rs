//! Background task queue keeping blocking work off the interactive thread.
//!
//! # Responsibility
//! - Run submitted jobs on one dedicated worker thread, in submission
//!   order.
//! - Make completion (and the job's result) observable through a handle.
//!
//! # Invariants
//! - Jobs never run on the submitting thread.
//! - Strict FIFO execution: a later job starts only after the previous
//!   one finished, so two refresh cycles can never interleave.
//! - A completing job whose handle was dropped discards its result
//!   without panicking.

use log::info;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Single-threaded FIFO task queue.
///
/// Dropping the queue stops accepting work; the worker drains what was
/// already submitted and exits.
pub struct TaskQueue {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl TaskQueue {
    /// Spawns the worker thread under the given name.
    pub fn spawn(name: &str) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let thread_name = name.to_string();
        let worker = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                while let Ok(job) = receiver.recv() {
                    job();
                }
                info!("event=worker_stop module=worker status=ok name={thread_name}");
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queues `task` for execution and returns a completion handle.
    ///
    /// The handle receives the task's return value once it finishes. If
    /// the handle is gone by then, the value is silently discarded.
    pub fn submit<T, F>(&self, task: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (result_sender, result_receiver) = mpsc::channel();
        let job: Job = Box::new(move || {
            let result = task();
            let _ = result_sender.send(result);
        });

        if let Some(sender) = &self.sender {
            // A send failure means the worker thread is gone; the handle
            // then reports no completion, matching a discarded task.
            let _ = sender.send(job);
        }

        TaskHandle {
            receiver: result_receiver,
        }
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        // Disconnect the queue first so the worker's recv loop ends.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Observes completion of one submitted task.
pub struct TaskHandle<T> {
    receiver: Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task completes.
    ///
    /// Returns `None` when the task can no longer complete (the queue was
    /// dropped before running it).
    pub fn wait(self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Waits up to `timeout` for completion.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<T> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Returns the result if the task already completed.
    pub fn try_take(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskQueue;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn tasks_run_off_the_submitting_thread() {
        let queue = TaskQueue::spawn("worker-test").unwrap();
        let submitter = thread::current().id();

        let handle = queue.submit(move || thread::current().id() != submitter);
        assert_eq!(handle.wait(), Some(true));
    }

    #[test]
    fn tasks_run_in_submission_order() {
        let queue = TaskQueue::spawn("worker-order").unwrap();
        let (tx, rx) = std::sync::mpsc::channel();

        for index in 0..10 {
            let tx = tx.clone();
            queue.submit(move || {
                let _ = tx.send(index);
            });
        }

        let seen: Vec<i32> = (0..10)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn dropped_handle_does_not_break_the_worker() {
        let queue = TaskQueue::spawn("worker-dropped").unwrap();

        drop(queue.submit(|| 42));

        // The worker must still be alive for subsequent tasks.
        let handle = queue.submit(|| "still running");
        assert_eq!(
            handle.wait_timeout(Duration::from_secs(5)),
            Some("still running")
        );
    }

    #[test]
    fn dropping_the_queue_drains_pending_tasks() {
        let queue = TaskQueue::spawn("worker-drain").unwrap();
        let handle = queue.submit(|| 7);
        drop(queue);

        assert_eq!(handle.wait(), Some(7));
    }
}
