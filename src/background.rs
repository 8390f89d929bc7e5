//! Background task executor.
//!
//! A fixed pool of worker threads runs blocking work (HTTP calls, image
//! fetches) off the UI thread. Completion callbacks are queued and run on
//! whichever thread calls `process_results`, which the app does once per
//! frame, so callbacks may safely touch UI state.

use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use tracing::{debug, warn};

/// Outcome of a background task. Errors are plain strings because they cross
/// thread boundaries and end up in toasts, not in control flow.
pub type TaskResult<T> = Result<T, String>;

type ErasedOutcome = Result<Box<dyn Any + Send>, String>;
type ErasedCallback = Box<dyn FnOnce(ErasedOutcome)>;

struct Job {
    id: u64,
    name: String,
    work: Box<dyn FnOnce() -> ErasedOutcome + Send>,
}

struct Completion {
    id: u64,
    name: String,
    outcome: ErasedOutcome,
}

pub struct BackgroundExecutor {
    job_tx: Option<Sender<Job>>,
    done_rx: Mutex<Receiver<Completion>>,
    callbacks: Mutex<HashMap<u64, ErasedCallback>>,
    next_id: AtomicU64,
    pending: AtomicUsize,
    _workers: Vec<thread::JoinHandle<()>>,
}

impl BackgroundExecutor {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (job_tx, job_rx) = channel::<Job>();
        let (done_tx, done_rx) = channel::<Completion>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let job_rx = Arc::clone(&job_rx);
            let done_tx = done_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("background-{}", index))
                .spawn(move || worker_loop(job_rx, done_tx));
            match handle {
                Ok(handle) => handles.push(handle),
                Err(error) => warn!(%error, "Failed to spawn background worker"),
            }
        }

        Self {
            job_tx: Some(job_tx),
            done_rx: Mutex::new(done_rx),
            callbacks: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            pending: AtomicUsize::new(0),
            _workers: handles,
        }
    }

    pub fn with_default_workers() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get().min(4))
            .unwrap_or(2);
        Self::new(workers)
    }

    /// Queue `work` on a worker thread. `callback` runs later, on the thread
    /// that calls `process_results`.
    pub fn spawn<T, W, C>(&self, name: &str, work: W, callback: C)
    where
        T: Send + 'static,
        W: FnOnce() -> TaskResult<T> + Send + 'static,
        C: FnOnce(TaskResult<T>) + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.pending.fetch_add(1, Ordering::SeqCst);

        self.callbacks.lock().insert(
            id,
            Box::new(move |outcome: ErasedOutcome| {
                let result = match outcome {
                    Ok(boxed) => match boxed.downcast::<T>() {
                        Ok(value) => Ok(*value),
                        Err(_) => Err("background task returned unexpected type".to_string()),
                    },
                    Err(message) => Err(message),
                };
                callback(result);
            }),
        );

        let job = Job {
            id,
            name: name.to_string(),
            work: Box::new(move || work().map(|value| Box::new(value) as Box<dyn Any + Send>)),
        };

        debug!(task = name, id, "Spawning background task");
        if let Some(tx) = &self.job_tx {
            if tx.send(job).is_err() {
                warn!(task = name, "Background workers unavailable, dropping task");
                self.fail_locally(id, "background workers unavailable");
            }
        } else {
            self.fail_locally(id, "executor shut down");
        }
    }

    /// Drain finished tasks and run their callbacks. Called once per frame.
    /// Returns how many callbacks ran.
    pub fn process_results(&self) -> usize {
        let mut completions = Vec::new();
        {
            let rx = self.done_rx.lock();
            while let Ok(completion) = rx.try_recv() {
                completions.push(completion);
            }
        }

        let count = completions.len();
        for completion in completions {
            if let Err(message) = &completion.outcome {
                warn!(task = %completion.name, error = %message, "Background task failed");
            } else {
                debug!(task = %completion.name, id = completion.id, "Background task finished");
            }
            let callback = self.callbacks.lock().remove(&completion.id);
            if let Some(callback) = callback {
                callback(completion.outcome);
            }
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
        count
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    fn fail_locally(&self, id: u64, message: &str) {
        if let Some(callback) = self.callbacks.lock().remove(&id) {
            callback(Err(message.to_string()));
        }
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Drop for BackgroundExecutor {
    fn drop(&mut self) {
        // Closing the job channel lets idle workers exit; busy workers finish
        // their current task and then exit.
        self.job_tx.take();
    }
}

fn worker_loop(job_rx: Arc<Mutex<Receiver<Job>>>, done_tx: Sender<Completion>) {
    loop {
        let job = {
            let rx = job_rx.lock();
            rx.recv()
        };
        let Ok(job) = job else {
            break;
        };
        let outcome = (job.work)();
        let completion = Completion {
            id: job.id,
            name: job.name,
            outcome,
        };
        if done_tx.send(completion).is_err() {
            break;
        }
    }
}
