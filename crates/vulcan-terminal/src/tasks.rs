//! # Scheduling Primitives
//!
//! Two small building blocks replacing raw interval timers:
//!
//! - [`PeriodicTask`] - a cancellable repeating job with
//!   **skip-if-in-flight** semantics: a tick that fires while the previous
//!   run is still going is dropped, never queued or awaited on top.
//!   Used for the catalog mirror (60 s) and dashboard (30 s) refreshes.
//! - [`Debouncer`] - a cancellation contract for bursty input: each new
//!   submission aborts the pending one, and only the last input within
//!   the quiescence window executes. Used for search-as-you-type.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info};

// =============================================================================
// Periodic Task
// =============================================================================

/// Handle to a repeating background job.
///
/// Dropping the handle closes the shutdown channel and the schedule winds
/// down on its own; [`PeriodicTask::stop`] additionally waits for the loop
/// to exit.
pub struct PeriodicTask {
    name: &'static str,
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawns `job` every `period`. Each run is spawned as its own task;
    /// while one is still in flight, further ticks are skipped.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let in_flight = Arc::new(Semaphore::new(1));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // the immediate first tick; runs are driven by the later ones
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match in_flight.clone().try_acquire_owned() {
                            Ok(permit) => {
                                let run = job();
                                tokio::spawn(async move {
                                    run.await;
                                    drop(permit);
                                });
                            }
                            Err(_) => {
                                debug!(task = name, "previous run still in flight; skipping tick");
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!(task = name, "periodic task stopped");
                        return;
                    }
                }
            }
        });

        PeriodicTask {
            name,
            shutdown_tx,
            handle,
        }
    }

    /// Stops the schedule. A run already in flight finishes on its own;
    /// no new ticks fire.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.handle.await;
        debug!(task = self.name, "periodic task shut down");
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Collapses a burst of submissions into the last one.
///
/// Each [`submit`](Debouncer::submit) aborts the previously pending job and
/// schedules the new one after the quiescence window. The contract is
/// cancellation, not queueing: intermediate inputs never execute.
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `job` to run after the quiescence window, cancelling any
    /// previously pending submission.
    pub fn submit<Fut>(&self, job: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            job.await;
        });

        let mut pending = self.pending.lock().expect("debouncer mutex poisoned");
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancels the pending submission, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self
            .pending
            .lock()
            .expect("debouncer mutex poisoned")
            .take()
        {
            previous.abort();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_periodic_task_runs_on_schedule() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let task = PeriodicTask::spawn("refresh", Duration::from_secs(60), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(185)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 3);

        task.stop().await;
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_task_skips_overlapping_runs() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();

        // each run takes 90s against a 60s period: every other tick skips
        let task = PeriodicTask::spawn("slow-refresh", Duration::from_secs(60), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(90)).await;
            }
        });

        // t=60 starts run #1 (busy until t=150); t=120 skipped; t=180 run #2
        tokio::time::sleep(Duration::from_secs(185)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_runs_only_last_submission() {
        let hits = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(300));

        for value in [1, 2, 3] {
            let hits = hits.clone();
            debouncer.submit(async move {
                hits.store(value, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_cancel() {
        let hits = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let counter = hits.clone();
        debouncer.submit(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
