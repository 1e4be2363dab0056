// src/refresh.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::WatchStream;
use tracing::{info, warn};

use crate::ingest::{self, TextSource};
use crate::record::SheetRecord;

/// Externally observable state of one dashboard feed: the last-good
/// record set and whether a fetch is currently outstanding.
#[derive(Debug)]
pub struct Snapshot<R> {
    pub records: Arc<Vec<R>>,
    pub loading: bool,
}

impl<R> Clone for Snapshot<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            loading: self.loading,
        }
    }
}

/// Drives the ingestion pipeline on a fixed interval and publishes the
/// latest good record set.
///
/// Until the first fetch lands, subscribers see an empty record set with
/// `loading` raised; on every later cycle they keep the last-good records
/// while `loading` pulses, so a refresh never flashes back to empty. A
/// failed cycle is logged and skipped; there is no mid-cycle retry.
///
/// `stop()` tears down both the polling timer and the display clock. A
/// fetch already in flight is left to finish, but its result is discarded
/// once the scheduler is stopped.
pub struct RefreshScheduler<R> {
    snapshot_rx: watch::Receiver<Snapshot<R>>,
    clock_rx: watch::Receiver<DateTime<Local>>,
    alive: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    clock_handle: JoinHandle<()>,
}

impl<R: SheetRecord> RefreshScheduler<R> {
    /// Spawn the polling and clock tasks. The first fetch fires
    /// immediately.
    pub fn start<S: TextSource>(source: S, interval: Duration) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot {
            records: Arc::new(Vec::new()),
            loading: true,
        });
        let (clock_tx, clock_rx) = watch::channel(Local::now());
        let alive = Arc::new(AtomicBool::new(true));
        let shutdown = Arc::new(Notify::new());

        // The poll task is detached; teardown flips `alive` and wakes
        // it, and it exits at its next checkpoint.
        tokio::spawn({
            let alive = Arc::clone(&alive);
            let shutdown = Arc::clone(&shutdown);
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {}
                        _ = shutdown.notified() => break,
                    }
                    if !alive.load(Ordering::SeqCst) {
                        break;
                    }

                    snapshot_tx.send_modify(|s| s.loading = true);
                    let outcome = ingest::ingest::<R, S>(&source).await;
                    if !alive.load(Ordering::SeqCst) {
                        // Torn down while the fetch was in flight; the
                        // result must not surface.
                        break;
                    }
                    match outcome {
                        Ok(records) => {
                            info!(count = records.len(), "record set refreshed");
                            snapshot_tx.send_modify(|s| {
                                s.records = Arc::new(records);
                                s.loading = false;
                            });
                        }
                        Err(err) => {
                            // Stale-but-valid beats empty-but-fresh: the
                            // previous records stay installed.
                            warn!(error = %err, "refresh cycle failed; keeping previous record set");
                            snapshot_tx.send_modify(|s| s.loading = false);
                        }
                    }
                }
            }
        });

        let clock_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if clock_tx.send(Local::now()).is_err() {
                    break;
                }
            }
        });

        Self {
            snapshot_rx,
            clock_rx,
            alive,
            shutdown,
            clock_handle,
        }
    }

    /// Snapshot changes as a stream, current value first.
    pub fn updates(&self) -> WatchStream<Snapshot<R>> {
        WatchStream::new(self.snapshot_rx.clone())
    }
}

impl<R> RefreshScheduler<R> {
    /// Current snapshot without waiting for a change.
    pub fn snapshot(&self) -> Snapshot<R> {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch-style subscription to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<R>> {
        self.snapshot_rx.clone()
    }

    /// The live display clock, ticking once a second.
    pub fn clock(&self) -> watch::Receiver<DateTime<Local>> {
        self.clock_rx.clone()
    }

    /// Stop both timers. Teardown happens in `Drop`, so an un-stopped
    /// scheduler going out of scope cannot leak its timers either.
    pub fn stop(self) {}

    fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        // notify_one stores a permit, so the poll task wakes even if it
        // is not parked on the ticker yet
        self.shutdown.notify_one();
        self.clock_handle.abort();
    }
}

impl<R> Drop for RefreshScheduler<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
