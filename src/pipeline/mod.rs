//! Address resolution pipeline
//!
//! This module implements the concurrent producer -> resolver -> aggregator
//! pipeline. A single feeder thread reads addresses from the source into a
//! bounded work queue; a fixed-size pool of worker threads pulls from the
//! queue, calls the geocoding backend with no lock held across the network
//! call, and pushes outcomes onto an output channel; the calling thread
//! drains the output channel into the centroid accumulator.
//!
//! # Architecture
//!
//! ```text
//! AddressSource --> [bounded work queue] --> worker 0..W --> [outcome channel] --> aggregator
//! ```
//!
//! Data flows strictly forward. The bounded work queue provides
//! backpressure against large address lists; the worker count bounds
//! concurrent geocode calls. No ordering is preserved between outcomes:
//! the centroid accumulation is permutation-invariant, so results are
//! folded in whatever order they arrive.
//!
//! # Lifecycle
//!
//! `Pipeline::run` returns only after the feeder and every worker have been
//! joined; neither completion nor cancellation leaks a running thread.

pub mod cancel;

pub use cancel::CancelToken;

use crate::centroid::{CentroidAccumulator, CentroidError};
use crate::coord::Coordinate;
use crate::geocode::{GeocodeError, Geocoder};
use crate::source::SourceError;
use crate::stats::aggregator::StatsAggregator;
use crate::stats::WorkerStats;
use crossbeam::channel::bounded;
use log::{debug, warn};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of resolving a single address
#[derive(Debug)]
pub enum ResolutionOutcome {
    /// The backend returned a coordinate
    Resolved(Coordinate),
    /// The backend failed; the address is excluded from the centroid
    Failed(ResolutionFailure),
}

/// A failed resolution, tagged with the originating address and its cause
#[derive(Debug)]
pub struct ResolutionFailure {
    pub address: String,
    pub error: GeocodeError,
}

/// Outcome of a full pipeline run
#[derive(Debug)]
pub struct RunSummary {
    /// Addresses read from the source
    pub addresses_read: u64,
    /// Addresses for which a geocode call completed (resolved + failed)
    pub attempted: u64,
    /// Addresses that resolved to a coordinate
    pub resolved: u64,
    /// Failed addresses with their causes
    pub failures: Vec<ResolutionFailure>,
    /// Aggregate per-call statistics across all workers
    pub stats: WorkerStats,
    /// Per-worker statistics in worker-id order
    pub per_worker: Vec<(usize, WorkerStats)>,
    /// Centroid of the resolved coordinates
    pub centroid: Result<Coordinate, CentroidError>,
    /// Error that stopped the source mid-read, if any
    pub source_error: Option<SourceError>,
    /// Whether the run was cancelled before the source was exhausted
    pub cancelled: bool,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Concurrent address resolution pipeline
///
/// Owns the shared geocoding backend and the worker-pool sizing. The same
/// pipeline value can run multiple sources, one run at a time.
pub struct Pipeline {
    geocoder: Arc<dyn Geocoder>,
    workers: usize,
    queue_capacity: usize,
}

impl Pipeline {
    /// Create a pipeline over `workers` concurrent resolver threads
    ///
    /// The work queue is bounded at twice the worker count so a huge
    /// address file cannot be slurped into memory ahead of the resolvers.
    pub fn new(geocoder: Arc<dyn Geocoder>, workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            geocoder,
            workers,
            queue_capacity: (workers * 2).max(4),
        }
    }

    /// Number of resolver threads this pipeline runs
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the pipeline over an address source until it is exhausted or
    /// cancellation is triggered
    ///
    /// Per-address geocode failures are recovered locally: they are recorded
    /// in the summary and excluded from the centroid. A mid-read source
    /// error stops feeding and is reported in the summary. All threads are
    /// joined before this method returns.
    pub fn run<S>(&self, source: S, cancel: &CancelToken) -> RunSummary
    where
        S: IntoIterator<Item = Result<String, SourceError>>,
        S::IntoIter: Send,
    {
        let start = Instant::now();
        let source = source.into_iter();

        let (work_tx, work_rx) = bounded::<String>(self.queue_capacity);
        let (out_tx, out_rx) = bounded::<ResolutionOutcome>(self.queue_capacity);

        let mut aggregator = StatsAggregator::new();
        let mut accumulator = CentroidAccumulator::new();
        let mut failures = Vec::new();
        let mut addresses_read = 0u64;
        let mut source_error = None;

        thread::scope(|scope| {
            let feeder = scope.spawn(move || {
                let mut read = 0u64;
                let mut error = None;
                for item in source {
                    if cancel.is_cancelled() {
                        debug!("feeder stopping: cancellation requested");
                        break;
                    }
                    match item {
                        Ok(address) => {
                            read += 1;
                            // send fails only when every worker has exited
                            if work_tx.send(address).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            error = Some(e);
                            break;
                        }
                    }
                }
                (read, error)
            });

            let mut handles = Vec::with_capacity(self.workers);
            for id in 0..self.workers {
                let work_rx = work_rx.clone();
                let out_tx = out_tx.clone();
                let geocoder = Arc::clone(&self.geocoder);
                handles.push(scope.spawn(move || {
                    let mut stats = WorkerStats::new();
                    loop {
                        if cancel.is_cancelled() {
                            debug!("worker {} stopping: cancellation requested", id);
                            break;
                        }
                        let address = match work_rx.recv() {
                            Ok(address) => address,
                            Err(_) => break,
                        };

                        let call_start = Instant::now();
                        let outcome = match geocoder.geocode(&address) {
                            Ok(coord) => {
                                stats.record_resolved(call_start.elapsed());
                                ResolutionOutcome::Resolved(coord)
                            }
                            Err(error) => {
                                stats.record_failed(call_start.elapsed());
                                warn!("failed to resolve '{}': {}", address, error);
                                ResolutionOutcome::Failed(ResolutionFailure { address, error })
                            }
                        };
                        if out_tx.send(outcome).is_err() {
                            break;
                        }
                    }
                    (id, stats)
                }));
            }

            // The feeder owns the only work sender; dropping these clones
            // here lets worker recv() disconnect once it finishes, and lets
            // out_rx disconnect once every worker exits.
            drop(work_rx);
            drop(out_tx);

            for outcome in out_rx.iter() {
                match outcome {
                    ResolutionOutcome::Resolved(coord) => accumulator.add(coord),
                    ResolutionOutcome::Failed(failure) => failures.push(failure),
                }
            }

            for handle in handles {
                let (id, stats) = handle.join().expect("worker thread panicked");
                aggregator.add_worker(id, stats);
            }
            let (read, error) = feeder.join().expect("feeder thread panicked");
            addresses_read = read;
            source_error = error;
        });

        let stats = aggregator.aggregate();
        let per_worker = aggregator
            .worker_ids()
            .into_iter()
            .filter_map(|id| aggregator.worker_stats(id).map(|s| (id, s.clone())))
            .collect();
        RunSummary {
            addresses_read,
            attempted: stats.attempted(),
            resolved: stats.resolved(),
            failures,
            centroid: accumulator.finish(),
            stats,
            per_worker,
            source_error,
            cancelled: cancel.is_cancelled(),
            elapsed: start.elapsed(),
        }
    }
}
