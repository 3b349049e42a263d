use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, info, trace, warn};

use crate::collector::ScoreCollector;
use crate::encoding::AlignmentPair;
use crate::engine::WavefrontEngine;
use crate::partition::verify_assignment;
use crate::scoring::{AlignmentScore, BatchStats};
use crate::{AlignerError, AlignerParameters};

/// Outcome of one batch: a per-pair result in submission order, plus totals.
#[derive(Debug)]
pub struct BatchResult {
    pub results: Vec<Result<AlignmentScore, AlignerError>>,
    pub stats: BatchStats,
}

impl BatchResult {
    /// Scores in submission order; `None` where the pair failed.
    pub fn scores(&self) -> Vec<Option<u32>> {
        self.results
            .iter()
            .map(|r| r.as_ref().ok().map(|s| s.score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

struct WorkItem {
    pairs: Arc<[AlignmentPair]>,
    indices: Vec<usize>,
    results: Sender<WorkResult>,
}

struct WorkResult {
    lane: usize,
    index: usize,
    result: Result<AlignmentScore, AlignerError>,
}

/// Fixed set of worker lanes, each owning its own engine.
pub struct LaneScheduler {
    params: AlignerParameters,
    work_queues: Vec<Sender<WorkItem>>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl LaneScheduler {
    pub fn new(params: AlignerParameters) -> Result<Self, AlignerError> {
        params.validate()?;
        let engine = WavefrontEngine::from_parameters(&params)?;

        let mut work_queues = Vec::with_capacity(params.lanes());
        let mut workers = Vec::with_capacity(params.lanes());
        for lane in 0..params.lanes() {
            let (work_tx, work_rx) = bounded(1);
            let engine = engine.clone();
            let worker = thread::Builder::new()
                .name(format!("lane-{lane}"))
                .spawn(move || Self::lane_worker(lane, engine, work_rx))
                .map_err(|_| AlignerError::LaneDisconnected(lane))?;
            work_queues.push(work_tx);
            workers.push(worker);
        }
        debug!(
            "started {} lanes (max_dim={}, partition={:?})",
            params.lanes(),
            params.max_dim(),
            params.partition()
        );

        Ok(Self {
            params,
            work_queues,
            workers,
        })
    }

    pub fn lanes(&self) -> usize {
        self.work_queues.len()
    }

    pub fn parameters(&self) -> &AlignerParameters {
        &self.params
    }

    fn lane_worker(lane: usize, engine: WavefrontEngine, work_rx: Receiver<WorkItem>) {
        while let Ok(work) = work_rx.recv() {
            trace!("lane {lane}: {} pairs", work.indices.len());
            for index in work.indices {
                let result = match work.pairs.get(index) {
                    Some(pair) => engine.score(pair),
                    None => Err(AlignerError::LaneAssignment(format!(
                        "lane {lane} received unknown pair {index}"
                    ))),
                };
                if work
                    .results
                    .send(WorkResult {
                        lane,
                        index,
                        result,
                    })
                    .is_err()
                {
                    // collector gave up on this batch
                    break;
                }
            }
        }
        trace!("lane {lane}: stopped");
    }

    /// Scores every pair and returns the results in input order.
    ///
    /// A pair that cannot be scored yields an `Err` in its own slot; the batch
    /// as a whole only fails when the lane bookkeeping itself breaks.
    pub fn align_batch(&mut self, pairs: Vec<AlignmentPair>) -> Result<BatchResult, AlignerError> {
        let start_time = Instant::now();
        let total = pairs.len();

        let plan = self.params.partition().assign(total, self.lanes())?;
        verify_assignment(&plan, total)?;
        self.dispatch(pairs.into(), plan, start_time)
    }

    /// Encodes raw symbol pairs and scores them. Pairs that fail to encode keep
    /// their encoder error in their slot and are not sent to any lane.
    pub fn align_sequences<T, D>(&mut self, raw: &[(T, D)]) -> Result<BatchResult, AlignerError>
    where
        T: AsRef<[u8]>,
        D: AsRef<[u8]>,
    {
        let start_time = Instant::now();
        let max_dim = self.params.max_dim();

        let mut encoded = Vec::with_capacity(raw.len());
        let mut pending: Vec<Option<AlignerError>> = Vec::with_capacity(raw.len());
        for (target, database) in raw {
            match AlignmentPair::encode(target, database, max_dim) {
                Ok(pair) => {
                    encoded.push(pair);
                    pending.push(None);
                }
                Err(e) => pending.push(Some(e)),
            }
        }

        let plan = self.params.partition().assign(encoded.len(), self.lanes())?;
        verify_assignment(&plan, encoded.len())?;
        let scored = self.dispatch(encoded.into(), plan, start_time)?;

        let mut scored = scored.results.into_iter();
        let mut stats = BatchStats::default();
        let mut results = Vec::with_capacity(raw.len());
        for slot in pending {
            let result = match slot {
                Some(e) => {
                    warn!("pair {} rejected by encoder: {e}", results.len());
                    Err(e)
                }
                None => scored.next().ok_or_else(|| {
                    AlignerError::LaneAssignment("fewer scores than encoded pairs".to_string())
                })?,
            };
            stats.record(&result);
            results.push(result);
        }
        stats.execution_time_ms = start_time.elapsed().as_secs_f32() * 1e3;

        Ok(BatchResult { results, stats })
    }

    fn dispatch(
        &mut self,
        pairs: Arc<[AlignmentPair]>,
        plan: Vec<Vec<usize>>,
        start_time: Instant,
    ) -> Result<BatchResult, AlignerError> {
        let total = pairs.len();
        debug!("dispatching {total} pairs over {} lanes", self.lanes());

        let (result_tx, result_rx) = unbounded();
        for (lane, (work_tx, indices)) in self.work_queues.iter().zip(plan).enumerate() {
            if indices.is_empty() {
                continue;
            }
            work_tx
                .send(WorkItem {
                    pairs: Arc::clone(&pairs),
                    indices,
                    results: result_tx.clone(),
                })
                .map_err(|_| AlignerError::LaneDisconnected(lane))?;
        }
        // the channel closes once every lane has dropped its sender
        drop(result_tx);

        let mut collector = ScoreCollector::new(total);
        let mut stats = BatchStats::default();
        for WorkResult {
            lane,
            index,
            result,
        } in result_rx.iter()
        {
            if let Err(e) = &result {
                warn!("pair {index} failed on lane {lane}: {e}");
            }
            stats.record(&result);
            collector.insert(index, result)?;
        }
        let results = collector.finish()?;

        stats.execution_time_ms = start_time.elapsed().as_secs_f32() * 1e3;
        info!(
            "batch done: {} pairs, {} failed, {} cells in {:.3} ms ({:.4} GCUPS)",
            stats.pairs,
            stats.failed,
            stats.cells,
            stats.execution_time_ms,
            stats.gcups()
        );

        Ok(BatchResult { results, stats })
    }
}

impl Drop for LaneScheduler {
    fn drop(&mut self) {
        // Close work channels to stop workers
        self.work_queues.clear();

        while let Some(worker) = self.workers.pop() {
            let _ = worker.join();
        }
    }
}
