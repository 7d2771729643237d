//! Fixed-size worker pool and render-pass dispatcher.

use crate::error::EngineError;
use crate::framebuffer::FrameBuffer;
use crate::pass::PassTracker;
use crate::worker::worker_loop;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use mandelscope_core::{
    effective_iterations, row_ranges, PassId, RenderJob, Viewport, WorkerReply,
};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// State of the render pass currently in flight: its private staging
/// buffer plus the number of row ranges still outstanding.
struct PendingPass {
    pass: PassId,
    staging: FrameBuffer,
    outstanding: usize,
    started: Instant,
}

/// Owns the worker threads and coordinates render passes over them.
///
/// Dispatch and collection are both non-blocking: `dispatch` queues jobs
/// and returns, `poll` drains whatever replies have arrived. The caller
/// keeps pumping `poll` from its event loop; a completed frame comes back
/// exactly once per pass.
pub struct RenderPool {
    job_tx: Option<Sender<RenderJob>>,
    reply_rx: Receiver<WorkerReply>,
    tracker: PassTracker,
    handles: Vec<JoinHandle<()>>,
    pending: Option<PendingPass>,
    deadline: Duration,
}

impl RenderPool {
    /// Spawn `workers` persistent threads (hardware concurrency when
    /// `None`). The pool size is fixed for the life of the pool.
    pub fn new(workers: Option<usize>, deadline: Duration) -> Self {
        let worker_count = workers.unwrap_or_else(num_cpus::get).max(1);
        let (job_tx, job_rx) = unbounded::<RenderJob>();
        let (reply_tx, reply_rx) = unbounded::<WorkerReply>();
        let tracker = PassTracker::new();

        let handles = (0..worker_count)
            .map(|id| {
                let jobs = job_rx.clone();
                let replies = reply_tx.clone();
                let tracker = tracker.clone();
                std::thread::Builder::new()
                    .name(format!("render-worker-{id}"))
                    .spawn(move || worker_loop(id, jobs, replies, tracker))
                    .expect("failed to spawn render worker thread")
            })
            .collect();

        info!("render pool started with {worker_count} workers");
        Self {
            job_tx: Some(job_tx),
            reply_rx,
            tracker,
            handles,
            pending: None,
            deadline,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Id of the in-flight pass, if any.
    pub fn current_pass(&self) -> Option<PassId> {
        self.pending.as_ref().map(|p| p.pass)
    }

    /// Start an authoritative recompute of the whole frame.
    ///
    /// Supersedes any in-flight pass: its staging buffer is dropped here
    /// and its late replies are discarded by `poll`. The viewport is
    /// snapshotted into every job; later mutations cannot corrupt this
    /// pass.
    pub fn dispatch(
        &mut self,
        viewport: Viewport,
        width: u32,
        height: u32,
    ) -> Result<PassId, EngineError> {
        let pass = self.tracker.advance();
        let max_iterations = effective_iterations(viewport.iteration_cap, viewport.scale);
        let ranges = row_ranges(height, self.worker_count());

        if let Some(old) = self.pending.take() {
            debug!("pass {pass} supersedes incomplete pass {}", old.pass);
        }

        let job_tx = self.job_tx.as_ref().ok_or(EngineError::PoolDisconnected)?;
        for range in &ranges {
            let job = RenderJob {
                pass,
                viewport,
                width,
                height,
                row_start: range.start,
                row_end: range.end,
                max_iterations,
            };
            job_tx.send(job).map_err(|_| EngineError::PoolDisconnected)?;
        }

        debug!(
            "pass {pass}: {}x{height} in {} row ranges, {max_iterations} max iterations",
            width,
            ranges.len()
        );
        self.pending = Some(PendingPass {
            pass,
            staging: FrameBuffer::new(width, height),
            outstanding: ranges.len(),
            started: Instant::now(),
        });
        Ok(pass)
    }

    /// Drain worker replies without blocking. Returns the finished frame
    /// once every row range of the current pass has been received (or the
    /// pass deadline expired, in which case missing rows keep the interior
    /// color and a warning is logged).
    pub fn poll(&mut self) -> Option<FrameBuffer> {
        while let Ok(reply) = self.reply_rx.try_recv() {
            let Some(pending) = self.pending.as_mut() else {
                debug!("discarding reply for retired pass {}", reply.pass);
                continue;
            };
            if reply.pass != pending.pass {
                debug!(
                    "discarding stale reply for pass {} (current {})",
                    reply.pass, pending.pass
                );
                continue;
            }
            for row in &reply.rows {
                pending.staging.write_row(row.row, &row.pixels);
            }
            pending.outstanding -= 1;
        }

        match self.pending.take() {
            Some(done) if done.outstanding == 0 => {
                debug!(
                    "pass {} complete in {:.1}ms",
                    done.pass,
                    done.started.elapsed().as_secs_f64() * 1000.0
                );
                Some(done.staging)
            }
            Some(stalled) if stalled.started.elapsed() >= self.deadline => {
                warn!(
                    "pass {} exceeded deadline with {} ranges outstanding; \
                     committing with fallback rows",
                    stalled.pass, stalled.outstanding
                );
                Some(stalled.staging)
            }
            other => {
                self.pending = other;
                None
            }
        }
    }
}

impl Drop for RenderPool {
    fn drop(&mut self) {
        // Disconnect the job channel so the worker loops run off the end
        self.job_tx.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
