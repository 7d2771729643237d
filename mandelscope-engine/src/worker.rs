//! The worker side of the render pool: receive a job, color its rows,
//! reply with the whole batch.

use crate::pass::PassTracker;
use crossbeam_channel::{Receiver, Sender};
use log::debug;
use mandelscope_core::{
    color_for, escape_iterations, pixel_to_complex, RenderJob, RowResult, WorkerReply,
};

/// Compute every row of a job's range, columns left to right.
///
/// Pure with respect to the job: the same job always yields identical
/// pixels, which is what makes row partitioning invisible in the output.
pub fn render_rows(job: &RenderJob) -> Vec<RowResult> {
    (job.row_start..job.row_end)
        .map(|row| render_row(job, row))
        .collect()
}

fn render_row(job: &RenderJob, row: u32) -> RowResult {
    let pixels = (0..job.width)
        .map(|col| {
            let (cx, cy) = pixel_to_complex(
                f64::from(col),
                f64::from(row),
                &job.viewport,
                job.width,
                job.height,
            );
            let point = escape_iterations(cx, cy, job.max_iterations);
            color_for(point.count, job.max_iterations)
        })
        .collect();
    RowResult { row, pixels }
}

/// Body of one pool thread. Runs until the job channel disconnects.
///
/// Stateless between jobs; the viewport snapshot arrives inside each job
/// and nothing is read from shared mutable state. Staleness is checked
/// between rows so a superseded pass is abandoned mid-range; the
/// dispatcher discards stale replies regardless, this just skips the dead
/// work.
pub(crate) fn worker_loop(
    worker_id: usize,
    jobs: Receiver<RenderJob>,
    replies: Sender<WorkerReply>,
    tracker: PassTracker,
) {
    for job in jobs.iter() {
        if tracker.is_stale(job.pass) {
            debug!("worker {worker_id}: skipping superseded pass {}", job.pass);
            continue;
        }

        let mut rows = Vec::with_capacity((job.row_end - job.row_start) as usize);
        let mut abandoned = false;
        for row in job.row_start..job.row_end {
            if tracker.is_stale(job.pass) {
                debug!(
                    "worker {worker_id}: abandoning pass {} at row {row}",
                    job.pass
                );
                abandoned = true;
                break;
            }
            rows.push(render_row(&job, row));
        }
        if abandoned {
            continue;
        }

        if replies
            .send(WorkerReply {
                pass: job.pass,
                rows,
            })
            .is_err()
        {
            break;
        }
    }
    debug!("worker {worker_id}: shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelscope_core::Viewport;

    fn job(row_start: u32, row_end: u32) -> RenderJob {
        RenderJob {
            pass: 1,
            viewport: Viewport::new((-0.75, 0.0), 200.0, 2000),
            width: 8,
            height: 8,
            row_start,
            row_end,
            max_iterations: 70,
        }
    }

    #[test]
    fn render_rows_covers_the_range() {
        let rows = render_rows(&job(2, 5));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[2].row, 4);
        assert!(rows.iter().all(|r| r.pixels.len() == 8));
    }

    #[test]
    fn empty_range_yields_no_rows() {
        assert!(render_rows(&job(3, 3)).is_empty());
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(render_rows(&job(0, 8)), render_rows(&job(0, 8)));
    }
}
