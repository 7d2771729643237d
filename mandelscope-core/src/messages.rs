//! Messages exchanged between the dispatcher and the render workers.
//!
//! Every job and reply carries the id of the render pass it belongs to;
//! the dispatcher compares ids on receipt and silently discards results
//! from superseded passes.

use crate::{Rgba, Viewport};
use serde::{Deserialize, Serialize};

/// Monotonically increasing render-pass identifier.
pub type PassId = u64;

/// One worker's share of a render pass: a viewport snapshot plus a
/// contiguous row range. Immutable, consumed exactly once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderJob {
    pub pass: PassId,
    pub viewport: Viewport,
    pub width: u32,
    pub height: u32,
    pub row_start: u32,
    pub row_end: u32,
    /// Iteration budget, computed once at dispatch so every range of the
    /// pass agrees on it.
    pub max_iterations: u32,
}

/// One fully colored row. Ownership transfers to the dispatcher on
/// delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    pub row: u32,
    pub pixels: Vec<Rgba>,
}

/// A worker's answer to one [`RenderJob`]: every row of its range in a
/// single message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerReply {
    pub pass: PassId,
    pub rows: Vec<RowResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_job_roundtrip() {
        let job = RenderJob {
            pass: 7,
            viewport: Viewport::new((-0.75, 0.0), 200.0, 2000),
            width: 800,
            height: 600,
            row_start: 150,
            row_end: 300,
            max_iterations: 70,
        };
        let json = serde_json::to_string(&job).unwrap();
        let parsed: RenderJob = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pass, 7);
        assert_eq!(parsed.row_start..parsed.row_end, 150..300);
        assert_eq!(parsed.viewport, job.viewport);
    }

    #[test]
    fn worker_reply_roundtrip() {
        let reply = WorkerReply {
            pass: 3,
            rows: vec![RowResult {
                row: 42,
                pixels: vec![[255, 0, 0, 255], [0, 0, 0, 255]],
            }],
        };
        let json = serde_json::to_string(&reply).unwrap();
        let parsed: WorkerReply = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pass, 3);
        assert_eq!(parsed.rows, reply.rows);
    }
}
