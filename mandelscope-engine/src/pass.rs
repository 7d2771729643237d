use mandelscope_core::PassId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared watermark of the most recently dispatched render pass.
///
/// The dispatcher advances it when a new pass starts; workers consult it
/// to abandon jobs that have already been superseded instead of burning
/// CPU on results the dispatcher would discard anyway.
#[derive(Clone, Debug, Default)]
pub struct PassTracker {
    latest: Arc<AtomicU64>,
}

impl PassTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pass and return its id. Ids start at 1; 0 never names a
    /// real pass.
    pub fn advance(&self) -> PassId {
        self.latest.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn latest(&self) -> PassId {
        self.latest.load(Ordering::Relaxed)
    }

    pub fn is_stale(&self, pass: PassId) -> bool {
        pass != self.latest()
    }
}
