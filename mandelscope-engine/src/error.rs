use thiserror::Error;

/// Errors the render engine can surface to its caller. None of these are
/// fatal to the process; the shell decides whether to retry or quit.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Every worker thread has exited and the job channel is closed.
    #[error("render worker pool disconnected")]
    PoolDisconnected,
}
