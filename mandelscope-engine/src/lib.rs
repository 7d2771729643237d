//! Parallel render engine for the Mandelbrot explorer.
//!
//! A fixed pool of worker threads computes row ranges of each frame;
//! results travel back over a channel and are staged into a private
//! buffer that replaces the displayed raster only once the pass is
//! complete. Pan/zoom input gets an immediate affine preview of the
//! cached raster while the authoritative recompute is in flight.

pub mod compositor;
pub mod config;
pub mod controller;
pub mod error;
pub mod framebuffer;
pub mod pass;
pub mod pool;
pub mod worker;

pub use compositor::Compositor;
pub use config::ExplorerConfig;
pub use controller::{Action, Explorer, HudInfo};
pub use error::EngineError;
pub use framebuffer::FrameBuffer;
pub use pass::PassTracker;
pub use pool::RenderPool;
pub use worker::render_rows;
