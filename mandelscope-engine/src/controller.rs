//! Top-level explorer state machine: viewport, pool, and compositor
//! driven by user actions.

use crate::compositor::Compositor;
use crate::config::ExplorerConfig;
use crate::error::EngineError;
use crate::pool::RenderPool;
use log::debug;
use mandelscope_core::{effective_iterations, Viewport};

/// Discrete user intents, decoupled from any particular input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ZoomIn,
    ZoomOut,
    IncreaseIterationCap,
    DecreaseIterationCap,
    ToggleOverlay,
    ForceRender,
}

/// Snapshot of the state worth surfacing to the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudInfo {
    pub center: (f64, f64),
    pub scale: f64,
    pub iteration_cap: u32,
    pub effective_iterations: u32,
    pub overlay_visible: bool,
}

/// Glues the pieces together: every action mutates the viewport,
/// produces immediate preview feedback where one exists, and kicks off
/// an authoritative render pass.
pub struct Explorer {
    config: ExplorerConfig,
    viewport: Viewport,
    width: u32,
    height: u32,
    pool: RenderPool,
    compositor: Compositor,
    overlay_visible: bool,
}

impl Explorer {
    pub fn new(config: ExplorerConfig, width: u32, height: u32) -> Result<Self, EngineError> {
        let viewport = config.initial_viewport();
        let mut pool = RenderPool::new(config.workers, config.pass_deadline);
        pool.dispatch(viewport, width, height)?;
        Ok(Self {
            config,
            viewport,
            width,
            height,
            pool,
            compositor: Compositor::new(width, height),
            // Shown until toggled off, like the rest of the HUD
            overlay_visible: true,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hud(&self) -> HudInfo {
        HudInfo {
            center: self.viewport.center,
            scale: self.viewport.scale,
            iteration_cap: self.viewport.iteration_cap,
            effective_iterations: effective_iterations(
                self.viewport.iteration_cap,
                self.viewport.scale,
            ),
            overlay_visible: self.overlay_visible,
        }
    }

    pub fn handle(&mut self, action: Action) -> Result<(), EngineError> {
        debug!("action: {action:?}");
        let step = 1.0 / self.viewport.scale;
        match action {
            Action::MoveUp => self.pan_by(0.0, -step),
            Action::MoveDown => self.pan_by(0.0, step),
            Action::MoveLeft => self.pan_by(-step, 0.0),
            Action::MoveRight => self.pan_by(step, 0.0),
            Action::ZoomIn => self.zoom_by(self.config.zoom_factor),
            Action::ZoomOut => self.zoom_by(1.0 / self.config.zoom_factor),
            Action::IncreaseIterationCap => {
                self.viewport.increase_cap(self.config.cap_step);
                self.dispatch()
            }
            Action::DecreaseIterationCap => {
                self.viewport.decrease_cap(self.config.cap_step);
                self.dispatch()
            }
            Action::ToggleOverlay => {
                self.overlay_visible = !self.overlay_visible;
                Ok(())
            }
            Action::ForceRender => self.dispatch(),
        }
    }

    fn pan_by(&mut self, dx: f64, dy: f64) -> Result<(), EngineError> {
        self.viewport.pan(dx, dy);
        // Moving the viewport one way slides the imagery the other way.
        self.compositor
            .preview(-dx, -dy, 1.0, self.viewport.scale);
        self.dispatch()
    }

    fn zoom_by(&mut self, factor: f64) -> Result<(), EngineError> {
        // Stretch about the frame center: after scaling about the origin
        // by `factor`, shift so the center pixel stays put. Expressed in
        // plane units at the pre-zoom scale.
        let tx = f64::from(self.width) * (1.0 - factor) / (2.0 * self.viewport.scale);
        let ty = f64::from(self.height) * (1.0 - factor) / (2.0 * self.viewport.scale);
        self.compositor.preview(tx, ty, factor, self.viewport.scale);
        self.viewport.zoom_by(factor);
        self.dispatch()
    }

    fn dispatch(&mut self) -> Result<(), EngineError> {
        self.pool.dispatch(self.viewport, self.width, self.height)?;
        Ok(())
    }

    /// Collect finished render work. Call once per frame from the event
    /// loop; returns true when a new frame was committed.
    pub fn pump(&mut self) -> bool {
        match self.pool.poll() {
            Some(frame) => {
                self.compositor.commit(frame);
                true
            }
            None => false,
        }
    }

    pub fn render_into(&self, out: &mut [u8]) {
        self.compositor.render_into(out, self.overlay_visible);
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        self.width = width;
        self.height = height;
        self.compositor.resize(width, height);
        self.dispatch()
    }

    /// Jump straight to a saved viewport, e.g. one restored from disk.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        self.viewport = viewport;
        self.dispatch()
    }

    pub fn input_tick(&self) -> std::time::Duration {
        self.config.input_tick
    }
}
