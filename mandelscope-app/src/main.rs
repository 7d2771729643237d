//! Desktop shell: a winit window with a pixels framebuffer, feeding
//! keyboard input into the explorer engine.

use log::{info, warn};
use mandelscope_core::Viewport;
use mandelscope_engine::{Action, Explorer, ExplorerConfig, HudInfo};
use pixels::{Pixels, SurfaceTexture};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const INITIAL_WIDTH: u32 = 1024;
const INITIAL_HEIGHT: u32 = 768;
const STATE_FILE: &str = ".mandelscope.json";

fn state_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(STATE_FILE))
}

fn load_saved_viewport() -> Option<Viewport> {
    let path = state_path()?;
    let text = std::fs::read_to_string(&path).ok()?;
    match parse_saved_viewport(&text) {
        Ok(viewport) => {
            info!("restored viewport from {}", path.display());
            Some(viewport)
        }
        Err(err) => {
            warn!("ignoring state file {}: {err}", path.display());
            None
        }
    }
}

/// Deserialize and re-validate a saved viewport. The file is untrusted
/// input; a zero or non-finite scale would poison every later pan step.
fn parse_saved_viewport(text: &str) -> Result<Viewport, String> {
    let raw: Viewport = serde_json::from_str(text).map_err(|err| err.to_string())?;
    Viewport::try_new(raw.center, raw.scale, raw.iteration_cap)
        .ok_or_else(|| format!("saved viewport violates invariants: {raw:?}"))
}

fn save_viewport(viewport: Viewport) {
    let Some(path) = state_path() else { return };
    match serde_json::to_string_pretty(&viewport) {
        Ok(json) => {
            if let Err(err) = std::fs::write(&path, json) {
                warn!("failed to save viewport to {}: {err}", path.display());
            }
        }
        Err(err) => warn!("failed to serialize viewport: {err}"),
    }
}

fn window_title(hud: &HudInfo) -> String {
    format!(
        "mandelscope  center ({:.6}, {:.6})  scale {:.0} px/unit  iterations {}/{}",
        hud.center.0, hud.center.1, hud.scale, hud.effective_iterations, hud.iteration_cap
    )
}

/// Map a held movement key to its action. Movement keys repeat on a
/// fixed tick while held; everything else fires per key event.
fn movement_action(key: VirtualKeyCode) -> Option<Action> {
    match key {
        VirtualKeyCode::W => Some(Action::MoveUp),
        VirtualKeyCode::S => Some(Action::MoveDown),
        VirtualKeyCode::A => Some(Action::MoveLeft),
        VirtualKeyCode::D => Some(Action::MoveRight),
        _ => None,
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("mandelscope")
        .with_inner_size(LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT))
        .build(&event_loop)
        .expect("failed to create window");

    let size = window.inner_size();
    let surface = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels =
        Pixels::new(size.width, size.height, surface).expect("failed to create pixel buffer");

    let mut explorer = Explorer::new(ExplorerConfig::default(), size.width, size.height)
        .expect("failed to start render engine");
    if let Some(saved) = load_saved_viewport() {
        if explorer.set_viewport(saved).is_err() {
            warn!("render pool unavailable while restoring saved viewport");
        }
    }

    let tick = explorer.input_tick();
    let mut held: HashSet<VirtualKeyCode> = HashSet::new();
    let mut last_tick = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    save_viewport(explorer.viewport());
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) if new_size.width > 0 && new_size.height > 0 => {
                    if pixels.resize_surface(new_size.width, new_size.height).is_err()
                        || pixels.resize_buffer(new_size.width, new_size.height).is_err()
                    {
                        warn!("failed to resize pixel buffer");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    if explorer.resize(new_size.width, new_size.height).is_err() {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(key),
                            state,
                            ..
                        },
                    ..
                } => {
                    let result = match state {
                        ElementState::Pressed => on_key_pressed(&mut explorer, &mut held, key),
                        ElementState::Released => {
                            held.remove(&key);
                            Ok(())
                        }
                    };
                    if result.is_err() {
                        warn!("render pool disconnected; exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                while last_tick.elapsed() >= tick {
                    last_tick += tick;
                    for key in held.clone() {
                        if let Some(action) = movement_action(key) {
                            if explorer.handle(action).is_err() {
                                *control_flow = ControlFlow::Exit;
                                return;
                            }
                        }
                    }
                }
                if explorer.pump() {
                    window.set_title(&window_title(&explorer.hud()));
                }
                window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                explorer.render_into(pixels.frame_mut());
                if let Err(err) = pixels.render() {
                    warn!("render failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

fn on_key_pressed(
    explorer: &mut Explorer,
    held: &mut HashSet<VirtualKeyCode>,
    key: VirtualKeyCode,
) -> Result<(), mandelscope_engine::EngineError> {
    if movement_action(key).is_some() {
        held.insert(key);
        return Ok(());
    }
    match key {
        // Zoom repeats with the OS key-repeat rate while held
        VirtualKeyCode::E => explorer.handle(Action::ZoomIn),
        VirtualKeyCode::Q => explorer.handle(Action::ZoomOut),
        // One-shot keys ignore OS key repeat
        key => match one_shot_action(key) {
            Some(action) if held.insert(key) => explorer.handle(action),
            _ => Ok(()),
        },
    }
}

/// Keys that fire once per physical press.
fn one_shot_action(key: VirtualKeyCode) -> Option<Action> {
    match key {
        VirtualKeyCode::Key1 => Some(Action::DecreaseIterationCap),
        VirtualKeyCode::Key2 => Some(Action::IncreaseIterationCap),
        VirtualKeyCode::Space => Some(Action::ForceRender),
        VirtualKeyCode::LShift | VirtualKeyCode::RShift => Some(Action::ToggleOverlay),
        _ => None,
    }
}
