use anyhow::{Context, Result};
use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use tile_engine::grid::GRID_SIDE;
use tile_engine::{FullscreenPanel, MoveHistory, Position, Renderer};

use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Exit,
}

/// Viewer state driven by key presses; owns the renderer and decides when to repaint.
pub struct ViewerState {
    panel: FullscreenPanel,
    scene: Scene,
    history: MoveHistory,
    chip: Position,
    show_history: bool,
    show_labels: bool,
    needs_full_redraw: bool,
}

impl ViewerState {
    pub fn new(panel: FullscreenPanel, scene: Scene) -> Self {
        let mut history = MoveHistory::new();
        for &pos in &scene.chip_history {
            history.record(pos);
        }
        let chip = scene.chip;
        Self {
            panel,
            scene,
            history,
            chip,
            show_history: true,
            show_labels: true,
            needs_full_redraw: true,
        }
    }

    pub fn chip(&self) -> Position {
        self.chip
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn frame_size(&self) -> (u32, u32) {
        let size = self.panel.layers().size();
        (size.width, size.height)
    }

    pub fn handle_key(&mut self, key: VirtualKeyCode) -> KeyAction {
        match key {
            VirtualKeyCode::Escape => return KeyAction::Exit,
            VirtualKeyCode::Left => self.move_chip(-1, 0),
            VirtualKeyCode::Right => self.move_chip(1, 0),
            VirtualKeyCode::Up => self.move_chip(0, -1),
            VirtualKeyCode::Down => self.move_chip(0, 1),
            VirtualKeyCode::Back => {
                if let Some(previous) = self.history.last() {
                    self.history.rewind(1);
                    self.chip = previous;
                }
            }
            VirtualKeyCode::B => {
                let show_bg = !self.panel.show_bg();
                self.panel.set_show_bg(show_bg);
                self.needs_full_redraw = true;
                info!(show_bg, "toggled background peek");
            }
            VirtualKeyCode::H => self.show_history = !self.show_history,
            VirtualKeyCode::N => self.show_labels = !self.show_labels,
            _ => {}
        }
        KeyAction::None
    }

    fn move_chip(&mut self, dx: i32, dy: i32) {
        let x = self.chip.x as i32 + dx;
        let y = self.chip.y as i32 + dy;
        if !(0..GRID_SIDE as i32).contains(&x) || !(0..GRID_SIDE as i32).contains(&y) {
            return;
        }
        self.history.record(self.chip);
        self.chip = Position::new(x as u32, y as u32);
        debug!(chip = ?self.chip, "chip moved");
    }

    /// Bring layers up to date, draw this frame's overlay, and composite into `frame` (RGBA).
    pub fn render_into(&mut self, frame: &mut [u8]) {
        let from_scratch = std::mem::take(&mut self.needs_full_redraw);
        if self.panel.redraw(self.scene.level.as_ref(), from_scratch).is_none() {
            debug!("no level data, keeping previous layers");
        }

        let mut overlay = self.panel.layers().new_overlay();
        self.panel
            .draw_button_connections(&self.scene.connections, &mut overlay);
        if self.show_history {
            self.panel
                .draw_chip_history(&self.history, self.chip, &mut overlay);
        }
        if self.show_labels {
            self.panel.draw_monster_list(&self.scene.monsters, &mut overlay);
            self.panel.draw_slip_list(&self.scene.slips, &mut overlay);
        }

        let screen = self.panel.layers().composite(Some(&overlay));
        if frame.len() == screen.frame().len() {
            frame.copy_from_slice(screen.frame());
        } else {
            warn!(
                expected = screen.frame().len(),
                actual = frame.len(),
                "frame buffer size mismatch, skipping present"
            );
        }
    }
}

pub fn run(title: &str, mut state: ViewerState) -> Result<()> {
    let (width, height) = state.frame_size();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)
        .context("creating window")?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels = Pixels::new(width, height, surface_texture).context("creating pixel surface")?;

    info!(width, height, "viewer started");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        warn!("resize failed: {err}");
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    if state.handle_key(*key) == KeyAction::Exit {
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                state.render_into(pixels.frame_mut());
                if let Err(err) = pixels.render() {
                    warn!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
