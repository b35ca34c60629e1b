//! Trail effect builder and frame driver.
//!
//! [`TrailEffect`] is the public entry point: configure capacity, spawn
//! interval and design, then call [`run`](TrailEffect::run). The winit app
//! it spins up is the only place that knows about scheduling; the engine
//! itself is just ticked from `RedrawRequested`.
//!
//! Configuration-change events arrive here too. A keyboard map stands in
//! for an external UI: every [`DesignChange`] variant is reachable, and each
//! one funnels through [`App::apply_change`] so the new value reaches the
//! GPU synchronously - shape changes swap the sprite texture in the same
//! call.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::Vec3;

use crate::design::{DesignChange, DesignConfig, Shape};
use crate::error::TrailError;
use crate::gpu::GpuState;
use crate::shader;
use crate::time::Clock;
use crate::trail::TrailEngine;
use crate::uniforms::TrailUniforms;

/// Default ring capacity: simultaneous particles before slots cycle.
pub const MAX_PARTICLE_COUNT: usize = 190;
/// Default spawn interval: one particle per this many milliseconds.
pub const PARTICLE_SPAWN_INTERVAL_MS: f32 = 100.0;

/// Builder for the interactive trail effect.
///
/// # Example
///
/// ```ignore
/// use wisp::prelude::*;
///
/// TrailEffect::new()
///     .with_capacity(256)
///     .with_design(DesignConfig {
///         effect_beat: 0.3,
///         ..Default::default()
///     })
///     .run()?;
/// ```
pub struct TrailEffect {
    capacity: usize,
    spawn_interval_ms: f32,
    design: DesignConfig,
}

impl TrailEffect {
    /// Create an effect with the default tunables.
    pub fn new() -> Self {
        Self {
            capacity: MAX_PARTICLE_COUNT,
            spawn_interval_ms: PARTICLE_SPAWN_INTERVAL_MS,
            design: DesignConfig::default(),
        }
    }

    /// Set the ring capacity (maximum simultaneous particles).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the spawn interval in milliseconds per particle.
    pub fn with_spawn_interval_ms(mut self, interval_ms: f32) -> Self {
        self.spawn_interval_ms = interval_ms;
        self
    }

    /// Set the initial design configuration.
    pub fn with_design(mut self, design: DesignConfig) -> Self {
        self.design = design;
        self
    }

    /// Open the window and run until it closes.
    pub fn run(self) -> Result<(), TrailError> {
        let engine = TrailEngine::new(self.capacity, self.spawn_interval_ms);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(engine, self.design);
        event_loop.run_app(&mut app)?;

        match app.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for TrailEffect {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    engine: TrailEngine,
    design: DesignConfig,
    clock: Clock,
    /// Pointer currently providing activity; gates spawning entirely.
    pointer_active: bool,
    /// Set on the inactive-to-active transition, consumed by one tick.
    pending_reset: bool,
    /// Left button held: cursor movement orbits the camera.
    orbit_dragging: bool,
    last_cursor_pos: Option<(f64, f64)>,
    init_error: Option<TrailError>,
}

impl App {
    fn new(engine: TrailEngine, design: DesignConfig) -> Self {
        Self {
            window: None,
            gpu: None,
            engine,
            design,
            clock: Clock::new(),
            pointer_active: false,
            pending_reset: false,
            orbit_dragging: false,
            last_cursor_pos: None,
            init_error: None,
        }
    }

    /// Note pointer activity; a resume schedules one reset tick so the idle
    /// gap does not burst-spawn.
    fn mark_pointer_activity(&mut self) {
        if !self.pointer_active {
            self.pointer_active = true;
            self.pending_reset = true;
        }
    }

    /// Apply one configuration change and push it to the GPU synchronously.
    fn apply_change(&mut self, change: DesignChange) {
        let shape_changed = self.design.apply(change);
        if let Some(gpu) = &mut self.gpu {
            if shape_changed {
                gpu.set_sprite(&self.design.shape.texture());
            }
            let uniforms = TrailUniforms::new(
                &self.design,
                gpu.view_proj(),
                self.clock.elapsed(),
                gpu.resolution(),
            );
            gpu.write_uniforms(&uniforms);
        }
    }

    /// Map a key press to a configuration change, UI-style: number keys pick
    /// shapes, letter pairs nudge one scalar up or down.
    fn change_for_key(&self, key: KeyCode) -> Option<DesignChange> {
        let d = &self.design;
        Some(match key {
            KeyCode::Digit1 => DesignChange::Shape(Shape::Circular),
            KeyCode::Digit2 => DesignChange::Shape(Shape::Angular),
            KeyCode::Digit3 => DesignChange::Shape(Shape::Clouds),
            KeyCode::Digit4 => DesignChange::Shape(Shape::Abstract),

            KeyCode::KeyQ => DesignChange::BaseSize(d.base_size + 50.0),
            KeyCode::KeyA => DesignChange::BaseSize(d.base_size - 50.0),
            KeyCode::KeyW => DesignChange::ShapeRandSize(d.shape_rand_size + 0.1),
            KeyCode::KeyS => DesignChange::ShapeRandSize(d.shape_rand_size - 0.1),
            KeyCode::KeyE => DesignChange::ShapeRandProportions(d.shape_rand_proportions + 0.1),
            KeyCode::KeyD => DesignChange::ShapeRandProportions(d.shape_rand_proportions - 0.1),

            KeyCode::KeyR => DesignChange::ColorRandH(d.color_rand_h + 0.1),
            KeyCode::KeyF => DesignChange::ColorRandH(d.color_rand_h - 0.1),
            KeyCode::KeyT => DesignChange::ColorRandS(d.color_rand_s + 0.1),
            KeyCode::KeyG => DesignChange::ColorRandS(d.color_rand_s - 0.1),
            KeyCode::KeyY => DesignChange::ColorRandL(d.color_rand_l + 0.1),
            KeyCode::KeyH => DesignChange::ColorRandL(d.color_rand_l - 0.1),

            KeyCode::KeyU => DesignChange::EffectScaleOut(d.effect_scale_out + 0.1),
            KeyCode::KeyJ => DesignChange::EffectScaleOut(d.effect_scale_out - 0.1),
            KeyCode::KeyI => DesignChange::EffectBeat(d.effect_beat + 0.1),
            KeyCode::KeyK => DesignChange::EffectBeat(d.effect_beat - 0.1),
            KeyCode::KeyO => DesignChange::EffectSpread(d.effect_spread + 0.1),
            KeyCode::KeyL => DesignChange::EffectSpread(d.effect_spread - 0.1),
            KeyCode::KeyP => DesignChange::EffectSpiral(d.effect_spiral + 0.1),
            KeyCode::Semicolon => DesignChange::EffectSpiral(d.effect_spiral - 0.1),

            KeyCode::KeyC => {
                // Cycle through a few base colors.
                let presets = [
                    Vec3::splat(0.867),
                    Vec3::new(0.9, 0.4, 0.3),
                    Vec3::new(0.3, 0.7, 0.9),
                    Vec3::new(0.6, 0.9, 0.4),
                ];
                let next = presets
                    .iter()
                    .position(|&c| (c - d.color).length() < 1e-3)
                    .map(|i| presets[(i + 1) % presets.len()])
                    .unwrap_or(presets[0]);
                DesignChange::Color(next)
            }
            _ => return None,
        })
    }

    /// One frame: advance the clock, tick the engine if the pointer is
    /// active, upload dirty attributes, write uniforms, draw.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (now, delta_ms) = self.clock.update();

        if self.pointer_active {
            let reset = std::mem::take(&mut self.pending_reset);
            self.engine.tick(now, delta_ms, reset);
        }

        if let Some(gpu) = &mut self.gpu {
            gpu.upload_particles(self.engine.ring_mut());

            let uniforms =
                TrailUniforms::new(&self.design, gpu.view_proj(), now, gpu.resolution());
            gpu.write_uniforms(&uniforms);

            match gpu.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                }),
                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                Err(e) => eprintln!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("wisp - particle trails")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.init_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let gpu = pollster::block_on(GpuState::new(
            window,
            self.engine.ring(),
            &self.design.shape.texture(),
            &shader::render_shader(),
        ));
        match gpu {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.init_error = Some(e.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(change) = self.change_for_key(key) {
                    self.apply_change(change);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.orbit_dragging = state == ElementState::Pressed;
                    if !self.orbit_dragging {
                        self.last_cursor_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mark_pointer_activity();

                if self.orbit_dragging {
                    if let Some((last_x, last_y)) = self.last_cursor_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;

                        if let Some(gpu) = &mut self.gpu {
                            gpu.camera.yaw -= dx as f32 * 0.005;
                            gpu.camera.pitch += dy as f32 * 0.005;
                            gpu.camera.pitch = gpu.camera.pitch.clamp(-1.5, 1.5);
                        }
                    }
                    self.last_cursor_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer_active = false;
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => self.mark_pointer_activity(),
                TouchPhase::Ended | TouchPhase::Cancelled => self.pointer_active = false,
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu) = &mut self.gpu {
                    gpu.camera.distance -= scroll * 0.3;
                    gpu.camera.distance = gpu.camera.distance.clamp(1.0, 40.0);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }
}
