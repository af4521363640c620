//! The frame loop.
//!
//! [`Renderer`] owns every piece of per-frame state: the surface, the event
//! bus, the swapchain, the camera, the pipeline, the frame scheduler and the
//! loaded models. Each call to [`Renderer::step`]:
//!
//! 1. polls the surface and dispatches its events,
//! 2. applies a pending resize and the held movement keys,
//! 3. asks the scheduler whether the frame budget has elapsed,
//! 4. clears the back buffer, draws every model and presents.
//!
//! Input listeners only record what happened into shared slots. The camera
//! reads those slots between polling and drawing.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use log::{debug, info};

use crate::camera::{Camera, CameraMovement};
use crate::config::RendererConfig;
use crate::error::{Error, Result};
use crate::events::{
    EventBus, Key, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind, WindowEventKind,
};
use crate::light::DirectionalLight;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::{FrameScheduler, Pipeline, Swapchain};
use crate::surface::{self, Surface};

/// Input collected by the event listeners since the last frame.
#[derive(Debug, Default)]
struct InputState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    /// A mouse button is held, so cursor motion turns the camera.
    looking: bool,
    last_cursor: Option<(i32, i32)>,
    /// Accumulated (x, y) offset in pixels, y positive upward.
    look_delta: (f32, f32),
}

impl InputState {
    fn set_key(&mut self, key: Key, held: bool) {
        match key {
            Key::W => self.forward = held,
            Key::S => self.backward = held,
            Key::A => self.left = held,
            Key::D => self.right = held,
            Key::Escape | Key::Other => {}
        }
    }

    fn cursor_moved(&mut self, x: i32, y: i32) {
        if let (true, Some((last_x, last_y))) = (self.looking, self.last_cursor) {
            self.look_delta.0 += (x - last_x) as f32;
            self.look_delta.1 += (last_y - y) as f32;
        }
        self.last_cursor = Some((x, y));
    }
}

pub struct Renderer<S: Surface = Box<dyn Surface>> {
    config: RendererConfig,
    surface: S,
    events: EventBus,
    swapchain: Swapchain,
    camera: Camera,
    pipeline: Pipeline,
    scheduler: FrameScheduler,
    models: Vec<Model>,
    running: Rc<Cell<bool>>,
    input: Rc<RefCell<InputState>>,
    frames_rendered: u64,
    last_update: Option<Instant>,
}

impl Renderer {
    /// Validates `config` and opens the surface it names.
    pub fn new(config: RendererConfig) -> Result<Self> {
        config.validate()?;
        let surface = surface::create(&config)?;
        Self::with_surface(config, surface)
    }
}

impl<S: Surface> Renderer<S> {
    /// Builds a renderer that presents to an existing surface.
    ///
    /// The swapchain takes the surface's current size.
    pub fn with_surface(config: RendererConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let (width, height) = surface.size();
        let to_i32 = |v: u32| {
            i32::try_from(v).map_err(|_| {
                Error::InvalidConfig(format!("surface size {width}x{height} is too large"))
            })
        };

        let mut swapchain = Swapchain::new(to_i32(width)?, to_i32(height)?)?;
        swapchain.set_clear_color(config.clear_color, config.clear_alpha);

        let pipeline = Pipeline::new(
            Projection::from_degrees(
                config.fov_y,
                config.aspect_ratio(),
                config.z_near,
                config.z_far,
            ),
            DirectionalLight::new(config.light_direction),
            config.render_mode,
        );

        let mut renderer = Self {
            camera: Camera::new(config.camera_position),
            scheduler: FrameScheduler::new(config.target_fps),
            config,
            surface,
            events: EventBus::new(),
            swapchain,
            pipeline,
            models: Vec::new(),
            running: Rc::new(Cell::new(true)),
            input: Rc::new(RefCell::new(InputState::default())),
            frames_rendered: 0,
            last_update: None,
        };
        renderer.subscribe();
        info!("Renderer ready: {width}x{height}, target fps {}", renderer.config.target_fps);
        Ok(renderer)
    }

    fn subscribe(&mut self) {
        self.swapchain.subscribe(&mut self.events);

        let running = Rc::clone(&self.running);
        self.events.window.add_listener(WindowEventKind::Close, move |_| {
            running.set(false);
            false
        });

        let running = Rc::clone(&self.running);
        let input = Rc::clone(&self.input);
        self.events.keyboard.add_listener(KeyEventKind::Down, move |event| {
            if let KeyEvent::Down(key) = *event {
                if key == Key::Escape {
                    running.set(false);
                }
                input.borrow_mut().set_key(key, true);
            }
            false
        });

        let input = Rc::clone(&self.input);
        self.events.keyboard.add_listener(KeyEventKind::Up, move |event| {
            if let KeyEvent::Up(key) = *event {
                input.borrow_mut().set_key(key, false);
            }
            false
        });

        let input = Rc::clone(&self.input);
        self.events.mouse.add_listener(MouseEventKind::ButtonDown, move |_| {
            input.borrow_mut().looking = true;
            false
        });

        let input = Rc::clone(&self.input);
        self.events.mouse.add_listener(MouseEventKind::ButtonUp, move |_| {
            input.borrow_mut().looking = false;
            false
        });

        let input = Rc::clone(&self.input);
        self.events.mouse.add_listener(MouseEventKind::Moved, move |event| {
            if let MouseEvent::Moved { x, y } = *event {
                input.borrow_mut().cursor_moved(x, y);
            }
            false
        });
    }

    /// Loads an OBJ file, tints it with the configured mesh color and adds it.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<&mut Model> {
        let mut model = Model::load(path)?;
        model.set_color(self.config.mesh_color);
        Ok(self.add_model(model))
    }

    pub fn add_model(&mut self, model: Model) -> &mut Model {
        debug!("Added model {} ({} triangles)", model.name(), model.triangle_count());
        self.models.push(model);
        let last = self.models.len() - 1;
        &mut self.models[last]
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The bus the surface events are dispatched through. Extra listeners may
    /// be added here; they run after the renderer's own.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    pub fn swapchain(&self) -> &Swapchain {
        &self.swapchain
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&mut self) {
        self.running.set(false);
    }

    /// Runs one loop iteration. Returns `true` if a frame was drawn and presented.
    pub fn step(&mut self) -> Result<bool> {
        self.advance(Instant::now(), Instant::now)
    }

    /// Like [`step`](Self::step), with `now` used as both the start and the end
    /// of the frame.
    pub fn step_at(&mut self, now: Instant) -> Result<bool> {
        self.advance(now, || now)
    }

    fn advance(&mut self, now: Instant, frame_end: impl FnOnce() -> Instant) -> Result<bool> {
        self.surface.poll_events(&mut self.events);
        self.swapchain.apply_pending_resize()?;

        let delta_time = self
            .last_update
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_update = Some(now);
        self.apply_input(delta_time);

        if !self.running.get() || !self.scheduler.should_render(now) {
            return Ok(false);
        }

        self.scheduler.begin_frame(now);
        self.render_frame()?;
        self.scheduler.end_frame(frame_end());
        Ok(true)
    }

    /// Steps until the loop is stopped or `max_frames` frames have been drawn.
    ///
    /// Returns the number of frames drawn by this call.
    pub fn run(&mut self, max_frames: Option<u64>) -> Result<u64> {
        let start = self.frames_rendered;
        while self.running.get() {
            if max_frames.is_some_and(|max| self.frames_rendered - start >= max) {
                break;
            }
            self.step()?;
        }
        let drawn = self.frames_rendered - start;
        info!("Stopped after {drawn} frames");
        Ok(drawn)
    }

    fn apply_input(&mut self, delta_time: f32) {
        let mut input = self.input.borrow_mut();
        let held = [
            (input.forward, CameraMovement::Forward),
            (input.backward, CameraMovement::Backward),
            (input.left, CameraMovement::Left),
            (input.right, CameraMovement::Right),
        ];
        for (_, movement) in held.into_iter().filter(|(down, _)| *down) {
            self.camera.process_key_input(movement, delta_time);
        }

        let (x_offset, y_offset) = std::mem::take(&mut input.look_delta);
        if x_offset != 0.0 || y_offset != 0.0 {
            self.camera.process_mouse_input(x_offset, y_offset);
        }
    }

    fn render_frame(&mut self) -> Result<()> {
        let view = self.camera.view_matrix();

        self.swapchain.clear_back_buffer();
        let target = self.swapchain.back_buffer_mut();
        let triangles: usize = self
            .models
            .iter()
            .map(|model| self.pipeline.draw_model(model, &view, target))
            .sum();
        self.swapchain.set_backbuffer_complete(true);

        self.swapchain.present(&mut self.surface, self.config.double_buffer)?;
        self.frames_rendered += 1;
        debug!("Frame {}: {triangles} triangles", self.frames_rendered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceKind;
    use crate::events::{MouseButton, WindowEvent};
    use crate::surface::HeadlessSurface;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn renderer() -> Renderer<HeadlessSurface> {
        let config = RendererConfig {
            width: 32,
            height: 24,
            surface: SurfaceKind::Headless,
            ..Default::default()
        };
        Renderer::with_surface(config, HeadlessSurface::new(32, 24)).unwrap()
    }

    #[test]
    fn step_presents_a_frame() {
        let mut renderer = renderer();
        assert!(renderer.step().unwrap());
        assert_eq!(renderer.frames_rendered(), 1);
        assert_eq!(renderer.surface().present_count(), 1);
        assert_eq!(renderer.surface().last_frame().unwrap().width(), 32);
    }

    #[test]
    fn close_event_stops_the_loop() {
        let mut renderer = renderer();
        renderer.surface_mut().push_event(WindowEvent::Close);
        assert!(!renderer.step().unwrap());
        assert!(!renderer.is_running());
        assert_eq!(renderer.run(Some(10)).unwrap(), 0);
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut renderer = renderer();
        renderer.surface_mut().push_event(KeyEvent::Down(Key::Escape));
        renderer.step().unwrap();
        assert!(!renderer.is_running());
    }

    #[test]
    fn run_honours_the_frame_limit() {
        let mut renderer = renderer();
        assert_eq!(renderer.run(Some(3)).unwrap(), 3);
        assert_eq!(renderer.surface().present_count(), 3);
    }

    #[test]
    fn held_key_moves_the_camera_by_elapsed_time() {
        let mut renderer = renderer();
        let t0 = Instant::now();
        renderer.step_at(t0).unwrap();

        renderer.surface_mut().push_event(KeyEvent::Down(Key::W));
        renderer.step_at(t0 + Duration::from_secs(1)).unwrap();
        assert_relative_eq!(renderer.camera().position().z, 3.0 - 2.5, epsilon = 1e-4);

        renderer.surface_mut().push_event(KeyEvent::Up(Key::W));
        renderer.step_at(t0 + Duration::from_secs(2)).unwrap();
        assert_relative_eq!(renderer.camera().position().z, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn mouse_turns_the_camera_only_while_a_button_is_held() {
        let mut renderer = renderer();
        renderer.surface_mut().push_event(MouseEvent::Moved { x: 0, y: 0 });
        renderer.surface_mut().push_event(MouseEvent::Moved { x: 50, y: 0 });
        renderer.step().unwrap();
        assert_relative_eq!(renderer.camera().yaw(), -90.0);

        renderer.surface_mut().push_event(MouseEvent::ButtonDown(MouseButton::Left));
        renderer.surface_mut().push_event(MouseEvent::Moved { x: 60, y: -10 });
        renderer.step().unwrap();
        assert_relative_eq!(renderer.camera().yaw(), -87.0, epsilon = 1e-4);
        assert_relative_eq!(renderer.camera().pitch(), 3.0, epsilon = 1e-4);

        renderer.surface_mut().push_event(MouseEvent::ButtonUp(MouseButton::Left));
        renderer.surface_mut().push_event(MouseEvent::Moved { x: 200, y: 0 });
        renderer.step().unwrap();
        assert_relative_eq!(renderer.camera().yaw(), -87.0, epsilon = 1e-4);
    }

    #[test]
    fn capped_loop_skips_frames_until_the_budget_elapses() {
        let mut renderer = renderer();
        renderer.scheduler_mut().set_target_fps(10);
        let t0 = Instant::now();

        assert!(renderer.step_at(t0).unwrap());
        assert!(!renderer.step_at(t0 + Duration::from_millis(50)).unwrap());
        assert!(renderer.step_at(t0 + Duration::from_millis(100)).unwrap());
        assert_eq!(renderer.frames_rendered(), 2);
    }

    #[test]
    fn extra_listeners_run_after_the_renderer() {
        let mut renderer = renderer();
        let closes = Rc::new(Cell::new(0));
        let seen = Rc::clone(&closes);
        renderer.events_mut().window.add_listener(WindowEventKind::Close, move |_| {
            seen.set(seen.get() + 1);
            false
        });

        renderer.surface_mut().push_event(WindowEvent::Close);
        renderer.step().unwrap();
        assert_eq!(closes.get(), 1);
        assert!(!renderer.is_running());
    }

    #[test]
    fn resize_event_resizes_the_swapchain() {
        let mut renderer = renderer();
        renderer.surface_mut().push_event(WindowEvent::Resize { width: 16, height: 8 });
        renderer.step().unwrap();
        assert_eq!((renderer.swapchain().width(), renderer.swapchain().height()), (16, 8));
        assert_eq!(renderer.surface().last_frame().unwrap().height(), 8);
    }
}
