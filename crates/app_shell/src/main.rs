mod camera;

use anyhow::{Context, Result};
use camera::{OrbitCamera, WHEEL_NOTCH};
use cube_model::{CubeModel, TwistController};
use glam::Vec2;
use render_api::{CubeSubmission, FrameSubmission, NullRenderer, RenderBackend};
use settings::{SettingsStore, UserSettings};
use tracing::{error, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::Key,
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings_store = SettingsStore::new().context("settings store init failed")?;
    let user_settings = match settings_store.load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("using default settings (failed to load): {err}");
            UserSettings::default()
        }
    };

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = TwistCubeApp::new(settings_store, user_settings);
    event_loop.run_app(&mut app).context("event loop error")?;
    Ok(())
}

struct TwistCubeApp {
    settings_store: SettingsStore,
    user_settings: UserSettings,
    window: Option<Window>,
    window_id: Option<WindowId>,
    renderer: NullRenderer,
    model: CubeModel,
    camera: OrbitCamera,
    twist: TwistController,
    // Last cursor position in physical pixels.
    cursor: Option<Vec2>,
    fullscreen: bool,
}

impl TwistCubeApp {
    fn new(settings_store: SettingsStore, user_settings: UserSettings) -> Self {
        let camera = OrbitCamera::new(&user_settings.camera, 1.0, 1.0);
        let twist = TwistController::new(
            1.0,
            1.0,
            user_settings.interaction.arcball_radius,
            user_settings.interaction.rotate_speed,
        );
        Self {
            settings_store,
            user_settings,
            window: None,
            window_id: None,
            renderer: NullRenderer::new(),
            model: CubeModel::new(),
            camera,
            twist,
            cursor: None,
            fullscreen: false,
        }
    }

    fn update_viewport(&mut self, width: u32, height: u32) {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.camera.set_viewport(w, h);
        self.twist.set_viewport(w, h);
        self.renderer.resize(width.max(1), height.max(1));
    }

    fn handle_pointer_moved(&mut self, position: Vec2) {
        self.cursor = Some(position);
        if self.twist.is_active() {
            let ray = self.camera.picking_ray(position);
            let vector = self.camera.screen_vector(position);
            self.twist.update(&mut self.model, &ray, position, vector);
        }
        if self.camera.is_orbiting() {
            self.camera.orbit_to(position);
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(cursor) = self.cursor else {
            return;
        };
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                let ray = self.camera.picking_ray(cursor);
                let vector = self.camera.screen_vector(cursor);
                if let Err(err) = self.twist.begin(&mut self.model, &ray, cursor, vector) {
                    warn!("twist press ignored: {err}");
                }
            }
            (MouseButton::Left, ElementState::Released) => match self.twist.end(&mut self.model) {
                Ok(Some(outcome)) => {
                    tracing::info!(
                        layer = outcome.layer,
                        quarter_turns = outcome.quarter_turns,
                        "layer twisted"
                    );
                }
                Ok(None) => {}
                Err(err) => error!("failed to commit twist: {err}"),
            },
            (MouseButton::Right, ElementState::Pressed) => self.camera.begin_orbit(cursor),
            (MouseButton::Right, ElementState::Released) => self.camera.end_orbit(),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &Key, event_loop: &ActiveEventLoop) {
        match key {
            Key::Named(winit::keyboard::NamedKey::Escape) => event_loop.exit(),
            Key::Character(text) => match text.as_str() {
                "s" | "S" => {
                    let twists = self.user_settings.interaction.shuffle_twists;
                    if let Err(err) = self.model.shuffle(twists, &mut rand::rng()) {
                        warn!("shuffle refused: {err}");
                    }
                }
                "r" | "R" => {
                    if let Err(err) = self.model.restore() {
                        warn!("restore refused: {err}");
                    }
                }
                "f" | "F" => self.toggle_fullscreen(),
                _ => {}
            },
            _ => {}
        }
    }

    fn toggle_fullscreen(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        self.fullscreen = !self.fullscreen;
        let mode = self.fullscreen.then(|| Fullscreen::Borderless(None));
        window.set_fullscreen(mode);
    }

    fn frame_submission(&self) -> FrameSubmission {
        let cubes = self
            .model
            .cubes()
            .iter()
            .map(|cube| CubeSubmission {
                world: cube.world_matrix(),
                min_corner: cube.min_corner(),
                max_corner: cube.max_corner(),
                face_materials: cube.face_materials(),
            })
            .collect();
        FrameSubmission {
            view: self.camera.view(),
            projection: self.camera.projection(),
            cubes,
        }
    }
}

impl ApplicationHandler for TwistCubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop
            .create_window(WindowAttributes::default().with_title("twistcube".to_string()))
        {
            Ok(window) => window,
            Err(err) => {
                error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = self.renderer.initialize() {
            error!("failed to initialize renderer: {err}");
            event_loop.exit();
            return;
        }

        let size = window.inner_size();
        self.update_viewport(size.width, size.height);
        self.window_id = Some(window.id());
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if Some(window_id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.update_viewport(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                // The position arrives in physical pixels, the same space
                // the viewport is set from.
                self.handle_pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * WHEEL_NOTCH,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32,
                };
                self.camera.on_wheel(notches);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.handle_key(&event.logical_key, event_loop);
                }
            }
            WindowEvent::Focused(false) => {
                // Losing focus mid-drag must not leave a layer dangling.
                if let Err(err) = self.twist.cancel(&mut self.model) {
                    error!("failed to cancel twist: {err}");
                }
                self.camera.end_orbit();
            }
            WindowEvent::RedrawRequested => {
                self.camera.on_frame();
                let frame = self.frame_submission();
                if let Err(err) = self.renderer.draw(&frame) {
                    error!("draw failed: {err}");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Err(err) = self.settings_store.save(&self.user_settings) {
            warn!("failed to save settings: {err}");
        }
    }
}
