//! Raincatch entry point
//!
//! Owns the window, GPU surface, audio output, and game state, and drives
//! one simulation step plus one draw per RedrawRequested.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raincatch::assets::{self, SoundData};
use raincatch::audio::AudioManager;
use raincatch::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use raincatch::renderer::{SpriteRenderState, camera};
use raincatch::sim::{FrameInput, GameEvent, GameState, tick};

/// Raw input accumulated from window events between frames
#[derive(Debug, Default)]
struct InputState {
    /// Pointer position in physical pixels, origin top-left
    pointer_pos: Option<Vec2>,
    pointer_down: bool,
    left_held: bool,
    right_held: bool,
}

/// The per-run lifecycle object: game state plus every resource it draws
/// and plays with. Dropping the session releases each handle exactly once.
struct GameSession {
    window: Arc<Window>,
    renderer: SpriteRenderState,
    audio: AudioManager,
    catch_sound: Arc<SoundData>,
    state: GameState,
    input: InputState,
    /// Monotonic clock origin; dt and spawn timing both derive from it
    start: Instant,
    last_frame: Instant,
}

impl GameSession {
    fn new(window: Arc<Window>) -> Result<Self> {
        let raindrop_image = assets::load_sprite("assets/droplet.png")?;
        let paddle_image = assets::load_sprite("assets/bucket.png")?;
        let catch_sound = Arc::new(assets::load_sound("assets/drop.wav")?);
        let music = Arc::new(assets::load_sound("assets/rain.wav")?);

        let renderer = pollster::block_on(SpriteRenderState::new(
            window.clone(),
            &raindrop_image,
            &paddle_image,
        ))?;

        let audio = AudioManager::new();
        audio.play_looping(&music);

        let seed = rand::random();
        log::info!("starting run with seed {seed}");

        let now = Instant::now();
        Ok(Self {
            window,
            renderer,
            audio,
            catch_sound,
            state: GameState::new(seed),
            input: InputState::default(),
            start: now,
            last_frame: now,
        })
    }

    /// Advance the simulation by the elapsed wall-frame and draw it
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let now_ns = (now - self.start).as_nanos() as u64;

        let pointer_world = if self.input.pointer_down {
            self.input
                .pointer_pos
                .map(|p| camera::screen_to_world(p, self.renderer.size))
        } else {
            None
        };

        let input = FrameInput {
            pointer_world,
            move_left: self.input.left_held,
            move_right: self.input.right_held,
            now_ns,
        };

        for event in tick(&mut self.state, &input, dt) {
            match event {
                GameEvent::RaindropCaught => self.audio.play(&self.catch_sound),
            }
        }

        match self.renderer.render(&self.state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.renderer.resize(size.width, size.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => log::error!("out of GPU memory"),
            Err(e) => log::warn!("render error: {e:?}"),
        }
    }

    fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.input.pointer_pos = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.pointer_pos = None;
                self.input.pointer_down = false;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.input.pointer_down = *state == ElementState::Pressed;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::ArrowLeft) => self.input.left_held = pressed,
                    PhysicalKey::Code(KeyCode::ArrowRight) => self.input.right_held = pressed,
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

/// winit shell: builds the session once a window exists, then forwards events
#[derive(Default)]
struct App {
    session: Option<GameSession>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Resume after a suspend has no observable effect on a running game
        if self.session.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("raincatch")
            .with_inner_size(LogicalSize::new(VIEW_WIDTH as f64, VIEW_HEIGHT as f64));

        let session = event_loop
            .create_window(attrs)
            .context("failed to create window")
            .map(Arc::new)
            .and_then(GameSession::new);

        match session {
            Ok(session) => {
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(e) => {
                log::error!("startup failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Pause placeholder: nothing to persist, nothing to stop
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = &mut self.session else {
            return;
        };

        session.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                // The logical 800x480 world is fixed; only the surface changes
                session.renderer.resize(new_size.width, new_size.height);
                session.window.request_redraw();
            }
            WindowEvent::RedrawRequested => session.frame(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop
        .run_app(&mut App::default())
        .context("event loop terminated with error")?;

    Ok(())
}
