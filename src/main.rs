//! Noise Clock - a generative clock face that drifts, glitches and ticks
//!
//! Rings breathe on a damped random walk, cardinal hours occasionally
//! corrupt, and sampled ticks fire at random, wandering around the listener.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use noiseclock::audio::{AudioSystem, SampleBank};
use noiseclock::canvas::DisplayList;
use noiseclock::clock::NoiseClock;
use noiseclock::params::*;
use noiseclock::random::ThreadRandom;
use noiseclock::rendering::RenderSystem;

/// Everything that only exists once startup has fully succeeded
struct Running {
    window: Arc<Window>,
    render_system: RenderSystem,
    audio: AudioSystem,
    clock: NoiseClock,
}

/// Main application state
struct App {
    running: Option<Running>,
    render_config: RenderConfig,
    rng: ThreadRandom,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            running: None,
            render_config: RenderConfig::default(),
            rng: ThreadRandom::new(),
            start_time: Instant::now(),
        }
    }

    /// Window, GPU, samples, audio, then the clock; any failure aborts
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))?;

        let bank = SampleBank::load(SAMPLE_DIR, &TICK_SAMPLE_FILES)
            .context("Failed to load tick samples")?;
        log::info!("Loaded {} tick samples", bank.len());

        let audio = AudioSystem::new(bank)?;

        let clock = NoiseClock::new(ClockParams::default(), TickParams::default(), &mut self.rng);

        Ok(Running {
            window,
            render_system,
            audio,
            clock,
        })
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let timestamp_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let side = running.render_system.canvas_side() as f32;
        let mut list = DisplayList::new(side, side);

        running
            .clock
            .frame(timestamp_ms, &mut list, &mut running.audio, &mut self.rng);

        match running.render_system.render(&list) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                running.render_system.reconfigure();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return; // Already initialized
        }

        match self.start(event_loop) {
            Ok(running) => {
                log::info!("Noise Clock is running, press ESC to quit");
                self.start_time = Instant::now();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("Startup failed: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(running) = self.running.as_mut() {
                    running.render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::new();
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
