//! Sundance - audio-reactive visualizer
//!
//! Listens to the microphone and turns the live spectrum into a scrolling
//! waterfall, a wobbling waveform corridor or a particle fountain.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use sundance::audio::{list_input_devices, AudioCapture};
use sundance::camera::Camera;
use sundance::cli::Args;
use sundance::controls::{Command, HELP};
use sundance::params::{AudioConfig, Config};
use sundance::rendering::RenderSystem;
use sundance::time::FrameClock;
use sundance::visualizer::Visualizer;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    visualizer: Visualizer,
    audio: AudioCapture,
    camera: Camera,
    clock: FrameClock,

    config: Config,

    /// Fatal error raised inside the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, visualizer: Visualizer, audio: AudioCapture) -> Self {
        Self {
            window: None,
            render_system: None,
            visualizer,
            audio,
            camera: Camera::new(&config.render),
            clock: FrameClock::new(),
            config,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn handle_command(&mut self, event_loop: &ActiveEventLoop, command: Command) {
        match command {
            Command::Quit => event_loop.exit(),
            Command::Help => eprintln!("{}", HELP),
            Command::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    let fullscreen = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(fullscreen);
                }
            }
            other => self.visualizer.handle(other),
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let frame_time = self.clock.tick();
        let samples = self.audio.latest_samples();
        let scene = self.visualizer.frame(&samples, frame_time.dt);
        let view_proj = self.camera.view_proj(render_system.aspect_ratio());

        match render_system.render(scene, view_proj) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("GPU out of memory"));
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Sundance")
            .with_inner_size(LogicalSize::new(
                self.config.render.window_width,
                self.config.render.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                let error = anyhow::Error::new(e).context("failed to create window");
                return self.fail(event_loop, error);
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(Arc::clone(&window))) {
            Ok(render_system) => render_system,
            Err(e) => return self.fail(event_loop, e.into()),
        };

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        ref logical_key,
                        ..
                    },
                ..
            } => {
                if let Some(command) = Command::from_key(logical_key) {
                    self.handle_command(event_loop, command);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    if args.list_devices {
        for name in list_input_devices()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = args.to_config()?;
    let mode = args.display_mode()?;

    let audio = AudioCapture::start(&config.audio).context("failed to start audio capture")?;
    let device_audio = AudioConfig {
        sample_rate_hz: audio.sample_rate_hz(),
        ..config.audio.clone()
    };
    log::info!(
        "Spectrum: {} bins, {:.1} Hz per bin",
        device_audio.bins(),
        device_audio.bin_to_hz(1)
    );

    let visualizer = Visualizer::new(config.clone(), mode, args.flags(), args.seed);

    eprintln!("{}", HELP);

    let mut app = App::new(config, visualizer, audio);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
