//! Cube Hop - a small 3D platformer
//!
//! Hop a cube across a board of floor tiles while some tiles bob and some
//! blocks slide across the lanes.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use cubehop::config::AppConfig;
use cubehop::input::{InputAction, InputMapper};
use cubehop::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use cubehop_core::GameWorld;
use cubehop_input::PlayerController;

/// Main application state
struct App {
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    simulation: SimulationSystem,
    world: GameWorld,
    controller: PlayerController,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let level = config.load_level();
        let world = GameWorld::from_level(&level, config.to_physics_config(), config.physics.seed)
            .with_spin_increment(config.spin.increment);

        log::info!(
            "World '{}': {} tiles, spawn at ({:.1}, {:.1}, {:.1})",
            world.name(),
            world.physics().tile_count(),
            world.player().spawn.x,
            world.player().spawn.y,
            world.player().spawn.z
        );

        let simulation = SimulationSystem::from_config(&config.physics);
        let controller = PlayerController::with_move_speed(config.input.move_speed);

        Self {
            config,
            window_system: None,
            render_system: None,
            simulation,
            world,
            controller,
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleCamera => {
                if let Some(render) = &mut self.render_system {
                    render.toggle_camera();
                }
            }
            InputAction::ReverseSpin(target) => {
                let channel = self.world.spin_mut().channel_mut(target);
                channel.reverse();
                log::debug!("{:?} spin direction: {}", target, channel.direction);
            }
            InputAction::ToggleSpin(target) => {
                let channel = self.world.spin_mut().channel_mut(target);
                channel.toggle();
                log::info!(
                    "{:?} spin: {}",
                    target,
                    if channel.enabled { "ON" } else { "OFF" }
                );
            }
            InputAction::ResetPlayer => {
                self.world.reset_player();
                self.controller.clear();
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window_system {
                    window.toggle_fullscreen();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.simulation.update(&mut self.world, &mut self.controller);
        if result.respawned {
            log::info!("Fell off the board - respawned");
        }

        let mode = self.render_system.as_ref().map(|r| r.camera().mode);
        if let (Some(window), Some(mode)) = (&self.window_system, mode) {
            window.update_title(self.world.player().position, mode);
        }

        if let Some(render) = &mut self.render_system {
            match render.render_frame(&self.world) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    log::debug!("Surface reconfigured");
                }
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window_system {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window_system) => window_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match RenderSystem::new(
            window_system.window().clone(),
            &self.config.rendering,
            self.config.camera.to_chase_camera(),
            self.config.window.vsync,
        ) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        window_system.request_redraw();
        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
        self.simulation.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render_system {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, event.repeat) {
                        self.handle_action(action, event_loop);
                    }
                    self.controller.process_keyboard(key, event.state, event.repeat);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Cube Hop");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
