//! 2D N-body Gravity Sandbox
//!
//! Loads bodies from a JSON configuration and simulates them in real time,
//! rendered with wgpu. Features include:
//! - Exact pairwise Newtonian gravity with RK4 integration
//! - Debug overlay with velocity, force and barycenter lines
//! - Pan/zoom camera and on-screen body names
//!
//! Controls:
//! - Left mouse drag: Pan camera
//! - Scroll or =/-: Zoom in/out
//! - Space: Pause/resume simulation
//! - 1: Toggle debug overlay
//! - 2: Toggle body names
//! - Esc: Quit

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use common::{Camera2D, GraphicsContext};
use glam::{DVec2, Vec2};
use gravity_sandbox::{
    hud::{draw_debug_panels, draw_names, FrameTimer},
    renderer::Renderer,
    view::{apply_frame_input, Action, InputState, ViewSettings},
    Config, FrameClock, World,
};
use winit::{
    event::{Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::PhysicalKey,
};

#[derive(Parser, Debug)]
#[command(about = "Configurable 2D N-body gravity sandbox")]
struct Args {
    /// Simulation configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Seed for the coincident-body nudge, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Start paused regardless of the config
    #[arg(long)]
    paused: bool,
}

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    world: World,
    clock: FrameClock,
    barycenter: DVec2,
    camera: Camera2D,
    view: ViewSettings,
    input: InputState,
    timer: FrameTimer,
    quit: bool,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, config: &Config) -> Self {
        let world = World::from_config(config);
        let renderer = Renderer::new(&ctx, world.len());
        let (width, height) = ctx.viewport();
        let camera = Camera2D::new(width, height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            barycenter: world.barycenter(),
            world,
            clock: FrameClock::new(config.settings.timestep),
            camera,
            view: ViewSettings::from_settings(&config.settings),
            input: InputState::new(),
            timer: FrameTimer::new(),
            quit: false,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        let (width, height) = self.ctx.viewport();
        self.camera.resize(width, height);
    }

    fn update(&mut self, dt: f64) {
        self.timer.tick(dt);

        let actions: Vec<Action> = self.input.actions().collect();
        for action in actions {
            match action {
                Action::Quit => self.quit = true,
                Action::TogglePause => {
                    self.world.toggle_pause();
                    log::info!("paused: {}", self.world.paused);
                }
                Action::ToggleDebug => self.view.debug = !self.view.debug,
                Action::ToggleNames => self.view.show_names = !self.view.show_names,
            }
        }
        apply_frame_input(&mut self.camera, &self.input);
        self.input.end_frame();

        // drawn this frame, taken before the bodies move
        self.barycenter = self.world.barycenter();
        self.world.advance(&mut self.clock, dt);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let geometry = self.renderer.update_scene(
            &self.ctx.device,
            &self.ctx.queue,
            &self.camera,
            &self.world,
            self.barycenter,
            self.view,
        );

        // Build egui UI
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            draw_names(ctx, &self.world, self.view, &self.camera);
            draw_debug_panels(ctx, &self.timer, &self.world, self.view, &self.camera);
        });

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, &geometry);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("failed to load scenario from {}", args.config.display()))?;

    if args.seed.is_some() {
        config.settings.seed = args.seed;
    }
    if args.paused {
        config.settings.paused_at_start = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!(
        "loaded {} bodies from {} (G = {}, timestep = {:?})",
        config.bodies.len(),
        args.config.display(),
        config.settings.g,
        config.settings.timestep,
    );

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Customizable Gravity Simulation",
        args.width,
        args.height,
    ))
    .context("failed to initialise graphics")?;

    let mut app = App::new(ctx, &config);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => app.resize(*size),
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key),
                                    state,
                                    ..
                                },
                            ..
                        } => app.input.key_event(*key, *state),
                        WindowEvent::MouseInput {
                            state,
                            button: MouseButton::Left,
                            ..
                        } => app.input.mouse_button(*state, consumed),
                        WindowEvent::CursorMoved { position, .. } => {
                            app.input
                                .cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                        }
                        WindowEvent::MouseWheel { delta, .. } if !consumed => {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => *y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            app.input.scroll(scroll);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = std::time::Instant::now();
                            let dt = (now - last_time).as_secs_f64();
                            last_time = now;

                            app.update(dt);
                            if app.quit {
                                elwt.exit();
                                return;
                            }
                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    log::error!("GPU out of memory, exiting");
                                    elwt.exit();
                                }
                                Err(e) => log::error!("render error: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .context("event loop error")?;

    Ok(())
}
