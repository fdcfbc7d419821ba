/// DELVE Project
/// `File` main.rs
/// `Description` Main project module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::rc::Rc;

use delve::asset::PngLoader;
use delve::config::Config;
use delve::data;
use delve::font::Font;
use delve::input::Input;
use delve::level::Level;
use delve::render::Render;
use delve::state::{Game, GameState, Spawn};
use delve::surface::Surface;
use delve::texture::TextureRegistry;
use delve::timer::Timer;

/// Presentation toggles
#[derive(Copy, Clone, Default)]
struct Overlay {
    debug: bool,
    minimap: bool,
    paused: bool,
} // struct Overlay

/// Level catalogue building function
/// * `config` - configuration, its level file is appended to built-in levels
/// * Returns levels and index of level to start from
fn build_levels(config: &Config) -> Result<(Vec<Level>, usize), Box<dyn std::error::Error>> {
    let mut levels = data::levels()?;

    let Some(path) = &config.level_file else {
        return Ok((levels, 0));
    };

    let mut level = Level::load_from_wlv(&std::fs::read_to_string(path)?)?;
    let index = levels.len();
    if level.depth != index {
        tracing::warn!(path = %path.display(), depth = level.depth, index, "level depth replaced by catalogue index");
        level.depth = index;
    }
    tracing::info!(path = %path.display(), name = %level.display_name(), "level file loaded");
    levels.push(level);

    Ok((levels, index))
} // fn build_levels

/// HUD and overlays rendering function
/// * `surface` - front buffer surface
/// * `game` - game to display state of
/// * `overlay` - enabled overlays
/// * `font` - text font
/// * `lines` - debug overlay lines
fn render_overlay(surface: &mut Surface, game: &Game<PngLoader>, overlay: Overlay, font: &Font, lines: &[String]) {
    let ext = surface.get_extent();

    if overlay.paused {
        let title = Font::with_scale(2);
        let text = "PAUSED";

        surface.blend_bar(0, 0, ext.width, ext.height, [0, 0, 0, 128]);
        title.put_string(
            surface,
            (ext.width as isize - title.get_string_width(text) as isize) / 2,
            (ext.height as isize - title.get_letter_size().height as isize) / 2,
            text,
            0xFFFF00,
        );
    }

    let letter = font.get_letter_size();

    let score = format!("Score: {}", game.score());
    font.put_string(surface, ext.width as isize - font.get_string_width(&score) as isize - 8, 8, &score, 0xFFFFFF);

    if overlay.debug {
        for (index, line) in lines.iter().enumerate() {
            font.put_string(surface, 8, 8 + (index * (letter.height + 2)) as isize, line, 0xFFFFFF);
        }
    }
} // fn render_overlay

/// Main program function
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid command line");
            eprintln!("usage: delve [--assets DIR] [--resolution INDEX] [--min-loading SECONDS] [LEVEL.wlv]");
            return;
        }
    };
    tracing::info!(?config, "configuration");

    let (levels, start) = match build_levels(&config) {
        Ok(levels) => levels,
        Err(err) => {
            tracing::error!(%err, "level loading failed");
            return;
        }
    };

    let registry = Rc::new(TextureRegistry::from_textures(data::textures()));
    let loader = Rc::new(PngLoader::new(config.assets.clone()));
    let mut game = Game::new(config, levels, registry, loader);

    if let Err(err) = game.set_current_level(start, Spawn::Entrance) {
        tracing::error!(%err, "start level is unavailable");
        return;
    }

    let event_loop = match winit::event_loop::EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            tracing::error!(%err, "event loop creation failed");
            return;
        }
    };
    let screen_size = winit::dpi::PhysicalSize::<u32>::new(800, 600);
    let window = match winit::window::WindowBuilder::new()
        .with_title("DELVE")
        .with_resizable(true)
        .with_inner_size(screen_size)
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(err) => {
            tracing::error!(%err, "window creation failed");
            return;
        }
    };

    let window_context = match softbuffer::Context::new(&window) {
        Ok(context) => context,
        Err(err) => {
            tracing::error!(%err, "softbuffer context creation failed");
            return;
        }
    };
    let mut surface = match softbuffer::Surface::new(&window_context, &window) {
        Ok(surface) => surface,
        Err(err) => {
            tracing::error!(%err, "softbuffer surface creation failed");
            return;
        }
    };

    let mut surface_size = screen_size;
    if let Some((width, height)) = std::num::NonZeroU32::new(surface_size.width).zip(std::num::NonZeroU32::new(surface_size.height)) {
        _ = surface.resize(width, height);
    }

    let mut render = Render::new();
    let mut timer = Timer::new();
    let mut input = Input::new();
    let mut overlay = Overlay::default();
    let mut back_buffer = Vec::<u32>::new();

    let font = Font::default();

    let result = event_loop.run(|event, target| {
        let winit::event::Event::WindowEvent { window_id, event } = event else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            winit::event::WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                target.exit();
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(code) = event.physical_key {
                    input.on_key_state_change(code, event.state == winit::event::ElementState::Pressed);
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                surface_size = size;
                if let Some((width, height)) = std::num::NonZeroU32::new(size.width).zip(std::num::NonZeroU32::new(size.height)) {
                    _ = surface.resize(width, height);
                }
            }
            winit::event::WindowEvent::RedrawRequested => 'redraw: {
                timer.response();

                let intents = input.get_state().intents();
                overlay.debug ^= intents.toggle_debug;
                overlay.minimap ^= intents.toggle_minimap;
                overlay.paused ^= intents.toggle_pause;

                if intents.increase_resolution && game.config_mut().increase_resolution()
                    || intents.decrease_resolution && game.config_mut().decrease_resolution()
                {
                    let resolution = game.config().resolution();
                    tracing::info!(width = resolution.width, height = resolution.height, "back buffer resolution changed");
                }

                if !(overlay.paused && game.state() == GameState::Loaded) {
                    game.tick(timer.get_delta_time(), &intents);
                }

                // Render back buffer
                let back = game.config().resolution();
                back_buffer.resize(back.width * back.height, 0);
                {
                    let mut back_surface = Surface::new(&mut back_buffer, back.width, back.height);

                    match (game.state(), game.level()) {
                        (GameState::Loaded, Some(level)) => {
                            let textures = game.registry().view();
                            render.render(&mut back_surface, game.player(), level, &textures, timer.get_animation_frame(), game.config().max_depth);
                        }
                        (_, level) => {
                            let name = level.map(Level::display_name).unwrap_or_default();
                            render.render_loading(&mut back_surface, &name, &font);
                        }
                    }
                }

                let mut buffer = match surface.buffer_mut() {
                    Ok(buffer) => buffer,
                    Err(err) => {
                        tracing::warn!(%err, "front buffer is unavailable");
                        break 'redraw;
                    }
                };
                let (front_width, front_height) = (surface_size.width as usize, surface_size.height as usize);
                let front = &mut buffer[..];
                if front.len() < front_width * front_height {
                    break 'redraw;
                }

                Surface::new(front, front_width, front_height).letterbox(&back_buffer, back.width, back.height);

                if game.state() == GameState::Loaded {
                    if let (true, Some(level)) = (overlay.minimap, game.level()) {
                        let side = front_width.min(front_height) / 3;
                        let x0 = front_width.saturating_sub(side + 8);
                        let y0 = front_height.saturating_sub(side + 8);

                        let mut minimap_surface = Surface::with_stride(&mut front[y0 * front_width + x0..], side, side, front_width);
                        render.render_minimap(&mut minimap_surface, level, game.player());
                    }

                    let player = game.player();
                    let lines = if !overlay.debug {
                        Vec::new()
                    } else {
                        vec![
                            "Stats".to_string(),
                            format!("Framerate: {:.1}", timer.get_fps()),
                            format!("Frametime: {:.2} ms", timer.get_delta_time() * 1000.0),
                            format!("Runtime: {:.1} s", timer.get_time()),
                            format!("Renderer Back: {}x{}", back.width, back.height),
                            format!("Renderer Front: {}x{}", front_width, front_height),
                            format!("Player Position: {:.2}, {:.2}", player.position.x, player.position.y),
                            format!("Player Direction: {:.1} deg, FOV {:.1} deg", player.angle(), player.fov()),
                        ]
                    };

                    render_overlay(&mut Surface::new(front, front_width, front_height), &game, overlay, &font, &lines);
                }

                if let Err(err) = buffer.present() {
                    tracing::warn!(%err, "frame presentation failed");
                }

                input.clear_changed();
                game.finish_frame();

                window.request_redraw();
            }
            _ => {}
        }
    });

    if let Err(err) = result {
        tracing::error!(%err, "event loop failed");
    }
} // fn main

// file main.rs
