use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use anyhow::Context;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use tree_core::{AssetState, ControlSignal, PhotoAsset, Scene, SceneConfig, PHOTO_LIMIT};

mod assets;
mod input;
mod render;

struct Args {
    config: Option<PathBuf>,
    photos: Vec<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        photos: Vec::new(),
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        if arg == "--config" {
            let path = it.next().context("--config needs a path")?;
            args.config = Some(PathBuf::from(path));
        } else {
            args.photos.push(PathBuf::from(arg));
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(p) => Ok(SceneConfig::load(p)?),
        None => Ok(SceneConfig::default()),
    }
}

fn drain_probes(rx: &Receiver<(usize, AssetState)>, scene: &mut Scene) {
    while let Ok((index, state)) = rx.try_recv() {
        scene.set_photo_state(index, state);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;
    let mut seed = config.seed;
    let mut scene = Scene::new(config);
    scene.set_photos(
        args.photos
            .iter()
            .map(|p| PhotoAsset::new(p.display().to_string()))
            .collect(),
    );
    let probes = assets::spawn_probe(args.photos.into_iter().take(PHOTO_LIMIT).collect());
    let mut signal = ControlSignal::default();
    let mut pointer = input::PointerState::default();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ornament Tree")
        .build(&event_loop)?;
    let mut gpu = pollster::block_on(render::GpuState::new(&window))?;
    log::info!("[viewer] hold the left button or press Space to assemble the tree");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => gpu.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let size = gpu.window.inner_size();
                pointer.set_cursor(
                    position.x as f32,
                    position.y as f32,
                    size.width,
                    size.height,
                );
            }
            WindowEvent::CursorLeft { .. } => pointer.inside = false,
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => pointer.button_down = state == ElementState::Pressed,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Space) => pointer.toggle_latch(),
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Character(c) if c.as_str().eq_ignore_ascii_case("r") => {
                    seed = seed.wrapping_add(1);
                    scene.reseed(seed);
                }
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            drain_probes(&probes, &mut scene);
            signal.apply_gesture(&pointer.gesture());
            let dt = gpu.frame_dt();
            let state = scene.tick(&signal, dt);
            match gpu.render(state) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[viewer] surface error: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
