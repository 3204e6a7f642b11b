use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use rtr::config::{Config, RendererConfig};
use rtr::render::SoftwareBackend;
use rtr::scene::{FrameStatus, Scene};
use rtr::shading::ShadingModel;
use rtr::window::{FrameLimiter, Window};

/// Fly through the lit reference scene.
#[derive(Parser, Debug)]
#[command(name = "rtr", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use Gooch tone shading instead of the lit model
    #[arg(long)]
    gooch: bool,

    /// Exit after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            RendererConfig::load_from_file(path).map_err(|e| e.to_string())?
        }
        None => RendererConfig::default(),
    };

    let (width, height) = (config.window.width, config.window.height);
    let mut window = Window::new(&config.window.title, width, height)?;
    let mut scene = Scene::from_config(&config);
    let mut backend = SoftwareBackend::new(
        width,
        height,
        config.scene.instance_capacity,
        config.shading.model,
    );
    if args.gooch {
        backend.set_shading_model(ShadingModel::Gooch);
    }
    log::info!("shading model: {:?}", backend.shading_model());
    let mut limiter = FrameLimiter::new(&window);

    let mut frames = 0u64;
    loop {
        let status = scene
            .run_frame(&mut window, &mut backend)
            .map_err(|e| e.to_string())?;
        let framebuffer = backend.framebuffer();
        window.present(framebuffer.as_bytes(), framebuffer.pitch())?;
        if status == FrameStatus::Quit {
            break;
        }

        if let Some((w, h)) = window.take_resize() {
            window.resize(w, h)?;
            backend.resize(w, h);
            scene.set_viewport(w, h);
        }

        frames += 1;
        if args.frames.is_some_and(|limit| frames >= limit) {
            log::info!("stopping after {frames} frames");
            break;
        }
        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
