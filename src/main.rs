//! `minirender [model.obj] [frames]`
//!
//! Opens an SDL window when built with the `sdl` feature. Otherwise renders
//! off-screen and writes the last frame to `frame.png`.

use std::env;
use std::process::ExitCode;

use log::error;
use minirender::prelude::*;
use minirender::Error;

const DEFAULT_MODEL: &str = "assets/cube.obj";
const SNAPSHOT_PATH: &str = "frame.png";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> minirender::Result<()> {
    let mut args = env::args().skip(1);
    let model_path = args.next().unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let max_frames = args
        .next()
        .map(|arg| {
            arg.parse::<u64>()
                .map_err(|e| Error::InvalidConfig(format!("invalid frame count {arg:?}: {e}")))
        })
        .transpose()?;

    let config = RendererConfig::default();
    match config.surface {
        SurfaceKind::Headless => {
            let surface = HeadlessSurface::new(config.width, config.height);
            let mut renderer = Renderer::with_surface(config, surface)?;
            renderer.load_model(&model_path)?;
            renderer.run(Some(max_frames.unwrap_or(1)))?;
            renderer.surface().save_png(SNAPSHOT_PATH)?;
        }
        SurfaceKind::Sdl => {
            let mut renderer = Renderer::new(config)?;
            renderer.load_model(&model_path)?;
            renderer.run(max_frames)?;
        }
    }
    Ok(())
}
