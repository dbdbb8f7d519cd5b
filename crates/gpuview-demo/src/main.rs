mod cube;
mod scene;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use gpuview_engine::config::ViewConfig;
use gpuview_engine::logging::{init_logging, LoggingConfig};
use gpuview_engine::window::Runtime;

use scene::CubeScene;

const DEFAULT_CONFIG: &str = "gpuview.toml";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Usage: gpuview-demo [config.toml] [texture.png]
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config_path = args.next().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let texture_path = args.next();

    let config = ViewConfig::load_from_path(&config_path)?;

    let scene = match texture_path {
        Some(path) => CubeScene::with_texture(path),
        None => CubeScene::new(),
    };

    // The runtime only holds a weak reference; `scene` must outlive `run`.
    let scene = Rc::new(RefCell::new(scene));

    Runtime::run(config.runtime_config(), config.gpu_init(), &scene)?;

    log::info!("rendered {} frames", scene.borrow().frames_rendered());
    Ok(())
}
