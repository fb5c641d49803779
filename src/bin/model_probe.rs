//! Model probe binary - fetches a model config and reports a summary.
//!
//! Usage: cargo run --bin model_probe -- [OPTIONS]
//!
//! Options:
//!   --url <URL>     Model config URL to fetch directly
//!   --name <NAME>   Model name resolved through the dictionary
//!   --dict <PATH>   Model dictionary JSON (default: model_dict.json)
//!   --ticks <N>     Timed update ticks to run after loading (default: 3)

use std::path::PathBuf;
use std::time::Duration;

use live2d_host::controller::ModelController;
use live2d_host::core::{logging, FrameTimer};
use live2d_host::model::ModelDict;
use live2d_host::runtime;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let url = parse_str_arg(&args, "--url");
    let name = parse_str_arg(&args, "--name");
    let dict_path = parse_str_arg(&args, "--dict").unwrap_or_else(|| "model_dict.json".to_string());
    let ticks = parse_usize_arg(&args, "--ticks").unwrap_or(3);

    if url.is_none() && name.is_none() {
        eprintln!("usage: model_probe --url <URL> | --name <NAME> [--dict <PATH>] [--ticks <N>]");
        std::process::exit(1);
    }

    // No backend in the probe; mutations are logged and dropped
    runtime::initialize();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(async move {
        let mut controller = ModelController::new();

        let loaded = if let Some(url) = url {
            controller.load_from_url(&url).await
        } else if let Some(name) = name {
            match ModelDict::load(&PathBuf::from(&dict_path)) {
                Ok(dict) => controller.load_by_name(&dict, &name).await,
                Err(e) => {
                    log::error!("failed to load dictionary: {e}");
                    false
                }
            }
        } else {
            false
        };

        if !loaded {
            log::error!("model load failed");
            std::process::exit(1);
        }

        if let Some(model) = controller.model() {
            log::info!("model id: {}", model.id);
            if let Some(obj) = model.config.as_object() {
                let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
                log::info!("config keys: {}", keys.join(", "));
            }
        }

        let mut timer = FrameTimer::new();
        for _ in 0..ticks {
            tokio::time::sleep(Duration::from_millis(16)).await;
            controller.update(timer.tick());
        }
        log::info!("ran {ticks} update ticks, last frame {:?}", timer.delta());
    });
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    parse_str_arg(args, flag).and_then(|v| v.parse().ok())
}
