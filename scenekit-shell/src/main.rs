//! scenekit-shell CLI binary
//!
//! Usage: scenekit-shell [--config scene.toml] [--wasm app.wasm] [--click FRAME]...

use std::path::PathBuf;

use clap::Parser;
use scenekit_shell::ShellConfig;

#[derive(Parser)]
#[command(name = "scenekit-shell")]
#[command(about = "Drive a scenekit scene headlessly and report what it displays", long_about = None)]
struct Cli {
    /// TOML file with shell and scene settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load the core from a WASM module instead of the built-in coin flip
    #[arg(long)]
    wasm: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Milliseconds per frame
    #[arg(long)]
    frame_ms: Option<f64>,

    /// Activate the target before this frame (repeatable)
    #[arg(long = "click")]
    clicks: Vec<u64>,

    /// Seed for the core's random source
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> scenekit_shell::Result<ShellConfig> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::load(path)?,
            None => ShellConfig::default(),
        };
        if self.wasm.is_some() {
            config.wasm = self.wasm;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_ms = frame_ms;
        }
        if !self.clicks.is_empty() {
            config.clicks = self.clicks;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = cli.into_config().and_then(|config| scenekit_shell::run(&config));

    match result {
        Ok(report) => {
            println!("seed: {}", report.seed);
            for (frame, value) in &report.text_changes {
                println!("frame {}: {}", frame, value);
            }
            println!("display: {}", report.display.as_deref().unwrap_or("<none>"));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
