//! scenekit-shell - drive a scene without a window
//!
//! The shell owns time, input and entropy. It sends `Init` with a seed,
//! then a fixed-length `Frame` per step, activating the target volume
//! before the configured frames, and applies every command to a [`Stage`].

pub mod config;
mod error;
pub mod runtime;
pub mod stage;

pub use config::ShellConfig;
pub use error::{Error, Result};
pub use runtime::{CoreDriver, NativeCore, WasmCore};
pub use stage::{Stage, TextChange, Volume};

use coin_flip::CoinFlipScene;
use scenekit_protocol::{Event, FrameEvent, InitEvent, LifecycleEvent, Platform, SceneEvent};

/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub seed: u64,
    pub frames: u64,
    /// Display changes as `(frame, value)`; frame 0 is Init
    pub text_changes: Vec<(u64, String)>,
    /// The display's value before shutdown
    pub display: Option<String>,
    /// The stage as it stood before shutdown
    pub stage: Stage,
}

/// Load the configured core and run it.
pub fn run(config: &ShellConfig) -> Result<Report> {
    config.validate()?;

    let mut driver: Box<dyn CoreDriver> = match &config.wasm {
        Some(path) => {
            if config.coin != coin_flip::FlipConfig::default() {
                log::warn!("[coin] settings only apply to the built-in scene, not {}", path.display());
            }
            Box::new(WasmCore::load(path)?)
        }
        None => Box::new(NativeCore::new(CoinFlipScene::with_config(config.coin.clone())?)),
    };

    run_with(driver.as_mut(), config)
}

/// Run an already loaded core.
pub fn run_with(driver: &mut dyn CoreDriver, config: &ShellConfig) -> Result<Report> {
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("running {} frames of {}ms with seed {}", config.frames, config.frame_ms, seed);

    let mut stage = Stage::new();
    let mut text_changes = Vec::new();
    let mut record = |frame: u64, changes: Vec<TextChange>| {
        for change in changes {
            if change.volume_id == config.display {
                log::info!("frame {}: {} = {}", frame, change.volume_id, change.value);
                text_changes.push((frame, change.value));
            }
        }
    };

    let init = Event::Lifecycle(LifecycleEvent::Init(InitEvent {
        platform: Platform::Headless,
        viewport_width: 1280,
        viewport_height: 720,
        random_seed: seed,
        features: Vec::new(),
    }));
    record(0, stage.apply_all(driver.send(&init)?));

    let dt = config.dt();
    for frame in 1..=config.frames {
        if config.clicks.contains(&frame) {
            log::debug!("frame {}: activating {}", frame, config.target);
            let activated = Event::Scene(SceneEvent::VolumeActivated { volume_id: config.target.clone() });
            record(frame, stage.apply_all(driver.send(&activated)?));
        }

        let tick = Event::Lifecycle(LifecycleEvent::Frame(FrameEvent {
            time: frame as f64 * config.frame_ms / 1000.0,
            dt,
            frame,
        }));
        record(frame, stage.apply_all(driver.send(&tick)?));
    }

    let display = stage.text(&config.display).map(str::to_string);
    let snapshot = stage.clone();
    stage.apply_all(driver.send(&Event::Lifecycle(LifecycleEvent::Shutdown))?);
    if !stage.is_empty() {
        log::warn!("{} volumes left after shutdown", stage.len());
    }

    Ok(Report {
        seed,
        frames: config.frames,
        text_changes,
        display,
        stage: snapshot,
    })
}
