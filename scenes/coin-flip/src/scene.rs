//! The coin flip scene as a shell-facing Core

use scenekit::{
    CameraData, Command, CommandHost, Core, Event, InitEvent, InputEvent, InputHandler, Intervals,
    KeyboardEvent, LifecycleEvent, LifecycleHandler, LogLevel, SceneEvent, SceneHandler, SceneHost,
};

use crate::config::{ConfigError, FlipConfig};
use crate::flip::CoinFlip;
use crate::layout::{self, SceneLayout};

const IDLE_SPIN_AXIS: [f32; 3] = [0.0, 1.0, 0.0];
const BACKGROUND: [f32; 4] = [0.05, 0.05, 0.1, 1.0];

/// Work scheduled on the scene's intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTimer {
    Flip,
}

/// A cube with a coin resting on it and a display above.
///
/// Activating the coin (or pressing Space) flips it; the display shows
/// `HEAD` or `TAIL` once it lands. `R` puts an idle coin back where it
/// started.
pub struct CoinFlipScene {
    config: FlipConfig,
    host: CommandHost,
    intervals: Intervals<SceneTimer>,
    layout: Option<SceneLayout>,
    flip: Option<CoinFlip>,
}

impl CoinFlipScene {
    pub fn with_config(config: FlipConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            host: CommandHost::new(),
            intervals: Intervals::new(),
            layout: None,
            flip: None,
        })
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    /// The coin's state machine, once the scene is initialized.
    pub fn flip(&self) -> Option<&CoinFlip> {
        self.flip.as_ref()
    }

    pub fn layout(&self) -> Option<&SceneLayout> {
        self.layout.as_ref()
    }

    fn init(&mut self, init: InitEvent) {
        if self.layout.is_some() {
            log::warn!("scene already initialized, ignoring Init");
            return;
        }

        self.host.reseed(init.random_seed);
        self.host.set_background(BACKGROUND);
        self.host.set_camera(CameraData {
            position: [8.0, 3.0, 12.0],
            target: [8.0, 1.6, 8.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        });

        let layout = layout::build(&mut self.host);
        self.flip = Some(CoinFlip::new(layout.coin.clone(), layout.display.clone(), &self.config));
        self.layout = Some(layout);

        let message = format!(
            "coin flip ready on {:?}, viewport: {}x{}",
            init.platform, init.viewport_width, init.viewport_height
        );
        self.host.log(LogLevel::Info, &message);
    }

    fn frame(&mut self, dt: f32) {
        let Some(layout) = &self.layout else {
            return;
        };

        let spin = dt * self.config.idle_spin_deg_per_sec;
        if spin > 0.0 {
            for root in layout.roots() {
                self.host.rotate(root, IDLE_SPIN_AXIS, spin);
            }
        }

        let Self { host, intervals, flip, .. } = self;
        intervals.run_frame(f64::from(dt), |intervals, _, task| match task {
            SceneTimer::Flip => {
                if let Some(flip) = flip.as_mut() {
                    flip.tick(host, intervals);
                }
            }
        });
    }

    fn activate_coin(&mut self) {
        match self.flip.as_mut() {
            Some(flip) => {
                flip.trigger(&mut self.host, &mut self.intervals, SceneTimer::Flip);
            }
            None => log::debug!("coin activated before Init"),
        }
    }

    fn reset_coin(&mut self) {
        let (Some(layout), Some(flip)) = (&self.layout, &self.flip) else {
            return;
        };
        if flip.is_flipping() {
            log::debug!("not resetting a coin in the air");
            return;
        }
        self.host.set_transform(&layout.coin, layout.coin_home);
    }

    fn shutdown(&mut self) {
        if let Some(flip) = self.flip.as_mut() {
            flip.halt(&mut self.intervals);
        }
        self.intervals.clear();
        if let Some(layout) = self.layout.take() {
            for root in layout.roots() {
                self.host.remove_entity(root);
            }
        }
        self.flip = None;
        self.host.log(LogLevel::Info, "coin flip shutting down");
    }
}

impl Default for CoinFlipScene {
    fn default() -> Self {
        Self {
            config: FlipConfig::default(),
            host: CommandHost::new(),
            intervals: Intervals::new(),
            layout: None,
            flip: None,
        }
    }
}

impl Core for CoinFlipScene {
    fn handle(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Lifecycle(e) => self.handle_lifecycle(e),
            Event::Input(e) => self.handle_input(e),
            Event::Scene(e) => self.handle_scene(e),
        }
    }
}

impl LifecycleHandler for CoinFlipScene {
    fn handle_lifecycle(&mut self, event: LifecycleEvent) -> Vec<Command> {
        match event {
            LifecycleEvent::Init(init) => self.init(init),
            LifecycleEvent::Frame(frame) => self.frame(frame.dt),
            LifecycleEvent::Pause => self.host.log(LogLevel::Info, "coin flip paused"),
            LifecycleEvent::Resume => self.host.log(LogLevel::Info, "coin flip resumed"),
            LifecycleEvent::Shutdown => self.shutdown(),
        }
        self.host.take_commands()
    }
}

impl InputHandler for CoinFlipScene {
    fn handle_input(&mut self, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::Keyboard(KeyboardEvent::KeyDown(key)) if !key.repeat => match key.code.as_str() {
                "Space" => self.activate_coin(),
                "KeyR" => self.reset_coin(),
                _ => {}
            },
            InputEvent::Keyboard(_) => {}
        }
        self.host.take_commands()
    }
}

impl SceneHandler for CoinFlipScene {
    fn handle_scene(&mut self, event: SceneEvent) -> Vec<Command> {
        match event {
            SceneEvent::VolumeActivated { volume_id } => {
                let is_coin = self.layout.as_ref().is_some_and(|layout| layout.coin == volume_id);
                if is_coin {
                    self.activate_coin();
                }
            }
            SceneEvent::VolumeReady { volume_id } => log::debug!("volume {} ready", volume_id),
        }
        self.host.take_commands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit::{FrameEvent, Platform, SceneCommand};

    fn init(seed: u64) -> Event {
        Event::Lifecycle(LifecycleEvent::Init(InitEvent {
            platform: Platform::Headless,
            viewport_width: 800,
            viewport_height: 600,
            random_seed: seed,
            features: Vec::new(),
        }))
    }

    fn frame(n: u64) -> Event {
        Event::Lifecycle(LifecycleEvent::Frame(FrameEvent { time: n as f64 * 0.016, dt: 0.016, frame: n }))
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = FlipConfig { half_turn_choices: 0, ..FlipConfig::default() };
        assert!(matches!(CoinFlipScene::with_config(config), Err(ConfigError::NoHalfTurnChoices)));
    }

    #[test]
    fn test_frames_before_init_do_nothing() {
        let mut scene = CoinFlipScene::default();
        assert!(scene.handle(frame(0)).is_empty());
        assert!(scene.flip().is_none());
    }

    #[test]
    fn test_idle_spin_rotates_roots_about_up() {
        let mut scene = CoinFlipScene::default();
        scene.handle(init(1));

        let commands = scene.handle(frame(1));
        let spun: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                Command::Scene(SceneCommand::Rotate(r)) => Some((r.volume_id.as_str(), r.axis)),
                _ => None,
            })
            .collect();
        assert_eq!(
            spun,
            vec![("cube", [0.0, 1.0, 0.0]), ("coin", [0.0, 1.0, 0.0]), ("display", [0.0, 1.0, 0.0])]
        );
    }

    #[test]
    fn test_init_twice_builds_once() {
        let mut scene = CoinFlipScene::default();
        let first = scene.handle(init(1));
        let second = scene.handle(init(1));
        assert!(!first.is_empty());
        assert!(second.is_empty());
    }
}
