//! The coin flip state machine
//!
//! `Idle` until triggered. A trigger picks a target rotation that is a
//! multiple of 180 degrees and starts an interval; each interval tick either
//! resolves the flip (target reached) or rotates the coin by `flip_speed`.
//! Triggers that arrive mid-flip are ignored.
//!
//! The target-reached check runs before the rotation, so the tick that
//! observes `progress >= target` does not rotate. With a speed that divides
//! 180 the progress lands exactly on the target.

use std::fmt;

use scenekit::{Intervals, LogLevel, SceneHost, TimerHandle, VolumeId};

use crate::config::FlipConfig;

/// The coin flips about its local left axis.
pub const FLIP_AXIS: [f32; 3] = [-1.0, 0.0, 0.0];

const HALF_TURN: f32 = 180.0;

/// Which side the coin landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Head,
    Tail,
}

impl Face {
    /// Even numbers of half turns show heads, odd numbers tails.
    pub fn for_target(target_degrees: f32) -> Self {
        let half_turns = (target_degrees / HALF_TURN).round() as u64;
        if half_turns % 2 == 0 { Face::Head } else { Face::Tail }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Head => "HEAD",
            Face::Tail => "TAIL",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of the current (or last) flip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlipState {
    pub is_flipping: bool,
    /// Degrees rotated since the flip started
    pub flip_progress: f32,
    /// Degrees to rotate before resolving, always a multiple of 180
    pub target_degrees: f32,
}

/// Map a uniform sample in `[0, 1)` to one of `half_turn_choices` targets.
pub fn pick_target(sample: f32, half_turn_choices: u32) -> f32 {
    let choices = half_turn_choices as f32;
    let half_turns = (sample * choices).floor().clamp(0.0, choices - 1.0);
    half_turns * HALF_TURN
}

/// Drives one coin and its result display.
#[derive(Debug)]
pub struct CoinFlip {
    coin: VolumeId,
    display: VolumeId,
    flip_speed: f32,
    tick_period_ms: f64,
    half_turn_choices: u32,
    state: FlipState,
    timer: Option<TimerHandle>,
    last_face: Option<Face>,
}

impl CoinFlip {
    pub fn new(coin: impl Into<VolumeId>, display: impl Into<VolumeId>, config: &FlipConfig) -> Self {
        Self {
            coin: coin.into(),
            display: display.into(),
            flip_speed: config.flip_speed,
            tick_period_ms: config.tick_period_ms,
            half_turn_choices: config.half_turn_choices,
            state: FlipState::default(),
            timer: None,
            last_face: None,
        }
    }

    pub fn coin(&self) -> &str {
        &self.coin
    }

    pub fn state(&self) -> &FlipState {
        &self.state
    }

    pub fn is_flipping(&self) -> bool {
        self.state.is_flipping
    }

    /// The interval driving the current flip.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn last_face(&self) -> Option<Face> {
        self.last_face
    }

    /// Start a flip unless one is already running.
    ///
    /// `task` is the token the caller's interval dispatcher maps back to
    /// [`CoinFlip::tick`]. Returns whether a flip started.
    pub fn trigger<H, T>(&mut self, host: &mut H, intervals: &mut Intervals<T>, task: T) -> bool
    where
        H: SceneHost,
        T: Clone,
    {
        if self.state.is_flipping {
            log::debug!("flip already running, ignoring trigger");
            return false;
        }

        let target_degrees = pick_target(host.random(), self.half_turn_choices);
        self.state = FlipState {
            is_flipping: true,
            flip_progress: 0.0,
            target_degrees,
        };
        self.timer = Some(intervals.start(task, self.tick_period_ms));
        log::info!("flipping {} towards {} degrees", self.coin, target_degrees);
        true
    }

    /// Advance the running flip by one tick. Returns the face once it lands.
    pub fn tick<H, T>(&mut self, host: &mut H, intervals: &mut Intervals<T>) -> Option<Face>
    where
        H: SceneHost,
        T: Clone,
    {
        if !self.state.is_flipping {
            return None;
        }

        if self.state.flip_progress >= self.state.target_degrees {
            if let Some(timer) = self.timer.take() {
                intervals.cancel(timer);
            }
            self.state.is_flipping = false;

            let face = Face::for_target(self.state.target_degrees);
            self.last_face = Some(face);
            host.set_text(&self.display, face.as_str());
            host.log(
                LogLevel::Info,
                &format!("coin landed on {} after {} degrees", face, self.state.target_degrees),
            );
            return Some(face);
        }

        host.rotate(&self.coin, FLIP_AXIS, self.flip_speed);
        self.state.flip_progress += self.flip_speed;
        None
    }

    /// Abandon a running flip without reporting a result.
    pub fn halt<T: Clone>(&mut self, intervals: &mut Intervals<T>) {
        if let Some(timer) = self.timer.take() {
            intervals.cancel(timer);
        }
        self.state.is_flipping = false;
    }
}
