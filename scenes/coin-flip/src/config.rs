//! Tunables for the coin flip

use serde::Deserialize;
use thiserror::Error;

/// Upper bound on `half_turn_choices`; keeps every target exact in `f32`.
pub const MAX_HALF_TURN_CHOICES: u32 = 10_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("flip_speed must be a positive number of degrees per tick, got {0}")]
    FlipSpeed(f32),

    #[error("flip_speed must be a whole number of quarter degrees dividing 180, got {0}")]
    UnevenFlipSpeed(f32),

    #[error("tick_period_ms must be a positive number of milliseconds, got {0}")]
    TickPeriod(f64),

    #[error("half_turn_choices must be at least 1")]
    NoHalfTurnChoices,

    #[error("half_turn_choices must be at most {MAX_HALF_TURN_CHOICES}, got {0}")]
    TooManyHalfTurnChoices(u32),

    #[error("idle_spin_deg_per_sec must be finite and not negative, got {0}")]
    IdleSpin(f32),
}

/// How the coin flips.
///
/// Defaults reproduce the classic scene: 30 degrees every 16ms, a target of
/// 0 to 29 half turns, and a slow idle spin of 10 degrees per second.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlipConfig {
    /// Degrees rotated per flip tick; a multiple of 0.25 that divides 180
    pub flip_speed: f32,
    /// Milliseconds between flip ticks
    pub tick_period_ms: f64,
    /// Number of possible targets; target is `k * 180` for `k` in `0..half_turn_choices`
    pub half_turn_choices: u32,
    /// Idle spin of every root entity about its up axis, 0 to disable.
    /// Children such as the coin engravings are not spun on their own; they
    /// turn with their parent.
    pub idle_spin_deg_per_sec: f32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            flip_speed: 30.0,
            tick_period_ms: 16.0,
            half_turn_choices: 30,
            idle_spin_deg_per_sec: 10.0,
        }
    }
}

impl FlipConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.flip_speed.is_finite() && self.flip_speed > 0.0) {
            return Err(ConfigError::FlipSpeed(self.flip_speed));
        }
        // Quarter degrees keep the running progress exact in f32
        if (180.0 / self.flip_speed).fract() != 0.0 || (self.flip_speed * 4.0).fract() != 0.0 {
            return Err(ConfigError::UnevenFlipSpeed(self.flip_speed));
        }
        if !(self.tick_period_ms.is_finite() && self.tick_period_ms > 0.0) {
            return Err(ConfigError::TickPeriod(self.tick_period_ms));
        }
        if self.half_turn_choices == 0 {
            return Err(ConfigError::NoHalfTurnChoices);
        }
        if self.half_turn_choices > MAX_HALF_TURN_CHOICES {
            return Err(ConfigError::TooManyHalfTurnChoices(self.half_turn_choices));
        }
        if !(self.idle_spin_deg_per_sec.is_finite() && self.idle_spin_deg_per_sec >= 0.0) {
            return Err(ConfigError::IdleSpin(self.idle_spin_deg_per_sec));
        }
        Ok(())
    }
}
