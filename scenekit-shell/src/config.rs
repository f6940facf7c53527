//! Shell configuration
//!
//! Read from a TOML file and then overridden by command line flags:
//!
//! ```toml
//! frames = 300
//! frame_ms = 16.0
//! clicks = [1, 120]
//! seed = 7
//!
//! [coin]
//! flip_speed = 30.0
//! idle_spin_deg_per_sec = 0.0
//! ```

use std::path::{Path, PathBuf};

use coin_flip::FlipConfig;
use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Number of frames to drive after Init
    pub frames: u64,
    /// Simulated frame length
    pub frame_ms: f64,
    /// Frames before which the target is activated
    pub clicks: Vec<u64>,
    /// Seed handed to the core; random when absent
    pub seed: Option<u64>,
    /// Volume the clicks activate
    pub target: String,
    /// Text volume whose value is reported
    pub display: String,
    /// Load the core from this module instead of running it in-process
    pub wasm: Option<PathBuf>,
    /// Settings for the in-process coin scene
    pub coin: FlipConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_ms: 16.0,
            clicks: vec![1],
            seed: None,
            target: "coin".to_string(),
            display: "display".to_string(),
            wasm: None,
            coin: FlipConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(Error::Settings(format!(
                "frame_ms must be a positive number of milliseconds, got {}",
                self.frame_ms
            )));
        }
        if self.target.is_empty() {
            return Err(Error::Settings("target must name a volume".to_string()));
        }
        self.coin.validate()?;
        Ok(())
    }

    /// Seconds per frame, as sent in `Frame` events.
    pub fn dt(&self) -> f32 {
        (self.frame_ms / 1000.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config: ShellConfig = toml::from_str("").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: ShellConfig = toml::from_str(
            r#"
            frames = 120
            clicks = [3, 90]
            seed = 7

            [coin]
            idle_spin_deg_per_sec = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.frames, 120);
        assert_eq!(config.clicks, vec![3, 90]);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.frame_ms, 16.0);
        assert_eq!(config.coin.idle_spin_deg_per_sec, 0.0);
        assert_eq!(config.coin.flip_speed, 30.0);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<ShellConfig>("frame = 3").is_err());
        assert!(toml::from_str::<ShellConfig>("[coin]\nspeed = 3.0").is_err());
    }

    #[test]
    fn test_validate_checks_frame_ms_and_coin() {
        let config = ShellConfig { frame_ms: 0.0, ..ShellConfig::default() };
        assert!(matches!(config.validate(), Err(Error::Settings(_))));

        let mut config = ShellConfig::default();
        config.coin.flip_speed = -1.0;
        assert!(matches!(config.validate(), Err(Error::Scene(_))));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let path = std::env::temp_dir().join(format!("scenekit-missing-{}.toml", std::process::id()));
        assert!(matches!(ShellConfig::load(&path), Err(Error::ReadConfig { .. })));
    }

    #[test]
    fn test_dt_from_frame_ms() {
        let config = ShellConfig::default();
        assert_eq!(config.dt(), 0.016);
    }
}
