//! Coin flip - a coin on a cube that lands on heads or tails
//!
//! Activate the coin and it flips a random whole number of half turns,
//! 30 degrees per tick, then the display above it reads `HEAD` or `TAIL`.
//!
//! Built natively this is a library whose [`CoinFlipScene`] can be driven
//! in-process; built for `wasm32` it exports the scenekit FFI entry points.

pub mod config;
pub mod flip;
pub mod layout;
pub mod scene;

pub use config::{ConfigError, FlipConfig};
pub use flip::{CoinFlip, Face, FlipState};
pub use scene::{CoinFlipScene, SceneTimer};

/// The scene a shell loads.
#[scenekit::app]
pub fn scene() -> CoinFlipScene {
    CoinFlipScene::default()
}
