//! scenekit - small interactive spatial scenes in Rust
//!
//! A scene is a [`Core`]: it receives [`Event`]s from a shell (frame ticks,
//! activations, lifecycle) and answers with [`Command`]s (create volumes,
//! rotate them, change text). The shell owns rendering, input and timing.
//!
//! Scene logic is written against [`SceneHost`] and [`Intervals`]:
//!
//! ```rust,ignore
//! use scenekit::{CommandHost, Intervals, SceneHost, TextEntity};
//!
//! let mut host = CommandHost::new();
//! let mut intervals = Intervals::new();
//!
//! let label = host.add_entity(TextEntity::with_id("label", "0").into());
//! intervals.start("count", 1000.0);
//!
//! // on every Frame event:
//! intervals.run_frame(dt, |_, _, _| host.set_text(&label, "tick"));
//! ```
//!
//! For WASM builds, mark the constructor with `#[scenekit::app]` to export
//! the FFI entry points a shell expects.

pub mod entity;
pub mod host;
pub mod interval;
pub mod material;
pub mod mesh;
pub mod wasm_bridge;

pub use entity::{EntityKind, ModelEntity, TextEntity};
pub use host::{CommandHost, SceneHost};
pub use interval::{Intervals, TimerHandle};
pub use material::SimpleMaterial;
pub use mesh::MeshResource;
pub use scenekit_macros::app;
pub use scenekit_protocol::*;
