//! SceneHost - What a scene may ask of the runtime hosting it
//!
//! Scene logic talks to the host through this trait instead of emitting
//! protocol commands by hand. That keeps state machines testable against a
//! fake host, while [`CommandHost`] turns the same calls into [`Command`]s
//! for a real shell.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entity::EntityKind;
use crate::{
    BackgroundData, CameraData, Command, DebugCommand, EnvironmentCommand, LogLevel, RotateData,
    SceneCommand, SetTransformData, Transform, VolumeId,
};

/// Capabilities a scene consumes from its host.
pub trait SceneHost {
    /// Register an entity (and its children) in the live scene.
    fn add_entity(&mut self, entity: EntityKind) -> VolumeId;

    /// Remove an entity and everything parented to it.
    fn remove_entity(&mut self, volume_id: &str);

    /// Rotate about a local `axis`, composing with the current orientation.
    fn rotate(&mut self, volume_id: &str, axis: [f32; 3], degrees: f32);

    /// Replace the local transform outright.
    fn set_transform(&mut self, volume_id: &str, transform: Transform);

    /// Change the value of a text entity.
    fn set_text(&mut self, volume_id: &str, text: &str);

    /// Uniform sample in `[0, 1)`.
    fn random(&mut self) -> f32;

    fn log(&mut self, level: LogLevel, message: &str);
}

/// A [`SceneHost`] that buffers protocol commands for the shell.
///
/// The random source is a seeded `StdRng`; the shell hands over a seed in
/// `Init` so runs are reproducible.
pub struct CommandHost {
    commands: Vec<Command>,
    rng: StdRng,
}

impl CommandHost {
    pub fn new() -> Self {
        Self::seeded(0)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            commands: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn set_background(&mut self, color: [f32; 4]) {
        self.commands.push(Command::Environment(EnvironmentCommand::SetBackground(
            BackgroundData::Color(color),
        )));
    }

    pub fn set_camera(&mut self, camera: CameraData) {
        self.commands
            .push(Command::Environment(EnvironmentCommand::SetCamera(camera)));
    }

    /// Commands queued since the last call.
    pub fn pending(&self) -> &[Command] {
        &self.commands
    }

    /// Take the queued commands, leaving the buffer empty.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for CommandHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHost for CommandHost {
    fn add_entity(&mut self, entity: EntityKind) -> VolumeId {
        entity.collect_commands(None, &mut self.commands);
        entity.id().to_string()
    }

    fn remove_entity(&mut self, volume_id: &str) {
        self.commands.push(Command::Scene(SceneCommand::DestroyVolume {
            volume_id: volume_id.to_string(),
        }));
    }

    fn rotate(&mut self, volume_id: &str, axis: [f32; 3], degrees: f32) {
        self.commands.push(Command::Scene(SceneCommand::Rotate(RotateData {
            volume_id: volume_id.to_string(),
            axis,
            degrees,
        })));
    }

    fn set_transform(&mut self, volume_id: &str, transform: Transform) {
        self.commands.push(Command::Scene(SceneCommand::SetTransform(SetTransformData {
            volume_id: volume_id.to_string(),
            transform,
        })));
    }

    fn set_text(&mut self, volume_id: &str, text: &str) {
        self.commands.push(Command::Scene(SceneCommand::SetText {
            volume_id: volume_id.to_string(),
            value: text.to_string(),
        }));
    }

    fn random(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        let local = match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        };
        log::log!(local, "{}", message);
        self.commands.push(Command::Debug(DebugCommand::Log {
            level,
            message: message.to_string(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeshResource, ModelEntity, SimpleMaterial, TextEntity};

    #[test]
    fn test_add_entity_returns_root_id_and_queues_tree() {
        let mut host = CommandHost::new();
        let mut cube = ModelEntity::with_id("cube", MeshResource::generate_box(1.0), SimpleMaterial::new());
        cube.add_child(TextEntity::with_id("label", "cube"));

        let id = host.add_entity(cube.into());

        assert_eq!(id, "cube");
        assert_eq!(host.pending().len(), 2);
    }

    #[test]
    fn test_take_commands_drains_buffer() {
        let mut host = CommandHost::new();
        host.set_text("display", "HEAD");
        host.rotate("coin", [-1.0, 0.0, 0.0], 30.0);

        let commands = host.take_commands();
        assert_eq!(commands.len(), 2);
        assert!(host.pending().is_empty());
        assert_eq!(
            commands[0],
            Command::Scene(SceneCommand::SetText {
                volume_id: "display".to_string(),
                value: "HEAD".to_string(),
            })
        );
    }

    #[test]
    fn test_random_is_in_unit_range_and_reproducible() {
        let mut a = CommandHost::seeded(7);
        let mut b = CommandHost::seeded(7);
        for _ in 0..1000 {
            let sample = a.random();
            assert!((0.0..1.0).contains(&sample));
            assert_eq!(sample, b.random());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut host = CommandHost::seeded(42);
        let first = host.random();
        host.random();
        host.reseed(42);
        assert_eq!(host.random(), first);
    }

    #[test]
    fn test_log_is_forwarded_to_shell() {
        let mut host = CommandHost::new();
        host.log(LogLevel::Warn, "careful");
        assert_eq!(
            host.take_commands(),
            vec![Command::Debug(DebugCommand::Log {
                level: LogLevel::Warn,
                message: "careful".to_string(),
            })]
        );
    }
}
