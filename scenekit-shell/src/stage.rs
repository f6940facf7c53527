//! Stage - the shell's copy of the scene
//!
//! Applies core commands to a flat map of volumes. Rotations compose in
//! each volume's local frame, the same way a renderer would apply them.

use std::collections::HashMap;

use glam::{Mat4, Quat, Vec3};
use scenekit_protocol::{
    BackgroundData, CameraData, Command, CreateVolumeData, DebugCommand, EnvironmentCommand, LogLevel,
    MaterialOverride, SceneCommand, Transform, VolumeId, VolumeSource,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub parent: Option<VolumeId>,
    pub source: VolumeSource,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub material: Option<MaterialOverride>,
}

impl Volume {
    fn from_create(data: CreateVolumeData) -> Self {
        let mut volume = Self {
            parent: data.parent,
            source: data.source,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            material: data.material,
        };
        volume.set_transform(&data.transform);
        volume
    }

    fn set_transform(&mut self, transform: &Transform) {
        self.position = Vec3::from_array(transform.position);
        self.rotation = Quat::from_array(transform.rotation).normalize();
        self.scale = Vec3::from_array(transform.scale);
    }

    /// The current value if this is a text volume.
    pub fn text(&self) -> Option<&str> {
        match &self.source {
            VolumeSource::Text(text) => Some(&text.value),
            VolumeSource::Primitive(_) => None,
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A text volume whose value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChange {
    pub volume_id: VolumeId,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stage {
    volumes: HashMap<VolumeId, Volume>,
    background: Option<BackgroundData>,
    camera: Option<CameraData>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, volume_id: &str) -> Option<&Volume> {
        self.volumes.get(volume_id)
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn background(&self) -> Option<&BackgroundData> {
        self.background.as_ref()
    }

    pub fn camera(&self) -> Option<&CameraData> {
        self.camera.as_ref()
    }

    pub fn text(&self, volume_id: &str) -> Option<&str> {
        self.get(volume_id).and_then(Volume::text)
    }

    /// Apply a batch of commands, returning the text changes in order.
    pub fn apply_all(&mut self, commands: Vec<Command>) -> Vec<TextChange> {
        commands.into_iter().filter_map(|c| self.apply(c)).collect()
    }

    pub fn apply(&mut self, command: Command) -> Option<TextChange> {
        match command {
            Command::Scene(cmd) => self.apply_scene(cmd),
            Command::Environment(EnvironmentCommand::SetBackground(background)) => {
                self.background = Some(background);
                None
            }
            Command::Environment(EnvironmentCommand::SetCamera(camera)) => {
                self.camera = Some(camera);
                None
            }
            Command::Debug(DebugCommand::Log { level, message }) => {
                let level = match level {
                    LogLevel::Debug => log::Level::Debug,
                    LogLevel::Info => log::Level::Info,
                    LogLevel::Warn => log::Level::Warn,
                    LogLevel::Error => log::Level::Error,
                };
                log::log!(target: "core", level, "{}", message);
                None
            }
        }
    }

    fn apply_scene(&mut self, command: SceneCommand) -> Option<TextChange> {
        match command {
            SceneCommand::CreateVolume(data) => {
                if let Some(parent) = &data.parent {
                    if !self.volumes.contains_key(parent) {
                        log::warn!("volume {} names unknown parent {}", data.volume_id, parent);
                    }
                }
                let id = data.volume_id.clone();
                if self.volumes.insert(id.clone(), Volume::from_create(data)).is_some() {
                    log::warn!("volume {} created twice, replacing", id);
                }
                None
            }
            SceneCommand::DestroyVolume { volume_id } => {
                self.destroy(&volume_id);
                None
            }
            SceneCommand::SetTransform(data) => {
                match self.volumes.get_mut(&data.volume_id) {
                    Some(volume) => volume.set_transform(&data.transform),
                    None => log::warn!("SetTransform on unknown volume {}", data.volume_id),
                }
                None
            }
            SceneCommand::Rotate(data) => {
                let Some(volume) = self.volumes.get_mut(&data.volume_id) else {
                    log::warn!("Rotate on unknown volume {}", data.volume_id);
                    return None;
                };
                let Some(axis) = Vec3::from_array(data.axis).try_normalize() else {
                    log::warn!("Rotate on {} with a zero axis", data.volume_id);
                    return None;
                };
                let delta = Quat::from_axis_angle(axis, data.degrees.to_radians());
                volume.rotation = (volume.rotation * delta).normalize();
                None
            }
            SceneCommand::SetText { volume_id, value } => {
                let Some(volume) = self.volumes.get_mut(&volume_id) else {
                    log::warn!("SetText on unknown volume {}", volume_id);
                    return None;
                };
                match &mut volume.source {
                    VolumeSource::Text(text) => {
                        text.value = value.clone();
                        Some(TextChange { volume_id, value })
                    }
                    VolumeSource::Primitive(_) => {
                        log::warn!("SetText on non-text volume {}", volume_id);
                        None
                    }
                }
            }
        }
    }

    /// Remove a volume and everything parented to it.
    fn destroy(&mut self, volume_id: &str) {
        if self.volumes.remove(volume_id).is_none() {
            log::warn!("DestroyVolume on unknown volume {}", volume_id);
            return;
        }
        let children: Vec<VolumeId> = self
            .volumes
            .iter()
            .filter(|(_, v)| v.parent.as_deref() == Some(volume_id))
            .map(|(id, _)| id.clone())
            .collect();
        for child in children {
            self.destroy(&child);
        }
    }

    /// Local-to-world matrix following the parent chain.
    pub fn world_matrix(&self, volume_id: &str) -> Option<Mat4> {
        let volume = self.get(volume_id)?;
        let local = volume.local_matrix();
        match &volume.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    /// The volume's local up axis in world space.
    pub fn world_up(&self, volume_id: &str) -> Option<Vec3> {
        let matrix = self.world_matrix(volume_id)?;
        matrix.transform_vector3(Vec3::Y).try_normalize()
    }
}
