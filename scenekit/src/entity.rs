//! Entity - Things placed in a scene
//!
//! - `ModelEntity`: a procedural mesh with a material
//! - `TextEntity`: a floating text label
//!
//! Both can carry children. A child's transform is relative to its parent,
//! so moving or rotating the parent carries the children along.
//!
//! # Example
//!
//! ```rust,ignore
//! use scenekit::{ModelEntity, MeshResource, SimpleMaterial, TextEntity};
//!
//! let mut coin = ModelEntity::with_id(
//!     "coin",
//!     MeshResource::generate_cylinder(1.0, 1.0),
//!     SimpleMaterial::new().color(1.0, 1.0, 0.0),
//! )
//! .position(8.0, 1.6, 8.0)
//! .scale_xyz(0.1, 0.01, 0.1);
//!
//! coin.add_child(TextEntity::new("N").position(0.0, 0.6, 0.0));
//! ```

use crate::{MeshResource, SimpleMaterial};
use crate::{Command, CreateVolumeData, SceneCommand, TextData, Transform, VolumeId, VolumeSource};

/// Different kinds of entities.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    ModelEntity(ModelEntity),
    TextEntity(TextEntity),
}

impl EntityKind {
    pub fn id(&self) -> &str {
        match self {
            EntityKind::ModelEntity(e) => e.id(),
            EntityKind::TextEntity(e) => e.id(),
        }
    }

    pub fn children(&self) -> &[EntityKind] {
        match self {
            EntityKind::ModelEntity(e) => e.children(),
            EntityKind::TextEntity(e) => e.children(),
        }
    }

    /// Flatten this entity and its children into create commands.
    ///
    /// Parents are always emitted before their children.
    pub(crate) fn collect_commands(&self, parent: Option<&VolumeId>, commands: &mut Vec<Command>) {
        let data = match self {
            EntityKind::ModelEntity(e) => e.to_create_data(parent),
            EntityKind::TextEntity(e) => e.to_create_data(parent),
        };
        let id = data.volume_id.clone();
        commands.push(Command::Scene(SceneCommand::CreateVolume(data)));
        for child in self.children() {
            child.collect_commands(Some(&id), commands);
        }
    }
}

/// Model entity - an entity with a mesh and a material.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntity {
    id: VolumeId,
    mesh: MeshResource,
    material: SimpleMaterial,
    transform: Transform,
    children: Vec<EntityKind>,
}

impl ModelEntity {
    /// Create a new model entity with mesh and material.
    pub fn new(mesh: MeshResource, material: SimpleMaterial) -> Self {
        Self::with_id(generate_id(), mesh, material)
    }

    /// Create a model entity with a specific ID.
    pub fn with_id(id: impl Into<VolumeId>, mesh: MeshResource, material: SimpleMaterial) -> Self {
        Self {
            id: id.into(),
            mesh,
            material,
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    /// Get the entity's ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Set position with individual components (builder style).
    pub fn position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = [x, y, z];
        self
    }

    /// Set the orientation from Euler angles in degrees (builder style).
    pub fn euler_degrees(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = euler_to_quat(x, y, z);
        self
    }

    /// Set uniform scale (builder style).
    pub fn scale(mut self, s: f32) -> Self {
        self.transform.scale = [s, s, s];
        self
    }

    /// Set per-axis scale (builder style).
    pub fn scale_xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.scale = [x, y, z];
        self
    }

    /// Add a child entity.
    pub fn add_child(&mut self, child: impl Into<EntityKind>) {
        self.children.push(child.into());
    }

    /// Get children.
    pub fn children(&self) -> &[EntityKind] {
        &self.children
    }

    fn to_create_data(&self, parent: Option<&VolumeId>) -> CreateVolumeData {
        CreateVolumeData {
            volume_id: self.id.clone(),
            parent: parent.cloned(),
            source: VolumeSource::Primitive(self.mesh.to_primitive()),
            transform: self.transform,
            material: Some(self.material.to_override()),
        }
    }
}

/// Text entity - a floating label whose value can be changed later with
/// [`SceneHost::set_text`](crate::SceneHost::set_text).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntity {
    id: VolumeId,
    value: String,
    color: [f32; 4],
    transform: Transform,
    children: Vec<EntityKind>,
}

impl TextEntity {
    /// Create a new white text entity.
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_id(generate_id(), value)
    }

    /// Create a text entity with a specific ID.
    pub fn with_id(id: impl Into<VolumeId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            color: [1.0, 1.0, 1.0, 1.0],
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Set the text color (RGB, values 0.0 to 1.0).
    pub fn color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b, 1.0];
        self
    }

    pub fn position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = [x, y, z];
        self
    }

    pub fn euler_degrees(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = euler_to_quat(x, y, z);
        self
    }

    pub fn scale(mut self, s: f32) -> Self {
        self.transform.scale = [s, s, s];
        self
    }

    pub fn add_child(&mut self, child: impl Into<EntityKind>) {
        self.children.push(child.into());
    }

    pub fn children(&self) -> &[EntityKind] {
        &self.children
    }

    fn to_create_data(&self, parent: Option<&VolumeId>) -> CreateVolumeData {
        CreateVolumeData {
            volume_id: self.id.clone(),
            parent: parent.cloned(),
            source: VolumeSource::Text(TextData {
                value: self.value.clone(),
                color: self.color,
            }),
            transform: self.transform,
            material: None,
        }
    }
}

// Conversions to EntityKind
impl From<ModelEntity> for EntityKind {
    fn from(e: ModelEntity) -> Self {
        EntityKind::ModelEntity(e)
    }
}

impl From<TextEntity> for EntityKind {
    fn from(e: TextEntity) -> Self {
        EntityKind::TextEntity(e)
    }
}

/// Yaw (Y), then pitch (X), then roll (Z), all in degrees.
fn euler_to_quat(x: f32, y: f32, z: f32) -> [f32; 4] {
    glam::Quat::from_euler(
        glam::EulerRot::YXZ,
        y.to_radians(),
        x.to_radians(),
        z.to_radians(),
    )
    .to_array()
}

// Simple ID generation, only for entities the scene never needs to address
fn generate_id() -> VolumeId {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("entity-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(commands: &[Command]) -> Vec<(String, Option<String>)> {
        commands
            .iter()
            .filter_map(|command| match command {
                Command::Scene(SceneCommand::CreateVolume(data)) => {
                    Some((data.volume_id.clone(), data.parent.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_children_are_emitted_after_parent_with_parent_id() {
        let mut coin = ModelEntity::with_id(
            "coin",
            MeshResource::generate_cylinder(1.0, 1.0),
            SimpleMaterial::new(),
        );
        coin.add_child(TextEntity::with_id("heads", "N"));
        coin.add_child(TextEntity::with_id("tails", "A"));

        let mut commands = Vec::new();
        EntityKind::from(coin).collect_commands(None, &mut commands);

        assert_eq!(
            created(&commands),
            vec![
                ("coin".to_string(), None),
                ("heads".to_string(), Some("coin".to_string())),
                ("tails".to_string(), Some("coin".to_string())),
            ]
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TextEntity::new("a");
        let b = TextEntity::new("b");
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("entity-"));
    }

    #[test]
    fn test_euler_quarter_turn_about_x() {
        let text = TextEntity::new("N").euler_degrees(90.0, 0.0, 0.0);
        let [x, y, z, w] = text.transform().rotation;
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert!((x - half).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
        assert!(z.abs() < 1e-6);
        assert!((w - half).abs() < 1e-6);
    }

    #[test]
    fn test_text_source_carries_value_and_color() {
        let mut commands = Vec::new();
        EntityKind::from(TextEntity::with_id("label", "0").color(1.0, 0.0, 0.0))
            .collect_commands(None, &mut commands);

        match &commands[0] {
            Command::Scene(SceneCommand::CreateVolume(data)) => {
                assert_eq!(
                    data.source,
                    VolumeSource::Text(TextData { value: "0".to_string(), color: [1.0, 0.0, 0.0, 1.0] })
                );
                assert_eq!(data.material, None);
            }
            other => panic!("Expected CreateVolume, got {:?}", other),
        }
    }
}
