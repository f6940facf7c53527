//! Shell-Core Protocol
//!
//! Scenes use a shell-core architecture:
//! - **Shell**: Platform-specific host (native headless shell, WASM host, engine)
//!   - Owns entities, transforms, rendering and input
//!   - Delivers frame ticks and activation events
//!   - Executes scene commands
//!
//! - **Core**: Platform-agnostic Rust code
//!   - Receives Events from shell
//!   - Maintains scene state machine
//!   - Emits Commands for shell to execute
//!   - No threads, purely event-driven
//!
//! ## Architecture
//!
//! Events and Commands use an enum-of-enums pattern for modularity:
//! - Handlers can subscribe to specific event categories
//! - Modules only see events relevant to them

use serde::{Deserialize, Serialize};

// ============================================================================
// IDs - All IDs are opaque strings
// ============================================================================

/// Unique identifier for volumes/objects in the scene
pub type VolumeId = String;

/// Unique identifier for input devices
pub type DeviceId = String;

// ============================================================================
// EVENTS (Shell -> Core)
// ============================================================================

/// Top-level events sent from Shell to Core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "event")]
pub enum Event {
    /// Application lifecycle events
    Lifecycle(LifecycleEvent),
    /// Input device events
    Input(InputEvent),
    /// Scene/volume events
    Scene(SceneEvent),
}

// ----------------------------------------------------------------------------
// Lifecycle Events
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LifecycleEvent {
    /// Shell initialized, provides capabilities
    Init(InitEvent),
    /// Render frame requested (called every frame)
    Frame(FrameEvent),
    /// Application going to background
    Pause,
    /// Application resuming from background
    Resume,
    /// Application shutting down
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitEvent {
    pub platform: Platform,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Seed for the core's random source. The shell owns entropy.
    #[serde(default)]
    pub random_seed: u64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Headless,
    Wasm,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Seconds since the shell started
    pub time: f64,
    /// Seconds since the previous frame
    pub dt: f32,
    pub frame: u64,
}

// ----------------------------------------------------------------------------
// Input Events
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    Keyboard(KeyboardEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum KeyboardEvent {
    KeyDown(KeyEventData),
    KeyUp(KeyEventData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEventData {
    pub device_id: DeviceId,
    pub key: String,
    pub code: String,
    #[serde(default)]
    pub repeat: bool,
}

// ----------------------------------------------------------------------------
// Scene Events
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    VolumeReady { volume_id: VolumeId },
    /// The user clicked, tapped or otherwise activated a volume.
    /// Picking is done by the shell.
    VolumeActivated { volume_id: VolumeId },
}

// ============================================================================
// COMMANDS (Core -> Shell)
// ============================================================================

/// Top-level commands sent from Core to Shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "command")]
pub enum Command {
    /// Scene/volume commands
    Scene(SceneCommand),
    /// Environment commands (camera, background)
    Environment(EnvironmentCommand),
    /// Debug/logging commands
    Debug(DebugCommand),
}

// ----------------------------------------------------------------------------
// Scene Commands
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum SceneCommand {
    CreateVolume(CreateVolumeData),
    DestroyVolume { volume_id: VolumeId },
    SetTransform(SetTransformData),
    /// Rotate about a local axis, composing with the current orientation.
    Rotate(RotateData),
    SetText { volume_id: VolumeId, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVolumeData {
    pub volume_id: VolumeId,
    #[serde(default)]
    pub parent: Option<VolumeId>,
    pub source: VolumeSource,
    pub transform: Transform,
    pub material: Option<MaterialOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VolumeSource {
    Primitive(Primitive),
    Text(TextData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Cube { size: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, segments: u32 },
    Cylinder { radius: f32, height: f32, segments: u32 },
    Plane { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub value: String,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTransformData {
    pub volume_id: VolumeId,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotateData {
    pub volume_id: VolumeId,
    /// Axis in the volume's local space
    pub axis: [f32; 3],
    pub degrees: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialOverride {
    pub color: Option<[f32; 4]>,
    pub metallic: Option<f32>,
    pub roughness: Option<f32>,
}

// ----------------------------------------------------------------------------
// Environment Commands
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum EnvironmentCommand {
    SetCamera(CameraData),
    SetBackground(BackgroundData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BackgroundData {
    Color([f32; 4]),
    Transparent,
}

// ----------------------------------------------------------------------------
// Debug Commands
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum DebugCommand {
    Log { level: LogLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

// ============================================================================
// CORE TRAIT
// ============================================================================

/// Trait that the application implements
pub trait Core {
    /// Handle an event from the shell
    /// Returns commands for the shell to execute
    fn handle(&mut self, event: Event) -> Vec<Command>;
}

impl<C: Core + ?Sized> Core for Box<C> {
    fn handle(&mut self, event: Event) -> Vec<Command> {
        (**self).handle(event)
    }
}

// ============================================================================
// HELPER TRAITS FOR MODULAR HANDLERS
// ============================================================================

/// Handler for lifecycle events
pub trait LifecycleHandler {
    fn handle_lifecycle(&mut self, event: LifecycleEvent) -> Vec<Command>;
}

/// Handler for input events
pub trait InputHandler {
    fn handle_input(&mut self, event: InputEvent) -> Vec<Command>;
}

/// Handler for scene events
pub trait SceneHandler {
    fn handle_scene(&mut self, event: SceneEvent) -> Vec<Command>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_json() {
        let json = r#"{"category":"Lifecycle","event":{"type":"Frame","time":1.5,"dt":0.016,"frame":90}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match event {
            Event::Lifecycle(LifecycleEvent::Frame(frame)) => {
                assert_eq!(frame.frame, 90);
                assert!((frame.dt - 0.016).abs() < f32::EPSILON);
            }
            _ => panic!("Expected Lifecycle::Frame event"),
        }
    }

    #[test]
    fn test_lifecycle_init_json() {
        let json = r#"{"category":"Lifecycle","event":{"type":"Init","platform":"Headless","viewport_width":1280,"viewport_height":720}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match event {
            Event::Lifecycle(LifecycleEvent::Init(data)) => {
                assert_eq!(data.viewport_width, 1280);
                assert!(data.features.is_empty());
            }
            _ => panic!("Expected Lifecycle::Init event"),
        }
    }

    #[test]
    fn test_volume_activated_json() {
        let json = r#"{"category":"Scene","event":{"type":"VolumeActivated","volume_id":"entity-3"}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            Event::Scene(SceneEvent::VolumeActivated { volume_id: "entity-3".to_string() })
        );
    }

    #[test]
    fn test_rotate_command_json() {
        let command = Command::Scene(SceneCommand::Rotate(RotateData {
            volume_id: "coin".to_string(),
            axis: [-1.0, 0.0, 0.0],
            degrees: 30.0,
        }));
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["category"], "Scene");
        assert_eq!(json["command"]["action"], "Rotate");
        assert_eq!(json["command"]["volume_id"], "coin");
        assert_eq!(json["command"]["degrees"], 30.0);
    }

    #[test]
    fn test_create_volume_without_parent_field() {
        let json = r#"{"category":"Scene","command":{"action":"CreateVolume","volume_id":"v","source":{"Text":{"value":"0","color":[1.0,1.0,1.0,1.0]}},"transform":{"position":[0.0,0.0,0.0],"rotation":[0.0,0.0,0.0,1.0],"scale":[1.0,1.0,1.0]},"material":null}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        match command {
            Command::Scene(SceneCommand::CreateVolume(data)) => {
                assert_eq!(data.parent, None);
                assert!(matches!(data.source, VolumeSource::Text(ref t) if t.value == "0"));
            }
            _ => panic!("Expected Scene::CreateVolume command"),
        }
    }
}
