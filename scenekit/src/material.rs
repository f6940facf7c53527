//! Materials - Surface appearance
//!
//! # Example
//!
//! ```rust,ignore
//! use scenekit::SimpleMaterial;
//!
//! let red = SimpleMaterial::new().color(1.0, 0.0, 0.0);
//!
//! // Polished gold
//! let gold = SimpleMaterial::new()
//!     .color(1.0, 1.0, 0.0)
//!     .metallic(0.9)
//!     .roughness(0.1);
//! ```

/// Simple material with color and basic PBR properties.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleMaterial {
    pub(crate) color: [f32; 4],
    pub(crate) metallic: f32,
    pub(crate) roughness: f32,
}

impl Default for SimpleMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],  // White
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

impl SimpleMaterial {
    /// Create a new simple material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color (RGB, values 0.0 to 1.0).
    pub fn color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b, 1.0];
        self
    }

    /// Set how metallic the surface is (0.0 = dielectric, 1.0 = metal).
    pub fn metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness (0.0 = smooth/glossy, 1.0 = rough/matte).
    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }
}

/// Convert SimpleMaterial to the protocol's MaterialOverride.
impl SimpleMaterial {
    pub(crate) fn to_override(&self) -> crate::MaterialOverride {
        crate::MaterialOverride {
            color: Some(self.color),
            metallic: Some(self.metallic),
            roughness: Some(self.roughness),
        }
    }
}
