//! MeshResource - Geometry for procedural primitives
//!
//! # Example
//!
//! ```rust,ignore
//! use scenekit::MeshResource;
//!
//! let box_mesh = MeshResource::generate_box(1.0);
//! let coin_mesh = MeshResource::generate_cylinder(1.0, 1.0);
//! ```

use crate::Primitive;

/// Cylinders and spheres are tessellated with this many segments by the shell.
const DEFAULT_SEGMENTS: u32 = 32;

/// Mesh geometry resource for procedural primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshResource {
    Box { size: f32 },
    BoxWithDimensions { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Plane { width: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl MeshResource {
    /// Generate a box mesh with uniform size.
    pub fn generate_box(size: f32) -> Self {
        MeshResource::Box { size }
    }

    /// Generate a box mesh with specific dimensions.
    pub fn generate_box_with_dimensions(width: f32, height: f32, depth: f32) -> Self {
        MeshResource::BoxWithDimensions { width, height, depth }
    }

    /// Generate a sphere mesh.
    pub fn generate_sphere(radius: f32) -> Self {
        MeshResource::Sphere { radius }
    }

    /// Generate a plane mesh.
    pub fn generate_plane(width: f32, depth: f32) -> Self {
        MeshResource::Plane { width, depth }
    }

    /// Generate a cylinder mesh standing on the Y axis.
    pub fn generate_cylinder(radius: f32, height: f32) -> Self {
        MeshResource::Cylinder { radius, height }
    }

    pub(crate) fn to_primitive(&self) -> Primitive {
        match *self {
            MeshResource::Box { size } => Primitive::Cube { size },
            MeshResource::BoxWithDimensions { width, height, depth } => {
                Primitive::Box { width, height, depth }
            }
            MeshResource::Sphere { radius } => Primitive::Sphere { radius, segments: DEFAULT_SEGMENTS },
            MeshResource::Plane { width, depth } => Primitive::Plane { width, height: depth },
            MeshResource::Cylinder { radius, height } => {
                Primitive::Cylinder { radius, height, segments: DEFAULT_SEGMENTS }
            }
        }
    }
}
