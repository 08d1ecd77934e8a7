//! # Procedural Geometry Generation
//!
//! This module generates everything the scene draws without loading a single
//! asset file: triangle meshes for the planet and moons, and point clouds for
//! the particle rings and the starfield.
//!
//! ## Supported Shapes
//!
//! - **Sphere**: UV sphere with configurable resolution ([`generate_sphere`])
//! - **Ring**: annular dust cloud around a central body ([`RingGenerator`])
//! - **Starfield**: stars scattered through a cube ([`StarfieldGenerator`])
//!
//! ## Usage
//!
//! ```rust
//! use ringed_planet::gfx::geometry::{generate_sphere, RingGenerator, RingSpec};
//!
//! // Generate a sphere with 32 segments
//! let sphere_data = generate_sphere(32, 32);
//!
//! // Generate the inner ring with a reproducible random source
//! let mut rings = RingGenerator::seeded(7);
//! let inner = rings.generate(&RingSpec::new(2.3, 5000, 0.8)).unwrap();
//! assert_eq!(inner.len(), 5000);
//! ```

pub mod point_cloud;
pub mod primitives;
pub mod ring;
pub mod starfield;

pub use point_cloud::{Particle, PointCloud, RingPointCloud};
pub use primitives::generate_sphere;
pub use ring::{RingGenerator, RingSpec};
pub use starfield::{StarfieldGenerator, StarfieldSpec};

/// Errors raised by the procedural generators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// An input was outside the range the generator can work with.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Convert to the interleaved vertex format used by the mesh pipeline
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
