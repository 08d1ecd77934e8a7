//! Point cloud storage shared by the ring and starfield generators.

/// A single generated point: where it sits and what color it has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Particle {
    /// Distance from the vertical (Y) axis
    pub fn radial_distance(&self) -> f32 {
        let [x, _, z] = self.position;
        (x * x + z * z).sqrt()
    }
}

/// Unconnected, individually colored points drawn as camera-facing sprites.
///
/// Positions and colors are stored as two parallel flat arrays of
/// `3 * len()` floats. Both arrays only ever grow together through
/// [`PointCloud::push`], so their lengths always match.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    positions: Vec<f32>,
    colors: Vec<f32>,
    opacity: f32,
    point_size: f32,
}

/// The point cloud produced for a single ring layer.
pub type RingPointCloud = PointCloud;

impl PointCloud {
    /// Creates an empty cloud with room for `count` particles
    ///
    /// # Arguments
    /// * `count` - Expected number of particles
    /// * `opacity` - Alpha applied to every particle when drawn
    /// * `point_size` - Sprite edge length in world units
    pub fn with_capacity(count: usize, opacity: f32, point_size: f32) -> Self {
        Self {
            positions: Vec::with_capacity(count * 3),
            colors: Vec::with_capacity(count * 3),
            opacity,
            point_size,
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.positions.extend_from_slice(&particle.position);
        self.colors.extend_from_slice(&particle.color);
    }

    /// Number of particles in the cloud
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x0, y0, z0, x1, ...]` position array
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r0, g0, b0, r1, ...]` color array
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        let base = index.checked_mul(3)?;
        let position = self.positions.get(base..base + 3)?;
        let color = self.colors.get(base..base + 3)?;
        Some(Particle {
            position: [position[0], position[1], position[2]],
            color: [color[0], color[1], color[2]],
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| Particle {
                position: [p[0], p[1], p[2]],
                color: [c[0], c[1], c[2]],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_arrays_parallel() {
        let mut cloud = PointCloud::with_capacity(2, 0.5, 0.05);
        assert!(cloud.is_empty());

        cloud.push(Particle {
            position: [1.0, 2.0, 3.0],
            color: [0.1, 0.2, 0.3],
        });
        cloud.push(Particle {
            position: [4.0, 5.0, 6.0],
            color: [0.4, 0.5, 0.6],
        });

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.positions().len(), 6);
        assert_eq!(cloud.colors().len(), 6);
        assert_eq!(cloud.positions()[3..], [4.0, 5.0, 6.0]);
        assert_eq!(cloud.opacity(), 0.5);
        assert_eq!(cloud.point_size(), 0.05);
    }

    #[test]
    fn test_particle_lookup() {
        let mut cloud = PointCloud::with_capacity(1, 1.0, 0.1);
        let particle = Particle {
            position: [3.0, -2.0, 4.0],
            color: [0.0, 0.4, 1.0],
        };
        cloud.push(particle);

        assert_eq!(cloud.particle(0), Some(particle));
        assert_eq!(cloud.particle(1), None);
        assert_eq!(cloud.particle(usize::MAX), None);
        assert_eq!(cloud.particles().collect::<Vec<_>>(), vec![particle]);
        assert!((particle.radial_distance() - 5.0).abs() < 1e-6);
    }
}
