//! # Particle Ring Generation
//!
//! Builds the dust rings around the planet as point clouds. Each particle is
//! scattered uniformly over an annulus of fixed thickness lying flat in the
//! horizontal plane at the ring plane height.

use std::f32::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{GenerationError, Particle, PointCloud};
use crate::gfx::color::Hsl;

/// Radial width of every ring: particles land in `[radius, radius + 0.3)`
pub const RING_THICKNESS: f32 = 0.3;

/// Height of the ring plane, level with the planet's centre
pub const RING_PLANE_HEIGHT: f32 = -2.0;

/// Sprite size of a ring particle in world units
pub const RING_POINT_SIZE: f32 = 0.05;

/// Color shared by every particle of every ring
pub const RING_COLOR: Hsl = Hsl::new(0.6, 1.0, 0.5);

/// Parameters for a single ring layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    /// Inner radius of the ring, must be positive
    pub radius: f32,
    /// Number of particles to scatter (0 gives an empty ring)
    pub particle_count: usize,
    /// Alpha handed to the renderer, nominally in `[0, 1]`
    pub opacity: f32,
}

impl RingSpec {
    pub fn new(radius: f32, particle_count: usize, opacity: f32) -> Self {
        Self {
            radius,
            particle_count,
            opacity,
        }
    }
}

/// Generates ring point clouds from an injected random source.
///
/// The generator keeps no state between calls beyond the random source, so
/// two generators seeded identically produce identical rings.
pub struct RingGenerator<R> {
    rng: R,
    strict_opacity: bool,
    plane_height: f32,
    point_size: f32,
    color: Hsl,
}

impl RingGenerator<StdRng> {
    /// Creates a generator with a reproducible random source
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RingGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            strict_opacity: false,
            plane_height: RING_PLANE_HEIGHT,
            point_size: RING_POINT_SIZE,
            color: RING_COLOR,
        }
    }

    /// Rejects opacities outside `[0, 1]` instead of passing them through
    pub fn with_strict_opacity(mut self, strict: bool) -> Self {
        self.strict_opacity = strict;
        self
    }

    /// Moves the ring plane to a different height
    pub fn with_plane_height(mut self, height: f32) -> Self {
        self.plane_height = height;
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    /// Scatters `spec.particle_count` particles over the ring annulus
    ///
    /// # Errors
    /// [`GenerationError::InvalidArgument`] when the radius is not a positive
    /// finite number, or when strict opacity is enabled and the opacity lies
    /// outside `[0, 1]`.
    pub fn generate(&mut self, spec: &RingSpec) -> Result<PointCloud, GenerationError> {
        self.validate(spec)?;

        let color = self.color.to_rgb();
        let mut cloud =
            PointCloud::with_capacity(spec.particle_count, spec.opacity, self.point_size);

        for _ in 0..spec.particle_count {
            let r = spec.radius + self.rng.random_range(0.0..RING_THICKNESS);
            let angle = self.rng.random_range(0.0..TAU);

            cloud.push(Particle {
                position: [r * angle.cos(), self.plane_height, r * angle.sin()],
                color,
            });
        }

        log::debug!(
            "Generated ring r={} with {} particles (opacity {})",
            spec.radius,
            cloud.len(),
            spec.opacity
        );

        Ok(cloud)
    }

    fn validate(&self, spec: &RingSpec) -> Result<(), GenerationError> {
        if !spec.radius.is_finite() || spec.radius <= 0.0 {
            return Err(GenerationError::InvalidArgument {
                name: "radius",
                value: spec.radius,
                reason: "must be a positive finite number",
            });
        }

        if self.strict_opacity && !(0.0..=1.0).contains(&spec.opacity) {
            return Err(GenerationError::InvalidArgument {
                name: "opacity",
                value: spec.opacity,
                reason: "must lie in [0, 1]",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // f32 trig and storage can land a hair outside the sampled interval
    const EPSILON: f32 = 1e-4;

    fn assert_within_annulus(cloud: &PointCloud, radius: f32) {
        for particle in cloud.particles() {
            let distance = particle.radial_distance();
            assert!(
                distance >= radius - EPSILON && distance < radius + RING_THICKNESS + EPSILON,
                "particle at distance {} outside [{}, {})",
                distance,
                radius,
                radius + RING_THICKNESS
            );
        }
    }

    #[test]
    fn test_inner_ring_scenario() {
        let mut generator = RingGenerator::seeded(42);
        let cloud = generator.generate(&RingSpec::new(2.3, 5000, 0.8)).unwrap();

        assert_eq!(cloud.len(), 5000);
        assert_eq!(cloud.positions().len(), 15000);
        assert_eq!(cloud.colors().len(), 15000);
        assert_eq!(cloud.opacity(), 0.8);
        assert_eq!(cloud.point_size(), RING_POINT_SIZE);
        assert!(cloud.particles().all(|p| p.position[1] == RING_PLANE_HEIGHT));
        assert_within_annulus(&cloud, 2.3);
    }

    #[test]
    fn test_single_particle() {
        let mut generator = RingGenerator::seeded(1);
        let cloud = generator.generate(&RingSpec::new(1.0, 1, 1.0)).unwrap();

        assert_eq!(cloud.len(), 1);
        assert_within_annulus(&cloud, 1.0);
    }

    #[test]
    fn test_empty_ring() {
        let mut generator = RingGenerator::seeded(1);
        let cloud = generator.generate(&RingSpec::new(3.0, 0, 0.5)).unwrap();

        assert!(cloud.is_empty());
        assert!(cloud.positions().is_empty());
        assert!(cloud.colors().is_empty());
    }

    #[test]
    fn test_ring_has_thickness() {
        let mut generator = RingGenerator::seeded(9);
        let cloud = generator.generate(&RingSpec::new(3.0, 3000, 0.5)).unwrap();

        let (min, max) = cloud
            .particles()
            .map(|p| p.radial_distance())
            .fold((f32::MAX, f32::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)));
        assert!(max - min > 0.25, "ring spread {} too thin", max - min);
    }

    #[test]
    fn test_all_particles_share_ring_color() {
        let mut generator = RingGenerator::seeded(3);
        let cloud = generator.generate(&RingSpec::new(3.7, 2000, 0.3)).unwrap();
        let expected = RING_COLOR.to_rgb();

        assert!(cloud.particles().all(|p| p.color == expected));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let spec = RingSpec::new(2.3, 500, 0.8);
        let first = RingGenerator::seeded(1234).generate(&spec).unwrap();
        let second = RingGenerator::seeded(1234).generate(&spec).unwrap();
        let other = RingGenerator::seeded(4321).generate(&spec).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut generator = RingGenerator::seeded(0);
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = generator.generate(&RingSpec::new(radius, 10, 0.5));
            assert!(
                matches!(
                    result,
                    Err(GenerationError::InvalidArgument { name: "radius", .. })
                ),
                "radius {} should be rejected",
                radius
            );
        }
    }

    #[test]
    fn test_opacity_passes_through_unless_strict() {
        let spec = RingSpec::new(2.0, 4, 1.5);

        let lax = RingGenerator::seeded(0).generate(&spec).unwrap();
        assert_eq!(lax.opacity(), 1.5);

        let strict = RingGenerator::seeded(0)
            .with_strict_opacity(true)
            .generate(&spec);
        assert!(matches!(
            strict,
            Err(GenerationError::InvalidArgument { name: "opacity", .. })
        ));

        let in_range = RingGenerator::seeded(0)
            .with_strict_opacity(true)
            .generate(&RingSpec::new(2.0, 4, 0.3));
        assert!(in_range.is_ok());
    }

    #[test]
    fn test_custom_plane_height_and_size() {
        let cloud = RingGenerator::seeded(5)
            .with_plane_height(1.5)
            .with_point_size(0.1)
            .generate(&RingSpec::new(2.0, 100, 0.5))
            .unwrap();

        assert!(cloud.particles().all(|p| p.position[1] == 1.5));
        assert_eq!(cloud.point_size(), 0.1);
    }
}
