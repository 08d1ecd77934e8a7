//! Background starfield: stars scattered uniformly through a cube centred on
//! the origin, each either golden or (pale) white.

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{GenerationError, Particle, PointCloud};
use crate::gfx::color::Hsl;

pub const STAR_GOLD: Hsl = Hsl::new(0.15, 1.0, 0.8);
pub const STAR_WHITE: Hsl = Hsl::new(0.0, 1.0, 0.8);

/// Parameters for the starfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldSpec {
    pub count: usize,
    /// Edge length of the cube the stars are scattered through
    pub extent: f32,
    pub point_size: f32,
    pub opacity: f32,
}

impl Default for StarfieldSpec {
    fn default() -> Self {
        Self {
            count: 1000,
            extent: 200.0,
            point_size: 0.2,
            opacity: 0.9,
        }
    }
}

pub struct StarfieldGenerator<R> {
    rng: R,
}

impl StarfieldGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> StarfieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Scatters `spec.count` stars through the cube
    ///
    /// # Errors
    /// [`GenerationError::InvalidArgument`] when the extent is not a positive
    /// finite number.
    pub fn generate(&mut self, spec: &StarfieldSpec) -> Result<PointCloud, GenerationError> {
        if !spec.extent.is_finite() || spec.extent <= 0.0 {
            return Err(GenerationError::InvalidArgument {
                name: "extent",
                value: spec.extent,
                reason: "must be a positive finite number",
            });
        }

        let gold = STAR_GOLD.to_rgb();
        let white = STAR_WHITE.to_rgb();
        let mut cloud = PointCloud::with_capacity(spec.count, spec.opacity, spec.point_size);

        for _ in 0..spec.count {
            let position = [
                (self.rng.random::<f32>() - 0.5) * spec.extent,
                (self.rng.random::<f32>() - 0.5) * spec.extent,
                (self.rng.random::<f32>() - 0.5) * spec.extent,
            ];
            let color = if self.rng.random_bool(0.5) { gold } else { white };

            cloud.push(Particle { position, color });
        }

        log::debug!("Generated starfield with {} stars", cloud.len());

        Ok(cloud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_starfield() {
        let spec = StarfieldSpec::default();
        let cloud = StarfieldGenerator::seeded(11).generate(&spec).unwrap();

        assert_eq!(cloud.len(), 1000);
        assert_eq!(cloud.opacity(), 0.9);
        assert_eq!(cloud.point_size(), 0.2);

        let half = spec.extent / 2.0;
        assert!(cloud.positions().iter().all(|c| (-half..half).contains(c)));
    }

    #[test]
    fn test_star_palette() {
        let cloud = StarfieldGenerator::seeded(5)
            .generate(&StarfieldSpec::default())
            .unwrap();
        let gold = STAR_GOLD.to_rgb();
        let white = STAR_WHITE.to_rgb();

        let golden = cloud.particles().filter(|p| p.color == gold).count();
        let pale = cloud.particles().filter(|p| p.color == white).count();

        assert_eq!(golden + pale, cloud.len());
        // Both palettes show up in a thousand coin flips
        assert!(golden > 0 && pale > 0);
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let spec = StarfieldSpec {
            extent: -5.0,
            ..Default::default()
        };
        assert!(StarfieldGenerator::seeded(0).generate(&spec).is_err());
    }

    #[test]
    fn test_seeded_starfield_is_deterministic() {
        let spec = StarfieldSpec {
            count: 64,
            ..Default::default()
        };
        let a = StarfieldGenerator::seeded(99).generate(&spec).unwrap();
        let b = StarfieldGenerator::seeded(99).generate(&spec).unwrap();
        assert_eq!(a, b);
    }
}
