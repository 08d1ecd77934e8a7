//! Scene light sources: one directional key light, one spot light and a flat
//! ambient term.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::gfx::color::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
}

impl DirectionalLight {
    /// Unit vector the light travels along
    pub fn direction(&self) -> Vector3<f32> {
        direction_between(self.position, self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Half-angle of the cone in radians
    pub angle: f32,
    /// Fraction of the cone, from the rim inwards, over which light fades out
    pub penumbra: f32,
}

impl SpotLight {
    pub fn direction(&self) -> Vector3<f32> {
        direction_between(self.position, self.target)
    }

    /// Cosines of the outer cone edge and of the start of the penumbra
    pub fn cone_cosines(&self) -> (f32, f32) {
        let penumbra = self.penumbra.clamp(0.0, 1.0);
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - penumbra)).cos();
        (outer, inner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Every light in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub spot: SpotLight,
    pub ambient: AmbientLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            directional: DirectionalLight {
                color: hex_to_rgb(0xffffff),
                intensity: 1.2,
                position: Vector3::new(2.0, 5.0, 3.0),
                target: Vector3::zero(),
            },
            spot: SpotLight {
                color: hex_to_rgb(0xffd700),
                intensity: 0.7,
                position: Vector3::new(-5.0, 5.0, -5.0),
                target: Vector3::zero(),
                angle: std::f32::consts::FRAC_PI_4,
                penumbra: 0.5,
            },
            ambient: AmbientLight {
                color: hex_to_rgb(0x444444),
                intensity: 1.0,
            },
        }
    }
}

fn direction_between(from: Vector3<f32>, to: Vector3<f32>) -> Vector3<f32> {
    let delta = to - from;
    if delta.magnitude2() == 0.0 {
        -Vector3::unit_y()
    } else {
        delta.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_point_at_target() {
        let rig = LightRig::default();
        let dir = rig.directional.direction();
        assert!((dir.magnitude() - 1.0).abs() < 1e-6);
        assert!(dir.y < 0.0);

        let spot = rig.spot.direction();
        assert!(spot.x > 0.0 && spot.y < 0.0 && spot.z > 0.0);
    }

    #[test]
    fn test_cone_cosines() {
        let spot = LightRig::default().spot;
        let (outer, inner) = spot.cone_cosines();
        assert!((outer - std::f32::consts::FRAC_PI_4.cos()).abs() < 1e-6);
        assert!((inner - (std::f32::consts::FRAC_PI_8).cos()).abs() < 1e-6);
        assert!(inner > outer);
    }

    #[test]
    fn test_degenerate_direction_falls_back_to_down() {
        let light = DirectionalLight {
            color: [1.0; 3],
            intensity: 1.0,
            position: Vector3::zero(),
            target: Vector3::zero(),
        };
        assert_eq!(light.direction(), -Vector3::unit_y());
    }
}
