//! Per-frame motion of the scene's bodies
//!
//! Moons travel on circular orbits around the Y axis and the planet turns
//! slowly about its own tilted pole. Every pose is a pure function of the
//! elapsed time, so frames never accumulate drift.

use std::f32::consts::TAU;

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::scene::Scene;

/// Circular orbit in the XZ plane around the Y axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Seconds per revolution
    pub period: f32,
}

impl Orbit {
    pub fn new(radius: f32, period: f32) -> Self {
        Self { radius, period }
    }

    /// Angle travelled after `elapsed` seconds
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        TAU * elapsed / self.period
    }

    pub fn position_at(&self, elapsed: f32) -> Vector3<f32> {
        let angle = self.angle_at(elapsed);
        Vector3::new(self.radius * angle.cos(), 0.0, self.radius * angle.sin())
    }
}

/// Where a body sits when it is not moving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vector3<f32>,
    /// Rotation about X, applied before any spin
    pub tilt: Rad<f32>,
    /// Uniform scale; the unit sphere mesh becomes a sphere of this radius
    pub scale: f32,
}

impl Placement {
    pub fn at(position: Vector3<f32>, scale: f32) -> Self {
        Self {
            position,
            tilt: Rad(0.0),
            scale,
        }
    }

    pub fn with_tilt(mut self, tilt: Rad<f32>) -> Self {
        self.tilt = tilt;
        self
    }

    /// Model matrix with an extra rotation of `spin` about the body's own pole
    pub fn matrix(&self, spin: Rad<f32>) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(self.tilt)
            * Matrix4::from_angle_y(spin)
            * Matrix4::from_scale(self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Travel along an orbit, keeping the placement's tilt and scale
    Orbit(Orbit),
    /// Stay in place and turn at this many radians per second
    Spin(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AnimatedBody {
    object_index: usize,
    placement: Placement,
    motion: Motion,
}

impl AnimatedBody {
    fn transform_at(&self, elapsed: f32) -> Matrix4<f32> {
        match self.motion {
            Motion::Orbit(orbit) => Placement {
                position: orbit.position_at(elapsed),
                ..self.placement
            }
            .matrix(Rad(0.0)),
            Motion::Spin(rate) => self.placement.matrix(Rad(elapsed * rate)),
        }
    }
}

/// Drives object transforms from the elapsed time
#[derive(Debug, Default)]
pub struct SceneAnimator {
    bodies: Vec<AnimatedBody>,
}

impl SceneAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animates the scene object at `object_index`
    pub fn add_body(&mut self, object_index: usize, placement: Placement, motion: Motion) {
        self.bodies.push(AnimatedBody {
            object_index,
            placement,
            motion,
        });
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Transform of the `body`-th animated body after `elapsed` seconds
    pub fn transform_at(&self, body: usize, elapsed: f32) -> Option<Matrix4<f32>> {
        self.bodies.get(body).map(|b| b.transform_at(elapsed))
    }

    /// Writes every animated object's transform for time `elapsed`
    ///
    /// Only the CPU-side matrices change; upload them with
    /// [`Scene::update_all_transforms`].
    pub fn apply(&self, scene: &mut Scene, elapsed: f32) {
        for body in &self.bodies {
            if let Some(object) = scene.get_object_mut(body.object_index) {
                object.transform = body.transform_at(elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, CameraManager, OrbitCamera, OrbitPose},
        geometry::generate_sphere,
        scene::{Mesh, Object},
    };
    use cgmath::{SquareMatrix, Vector4};

    const EPSILON: f32 = 1e-4;

    fn assert_near(actual: Vector3<f32>, expected: Vector3<f32>) {
        let delta = actual - expected;
        assert!(
            delta.x.abs() < EPSILON && delta.y.abs() < EPSILON && delta.z.abs() < EPSILON,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_orbit_positions() {
        let orbit = Orbit::new(4.0, 10.0);
        assert_near(orbit.position_at(0.0), Vector3::new(4.0, 0.0, 0.0));
        assert_near(orbit.position_at(2.5), Vector3::new(0.0, 0.0, 4.0));
        assert_near(orbit.position_at(5.0), Vector3::new(-4.0, 0.0, 0.0));
        assert_near(orbit.position_at(10.0), Vector3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_orbits_with_longer_periods_lag_behind() {
        let inner = Orbit::new(4.0, 10.0);
        let outer = Orbit::new(6.0, 30.0);
        assert!((inner.angle_at(3.0) - 3.0 * outer.angle_at(3.0)).abs() < EPSILON);
    }

    #[test]
    fn test_spin_turns_about_tilted_pole() {
        let placement = Placement::at(Vector3::new(0.0, -2.0, 0.0), 2.0)
            .with_tilt(Rad(-std::f32::consts::FRAC_PI_2));
        let mut animator = SceneAnimator::new();
        animator.add_body(0, placement, Motion::Spin(0.0001));

        let at_rest = animator.transform_at(0, 0.0).unwrap();
        let origin = at_rest * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_near(origin.truncate(), Vector3::new(0.0, -2.0, 0.0));

        // The pole is the spin axis, so it stays put while the planet turns
        let pole = Vector4::new(0.0, 1.0, 0.0, 1.0);
        let later = animator.transform_at(0, 10_000.0).unwrap();
        assert_near((at_rest * pole).truncate(), (later * pole).truncate());
        assert_near((later * pole).truncate(), Vector3::new(0.0, -2.0, -2.0));
    }

    #[test]
    fn test_apply_moves_scene_objects() {
        let camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 0.1)));
        let moon = scene.add_object(Object::new("moon-0", Mesh::from_geometry(&generate_sphere(4, 4))));

        let mut animator = SceneAnimator::new();
        animator.add_body(
            moon,
            Placement::at(Vector3::new(0.0, 0.0, 0.0), 0.5),
            Motion::Orbit(Orbit::new(5.0, 20.0)),
        );
        assert_eq!(scene.objects[moon].transform, Matrix4::identity());

        animator.apply(&mut scene, 5.0);
        let center = scene.objects[moon].transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_near(center.truncate(), Vector3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_missing_object_is_ignored() {
        let camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 0.1)));
        let mut animator = SceneAnimator::new();
        animator.add_body(3, Placement::at(Vector3::new(0.0, 0.0, 0.0), 1.0), Motion::Spin(1.0));
        animator.apply(&mut scene, 1.0);
        assert!(scene.objects.is_empty());
    }
}
