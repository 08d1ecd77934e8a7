use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Spherical placement of the camera around its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub target: Vector3<f32>,
}

impl Default for OrbitPose {
    /// Ten units down the +Z axis, looking at the origin
    fn default() -> Self {
        Self {
            distance: 10.0,
            pitch: 0.0,
            yaw: 0.0,
            target: Vector3::zero(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    home: OrbitPose,
}

impl Camera for OrbitCamera {
    fn build_view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        Matrix4::look_at_rh(eye, target, self.up)
    }

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.build_view_matrix()
    }
}

impl OrbitCamera {
    pub fn new(pose: OrbitPose, aspect: f32) -> Self {
        let mut camera = Self {
            distance: pose.distance,
            pitch: pose.pitch,
            yaw: pose.yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target: pose.target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            home: pose,
        };
        camera.update();
        camera
    }

    /// Sets the perspective parameters
    ///
    /// # Arguments
    /// * `fovy` - Vertical field of view
    /// * `znear` - Near clip distance
    /// * `zfar` - Far clip distance
    pub fn with_projection(mut self, fovy: impl Into<Rad<f32>>, znear: f32, zfar: f32) -> Self {
        self.fovy = fovy.into();
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    pub fn with_bounds(mut self, bounds: OrbitCameraBounds) -> Self {
        self.bounds = bounds;
        self.set_distance(self.distance);
        self
    }

    /// Returns to the pose the camera was created with
    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.pitch = self.home.pitch;
        self.yaw = self.home.yaw;
        self.target = self.home.target;

        self.update(); // Recalculate eye position
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        // Scale by the current distance so zooming feels the same near and far
        let corrected_zoom = self.distance.max(1.0).log10().max(0.1) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale pan movement by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let total_movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.eye += total_movement;
        self.target += total_movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
        self.uniform.view = convert_matrix4_to_array(self.build_view_matrix());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(2.5),
            max_distance: Some(150.0),
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.001,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.001,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_pose_sits_on_positive_z() {
        let camera = OrbitCamera::new(OrbitPose::default(), 1.5);
        assert_vec_close(camera.eye, Vector3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        camera.set_distance(1000.0);
        assert_eq!(camera.distance, 150.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 2.5);
    }

    #[test]
    fn test_pitch_is_clamped_below_the_pole() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        // Eye never lines up with the up vector
        assert!(camera.eye.x.abs() + camera.eye.z.abs() > 0.0);
    }

    #[test]
    fn test_reset_returns_home() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        camera.add_yaw(1.0);
        camera.add_pitch(0.5);
        camera.pan((0.3, -0.2));
        camera.reset_to_default();
        assert_vec_close(camera.eye, Vector3::new(0.0, 0.0, 10.0));
        assert_vec_close(camera.target, Vector3::zero());
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 16.0 / 9.0);
        camera.update_view_proj();
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..1.0).contains(&ndc.z));
    }

    #[test]
    fn test_resize_ignores_zero_size() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.5);
        camera.resize_projection(0, 600);
        assert_eq!(camera.aspect, 1.5);
        camera.resize_projection(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}
