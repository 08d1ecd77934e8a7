//! Configuration structs with defaults and RON persistence.

use std::path::Path;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::gfx::{
    color::hex_to_rgb,
    geometry::{RingSpec, StarfieldSpec},
    scene::{AmbientLight, DirectionalLight, LightRig, SpotLight},
};

/// Top-level scene configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub planet: PlanetConfig,
    pub rings: RingsConfig,
    pub moons: MoonsConfig,
    pub lights: LightsConfig,
    pub stars: StarsConfig,
    pub debug: DebugConfig,
    /// Seed for every random generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    pub title: String,
}

/// Projection and orbit control settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Starting distance from the origin along +Z.
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of pending rotation applied per frame (1.0 = no damping).
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

/// The central body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    pub radius: f32,
    /// Sphere resolution, used for both longitude and latitude.
    pub segments: u32,
    /// 0xRRGGBB
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
    pub position: [f32; 3],
    /// Rotation about X in radians, applied before the spin.
    pub tilt: f32,
    /// Spin about the planet's pole in radians per second.
    pub spin_rate: f32,
}

/// One particle ring layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RingLayerConfig {
    pub radius: f32,
    pub particle_count: usize,
    pub opacity: f32,
}

impl RingLayerConfig {
    pub fn spec(&self) -> RingSpec {
        RingSpec::new(self.radius, self.particle_count, self.opacity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingsConfig {
    pub layers: Vec<RingLayerConfig>,
    /// Height of the ring plane.
    pub plane_height: f32,
    /// Sprite size in world units.
    pub point_size: f32,
    /// Reject layers whose opacity lies outside [0, 1].
    pub strict_opacity: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrbitConfig {
    pub radius: f32,
    /// Seconds per revolution.
    pub period: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoonsConfig {
    pub radius: f32,
    pub segments: u32,
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// One moon per entry.
    pub orbits: Vec<OrbitConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DirectionalLightConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpotLightConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    /// Cone half-angle in radians.
    pub angle: f32,
    pub penumbra: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbientLightConfig {
    pub color: u32,
    pub intensity: f32,
}

/// All lights aim at the origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightsConfig {
    pub directional: DirectionalLightConfig,
    pub spot: SpotLightConfig,
    pub ambient: AmbientLightConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarsConfig {
    pub count: usize,
    /// Edge length of the cube the stars fill.
    pub extent: f32,
    pub point_size: f32,
    pub opacity: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            vsync: true,
            title: "Ringed Planet".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 10.0,
            min_distance: 2.5,
            max_distance: 150.0,
            damping: 0.03,
            rotate_speed: 0.005,
            zoom_speed: 0.5,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            segments: 32,
            color: 0x007bff,
            roughness: 0.7,
            metalness: 0.1,
            position: [0.0, -2.0, 0.0],
            tilt: -std::f32::consts::FRAC_PI_2,
            spin_rate: 0.0001,
        }
    }
}

impl Default for RingsConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                RingLayerConfig {
                    radius: 2.3,
                    particle_count: 5000,
                    opacity: 0.8,
                },
                RingLayerConfig {
                    radius: 3.0,
                    particle_count: 3000,
                    opacity: 0.5,
                },
                RingLayerConfig {
                    radius: 3.7,
                    particle_count: 2000,
                    opacity: 0.3,
                },
            ],
            plane_height: crate::gfx::geometry::ring::RING_PLANE_HEIGHT,
            point_size: crate::gfx::geometry::ring::RING_POINT_SIZE,
            strict_opacity: false,
        }
    }
}

impl Default for MoonsConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            segments: 32,
            color: 0xffffff,
            emissive: 0xffffff,
            emissive_intensity: 0.8,
            roughness: 0.2,
            metalness: 0.2,
            orbits: [(4.0, 10.0), (5.0, 20.0), (6.0, 30.0)]
                .into_iter()
                .map(|(radius, period)| OrbitConfig { radius, period })
                .collect(),
        }
    }
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 1.2,
            position: [2.0, 5.0, 3.0],
        }
    }
}

impl Default for SpotLightConfig {
    fn default() -> Self {
        Self {
            color: 0xffd700,
            intensity: 0.7,
            position: [-5.0, 5.0, -5.0],
            angle: std::f32::consts::FRAC_PI_4,
            penumbra: 0.5,
        }
    }
}

impl Default for AmbientLightConfig {
    fn default() -> Self {
        Self {
            color: 0x444444,
            intensity: 1.0,
        }
    }
}

impl Default for StarsConfig {
    fn default() -> Self {
        let spec = StarfieldSpec::default();
        Self {
            count: spec.count,
            extent: spec.extent,
            point_size: spec.point_size,
            opacity: spec.opacity,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Conversions into scene types ---

impl StarsConfig {
    pub fn spec(&self) -> StarfieldSpec {
        StarfieldSpec {
            count: self.count,
            extent: self.extent,
            point_size: self.point_size,
            opacity: self.opacity,
        }
    }
}

impl LightsConfig {
    pub fn light_rig(&self) -> LightRig {
        LightRig {
            directional: DirectionalLight {
                color: hex_to_rgb(self.directional.color),
                intensity: self.directional.intensity,
                position: Vector3::from(self.directional.position),
                target: Vector3::new(0.0, 0.0, 0.0),
            },
            spot: SpotLight {
                color: hex_to_rgb(self.spot.color),
                intensity: self.spot.intensity,
                position: Vector3::from(self.spot.position),
                target: Vector3::new(0.0, 0.0, 0.0),
                angle: self.spot.angle,
                penumbra: self.spot.penumbra,
            },
            ambient: AmbientLight {
                color: hex_to_rgb(self.ambient.color),
                intensity: self.ambient.intensity,
            },
        }
    }
}

// --- Load / Save / Validate ---

impl SceneConfig {
    /// Parses a config from RON text; missing sections and fields keep their defaults.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(ConfigError::ParseError)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)
    }

    /// Loads and validates the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::from_ron_str(&contents)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes the config to `path` as pretty RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        let serialized = self.to_ron_string()?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        log::info!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Rejects values that cannot produce a working scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid("window", "width and height must be non-zero"));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::invalid("camera.fov_degrees", "must lie in (0, 180)"));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(ConfigError::invalid("camera.near", "must satisfy 0 < near < far"));
        }
        if !(camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance) {
            return Err(ConfigError::invalid(
                "camera.min_distance",
                "must satisfy 0 < min_distance <= max_distance",
            ));
        }
        if !(camera.damping > 0.0 && camera.damping <= 1.0) {
            return Err(ConfigError::invalid("camera.damping", "must lie in (0, 1]"));
        }

        positive("planet.radius", self.planet.radius)?;
        positive("moons.radius", self.moons.radius)?;
        positive("rings.point_size", self.rings.point_size)?;
        positive("stars.extent", self.stars.extent)?;
        positive("stars.point_size", self.stars.point_size)?;

        for (i, layer) in self.rings.layers.iter().enumerate() {
            positive(&format!("rings.layers[{i}].radius"), layer.radius)?;
        }
        for (i, orbit) in self.moons.orbits.iter().enumerate() {
            positive(&format!("moons.orbits[{i}].radius"), orbit.radius)?;
            positive(&format!("moons.orbits[{i}].period"), orbit.period)?;
        }

        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_stock_scene() {
        let config = SceneConfig::default();

        let rings: Vec<_> = config
            .rings
            .layers
            .iter()
            .map(|l| (l.radius, l.particle_count, l.opacity))
            .collect();
        assert_eq!(rings, vec![(2.3, 5000, 0.8), (3.0, 3000, 0.5), (3.7, 2000, 0.3)]);

        let orbits: Vec<_> = config
            .moons
            .orbits
            .iter()
            .map(|o| (o.radius, o.period))
            .collect();
        assert_eq!(orbits, vec![(4.0, 10.0), (5.0, 20.0), (6.0, 30.0)]);

        assert_eq!(config.planet.color, 0x007bff);
        assert_eq!(config.planet.position, [0.0, -2.0, 0.0]);
        assert_eq!(config.rings.plane_height, -2.0);
        assert_eq!(config.rings.point_size, 0.05);
        assert_eq!(config.stars.count, 1000);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.camera.damping, 0.03);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_light_rig_matches() {
        assert_eq!(SceneConfig::default().lights.light_rig(), LightRig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = SceneConfig::default();
        config.seed = Some(42);
        let ron_str = config.to_ron_string().unwrap();
        let deserialized = SceneConfig::from_ron_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config = SceneConfig::from_ron_str("(window: (width: 640), seed: Some(7))").unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.moons, MoonsConfig::default());
    }

    #[test]
    fn test_hex_colors_parse() {
        let config = SceneConfig::from_ron_str("(planet: (color: 0xff0000))").unwrap();
        assert_eq!(config.planet.color, 0xff0000);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result = SceneConfig::from_ron_str("{{not valid}}");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.moons.orbits[1].period = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("moons.orbits[1].period"));

        let mut config = SceneConfig::default();
        config.rings.layers[0].radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.camera.near = 2000.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");

        let mut config = SceneConfig::default();
        config.window.width = 1920;
        config.rings.layers.pop();
        config.save(&path).unwrap();

        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SceneConfig::load(&dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
