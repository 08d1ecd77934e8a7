//! Scene configuration.
//!
//! Every parameter of the scene, with defaults that reproduce the stock
//! ringed planet. Values can be loaded from a RON file and overridden on the
//! command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AmbientLightConfig, CameraConfig, DebugConfig, DirectionalLightConfig, LightsConfig,
    MoonsConfig, OrbitConfig, PlanetConfig, RingLayerConfig, RingsConfig, SceneConfig,
    SpotLightConfig, StarsConfig, WindowConfig,
};
pub use error::ConfigError;
