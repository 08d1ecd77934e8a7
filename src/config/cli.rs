//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use super::SceneConfig;

/// Ringed planet command-line arguments.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "ringed-planet", about = "A ringed planet with orbiting moons")]
pub struct CliArgs {
    /// Path to a RON scene config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for ring and star generation (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Reject ring opacities outside [0, 1] instead of passing them through.
    #[arg(long)]
    pub strict: bool,

    /// Write the effective config to this path and exit.
    #[arg(long, value_name = "PATH")]
    pub dump_config: Option<PathBuf>,
}

impl SceneConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.strict {
            self.rings.strict_opacity = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = SceneConfig::default();
        let args = CliArgs {
            seed: Some(99),
            width: Some(1920),
            strict: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.window.width, 1920);
        assert!(config.rings.strict_opacity);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 800);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = SceneConfig::default();
        let mut config = SceneConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "ringed-planet",
            "--config",
            "scene.ron",
            "--seed",
            "5",
            "--log-level",
            "debug",
            "--strict",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("scene.ron")));
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.strict);
        assert!(args.width.is_none());
    }
}
