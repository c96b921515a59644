use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::scroll::DEFAULT_DAMPING;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Fraction of the remaining scroll distance covered per frame.
    pub damping: f64,
    /// Target frames per second for the animation clock.
    pub fps: u64,
    /// React to mouse wheel and click input.
    pub mouse: bool,
    /// Path to a showcase TOML file; the built-in set is used when unset.
    pub showcase: Option<String>,
    /// Append tracing output to this file.
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            fps: 60,
            mouse: true,
            showcase: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let user_config_path = get_user_config_path();

        // Seed the user config with defaults on first run. Failing to
        // write it is not fatal; the defaults still apply in memory.
        if !user_config_path.exists() {
            if let Err(err) = write_default_config(&user_config_path) {
                tracing::warn!("could not seed {}: {err}", user_config_path.display());
            }
        }

        let s = Config::builder()
            // 1. Compiled-in defaults.
            .add_source(Config::try_from(&Settings::default())?)
            // 2. Merge user's global config.
            .add_source(File::from(user_config_path).required(false))
            // 3. Merge local showreel.toml from CWD. Optional override.
            .add_source(File::with_name("showreel.toml").required(false))
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.normalize();
        Ok(settings)
    }

    /// Clamps values a hand-edited config could push out of range.
    /// `clamp` lets NaN through, so non-finite damping is reset first.
    pub fn normalize(&mut self) {
        if !self.damping.is_finite() {
            self.damping = DEFAULT_DAMPING;
        }
        self.damping = self.damping.clamp(0.01, 1.0);
        self.fps = self.fps.clamp(10, 240);
    }
}

pub fn get_user_config_path() -> PathBuf {
    let mut path = dirs::home_dir().expect("Failed to get home directory");
    path.push(".config");
    path.push("showreel");
    path.push("showreel.toml");
    path
}

/// Writes the default settings to the user config path, overwriting
/// whatever is there, and returns the path.
pub fn init_config_file() -> Result<PathBuf, anyhow::Error> {
    let path = get_user_config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &PathBuf) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let doc = toml::to_string_pretty(&Settings::default())?;
    fs::write(path, doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_as_is() {
        let settings = Settings::default();
        assert_eq!(settings.damping, DEFAULT_DAMPING);
        assert_eq!(settings.fps, 60);
        assert!(settings.mouse);
        assert!(settings.showcase.is_none());
    }

    #[test]
    fn normalize_clamps_wild_values() {
        let mut settings = Settings {
            damping: 7.0,
            fps: 1,
            ..Settings::default()
        };
        settings.normalize();
        assert_eq!(settings.damping, 1.0);
        assert_eq!(settings.fps, 10);
    }

    #[test]
    fn non_finite_damping_falls_back_to_the_default() {
        for wild in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut settings = Settings {
                damping: wild,
                ..Settings::default()
            };
            settings.normalize();
            assert_eq!(settings.damping, DEFAULT_DAMPING);
        }
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let settings: Settings = toml::from_str("damping = 0.2").unwrap();
        assert_eq!(settings.damping, 0.2);
        assert_eq!(settings.fps, 60);
        assert!(settings.mouse);
    }
}
