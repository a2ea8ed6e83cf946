use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::generator::GeneratorOptions;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Frames document the player loads at startup and the generator writes.
    #[serde(default = "default_frames_path")]
    pub frames_path: PathBuf,

    /// Playback tick interval in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub generator: GeneratorOptions,
}

fn default_frames_path() -> PathBuf {
    PathBuf::from("ascii_frames.json")
}

fn default_interval_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames_path: default_frames_path(),
            interval_ms: default_interval_ms(),
            generator: GeneratorOptions::default(),
        }
    }
}

impl Config {
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let content = self
            .to_toml_string()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Platform config path, e.g. `~/.config/spintui/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spintui").join("config.toml"))
    }

    /// Load the platform config if present, otherwise defaults. Returns the
    /// config and a warning when an existing file could not be used.
    pub fn load_or_default() -> (Self, Option<String>) {
        let Some(path) = Self::default_path() else {
            return (Self::default(), None);
        };
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!(
                    "Ignoring unreadable config {}: {}",
                    path.display(),
                    e
                )),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            interval_ms: 80,
            ..Config::default()
        };
        let text = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.interval_ms, 80);
        assert_eq!(parsed.frames_path, config.frames_path);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed = Config::from_toml_str("interval_ms = 100\n").unwrap();
        assert_eq!(parsed.interval_ms, 100);
        assert_eq!(parsed.frames_path, PathBuf::from("ascii_frames.json"));
        assert_eq!(parsed.generator.frame_count, 50);
        assert_eq!(parsed.generator.columns, 100);
    }
}
