use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub strip: StripConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            strip: StripConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    /// Scroll speed in pixels per second; the sign picks the direction
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Number of entries in the precomputed scene
    #[serde(default = "default_scene_length")]
    pub scene_length: usize,
    /// Start scrolling as soon as the strip is built
    #[serde(default = "default_true")]
    pub start_immediately: bool,
    /// Walk images in source order instead of picking them at random
    #[serde(default)]
    pub contiguous: bool,
    /// Ordered image source ids (filesystem paths for the default loader)
    #[serde(default)]
    pub images: Vec<String>,
    /// Optional per-image duplication weights, parallel to `images`
    #[serde(default)]
    pub weights: Vec<u32>,
    /// Optional RNG seed for reproducible scenes
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            scene_length: default_scene_length(),
            start_immediately: default_true(),
            contiguous: false,
            images: Vec::new(),
            weights: Vec::new(),
            seed: None,
        }
    }
}

impl StripConfig {
    /// Seedable RNG for scene generation; unseeded configs use entropy.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds for the terminal host
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the one-line status bar under the strip
    #[serde(default = "default_true")]
    pub status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            status_bar: default_true(),
        }
    }
}

fn default_speed() -> f64 {
    60.0
}

fn default_scene_length() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    33
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path or return defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/filmstrip/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("filmstrip")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.strip.speed, 60.0);
        assert_eq!(config.strip.scene_length, 1000);
        assert!(config.strip.start_immediately);
        assert!(!config.strip.contiguous);
        assert!(config.strip.images.is_empty());
        assert_eq!(config.ui.tick_rate_ms, 33);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = StripConfig {
            seed: Some(7),
            ..Default::default()
        };
        let mut a = config.rng();
        let mut b = config.rng();
        for _ in 0..16 {
            assert_eq!(a.usize(..1000), b.usize(..1000));
        }
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [strip]
            speed = -30.0
            contiguous = true
            images = ["a.png", "b.png"]
            "#,
        )
        .unwrap();
        assert_eq!(config.strip.speed, -30.0);
        assert!(config.strip.contiguous);
        assert_eq!(config.strip.scene_length, 1000);
        assert_eq!(config.strip.images.len(), 2);
    }
}
