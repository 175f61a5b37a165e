use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::{MAX_EXPORT_EDGE, export_edge};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "SKETCHPAD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct SketchpadConfig {
    /// Width and height of the square canvas, in logical pixels
    pub canvas_size: u32,
    /// Resolution multiplier applied when exporting
    pub export_scale: u32,
    pub thin_thickness: f32,
    pub thick_thickness: f32,
    /// Glyphs offered as stickers on startup
    pub stickers: Vec<String>,
    /// Where the desktop app writes exported PNGs
    pub export_path: PathBuf,
}

impl Default for SketchpadConfig {
    fn default() -> Self {
        Self {
            canvas_size: 256,
            export_scale: 4,
            thin_thickness: 2.0,
            thick_thickness: 5.0,
            stickers: vec!["🌟".to_owned(), "🐱".to_owned(), "🍕".to_owned()],
            export_path: PathBuf::from("sketchpad.png"),
        }
    }
}

impl SketchpadConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `SKETCHPAD_CONFIG`, or use defaults.
    ///
    /// A broken config file is reported and replaced by the defaults.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Ignoring config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_size == 0 {
            return Err(ConfigError::Invalid("canvas_size must be positive".into()));
        }
        if self.export_scale == 0 {
            return Err(ConfigError::Invalid("export_scale must be positive".into()));
        }
        let edge = self.export_size();
        if edge > MAX_EXPORT_EDGE {
            return Err(ConfigError::Invalid(format!(
                "export size {edge}px exceeds the {MAX_EXPORT_EDGE}px limit"
            )));
        }
        for (name, value) in [
            ("thin_thickness", self.thin_thickness),
            ("thick_thickness", self.thick_thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }

    pub fn export_size(&self) -> u32 {
        export_edge(self.canvas_size, self.export_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SketchpadConfig::default();
        assert_eq!(config.export_size(), 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SketchpadConfig::from_json(r#"{ "export_scale": 2 }"#).unwrap();
        assert_eq!(config.export_scale, 2);
        assert_eq!(config.canvas_size, 256);
        assert_eq!(config.stickers.len(), 3);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = SketchpadConfig::from_json(r#"{ "thin_thickness": -1.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SketchpadConfig::from_json(r#"{ "canvas_size": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SketchpadConfig::from_json(r#"{ "canvas_size": 100000 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = SketchpadConfig::from_json(r#"{ "canvas_size": 4096 }"#).unwrap();
        assert_eq!(config.export_size(), MAX_EXPORT_EDGE);
    }

    #[test]
    fn test_malformed_json() {
        let result = SketchpadConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SketchpadConfig::from_file(Path::new("/nonexistent/sketchpad.json"));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
