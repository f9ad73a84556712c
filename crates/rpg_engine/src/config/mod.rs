//! Configuration system
//!
//! Config files are TOML or RON, selected by file extension.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::ui::{RenderTargetConfig, SoftwareBackendConfig};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&contents, format)
    }

    /// Parse configuration from a string in the given format
    fn from_str_with_format(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialize configuration to a string in the given format
    fn to_string_with_format(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_string_with_format(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level UI configuration
///
/// Missing sections fall back to their defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// UI render target settings
    pub render_target: RenderTargetConfig,
    /// Software backend settings
    pub backend: SoftwareBackendConfig,
}

impl Config for UiConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RenderTextureFormat;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rpg_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("ui.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("ui.ron")).unwrap(), ConfigFormat::Ron);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("ui.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = UiConfig::from_str_with_format("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
            [render_target]
            name_prefix = "HUD Target"
            depth_bits = 16

            [backend]
            screen_width = 320
            screen_height = 200
        "#;
        let config = UiConfig::from_str_with_format(toml, ConfigFormat::Toml).unwrap();

        assert_eq!(config.render_target.name_prefix, "HUD Target");
        assert_eq!(config.render_target.depth_bits, 16);
        assert_eq!(config.render_target.format, RenderTextureFormat::Argb32);
        assert_eq!(config.backend.screen_width, 320);
        assert_eq!(config.backend.screen_height, 200);
        assert_eq!(config.backend.max_texture_size, SoftwareBackendConfig::default().max_texture_size);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = UiConfig::from_str_with_format("[render_target", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_load_toml() {
        let path = temp_path("ui.toml");
        let mut config = UiConfig::default();
        config.render_target.gui_depth = 3;
        config.backend.screen_width = 1024;

        config.save_to_file(&path).unwrap();
        let loaded = UiConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = temp_path("ui.ron");
        let mut config = UiConfig::default();
        config.render_target.name_prefix = "Overlay".to_string();

        config.save_to_file(&path).unwrap();
        let loaded = UiConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = UiConfig::load_from_file(temp_path("does_not_exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
