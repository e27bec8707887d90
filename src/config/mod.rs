//! Configuration file support for markshot.
//!
//! Settings are read from `~/.config/markshot/config.toml` (or any path handed to
//! [`Config::load_from`]). They cover drawing defaults, arrowhead geometry, undo
//! depth, crop and capture thresholds, optional tools and how long a session
//! waits for its host.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{
    ArrowConfig, CaptureConfig, CropConfig, DrawingConfig, HistoryConfig, SessionConfig,
    ToolsConfig,
};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::draw::TextRenderer;
use crate::input::{BRUSH_SIZE_RANGE, DrawingContext, FONT_SIZE_RANGE};
use crate::tools::ToolSettings;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// default_brush_size = 3.0
/// default_font_size = 16.0
///
/// [arrow]
/// head_length = 20.0
/// head_angle_degrees = 30.0
///
/// [history]
/// max_depth = 50
///
/// [crop]
/// min_size = 10.0
///
/// [tools]
/// enable_highlighter = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default, schemars::JsonSchema)]
pub struct Config {
    /// Drawing defaults (color, brush size, opacity, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead geometry
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Crop tool threshold
    #[serde(default)]
    pub crop: CropConfig,

    /// Region capture threshold and fill
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Optional tools
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Session lifecycle
    #[serde(default)]
    pub session: SessionConfig,
}

fn clamp_f64(name: &str, value: &mut f64, (min, max): (f64, f64)) {
    if !value.is_finite() {
        warn!("Invalid {} {}, using {:.1}", name, value, min);
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name, value, min, max
        );
        *value = value.clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_brush_size`: 1.0 - 20.0
    /// - `default_opacity`: 0.0 - 1.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `arrow.head_length`: 5.0 - 50.0
    /// - `arrow.head_angle_degrees`: 15.0 - 60.0
    /// - `history.max_depth`: 1 - 500
    /// - `crop.min_size`, `capture.min_selection`: 1.0 - 100.0
    /// - `session.attach_timeout_ms`: 100 - 60000
    fn validate_and_clamp(&mut self) {
        clamp_f64(
            "default_brush_size",
            &mut self.drawing.default_brush_size,
            BRUSH_SIZE_RANGE,
        );
        clamp_f64(
            "default_opacity",
            &mut self.drawing.default_opacity,
            (0.0, 1.0),
        );
        clamp_f64(
            "default_font_size",
            &mut self.drawing.default_font_size,
            FONT_SIZE_RANGE,
        );
        clamp_f64("arrow head_length", &mut self.arrow.head_length, (5.0, 50.0));
        clamp_f64(
            "arrow head_angle_degrees",
            &mut self.arrow.head_angle_degrees,
            (15.0, 60.0),
        );
        clamp_f64("crop min_size", &mut self.crop.min_size, (1.0, 100.0));
        clamp_f64(
            "capture min_selection",
            &mut self.capture.min_selection,
            (1.0, 100.0),
        );

        if !(1..=500).contains(&self.history.max_depth) {
            warn!(
                "Invalid history max_depth {}, clamping to 1-500 range",
                self.history.max_depth
            );
            self.history.max_depth = self.history.max_depth.clamp(1, 500);
        }

        if !(100..=60_000).contains(&self.session.attach_timeout_ms) {
            warn!(
                "Invalid attach_timeout_ms {}, clamping to 100-60000 range",
                self.session.attach_timeout_ms
            );
            self.session.attach_timeout_ms = self.session.attach_timeout_ms.clamp(100, 60_000);
        }
    }

    /// Style a new session starts drawing with.
    pub fn drawing_context(&self) -> DrawingContext {
        DrawingContext {
            color: self.drawing.default_color.to_color(),
            brush_size: self.drawing.default_brush_size,
            opacity: self.drawing.default_opacity,
            font_size: self.drawing.default_font_size,
            ..DrawingContext::default()
        }
    }

    /// Geometry thresholds handed to tools on every gesture.
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            arrow_head_length: self.arrow.head_length,
            arrow_head_angle: self.arrow.head_angle_degrees,
            crop_min_size: self.crop.min_size,
        }
    }

    /// Loads the annotation font named by `drawing.font_path`, or a system fallback.
    pub fn text_renderer(&self) -> TextRenderer {
        TextRenderer::load(self.drawing.font_path.as_deref())
    }

    pub fn attach_timeout(&self) -> Duration {
        Duration::from_millis(self.session.attach_timeout_ms)
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/markshot/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("markshot");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::parse(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Saves the current configuration to the default path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory
    /// and returns where it went.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED};

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.drawing.default_brush_size, 3.0);
        assert_eq!(config.drawing.default_font_size, 16.0);
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.arrow.head_length, 20.0);
        assert_eq!(config.arrow.head_angle_degrees, 30.0);
        assert_eq!(config.history.max_depth, 50);
        assert_eq!(config.crop.min_size, 10.0);
        assert!(!config.tools.enable_highlighter);
        assert_eq!(config.attach_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::parse(
            r#"
            [drawing]
            default_brush_size = 99.0
            default_opacity = -1.0
            default_font_size = 2.0

            [arrow]
            head_length = 500.0
            head_angle_degrees = 5.0

            [history]
            max_depth = 0

            [session]
            attach_timeout_ms = 1
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_brush_size, 20.0);
        assert_eq!(config.drawing.default_opacity, 0.0);
        assert_eq!(config.drawing.default_font_size, 8.0);
        assert_eq!(config.arrow.head_length, 50.0);
        assert_eq!(config.arrow.head_angle_degrees, 15.0);
        assert_eq!(config.history.max_depth, 1);
        assert_eq!(config.session.attach_timeout_ms, 100);
    }

    #[test]
    fn drawing_context_and_tool_settings_follow_config() {
        let config = Config::parse(
            r#"
            [drawing]
            default_color = [255, 0, 0]
            default_brush_size = 7.0

            [arrow]
            head_length = 12.0

            [crop]
            min_size = 4.0
            "#,
        )
        .unwrap();

        let drawing = config.drawing_context();
        assert_eq!(drawing.color, RED);
        assert_eq!(drawing.brush_size, 7.0);

        let settings = config.tool_settings();
        assert_eq!(settings.arrow_head_length, 12.0);
        assert_eq!(settings.arrow_head_angle, 30.0);
        assert_eq!(settings.crop_min_size, 4.0);
    }

    #[test]
    fn load_from_reads_an_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markshot.toml");
        fs::write(&path, "[tools]\nenable_highlighter = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.tools.enable_highlighter);
        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn example_config_parses() {
        let config = Config::parse(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.history.max_depth, 50);
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in [
            "drawing", "arrow", "history", "crop", "capture", "tools", "session",
        ] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
