//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing-related settings.
///
/// Controls the style every new editing session starts with. Hosts can change
/// these at runtime through the session's style setters.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default stroke and text color - a named color, `#rrggbb`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: f64,

    /// Default stroke opacity (valid range: 0.0 - 1.0). Text is always drawn opaque.
    #[serde(default = "default_opacity")]
    pub default_opacity: f64,

    /// Default font size for the text tool in pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// TrueType/OpenType font file used for text annotations.
    /// When unset, common system sans-serif fonts are tried in turn.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_brush_size: default_brush_size(),
            default_opacity: default_opacity(),
            default_font_size: default_font_size(),
            font_path: None,
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub head_length: f64,

    /// Angle between each arrowhead edge and the shaft, in degrees (valid range: 15.0 - 60.0)
    #[serde(default = "default_arrow_angle")]
    pub head_angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            head_length: default_arrow_length(),
            head_angle_degrees: default_arrow_angle(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of undo steps kept (valid range: 1 - 500)
    #[serde(default = "default_history_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_history_depth(),
        }
    }
}

/// Crop tool settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CropConfig {
    /// Crops narrower or shorter than this many pixels are ignored (valid range: 1.0 - 100.0)
    #[serde(default = "default_min_size")]
    pub min_size: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
        }
    }
}

/// Region capture settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// A selection must be wider and taller than this many pixels to be captured
    /// (valid range: 1.0 - 100.0)
    #[serde(default = "default_min_size")]
    pub min_selection: f64,

    /// Fill used where a selection extends past the rendered page
    #[serde(default = "default_background")]
    pub background_color: ColorSpec,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            min_selection: default_min_size(),
            background_color: default_background(),
        }
    }
}

/// Tool registration options.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    /// Register the highlighter after the default tools
    #[serde(default)]
    pub enable_highlighter: bool,
}

/// Editing session lifecycle settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// How long `load_image` waits for the host to attach the surface, in
    /// milliseconds (valid range: 100 - 60000)
    #[serde(default = "default_attach_timeout")]
    pub attach_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            attach_timeout_ms: default_attach_timeout(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_size() -> f64 {
    3.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_arrow_length() -> f64 {
    20.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_history_depth() -> usize {
    crate::history::DEFAULT_MAX_DEPTH
}

fn default_min_size() -> f64 {
    10.0
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_attach_timeout() -> u64 {
    2500
}
