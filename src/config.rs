//! Deployment configuration: central-media display options and the layout /
//! zoom constants. All values are fixed per deployment, never re-derived;
//! `config.json` may override any subset of them.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Kind of media shown in the central decorative disk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

/// Central-decoration display options (`config.json`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    #[serde(rename = "mediaType", default)]
    pub media_type: MediaType,
    #[serde(rename = "mediaURL", default)]
    pub media_url: String,
    /// Optional overrides for the layout constants.
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl DisplayConfig {
    /// Load and parse `config.json`. A missing or malformed file is fatal to
    /// viewer initialization (one user-visible error state, no retries).
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("config {} not found or could not be loaded", path))?;
        let cfg: DisplayConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path))?;
        Ok(cfg)
    }
}

/// Layout and view-transform constants.
///
/// Defaults are the canonical deployment values; a partial `layout` object in
/// `config.json` overrides individual fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the main circle on which mandala centers are placed.
    pub main_radius: f64,
    /// Radius of each mandala's verse disk.
    pub mandala_radius: f64,
    /// Radius of the central decorative disk (kept inside the home fit).
    pub central_radius: f64,
    /// Fraction of `mandala_radius` the spiral actually fills, leaving a
    /// visual margin from the mandala boundary.
    pub spiral_fill: f64,
    /// Fraction of the viewport the home fit uses (breathing room at edges).
    pub margin_factor: f64,
    /// Home scale multiplier when focusing a mandala.
    pub group_zoom_factor: f64,
    /// Home scale multiplier when focusing a single verse.
    pub item_zoom_factor: f64,
    /// Upper zoom bound as a multiple of the home scale.
    pub max_zoom_multiplier: f64,
    /// Multiplicative step for the manual zoom-in button.
    pub zoom_in_step: f64,
    /// Multiplicative step for the manual zoom-out button.
    pub zoom_out_step: f64,
    /// Transition durations, milliseconds.
    pub zoom_step_duration_ms: f64,
    pub reset_duration_ms: f64,
    pub group_focus_duration_ms: f64,
    pub item_focus_duration_ms: f64,
    /// Minimum time the loading splash stays visible, milliseconds.
    pub splash_min_ms: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            main_radius: 300.0,
            mandala_radius: 85.0,
            central_radius: 150.0,
            spiral_fill: 0.95,
            margin_factor: 0.85,
            group_zoom_factor: 3.5,
            item_zoom_factor: 30.0,
            max_zoom_multiplier: 50.0,
            zoom_in_step: 1.5,
            zoom_out_step: 0.7,
            zoom_step_duration_ms: 300.0,
            reset_duration_ms: 750.0,
            group_focus_duration_ms: 1000.0,
            item_focus_duration_ms: 2000.0,
            splash_min_ms: 2000.0,
        }
    }
}
