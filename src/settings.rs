//! Play-area and level settings
//!
//! Loaded from an optional JSON file. Missing fields take their defaults, so a
//! file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FRAMES_PER_SECOND;
use crate::geometry::{Point, Rectangle};
use crate::sim::ball::WorldBounds;

/// What happens when a ball reaches the bottom of the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BottomEdge {
    /// A death block below the screen takes the ball out of play
    #[default]
    Death,
    /// The bottom behaves like the other walls
    Reflect,
}

impl BottomEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            BottomEdge::Death => "death",
            BottomEdge::Reflect => "reflect",
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for level layout and ball launch
    pub seed: u64,

    // === Play area ===
    pub gui_width: f64,
    pub gui_height: f64,
    /// Wall thickness on the left, right and top
    pub bounds_thickness: f64,
    /// Strip above the top wall reserved for the score display
    pub score_bar_height: f64,
    pub bottom_edge: BottomEdge,

    // === Paddle ===
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Distance moved per input tick
    pub paddle_step: f64,

    // === Blocks ===
    pub block_width: f64,
    pub block_height: f64,
    pub block_rows: u32,

    // === Balls ===
    pub ball_count: u32,
    pub ball_radius: f64,
    pub ball_speed: f64,

    /// Headless runs stop after this many ticks
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1,

            gui_width: 800.0,
            gui_height: 600.0,
            bounds_thickness: 10.0,
            score_bar_height: 20.0,
            bottom_edge: BottomEdge::Death,

            paddle_width: 80.0,
            paddle_height: 7.0,
            paddle_step: 8.0,

            block_width: 50.0,
            block_height: 20.0,
            block_rows: 6,

            ball_count: 3,
            ball_radius: 8.0,
            ball_speed: 5.0,

            // Five minutes
            max_ticks: 5 * 60 * u64::from(FRAMES_PER_SECOND),
        }
    }
}

impl Settings {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("gui_width", self.gui_width),
            ("gui_height", self.gui_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.bounds_thickness >= 0.0 && self.score_bar_height >= 0.0) {
            return Err(SettingsError::Invalid(
                "bounds_thickness and score_bar_height must not be negative".into(),
            ));
        }

        let interior = self.interior_size();
        if interior.0 <= self.paddle_width || interior.1 <= self.paddle_height {
            return Err(SettingsError::Invalid(format!(
                "play area {}x{} too small for the paddle",
                interior.0, interior.1
            )));
        }
        let widest_row = 2.0 * f64::from(self.block_rows) * self.block_width;
        if widest_row > interior.0 {
            return Err(SettingsError::Invalid(format!(
                "{} rows of {}px blocks need {widest_row}px, play area is {}px wide",
                self.block_rows, self.block_width, interior.0
            )));
        }
        if 2.0 * self.ball_radius >= interior.0.min(interior.1) {
            return Err(SettingsError::Invalid(format!(
                "ball radius {} does not fit the play area",
                self.ball_radius
            )));
        }
        Ok(())
    }

    fn interior_size(&self) -> (f64, f64) {
        (
            self.gui_width - 2.0 * self.bounds_thickness,
            self.gui_height - self.score_bar_height - self.bounds_thickness,
        )
    }

    /// Region inside the walls, open at the bottom down to `gui_height`
    pub fn interior(&self) -> Rectangle {
        let (width, height) = self.interior_size();
        Rectangle::new(
            Point::new(
                self.bounds_thickness,
                self.score_bar_height + self.bounds_thickness,
            ),
            width,
            height,
        )
    }

    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds {
            interior: self.interior(),
            bottom: self.bottom_edge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 99, "bottom_edge": "reflect" }"#).unwrap();
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.bottom_edge, BottomEdge::Reflect);
        assert_eq!(settings.gui_width, 800.0);
        assert_eq!(settings.block_rows, 6);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.ball_count = 5;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "ball_radius": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "block_rows": 20 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "gui_width": 60 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = Path::new("/nonexistent/brick-collide/settings.json");
        assert!(matches!(
            Settings::try_load(path).unwrap_err(),
            SettingsError::Io(_)
        ));
        assert_eq!(Settings::load(path), Settings::default());
    }

    #[test]
    fn test_interior() {
        let interior = Settings::default().interior();
        assert_eq!(interior.upper_left(), Point::new(10.0, 30.0));
        assert_eq!(interior.width(), 780.0);
        assert_eq!(interior.height(), 570.0);
        assert_eq!(BottomEdge::Death.as_str(), "death");
    }
}
