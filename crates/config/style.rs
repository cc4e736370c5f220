use serde::Deserialize;
use std::path::PathBuf;

/// Shared look of every chart. Passed explicitly to each render call.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Style {
    /// Pixels per inch used to turn figure sizes into image sizes.
    pub dpi: u32,
    pub font_family: String,
    /// TrueType file registered for `font_family`; common system locations are searched when unset.
    pub font_path: Option<PathBuf>,
    /// Font sizes in points.
    pub title_size: f64,
    pub label_size: f64,
    pub tick_size: f64,
    /// Light background grid lines.
    pub grid: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            dpi: 100,
            font_family: "sans-serif".to_string(),
            font_path: None,
            title_size: 14.0,
            label_size: 12.0,
            tick_size: 10.0,
            grid: true,
        }
    }
}

impl Style {
    pub fn pixels(&self, inches: f64) -> u32 {
        (inches * self.dpi as f64).round().max(1.0) as u32
    }

    pub fn font_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}
